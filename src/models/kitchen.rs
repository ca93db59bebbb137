//! The meal catalog: creation, soft deletion, lookups, battle statistics,
//! and the leaderboard.
//!
//! Every function takes a [`Store`] handle and opens its own short-lived
//! connection. Deletion is logical: `delete_meal` flips the `deleted` flag
//! and all reads filter on it.

use crate::core::db;
use crate::core::error::MealMaxError;
use crate::core::schemas;
use crate::core::store::Store;
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preparation difficulty of a meal, stored as `LOW`/`MED`/`HIGH` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = MealMaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MED" => Ok(Self::Med),
            "HIGH" => Ok(Self::High),
            other => Err(MealMaxError::ValidationError(format!(
                "Invalid difficulty level: {}. Must be 'LOW', 'MED', or 'HIGH'.",
                other
            ))),
        }
    }
}

/// A catalog entry. Immutable once constructed; battle statistics live only
/// in the store, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub meal: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
}

impl Meal {
    /// Construct a meal, enforcing the price invariant.
    pub fn new(
        id: i64,
        meal: impl Into<String>,
        cuisine: impl Into<String>,
        price: f64,
        difficulty: Difficulty,
    ) -> Result<Self, MealMaxError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(MealMaxError::ValidationError(format!(
                "Invalid price: {}. Price must be a positive number.",
                price
            )));
        }
        Ok(Self {
            id,
            meal: meal.into(),
            cuisine: cuisine.into(),
            price,
            difficulty,
        })
    }
}

/// Outcome reported for one side of a resolved battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl BattleOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
        }
    }
}

/// One leaderboard row. `win_pct` is `100 * wins / battles` rounded to one
/// decimal place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub meal: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: i64,
    pub wins: i64,
    pub win_pct: f64,
}

pub fn create_meal(
    store: &Store,
    meal: &str,
    cuisine: &str,
    price: f64,
    difficulty: &str,
) -> Result<(), MealMaxError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(MealMaxError::ValidationError(format!(
            "Invalid price: {}. Price must be a positive number.",
            price
        )));
    }
    let difficulty = Difficulty::from_str(difficulty)?;

    let conn = db::db_connect(&db::catalog_db_path(&store.root))?;
    let res = conn.execute(
        "INSERT INTO meals (meal, cuisine, price, difficulty)
         VALUES (?1, ?2, ?3, ?4)",
        params![meal, cuisine, price, difficulty.as_str()],
    );
    match res {
        Ok(_) => {
            log::info!("Meal created: {}", meal);
            Ok(())
        }
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(MealMaxError::ValidationError(format!(
                "Meal with name '{}' already exists",
                meal
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Soft-delete a meal. The row stays in the table with `deleted = TRUE`.
pub fn delete_meal(store: &Store, meal_id: i64) -> Result<(), MealMaxError> {
    let conn = db::db_connect(&db::catalog_db_path(&store.root))?;
    check_not_deleted(&conn, meal_id)?;
    conn.execute(
        "UPDATE meals SET deleted = TRUE WHERE id = ?1",
        params![meal_id],
    )?;
    log::info!("Meal with ID {} marked as deleted", meal_id);
    Ok(())
}

/// Drop and recreate the meals table. Intended for test harnesses and
/// workspace resets.
pub fn clear_meals(store: &Store) -> Result<(), MealMaxError> {
    let conn = db::db_connect(&db::catalog_db_path(&store.root))?;
    conn.execute(schemas::CATALOG_DB_DROP, [])?;
    conn.execute(schemas::CATALOG_DB_SCHEMA, [])?;
    log::info!("Meals cleared and table recreated");
    Ok(())
}

pub fn get_meal_by_id(store: &Store, meal_id: i64) -> Result<Meal, MealMaxError> {
    let conn = db::db_connect(&db::catalog_db_path(&store.root))?;
    let row = conn
        .query_row(
            "SELECT id, meal, cuisine, price, difficulty, deleted FROM meals WHERE id = ?1",
            params![meal_id],
            map_meal_row,
        )
        .optional()?;

    match row {
        None => Err(MealMaxError::NotFound(format!(
            "Meal with ID {} not found",
            meal_id
        ))),
        Some((_, _, _, _, _, true)) => Err(MealMaxError::NotFound(format!(
            "Meal with ID {} has been deleted",
            meal_id
        ))),
        Some((id, meal, cuisine, price, difficulty, false)) => {
            Meal::new(id, meal, cuisine, price, Difficulty::from_str(&difficulty)?)
        }
    }
}

pub fn get_meal_by_name(store: &Store, name: &str) -> Result<Meal, MealMaxError> {
    let conn = db::db_connect(&db::catalog_db_path(&store.root))?;
    let row = conn
        .query_row(
            "SELECT id, meal, cuisine, price, difficulty, deleted FROM meals WHERE meal = ?1",
            params![name],
            map_meal_row,
        )
        .optional()?;

    match row {
        None => Err(MealMaxError::NotFound(format!(
            "Meal with name {} not found",
            name
        ))),
        Some((_, _, _, _, _, true)) => Err(MealMaxError::NotFound(format!(
            "Meal with name {} has been deleted",
            name
        ))),
        Some((id, meal, cuisine, price, difficulty, false)) => {
            Meal::new(id, meal, cuisine, price, Difficulty::from_str(&difficulty)?)
        }
    }
}

/// Record one battle outcome against a meal's persisted counters.
///
/// A win increments both `battles` and `wins`; a loss increments `battles`
/// only.
pub fn update_meal_stats(
    store: &Store,
    meal_id: i64,
    outcome: BattleOutcome,
) -> Result<(), MealMaxError> {
    let conn = db::db_connect(&db::catalog_db_path(&store.root))?;
    check_not_deleted(&conn, meal_id)?;

    let sql = match outcome {
        BattleOutcome::Win => "UPDATE meals SET battles = battles + 1, wins = wins + 1 WHERE id = ?1",
        BattleOutcome::Loss => "UPDATE meals SET battles = battles + 1 WHERE id = ?1",
    };
    conn.execute(sql, params![meal_id])?;
    log::info!(
        "Recorded {} for meal with ID {}",
        outcome.as_str(),
        meal_id
    );
    Ok(())
}

/// Leaderboard of all non-deleted meals with at least one battle, sorted
/// descending by `sort_by` (`"wins"` or `"win_pct"`).
pub fn get_leaderboard(
    store: &Store,
    sort_by: &str,
) -> Result<Vec<LeaderboardEntry>, MealMaxError> {
    let sql = match sort_by {
        "wins" => {
            "SELECT id, meal, cuisine, price, difficulty, battles, wins,
                    (wins * 1.0 / battles) AS win_pct
             FROM meals WHERE deleted = FALSE AND battles > 0
             ORDER BY wins DESC"
        }
        "win_pct" => {
            "SELECT id, meal, cuisine, price, difficulty, battles, wins,
                    (wins * 1.0 / battles) AS win_pct
             FROM meals WHERE deleted = FALSE AND battles > 0
             ORDER BY win_pct DESC"
        }
        other => {
            return Err(MealMaxError::InvalidParameterError(format!(
                "Invalid sort_by parameter: {}",
                other
            )));
        }
    };

    let conn = db::db_connect(&db::catalog_db_path(&store.root))?;
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, f64>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, i64>(5)?,
            row.get::<_, i64>(6)?,
            row.get::<_, f64>(7)?,
        ))
    })?;

    let mut entries = Vec::new();
    for r in rows {
        let (id, meal, cuisine, price, difficulty, battles, wins, ratio) = r?;
        entries.push(LeaderboardEntry {
            id,
            meal,
            cuisine,
            price,
            difficulty: Difficulty::from_str(&difficulty)?,
            battles,
            wins,
            // one decimal place, e.g. 25/50 -> 50.0
            win_pct: (ratio * 1000.0).round() / 10.0,
        });
    }
    Ok(entries)
}

type MealRow = (i64, String, String, f64, String, bool);

fn map_meal_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MealRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn check_not_deleted(conn: &rusqlite::Connection, meal_id: i64) -> Result<(), MealMaxError> {
    let deleted = conn
        .query_row(
            "SELECT deleted FROM meals WHERE id = ?1",
            params![meal_id],
            |row| row.get::<_, bool>(0),
        )
        .optional()?;

    match deleted {
        None => Err(MealMaxError::NotFound(format!(
            "Meal with ID {} not found",
            meal_id
        ))),
        Some(true) => Err(MealMaxError::NotFound(format!(
            "Meal with ID {} has been deleted",
            meal_id
        ))),
        Some(false) => Ok(()),
    }
}
