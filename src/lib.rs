//! mealmax: a meal catalog with battle resolution
//!
//! **mealmax keeps a SQLite catalog of meals and settles head-to-head
//! "battles" between two of them.**
//!
//! The catalog is one table with soft-delete semantics: rows are flagged
//! `deleted`, never physically removed, and every lookup filters the flag.
//! Battles are resolved by the [`models::battle::BattleEngine`], which stages
//! up to two combatants, derives a score from each meal's attributes, and
//! picks the winner with a single weighted random draw. The outcome lands
//! back in the catalog as win/battle counters, which feed the leaderboard.
//!
//! # Architecture
//!
//! - [`core`]: connection handling, schema DDL, error taxonomy, the `Store`
//!   handle, and the injectable random source
//! - [`models`]: the meal catalog (`kitchen`) and the battle engine (`battle`)
//!
//! Both collaborators of the engine are injected: stat updates go through the
//! [`models::battle::StatRecorder`] trait and randomness through
//! [`core::random::RandomSource`], so resolution is deterministic under test.
//!
//! # Example
//!
//! ```no_run
//! use mealmax::core::db;
//! use mealmax::core::random::SystemRandom;
//! use mealmax::core::store::Store;
//! use mealmax::models::battle::BattleEngine;
//! use mealmax::models::kitchen;
//!
//! # fn main() -> Result<(), mealmax::core::error::MealMaxError> {
//! let store = Store::new("./data");
//! db::initialize_catalog_db(&store.root)?;
//!
//! kitchen::create_meal(&store, "potatoes", "irish", 1.00, "MED")?;
//! kitchen::create_meal(&store, "pad thai", "thai", 12.50, "HIGH")?;
//!
//! let mut engine = BattleEngine::new(store.clone(), SystemRandom::default());
//! engine.prep_combatant(kitchen::get_meal_by_name(&store, "potatoes")?)?;
//! engine.prep_combatant(kitchen::get_meal_by_name(&store, "pad thai")?)?;
//! let winner = engine.battle()?;
//! println!("winner: {winner}");
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod models;
