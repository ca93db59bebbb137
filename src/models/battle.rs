//! Battle resolution between two staged meals.
//!
//! The engine holds at most two combatants, derives a score for each from
//! its attributes, and settles the fight with one uniform random draw: the
//! wider the score gap, the more certain the higher scorer's win. Both
//! collaborators are injected, so tests can pin the draw and capture the
//! stat updates without a database.

use crate::core::error::MealMaxError;
use crate::core::random::RandomSource;
use crate::core::store::Store;
use crate::models::kitchen::{self, BattleOutcome, Difficulty, Meal};

/// Sink for resolved battle outcomes.
pub trait StatRecorder {
    fn record_outcome(&self, meal_id: i64, outcome: BattleOutcome) -> Result<(), MealMaxError>;
}

/// The catalog store records outcomes as persisted win/battle counters.
impl StatRecorder for Store {
    fn record_outcome(&self, meal_id: i64, outcome: BattleOutcome) -> Result<(), MealMaxError> {
        kitchen::update_meal_stats(self, meal_id, outcome)
    }
}

/// Stages up to two combatants and resolves a battle between them.
///
/// One engine serves one logical session; it is not shared across callers.
pub struct BattleEngine<S: StatRecorder, R: RandomSource> {
    stats: S,
    random: R,
    combatants: Vec<Meal>,
}

impl<S: StatRecorder, R: RandomSource> BattleEngine<S, R> {
    pub fn new(stats: S, random: R) -> Self {
        Self {
            stats,
            random,
            combatants: Vec::with_capacity(2),
        }
    }

    /// Stage a combatant. Fails once two are already staged.
    pub fn prep_combatant(&mut self, meal: Meal) -> Result<(), MealMaxError> {
        if self.combatants.len() >= 2 {
            return Err(MealMaxError::CapacityError(
                "Combatant list is full, cannot add more combatants.".to_string(),
            ));
        }
        log::info!("Adding combatant '{}' to the battle", meal.meal);
        self.combatants.push(meal);
        Ok(())
    }

    /// Empty the staging area. Idempotent.
    pub fn clear_combatants(&mut self) {
        log::info!("Clearing the combatants list");
        self.combatants.clear();
    }

    /// Battle score of a meal: cuisine-name length times price, minus the
    /// difficulty modifier. HIGH subtracts least, so harder meals score
    /// higher, all else equal.
    pub fn get_battle_score(&self, meal: &Meal) -> f64 {
        let difficulty_modifier = match meal.difficulty {
            Difficulty::High => 1.0,
            Difficulty::Med => 2.0,
            Difficulty::Low => 3.0,
        };
        meal.cuisine.chars().count() as f64 * meal.price - difficulty_modifier
    }

    /// Resolve the battle between the two staged combatants.
    ///
    /// Draws one random number `r` in `[0, 1)` and compares it against
    /// `delta = |score_1 - score_2| / 100`: if `delta > r` the higher scorer
    /// wins, otherwise the lower scorer does. Records a win and a loss with
    /// the stat recorder, evicts the loser from staging, and returns the
    /// winner's name. If the second stat update fails after the first
    /// succeeded, the counters are left inconsistent; no rollback is
    /// attempted.
    pub fn battle(&mut self) -> Result<String, MealMaxError> {
        if self.combatants.len() < 2 {
            return Err(MealMaxError::StateError(
                "Two combatants must be prepped for a battle.".to_string(),
            ));
        }

        log::info!("Two meals enter, one meal leaves!");
        let score_1 = self.get_battle_score(&self.combatants[0]);
        let score_2 = self.get_battle_score(&self.combatants[1]);
        let delta = (score_1 - score_2).abs() / 100.0;
        let random_number = self.random.draw();
        log::debug!(
            "Battle scores: {:.3} vs {:.3}, delta {:.3}, random number {:.3}",
            score_1,
            score_2,
            delta,
            random_number
        );

        let winner_idx = if delta > random_number {
            if score_1 > score_2 { 0 } else { 1 }
        } else if score_1 < score_2 {
            0
        } else {
            1
        };
        let loser_idx = 1 - winner_idx;

        self.stats
            .record_outcome(self.combatants[winner_idx].id, BattleOutcome::Win)?;
        self.stats
            .record_outcome(self.combatants[loser_idx].id, BattleOutcome::Loss)?;

        self.combatants.remove(loser_idx);
        let winner_name = self.combatants[0].meal.clone();
        log::info!("The winner is: {}", winner_name);
        Ok(winner_name)
    }

    /// Current staging sequence, in insertion order.
    pub fn get_combatants(&self) -> &[Meal] {
        &self.combatants
    }
}
