use mealmax::core::db;
use mealmax::core::error::MealMaxError;
use mealmax::core::random::RandomSource;
use mealmax::core::store::Store;
use mealmax::models::battle::{BattleEngine, StatRecorder};
use mealmax::models::kitchen::{
    BattleOutcome, Difficulty, Meal, create_meal, get_leaderboard, get_meal_by_name,
};
use std::cell::RefCell;
use std::rc::Rc;
use tempfile::tempdir;

/// Random source that always returns the same draw.
struct FixedRandom(f64);

impl RandomSource for FixedRandom {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

/// Stat recorder that captures every call instead of touching a database.
#[derive(Clone, Default)]
struct RecordingStats {
    calls: Rc<RefCell<Vec<(i64, BattleOutcome)>>>,
}

impl StatRecorder for RecordingStats {
    fn record_outcome(&self, meal_id: i64, outcome: BattleOutcome) -> Result<(), MealMaxError> {
        self.calls.borrow_mut().push((meal_id, outcome));
        Ok(())
    }
}

fn sample_meal1() -> Meal {
    Meal::new(1, "potatoes", "irish", 1.00, Difficulty::Med).unwrap()
}

fn sample_meal2() -> Meal {
    Meal::new(2, "sallys bread", "salleian", 18.00, Difficulty::High).unwrap()
}

fn test_engine() -> (RecordingStats, BattleEngine<RecordingStats, FixedRandom>) {
    let stats = RecordingStats::default();
    let engine = BattleEngine::new(stats.clone(), FixedRandom(0.42));
    (stats, engine)
}

#[test]
fn test_get_battle_score() {
    let (_stats, engine) = test_engine();

    // len("irish") * 1.00 - MED modifier (2) = 3.0
    assert_eq!(engine.get_battle_score(&sample_meal1()), 3.0);
    // len("salleian") * 18.00 - HIGH modifier (1) = 143.0
    assert_eq!(engine.get_battle_score(&sample_meal2()), 143.0);
}

#[test]
fn test_battle_score_difficulty_ordering() {
    let (_stats, engine) = test_engine();

    let high = Meal::new(1, "a", "greek", 5.0, Difficulty::High).unwrap();
    let med = Meal::new(2, "b", "greek", 5.0, Difficulty::Med).unwrap();
    let low = Meal::new(3, "c", "greek", 5.0, Difficulty::Low).unwrap();

    let s_high = engine.get_battle_score(&high);
    let s_med = engine.get_battle_score(&med);
    let s_low = engine.get_battle_score(&low);
    assert!(s_high > s_med && s_med > s_low);
    assert_eq!(s_high - s_med, 1.0);
    assert_eq!(s_med - s_low, 1.0);
}

#[test]
fn test_battle_score_price_term_scales_linearly() {
    let (_stats, engine) = test_engine();

    let base = Meal::new(1, "a", "greek", 4.0, Difficulty::Med).unwrap();
    let doubled = Meal::new(2, "b", "greek", 8.0, Difficulty::Med).unwrap();

    // Doubling the price doubles the price term exactly (modifier aside).
    let modifier = 2.0;
    assert_eq!(
        engine.get_battle_score(&doubled) + modifier,
        2.0 * (engine.get_battle_score(&base) + modifier)
    );
}

#[test]
fn test_battle_fixed_draw_higher_score_wins() {
    let (stats, mut engine) = test_engine();

    engine.prep_combatant(sample_meal1()).unwrap();
    engine.prep_combatant(sample_meal2()).unwrap();

    // delta = |3.0 - 143.0| / 100 = 1.4 > 0.42, so the higher scorer wins.
    let winner = engine.battle().unwrap();
    assert_eq!(winner, "sallys bread");

    assert_eq!(
        *stats.calls.borrow(),
        vec![(2, BattleOutcome::Win), (1, BattleOutcome::Loss)]
    );

    let remaining = engine.get_combatants();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].meal, winner);
}

#[test]
fn test_battle_small_gap_lower_score_wins() {
    let stats = RecordingStats::default();
    let mut engine = BattleEngine::new(stats.clone(), FixedRandom(0.99));

    // Scores 3.0 vs 2.0: delta 0.01 never exceeds 0.99, so the lower scorer
    // takes it.
    let low_scorer = Meal::new(2, "dolmades", "greek", 1.00, Difficulty::Low).unwrap();
    engine.prep_combatant(sample_meal1()).unwrap();
    engine.prep_combatant(low_scorer).unwrap();

    let winner = engine.battle().unwrap();
    assert_eq!(winner, "dolmades");
    assert_eq!(
        *stats.calls.borrow(),
        vec![(2, BattleOutcome::Win), (1, BattleOutcome::Loss)]
    );
}

#[test]
fn test_battle_not_enough_combatants() {
    let (stats, mut engine) = test_engine();

    let err = engine.battle().unwrap_err();
    assert!(matches!(err, MealMaxError::StateError(_)));
    assert!(format!("{}", err).contains("Two combatants must be prepped for a battle."));

    engine.prep_combatant(sample_meal1()).unwrap();
    let err = engine.battle().unwrap_err();
    assert!(matches!(err, MealMaxError::StateError(_)));

    // No stat updates were issued for the failed battles.
    assert!(stats.calls.borrow().is_empty());
    assert_eq!(engine.get_combatants().len(), 1);
}

#[test]
fn test_prep_combatant() {
    let (_stats, mut engine) = test_engine();

    engine.prep_combatant(sample_meal1()).unwrap();
    assert_eq!(engine.get_combatants().len(), 1);
    assert_eq!(engine.get_combatants()[0].meal, "potatoes");
}

#[test]
fn test_prep_combatant_overfill() {
    let (_stats, mut engine) = test_engine();

    engine.prep_combatant(sample_meal1()).unwrap();
    engine.prep_combatant(sample_meal1()).unwrap();

    let err = engine.prep_combatant(sample_meal1()).unwrap_err();
    assert!(matches!(err, MealMaxError::CapacityError(_)));
    assert!(format!("{}", err).contains("Combatant list is full, cannot add more combatants."));
    assert_eq!(engine.get_combatants().len(), 2);
}

#[test]
fn test_clear_combatants_idempotent() {
    let (_stats, mut engine) = test_engine();

    engine.prep_combatant(sample_meal1()).unwrap();
    engine.clear_combatants();
    assert!(engine.get_combatants().is_empty());

    engine.clear_combatants();
    assert!(engine.get_combatants().is_empty());
}

#[test]
fn test_get_combatants_preserves_order() {
    let (_stats, mut engine) = test_engine();

    engine.prep_combatant(sample_meal1()).unwrap();
    engine.prep_combatant(sample_meal2()).unwrap();

    let all = engine.get_combatants();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[1].id, 2);
}

#[test]
fn test_battle_against_catalog_store() {
    let tmp = tempdir().unwrap();
    let store = Store::new(tmp.path());
    db::initialize_catalog_db(&store.root).unwrap();

    create_meal(&store, "potatoes", "irish", 1.00, "MED").unwrap();
    create_meal(&store, "pad thai", "thai", 18.00, "HIGH").unwrap();

    let mut engine = BattleEngine::new(store.clone(), FixedRandom(0.0));
    engine
        .prep_combatant(get_meal_by_name(&store, "potatoes").unwrap())
        .unwrap();
    engine
        .prep_combatant(get_meal_by_name(&store, "pad thai").unwrap())
        .unwrap();

    // Any positive delta beats a draw of 0.0, so the higher scorer wins.
    let winner = engine.battle().unwrap();
    assert_eq!(winner, "pad thai");

    let board = get_leaderboard(&store, "wins").unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].meal, "pad thai");
    assert_eq!(board[0].battles, 1);
    assert_eq!(board[0].wins, 1);
    assert_eq!(board[1].meal, "potatoes");
    assert_eq!(board[1].battles, 1);
    assert_eq!(board[1].wins, 0);
}

#[test]
fn test_battle_surfaces_recorder_failure() {
    struct FailingStats;

    impl StatRecorder for FailingStats {
        fn record_outcome(&self, meal_id: i64, _: BattleOutcome) -> Result<(), MealMaxError> {
            Err(MealMaxError::NotFound(format!(
                "Meal with ID {} not found",
                meal_id
            )))
        }
    }

    let mut engine = BattleEngine::new(FailingStats, FixedRandom(0.42));
    engine.prep_combatant(sample_meal1()).unwrap();
    engine.prep_combatant(sample_meal2()).unwrap();

    let err = engine.battle().unwrap_err();
    assert!(matches!(err, MealMaxError::NotFound(_)));
    // Staging is left untouched when resolution fails mid-way.
    assert_eq!(engine.get_combatants().len(), 2);
}
