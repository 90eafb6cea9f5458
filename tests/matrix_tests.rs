use pokemon_trainer_battle::battle::BattleOptions;
use pokemon_trainer_battle::demo::demo_trainers;
use pokemon_trainer_battle::matrix::{compute_matchup_matrix, simulate_matches, write_csv};
use pokemon_trainer_battle::model::{Move, MoveCategory, Pokemon};
use pokemon_trainer_battle::roster::Roster;
use pokemon_trainer_battle::BattleError;

fn make_mon(name: &str, hp: i32, power: i32) -> Pokemon {
    let strike = Move::new("Strike", "Normal", power, 100, MoveCategory::Physical).unwrap();
    Pokemon::new(name, "Normal", hp, vec![strike]).unwrap()
}

#[test]
fn matrix_is_reproducible_and_bounded() {
    let (ash, gary) = demo_trainers().unwrap();
    let options = BattleOptions::default();
    let first = compute_matchup_matrix(ash.team(), gary.team(), 40, 3, &options).unwrap();
    let second = compute_matchup_matrix(ash.team(), gary.team(), 40, 3, &options).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|row| row.len() == 1));
    assert!(first.iter().flatten().all(|rate| (0.0..=1.0).contains(rate)));
}

#[test]
fn guaranteed_wins_score_one() {
    let attackers = vec![make_mon("Sweeper", 10, 100)];
    let defenders = vec![make_mon("Frail", 1, 100), make_mon("Wall", 500, 1)];
    let grid =
        compute_matchup_matrix(&attackers, &defenders, 10, 0, &BattleOptions::default()).unwrap();
    assert_eq!(grid[0][0], 1.0);
    // Wall falls within six hits and only chips 1 hp per hit back.
    assert_eq!(grid[0][1], 1.0);
}

#[test]
fn fainted_templates_are_an_error() {
    let attackers = vec![make_mon("Down", 0, 10)];
    let defenders = vec![make_mon("Up", 10, 10)];
    let err = compute_matchup_matrix(&attackers, &defenders, 5, 0, &BattleOptions::default())
        .unwrap_err();
    assert_eq!(err, BattleError::InvalidEncounter("Down".to_string()));
}

#[test]
fn batch_matches_leave_trainers_untouched() {
    let (ash, gary) = demo_trainers().unwrap();
    let summary = simulate_matches(&ash, &gary, 64, 9, &BattleOptions::default()).unwrap();
    assert_eq!(summary.total(), 64);
    assert_eq!(summary.stalemates, 0);
    assert_eq!(ash.wins() + ash.losses(), 0);
    assert!(ash.team().iter().all(|p| p.current_hp() == p.max_hp()));
    assert!(gary.has_available());

    let again = simulate_matches(&ash, &gary, 64, 9, &BattleOptions::default()).unwrap();
    assert_eq!(summary, again);
}

#[test]
fn csv_has_labelled_rows_and_columns() {
    let attackers = vec![make_mon("Sweeper", 10, 100)];
    let defenders = vec![make_mon("Frail", 1, 100), make_mon("Other", 1, 100)];
    let grid = vec![vec![1.0, 0.25]];
    let path = std::env::temp_dir().join(format!("matchup-{}.csv", std::process::id()));
    write_csv(&grid, &attackers, &defenders, &path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(written, "attacker,Frail,Other\nSweeper,1.0000,0.2500\n");
}
