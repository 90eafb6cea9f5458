pub mod battle;
pub mod config;
pub mod demo;
pub mod error;
pub mod events;
pub mod matrix;
pub mod model;
pub mod roster;
pub mod types;

use crate::battle::BattleEngine;
pub use crate::battle::{AccuracyRule, BattleOptions, EncounterOutcome, MatchOutcome, MovePolicy, Side};
pub use crate::config::SimulatorOptions;
pub use crate::error::{BattleError, ValidationError};
pub use crate::events::BattleEvent;
pub use crate::model::{Move, MoveCategory, Pokemon};
pub use crate::roster::{Roster, Trainer};
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn print_trainer(trainer: &Trainer) {
    println!("{trainer}");
    for (idx, pokemon) in trainer.team().iter().enumerate() {
        println!("  {}. {pokemon}", idx + 1);
    }
}

pub fn run(opts: SimulatorOptions) -> anyhow::Result<()> {
    let (mut trainer_a, mut trainer_b) = match &opts.teams_path {
        Some(path) => config::load_teams(path)?,
        None => demo::demo_trainers().context("Failed to build demo teams")?,
    };

    if opts.sims > 0 {
        let summary =
            matrix::simulate_matches(&trainer_a, &trainer_b, opts.sims, opts.seed, &opts.battle)?;
        println!(
            "Simulated {} matches: {} {} / {} {} / stalemates {} ({:.1}% for {})",
            summary.total(),
            trainer_a.name(),
            summary.a_wins,
            trainer_b.name(),
            summary.b_wins,
            summary.stalemates,
            summary.a_win_rate() * 100.0,
            trainer_a.name()
        );
    }
    if let Some(path) = &opts.matrix_path {
        let grid = matrix::compute_matchup_matrix(
            trainer_a.team(),
            trainer_b.team(),
            opts.sims_per_cell,
            opts.seed,
            &opts.battle,
        )?;
        matrix::write_csv(&grid, trainer_a.team(), trainer_b.team(), path)?;
        println!(
            "Wrote {}x{} matchup matrix to {}",
            grid.len(),
            trainer_b.team().len(),
            path.display()
        );
    }

    println!("Trainer Battle: {} VS {}", trainer_a.name(), trainer_b.name());
    print_trainer(&trainer_a);
    print_trainer(&trainer_b);

    let mut engine =
        BattleEngine::with_options(SmallRng::seed_from_u64(opts.seed), opts.battle.clone());
    let outcome = engine.resolve_match(&mut trainer_a, &mut trainer_b)?;
    let trace = outcome.trace();
    for event in &trace {
        println!("{event}");
    }

    println!();
    println!("Final Trainer Status:");
    print_trainer(&trainer_a);
    print_trainer(&trainer_b);

    if let Some(path) = &opts.trace_path {
        let json = serde_json::to_string_pretty(&trace)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write trace to {}", path.display()))?;
    }
    Ok(())
}
