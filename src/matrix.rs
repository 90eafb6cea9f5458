use crate::battle::{BattleEngine, BattleOptions, Side};
use crate::error::{BattleError, Result};
use crate::model::Pokemon;
use crate::roster::Trainer;
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt::Write as _;

struct CellResult {
    a_idx: usize,
    b_idx: usize,
    win_rate: f64,
}

/// Win rate of `team_a[i]` against `team_b[j]` over `sims_per_cell` single
/// encounters per cell. Stalled encounters count as half a win. Every cell
/// fights fresh clones with a stream derived from `seed`, `i` and `j`, so the
/// matrix does not depend on how cells are scheduled.
pub fn compute_matchup_matrix(
    team_a: &[Pokemon],
    team_b: &[Pokemon],
    sims_per_cell: usize,
    seed: u64,
    options: &BattleOptions,
) -> Result<Vec<Vec<f64>>> {
    let tasks: Vec<(usize, usize)> = (0..team_a.len())
        .flat_map(|a| (0..team_b.len()).map(move |b| (a, b)))
        .collect();
    let cell_results = tasks
        .par_iter()
        .map(|&(a_idx, b_idx)| {
            let mut cell_rng =
                SmallRng::seed_from_u64(seed ^ ((a_idx as u64) << 32) ^ (b_idx as u64));
            let mut a_wins = 0u64;
            let mut stalls = 0u64;
            for _ in 0..sims_per_cell {
                let mut engine = BattleEngine::with_options(
                    SmallRng::seed_from_u64(cell_rng.gen()),
                    options.clone(),
                );
                let mut a = team_a[a_idx].clone();
                let mut b = team_b[b_idx].clone();
                match engine.resolve_encounter(&mut a, &mut b) {
                    Ok(outcome) if outcome.winner_side == Side::A => a_wins += 1,
                    Ok(_) => {}
                    Err(BattleError::Stalemate { .. }) => stalls += 1,
                    Err(err) => return Err(err),
                }
            }
            let win_rate = if sims_per_cell == 0 {
                0.0
            } else {
                (a_wins as f64 + 0.5 * stalls as f64) / sims_per_cell as f64
            };
            Ok(CellResult {
                a_idx,
                b_idx,
                win_rate,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut matrix = vec![vec![0.0; team_b.len()]; team_a.len()];
    for cell in cell_results {
        matrix[cell.a_idx][cell.b_idx] = cell.win_rate;
    }
    Ok(matrix)
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct MatchSummary {
    pub a_wins: u64,
    pub b_wins: u64,
    pub stalemates: u64,
}

impl MatchSummary {
    pub fn total(&self) -> u64 {
        self.a_wins + self.b_wins + self.stalemates
    }

    pub fn a_win_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.a_wins as f64 / self.total() as f64
    }
}

/// Plays `sims` independent matches between clones of the two trainers. The
/// trainers passed in are left untouched.
pub fn simulate_matches(
    trainer_a: &Trainer,
    trainer_b: &Trainer,
    sims: usize,
    seed: u64,
    options: &BattleOptions,
) -> Result<MatchSummary> {
    let mut master = SmallRng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..sims).map(|_| master.gen()).collect();
    let winners = seeds
        .par_iter()
        .map(|&match_seed| {
            let mut a = trainer_a.clone();
            let mut b = trainer_b.clone();
            let mut engine =
                BattleEngine::with_options(SmallRng::seed_from_u64(match_seed), options.clone());
            match engine.resolve_match(&mut a, &mut b) {
                Ok(outcome) => Ok(Some(outcome.winner_side)),
                Err(BattleError::Stalemate { .. }) => Ok(None),
                Err(err) => Err(err),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let mut summary = MatchSummary::default();
    for winner in winners {
        match winner {
            Some(Side::A) => summary.a_wins += 1,
            Some(Side::B) => summary.b_wins += 1,
            None => summary.stalemates += 1,
        }
    }
    Ok(summary)
}

/// Writes the matrix with a header row of `team_b` names and one labelled
/// row per `team_a` Pokemon, four decimals per cell.
pub fn write_csv(
    matrix: &[Vec<f64>],
    team_a: &[Pokemon],
    team_b: &[Pokemon],
    path: &std::path::Path,
) -> anyhow::Result<()> {
    let mut out = String::from("attacker");
    for defender in team_b {
        out.push(',');
        out.push_str(defender.name());
    }
    for (row, attacker) in matrix.iter().zip(team_a) {
        out.push('\n');
        out.push_str(attacker.name());
        for value in row {
            write!(out, ",{value:.4}")?;
        }
    }
    out.push('\n');
    std::fs::write(path, out)
        .with_context(|| format!("Failed to write matrix to {}", path.display()))?;
    Ok(())
}
