use crate::error::{BattleError, Result};
use crate::events::BattleEvent;
use crate::model::{Move, Pokemon};
use crate::roster::Roster;
use crate::types::{type_effectiveness, Effectiveness};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// Global hit chance used before moves carried their own accuracy.
pub const LEGACY_BASE_ACCURACY: u8 = 90;
pub const DEFAULT_STALL_ROUNDS: u32 = 1000;

const DAMAGE_VARIATION_MIN: f64 = 0.85;
const DAMAGE_VARIATION_MAX: f64 = 1.0;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Side {
    A,
    B,
}

/// How an attacker picks its move each action.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MovePolicy {
    /// Uniformly random slot.
    #[default]
    Random,
    /// Highest expected damage against the current defender; earliest slot wins ties.
    Greedy,
}

/// Which hit chance the accuracy roll is compared against.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AccuracyRule {
    #[default]
    MoveAccuracy,
    Fixed(u8),
}

impl AccuracyRule {
    pub fn hit_chance(self, move_def: &Move) -> u8 {
        match self {
            AccuracyRule::MoveAccuracy => move_def.accuracy(),
            AccuracyRule::Fixed(chance) => chance,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BattleOptions {
    pub policy: MovePolicy,
    pub accuracy: AccuracyRule,
    /// Consecutive rounds without any damage before an encounter is abandoned.
    pub stall_rounds: u32,
}

impl Default for BattleOptions {
    fn default() -> Self {
        BattleOptions {
            policy: MovePolicy::default(),
            accuracy: AccuracyRule::default(),
            stall_rounds: DEFAULT_STALL_ROUNDS,
        }
    }
}

/// Terminal result of a single encounter.
#[derive(Clone, Debug, PartialEq)]
pub struct EncounterOutcome {
    pub winner_side: Side,
    pub winner: String,
    pub loser: String,
    pub rounds: u32,
    pub events: Vec<BattleEvent>,
}

/// Terminal result of a trainer match.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutcome {
    pub winner_side: Side,
    pub winner: String,
    pub loser: String,
    pub encounters: Vec<EncounterOutcome>,
}

impl MatchOutcome {
    /// Every encounter's events in order, closed by the match result.
    pub fn trace(&self) -> Vec<BattleEvent> {
        let mut events: Vec<BattleEvent> = self
            .encounters
            .iter()
            .flat_map(|e| e.events.iter().cloned())
            .collect();
        events.push(BattleEvent::MatchWon {
            winner: self.winner.clone(),
            loser: self.loser.clone(),
        });
        events
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum MatchPhase {
    AwaitingPair,
    InEncounter,
    MatchComplete,
}

impl MatchPhase {
    fn next(self, both_available: bool) -> MatchPhase {
        match self {
            MatchPhase::AwaitingPair if both_available => MatchPhase::InEncounter,
            MatchPhase::AwaitingPair => MatchPhase::MatchComplete,
            MatchPhase::InEncounter => MatchPhase::AwaitingPair,
            MatchPhase::MatchComplete => MatchPhase::MatchComplete,
        }
    }
}

/// Resolves encounters and matches. Owns its random stream so that separate
/// engines never share state.
pub struct BattleEngine<R: Rng = SmallRng> {
    rng: R,
    options: BattleOptions,
    events: Vec<BattleEvent>,
}

impl BattleEngine<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BattleEngine<R> {
    pub fn new(rng: R) -> Self {
        Self::with_options(rng, BattleOptions::default())
    }

    pub fn with_options(rng: R, options: BattleOptions) -> Self {
        BattleEngine {
            rng,
            options,
            events: Vec::new(),
        }
    }

    /// Events emitted by [`Self::execute_action`] calls made outside an encounter.
    pub fn take_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: BattleEvent) {
        tracing::debug!(%event);
        self.events.push(event);
    }

    /// Fights `a` and `b` until one faints. `a` always acts first in a round,
    /// and `b` only answers if it is still standing.
    pub fn resolve_encounter(
        &mut self,
        a: &mut Pokemon,
        b: &mut Pokemon,
    ) -> Result<EncounterOutcome> {
        for pokemon in [&*a, &*b] {
            if !pokemon.is_alive() {
                return Err(BattleError::InvalidEncounter(pokemon.name().to_string()));
            }
        }
        let start = self.events.len();
        tracing::info!(a = %a.name(), b = %b.name(), "encounter started");
        self.emit(BattleEvent::EncounterStarted {
            a: a.name().to_string(),
            b: b.name().to_string(),
        });

        let mut rounds = 0u32;
        let mut stalled = 0u32;
        while a.is_alive() && b.is_alive() {
            if stalled >= self.options.stall_rounds {
                tracing::warn!(a = %a.name(), b = %b.name(), rounds, "encounter stalled");
                self.events.truncate(start);
                return Err(BattleError::Stalemate {
                    a: a.name().to_string(),
                    b: b.name().to_string(),
                    rounds: stalled,
                });
            }
            rounds += 1;
            let mut dealt = self.execute_action(a, b)?;
            if b.is_alive() {
                dealt += self.execute_action(b, a)?;
            }
            stalled = if dealt == 0 { stalled + 1 } else { 0 };
        }

        let (winner_side, winner, loser) = if a.is_alive() {
            (Side::A, &*a, &*b)
        } else {
            (Side::B, &*b, &*a)
        };
        let winner = winner.name().to_string();
        let loser = loser.name().to_string();
        self.emit(BattleEvent::Fainted {
            pokemon: loser.clone(),
        });
        self.emit(BattleEvent::EncounterWon {
            winner: winner.clone(),
            loser: loser.clone(),
        });
        tracing::info!(%winner, %loser, rounds, "encounter finished");

        Ok(EncounterOutcome {
            winner_side,
            winner,
            loser,
            rounds,
            events: self.events.drain(start..).collect(),
        })
    }

    /// One attack from `attacker` against `defender`. Returns the damage dealt
    /// (zero on a miss).
    pub fn execute_action(&mut self, attacker: &Pokemon, defender: &mut Pokemon) -> Result<u32> {
        let move_def = self.choose_move(attacker, defender).clone();
        self.emit(BattleEvent::MoveUsed {
            actor: attacker.name().to_string(),
            move_name: move_def.name().to_string(),
        });

        let hit_chance = self.options.accuracy.hit_chance(&move_def);
        if !roll_accuracy(hit_chance, &mut self.rng) {
            self.emit(BattleEvent::Missed {
                actor: attacker.name().to_string(),
                move_name: move_def.name().to_string(),
            });
            return Ok(0);
        }

        let multiplier = type_effectiveness(move_def.move_type(), defender.pokemon_type());
        let damage = compute_damage(&move_def, defender, &mut self.rng);
        defender.take_damage(damage as i32)?;
        self.emit(BattleEvent::Hit {
            actor: attacker.name().to_string(),
            target: defender.name().to_string(),
            move_name: move_def.name().to_string(),
            damage,
            remaining_hp: defender.current_hp(),
            effectiveness: Effectiveness::from_multiplier(multiplier),
        });
        Ok(damage)
    }

    fn choose_move<'a>(&mut self, attacker: &'a Pokemon, defender: &Pokemon) -> &'a Move {
        let moves = attacker.moves();
        let idx = match self.options.policy {
            MovePolicy::Random => self.rng.gen_range(0..moves.len()),
            MovePolicy::Greedy => {
                let mut best = 0;
                let mut best_score = f64::MIN;
                for (idx, move_def) in moves.iter().enumerate() {
                    let score = expected_damage(move_def, defender, self.options.accuracy);
                    if score > best_score {
                        best = idx;
                        best_score = score;
                    }
                }
                best
            }
        };
        &moves[idx]
    }

    /// Chains encounters between the first living Pokemon of each roster until
    /// one roster is exhausted, then records the result on both rosters.
    pub fn resolve_match<A, B>(&mut self, a: &mut A, b: &mut B) -> Result<MatchOutcome>
    where
        A: Roster + ?Sized,
        B: Roster + ?Sized,
    {
        if !a.has_available() {
            return Err(BattleError::NoAvailableCombatants(a.name().to_string()));
        }
        if !b.has_available() {
            return Err(BattleError::NoAvailableCombatants(b.name().to_string()));
        }
        tracing::info!(a = %a.name(), b = %b.name(), "match started");

        let mut encounters = Vec::new();
        let mut phase = MatchPhase::AwaitingPair;
        while phase != MatchPhase::MatchComplete {
            if phase == MatchPhase::InEncounter {
                if let (Some(pa), Some(pb)) = (a.first_available(), b.first_available()) {
                    encounters.push(self.resolve_encounter(pa, pb)?);
                }
            }
            let next = phase.next(a.has_available() && b.has_available());
            tracing::debug!(from = ?phase, to = ?next, "match phase");
            phase = next;
        }

        let winner_side = if a.has_available() {
            a.record_win();
            b.record_loss();
            Side::A
        } else {
            b.record_win();
            a.record_loss();
            Side::B
        };
        let (winner, loser) = match winner_side {
            Side::A => (a.name().to_string(), b.name().to_string()),
            Side::B => (b.name().to_string(), a.name().to_string()),
        };
        tracing::info!(%winner, %loser, encounters = encounters.len(), "match finished");

        Ok(MatchOutcome {
            winner_side,
            winner,
            loser,
            encounters,
        })
    }
}

/// Rolls uniformly in `[0, 100)`; a hit is a roll strictly below `hit_chance`.
/// Always draws, so the stream advances the same way for sure-hit moves.
fn roll_accuracy<R: Rng + ?Sized>(hit_chance: u8, rng: &mut R) -> bool {
    let roll: f64 = rng.gen_range(0.0..100.0);
    roll < f64::from(hit_chance)
}

pub fn sample_accuracy_hits(move_def: &Move, rule: AccuracyRule, seed: u64, trials: usize) -> usize {
    let mut rng = SmallRng::seed_from_u64(seed);
    let hit_chance = rule.hit_chance(move_def);
    (0..trials)
        .filter(|_| roll_accuracy(hit_chance, &mut rng))
        .count()
}

/// `round(power * effectiveness * U[0.85, 1.0])`.
pub fn compute_damage<R: Rng + ?Sized>(move_def: &Move, defender: &Pokemon, rng: &mut R) -> u32 {
    let multiplier = type_effectiveness(move_def.move_type(), defender.pokemon_type());
    let variation = rng.gen_range(DAMAGE_VARIATION_MIN..=DAMAGE_VARIATION_MAX);
    (f64::from(move_def.power()) * multiplier * variation).round() as u32
}

fn expected_damage(move_def: &Move, defender: &Pokemon, accuracy: AccuracyRule) -> f64 {
    let multiplier = type_effectiveness(move_def.move_type(), defender.pokemon_type());
    f64::from(move_def.power()) * multiplier * f64::from(accuracy.hit_chance(move_def)) / 100.0
}

#[cfg(test)]
mod tests {
    use super::MatchPhase;

    #[test]
    fn match_phases_alternate_until_a_side_is_exhausted() {
        let mut phase = MatchPhase::AwaitingPair;
        let mut seen = vec![phase];
        for both_available in [true, true, true, true, false] {
            phase = phase.next(both_available);
            seen.push(phase);
        }
        assert_eq!(
            seen,
            vec![
                MatchPhase::AwaitingPair,
                MatchPhase::InEncounter,
                MatchPhase::AwaitingPair,
                MatchPhase::InEncounter,
                MatchPhase::AwaitingPair,
                MatchPhase::MatchComplete,
            ]
        );
        assert_eq!(phase.next(true), MatchPhase::MatchComplete);
    }

    #[test]
    fn encounter_phase_always_returns_to_pairing() {
        assert_eq!(MatchPhase::InEncounter.next(false), MatchPhase::AwaitingPair);
        assert_eq!(MatchPhase::AwaitingPair.next(false), MatchPhase::MatchComplete);
    }
}
