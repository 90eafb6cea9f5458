use crate::types::Effectiveness;
use serde::Serialize;
use std::fmt;

/// Observable battle trace. `Display` renders the commentary line(s) for an
/// event; the fields carry the same content for other renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    EncounterStarted {
        a: String,
        b: String,
    },
    MoveUsed {
        actor: String,
        move_name: String,
    },
    Missed {
        actor: String,
        move_name: String,
    },
    Hit {
        actor: String,
        target: String,
        move_name: String,
        damage: u32,
        remaining_hp: u32,
        effectiveness: Effectiveness,
    },
    Fainted {
        pokemon: String,
    },
    EncounterWon {
        winner: String,
        loser: String,
    },
    MatchWon {
        winner: String,
        loser: String,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::EncounterStarted { a, b } => {
                write!(f, "Battle starts between {a} and {b}!")
            }
            BattleEvent::MoveUsed { actor, move_name } => write!(f, "{actor} uses {move_name}!"),
            BattleEvent::Missed { .. } => write!(f, "But it missed!"),
            BattleEvent::Hit {
                target,
                damage,
                effectiveness,
                ..
            } => {
                write!(f, "{target} takes {damage} damage!")?;
                match effectiveness {
                    Effectiveness::SuperEffective => write!(f, "\nIt's super effective!"),
                    Effectiveness::NotVeryEffective => write!(f, "\nIt's not very effective..."),
                    Effectiveness::Neutral => Ok(()),
                }
            }
            BattleEvent::Fainted { pokemon } => write!(f, "{pokemon} fainted!"),
            BattleEvent::EncounterWon { winner, .. } => write!(f, "{winner} wins the battle!"),
            BattleEvent::MatchWon { winner, .. } => write!(f, "{winner} wins the trainer battle!"),
        }
    }
}
