//! Error types surfaced by model construction and battle resolution.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BattleError>;

/// Malformed construction input for moves, Pokemon and trainers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{what} name cannot be empty")]
    EmptyName { what: &'static str },

    #[error("{what} type cannot be empty")]
    EmptyType { what: &'static str },

    #[error("power must be between {min} and {max}, got {got}")]
    PowerOutOfRange { got: i32, min: i32, max: i32 },

    #[error("accuracy must be between 1 and 100, got {0}")]
    AccuracyOutOfRange(i32),

    #[error("health cannot be negative, got {0}")]
    NegativeHealth(i32),

    #[error("{0} must have at least one move")]
    NoMoves(String),

    #[error("team cannot exceed {max} Pokemon, got {size}")]
    TeamTooLarge { size: usize, max: usize },

    #[error("team of {trainer} is full ({max} Pokemon)")]
    TeamFull { trainer: String, max: usize },
}

/// Precondition violations raised by the battle engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("both Pokemon must be alive to battle ({0} has fainted)")]
    InvalidEncounter(String),

    #[error("damage cannot be negative, got {0}")]
    InvalidDamage(i32),

    #[error("trainer {0} has no Pokemon able to battle")]
    NoAvailableCombatants(String),

    #[error("encounter between {a} and {b} made no progress after {rounds} rounds")]
    Stalemate { a: String, b: String, rounds: u32 },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
