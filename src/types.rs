// Simplified type chart: a Water/Fire/Grass triangle plus Electric against anything Flying.
use phf::phf_map;
use serde::Serialize;

pub const TYPE_ADVANTAGE_MULTIPLIER: f64 = 1.5;
pub const TYPE_DISADVANTAGE_MULTIPLIER: f64 = 0.5;
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Attacking type -> the defending type it is strong against.
static ADVANTAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "Water" => "Fire",
    "Fire" => "Grass",
    "Grass" => "Water",
};

/// Attacking type -> the defending type that resists it.
static DISADVANTAGES: phf::Map<&'static str, &'static str> = phf_map! {
    "Fire" => "Water",
    "Water" => "Grass",
    "Grass" => "Fire",
};

/// Damage multiplier for a move of `move_type` hitting a Pokemon of
/// `defender_type`. Types compare exactly, except that Electric is strong
/// against any defender whose type merely contains `"Flying"`.
pub fn type_effectiveness(move_type: &str, defender_type: &str) -> f64 {
    if is_type_advantage(move_type, defender_type) {
        TYPE_ADVANTAGE_MULTIPLIER
    } else if is_type_disadvantage(move_type, defender_type) {
        TYPE_DISADVANTAGE_MULTIPLIER
    } else {
        NEUTRAL_MULTIPLIER
    }
}

fn is_type_advantage(move_type: &str, defender_type: &str) -> bool {
    if move_type == "Electric" && defender_type.contains("Flying") {
        return true;
    }
    ADVANTAGES
        .get(move_type)
        .is_some_and(|strong_against| *strong_against == defender_type)
}

fn is_type_disadvantage(move_type: &str, defender_type: &str) -> bool {
    DISADVANTAGES
        .get(move_type)
        .is_some_and(|resisted_by| *resisted_by == defender_type)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effectiveness {
    SuperEffective,
    Neutral,
    NotVeryEffective,
}

impl Effectiveness {
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier > NEUTRAL_MULTIPLIER {
            Effectiveness::SuperEffective
        } else if multiplier < NEUTRAL_MULTIPLIER {
            Effectiveness::NotVeryEffective
        } else {
            Effectiveness::Neutral
        }
    }
}
