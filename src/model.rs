use crate::error::{BattleError, ValidationError};
use crate::roster::Trainer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health added to both the ceiling and the current pool by a mega evolution.
pub const MEGA_EVOLUTION_HEALTH_BOOST: u32 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    #[default]
    Physical,
    Special,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
        }
    }
}

/// An attack descriptor. Fixed once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    name: String,
    move_type: String,
    power: u8,
    accuracy: u8,
    category: MoveCategory,
}

impl Move {
    pub const MIN_POWER: i32 = 0;
    pub const MAX_POWER: i32 = 100;

    pub fn new(
        name: impl Into<String>,
        move_type: impl Into<String>,
        power: i32,
        accuracy: i32,
        category: MoveCategory,
    ) -> Result<Self, ValidationError> {
        if !(Self::MIN_POWER..=Self::MAX_POWER).contains(&power) {
            return Err(ValidationError::PowerOutOfRange {
                got: power,
                min: Self::MIN_POWER,
                max: Self::MAX_POWER,
            });
        }
        if !(1..=100).contains(&accuracy) {
            return Err(ValidationError::AccuracyOutOfRange(accuracy));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "move" });
        }
        let move_type = move_type.into();
        if move_type.trim().is_empty() {
            return Err(ValidationError::EmptyType { what: "move" });
        }
        Ok(Move {
            name,
            move_type,
            power: power as u8,
            accuracy: accuracy as u8,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn move_type(&self) -> &str {
        &self.move_type
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    /// Percent chance to hit, 1..=100.
    pub fn accuracy(&self) -> u8 {
        self.accuracy
    }

    pub fn category(&self) -> MoveCategory {
        self.category
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Power: {}, Accuracy: {}%, {}",
            self.name, self.move_type, self.power, self.accuracy, self.category
        )
    }
}

/// A battler. Identity and move list are fixed; health changes during battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pokemon {
    name: String,
    pokemon_type: String,
    current_hp: u32,
    max_hp: u32,
    mega_evolved: bool,
    moves: Vec<Move>,
}

impl Pokemon {
    /// Creates a Pokemon at full health. `pokemon_type` may be composite,
    /// e.g. `"Fire/Flying"`.
    pub fn new(
        name: impl Into<String>,
        pokemon_type: impl Into<String>,
        health: i32,
        moves: Vec<Move>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "Pokemon" });
        }
        let pokemon_type = pokemon_type.into();
        if pokemon_type.trim().is_empty() {
            return Err(ValidationError::EmptyType { what: "Pokemon" });
        }
        if health < 0 {
            return Err(ValidationError::NegativeHealth(health));
        }
        if moves.is_empty() {
            return Err(ValidationError::NoMoves(name));
        }
        Ok(Pokemon {
            name,
            pokemon_type,
            current_hp: health as u32,
            max_hp: health as u32,
            mega_evolved: false,
            moves,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pokemon_type(&self) -> &str {
        &self.pokemon_type
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    pub fn is_mega_evolved(&self) -> bool {
        self.mega_evolved
    }

    /// Subtracts `damage` from current health, flooring at zero.
    pub fn take_damage(&mut self, damage: i32) -> Result<(), BattleError> {
        if damage < 0 {
            return Err(BattleError::InvalidDamage(damage));
        }
        self.current_hp = self.current_hp.saturating_sub(damage as u32);
        Ok(())
    }

    /// One-way transition. Returns `false` and changes nothing when the
    /// Pokemon has already mega evolved.
    pub fn mega_evolve(&mut self) -> bool {
        if self.mega_evolved {
            return false;
        }
        self.mega_evolved = true;
        self.max_hp += MEGA_EVOLUTION_HEALTH_BOOST;
        self.current_hp += MEGA_EVOLUTION_HEALTH_BOOST;
        tracing::info!(
            pokemon = %self.name,
            hp = self.current_hp,
            max_hp = self.max_hp,
            "mega evolved"
        );
        true
    }
}

impl fmt::Display for Pokemon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - HP: {}/{} | Type: {}",
            self.name, self.current_hp, self.max_hp, self.pokemon_type
        )?;
        if self.mega_evolved {
            write!(f, " | MEGA")?;
        }
        Ok(())
    }
}

fn default_accuracy() -> i32 {
    100
}

#[derive(Debug, Clone, Deserialize)]
pub struct MoveEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub power: i32,
    #[serde(default = "default_accuracy")]
    pub accuracy: i32,
    #[serde(default)]
    pub category: MoveCategory,
}

impl MoveEntry {
    pub fn build(&self) -> Result<Move, ValidationError> {
        Move::new(
            self.name.clone(),
            self.move_type.clone(),
            self.power,
            self.accuracy,
            self.category,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub pokemon_type: String,
    pub health: i32,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
    #[serde(default)]
    pub mega_evolve: bool,
}

impl PokemonEntry {
    pub fn build(&self) -> Result<Pokemon, ValidationError> {
        let moves = self
            .moves
            .iter()
            .map(MoveEntry::build)
            .collect::<Result<Vec<_>, _>>()?;
        let mut pokemon = Pokemon::new(
            self.name.clone(),
            self.pokemon_type.clone(),
            self.health,
            moves,
        )?;
        if self.mega_evolve {
            pokemon.mega_evolve();
        }
        Ok(pokemon)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainerEntry {
    pub name: String,
    #[serde(default)]
    pub team: Vec<PokemonEntry>,
}

impl TrainerEntry {
    pub fn build(&self) -> Result<Trainer, ValidationError> {
        let team = self
            .team
            .iter()
            .map(PokemonEntry::build)
            .collect::<Result<Vec<_>, _>>()?;
        Trainer::new(self.name.clone(), team)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsFile {
    pub trainer_a: TrainerEntry,
    pub trainer_b: TrainerEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tackle() -> Move {
        Move::new("Tackle", "Normal", 40, 100, MoveCategory::Physical).unwrap()
    }

    #[test]
    fn power_and_accuracy_bounds() {
        for power in [0, 100] {
            assert!(Move::new("M", "Normal", power, 50, MoveCategory::Physical).is_ok());
        }
        for accuracy in [1, 100] {
            assert!(Move::new("M", "Normal", 50, accuracy, MoveCategory::Special).is_ok());
        }
        for power in [-1, 101] {
            assert_eq!(
                Move::new("M", "Normal", power, 50, MoveCategory::Physical),
                Err(ValidationError::PowerOutOfRange {
                    got: power,
                    min: 0,
                    max: 100
                })
            );
        }
        for accuracy in [0, 101] {
            assert_eq!(
                Move::new("M", "Normal", 50, accuracy, MoveCategory::Physical),
                Err(ValidationError::AccuracyOutOfRange(accuracy))
            );
        }
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            Move::new("  ", "Normal", 10, 100, MoveCategory::Physical),
            Err(ValidationError::EmptyName { what: "move" })
        );
        assert_eq!(
            Move::new("Tackle", "", 10, 100, MoveCategory::Physical),
            Err(ValidationError::EmptyType { what: "move" })
        );
        assert_eq!(
            Pokemon::new("", "Normal", 10, vec![tackle()]),
            Err(ValidationError::EmptyName { what: "Pokemon" })
        );
    }

    #[test]
    fn pokemon_requires_moves_and_non_negative_health() {
        assert_eq!(
            Pokemon::new("Eevee", "Normal", -1, vec![tackle()]),
            Err(ValidationError::NegativeHealth(-1))
        );
        assert_eq!(
            Pokemon::new("Eevee", "Normal", 10, Vec::new()),
            Err(ValidationError::NoMoves("Eevee".to_string()))
        );
        let fainted = Pokemon::new("Eevee", "Normal", 0, vec![tackle()]).unwrap();
        assert!(!fainted.is_alive());
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut eevee = Pokemon::new("Eevee", "Normal", 30, vec![tackle()]).unwrap();
        eevee.take_damage(12).unwrap();
        assert_eq!(eevee.current_hp(), 18);
        assert!(eevee.is_alive());
        eevee.take_damage(500).unwrap();
        assert_eq!(eevee.current_hp(), 0);
        assert!(!eevee.is_alive());
        assert_eq!(eevee.take_damage(-3), Err(BattleError::InvalidDamage(-3)));
        assert_eq!(eevee.current_hp(), 0);
    }

    #[test]
    fn mega_evolution_happens_once() {
        let mut charizard = Pokemon::new("Charizard", "Fire/Flying", 120, vec![tackle()]).unwrap();
        assert!(charizard.mega_evolve());
        assert_eq!(charizard.max_hp(), 170);
        assert_eq!(charizard.current_hp(), 170);
        assert!(!charizard.mega_evolve());
        assert_eq!(charizard.current_hp(), 170);
        assert_eq!(charizard.to_string(), "Charizard - HP: 170/170 | Type: Fire/Flying | MEGA");
    }

    #[test]
    fn move_display_matches_commentary_format() {
        let bolt = Move::new("Thunderbolt", "Electric", 90, 100, MoveCategory::Special).unwrap();
        assert_eq!(
            bolt.to_string(),
            "Thunderbolt (Electric) - Power: 90, Accuracy: 100%, Special"
        );
    }

    #[test]
    fn entries_default_accuracy_and_category() {
        let entry: MoveEntry =
            serde_json::from_str(r#"{"name":"Scratch","type":"Normal","power":40}"#).unwrap();
        let mv = entry.build().unwrap();
        assert_eq!(mv.accuracy(), 100);
        assert_eq!(mv.category(), MoveCategory::Physical);
    }
}
