use crate::error::ValidationError;
use crate::model::Pokemon;
use std::fmt;

pub const MAX_TEAM_SIZE: usize = 6;

/// What the match loop needs from a team: the next Pokemon able to fight and
/// somewhere to record the final result.
pub trait Roster {
    fn name(&self) -> &str;

    /// First Pokemon in team order that is still alive.
    fn first_available(&mut self) -> Option<&mut Pokemon>;

    fn has_available(&self) -> bool;

    fn record_win(&mut self);

    fn record_loss(&mut self);
}

#[derive(Debug, Clone)]
pub struct Trainer {
    name: String,
    team: Vec<Pokemon>,
    badges: u32,
    wins: u32,
    losses: u32,
}

impl Trainer {
    pub fn new(name: impl Into<String>, team: Vec<Pokemon>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName { what: "trainer" });
        }
        if team.len() > MAX_TEAM_SIZE {
            return Err(ValidationError::TeamTooLarge {
                size: team.len(),
                max: MAX_TEAM_SIZE,
            });
        }
        Ok(Trainer {
            name,
            team,
            badges: 0,
            wins: 0,
            losses: 0,
        })
    }

    pub fn team(&self) -> &[Pokemon] {
        &self.team
    }

    pub fn add_pokemon(&mut self, pokemon: Pokemon) -> Result<(), ValidationError> {
        if self.team.len() >= MAX_TEAM_SIZE {
            return Err(ValidationError::TeamFull {
                trainer: self.name.clone(),
                max: MAX_TEAM_SIZE,
            });
        }
        self.team.push(pokemon);
        Ok(())
    }

    pub fn badges(&self) -> u32 {
        self.badges
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }
}

impl Roster for Trainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn first_available(&mut self) -> Option<&mut Pokemon> {
        self.team.iter_mut().find(|p| p.is_alive())
    }

    fn has_available(&self) -> bool {
        self.team.iter().any(Pokemon::is_alive)
    }

    fn record_win(&mut self) {
        self.wins += 1;
        self.badges += 1;
    }

    fn record_loss(&mut self) {
        self.losses += 1;
    }
}

impl fmt::Display for Trainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trainer {} (Badges: {}, Record: {}-{})",
            self.name, self.badges, self.wins, self.losses
        )
    }
}
