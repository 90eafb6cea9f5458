//! Built-in teams used when no teams file is given.
use crate::error::ValidationError;
use crate::model::{Move, MoveCategory, Pokemon};
use crate::roster::Trainer;

pub fn demo_trainers() -> Result<(Trainer, Trainer), ValidationError> {
    let thunderbolt = Move::new("Thunderbolt", "Electric", 90, 100, MoveCategory::Special)?;
    let iron_tail = Move::new("Iron Tail", "Steel", 100, 75, MoveCategory::Physical)?;
    let flamethrower = Move::new("Flamethrower", "Fire", 90, 100, MoveCategory::Special)?;
    let dragon_claw = Move::new("Dragon Claw", "Dragon", 80, 100, MoveCategory::Physical)?;
    let hydro_pump = Move::new("Hydro Pump", "Water", Move::MAX_POWER, 80, MoveCategory::Special)?;
    let surf = Move::new("Surf", "Water", 90, 100, MoveCategory::Special)?;

    let pikachu = Pokemon::new("Pikachu", "Electric", 100, vec![thunderbolt, iron_tail])?;
    let mut charizard =
        Pokemon::new("Charizard", "Fire/Flying", 120, vec![flamethrower, dragon_claw])?;
    charizard.mega_evolve();
    let blastoise = Pokemon::new("Blastoise", "Water", 110, vec![hydro_pump, surf])?;

    let ash = Trainer::new("Ash", vec![pikachu, charizard])?;
    let gary = Trainer::new("Gary", vec![blastoise])?;
    Ok((ash, gary))
}
