use crate::battle::{AccuracyRule, BattleOptions, MovePolicy, LEGACY_BASE_ACCURACY};
use crate::model::TeamsFile;
use crate::roster::Trainer;
use anyhow::Context;
use std::path::{Path, PathBuf};

pub const USAGE: &str = "Usage: pokemon-trainer-battle [--teams teams.json] [--seed SEED] \
[--policy random|greedy] [--accuracy move|legacy|N] [--stall-rounds N] [--trace-json trace.json] \
[--sims N] [--matrix matrix.csv] [--sims-per-cell N]";

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorOptions {
    /// Built-in demo trainers when absent.
    pub teams_path: Option<PathBuf>,
    pub seed: u64,
    pub battle: BattleOptions,
    pub trace_path: Option<PathBuf>,
    /// Number of extra matches for the batch summary; zero skips it.
    pub sims: usize,
    pub matrix_path: Option<PathBuf>,
    pub sims_per_cell: usize,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        SimulatorOptions {
            teams_path: None,
            seed: 0,
            battle: BattleOptions::default(),
            trace_path: None,
            sims: 0,
            matrix_path: None,
            sims_per_cell: 100,
        }
    }
}

impl SimulatorOptions {
    /// Parses command-line arguments (without the program name). Returns
    /// `None` when help was requested.
    pub fn from_args<I>(args: I) -> anyhow::Result<Option<Self>>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = SimulatorOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--teams" => {
                    opts.teams_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                        anyhow::anyhow!("--teams requires a path (e.g. --teams teams.json)")
                    })?);
                }
                "--seed" => {
                    let val = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                    opts.seed = val.parse().with_context(|| format!("invalid seed {val}"))?;
                }
                "--policy" => {
                    let val = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--policy requires random or greedy"))?;
                    opts.battle.policy = match val.to_ascii_lowercase().as_str() {
                        "random" => MovePolicy::Random,
                        "greedy" => MovePolicy::Greedy,
                        other => anyhow::bail!("Unknown policy {other} (use random or greedy)"),
                    };
                }
                "--accuracy" => {
                    let val = args.next().ok_or_else(|| {
                        anyhow::anyhow!("--accuracy requires move, legacy or a percentage")
                    })?;
                    opts.battle.accuracy = parse_accuracy(&val)?;
                }
                "--stall-rounds" => {
                    let val = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--stall-rounds requires a number"))?;
                    opts.battle.stall_rounds = val.parse()?;
                    if opts.battle.stall_rounds == 0 {
                        anyhow::bail!("--stall-rounds must be > 0");
                    }
                }
                "--trace-json" => {
                    opts.trace_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                        anyhow::anyhow!("--trace-json requires a path (e.g. --trace-json trace.json)")
                    })?);
                }
                "--sims" => {
                    let val = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--sims requires a number"))?;
                    opts.sims = val.parse()?;
                }
                "--matrix" => {
                    opts.matrix_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                        anyhow::anyhow!("--matrix requires a path (e.g. --matrix matrix.csv)")
                    })?);
                }
                "--sims-per-cell" => {
                    let val = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--sims-per-cell requires a number"))?;
                    opts.sims_per_cell = val.parse()?;
                    if opts.sims_per_cell == 0 {
                        anyhow::bail!("--sims-per-cell must be > 0");
                    }
                }
                "--help" | "-h" => return Ok(None),
                other => anyhow::bail!("Unknown argument {other}"),
            }
        }
        Ok(Some(opts))
    }
}

fn parse_accuracy(val: &str) -> anyhow::Result<AccuracyRule> {
    match val.to_ascii_lowercase().as_str() {
        "move" => Ok(AccuracyRule::MoveAccuracy),
        "legacy" => Ok(AccuracyRule::Fixed(LEGACY_BASE_ACCURACY)),
        other => {
            let chance: u8 = other
                .parse()
                .with_context(|| format!("invalid accuracy {other}"))?;
            if !(1..=100).contains(&chance) {
                anyhow::bail!("--accuracy percentage must be between 1 and 100, got {chance}");
            }
            Ok(AccuracyRule::Fixed(chance))
        }
    }
}

pub fn load_teams(path: &Path) -> anyhow::Result<(Trainer, Trainer)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read teams file at {}", path.display()))?;
    parse_teams(&raw).with_context(|| format!("Invalid teams file {}", path.display()))
}

pub fn parse_teams(raw: &str) -> anyhow::Result<(Trainer, Trainer)> {
    let parsed: TeamsFile = serde_json::from_str(raw).context("Failed to parse teams JSON")?;
    let a = parsed
        .trainer_a
        .build()
        .with_context(|| format!("trainer {}", parsed.trainer_a.name))?;
    let b = parsed
        .trainer_b
        .build()
        .with_context(|| format!("trainer {}", parsed.trainer_b.name))?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Roster;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_without_arguments() {
        let opts = SimulatorOptions::from_args(Vec::new()).unwrap().unwrap();
        assert_eq!(opts, SimulatorOptions::default());
        assert_eq!(opts.battle.accuracy, AccuracyRule::MoveAccuracy);
    }

    #[test]
    fn parses_engine_flags() {
        let opts = SimulatorOptions::from_args(args(&[
            "--seed", "42", "--policy", "greedy", "--accuracy", "legacy", "--sims", "8",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(opts.seed, 42);
        assert_eq!(opts.battle.policy, MovePolicy::Greedy);
        assert_eq!(opts.battle.accuracy, AccuracyRule::Fixed(90));
        assert_eq!(opts.sims, 8);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(SimulatorOptions::from_args(args(&["--policy", "smart"])).is_err());
        assert!(SimulatorOptions::from_args(args(&["--accuracy", "0"])).is_err());
        assert!(SimulatorOptions::from_args(args(&["--seed"])).is_err());
        assert!(SimulatorOptions::from_args(args(&["--bogus"])).is_err());
        assert!(SimulatorOptions::from_args(args(&["--help"])).unwrap().is_none());
    }

    #[test]
    fn teams_json_is_validated() {
        let raw = r#"{
            "trainerA": {"name": "Ash", "team": [
                {"name": "Pikachu", "type": "Electric", "health": 100,
                 "moves": [{"name": "Thunderbolt", "type": "Electric", "power": 90, "category": "special"}]}
            ]},
            "trainerB": {"name": "Gary", "team": [
                {"name": "Blastoise", "type": "Water", "health": 110, "mega_evolve": true,
                 "moves": [{"name": "Surf", "type": "Water", "power": 90, "accuracy": 100}]}
            ]}
        }"#;
        let (ash, gary) = parse_teams(raw).unwrap();
        assert_eq!(ash.name(), "Ash");
        assert_eq!(gary.team()[0].max_hp(), 160);
        assert!(gary.team()[0].is_mega_evolved());

        let broken = raw.replace("\"power\": 90, \"category\"", "\"power\": 190, \"category\"");
        let err = parse_teams(&broken).unwrap_err();
        assert!(format!("{err:#}").contains("power must be between 0 and 100"));
    }
}
