use pokemon_trainer_battle::config::USAGE;
use pokemon_trainer_battle::{run, SimulatorOptions};
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match SimulatorOptions::from_args(env::args().skip(1))? {
        Some(opts) => run(opts),
        None => {
            eprintln!("{USAGE}");
            Ok(())
        }
    }
}
