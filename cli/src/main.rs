mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{optimize, score, validate};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the log subscriber. `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Validate(args) => validate::run(&cli, args),
        Commands::Score(args) => score::run(&cli, args),
        Commands::Optimize(args) => optimize::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
