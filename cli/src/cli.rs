use std::path::PathBuf;

/// Score, validate and optimize constituency assignments
#[derive(clap::Parser, Debug)]
#[command(name = "districtor", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Check an assignment against every hard constraint
    Validate(ValidateArgs),

    /// Score an assignment and write the per-constituency report
    Score(ScoreArgs),

    /// Improve an assignment with local search
    Optimize(OptimizeArgs),
}

/// Inputs shared by every command.
#[derive(clap::Args, Debug)]
pub struct MapArgs {
    /// District adjacency JSON ({ district: [neighbor, ...] })
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub adjacency: PathBuf,

    /// District feature table (GeoJSON FeatureCollection)
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub features: PathBuf,

    /// Station name alias groups JSON ([[name, ...], ...])
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub aliases: Option<PathBuf>,

    /// Assignment JSON to read
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub assignment: PathBuf,

    /// Required seat allocation JSON ({ member_size: count }), defaults to 10x5, 8x4, 15x1
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub seats: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub map: MapArgs,
}

#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Output report file, defaults to "./scores.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub map: MapArgs,

    /// Search config JSON; missing fields take their defaults
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output assignment file, rewritten on every improvement, defaults to "./local_swap.json"
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
