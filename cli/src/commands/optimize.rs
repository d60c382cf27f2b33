use std::path::PathBuf;

use anyhow::Result;
use districtor::{JsonFileSink, Plan, SearchConfig};
use tracing::info;

use crate::commands::Inputs;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::OptimizeArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or_else(|| PathBuf::from("./local_swap.json"));
    let config = match &args.config {
        Some(path) => SearchConfig::read_from_json(path)?,
        None => SearchConfig::default(),
    };

    let Inputs { map, seats, assignment } = Inputs::load(&args.map)?;
    let mut plan = Plan::new(map, assignment);
    let mut sink = JsonFileSink::new(&out_path);

    let outcome = plan.optimize(&seats, &config, &mut sink)?;

    info!(
        initial = outcome.initial_score,
        final_score = outcome.final_score,
        commits = outcome.commits,
        reason = %outcome.stop_reason,
        path = %sink.path().display(),
        "optimization finished"
    );
    if sink.writes() == 0 {
        info!("no improvement found; {} was not written", out_path.display());
    }

    Ok(())
}
