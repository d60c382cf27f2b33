use std::path::PathBuf;

use anyhow::Result;
use districtor::{Scorer, Validator};
use tracing::info;

use crate::commands::Inputs;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ScoreArgs) -> Result<()> {
    let out_path = args.output.clone().unwrap_or_else(|| PathBuf::from("./scores.json"));
    let Inputs { map, seats, assignment } = Inputs::load(&args.map)?;

    Validator::new(map.clone(), seats).validate(&assignment).ensure_valid()?;

    let report = Scorer::new(map).score(&assignment)?;
    for annotation in &report.annotations {
        info!(
            constituency = %annotation.constituency_name,
            score = annotation.constituency_score,
            balance = annotation.elector_balance,
            enclave = annotation.is_enclave,
            "constituency score"
        );
    }
    info!(overall = report.overall_score, "scored {}", assignment.label);

    report.write_to_json(&out_path)?;

    info!(path = %out_path.display(), "wrote score report");
    Ok(())
}
