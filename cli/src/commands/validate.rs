use anyhow::Result;
use districtor::Validator;
use tracing::info;

use crate::commands::Inputs;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ValidateArgs) -> Result<()> {
    let Inputs { map, seats, assignment } = Inputs::load(&args.map)?;

    let report = Validator::new(map, seats).validate(&assignment);
    report.ensure_valid()?;

    info!(label = %assignment.label, "assignment is valid");
    Ok(())
}
