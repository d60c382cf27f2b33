pub mod optimize;
pub mod score;
pub mod validate;

use std::{path::Path, sync::Arc};

use anyhow::{Context, Result};
use districtor::{Assignment, DistrictMap, SeatAllocation};
use tracing::info;

use crate::cli::MapArgs;

/// Everything a command needs: the map, the seat allocation and the assignment.
pub(crate) struct Inputs {
    pub map: Arc<DistrictMap>,
    pub seats: SeatAllocation,
    pub assignment: Assignment,
}

impl Inputs {
    pub(crate) fn load(args: &MapArgs) -> Result<Self> {
        info!(features = %args.features.display(), adjacency = %args.adjacency.display(), "loading district map");
        let map = DistrictMap::read_from_files(&args.adjacency, &args.features, args.aliases.as_deref())?;

        let seats = match &args.seats {
            Some(path) => read_seats(path)?,
            None => SeatAllocation::default(),
        };

        let assignment = Assignment::read_from_json(&args.assignment)?;
        info!(label = %assignment.label, constituencies = assignment.len(), "loaded assignment");

        Ok(Self { map: Arc::new(map), seats, assignment })
    }
}

fn read_seats(path: &Path) -> Result<SeatAllocation> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("Invalid seat allocation in {}", path.display()))
}
