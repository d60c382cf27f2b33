use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::plan::Assignment;

/// Destination for every improving assignment the search commits.
pub trait PlanSink {
    fn persist(&mut self, assignment: &Assignment) -> Result<()>;
}

/// Overwrites a JSON file with each committed assignment.
#[derive(Clone, Debug)]
pub struct JsonFileSink {
    path: PathBuf,
    writes: usize,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into(), writes: 0 } }

    #[inline] pub fn path(&self) -> &Path { &self.path }

    /// Get the number of assignments written so far.
    #[inline] pub fn writes(&self) -> usize { self.writes }
}

impl PlanSink for JsonFileSink {
    fn persist(&mut self, assignment: &Assignment) -> Result<()> {
        assignment.write_to_json(&self.path)?;
        self.writes += 1;
        debug!(path = %self.path.display(), writes = self.writes, "persisted assignment");
        Ok(())
    }
}

/// Keeps every committed assignment in memory, in commit order.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub committed: Vec<Assignment>,
}

impl MemorySink {
    pub fn new() -> Self { Self::default() }

    /// Get the most recently committed assignment.
    pub fn last(&self) -> Option<&Assignment> { self.committed.last() }
}

impl PlanSink for MemorySink {
    fn persist(&mut self, assignment: &Assignment) -> Result<()> {
        self.committed.push(assignment.clone());
        Ok(())
    }
}
