mod config;
mod local;
mod sink;
mod trial;

pub use config::{Acceptance, SearchConfig};
pub use local::{LocalSearch, SearchOutcome, StopReason};
pub use sink::{JsonFileSink, MemorySink, PlanSink};
