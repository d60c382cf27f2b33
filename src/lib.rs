#![doc = "Districtor public API: constituency scoring and local-search optimization"]
mod common;
mod geom;
mod graph;
mod map;
mod objective;
mod plan;
mod search;

#[doc(inline)]
pub use map::{AliasTable, District, DistrictMap, UnknownDistrict};

#[doc(inline)]
pub use geom::{compactness, convexity, GeometryError};

#[doc(inline)]
pub use graph::is_contiguous;

#[doc(inline)]
pub use objective::{geometric_score, ConstituencyScore, Metric, ScoreReport, Scorer};

#[doc(inline)]
pub use plan::{name_parts, Assignment, Constituency, Plan, SeatAllocation, ValidationReport, Validator};

#[doc(inline)]
pub use search::{Acceptance, JsonFileSink, LocalSearch, MemorySink, PlanSink, SearchConfig, SearchOutcome, StopReason};
