use thiserror::Error;

/// Failures of the geometry utilities. These are recoverable: the affected
/// metric is reported as undefined rather than aborting a run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("no districts to build a geometry from")]
    Empty,

    #[error("unknown district '{0}'")]
    UnknownDistrict(String),

    #[error("district index {0} has no geometry")]
    UnknownIndex(usize),

    #[error("geometry has no centroid")]
    MissingCentroid,

    #[error("convex hull has zero area")]
    DegenerateHull,
}
