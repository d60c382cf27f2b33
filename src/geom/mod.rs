mod algorithm;
mod error;
mod geom;

pub use algorithm::{compactness, convexity};
pub use error::GeometryError;
pub(crate) use geom::Geometries;
