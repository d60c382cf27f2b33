mod adjacency;
mod geojson;
mod read;

pub(crate) use adjacency::{read_adjacency, read_alias_groups};
pub(crate) use geojson::read_districts_from_geojson_bytes;
