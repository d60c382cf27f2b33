mod aliases;
mod district;
mod io;
mod map;

pub use aliases::AliasTable;
pub use district::District;
pub use map::{DistrictMap, UnknownDistrict};

#[cfg(test)]
pub(crate) use map::tests;
