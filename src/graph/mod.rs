mod contiguity;
mod enclave;
mod graph;

pub use contiguity::is_contiguous;
pub(crate) use graph::Graph;
