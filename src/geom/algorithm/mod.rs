mod chord;
mod hull;

pub use chord::compactness;
pub use hull::convexity;
