mod cache;
mod metric;
mod objective;
mod relevance;
mod report;

pub use metric::{geometric_score, Metric};
pub use objective::Scorer;
pub use report::{ConstituencyScore, ScoreReport};
