use std::fmt;

/// Symmetric ratio score `min(a/b, b/a)`, 0 when either side is 0.
///
/// 1 when the values agree and falling toward 0 as they diverge in either
/// direction.
#[inline]
pub fn geometric_score(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 { return 0.0 }
    (a / b).min(b / a)
}

/// The five per-constituency sub-metrics that make up a constituency score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Nonenclavity,
    Compactness,
    Convexity,
    Relevance,
    ElectorBalance,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Nonenclavity,
        Metric::Compactness,
        Metric::Convexity,
        Metric::Relevance,
        Metric::ElectorBalance,
    ];

    /// Get the field name used for this metric in score reports.
    pub fn short_name(&self) -> &'static str {
        match self {
            Metric::Nonenclavity => "nonenclavity",
            Metric::Compactness => "compactness",
            Metric::Convexity => "convexity",
            Metric::Relevance => "relevance",
            Metric::ElectorBalance => "elector_balance",
        }
    }

    /// Check if the metric is derived from the unioned geometry and may be undefined.
    #[inline] pub fn is_geometric(&self) -> bool { matches!(self, Metric::Compactness | Metric::Convexity) }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.short_name()) }
}
