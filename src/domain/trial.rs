use serde::{Deserialize, Serialize};

/// One simulated day. Values are stored at full precision; rounding is a
/// display concern.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrialRecord {
    /// 1-based trial number.
    pub index: usize,
    /// Raw uniform sample the absentee bucket was resolved from.
    pub draw: f64,
    pub absentee_count: u32,
    pub present_count: i64,
    pub production_occurred: bool,
    pub total_cost: f64,
    pub profit: f64,
    /// Whether this trial's profit met the threshold.
    pub threshold_hit: bool,
    pub cumulative_profit: f64,
    /// Threshold hits in trials `1..=index`.
    pub threshold_hit_count: usize,
}
