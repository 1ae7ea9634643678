use serde::Serialize;

use crate::domain::parameters::CostModel;
use crate::domain::trial::TrialRecord;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ParametersReport {
    pub trial_count: usize,
    pub workforce_size: u32,
    pub profit_threshold: f64,
    pub costs: CostModel,
    pub absence_breakpoints: Vec<f64>,
    pub max_absentees: u32,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowReport {
    pub from: usize,
    pub to: usize,
    pub steps_per_tick: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub scenario: String,
    pub generated_at: String,
    pub mode: String,
    pub seed: Option<u64>,
    pub parameters: ParametersReport,
    pub window: Option<WindowReport>,
    pub probability_estimate: f64,
    pub cumulative_profit: f64,
    pub trials_completed: usize,
    pub rows: Vec<TrialRecord>,
}
