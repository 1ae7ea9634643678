use serde::Serialize;

use crate::domain::parameters::{ParameterError, SimulationParameters};
use crate::domain::trial::TrialRecord;
use crate::services::accumulator::SimulationState;
use crate::services::draws::DrawSource;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub probability_estimate: f64,
    pub cumulative_profit: f64,
    pub trials_completed: usize,
    pub rows: Vec<TrialRecord>,
}

impl ResultSummary {
    pub(crate) fn from_state(state: &SimulationState, rows: Vec<TrialRecord>) -> Self {
        Self {
            probability_estimate: state.probability_estimate(),
            cumulative_profit: state.cumulative_profit(),
            trials_completed: state.trials_completed(),
            rows,
        }
    }
}

/// Runs every trial in one call and keeps all rows in trial order.
pub fn run_batch<D: DrawSource + ?Sized>(
    params: &SimulationParameters,
    draws: &mut D,
) -> Result<ResultSummary, ParameterError> {
    let mut state = SimulationState::new(params.clone())?;
    let mut rows = Vec::with_capacity(params.trial_count);
    while !state.is_complete() {
        rows.push(state.advance_one(draws));
    }
    Ok(ResultSummary::from_state(&state, rows))
}
