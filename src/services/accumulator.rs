use crate::domain::outcome::evaluate;
use crate::domain::parameters::{ParameterError, SimulationParameters};
use crate::domain::trial::TrialRecord;
use crate::services::draws::DrawSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Running,
    Complete,
}

/// Running totals of one simulation run.
///
/// Only [`SimulationState::advance_one`] mutates the counters, and it either
/// applies a whole trial or nothing at all.
#[derive(Debug, Clone)]
pub struct SimulationState {
    params: SimulationParameters,
    trials_completed: usize,
    cumulative_profit: f64,
    threshold_hit_count: usize,
}

impl SimulationState {
    pub fn new(params: SimulationParameters) -> Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self {
            params,
            trials_completed: 0,
            cumulative_profit: 0.0,
            threshold_hit_count: 0,
        })
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn trials_completed(&self) -> usize {
        self.trials_completed
    }

    pub fn cumulative_profit(&self) -> f64 {
        self.cumulative_profit
    }

    pub fn threshold_hit_count(&self) -> usize {
        self.threshold_hit_count
    }

    pub fn remaining(&self) -> usize {
        self.params.trial_count.saturating_sub(self.trials_completed)
    }

    pub fn is_complete(&self) -> bool {
        self.trials_completed >= self.params.trial_count
    }

    pub fn phase(&self) -> RunPhase {
        if self.is_complete() {
            RunPhase::Complete
        } else if self.trials_completed == 0 {
            RunPhase::Idle
        } else {
            RunPhase::Running
        }
    }

    /// Share of completed trials that met the threshold, truncated to four
    /// decimals. Zero before the first trial.
    pub fn probability_estimate(&self) -> f64 {
        if self.trials_completed == 0 {
            return 0.0;
        }
        truncate_probability(self.threshold_hit_count as f64 / self.trials_completed as f64)
    }

    /// Simulates the next day and folds it into the running totals.
    ///
    /// # Panics
    ///
    /// Panics if the run is already complete or the source yields a draw
    /// outside `[0, 1)`. Both are caller bugs.
    pub fn advance_one<D: DrawSource + ?Sized>(&mut self, draws: &mut D) -> TrialRecord {
        assert!(
            !self.is_complete(),
            "cannot advance a run that already completed {} of {} trials",
            self.trials_completed,
            self.params.trial_count
        );
        let draw = draws.next_draw();
        assert!(
            (0.0..1.0).contains(&draw),
            "draw source produced {draw}, expected a value in [0, 1)"
        );

        let absentee_count = self.params.absence.bucket_for(draw);
        let outcome = evaluate(absentee_count, &self.params);
        let threshold_hit = outcome.profit >= self.params.profit_threshold;

        let record = TrialRecord {
            index: self.trials_completed + 1,
            draw,
            absentee_count,
            present_count: outcome.present_count,
            production_occurred: outcome.production_occurred,
            total_cost: outcome.total_cost,
            profit: outcome.profit,
            threshold_hit,
            cumulative_profit: self.cumulative_profit + outcome.profit,
            threshold_hit_count: self.threshold_hit_count + usize::from(threshold_hit),
        };

        self.trials_completed = record.index;
        self.cumulative_profit = record.cumulative_profit;
        self.threshold_hit_count = record.threshold_hit_count;
        record
    }
}

/// Truncates (never rounds) a ratio to four decimal places.
pub fn truncate_probability(ratio: f64) -> f64 {
    (ratio * 10_000.0).trunc() / 10_000.0
}
