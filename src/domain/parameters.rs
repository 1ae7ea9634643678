use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::absence::AbsenceModel;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("trial count must be greater than zero")]
    InvalidTrialCount,
    #[error("workforce size must be greater than zero")]
    InvalidWorkforce,
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("absence percentage for bucket {bucket} is negative: {value}")]
    NegativePercentage { bucket: usize, value: f64 },
    #[error("absence percentages must sum to 100, got {0}")]
    PercentageSum(f64),
    #[error("window bounds must be at least 1, got [{from}, {to}]")]
    InvalidWindow { from: usize, to: usize },
    #[error("steps per tick must be greater than zero")]
    InvalidStepSize,
}

/// Revenue and cost constants applied to every simulated day.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub daily_revenue: f64,
    pub production_cost: f64,
    pub labor_cost_per_worker: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            daily_revenue: 4000.0,
            production_cost: 2400.0,
            labor_cost_per_worker: 30.0,
        }
    }
}

impl CostModel {
    fn validate(&self) -> Result<(), ParameterError> {
        ensure_finite("daily_revenue", self.daily_revenue)?;
        ensure_finite("production_cost", self.production_cost)?;
        ensure_finite("labor_cost_per_worker", self.labor_cost_per_worker)
    }
}

/// Inputs of a single run. Immutable once the run has started.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParameters {
    pub trial_count: usize,
    pub workforce_size: u32,
    pub profit_threshold: f64,
    pub costs: CostModel,
    pub absence: AbsenceModel,
}

impl SimulationParameters {
    pub fn new(trial_count: usize, workforce_size: u32, profit_threshold: f64) -> Self {
        Self {
            trial_count,
            workforce_size,
            profit_threshold,
            costs: CostModel::default(),
            absence: AbsenceModel::Fixed,
        }
    }

    pub fn with_costs(mut self, costs: CostModel) -> Self {
        self.costs = costs;
        self
    }

    pub fn with_absence(mut self, absence: AbsenceModel) -> Self {
        self.absence = absence;
        self
    }

    /// Rejects inputs that would make the estimate meaningless.
    ///
    /// Range checks that only exist for the interactive form (for example the
    /// 21..=24 workforce bound) live in the CLI layer, not here.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.trial_count == 0 {
            return Err(ParameterError::InvalidTrialCount);
        }
        if self.workforce_size == 0 {
            return Err(ParameterError::InvalidWorkforce);
        }
        ensure_finite("profit_threshold", self.profit_threshold)?;
        self.costs.validate()?;
        self.absence.validate()
    }
}

pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ParameterError::NonFinite { field })
    }
}
