use serde::Serialize;
use tracing::info;

use crate::domain::parameters::{ParameterError, SimulationParameters};
use crate::services::batch_runner::{run_batch, ResultSummary};
use crate::services::draws::DrawSource;
use crate::services::stepped_runner::{BatchProgress, RowWindow, SteppedRunner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Every trial in one call, all rows kept.
    Batch,
    /// Bounded ticks with a windowed row view.
    Stepped {
        window: RowWindow,
        steps_per_tick: usize,
    },
}

impl RunMode {
    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Batch => "batch",
            RunMode::Stepped { .. } => "stepped",
        }
    }
}

/// Snapshot handed to the tick observer after every stepped tick.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: usize,
    pub trials_completed: usize,
    pub probability_estimate: f64,
    pub cumulative_profit: f64,
    pub done: bool,
}

/// Runs a simulation to completion in the requested mode.
///
/// `on_tick` is called after each stepped tick; batch runs never call it.
pub fn execute<D, F>(
    params: &SimulationParameters,
    mode: RunMode,
    draws: &mut D,
    mut on_tick: F,
) -> Result<ResultSummary, ParameterError>
where
    D: DrawSource + ?Sized,
    F: FnMut(&TickReport),
{
    info!(
        mode = mode.name(),
        trials = params.trial_count,
        workforce = params.workforce_size,
        threshold = params.profit_threshold,
        "starting simulation"
    );

    let summary = match mode {
        RunMode::Batch => run_batch(params, draws)?,
        RunMode::Stepped {
            window,
            steps_per_tick,
        } => {
            let mut runner = SteppedRunner::new(params.clone(), window, steps_per_tick)?;
            while !runner.is_done() {
                let progress = runner.tick(draws);
                on_tick(&tick_report(&runner, &progress));
            }
            runner.summary()
        }
    };

    info!(
        probability = summary.probability_estimate,
        cumulative_profit = summary.cumulative_profit,
        rows = summary.rows.len(),
        "simulation finished"
    );
    Ok(summary)
}

fn tick_report(runner: &SteppedRunner, progress: &BatchProgress) -> TickReport {
    let state = runner.state();
    TickReport {
        tick: runner.ticks(),
        trials_completed: state.trials_completed(),
        probability_estimate: state.probability_estimate(),
        cumulative_profit: state.cumulative_profit(),
        done: progress.done,
    }
}
