//! Incremental execution: a run advances a bounded number of trials per
//! tick while only the rows of a display window are retained.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::parameters::{ParameterError, SimulationParameters};
use crate::domain::trial::TrialRecord;
use crate::services::accumulator::SimulationState;
use crate::services::batch_runner::ResultSummary;
use crate::services::draws::DrawSource;

/// Trials advanced per tick unless configured otherwise.
pub const DEFAULT_STEPS_PER_TICK: usize = 10;

/// Inclusive, 1-based range of trial indices to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    lo: usize,
    hi: usize,
}

impl RowWindow {
    /// Builds a window from two bounds given in either order.
    pub fn new(from: usize, to: usize) -> Result<Self, ParameterError> {
        if from == 0 || to == 0 {
            return Err(ParameterError::InvalidWindow { from, to });
        }
        Ok(Self {
            lo: from.min(to),
            hi: from.max(to),
        })
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.lo..=self.hi).contains(&index)
    }

    /// Number of slots in the window; zero once clamping leaves `lo > hi`.
    pub fn slots(&self) -> usize {
        (self.hi + 1).saturating_sub(self.lo)
    }

    /// Caps the upper bound at the run's last trial.
    pub fn clamped_to(self, trial_count: usize) -> Self {
        Self {
            lo: self.lo,
            hi: self.hi.min(trial_count),
        }
    }
}

/// Rows inside the window plus the most recently produced row.
#[derive(Debug, Clone, Default)]
pub struct RowCache {
    pinned: BTreeMap<usize, TrialRecord>,
    latest: Option<TrialRecord>,
}

impl RowCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, window: RowWindow, record: TrialRecord) {
        if window.contains(record.index) {
            self.pinned.insert(record.index, record.clone());
        }
        self.latest = Some(record);
    }

    fn prune(&mut self, window: RowWindow) {
        self.pinned.retain(|index, _| window.contains(*index));
    }

    /// Distinct rows held, counting the latest row once even when it is
    /// also pinned.
    pub(crate) fn len(&self) -> usize {
        let extra = self
            .latest
            .as_ref()
            .is_some_and(|row| !self.pinned.contains_key(&row.index));
        self.pinned.len() + usize::from(extra)
    }

    /// Window rows in ascending order, followed by the latest row once the
    /// run has moved past the window.
    pub fn visible_rows(&self, window: RowWindow) -> Vec<TrialRecord> {
        let mut rows: Vec<TrialRecord> = self
            .pinned
            .range(window.lo()..=window.hi())
            .map(|(_, row)| row.clone())
            .collect();
        if let Some(latest) = &self.latest {
            if latest.index > window.hi() {
                rows.push(latest.clone());
            }
        }
        rows
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchProgress {
    /// Trials produced by this call.
    pub produced: usize,
    pub last_row: Option<TrialRecord>,
    pub done: bool,
}

/// Advances at most `max_steps` trials, never past the run's trial count,
/// then drops cached rows outside `window`.
pub fn advance_batch<D: DrawSource + ?Sized>(
    state: &mut SimulationState,
    cache: &mut RowCache,
    window: RowWindow,
    max_steps: usize,
    draws: &mut D,
) -> BatchProgress {
    let steps = max_steps.min(state.remaining());
    let mut last_row = None;
    for _ in 0..steps {
        let record = state.advance_one(draws);
        cache.insert(window, record.clone());
        last_row = Some(record);
    }
    cache.prune(window);

    BatchProgress {
        produced: steps,
        last_row,
        done: state.is_complete(),
    }
}

/// Owns everything a stepped run needs between ticks.
#[derive(Debug, Clone)]
pub struct SteppedRunner {
    state: SimulationState,
    cache: RowCache,
    window: RowWindow,
    steps_per_tick: usize,
    ticks: usize,
}

impl SteppedRunner {
    pub fn new(
        params: SimulationParameters,
        window: RowWindow,
        steps_per_tick: usize,
    ) -> Result<Self, ParameterError> {
        if steps_per_tick == 0 {
            return Err(ParameterError::InvalidStepSize);
        }
        let window = window.clamped_to(params.trial_count);
        Ok(Self {
            state: SimulationState::new(params)?,
            cache: RowCache::new(),
            window,
            steps_per_tick,
            ticks: 0,
        })
    }

    pub fn tick<D: DrawSource + ?Sized>(&mut self, draws: &mut D) -> BatchProgress {
        let progress = advance_batch(
            &mut self.state,
            &mut self.cache,
            self.window,
            self.steps_per_tick,
            draws,
        );
        self.ticks += 1;
        debug!(
            tick = self.ticks,
            produced = progress.produced,
            completed = self.state.trials_completed(),
            cached_rows = self.cache.len(),
            "advanced stepped run"
        );
        progress
    }

    pub fn is_done(&self) -> bool {
        self.state.is_complete()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn cache(&self) -> &RowCache {
        &self.cache
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    pub fn visible_rows(&self) -> Vec<TrialRecord> {
        self.cache.visible_rows(self.window)
    }

    /// KPIs as of the last tick together with the windowed rows.
    pub fn summary(&self) -> ResultSummary {
        ResultSummary::from_state(&self.state, self.visible_rows())
    }
}
