use crate::domain::parameters::SimulationParameters;
use crate::services::draws::DrawSource;

/// Draw that lands in the zero-absentee bucket of the fixed table.
pub const FULL_CREW_DRAW: f64 = 0.10;
/// Draw that lands in the four-absentee bucket of the fixed table.
pub const SHORT_CREW_DRAW: f64 = 0.999_99;

// Replays a fixed list of draws, wrapping around when exhausted
pub struct ScriptedDraws {
    draws: Vec<f64>,
    position: usize,
}

impl ScriptedDraws {
    pub fn new(draws: &[f64]) -> Self {
        assert!(!draws.is_empty(), "scripted draws need at least one value");
        Self {
            draws: draws.to_vec(),
            position: 0,
        }
    }

    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl DrawSource for ScriptedDraws {
    fn next_draw(&mut self) -> f64 {
        let draw = self.draws[self.position % self.draws.len()];
        self.position += 1;
        draw
    }
}

pub fn plant_parameters(trial_count: usize) -> SimulationParameters {
    SimulationParameters::new(trial_count, 21, 100.0)
}
