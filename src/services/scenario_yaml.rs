use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::absence::AbsenceModel;
use crate::domain::parameters::{CostModel, ParameterError, SimulationParameters};
use crate::services::stepped_runner::{RowWindow, DEFAULT_STEPS_PER_TICK};

pub const DEFAULT_SCENARIO_NAME: &str = "default";
pub const DEFAULT_TRIAL_COUNT: usize = 10;
pub const DEFAULT_WORKFORCE_SIZE: u32 = 21;
pub const DEFAULT_PROFIT_THRESHOLD: f64 = 100.0;
pub const DEFAULT_WINDOW: (usize, usize) = (1, 10);

#[derive(Error, Debug)]
pub enum ScenarioYamlError {
    #[error("failed to read scenario yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse scenario yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid scenario parameters: {0}")]
    Parameters(#[from] ParameterError),
}

/// A named set of run inputs, as stored in a scenario file.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub parameters: SimulationParameters,
    pub window: Option<RowWindow>,
    pub steps_per_tick: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCENARIO_NAME.to_string(),
            parameters: SimulationParameters::new(
                DEFAULT_TRIAL_COUNT,
                DEFAULT_WORKFORCE_SIZE,
                DEFAULT_PROFIT_THRESHOLD,
            ),
            window: None,
            steps_per_tick: None,
            seed: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct ScenarioRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trial_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    workforce_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profit_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    costs: Option<CostModel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    absence_percentages: Option<[f64; 6]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    window: Option<WindowRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    steps_per_tick: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct WindowRecord {
    from: usize,
    to: usize,
}

pub fn load_scenario_from_yaml_file(path: &str) -> Result<Scenario, ScenarioYamlError> {
    let contents = std::fs::read_to_string(path)?;
    deserialize_scenario_from_yaml_str(&contents)
}

/// Parses a scenario; fields that are left out take the defaults of
/// [`Scenario::default`].
pub fn deserialize_scenario_from_yaml_str(input: &str) -> Result<Scenario, ScenarioYamlError> {
    let record: ScenarioRecord = serde_yaml::from_str(input)?;
    let defaults = Scenario::default();

    let absence = match record.absence_percentages {
        Some(percentages) => AbsenceModel::Percentages(percentages),
        None => AbsenceModel::Fixed,
    };
    let parameters = SimulationParameters::new(
        record
            .trial_count
            .unwrap_or(defaults.parameters.trial_count),
        record
            .workforce_size
            .unwrap_or(defaults.parameters.workforce_size),
        record
            .profit_threshold
            .unwrap_or(defaults.parameters.profit_threshold),
    )
    .with_costs(record.costs.unwrap_or_default())
    .with_absence(absence);
    parameters.validate()?;

    let window = record
        .window
        .map(|window| RowWindow::new(window.from, window.to))
        .transpose()?;
    if record.steps_per_tick == Some(0) {
        return Err(ParameterError::InvalidStepSize.into());
    }

    Ok(Scenario {
        name: record.name.unwrap_or(defaults.name),
        parameters,
        window,
        steps_per_tick: record.steps_per_tick,
        seed: record.seed,
    })
}

pub fn serialize_scenario_to_yaml<W: Write>(writer: &mut W, scenario: &Scenario) -> io::Result<()> {
    let parameters = &scenario.parameters;
    let record = ScenarioRecord {
        name: Some(scenario.name.clone()),
        trial_count: Some(parameters.trial_count),
        workforce_size: Some(parameters.workforce_size),
        profit_threshold: Some(parameters.profit_threshold),
        costs: Some(parameters.costs),
        absence_percentages: match parameters.absence {
            AbsenceModel::Fixed => None,
            AbsenceModel::Percentages(percentages) => Some(percentages),
        },
        window: scenario.window.map(|window| WindowRecord {
            from: window.lo(),
            to: window.hi(),
        }),
        steps_per_tick: scenario.steps_per_tick,
        seed: scenario.seed,
    };

    let yaml = serde_yaml::to_string(&record).map_err(io::Error::other)?;
    writer.write_all(yaml.as_bytes())
}

/// Scenario written by `init-scenario`: defaults with every optional knob
/// spelled out so the file documents itself.
pub fn template_scenario() -> Scenario {
    Scenario {
        window: RowWindow::new(DEFAULT_WINDOW.0, DEFAULT_WINDOW.1).ok(),
        steps_per_tick: Some(DEFAULT_STEPS_PER_TICK),
        parameters: Scenario::default()
            .parameters
            .with_absence(AbsenceModel::Percentages([36.0, 38.0, 19.0, 6.0, 1.0, 0.0])),
        ..Scenario::default()
    }
}
