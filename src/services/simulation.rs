use std::io;
use std::path::Path;

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::absence::AbsenceModel;
use crate::domain::parameters::ParameterError;
use crate::services::draws::{draws_from_seed, DrawSource};
use crate::services::profit_plot::{write_profit_png, ProfitPlotError};
use crate::services::runner::{execute, RunMode, TickReport};
use crate::services::scenario_yaml::{
    load_scenario_from_yaml_file, Scenario, ScenarioYamlError, DEFAULT_WINDOW,
};
use crate::services::simulation_types::{ParametersReport, SimulationReport, WindowReport};
use crate::services::stepped_runner::{RowWindow, DEFAULT_STEPS_PER_TICK};

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("failed to load scenario: {0}")]
    Scenario(#[from] ScenarioYamlError),
    #[error("invalid parameters: {0}")]
    Parameters(#[from] ParameterError),
    #[error("failed to render profit chart: {0}")]
    Plot(#[from] ProfitPlotError),
    #[error("failed to write report: {0}")]
    WriteReport(#[from] io::Error),
    #[error("failed to serialize report as yaml: {0}")]
    SerializeYaml(#[from] serde_yaml::Error),
    #[error("failed to serialize report as json: {0}")]
    SerializeJson(#[from] serde_json::Error),
}

/// Values given on the command line. Anything set here wins over the
/// scenario file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioOverrides {
    pub name: Option<String>,
    pub trial_count: Option<usize>,
    pub workforce_size: Option<u32>,
    pub profit_threshold: Option<f64>,
    pub daily_revenue: Option<f64>,
    pub production_cost: Option<f64>,
    pub labor_cost_per_worker: Option<f64>,
    pub absence_percentages: Option<[f64; 6]>,
    pub window: Option<(usize, usize)>,
    pub steps_per_tick: Option<usize>,
    pub seed: Option<u64>,
}

pub fn resolve_scenario(
    scenario_path: Option<&str>,
    overrides: &ScenarioOverrides,
) -> Result<Scenario, SimulationError> {
    let mut scenario = match scenario_path {
        Some(path) => load_scenario_from_yaml_file(path)?,
        None => Scenario::default(),
    };
    apply_overrides(&mut scenario, overrides)?;
    scenario.parameters.validate()?;
    Ok(scenario)
}

fn apply_overrides(
    scenario: &mut Scenario,
    overrides: &ScenarioOverrides,
) -> Result<(), ParameterError> {
    let parameters = &mut scenario.parameters;
    if let Some(name) = &overrides.name {
        scenario.name = name.clone();
    }
    if let Some(trial_count) = overrides.trial_count {
        parameters.trial_count = trial_count;
    }
    if let Some(workforce_size) = overrides.workforce_size {
        parameters.workforce_size = workforce_size;
    }
    if let Some(threshold) = overrides.profit_threshold {
        parameters.profit_threshold = threshold;
    }
    if let Some(revenue) = overrides.daily_revenue {
        parameters.costs.daily_revenue = revenue;
    }
    if let Some(cost) = overrides.production_cost {
        parameters.costs.production_cost = cost;
    }
    if let Some(cost) = overrides.labor_cost_per_worker {
        parameters.costs.labor_cost_per_worker = cost;
    }
    if let Some(percentages) = overrides.absence_percentages {
        parameters.absence = AbsenceModel::Percentages(percentages);
    }
    if let Some((from, to)) = overrides.window {
        scenario.window = Some(RowWindow::new(from, to)?);
    }
    if let Some(steps) = overrides.steps_per_tick {
        scenario.steps_per_tick = Some(steps);
    }
    if overrides.seed.is_some() {
        scenario.seed = overrides.seed;
    }
    Ok(())
}

/// Picks the run mode for a scenario, filling stepped-mode gaps with the
/// defaults of the interactive table (rows 1..=10, 10 trials per tick).
pub fn run_mode_for(scenario: &Scenario, stepped: bool) -> Result<RunMode, ParameterError> {
    if !stepped {
        return Ok(RunMode::Batch);
    }
    let window = match scenario.window {
        Some(window) => window,
        None => RowWindow::new(DEFAULT_WINDOW.0, DEFAULT_WINDOW.1)?,
    };
    Ok(RunMode::Stepped {
        window,
        steps_per_tick: scenario.steps_per_tick.unwrap_or(DEFAULT_STEPS_PER_TICK),
    })
}

/// Runs a resolved scenario with draws seeded from the scenario and
/// optionally renders the cumulative profit chart.
pub fn simulate_scenario<F>(
    scenario: &Scenario,
    mode: RunMode,
    plot_path: Option<&str>,
    on_tick: F,
) -> Result<SimulationReport, SimulationError>
where
    F: FnMut(&TickReport),
{
    let mut draws = draws_from_seed(scenario.seed);
    let report = run_simulation_with_draws(scenario, mode, &mut draws, on_tick)?;
    if let Some(path) = plot_path {
        write_profit_png(path, &report.rows)?;
        info!(path, "profit chart written");
    }
    Ok(report)
}

pub fn run_simulation_with_draws<D, F>(
    scenario: &Scenario,
    mode: RunMode,
    draws: &mut D,
    on_tick: F,
) -> Result<SimulationReport, ParameterError>
where
    D: DrawSource + ?Sized,
    F: FnMut(&TickReport),
{
    let parameters = &scenario.parameters;
    let summary = execute(parameters, mode, draws, on_tick)?;

    let window = match mode {
        RunMode::Batch => None,
        RunMode::Stepped {
            window,
            steps_per_tick,
        } => Some(WindowReport {
            from: window.lo(),
            to: window.hi(),
            steps_per_tick,
        }),
    };

    Ok(SimulationReport {
        scenario: scenario.name.clone(),
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        mode: mode.name().to_string(),
        seed: scenario.seed,
        parameters: ParametersReport {
            trial_count: parameters.trial_count,
            workforce_size: parameters.workforce_size,
            profit_threshold: parameters.profit_threshold,
            costs: parameters.costs,
            absence_breakpoints: parameters.absence.breakpoints(),
            max_absentees: parameters.absence.max_absentees(),
        },
        window,
        probability_estimate: summary.probability_estimate,
        cumulative_profit: summary.cumulative_profit,
        trials_completed: summary.trials_completed,
        rows: summary.rows,
    })
}

/// Writes the report as JSON when the path ends in `.json`, YAML otherwise.
pub fn write_report(path: &str, report: &SimulationReport) -> Result<(), SimulationError> {
    let is_json = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let contents = if is_json {
        serde_json::to_string_pretty(report)?
    } else {
        serde_yaml::to_string(report)?
    };
    if report.rows.is_empty() {
        warn!(path, "report contains no rows");
    }
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedDraws, FULL_CREW_DRAW, SHORT_CREW_DRAW};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("absence-sim-{nanos}-{name}"))
    }

    #[test]
    fn overrides_win_over_scenario_file() {
        let path = temp_path("scenario.yaml");
        std::fs::write(
            &path,
            "name: file\ntrial_count: 50\nworkforce_size: 22\nseed: 1\n",
        )
        .unwrap();

        let overrides = ScenarioOverrides {
            workforce_size: Some(24),
            production_cost: Some(1000.0),
            window: Some((9, 3)),
            ..ScenarioOverrides::default()
        };
        let scenario = resolve_scenario(path.to_str(), &overrides).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(scenario.name, "file");
        assert_eq!(scenario.parameters.trial_count, 50);
        assert_eq!(scenario.parameters.workforce_size, 24);
        assert_eq!(scenario.parameters.costs.production_cost, 1000.0);
        assert_eq!(scenario.parameters.costs.daily_revenue, 4000.0);
        assert_eq!(scenario.window, Some(RowWindow::new(3, 9).unwrap()));
        assert_eq!(scenario.seed, Some(1));
    }

    #[test]
    fn resolve_scenario_validates_overridden_values() {
        let overrides = ScenarioOverrides {
            absence_percentages: Some([50.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ..ScenarioOverrides::default()
        };
        let err = resolve_scenario(None, &overrides).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Parameters(ParameterError::PercentageSum(_))
        ));
    }

    #[test]
    fn stepped_mode_defaults_to_first_ten_rows() {
        let mode = run_mode_for(&Scenario::default(), true).unwrap();
        assert_eq!(
            mode,
            RunMode::Stepped {
                window: RowWindow::new(1, 10).unwrap(),
                steps_per_tick: DEFAULT_STEPS_PER_TICK,
            }
        );
        assert_eq!(run_mode_for(&Scenario::default(), false).unwrap(), RunMode::Batch);
    }

    #[test]
    fn report_carries_parameters_and_kpis() {
        let scenario = Scenario::default();
        let mut draws = ScriptedDraws::new(&[FULL_CREW_DRAW, SHORT_CREW_DRAW]);
        let report =
            run_simulation_with_draws(&scenario, RunMode::Batch, &mut draws, |_| {}).unwrap();

        assert_eq!(report.scenario, "default");
        assert_eq!(report.mode, "batch");
        assert_eq!(report.window, None);
        assert_eq!(report.trials_completed, 10);
        assert_eq!(report.rows.len(), 10);
        assert_eq!(report.probability_estimate, 0.5);
        assert_eq!(report.cumulative_profit, 5.0 * (970.0 - 630.0));
        assert_eq!(
            report.parameters.absence_breakpoints,
            vec![0.36, 0.74, 0.93, 0.99]
        );
        assert_eq!(report.parameters.max_absentees, 4);
    }

    #[test]
    fn write_report_picks_format_from_extension() {
        let scenario = Scenario::default();
        let mut draws = ScriptedDraws::new(&[FULL_CREW_DRAW]);
        let report =
            run_simulation_with_draws(&scenario, RunMode::Batch, &mut draws, |_| {}).unwrap();

        let json_path = temp_path("report.json");
        write_report(json_path.to_str().unwrap(), &report).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        std::fs::remove_file(&json_path).unwrap();
        assert_eq!(json["probability_estimate"], 1.0);
        assert_eq!(json["rows"].as_array().unwrap().len(), 10);

        let yaml_path = temp_path("report.yaml");
        write_report(yaml_path.to_str().unwrap(), &report).unwrap();
        let yaml = std::fs::read_to_string(&yaml_path).unwrap();
        std::fs::remove_file(&yaml_path).unwrap();
        assert!(yaml.contains("mode: batch"));
        assert!(yaml.contains("threshold_hit_count: 10"));
    }
}
