use std::thread;
use std::time::Duration;

use tracing::info;

use crate::commands::base_commands::RunArgs;
use crate::commands::report_format::{format_simulation_report, format_trial_table};
use crate::services::simulation::{
    resolve_scenario, run_mode_for, simulate_scenario, write_report, SimulationError,
};

pub fn step_command(
    run: &RunArgs,
    steps_per_tick: Option<u64>,
    tick_ms: u64,
) -> Result<(), SimulationError> {
    let mut overrides = run.overrides();
    overrides.steps_per_tick = steps_per_tick.map(|steps| steps as usize);
    let scenario = resolve_scenario(run.scenario.as_deref(), &overrides)?;
    let mode = run_mode_for(&scenario, true)?;

    let pause = Duration::from_millis(tick_ms);
    let report = simulate_scenario(&scenario, mode, run.plot.as_deref(), |tick| {
        info!(
            tick = tick.tick,
            completed = tick.trials_completed,
            probability = tick.probability_estimate,
            cumulative_profit = tick.cumulative_profit,
            "tick"
        );
        if !tick.done && !pause.is_zero() {
            thread::sleep(pause);
        }
    })?;

    println!("{}", format_simulation_report(&report));
    println!();
    println!("{}", format_trial_table(&report.rows));

    if let Some(output) = &run.output {
        write_report(output, &report)?;
        println!("Simulation result written to {output}");
    }
    if let Some(plot) = &run.plot {
        println!("Profit chart written to {plot}");
    }
    Ok(())
}
