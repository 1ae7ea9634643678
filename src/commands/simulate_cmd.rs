use crate::commands::base_commands::RunArgs;
use crate::commands::report_format::{format_simulation_report, format_trial_table, select_rows};
use crate::services::runner::RunMode;
use crate::services::simulation::{resolve_scenario, simulate_scenario, write_report, SimulationError};

pub fn simulate_command(run: &RunArgs) -> Result<(), SimulationError> {
    let scenario = resolve_scenario(run.scenario.as_deref(), &run.overrides())?;
    let report = simulate_scenario(&scenario, RunMode::Batch, run.plot.as_deref(), |_| {})?;

    println!("{}", format_simulation_report(&report));
    println!();
    println!("{}", format_trial_table(&select_rows(&report.rows, run.window())));

    if let Some(output) = &run.output {
        write_report(output, &report)?;
        println!("Simulation result written to {output}");
    }
    if let Some(plot) = &run.plot {
        println!("Profit chart written to {plot}");
    }
    Ok(())
}
