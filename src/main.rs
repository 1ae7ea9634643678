use std::process::ExitCode;

use absence_sim::commands::base_commands::{CliArgs, Commands};
use absence_sim::commands::completions_cmd::completions_command;
use absence_sim::commands::init_scenario_cmd::init_scenario_command;
use absence_sim::commands::simulate_cmd::simulate_command;
use absence_sim::commands::step_cmd::step_command;
use absence_sim::logging::init_logging;
use clap::Parser;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args.log_level);

    match args.command {
        Commands::Simulate { run } => {
            if let Err(e) = simulate_command(&run) {
                eprintln!("Failed to run simulation: {e}");
                return ExitCode::FAILURE;
            }
        }
        Commands::Step {
            run,
            steps_per_tick,
            tick_ms,
        } => {
            if let Err(e) = step_command(&run, steps_per_tick, tick_ms) {
                eprintln!("Failed to run stepped simulation: {e}");
                return ExitCode::FAILURE;
            }
        }
        Commands::InitScenario { output } => {
            if let Err(e) = init_scenario_command(&output) {
                eprintln!("Failed to write scenario template: {e}");
                return ExitCode::FAILURE;
            }
        }
        Commands::Completions { shell } => completions_command(shell),
    }
    ExitCode::SUCCESS
}
