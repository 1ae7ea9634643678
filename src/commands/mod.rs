pub mod base_commands;
pub mod completions_cmd;
pub mod init_scenario_cmd;
pub mod report_format;
pub mod simulate_cmd;
pub mod step_cmd;
