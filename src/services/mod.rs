pub mod accumulator;
pub mod batch_runner;
pub mod draws;
pub mod profit_plot;
pub mod runner;
pub mod scenario_yaml;
pub mod simulation;
pub mod simulation_types;
pub mod stepped_runner;
