use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::services::simulation::ScenarioOverrides;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Log level for diagnostics written to stderr (RUST_LOG overrides)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every trial at once and print the results table
    Simulate {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Run in ticks of a few trials, keeping only a window of rows
    Step {
        #[command(flatten)]
        run: RunArgs,
        /// Trials advanced per tick
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        steps_per_tick: Option<u64>,
        /// Pause between ticks in milliseconds
        #[arg(long, default_value_t = 0)]
        tick_ms: u64,
    },
    /// Write a scenario file populated with the default parameters
    InitScenario {
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Scenario YAML file; flags below override its values
    #[arg(short, long)]
    pub scenario: Option<String>,
    /// Number of days to simulate
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..=100_000))]
    pub days: Option<u64>,
    /// Total employees on the payroll
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(21..=24))]
    pub workforce: Option<u32>,
    /// Profit a day must reach to count toward the probability
    #[arg(short, long)]
    pub threshold: Option<f64>,
    /// Revenue of a producing day
    #[arg(long)]
    pub revenue: Option<f64>,
    /// Production cost of a producing day
    #[arg(long)]
    pub production_cost: Option<f64>,
    /// Daily labor cost per employee
    #[arg(long)]
    pub labor_cost: Option<f64>,
    /// Six comma separated percentages for 0..=5 absentees, summing to 100
    #[arg(long, value_parser = parse_percentages)]
    pub absence: Option<[f64; 6]>,
    /// First row of the displayed window
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub from: Option<u64>,
    /// Last row of the displayed window
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub to: Option<u64>,
    /// Seed for reproducible draws
    #[arg(long)]
    pub seed: Option<u64>,
    /// Report file (.yaml or .json)
    #[arg(short, long)]
    pub output: Option<String>,
    /// PNG chart of cumulative profit
    #[arg(short, long)]
    pub plot: Option<String>,
}

impl RunArgs {
    /// Window requested on the command line. A single bound pairs with the
    /// default for the other end.
    pub fn window(&self) -> Option<(usize, usize)> {
        match (self.from, self.to) {
            (None, None) => None,
            (from, to) => Some((
                from.unwrap_or(1) as usize,
                to.unwrap_or(10) as usize,
            )),
        }
    }

    pub fn overrides(&self) -> ScenarioOverrides {
        ScenarioOverrides {
            name: None,
            trial_count: self.days.map(|days| days as usize),
            workforce_size: self.workforce,
            profit_threshold: self.threshold,
            daily_revenue: self.revenue,
            production_cost: self.production_cost,
            labor_cost_per_worker: self.labor_cost,
            absence_percentages: self.absence,
            window: self.window(),
            steps_per_tick: None,
            seed: self.seed,
        }
    }
}

fn parse_percentages(input: &str) -> Result<[f64; 6], String> {
    let values = input
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid percentage: {part}"))
        })
        .collect::<Result<Vec<f64>, String>>()?;
    values
        .try_into()
        .map_err(|values: Vec<f64>| format!("expected 6 percentages, got {}", values.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_accepts_short_flags() {
        let args = CliArgs::parse_from([
            "absence-sim",
            "simulate",
            "-n",
            "500",
            "-w",
            "22",
            "-t",
            "150",
        ]);

        if let Commands::Simulate { run } = args.command {
            let overrides = run.overrides();
            assert_eq!(overrides.trial_count, Some(500));
            assert_eq!(overrides.workforce_size, Some(22));
            assert_eq!(overrides.profit_threshold, Some(150.0));
            assert_eq!(overrides.window, None);
        } else {
            panic!("expected simulate command");
        }
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn workforce_outside_form_range_is_rejected() {
        let result = CliArgs::try_parse_from(["absence-sim", "simulate", "-w", "25"]);
        assert!(result.is_err());
        let result = CliArgs::try_parse_from(["absence-sim", "simulate", "-w", "20"]);
        assert!(result.is_err());
    }

    #[test]
    fn days_must_be_between_one_and_one_hundred_thousand() {
        assert!(CliArgs::try_parse_from(["absence-sim", "simulate", "-n", "0"]).is_err());
        assert!(CliArgs::try_parse_from(["absence-sim", "simulate", "-n", "100001"]).is_err());
        assert!(CliArgs::try_parse_from(["absence-sim", "simulate", "-n", "100000"]).is_ok());
    }

    #[test]
    fn absence_takes_six_comma_separated_percentages() {
        let args = CliArgs::parse_from([
            "absence-sim",
            "simulate",
            "--absence",
            "36,38,19,6,1,0",
        ]);
        if let Commands::Simulate { run } = args.command {
            assert_eq!(
                run.overrides().absence_percentages,
                Some([36.0, 38.0, 19.0, 6.0, 1.0, 0.0])
            );
        } else {
            panic!("expected simulate command");
        }

        let result =
            CliArgs::try_parse_from(["absence-sim", "simulate", "--absence", "50,50"]);
        assert!(result.is_err());
    }

    #[test]
    fn step_parses_window_and_tick_options() {
        let args = CliArgs::parse_from([
            "absence-sim",
            "step",
            "--from",
            "15",
            "--to",
            "10",
            "--steps-per-tick",
            "25",
            "--log-level",
            "debug",
        ]);

        if let Commands::Step {
            run,
            steps_per_tick,
            tick_ms,
        } = args.command
        {
            assert_eq!(run.window(), Some((15, 10)));
            assert_eq!(steps_per_tick, Some(25));
            assert_eq!(tick_ms, 0);
        } else {
            panic!("expected step command");
        }
        assert_eq!(args.log_level, "debug");
    }

    #[test]
    fn single_window_bound_uses_default_for_the_other() {
        let run = RunArgs {
            from: Some(4),
            ..RunArgs::default()
        };
        assert_eq!(run.window(), Some((4, 10)));
    }

    #[test]
    fn zero_window_bound_is_rejected() {
        assert!(CliArgs::try_parse_from(["absence-sim", "step", "--from", "0"]).is_err());
    }
}
