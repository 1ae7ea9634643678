use predicates::prelude::*;

fn table_days(stdout: &str) -> Vec<usize> {
    stdout
        .lines()
        .skip_while(|line| !line.starts_with("Day |"))
        .skip(2)
        .filter_map(|line| line.split(" | ").next())
        .filter_map(|day| day.trim().parse().ok())
        .collect()
}

fn run_days(subcommand: &str, extra: &[&str]) -> Vec<usize> {
    let mut cmd = assert_cmd::cargo_bin_cmd!("absence-sim");
    cmd.arg(subcommand).args(extra);
    let output = cmd.assert().success().get_output().stdout.clone();
    table_days(&String::from_utf8(output).unwrap())
}

#[test]
fn step_shows_window_rows_and_final_row() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("absence-sim");
    cmd.args([
        "step",
        "-n",
        "50",
        "--from",
        "15",
        "--to",
        "10",
        "--steps-per-tick",
        "10",
        "--seed",
        "3",
    ]);

    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();

    assert_eq!(table_days(&stdout), vec![10, 11, 12, 13, 14, 15, 50]);
    assert!(stdout.contains("Mode: stepped"));
    assert!(stdout.contains("Rows: 50 of 50"));
}

#[test]
fn step_logs_ticks_at_info_level() {
    let mut cmd = assert_cmd::cargo_bin_cmd!("absence-sim");
    cmd.env_remove("RUST_LOG");
    cmd.args(["step", "-n", "25", "--seed", "1", "--log-level", "info"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("tick"))
        .stderr(predicate::str::contains("simulation finished"));
}

#[test]
fn step_and_simulate_agree_when_window_lies_past_the_run() {
    let args = ["-n", "20", "--from", "60", "--to", "70", "--seed", "4"];

    let simulated = run_days("simulate", &args);
    let stepped = run_days("step", &args);

    assert!(simulated.is_empty());
    assert_eq!(stepped, simulated);
}

#[test]
fn step_and_simulate_agree_when_window_overlaps_the_end() {
    let args = ["-n", "20", "--from", "18", "--to", "30", "--seed", "4"];

    let simulated = run_days("simulate", &args);
    let stepped = run_days("step", &args);

    assert_eq!(simulated, vec![18, 19, 20]);
    assert_eq!(stepped, simulated);
}
