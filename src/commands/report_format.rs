use crate::domain::trial::TrialRecord;
use crate::services::simulation_types::SimulationReport;

const TABLE_HEADER: &str =
    "Day | rnd | Absent | Present | Production | Total cost | Profit | Cumulative | >= threshold";

pub fn format_simulation_report(report: &SimulationReport) -> String {
    let mut lines = Vec::new();
    lines.push("Simulation Report".to_string());
    lines.push(format!("Scenario: {}", report.scenario));
    lines.push(format!("Mode: {}", report.mode));
    lines.push(format!("Workforce: {}", report.parameters.workforce_size));
    lines.push(format!("Max absentees: {}", report.parameters.max_absentees));
    lines.push(format!(
        "Profit threshold: {:.2}",
        report.parameters.profit_threshold
    ));
    lines.push(format!(
        "Probability (>= threshold): {:.4}",
        report.probability_estimate
    ));
    lines.push(format!("Cumulative profit: {:.2}", report.cumulative_profit));
    lines.push(format!(
        "Rows: {} of {}",
        report.trials_completed, report.parameters.trial_count
    ));
    lines.join("\n")
}

/// Renders rows with display rounding: five decimals for the draw, two for
/// money.
pub fn format_trial_table(rows: &[TrialRecord]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(TABLE_HEADER.to_string());
    lines.push("----|-----|--------|---------|------------|------------|--------|------------|-------------".to_string());
    lines.extend(rows.iter().map(format_trial_row));
    lines.join("\n")
}

fn format_trial_row(row: &TrialRecord) -> String {
    format!(
        "{index} | {draw:.5} | {absent} | {present} | {production} | {cost:.2} | {profit:.2} | {cumulative:.2} | {hits}",
        index = row.index,
        draw = row.draw,
        absent = row.absentee_count,
        present = row.present_count,
        production = if row.production_occurred { "Yes" } else { "No" },
        cost = row.total_cost,
        profit = row.profit,
        cumulative = row.cumulative_profit,
        hits = row.threshold_hit_count,
    )
}

/// Rows within `[from, to]` plus the last row when it lies past the window.
pub fn select_rows(rows: &[TrialRecord], window: Option<(usize, usize)>) -> Vec<TrialRecord> {
    let Some((from, to)) = window else {
        return rows.to_vec();
    };
    let (lo, hi) = (from.min(to), from.max(to));
    let mut selected: Vec<TrialRecord> = rows
        .iter()
        .filter(|row| (lo..=hi).contains(&row.index))
        .cloned()
        .collect();
    if let Some(last) = rows.last() {
        if last.index > hi {
            selected.push(last.clone());
        }
    }
    selected
}
