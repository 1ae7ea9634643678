use plotters::prelude::*;
use thiserror::Error;

use crate::domain::trial::TrialRecord;

#[derive(Error, Debug)]
pub enum ProfitPlotError {
    #[error("failed to render profit chart: {0}")]
    Render(String),
}

/// Draws cumulative profit against trial number. An empty row set writes
/// nothing.
pub fn write_profit_png(output_path: &str, rows: &[TrialRecord]) -> Result<(), ProfitPlotError> {
    if rows.is_empty() {
        return Ok(());
    }

    let first_index = rows.first().map(|row| row.index).unwrap_or(1);
    let last_index = rows.last().map(|row| row.index).unwrap_or(first_index);
    let (min_profit, max_profit) = rows.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(low, high), row| (low.min(row.cumulative_profit), high.max(row.cumulative_profit)),
    );
    let padding = ((max_profit - min_profit) * 0.05).max(1.0);
    let y_range = (min_profit.min(0.0) - padding)..(max_profit.max(0.0) + padding);
    let x_range = first_index..(last_index + 1);

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ProfitPlotError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Cumulative Profit", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| ProfitPlotError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Day")
        .y_desc("Cumulative profit")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .y_label_formatter(&|value| format!("{value:.0}"))
        .draw()
        .map_err(|e| ProfitPlotError::Render(e.to_string()))?;

    let line_color = RGBColor(30, 122, 204);
    chart
        .draw_series(LineSeries::new(
            rows.iter().map(|row| (row.index, row.cumulative_profit)),
            &line_color,
        ))
        .map_err(|e| ProfitPlotError::Render(e.to_string()))?;

    root.present()
        .map_err(|e| ProfitPlotError::Render(e.to_string()))?;
    Ok(())
}
