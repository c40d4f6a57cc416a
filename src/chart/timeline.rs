//! Turnaround-vs-arrival line chart.

use crate::Result;
use crate::chart::ChartStyle;
use crate::chart::canvas::Canvas;
use crate::diagnostics::Diagnostics;
use crate::model;
use crate::table::Table;

use anyhow::anyhow;
use plotters::prelude::*;
use std::path::Path;

pub const TIMELINE_FILE: &str = "resource_utilization.png";

/// Render the turnaround-time timeline to `output_path`.
///
/// Requires `ArrivalTime` and `TurnaroundTime` columns; rows are re-sorted by
/// arrival time since the log is written in completion order. Missing columns
/// or a rendering failure are reported as diagnostics and never propagate, and
/// no file is written unless the full chart rendered.
pub fn plot_timeline(table: &Table, output_path: &Path, diag: &mut Diagnostics) {
    let points = match model::timeline_points(table) {
        Ok(points) => points,
        Err(err) => {
            diag.error(format!("{:#}", err));
            return;
        }
    };
    if points.is_empty() {
        diag.warn("No data in per_customer_log.csv.");
        return;
    }

    match render(&points, output_path) {
        Ok(()) => diag.info(format!(
            "Turnaround time graph saved to: {}",
            output_path.display()
        )),
        Err(err) => diag.error(format!("Plotting failed: {:#}", err)),
    }
}

fn render(points: &[(f64, f64)], path: &Path) -> Result<()> {
    // Points are sorted by arrival, so the x range is first..last. Widen a
    // degenerate range so a single arrival time still renders.
    let mut x_start = points[0].0;
    let mut x_end = points[points.len() - 1].0;
    if x_start == x_end {
        x_start -= 1.0;
        x_end += 1.0;
    }

    let y_top = points.iter().map(|p| p.1).fold(0.0f64, f64::max);
    let y_top = if y_top > 0.0 { y_top * 1.1 } else { 1.0 };

    let mut canvas = Canvas::new(ChartStyle::WIDTH_PX, ChartStyle::HEIGHT_PX);
    {
        let area = canvas.drawing_area()?;

        let mut chart = ChartBuilder::on(&area)
            .margin(ChartStyle::MARGIN)
            .caption(
                "Turnaround Time per Customer",
                (ChartStyle::CAPTION_FONT_FAMILY, ChartStyle::CAPTION_FONT_SIZE),
            )
            .x_label_area_size(ChartStyle::X_LABEL_AREA_SIZE)
            .y_label_area_size(ChartStyle::Y_LABEL_AREA_SIZE)
            .build_cartesian_2d(x_start..x_end, 0.0..y_top)
            .map_err(|err| anyhow!("chart build error: {:?}", err))?;

        chart
            .configure_mesh()
            .y_labels(ChartStyle::Y_LABEL_COUNT)
            .x_desc("Arrival Time (timestamp)")
            .y_desc("Turnaround Time (seconds)")
            .draw()
            .map_err(|err| anyhow!("mesh draw error: {:?}", err))?;

        chart
            .draw_series(LineSeries::new(points.iter().copied(), &ChartStyle::LINE))
            .map_err(|err| anyhow!("series draw error: {:?}", err))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new(*p, ChartStyle::MARKER_SIZE, ChartStyle::LINE.filled())),
            )
            .map_err(|err| anyhow!("marker draw error: {:?}", err))?;

        area.present()
            .map_err(|err| anyhow!("present error: {:?}", err))?;
    }

    canvas.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::table::load::parse_str;
    use pretty_assertions::assert_eq;

    fn customer_table() -> Table {
        parse_str(
            "CustomerID,WaitTime,RetryCount,ArrivalTime,TurnaroundTime\n\
             C1,5,0,100,120\n\
             C2,3,1,90,110\n",
        )
        .expect("parse customer fixture")
    }

    #[test]
    fn renders_a_png_and_reports_the_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(TIMELINE_FILE);
        let mut diag = Diagnostics::new();

        plot_timeline(&customer_table(), &path, &mut diag);

        assert_eq!(diag.events.len(), 1);
        assert_eq!(diag.events[0].severity, Severity::Info);
        assert!(path.exists());
    }

    #[test]
    fn missing_columns_is_one_error_and_no_file() {
        let table = parse_str("CustomerID,WaitTime\nC1,5\n").expect("parse fixture");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(TIMELINE_FILE);
        let mut diag = Diagnostics::new();

        plot_timeline(&table, &path, &mut diag);

        assert_eq!(diag.events.len(), 1);
        assert_eq!(diag.events[0].severity, Severity::Error);
        assert!(diag.events[0].message.contains("ArrivalTime"));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_output_is_an_error_not_a_panic() {
        let mut diag = Diagnostics::new();
        plot_timeline(
            &customer_table(),
            Path::new("/nonexistent-dir/out.png"),
            &mut diag,
        );

        assert_eq!(diag.error_count(), 1);
        assert!(diag.events[0].message.contains("Plotting failed"));
    }

    #[test]
    fn single_arrival_time_still_renders() {
        let table = parse_str(
            "CustomerID,WaitTime,RetryCount,ArrivalTime,TurnaroundTime\nC1,5,0,100,120\n",
        )
        .expect("parse fixture");
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(TIMELINE_FILE);
        let mut diag = Diagnostics::new();

        plot_timeline(&table, &path, &mut diag);

        assert_eq!(diag.events[0].severity, Severity::Info);
        assert!(path.exists());
    }
}
