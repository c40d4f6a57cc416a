//! Per-customer bar charts: wait time, retry count, turnaround time.

use crate::Result;
use crate::chart::ChartStyle;
use crate::chart::canvas::Canvas;
use crate::diagnostics::Diagnostics;
use crate::model::{self, CustomerRecord};
use crate::table::Table;

use anyhow::anyhow;
use plotters::prelude::*;
use plotters::style::RGBColor;
use std::path::Path;

pub const WAIT_FILE: &str = "per_customer_wait.png";
pub const RETRIES_FILE: &str = "per_customer_retries.png";
pub const TURNAROUND_FILE: &str = "per_customer_turnaround.png";

/// Cap on per-bar axis labels before they start to overlap.
const MAX_BAR_LABELS: usize = 24;

/// Render the three per-customer bar charts into `out_dir`.
///
/// The table is reinterpreted positionally (five fixed columns); bar categories
/// are CustomerID in file order, not re-sorted. Each chart succeeds or fails on
/// its own so one bad artifact never hides the other two. Returns the extracted
/// records for reuse by the caller.
pub fn plot_per_customer(
    table: &Table,
    out_dir: &Path,
    diag: &mut Diagnostics,
) -> Option<Vec<CustomerRecord>> {
    if table.is_empty() {
        diag.warn("No data in per_customer_log.csv.");
        return None;
    }

    let records = match model::customer_records(table) {
        Ok(records) => records,
        Err(err) => {
            diag.error(format!("{:#}", err));
            return None;
        }
    };

    let ids: Vec<String> = records.iter().map(|r| r.customer_id.clone()).collect();
    let charts: [(&str, &str, &str, RGBColor, Vec<f64>); 3] = [
        (
            WAIT_FILE,
            "Per-Customer Wait Time",
            "Wait Time (s)",
            ChartStyle::WAIT_FILL,
            records.iter().map(|r| r.wait_time).collect(),
        ),
        (
            RETRIES_FILE,
            "Per-Customer Retry Count",
            "Retries",
            ChartStyle::RETRY_FILL,
            records.iter().map(|r| r.retry_count as f64).collect(),
        ),
        (
            TURNAROUND_FILE,
            "Per-Customer Turnaround Time",
            "Turnaround Time (s)",
            ChartStyle::TURNAROUND_FILL,
            records.iter().map(|r| r.turnaround_time).collect(),
        ),
    ];

    for (file, title, y_desc, fill, values) in charts {
        let path = out_dir.join(file);
        match render_bar_chart(&ids, &values, title, y_desc, fill, &path) {
            Ok(()) => diag.info(format!("Per-customer chart saved to: {}", path.display())),
            Err(err) => diag.error(format!(
                "Plotting failed for {}: {:#}",
                path.display(),
                err
            )),
        }
    }

    Some(records)
}

fn render_bar_chart(
    ids: &[String],
    values: &[f64],
    title: &str,
    y_desc: &str,
    fill: RGBColor,
    path: &Path,
) -> Result<()> {
    let y_top = values.iter().copied().fold(0.0f64, f64::max);
    let y_top = if y_top > 0.0 { y_top * 1.1 } else { 1.0 };
    let bars = ids.len() as u32;

    let mut canvas = Canvas::new(ChartStyle::WIDTH_PX, ChartStyle::HEIGHT_PX);
    {
        let area = canvas.drawing_area()?;

        let mut chart = ChartBuilder::on(&area)
            .margin(ChartStyle::MARGIN)
            .caption(
                title,
                (ChartStyle::CAPTION_FONT_FAMILY, ChartStyle::CAPTION_FONT_SIZE),
            )
            .x_label_area_size(ChartStyle::X_LABEL_AREA_SIZE)
            .y_label_area_size(ChartStyle::Y_LABEL_AREA_SIZE)
            .build_cartesian_2d((0u32..bars).into_segmented(), 0.0..y_top)
            .map_err(|err| anyhow!("chart build error: {:?}", err))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(ids.len().min(MAX_BAR_LABELS))
            .y_labels(ChartStyle::Y_LABEL_COUNT)
            .x_label_formatter(&|seg| match seg {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => {
                    ids.get(*i as usize).cloned().unwrap_or_default()
                }
                SegmentValue::Last => String::new(),
            })
            .x_desc("Customer ID")
            .y_desc(y_desc)
            .draw()
            .map_err(|err| anyhow!("mesh draw error: {:?}", err))?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(fill.filled())
                    .margin(3)
                    .data(values.iter().enumerate().map(|(i, v)| (i as u32, *v))),
            )
            .map_err(|err| anyhow!("series draw error: {:?}", err))?;

        area.present()
            .map_err(|err| anyhow!("present error: {:?}", err))?;
    }

    canvas.save(path)
}
