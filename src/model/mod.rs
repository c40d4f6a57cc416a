//! Schema-checked records extracted from the loaded tables.
//!
//! The loader is schema-agnostic; this module is where each table is narrowed to
//! the contract agreed with the simulator. Required summary fields are validated
//! once, up front, producing a single error that enumerates every problem rather
//! than failing lazily field by field.

use crate::Result;
use crate::table::Table;

use anyhow::bail;
use serde::Serialize;
use std::collections::BTreeMap;

/// Required summary columns, in report order.
pub const REQUIRED_SUMMARY_COLUMNS: [&str; 9] = [
    "Timestamp",
    "Total Requests",
    "Total Releases",
    "Total Denied",
    "Safe Requests",
    "Unsafe Requests",
    "Denied Need",
    "Denied Availability",
    "Denied Unsafe",
];

/// Fixed vocabulary of command-count columns. Presence is optional per run; the
/// report only prints the names that actually appear in the summary row.
pub const COMMAND_VOCABULARY: [&str; 17] = [
    "request",
    "release",
    "wildcard-query",
    "safety",
    "reset",
    "report",
    "explain",
    "undo",
    "history",
    "help",
    "verbose",
    "color",
    "snapshot",
    "load",
    "save",
    "exit",
    "unknown",
];

/// The per-customer table is a fixed positional contract with the simulator:
/// five columns, reinterpreted regardless of header text.
pub const CUSTOMER_COLUMNS: usize = 5;

/// The single aggregate row of `log_summary.csv`.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRecord {
    pub timestamp: String,
    pub total_requests: u64,
    pub total_releases: u64,
    pub total_denied: u64,
    pub safe_requests: u64,
    pub unsafe_requests: u64,
    pub denied_need: u64,
    pub denied_availability: u64,
    pub denied_unsafe: u64,

    /// Only the command names present in the input row, keyed by name.
    pub command_counts: BTreeMap<String, u64>,
}

impl SummaryRecord {
    /// Extract the first row as the summary record.
    ///
    /// All required-field problems are collected and reported as one schema
    /// violation so the producer sees the full list at once.
    pub fn from_table(table: &Table) -> Result<SummaryRecord> {
        if table.is_empty() {
            bail!("summary table has no data row");
        }

        let mut problems: Vec<String> = Vec::new();
        for name in REQUIRED_SUMMARY_COLUMNS {
            if table.column_index(name).is_none() {
                problems.push(format!("missing column: {:?}", name));
            }
        }

        let timestamp = table
            .get(0, "Timestamp")
            .map(|v| v.to_string())
            .unwrap_or_default();

        // Absence was already recorded above; here we only flag type errors.
        let mut counter = |name: &str| -> u64 {
            match table.get(0, name) {
                Some(v) => match v.as_u64() {
                    Some(n) => n,
                    None => {
                        problems.push(format!(
                            "column {:?} is not a non-negative integer: {}",
                            name, v
                        ));
                        0
                    }
                },
                None => 0,
            }
        };

        let total_requests = counter("Total Requests");
        let total_releases = counter("Total Releases");
        let total_denied = counter("Total Denied");
        let safe_requests = counter("Safe Requests");
        let unsafe_requests = counter("Unsafe Requests");
        let denied_need = counter("Denied Need");
        let denied_availability = counter("Denied Availability");
        let denied_unsafe = counter("Denied Unsafe");

        let mut command_counts = BTreeMap::new();
        for name in COMMAND_VOCABULARY {
            let Some(v) = table.get(0, name) else {
                continue;
            };
            match v.as_u64() {
                Some(n) => {
                    command_counts.insert(name.to_string(), n);
                }
                None => problems.push(format!(
                    "command count {:?} is not a non-negative integer: {}",
                    name, v
                )),
            }
        }

        if !problems.is_empty() {
            bail!("summary schema violation: {}", problems.join("; "));
        }

        Ok(SummaryRecord {
            timestamp,
            total_requests,
            total_releases,
            total_denied,
            safe_requests,
            unsafe_requests,
            denied_need,
            denied_availability,
            denied_unsafe,
            command_counts,
        })
    }
}

/// One row of the per-customer timing log.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRecord {
    pub customer_id: String,
    pub wait_time: f64,
    pub retry_count: u64,
    pub arrival_time: f64,
    pub turnaround_time: f64,
}

/// Reinterpret the per-customer table positionally, preserving file order.
///
/// Header text is ignored; only the column count is checked. A width other than
/// five means the upstream schema changed and the data can no longer be trusted.
pub fn customer_records(table: &Table) -> Result<Vec<CustomerRecord>> {
    if table.columns.len() != CUSTOMER_COLUMNS {
        bail!(
            "per-customer schema violation: expected {} columns \
             (CustomerID, WaitTime, RetryCount, ArrivalTime, TurnaroundTime), found {}",
            CUSTOMER_COLUMNS,
            table.columns.len()
        );
    }

    let mut records = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let numeric = |col: usize, field: &str| -> crate::Result<f64> {
            match row[col].as_f64() {
                Some(x) => Ok(x),
                None => bail!(
                    "per-customer row {}: {} is not numeric: {}",
                    idx + 1,
                    field,
                    row[col]
                ),
            }
        };

        let retry_count = match row[2].as_u64() {
            Some(n) => n,
            None => bail!(
                "per-customer row {}: RetryCount is not a non-negative integer: {}",
                idx + 1,
                row[2]
            ),
        };

        records.push(CustomerRecord {
            customer_id: row[0].to_string(),
            wait_time: numeric(1, "WaitTime")?,
            retry_count,
            arrival_time: numeric(3, "ArrivalTime")?,
            turnaround_time: numeric(4, "TurnaroundTime")?,
        });
    }

    Ok(records)
}

/// Extract (arrival, turnaround) pairs for the timeline chart, stably sorted
/// ascending by arrival time. Ties keep the original file order.
///
/// Unlike the bar plotter this looks the two columns up by name; the log order
/// is completion order, not arrival order, so the series must be re-sorted.
pub fn timeline_points(table: &Table) -> Result<Vec<(f64, f64)>> {
    let mut missing = Vec::new();
    let arrival = table.column_index("ArrivalTime");
    let turnaround = table.column_index("TurnaroundTime");
    if arrival.is_none() {
        missing.push("ArrivalTime");
    }
    if turnaround.is_none() {
        missing.push("TurnaroundTime");
    }
    let (Some(arrival), Some(turnaround)) = (arrival, turnaround) else {
        bail!(
            "missing required columns in per-customer log: {}",
            missing.join(", ")
        );
    };

    let mut points = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        let (Some(x), Some(y)) = (row[arrival].as_f64(), row[turnaround].as_f64()) else {
            bail!(
                "per-customer row {}: non-numeric arrival or turnaround time",
                idx + 1
            );
        };
        points.push((x, y));
    }

    points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    Ok(points)
}

/// Machine-readable export of everything a run extracted.
#[derive(Debug, Default, Serialize)]
pub struct Export {
    pub summary: Option<SummaryRecord>,
    pub customers: Vec<CustomerRecord>,
}
