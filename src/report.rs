//! Console rendering of the aggregate command summary.

use crate::diagnostics::Diagnostics;
use crate::model::{COMMAND_VOCABULARY, SummaryRecord};
use crate::table::Table;

use std::fmt::Write;

/// Label column width of the required block, sized to the widest label.
const LABEL_WIDTH: usize = 21;
/// Label column width of the command-count block.
const COMMAND_WIDTH: usize = 10;

/// Validate, format and print the summary report.
///
/// Returns the extracted record so the caller can reuse it (JSON export).
/// An empty table is a warning, a schema violation is an error; both skip the
/// report without failing the run.
pub fn print_summary(table: &Table, diag: &mut Diagnostics) -> Option<SummaryRecord> {
    let record = summarize(table, diag)?;
    print!("{}", format_summary(&record));
    Some(record)
}

/// Extract the summary record, routing failures into diagnostics.
pub fn summarize(table: &Table, diag: &mut Diagnostics) -> Option<SummaryRecord> {
    if table.is_empty() {
        diag.warn("No data in log_summary.csv.");
        return None;
    }
    match SummaryRecord::from_table(table) {
        Ok(record) => Some(record),
        Err(err) => {
            diag.error(format!("{:#}", err));
            None
        }
    }
}

/// Render the report text. Pure function of the record, so identical input
/// yields byte-identical output.
pub fn format_summary(record: &SummaryRecord) -> String {
    let mut out = String::new();

    out.push_str("\n===== COMMAND SUMMARY =====\n");

    let lines: [(&str, String); 9] = [
        ("Timestamp", record.timestamp.clone()),
        ("Total Requests", record.total_requests.to_string()),
        ("Total Releases", record.total_releases.to_string()),
        ("Denied Requests", record.total_denied.to_string()),
        ("Safe Requests", record.safe_requests.to_string()),
        ("Unsafe Requests", record.unsafe_requests.to_string()),
        ("Denied (Need)", record.denied_need.to_string()),
        ("Denied (Availability)", record.denied_availability.to_string()),
        ("Denied (Unsafe)", record.denied_unsafe.to_string()),
    ];
    for (label, value) in lines {
        let _ = writeln!(out, "{:<width$}: {}", label, value, width = LABEL_WIDTH);
    }

    out.push_str("\nCommand Counts:\n");
    // Vocabulary order, skipping names absent from the input row.
    for name in COMMAND_VOCABULARY {
        if let Some(count) = record.command_counts.get(name) {
            let _ = writeln!(out, "  {:<width$}: {}", name, count, width = COMMAND_WIDTH);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::table::load::parse_str;
    use pretty_assertions::assert_eq;

    fn summary_table() -> Table {
        parse_str(
            "Timestamp,Total Requests,Total Releases,Total Denied,Safe Requests,\
             Unsafe Requests,Denied Need,Denied Availability,Denied Unsafe,request,unknown\n\
             2024-01-01T00:00:00,10,8,2,7,3,1,1,0,12,2\n",
        )
        .expect("parse summary fixture")
    }

    #[test]
    fn required_block_uses_fixed_label_alignment() {
        let mut diag = Diagnostics::new();
        let record = summarize(&summary_table(), &mut diag).expect("extract record");
        let text = format_summary(&record);

        assert!(text.contains("Total Requests       : 10\n"));
        assert!(text.contains("Denied Requests      : 2\n"));
        assert!(text.contains("Denied (Availability): 1\n"));
        assert!(diag.events.is_empty());
    }

    #[test]
    fn field_order_is_fixed() {
        let mut diag = Diagnostics::new();
        let record = summarize(&summary_table(), &mut diag).expect("extract record");
        let text = format_summary(&record);

        let labels = [
            "Timestamp",
            "Total Requests",
            "Total Releases",
            "Denied Requests",
            "Safe Requests",
            "Unsafe Requests",
            "Denied (Need)",
            "Denied (Availability)",
            "Denied (Unsafe)",
        ];
        let positions: Vec<usize> = labels
            .iter()
            .map(|l| text.find(l).expect("label present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn command_counts_skip_absent_names() {
        let mut diag = Diagnostics::new();
        let record = summarize(&summary_table(), &mut diag).expect("extract record");
        let text = format_summary(&record);

        assert!(text.contains("  request   : 12\n"));
        assert!(text.contains("  unknown   : 2\n"));
        assert!(!text.contains("undo"));
        assert!(!text.contains("wildcard-query"));
    }

    #[test]
    fn output_is_deterministic() {
        let mut diag = Diagnostics::new();
        let record = summarize(&summary_table(), &mut diag).expect("extract record");
        assert_eq!(format_summary(&record), format_summary(&record));
    }

    #[test]
    fn empty_table_is_one_warning_and_no_report() {
        let table = parse_str("Timestamp,Total Requests\n").expect("parse fixture");
        let mut diag = Diagnostics::new();

        assert!(summarize(&table, &mut diag).is_none());
        assert_eq!(diag.events.len(), 1);
        assert_eq!(diag.events[0].severity, Severity::Warn);
    }

    #[test]
    fn schema_violation_is_one_error_and_no_report() {
        let table = parse_str("Timestamp,Total Requests\n2024-01-01T00:00:00,10\n")
            .expect("parse fixture");
        let mut diag = Diagnostics::new();

        assert!(summarize(&table, &mut diag).is_none());
        assert_eq!(diag.events.len(), 1);
        assert_eq!(diag.events[0].severity, Severity::Error);
        assert!(diag.events[0].message.contains("schema violation"));
    }
}
