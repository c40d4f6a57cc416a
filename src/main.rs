use clap::Parser;
use std::path::{Path, PathBuf};

mod chart;
mod diagnostics;
mod model;
mod report;
mod table;

pub type Result<T> = anyhow::Result<T>;

use diagnostics::Diagnostics;

#[derive(Parser)]
#[command(name = "zotbank-analysis")]
#[command(about = "ZotBank log analyzer: console summary + chart images", long_about = None)]
struct Cli {
    /// Aggregate command-count summary log.
    #[arg(long, default_value = "logs/log_summary.csv")]
    summary: PathBuf,

    /// Per-customer timing log.
    #[arg(long, default_value = "logs/per_customer_log.csv")]
    customers: PathBuf,

    /// Directory the chart images are written into.
    #[arg(short = 'o', long, default_value = "logs")]
    out_dir: PathBuf,

    /// Optional machine-readable export of the extracted records.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let mut diag = Diagnostics::new();

    diag.info("Starting analysis...");
    run(&cli, &mut diag);

    // Diagnostics are the only signal of partial failure; the run itself
    // always completes and exits successfully.
    if diag.error_count() > 0 {
        diag.info(format!("Analysis complete with {} error(s).", diag.error_count()));
    } else {
        diag.info("Analysis complete.");
    }
}

/// Fixed-sequence orchestration. The branches are independent: a missing or
/// broken input skips its own reports only, and nothing here is fatal.
fn run(cli: &Cli, diag: &mut Diagnostics) {
    let mut export = model::Export::default();

    if let Some(summary) = table::load(&cli.summary, diag) {
        export.summary = report::print_summary(&summary, diag);
    }

    if let Some(customers) = table::load(&cli.customers, diag) {
        chart::plot_timeline(&customers, &cli.out_dir.join(chart::TIMELINE_FILE), diag);
        if let Some(records) = chart::plot_per_customer(&customers, &cli.out_dir, diag) {
            export.customers = records;
        }
    }

    if let Some(path) = &cli.json {
        write_export(path, &export, diag);
    }
}

fn write_export(path: &Path, export: &model::Export, diag: &mut Diagnostics) {
    let result = serde_json::to_string_pretty(export)
        .map_err(anyhow::Error::from)
        .and_then(|text| std::fs::write(path, text).map_err(anyhow::Error::from));

    match result {
        Ok(()) => diag.info(format!("Export written to: {}", path.display())),
        Err(err) => diag.error(format!(
            "Failed to write export {}: {:#}",
            path.display(),
            err
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnostics::Severity;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io::Write;

    fn write_file(path: &Path, text: &str) {
        let mut file = fs::File::create(path).expect("create fixture");
        file.write_all(text.as_bytes()).expect("write fixture");
    }

    fn cli_for(dir: &Path) -> Cli {
        Cli {
            summary: dir.join("log_summary.csv"),
            customers: dir.join("per_customer_log.csv"),
            out_dir: dir.to_path_buf(),
            json: None,
        }
    }

    #[test]
    fn both_inputs_missing_is_two_warnings_and_no_artifacts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut diag = Diagnostics::new();

        run(&cli_for(dir.path()), &mut diag);

        assert_eq!(diag.events.len(), 2);
        assert!(diag.events.iter().all(|e| e.severity == Severity::Warn));
        assert!(!dir.path().join(chart::TIMELINE_FILE).exists());
    }

    #[test]
    fn broken_summary_does_not_block_customer_charts() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cli = cli_for(dir.path());
        write_file(&cli.summary, "A,B\n1,2,3\n");
        write_file(
            &cli.customers,
            "CustomerID,WaitTime,RetryCount,ArrivalTime,TurnaroundTime\nC1,5,0,100,120\n",
        );

        let mut diag = Diagnostics::new();
        run(&cli, &mut diag);

        assert_eq!(diag.error_count(), 1);
        assert!(dir.path().join(chart::TIMELINE_FILE).exists());
        assert!(dir.path().join(chart::customers::WAIT_FILE).exists());
    }

    #[test]
    fn full_run_writes_all_artifacts_and_the_export() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut cli = cli_for(dir.path());
        cli.json = Some(dir.path().join("export.json"));

        write_file(
            &cli.summary,
            "Timestamp,Total Requests,Total Releases,Total Denied,Safe Requests,\
             Unsafe Requests,Denied Need,Denied Availability,Denied Unsafe,request\n\
             2024-01-01T00:00:00,10,8,2,7,3,1,1,0,12\n",
        );
        write_file(
            &cli.customers,
            "CustomerID,WaitTime,RetryCount,ArrivalTime,TurnaroundTime\n\
             C1,5,0,100,120\nC2,3,1,90,110\n",
        );

        let mut diag = Diagnostics::new();
        run(&cli, &mut diag);

        assert_eq!(diag.error_count(), 0);
        for file in [
            chart::TIMELINE_FILE,
            chart::customers::WAIT_FILE,
            chart::customers::RETRIES_FILE,
            chart::customers::TURNAROUND_FILE,
        ] {
            assert!(dir.path().join(file).exists(), "missing {}", file);
        }

        let export: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("export.json")).unwrap())
                .expect("parse export");
        assert_eq!(export["summary"]["total_requests"], 10);
        assert_eq!(export["customers"][1]["customer_id"], "C2");
    }
}
