use std::io::IsTerminal;
use std::time::Duration;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// What a read-only run (decode or parse-json) measured.
#[derive(Debug, Clone, Copy)]
pub struct RunReport<'a> {
    pub command: &'a str,
    pub input: &'a str,
    /// Unit counted by `records`, e.g. "msgpack frames".
    pub unit: &'a str,
    pub records: u64,
    pub bytes: u64,
    pub elapsed: Duration,
}

impl RunReport<'_> {
    fn records_per_sec(&self) -> f64 {
        per_second(self.records as f64, self.elapsed)
    }

    fn mib_per_sec(&self) -> f64 {
        per_second(self.bytes as f64 / (1024.0 * 1024.0), self.elapsed)
    }
}

fn per_second(amount: f64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        amount / secs
    } else {
        0.0
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    command: &'a str,
    input: &'a str,
    unit: &'a str,
    records: u64,
    bytes: u64,
    elapsed_ms: f64,
    records_per_sec: f64,
    mib_per_sec: f64,
}

pub fn print_report(report: &RunReport<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = ReportOutput {
                command: report.command,
                input: report.input,
                unit: report.unit,
                records: report.records,
                bytes: report.bytes,
                elapsed_ms: report.elapsed.as_secs_f64() * 1000.0,
                records_per_sec: report.records_per_sec(),
                mib_per_sec: report.mib_per_sec(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["COMMAND", "INPUT", "RECORDS", "BYTES", "ELAPSED", "RATE"])
                .add_row(vec![
                    report.command.to_string(),
                    report.input.to_string(),
                    report.records.to_string(),
                    report.bytes.to_string(),
                    format!("{:.3}s", report.elapsed.as_secs_f64()),
                    format!("{:.0}/s", report.records_per_sec()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{}", pretty_line(report));
        }
    }
}

fn pretty_line(report: &RunReport<'_>) -> String {
    format!(
        "parsed a total of {} {} from {} in {:.3}s ({:.0} records/s, {:.1} MiB/s)",
        report.records,
        report.unit,
        report.input,
        report.elapsed.as_secs_f64(),
        report.records_per_sec(),
        report.mib_per_sec()
    )
}
