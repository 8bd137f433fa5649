//! Output formatting for check results.

use anyhow::Result;

use super::check::CheckReport;
use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(report: &CheckReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
    }
    Ok(())
}

fn print_text(report: &CheckReport) {
    for outcome in &report.results {
        match &outcome.error {
            None => println!("\x1b[32mpassed\x1b[0m {} for {}", outcome.rule, report.artifact),
            Some(err) => {
                println!("\x1b[31mfailed\x1b[0m {} for {}", outcome.rule, report.artifact);
                eprintln!("{:?}", miette::Report::new(err.clone()));
            }
        }
    }

    let failed = report.results.iter().filter(|r| !r.passed).count();
    let summary_color = if failed > 0 { "\x1b[31m" } else { "\x1b[32m" };

    println!(
        "{}{} rule(s) checked, {} failed\x1b[0m",
        summary_color,
        report.results.len(),
        failed
    );
}

fn print_json(report: &CheckReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
