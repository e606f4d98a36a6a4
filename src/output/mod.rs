//! Output module for rendering crawl reports
//!
//! This module handles:
//! - The report type produced by a finished crawl
//! - Summary statistics
//! - Rendering as text, JSON or markdown, to stdout or a file

mod json;
mod markdown;
mod report;
pub mod stats;
mod text;

pub use json::format_json_report;
pub use markdown::format_markdown_report;
pub use report::{CrawlReport, ReportFormat};
pub use stats::ReportStats;
pub use text::format_text_report;

use crate::CheckError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Renders a report in the requested format
pub fn render_report(report: &CrawlReport, format: ReportFormat) -> Result<String, CheckError> {
    Ok(match format {
        ReportFormat::Text => format_text_report(report),
        ReportFormat::Json => format_json_report(report)?,
        ReportFormat::Markdown => format_markdown_report(report),
    })
}

/// Renders a report and writes it to `path`, or to stdout if no path is given
///
/// # Arguments
///
/// * `report` - The finished crawl report
/// * `format` - Output format
/// * `path` - Destination file; created or truncated
///
/// # Returns
///
/// * `Ok(())` - Report written
/// * `Err(CheckError)` - Serialization or IO failed
pub fn write_report(
    report: &CrawlReport,
    format: ReportFormat,
    path: Option<&Path>,
) -> Result<(), CheckError> {
    let rendered = render_report(report, format)?;

    match path {
        Some(path) => {
            let mut file = File::create(path)?;
            file.write_all(rendered.as_bytes())?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(rendered.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}
