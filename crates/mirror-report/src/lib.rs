//! mirror-report: report exporters.
//!
//! Renders a `ReportPayload` as a self-contained printable HTML document,
//! Markdown, or raw JSON.

pub mod content;
pub mod html;
pub mod json;
pub mod markdown;

use anyhow::{bail, Result};

use mirror_core::traits::ReportExporter;

pub use html::HtmlExporter;
pub use json::JsonExporter;
pub use markdown::MarkdownExporter;

/// Format names accepted by [`exporter_for`].
pub const FORMATS: [&str; 3] = ["html", "markdown", "json"];

/// Pick the exporter for a format name.
pub fn exporter_for(format: &str) -> Result<Box<dyn ReportExporter>> {
    match format.trim().to_ascii_lowercase().as_str() {
        "html" => Ok(Box::new(HtmlExporter)),
        "markdown" | "md" => Ok(Box::new(MarkdownExporter)),
        "json" => Ok(Box::new(JsonExporter)),
        other => bail!(
            "unknown report format '{other}', expected one of: {}",
            FORMATS.join(", ")
        ),
    }
}

/// Parse a comma-separated format list, or `all`.
pub fn exporters_for(formats: &str) -> Result<Vec<Box<dyn ReportExporter>>> {
    if formats.trim().eq_ignore_ascii_case("all") {
        return FORMATS.iter().map(|f| exporter_for(f)).collect();
    }
    let mut exporters: Vec<Box<dyn ReportExporter>> = Vec::new();
    for format in formats.split(',').filter(|f| !f.trim().is_empty()) {
        let exporter = exporter_for(format)?;
        if exporters.iter().any(|e| e.name() == exporter.name()) {
            tracing::debug!(format = exporter.name(), "duplicate report format ignored");
            continue;
        }
        exporters.push(exporter);
    }
    if exporters.is_empty() {
        bail!("no report format given");
    }
    Ok(exporters)
}
