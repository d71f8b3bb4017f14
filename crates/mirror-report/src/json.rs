//! JSON report exporter.

use anyhow::{Context, Result};

use mirror_core::report::ReportPayload;
use mirror_core::traits::ReportExporter;

/// Writes the raw payload as pretty-printed JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl ReportExporter for JsonExporter {
    fn name(&self) -> &str {
        "json"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn render(&self, payload: &ReportPayload) -> Result<String> {
        serde_json::to_string_pretty(payload).context("failed to serialize report")
    }
}
