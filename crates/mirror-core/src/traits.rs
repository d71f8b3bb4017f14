//! Capability traits for the AI summary and report export integrations.
//!
//! `SummaryProvider` is implemented by `mirror-providers` and
//! `ReportExporter` by `mirror-report`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::report::ReportPayload;

// ---------------------------------------------------------------------------
// Summary provider trait
// ---------------------------------------------------------------------------

/// Trait for text-generation backends that write personalized summaries.
#[async_trait]
pub trait SummaryProvider: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate free text for a prompt.
    async fn summarize(&self, request: &SummaryRequest) -> anyhow::Result<SummaryResponse>;

    /// List models known to work with this provider.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request for a personalized summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRequest {
    /// Model identifier (e.g. "gemini-2.5-flash-lite").
    pub model: String,
    /// The natural-language prompt.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Text returned by a summary provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Markdown-flavoured text.
    pub text: String,
    /// Model that actually produced the response.
    pub model: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}

// ---------------------------------------------------------------------------
// Report exporter trait
// ---------------------------------------------------------------------------

/// Trait for report formats.
pub trait ReportExporter: Send + Sync {
    /// Format name (e.g. "html").
    fn name(&self) -> &str;

    /// File extension without the leading dot.
    fn extension(&self) -> &str;

    /// Render the payload into the format's text representation.
    fn render(&self, payload: &ReportPayload) -> anyhow::Result<String>;

    /// Render and write the report into `dir`, returning the written path.
    fn export(&self, payload: &ReportPayload, dir: &Path) -> anyhow::Result<PathBuf> {
        use anyhow::Context;

        let content = self.render(payload)?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let path = dir.join(format!("{}.{}", payload.file_stem(), self.extension()));
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        tracing::info!(format = self.name(), "report written to {}", path.display());
        Ok(path)
    }
}
