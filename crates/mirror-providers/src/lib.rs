//! mirror-providers: AI summary provider integrations.
//!
//! Implements the `SummaryProvider` trait for Gemini and Anthropic, and
//! loads the `mirror.toml` configuration that selects between them.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;

pub use config::{create_provider, load_config, MirrorConfig, ProviderConfig};
pub use error::ProviderError;
