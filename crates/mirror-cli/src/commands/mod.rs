//! Subcommand implementations.

pub mod app;
pub mod chakra_map;
pub mod init;
pub mod library;
pub mod list_models;
pub mod pairing;
pub mod quiz;
pub mod validate;

use std::path::PathBuf;

use anyhow::{Context, Result};

use mirror_core::data::{DataSource, ReferenceData};
use mirror_core::model::Archetype;

/// Load reference data from `--data`, or the embedded documents.
pub(crate) async fn load_reference(data: Option<PathBuf>) -> Result<ReferenceData> {
    let source = DataSource::from_option(data);
    source
        .load()
        .await
        .with_context(|| match &source {
            DataSource::Embedded => "failed to load embedded reference data".to_string(),
            DataSource::Directory(dir) => {
                format!("failed to load reference data from {}", dir.display())
            }
        })
}

/// Look up an archetype by id, with a helpful error.
pub(crate) fn find_archetype<'a>(data: &'a ReferenceData, id: &str) -> Result<&'a Archetype> {
    data.archetype(id).with_context(|| {
        let known: Vec<&str> = data.archetypes().iter().map(|a| a.id.as_str()).collect();
        format!("unknown archetype '{id}'. Known ids: {}", known.join(", "))
    })
}
