//! The `mirror init` command.

use std::path::Path;

use anyhow::{Context, Result};

use mirror_core::data::embedded_documents;
use mirror_providers::config::LOCAL_CONFIG_FILE;

const DATA_DIR: &str = "mirror-data";

pub fn execute() -> Result<()> {
    if Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
    } else {
        std::fs::write(LOCAL_CONFIG_FILE, SAMPLE_CONFIG)
            .with_context(|| format!("failed to write {LOCAL_CONFIG_FILE}"))?;
        println!("Created {LOCAL_CONFIG_FILE}");
    }

    std::fs::create_dir_all(DATA_DIR)?;
    for (file, contents) in embedded_documents() {
        let path = Path::new(DATA_DIR).join(file);
        if path.exists() {
            println!("{} already exists, skipping.", path.display());
        } else {
            std::fs::write(&path, contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Created {}", path.display());
        }
    }

    println!("\nNext steps:");
    println!("  1. Set GEMINI_API_KEY (or edit {LOCAL_CONFIG_FILE}) to enable AI summaries");
    println!("  2. Run: mirror validate --data {DATA_DIR}");
    println!("  3. Run: mirror app --data {DATA_DIR}");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# ELA Archetype Mirror configuration

default_provider = "gemini"
default_model = "gemini-2.5-flash-lite"
# data_dir = "./mirror-data"
output_dir = "./mirror-reports"

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.anthropic]
type = "anthropic"
api_key = "${ANTHROPIC_API_KEY}"

[scoring]
fallback_primary = "pleaser"
fallback_secondary = "achiever"
"#;
