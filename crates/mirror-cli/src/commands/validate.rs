//! The `mirror validate` command.

use std::path::PathBuf;

use anyhow::Result;

use mirror_core::data::validate_reference_data;

use crate::commands::load_reference;

pub fn summary_line(archetypes: usize, questions: usize, pairings: usize) -> String {
    format!("Reference data: {archetypes} archetypes, {questions} questions, {pairings} pairings")
}

pub async fn execute(data_dir: Option<PathBuf>) -> Result<()> {
    let data = load_reference(data_dir).await?;

    println!(
        "{}",
        summary_line(
            data.archetypes().len(),
            data.questions().len(),
            data.pairings().canonical().len()
        )
    );

    let warnings = validate_reference_data(&data);
    for w in &warnings {
        let prefix = w
            .subject
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All reference data valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
