//! The `mirror chakra-map` command.

use std::path::PathBuf;

use anyhow::Result;

use mirror_core::chakra::{chakra_map, resolve_result};
use mirror_core::model::ArchetypeResult;

use crate::commands::load_reference;
use crate::display::chakra_table;

pub async fn execute(primary: String, secondary: Option<String>, data: Option<PathBuf>) -> Result<()> {
    let data = load_reference(data).await?;
    let secondary = secondary.unwrap_or_else(|| primary.clone());

    let resolved = resolve_result(&ArchetypeResult::new(primary, secondary), &data)?;
    let labels: Vec<&str> = resolved.result.chakra.iter().map(|c| c.label()).collect();

    println!(
        "Chakra map for {} + {}",
        resolved.primary.mask_name, resolved.secondary.mask_name
    );
    println!("Your chakras: {}", labels.join(", "));
    println!("{}", chakra_table(&chakra_map(&data, &resolved.result), &data));
    Ok(())
}
