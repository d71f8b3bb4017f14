//! The `mirror library` command.

use std::path::PathBuf;

use anyhow::Result;

use mirror_core::model::{Archetype, Chakra};

use crate::commands::{find_archetype, load_reference};
use crate::display::{archetype_detail, library_table};

pub async fn execute(
    id: Option<String>,
    chakra: Option<Chakra>,
    data: Option<PathBuf>,
) -> Result<()> {
    let data = load_reference(data).await?;

    match (id, chakra) {
        (Some(id), _) => print!("{}", archetype_detail(find_archetype(&data, &id)?)),
        (None, Some(chakra)) => {
            let matching: Vec<Archetype> = data
                .archetypes()
                .iter()
                .filter(|a| a.chakra.contains(&chakra))
                .cloned()
                .collect();
            println!(
                "Archetypes with the {chakra} chakra ({})",
                matching.len()
            );
            println!("{}", library_table(&matching));
        }
        (None, None) => {
            println!("Archetype Library ({} archetypes)", data.archetypes().len());
            println!("{}", library_table(data.archetypes()));
        }
    }

    Ok(())
}
