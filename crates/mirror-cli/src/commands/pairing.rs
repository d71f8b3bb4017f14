//! The `mirror pairing` command.

use std::path::PathBuf;

use anyhow::Result;

use crate::commands::{find_archetype, load_reference};
use crate::display::pairing_text;

pub async fn execute(a: String, b: String, data: Option<PathBuf>) -> Result<()> {
    let data = load_reference(data).await?;
    let mine = find_archetype(&data, &a)?;
    let theirs = find_archetype(&data, &b)?;

    print!("{}", pairing_text(&data, mine, theirs));
    Ok(())
}
