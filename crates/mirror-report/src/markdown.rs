//! Markdown report exporter.

use anyhow::Result;

use mirror_core::report::ReportPayload;
use mirror_core::traits::ReportExporter;

use crate::content::{
    body_blocks, prepared_for, Block, ATTRIBUTION, COPYRIGHT, SITE_LABEL, SITE_URL, TITLE,
};

/// Render a payload as a Markdown document.
pub fn to_markdown(payload: &ReportPayload) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {TITLE}\n\n"));
    md.push_str(&format!("_{ATTRIBUTION}_\n\n"));
    if let Some(line) = prepared_for(payload) {
        md.push_str(&format!("{line}\n\n"));
    }
    md.push_str(&format!("**Date:** {}\n\n", payload.date_label()));

    for block in body_blocks(payload) {
        match block {
            Block::Section(title) => md.push_str(&format!("## {title}\n\n")),
            Block::Paragraph(text) | Block::Label(text) => md.push_str(&format!("{text}\n\n")),
            Block::Important(text) => md.push_str(&format!("**{text}**\n\n")),
            Block::Term(text) => md.push_str(&format!("**{text}**\n\n")),
            Block::List(items) => {
                for item in &items {
                    md.push_str(&format!("- {item}\n"));
                }
                md.push('\n');
            }
            Block::Chakras(chakras) => {
                for chakra in &chakras {
                    md.push_str(&format!("- {chakra}\n"));
                }
                md.push('\n');
            }
            Block::Markdown(text) => {
                md.push_str(text.trim());
                md.push_str("\n\n");
            }
        }
    }

    md.push_str("---\n\n");
    md.push_str(&format!("_{COPYRIGHT} [{SITE_LABEL}]({SITE_URL})._\n"));
    md
}

/// Markdown exporter.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownExporter;

impl ReportExporter for MarkdownExporter {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extension(&self) -> &str {
        "md"
    }

    fn render(&self, payload: &ReportPayload) -> Result<String> {
        Ok(to_markdown(payload))
    }
}
