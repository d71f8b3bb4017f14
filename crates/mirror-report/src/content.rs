//! Format-independent report content.
//!
//! Every exporter renders the same sequence of blocks so that the HTML and
//! Markdown reports never drift apart.

use mirror_core::model::Chakra;
use mirror_core::report::ReportPayload;

pub const TITLE: &str = "The ELA Archetype Mirror Report";

pub const ATTRIBUTION: &str = "Based on \u{2018}The Goddess Within\u{2019} by Jennifer & Roger Woolger (1989), adapted within the Emotional Legacy Ascension (ELA) modality by Metro Munk.";

pub const EXPLANATION: [&str; 6] = [
    "Masks are living archetypes: a single word to describe your winning formula, or survival formula. Each one is a survival formula disguised as a personality, but they are also a clue to our gifts.",
    "Earlier, we saw how each identity was a sacred adaptation, a brilliant moment when our younger self decided, \u{2018}I\u{2019}ll be this, so I don\u{2019}t have to feel that.\u{2019}",
    "Those labels (good, strong, invisible, responsible, achiever, rebel, helper, perfect) are masks. Each one is the name your nervous system gave to a survival strategy.",
    "Archetypes are your soul\u{2019}s blueprint of energy. When we first came here, when we were born, we were untainted, each soul had their divine template of gifts and inclinations. An archetype is thus a universal psychic pattern or an inner template of energy that lives in all humans.",
    "Each of these masks began as a sacred archetype (a Lover, a Warrior, a Healer) but somewhere along the way, it got distorted. As trauma happens, we use these light qualities to protect us from the wound, like a shield.",
    "The mask is not random. It\u{2019}s a divine archetype bent out of shape by fear, trauma, or unmet need. We end up identifying more with the shield than with the gold underneath. The work is not to destroy the mask, but to reclaim the archetype that lives beneath it.",
];

pub const SOMATIC_CUE: &str = "Place a hand on one of your somatic zones (e.g., chest, belly). Breathe into this area and acknowledge the protective strategy. Thank it for keeping you safe.";

pub const COPYRIGHT: &str = "\u{a9} 2025 Metro Munk All rights reserved. visit";
pub const SITE_LABEL: &str = "www.metromunk.com.au";
pub const SITE_URL: &str = "http://www.metromunk.com.au";

pub const SUMMARY_HEADING: &str = "Your Personalized Insight";

/// One piece of report body content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Section(&'static str),
    Paragraph(String),
    /// A result line, e.g. "Primary Mask: The Pleaser".
    Label(String),
    /// A highlighted result line.
    Important(String),
    /// Bold lead-in above a list.
    Term(&'static str),
    List(Vec<String>),
    Chakras(Vec<Chakra>),
    /// Markdown text produced by the summary provider.
    Markdown(String),
}

/// Body blocks for a payload, in reading order.
pub fn body_blocks(payload: &ReportPayload) -> Vec<Block> {
    let primary = &payload.primary_archetype;
    let secondary = &payload.secondary_archetype;

    let mut blocks = vec![Block::Section("Explanation of Archetypes and Masks")];
    blocks.extend(EXPLANATION.iter().map(|p| Block::Paragraph(p.to_string())));

    blocks.extend([
        Block::Section("Your Primary Mask & Sacred Archetype"),
        Block::Label(format!("Primary Mask: {}", primary.mask_name)),
        Block::Important(format!("Sacred Archetype: {}", primary.sacred_archetype)),
        Block::Label(format!("Secondary Mask: {}", secondary.mask_name)),
        Block::Section("Emotional Themes & Core Beliefs"),
        Block::Paragraph(format!(
            "Your primary theme of '{}' is rooted in the wound of '{}'. This can manifest as limiting beliefs such as:",
            primary.theme, primary.wound
        )),
        Block::List(primary.limiting_beliefs.clone()),
        Block::Section("Somatic Map & Chakras"),
        Block::Paragraph(
            "This archetype often holds tension in the following somatic zones:".to_string(),
        ),
        Block::List(primary.somatic_zones.clone()),
        Block::Paragraph("Your dominant chakras are:".to_string()),
        Block::Chakras(payload.archetype_result.chakra.clone()),
    ]);

    if let Some(summary) = &payload.ai_summary {
        blocks.push(Block::Section(SUMMARY_HEADING));
        blocks.push(Block::Markdown(summary.clone()));
    }

    if let (Some(insight), Some(partner)) = (&payload.pairing_insight, &payload.pairing_partner) {
        blocks.extend([
            Block::Section("Archetype Pairing Summary"),
            Block::Label(format!(
                "Insight for {} + {}",
                primary.mask_name, partner.mask_name
            )),
            Block::Term("Attraction Pattern:"),
            Block::List(insight.attraction.clone()),
            Block::Term("Shadow Dance:"),
            Block::List(insight.shadow_dance.clone()),
        ]);
    }

    blocks.extend([
        Block::Section("ELA Integration Suggestions"),
        Block::Term("Journal Prompts:"),
        Block::List(vec![
            format!("How has the '{}' mask protected me?", primary.mask_name),
            format!(
                "What small step can I take to embody my '{}' light gifts?",
                primary.sacred_archetype
            ),
        ]),
        Block::Term("Somatic Cue:"),
        Block::Paragraph(SOMATIC_CUE.to_string()),
    ]);

    blocks
}

/// Subtitle line naming the reader, if a name was given.
pub fn prepared_for(payload: &ReportPayload) -> Option<String> {
    payload
        .user_name
        .as_deref()
        .map(|name| format!("Prepared for {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_core::data::ReferenceData;
    use mirror_core::model::ArchetypeResult;

    fn payload(primary: &str, secondary: &str) -> ReportPayload {
        let data = ReferenceData::embedded().unwrap();
        ReportPayload::build(
            &ArchetypeResult::new(primary, secondary),
            &data,
            None,
            None,
        )
        .unwrap()
    }

    fn sections(blocks: &[Block]) -> Vec<&'static str> {
        blocks
            .iter()
            .filter_map(|b| match b {
                Block::Section(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn sections_in_reading_order() {
        let blocks = body_blocks(&payload("pleaser", "rebel"));
        assert_eq!(
            sections(&blocks),
            vec![
                "Explanation of Archetypes and Masks",
                "Your Primary Mask & Sacred Archetype",
                "Emotional Themes & Core Beliefs",
                "Somatic Map & Chakras",
                "Archetype Pairing Summary",
                "ELA Integration Suggestions",
            ]
        );
        assert!(blocks.contains(&Block::Label(
            "Insight for The Pleaser + The Rebel".to_string()
        )));
    }

    #[test]
    fn pairing_section_omitted_without_insight() {
        let blocks = body_blocks(&payload("joker", "critic"));
        assert!(!sections(&blocks).contains(&"Archetype Pairing Summary"));
    }

    #[test]
    fn summary_section_follows_chakras() {
        let payload = payload("achiever", "lonewolf").with_summary("Hello **there**.");
        let blocks = body_blocks(&payload);
        let names = sections(&blocks);
        let chakras = names.iter().position(|s| *s == "Somatic Map & Chakras").unwrap();
        assert_eq!(names[chakras + 1], SUMMARY_HEADING);
        assert!(blocks.contains(&Block::Markdown("Hello **there**.".to_string())));
    }

    #[test]
    fn journal_prompts_name_the_primary() {
        let blocks = body_blocks(&payload("critic", "joker"));
        assert!(blocks.contains(&Block::List(vec![
            "How has the 'The Critic' mask protected me?".to_string(),
            "What small step can I take to embody my 'The Discerner' light gifts?".to_string(),
        ])));
    }
}
