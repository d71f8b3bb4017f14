//! Console rendering shared by the interactive app and one-shot commands.

use comfy_table::{Cell, Table};

use mirror_core::chakra::{ChakraMapEntry, ResolvedResult};
use mirror_core::data::ReferenceData;
use mirror_core::model::{Archetype, Chakra};
use mirror_core::scoring::{rank, TestScore};

pub const APP_TITLE: &str = "ELA Archetype Mirror";
pub const TAGLINE: &str =
    "Discover the mask you created to stay safe\u{2026} and the sacred archetype beneath.";

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        out.push_str(&format!("    - {item}\n"));
    }
}

fn chakra_labels(chakras: &[Chakra]) -> String {
    chakras
        .iter()
        .map(Chakra::label)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Short card used on the results screen.
pub fn archetype_card(title: &str, archetype: &Archetype) -> String {
    format!(
        "{title}: {}\n  Sacred Archetype: {}\n  Wound: {}\n  Theme: {}\n",
        archetype.mask_name, archetype.sacred_archetype, archetype.wound, archetype.theme
    )
}

/// Full description used by the library detail view.
pub fn archetype_detail(archetype: &Archetype) -> String {
    let mut out = format!(
        "{} ({})\n  Sacred Archetype: {}\n  Wound: {}\n  Theme: {}\n",
        archetype.mask_name,
        archetype.id,
        archetype.sacred_archetype,
        archetype.wound,
        archetype.theme
    );
    out.push_str("  Limiting Beliefs:\n");
    bullets(&mut out, &archetype.limiting_beliefs);
    out.push_str(&format!(
        "  Somatic Zones: {}\n",
        archetype.somatic_zones.join(", ")
    ));
    out.push_str(&format!("  Chakras: {}\n", chakra_labels(&archetype.chakra)));
    out.push_str("  Light Gifts:\n");
    bullets(&mut out, &archetype.light_gifts);
    out.push_str("  Integration Path:\n");
    bullets(&mut out, &archetype.integration_path);
    out
}

pub fn library_table(archetypes: &[Archetype]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Id", "Mask", "Sacred Archetype", "Chakras"]);
    for (i, archetype) in archetypes.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&archetype.id),
            Cell::new(&archetype.mask_name),
            Cell::new(&archetype.sacred_archetype),
            Cell::new(chakra_labels(&archetype.chakra)),
        ]);
    }
    table
}

/// Primary and secondary cards plus the unioned chakras.
pub fn results_text(resolved: &ResolvedResult<'_>) -> String {
    let mut out = String::from("Your Archetype Results\n\n");
    out.push_str(&archetype_card("Primary Mask", resolved.primary));
    out.push('\n');
    out.push_str(&archetype_card("Secondary Mask", resolved.secondary));
    out.push_str(&format!(
        "\nDominant chakras: {}\n",
        chakra_labels(&resolved.result.chakra)
    ));
    out
}

pub fn score_table(score: &TestScore, data: &ReferenceData) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Archetype", "Mask", "Tally"]);
    for (id, count) in rank(score) {
        let mask = data
            .archetype(&id)
            .map(|a| a.mask_name.as_str())
            .unwrap_or("(unknown)");
        table.add_row(vec![Cell::new(&id), Cell::new(mask), Cell::new(count)]);
    }
    table
}

/// Pairing insight for `(a, b)` or the not-available notice.
pub fn pairing_text(data: &ReferenceData, a: &Archetype, b: &Archetype) -> String {
    let mut out = format!(
        "Archetype Pairing\n  My Archetype: {}\n  Their Archetype: {}\n\n",
        a.mask_name, b.mask_name
    );
    match data.pairing(&a.id, &b.id) {
        Some(insight) => {
            for (title, items) in insight.sections() {
                out.push_str(&format!("{title}\n"));
                bullets(&mut out, items);
            }
        }
        None => {
            out.push_str(&format!(
                "Insight for this specific pairing is not yet available. Please check one of the {} primary pairings.\n",
                data.pairings().canonical().len()
            ));
            let partners = available_partners(data, &a.id);
            if !partners.is_empty() {
                out.push_str(&format!(
                    "Pairings available for {}: {}\n",
                    a.mask_name,
                    partners.join(", ")
                ));
            }
        }
    }
    out
}

/// Mask names of every archetype with a listed pairing for `id`.
fn available_partners<'a>(data: &'a ReferenceData, id: &str) -> Vec<&'a str> {
    data.pairings()
        .involving(id)
        .filter_map(|insight| insight.partner_of(id))
        .filter_map(|partner| data.archetype(partner))
        .map(|partner| partner.mask_name.as_str())
        .collect()
}

pub fn chakra_table(entries: &[ChakraMapEntry], data: &ReferenceData) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Chakra", "Colour", "Yours", "Archetypes"]);
    for entry in entries {
        let masks: Vec<&str> = entry
            .archetypes
            .iter()
            .filter_map(|id| data.archetype(id))
            .map(|a| a.mask_name.as_str())
            .collect();
        table.add_row(vec![
            Cell::new(entry.chakra.label()),
            Cell::new(&entry.colour),
            Cell::new(if entry.active { "\u{25cf}" } else { "" }),
            Cell::new(masks.join(", ")),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use mirror_core::chakra::{chakra_map, resolve_result};
    use mirror_core::model::ArchetypeResult;

    #[test]
    fn pairing_text_lists_all_sections() {
        let data = ReferenceData::embedded().unwrap();
        let a = data.archetype("lonewolf").unwrap();
        let b = data.archetype("achiever").unwrap();
        let text = pairing_text(&data, a, b);
        assert!(text.contains("My Archetype: The Lone Wolf"));
        for title in [
            "Attraction Pattern",
            "Shadow Dance",
            "Trigger Loop",
            "Light-Side Potential",
            "Integration Practices",
        ] {
            assert!(text.contains(title), "missing {title}");
        }
    }

    #[test]
    fn pairing_text_reports_missing_insight() {
        let data = ReferenceData::embedded().unwrap();
        let a = data.archetype("joker").unwrap();
        let b = data.archetype("critic").unwrap();
        let text = pairing_text(&data, a, b);
        assert!(text.contains("not yet available"));
        assert!(text.contains("one of the 14 primary pairings"));
        assert!(text.contains("Pairings available for The Joker: The Martyr, The Perfectionist"));
    }

    #[test]
    fn chakra_table_marks_active_rows() {
        let data = ReferenceData::embedded().unwrap();
        let resolved = resolve_result(&ArchetypeResult::new("rebel", "pleaser"), &data).unwrap();
        let rendered = chakra_table(&chakra_map(&data, &resolved.result), &data).to_string();
        assert!(rendered.contains("Third Eye"));
        assert!(rendered.contains("The Intellectual"));
        assert_eq!(rendered.matches('\u{25cf}').count(), 3);
    }

    #[test]
    fn results_text_names_both_masks() {
        let data = ReferenceData::embedded().unwrap();
        let resolved = resolve_result(&ArchetypeResult::new("achiever", "rebel"), &data).unwrap();
        let text = results_text(&resolved);
        assert!(text.contains("Primary Mask: The Achiever"));
        assert!(text.contains("Secondary Mask: The Rebel"));
        assert!(text.contains("Dominant chakras: Solar Plexus, Root"));
    }
}
