//! Chakra union and chakra map derivation.

use serde::{Deserialize, Serialize};

use crate::data::ReferenceData;
use crate::error::ResolveError;
use crate::model::{Archetype, ArchetypeResult, Chakra};

/// Deduplicating union of two chakra lists.
///
/// Primary entries come first, followed by secondary entries not already
/// present.
pub fn union_chakras(primary: &[Chakra], secondary: &[Chakra]) -> Vec<Chakra> {
    let mut merged = Vec::with_capacity(primary.len() + secondary.len());
    for chakra in primary.iter().chain(secondary) {
        if !merged.contains(chakra) {
            merged.push(*chakra);
        }
    }
    merged
}

/// A result together with the archetypes it names.
#[derive(Debug, Clone)]
pub struct ResolvedResult<'a> {
    pub result: ArchetypeResult,
    pub primary: &'a Archetype,
    pub secondary: &'a Archetype,
}

/// Resolve both archetypes of a result and fill in its chakra union.
pub fn resolve_result<'a>(
    result: &ArchetypeResult,
    data: &'a ReferenceData,
) -> Result<ResolvedResult<'a>, ResolveError> {
    let primary = data
        .archetype(&result.primary_mask_id)
        .ok_or_else(|| ResolveError::UnknownArchetype(result.primary_mask_id.clone()))?;
    let secondary = data
        .archetype(&result.secondary_mask_id)
        .ok_or_else(|| ResolveError::UnknownArchetype(result.secondary_mask_id.clone()))?;

    let mut resolved = result.clone();
    resolved.chakra = union_chakras(&primary.chakra, &secondary.chakra);

    Ok(ResolvedResult {
        result: resolved,
        primary,
        secondary,
    })
}

/// One row of the chakra map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChakraMapEntry {
    pub chakra: Chakra,
    pub colour: String,
    /// Archetype ids associated with this chakra, in reference data order.
    pub archetypes: Vec<String>,
    /// Whether the chakra is part of the result's union.
    pub active: bool,
}

/// Build the chakra map for a result, one entry per chakra in body order.
pub fn chakra_map(data: &ReferenceData, result: &ArchetypeResult) -> Vec<ChakraMapEntry> {
    Chakra::ALL
        .iter()
        .map(|chakra| ChakraMapEntry {
            chakra: *chakra,
            colour: chakra.colour().to_string(),
            archetypes: data
                .archetypes()
                .iter()
                .filter(|a| a.chakra.contains(chakra))
                .map(|a| a.id.clone())
                .collect(),
            active: result.chakra.contains(chakra),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn union_deduplicates() {
        let merged = union_chakras(
            &[Chakra::Root, Chakra::Heart],
            &[Chakra::Heart, Chakra::Crown],
        );
        assert_eq!(merged.len(), 3);
        let set: HashSet<Chakra> = merged.into_iter().collect();
        assert_eq!(
            set,
            HashSet::from([Chakra::Root, Chakra::Heart, Chakra::Crown])
        );
    }

    #[test]
    fn union_is_order_insensitive_as_a_set() {
        let a = [Chakra::Throat, Chakra::Sacral];
        let b = [Chakra::Sacral, Chakra::ThirdEye];
        let ab: HashSet<Chakra> = union_chakras(&a, &b).into_iter().collect();
        let ba: HashSet<Chakra> = union_chakras(&b, &a).into_iter().collect();
        assert_eq!(ab, ba);
    }

    #[test]
    fn union_of_same_archetype_is_its_own_list() {
        let list = [Chakra::SolarPlexus, Chakra::Heart, Chakra::Throat];
        assert_eq!(union_chakras(&list, &list), list.to_vec());
    }

    #[test]
    fn resolve_fills_chakras() {
        let data = ReferenceData::embedded().unwrap();
        let resolved = resolve_result(&ArchetypeResult::new("rebel", "pleaser"), &data).unwrap();
        assert_eq!(resolved.primary.id, "rebel");
        assert_eq!(resolved.secondary.id, "pleaser");
        assert_eq!(
            resolved.result.chakra,
            vec![Chakra::Root, Chakra::SolarPlexus, Chakra::Heart]
        );
    }

    #[test]
    fn resolve_rejects_unknown_ids() {
        let data = ReferenceData::embedded().unwrap();
        let err = resolve_result(&ArchetypeResult::new("rebel", "ghost"), &data).unwrap_err();
        assert_eq!(err, ResolveError::UnknownArchetype("ghost".into()));
    }

    #[test]
    fn map_marks_active_chakras() {
        let data = ReferenceData::embedded().unwrap();
        let resolved =
            resolve_result(&ArchetypeResult::new("perfectionist", "lonewolf"), &data).unwrap();
        let map = chakra_map(&data, &resolved.result);

        assert_eq!(map.len(), 7);
        assert_eq!(map[0].chakra, Chakra::Root);
        let active: Vec<Chakra> = map.iter().filter(|e| e.active).map(|e| e.chakra).collect();
        assert_eq!(active, vec![Chakra::Root, Chakra::Crown]);

        let crown = map.iter().find(|e| e.chakra == Chakra::Crown).unwrap();
        assert_eq!(crown.archetypes, vec!["perfectionist".to_string()]);
        let third_eye = map.iter().find(|e| e.chakra == Chakra::ThirdEye).unwrap();
        assert_eq!(third_eye.archetypes, vec!["intellectual".to_string()]);
    }
}
