//! Symmetric pairing insight index.

use std::collections::HashMap;

use crate::model::PairingInsight;

/// Pairing insights keyed by both orderings of each archetype pair.
///
/// Built once when reference data is loaded. The document only needs to
/// list each pair once; the reverse entry is a relabeled copy.
#[derive(Debug, Clone, Default)]
pub struct PairingIndex {
    entries: HashMap<(String, String), PairingInsight>,
    canonical: Vec<PairingInsight>,
}

impl PairingIndex {
    /// Build the index from the canonical pairing list.
    ///
    /// If a pair is listed twice (in either order) the first listing wins.
    pub fn build(pairings: Vec<PairingInsight>) -> Self {
        let mut entries = HashMap::with_capacity(pairings.len() * 2);
        let mut canonical = Vec::with_capacity(pairings.len());

        for pairing in pairings {
            let forward = (pairing.archetype_a.clone(), pairing.archetype_b.clone());
            if entries.contains_key(&forward) {
                tracing::warn!("duplicate pairing {} ignored", pairing.pair_id);
                continue;
            }
            let reverse = (pairing.archetype_b.clone(), pairing.archetype_a.clone());
            entries.insert(reverse, pairing.relabeled());
            entries.insert(forward, pairing.clone());
            canonical.push(pairing);
        }

        Self { entries, canonical }
    }

    /// Look up the insight for a pair, in either order.
    ///
    /// The returned insight is labeled so that `archetype_a == a`.
    pub fn lookup(&self, a: &str, b: &str) -> Option<&PairingInsight> {
        self.entries.get(&(a.to_string(), b.to_string()))
    }

    /// Pairings as listed in the source document.
    pub fn canonical(&self) -> &[PairingInsight] {
        &self.canonical
    }

    /// Canonical pairings that involve the given archetype.
    pub fn involving<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a PairingInsight> + 'a {
        self.canonical
            .iter()
            .filter(move |p| p.archetype_a == id || p.archetype_b == id)
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}
