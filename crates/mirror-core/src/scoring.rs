//! Answer tallying and archetype ranking.
//!
//! Scoring is a frequency count over the `mapsTo` lists of the recorded
//! answers followed by a sort. Ties are broken by archetype id ascending so
//! that the same answers always produce the same result.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::TestAnswer;

/// Per-archetype tally for one completed quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestScore(BTreeMap<String, u32>);

impl TestScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally for an archetype; unseen archetypes score zero.
    pub fn get(&self, archetype_id: &str) -> u32 {
        self.0.get(archetype_id).copied().unwrap_or(0)
    }

    /// Number of archetypes with a non-zero tally.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all tallies.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Iterate tallies in archetype id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, count)| (id.as_str(), *count))
    }

    fn increment(&mut self, archetype_id: &str) {
        *self.0.entry(archetype_id.to_string()).or_insert(0) += 1;
    }
}

/// Primary and secondary archetype ids picked from a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTwo {
    pub primary: String,
    pub secondary: String,
}

/// Scoring settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Primary archetype reported when no answer mapped to any archetype.
    #[serde(default = "default_fallback_primary")]
    pub fallback_primary: String,
    /// Secondary archetype reported when no answer mapped to any archetype.
    #[serde(default = "default_fallback_secondary")]
    pub fallback_secondary: String,
}

fn default_fallback_primary() -> String {
    "pleaser".to_string()
}

fn default_fallback_secondary() -> String {
    "achiever".to_string()
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            fallback_primary: default_fallback_primary(),
            fallback_secondary: default_fallback_secondary(),
        }
    }
}

impl ScoringConfig {
    /// The fallback pair as a `TopTwo`.
    pub fn fallback(&self) -> TopTwo {
        TopTwo {
            primary: self.fallback_primary.clone(),
            secondary: self.fallback_secondary.clone(),
        }
    }
}

/// Count how many answers mapped to each archetype.
///
/// A single answer may increment several archetypes, or none. Archetype ids
/// are not checked against the reference data here.
pub fn tally(answers: &[TestAnswer]) -> TestScore {
    let mut score = TestScore::new();
    for answer in answers {
        for archetype_id in &answer.maps_to {
            score.increment(archetype_id);
        }
    }
    score
}

/// Archetype ids sorted by tally descending, then id ascending.
pub fn rank(score: &TestScore) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = score
        .iter()
        .map(|(id, count)| (id.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// Pick the primary and secondary archetypes.
///
/// - nothing scored: the configured fallback pair
/// - one archetype scored: that archetype in both slots
/// - otherwise the first two entries of [`rank`]
pub fn top_two(score: &TestScore, config: &ScoringConfig) -> TopTwo {
    let ranked = rank(score);
    match ranked.as_slice() {
        [] => config.fallback(),
        [(only, _)] => TopTwo {
            primary: only.clone(),
            secondary: only.clone(),
        },
        [(first, _), (second, _), ..] => TopTwo {
            primary: first.clone(),
            secondary: second.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(maps_to: &[&str]) -> TestAnswer {
        TestAnswer::new("opt", maps_to.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn tally_counts_every_mapped_archetype() {
        let answers = vec![answer(&["achiever"]), answer(&["achiever"]), answer(&["rebel"])];
        let score = tally(&answers);
        assert_eq!(score.get("achiever"), 2);
        assert_eq!(score.get("rebel"), 1);
        assert_eq!(score.get("joker"), 0);
        assert_eq!(score.len(), 2);
        assert_eq!(score.total(), 3);
    }

    #[test]
    fn one_answer_can_feed_several_archetypes() {
        let score = tally(&[answer(&["pleaser", "niceone"])]);
        assert_eq!(score.get("pleaser"), 1);
        assert_eq!(score.get("niceone"), 1);
    }

    #[test]
    fn tally_ignores_answer_order() {
        let forward = vec![
            answer(&["achiever"]),
            answer(&["rebel", "lonewolf"]),
            answer(&[]),
            answer(&["achiever", "critic"]),
        ];
        let mut backward = forward.clone();
        backward.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(1);

        assert_eq!(tally(&forward), tally(&backward));
        assert_eq!(tally(&forward), tally(&rotated));
    }

    #[test]
    fn tally_is_idempotent() {
        let answers = vec![answer(&["martyr"]), answer(&["savior", "martyr"])];
        assert_eq!(tally(&answers), tally(&answers));
    }

    #[test]
    fn empty_mappings_yield_empty_score_and_fallback() {
        let answers = vec![answer(&[]), answer(&[])];
        let score = tally(&answers);
        assert!(score.is_empty());

        let top = top_two(&score, &ScoringConfig::default());
        assert_eq!(top.primary, "pleaser");
        assert_eq!(top.secondary, "achiever");
    }

    #[test]
    fn no_answers_yield_fallback() {
        let top = top_two(&tally(&[]), &ScoringConfig::default());
        assert_eq!(
            top,
            TopTwo {
                primary: "pleaser".into(),
                secondary: "achiever".into()
            }
        );
    }

    #[test]
    fn fallback_pair_is_configurable() {
        let config = ScoringConfig {
            fallback_primary: "joker".into(),
            fallback_secondary: "critic".into(),
        };
        let top = top_two(&TestScore::new(), &config);
        assert_eq!(top.primary, "joker");
        assert_eq!(top.secondary, "critic");
    }

    #[test]
    fn single_scored_archetype_fills_both_slots() {
        let top = top_two(&tally(&[answer(&["lonewolf"])]), &ScoringConfig::default());
        assert_eq!(top.primary, "lonewolf");
        assert_eq!(top.secondary, "lonewolf");
    }

    #[test]
    fn highest_tallies_win() {
        let answers = vec![answer(&["achiever"]), answer(&["achiever"]), answer(&["rebel"])];
        let top = top_two(&tally(&answers), &ScoringConfig::default());
        assert_eq!(top.primary, "achiever");
        assert_eq!(top.secondary, "rebel");
    }

    #[test]
    fn ties_break_by_id_ascending() {
        let top = top_two(
            &tally(&[answer(&["pleaser", "niceone"])]),
            &ScoringConfig::default(),
        );
        assert_eq!(top.primary, "niceone");
        assert_eq!(top.secondary, "pleaser");

        // Input order of the mapping does not matter either.
        let top = top_two(
            &tally(&[answer(&["niceone", "pleaser"])]),
            &ScoringConfig::default(),
        );
        assert_eq!(top.primary, "niceone");
    }

    #[test]
    fn rank_orders_by_count_then_id() {
        let answers = vec![
            answer(&["rebel", "critic", "joker"]),
            answer(&["rebel", "critic"]),
            answer(&["achiever"]),
        ];
        let ranked = rank(&tally(&answers));
        let ids: Vec<&str> = ranked.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["critic", "rebel", "achiever", "joker"]);
        assert_eq!(ranked[0].1, 2);
    }

    #[test]
    fn unknown_ids_are_tallied() {
        let score = tally(&[answer(&["ghost"]), answer(&["ghost"]), answer(&["rebel"])]);
        let top = top_two(&score, &ScoringConfig::default());
        assert_eq!(top.primary, "ghost");
        assert_eq!(top.secondary, "rebel");
    }

    #[test]
    fn score_serializes_as_plain_map() {
        let score = tally(&[answer(&["achiever"]), answer(&["achiever", "rebel"])]);
        let json = serde_json::to_string(&score).unwrap();
        assert_eq!(json, r#"{"achiever":2,"rebel":1}"#);
    }
}
