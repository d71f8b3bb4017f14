//! Core data model types for the archetype mirror.
//!
//! Reference documents use camelCase field names; every record here keeps
//! that wire shape so the JSON files can be read as they are published.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed personality category ("mask") with its descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Archetype {
    /// Stable identifier (e.g. "pleaser").
    pub id: String,
    /// User-facing mask name (e.g. "The Pleaser").
    pub mask_name: String,
    /// The sacred archetype underneath the mask.
    pub sacred_archetype: String,
    /// Core wound.
    pub wound: String,
    /// Emotional theme.
    pub theme: String,
    #[serde(default)]
    pub limiting_beliefs: Vec<String>,
    #[serde(default)]
    pub somatic_zones: Vec<String>,
    #[serde(default)]
    pub chakra: Vec<Chakra>,
    #[serde(default)]
    pub light_gifts: Vec<String>,
    #[serde(default)]
    pub integration_path: Vec<String>,
}

/// One of the seven body-centred chakras, in body order from root to crown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chakra {
    Root,
    Sacral,
    #[serde(rename = "Solar Plexus")]
    SolarPlexus,
    Heart,
    Throat,
    #[serde(rename = "Third Eye")]
    ThirdEye,
    Crown,
}

impl Chakra {
    /// All chakras in body order.
    pub const ALL: [Chakra; 7] = [
        Chakra::Root,
        Chakra::Sacral,
        Chakra::SolarPlexus,
        Chakra::Heart,
        Chakra::Throat,
        Chakra::ThirdEye,
        Chakra::Crown,
    ];

    /// Display label as used in the reference data.
    pub fn label(&self) -> &'static str {
        match self {
            Chakra::Root => "Root",
            Chakra::Sacral => "Sacral",
            Chakra::SolarPlexus => "Solar Plexus",
            Chakra::Heart => "Heart",
            Chakra::Throat => "Throat",
            Chakra::ThirdEye => "Third Eye",
            Chakra::Crown => "Crown",
        }
    }

    /// Traditional colour, as a CSS hex value.
    pub fn colour(&self) -> &'static str {
        match self {
            Chakra::Root => "#ef4444",
            Chakra::Sacral => "#f97316",
            Chakra::SolarPlexus => "#eab308",
            Chakra::Heart => "#22c55e",
            Chakra::Throat => "#3b82f6",
            Chakra::ThirdEye => "#6366f1",
            Chakra::Crown => "#a855f7",
        }
    }
}

impl fmt::Display for Chakra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Chakra {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "root" => Ok(Chakra::Root),
            "sacral" => Ok(Chakra::Sacral),
            "solarplexus" => Ok(Chakra::SolarPlexus),
            "heart" => Ok(Chakra::Heart),
            "throat" => Ok(Chakra::Throat),
            "thirdeye" => Ok(Chakra::ThirdEye),
            "crown" => Ok(Chakra::Crown),
            _ => Err(format!("unknown chakra: {s}")),
        }
    }
}

/// A selectable answer to a quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOption {
    pub id: String,
    /// The question this option belongs to.
    pub question_id: String,
    pub label: String,
    /// Archetype ids this option contributes to. May be empty.
    #[serde(default)]
    pub maps_to: Vec<String>,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestQuestion {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub options: Vec<TestOption>,
}

impl TestQuestion {
    /// Find one of this question's options by id.
    pub fn option(&self, option_id: &str) -> Option<&TestOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// The answer recorded for a single question during a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAnswer {
    pub option_id: String,
    #[serde(default)]
    pub maps_to: Vec<String>,
}

impl TestAnswer {
    pub fn new(option_id: impl Into<String>, maps_to: Vec<String>) -> Self {
        Self {
            option_id: option_id.into(),
            maps_to,
        }
    }
}

impl From<&TestOption> for TestAnswer {
    fn from(option: &TestOption) -> Self {
        Self {
            option_id: option.id.clone(),
            maps_to: option.maps_to.clone(),
        }
    }
}

/// The outcome of a completed quiz.
///
/// `chakra` is empty until the result is resolved against the reference
/// data, see [`crate::chakra::resolve_result`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchetypeResult {
    pub primary_mask_id: String,
    pub secondary_mask_id: String,
    #[serde(default)]
    pub chakra: Vec<Chakra>,
}

impl ArchetypeResult {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary_mask_id: primary.into(),
            secondary_mask_id: secondary.into(),
            chakra: Vec::new(),
        }
    }
}

/// Precomputed relationship insight between two archetypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairingInsight {
    pub pair_id: String,
    pub archetype_a: String,
    pub archetype_b: String,
    #[serde(default)]
    pub attraction: Vec<String>,
    #[serde(default)]
    pub shadow_dance: Vec<String>,
    #[serde(default)]
    pub trigger_loop: Vec<String>,
    #[serde(default)]
    pub light_potential: Vec<String>,
    #[serde(default)]
    pub integration_practices: Vec<String>,
}

impl PairingInsight {
    /// The same insight with A and B swapped.
    pub fn relabeled(&self) -> Self {
        Self {
            archetype_a: self.archetype_b.clone(),
            archetype_b: self.archetype_a.clone(),
            ..self.clone()
        }
    }

    /// Given one side of the pair, return the other.
    pub fn partner_of(&self, id: &str) -> Option<&str> {
        if self.archetype_a == id {
            Some(&self.archetype_b)
        } else if self.archetype_b == id {
            Some(&self.archetype_a)
        } else {
            None
        }
    }

    /// The five insight lists with their display titles.
    pub fn sections(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Attraction Pattern", self.attraction.as_slice()),
            ("Shadow Dance", self.shadow_dance.as_slice()),
            ("Trigger Loop", self.trigger_loop.as_slice()),
            ("Light-Side Potential", self.light_potential.as_slice()),
            ("Integration Practices", self.integration_practices.as_slice()),
        ]
    }
}
