//! Reference data loading and validation.
//!
//! Three JSON documents make up the reference data: archetypes, quiz
//! questions and pairing insights. They are parsed once and then held
//! immutably for the whole session.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Archetype, PairingInsight, TestQuestion};
use crate::pairing::PairingIndex;

/// File name of the archetype document.
pub const ARCHETYPES_FILE: &str = "archetypes.json";
/// File name of the quiz question document.
pub const QUESTIONS_FILE: &str = "testQuestions.json";
/// File name of the pairing document.
pub const PAIRINGS_FILE: &str = "pairings.json";

const EMBEDDED_ARCHETYPES: &str = include_str!("../../../data/archetypes.json");
const EMBEDDED_QUESTIONS: &str = include_str!("../../../data/testQuestions.json");
const EMBEDDED_PAIRINGS: &str = include_str!("../../../data/pairings.json");

/// The embedded documents as `(file name, JSON text)` pairs.
pub fn embedded_documents() -> [(&'static str, &'static str); 3] {
    [
        (ARCHETYPES_FILE, EMBEDDED_ARCHETYPES),
        (QUESTIONS_FILE, EMBEDDED_QUESTIONS),
        (PAIRINGS_FILE, EMBEDDED_PAIRINGS),
    ]
}

#[derive(Debug, Deserialize)]
struct ArchetypeDocument {
    archetypes: Vec<Archetype>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuestionDocument {
    test_questions: Vec<TestQuestion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PairingDocument {
    primary_pairings: Vec<PairingInsight>,
}

/// Immutable reference data for one session.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    archetypes: Vec<Archetype>,
    by_id: HashMap<String, usize>,
    questions: Vec<TestQuestion>,
    pairings: PairingIndex,
}

impl ReferenceData {
    /// Assemble reference data from already-parsed records.
    pub fn new(
        archetypes: Vec<Archetype>,
        questions: Vec<TestQuestion>,
        pairings: Vec<PairingInsight>,
    ) -> Self {
        let mut by_id = HashMap::with_capacity(archetypes.len());
        for (idx, archetype) in archetypes.iter().enumerate() {
            by_id.entry(archetype.id.clone()).or_insert(idx);
        }
        Self {
            archetypes,
            by_id,
            questions,
            pairings: PairingIndex::build(pairings),
        }
    }

    /// Parse the three documents from strings.
    pub fn from_json(archetypes: &str, questions: &str, pairings: &str) -> Result<Self> {
        let archetypes: ArchetypeDocument =
            serde_json::from_str(archetypes).context("failed to parse archetype document")?;
        let questions: QuestionDocument =
            serde_json::from_str(questions).context("failed to parse question document")?;
        let pairings: PairingDocument =
            serde_json::from_str(pairings).context("failed to parse pairing document")?;

        Ok(Self::new(
            archetypes.archetypes,
            questions.test_questions,
            pairings.primary_pairings,
        ))
    }

    /// Reference data compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_ARCHETYPES, EMBEDDED_QUESTIONS, EMBEDDED_PAIRINGS)
            .context("embedded reference data is invalid")
    }

    /// Read the three documents from a directory.
    ///
    /// The files are read concurrently and parsed after all three reads
    /// complete; any single failure fails the whole load.
    pub async fn load_dir(dir: &Path) -> Result<Self> {
        let (archetypes, questions, pairings) = futures::try_join!(
            read_document(dir.join(ARCHETYPES_FILE)),
            read_document(dir.join(QUESTIONS_FILE)),
            read_document(dir.join(PAIRINGS_FILE)),
        )?;

        let data = Self::from_json(&archetypes, &questions, &pairings)
            .with_context(|| format!("invalid reference data in {}", dir.display()))?;
        tracing::debug!(
            archetypes = data.archetypes.len(),
            questions = data.questions.len(),
            pairings = data.pairings.len(),
            "loaded reference data from {}",
            dir.display()
        );
        Ok(data)
    }

    /// All archetypes in document order.
    pub fn archetypes(&self) -> &[Archetype] {
        &self.archetypes
    }

    pub fn archetype(&self, id: &str) -> Option<&Archetype> {
        self.by_id.get(id).map(|&idx| &self.archetypes[idx])
    }

    pub fn contains_archetype(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn questions(&self) -> &[TestQuestion] {
        &self.questions
    }

    pub fn pairings(&self) -> &PairingIndex {
        &self.pairings
    }

    /// Symmetric pairing lookup.
    pub fn pairing(&self, a: &str, b: &str) -> Option<&PairingInsight> {
        self.pairings.lookup(a, b)
    }
}

async fn read_document(path: PathBuf) -> Result<String> {
    tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Where reference data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Documents compiled into the binary.
    Embedded,
    /// A directory containing the three JSON documents.
    Directory(PathBuf),
}

impl DataSource {
    /// A directory source if a path is given, the embedded data otherwise.
    pub fn from_option(dir: Option<PathBuf>) -> Self {
        match dir {
            Some(dir) => DataSource::Directory(dir),
            None => DataSource::Embedded,
        }
    }

    pub async fn load(&self) -> Result<ReferenceData> {
        match self {
            DataSource::Embedded => ReferenceData::embedded(),
            DataSource::Directory(dir) => ReferenceData::load_dir(dir).await,
        }
    }
}

/// Load outcome for an interactive session.
///
/// A failed load is logged and leaves the session without data rather than
/// aborting; there is no retry.
#[derive(Debug, Clone)]
pub enum DataState {
    Ready(Arc<ReferenceData>),
    Unavailable,
}

impl DataState {
    pub async fn load(source: &DataSource) -> Self {
        match source.load().await {
            Ok(data) => DataState::Ready(Arc::new(data)),
            Err(e) => {
                tracing::error!("failed to load reference data: {e:#}");
                DataState::Unavailable
            }
        }
    }

    pub fn data(&self) -> Option<&Arc<ReferenceData>> {
        match self {
            DataState::Ready(data) => Some(data),
            DataState::Unavailable => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DataState::Ready(_))
    }
}

/// A warning from reference data validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The record the warning is about (archetype, question, option or pair id).
    pub subject: Option<String>,
    pub message: String,
}

impl ValidationWarning {
    fn about(subject: &str, message: impl Into<String>) -> Self {
        Self {
            subject: Some(subject.to_string()),
            message: message.into(),
        }
    }
}

/// Validate reference data for dangling ids and structural issues.
pub fn validate_reference_data(data: &ReferenceData) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if data.archetypes.is_empty() {
        warnings.push(ValidationWarning {
            subject: None,
            message: "no archetypes defined".into(),
        });
    }
    if data.questions.is_empty() {
        warnings.push(ValidationWarning {
            subject: None,
            message: "no quiz questions defined".into(),
        });
    }

    let mut seen = HashSet::new();
    for archetype in &data.archetypes {
        if !seen.insert(archetype.id.as_str()) {
            warnings.push(ValidationWarning::about(
                &archetype.id,
                format!("duplicate archetype ID: {}", archetype.id),
            ));
        }
        if archetype.chakra.is_empty() {
            warnings.push(ValidationWarning::about(
                &archetype.id,
                "archetype has no chakras",
            ));
        }
    }

    let mut question_ids = HashSet::new();
    let mut option_ids = HashSet::new();
    for question in &data.questions {
        if !question_ids.insert(question.id.as_str()) {
            warnings.push(ValidationWarning::about(
                &question.id,
                format!("duplicate question ID: {}", question.id),
            ));
        }
        if question.options.is_empty() {
            warnings.push(ValidationWarning::about(&question.id, "question has no options"));
        }
        for option in &question.options {
            if !option_ids.insert(option.id.as_str()) {
                warnings.push(ValidationWarning::about(
                    &option.id,
                    format!("duplicate option ID: {}", option.id),
                ));
            }
            if option.question_id != question.id {
                warnings.push(ValidationWarning::about(
                    &option.id,
                    format!(
                        "option claims question {} but is listed under {}",
                        option.question_id, question.id
                    ),
                ));
            }
            for target in &option.maps_to {
                if !data.contains_archetype(target) {
                    warnings.push(ValidationWarning::about(
                        &option.id,
                        format!("maps to unknown archetype: {target}"),
                    ));
                }
            }
        }
    }

    for pairing in data.pairings.canonical() {
        for side in [&pairing.archetype_a, &pairing.archetype_b] {
            if !data.contains_archetype(side) {
                warnings.push(ValidationWarning::about(
                    &pairing.pair_id,
                    format!("pairing references unknown archetype: {side}"),
                ));
            }
        }
        if pairing.archetype_a == pairing.archetype_b {
            warnings.push(ValidationWarning::about(
                &pairing.pair_id,
                "pairing pairs an archetype with itself",
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Chakra;

    const ARCHETYPES: &str = r#"{"archetypes": [
        {"id": "achiever", "maskName": "The Achiever", "sacredArchetype": "The Warrior",
         "wound": "Worth", "theme": "Proving", "chakra": ["Solar Plexus"]},
        {"id": "lonewolf", "maskName": "The Lone Wolf", "sacredArchetype": "The Hermit",
         "wound": "Abandonment", "theme": "Distance", "chakra": ["Root"]}
    ]}"#;

    const QUESTIONS: &str = r#"{"testQuestions": [
        {"id": "q1", "question": "Pick one", "options": [
            {"id": "q1a", "questionId": "q1", "label": "Work", "mapsTo": ["achiever"]},
            {"id": "q1b", "questionId": "q1", "label": "Leave", "mapsTo": ["lonewolf"]}
        ]}
    ]}"#;

    const PAIRINGS: &str = r#"{"primaryPairings": [
        {"pairId": "achiever-lonewolf", "archetypeA": "achiever", "archetypeB": "lonewolf",
         "attraction": ["respect"], "shadowDance": [], "triggerLoop": [],
         "lightPotential": [], "integrationPractices": []}
    ]}"#;

    #[test]
    fn parse_documents() {
        let data = ReferenceData::from_json(ARCHETYPES, QUESTIONS, PAIRINGS).unwrap();
        assert_eq!(data.archetypes().len(), 2);
        assert_eq!(data.questions().len(), 1);
        assert_eq!(
            data.archetype("lonewolf").unwrap().chakra,
            vec![Chakra::Root]
        );
        assert!(data.archetype("ghost").is_none());
        assert!(validate_reference_data(&data).is_empty());
    }

    #[test]
    fn pairing_lookup_is_symmetric_after_load() {
        let data = ReferenceData::from_json(ARCHETYPES, QUESTIONS, PAIRINGS).unwrap();
        let insight = data.pairing("lonewolf", "achiever").unwrap();
        assert_eq!(insight.archetype_a, "lonewolf");
        assert_eq!(insight.attraction, vec!["respect".to_string()]);
    }

    #[test]
    fn malformed_document_is_an_error() {
        let result = ReferenceData::from_json("{not json", QUESTIONS, PAIRINGS);
        assert!(result.is_err());
        let result = ReferenceData::from_json(ARCHETYPES, r#"{"questions": []}"#, PAIRINGS);
        assert!(result.is_err());
    }

    #[test]
    fn embedded_data_is_complete_and_valid() {
        let data = ReferenceData::embedded().unwrap();
        assert_eq!(data.archetypes().len(), 14);
        assert_eq!(data.questions().len(), 30);
        assert!(data.questions().iter().all(|q| q.options.len() == 4));
        assert_eq!(data.pairings().len(), 14);
        let warnings = validate_reference_data(&data);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert!(data.pairing("lonewolf", "achiever").is_some());
    }

    #[tokio::test]
    async fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ARCHETYPES_FILE), ARCHETYPES).unwrap();
        std::fs::write(dir.path().join(QUESTIONS_FILE), QUESTIONS).unwrap();
        std::fs::write(dir.path().join(PAIRINGS_FILE), PAIRINGS).unwrap();

        let data = ReferenceData::load_dir(dir.path()).await.unwrap();
        assert_eq!(data.archetypes().len(), 2);
    }

    #[tokio::test]
    async fn missing_file_degrades_to_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ARCHETYPES_FILE), ARCHETYPES).unwrap();
        std::fs::write(dir.path().join(QUESTIONS_FILE), QUESTIONS).unwrap();

        let source = DataSource::Directory(dir.path().to_path_buf());
        assert!(source.load().await.is_err());

        let state = DataState::load(&source).await;
        assert!(!state.is_ready());
        assert!(state.data().is_none());
    }

    #[tokio::test]
    async fn embedded_source_is_ready() {
        let state = DataState::load(&DataSource::from_option(None)).await;
        assert!(state.is_ready());
    }

    #[test]
    fn validate_reports_dangling_and_duplicate_ids() {
        let questions = r#"{"testQuestions": [
            {"id": "q1", "question": "Pick", "options": [
                {"id": "q1a", "questionId": "q1", "label": "A", "mapsTo": ["ghost"]},
                {"id": "q1a", "questionId": "q2", "label": "B", "mapsTo": []}
            ]},
            {"id": "q1", "question": "Again", "options": []}
        ]}"#;
        let pairings = r#"{"primaryPairings": [
            {"pairId": "x", "archetypeA": "achiever", "archetypeB": "phantom"},
            {"pairId": "self", "archetypeA": "lonewolf", "archetypeB": "lonewolf"}
        ]}"#;
        let data = ReferenceData::from_json(ARCHETYPES, questions, pairings).unwrap();
        let messages: Vec<String> = validate_reference_data(&data)
            .into_iter()
            .map(|w| w.message)
            .collect();

        assert!(messages.iter().any(|m| m.contains("unknown archetype: ghost")));
        assert!(messages.iter().any(|m| m.contains("duplicate option ID")));
        assert!(messages.iter().any(|m| m.contains("duplicate question ID")));
        assert!(messages.iter().any(|m| m.contains("claims question q2")));
        assert!(messages.iter().any(|m| m.contains("no options")));
        assert!(messages.iter().any(|m| m.contains("unknown archetype: phantom")));
        assert!(messages.iter().any(|m| m.contains("with itself")));
    }
}
