//! Report payload assembly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chakra::resolve_result;
use crate::data::ReferenceData;
use crate::error::ResolveError;
use crate::model::{Archetype, ArchetypeResult, PairingInsight};

/// Everything an exporter needs to render a result report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPayload {
    /// Unique report identifier.
    pub id: Uuid,
    #[serde(default)]
    pub user_name: Option<String>,
    /// The result, with its chakra union filled in.
    pub archetype_result: ArchetypeResult,
    pub primary_archetype: Archetype,
    pub secondary_archetype: Archetype,
    /// Pairing between the primary archetype and the partner, labeled so
    /// that `archetype_a` is the primary.
    #[serde(default)]
    pub pairing_insight: Option<PairingInsight>,
    /// The other side of the pairing.
    #[serde(default)]
    pub pairing_partner: Option<Archetype>,
    /// Personalized AI summary, when one was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ReportPayload {
    /// Assemble a payload for a result.
    ///
    /// `partner_id` selects the pairing to include; without one, the
    /// secondary archetype is used when it differs from the primary. A
    /// missing pairing is not an error, the report just omits it.
    pub fn build(
        result: &ArchetypeResult,
        data: &ReferenceData,
        partner_id: Option<&str>,
        user_name: Option<String>,
    ) -> Result<Self, ResolveError> {
        let resolved = resolve_result(result, data)?;

        let partner_id = partner_id.or_else(|| {
            (resolved.secondary.id != resolved.primary.id).then_some(resolved.secondary.id.as_str())
        });
        let pairing_partner = match partner_id {
            Some(id) => Some(
                data.archetype(id)
                    .ok_or_else(|| ResolveError::UnknownArchetype(id.to_string()))?
                    .clone(),
            ),
            None => None,
        };
        let pairing_insight = pairing_partner
            .as_ref()
            .and_then(|partner| data.pairing(&resolved.primary.id, &partner.id))
            .cloned();

        Ok(Self {
            id: Uuid::new_v4(),
            user_name: user_name.filter(|n| !n.trim().is_empty()),
            archetype_result: resolved.result,
            primary_archetype: resolved.primary.clone(),
            secondary_archetype: resolved.secondary.clone(),
            pairing_insight,
            pairing_partner,
            ai_summary: None,
            generated_at: Utc::now(),
        })
    }

    /// Attach a personalized summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.ai_summary = Some(summary.into());
        self
    }

    /// Generation date as shown in reports.
    pub fn date_label(&self) -> String {
        self.generated_at.format("%Y-%m-%d").to_string()
    }

    /// File name stem used by exporters.
    pub fn file_stem(&self) -> String {
        format!(
            "archetype-report-{}-{}",
            self.primary_archetype.id,
            self.generated_at.format("%Y-%m-%dT%H%M%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Chakra;

    #[test]
    fn build_resolves_everything() {
        let data = ReferenceData::embedded().unwrap();
        let result = ArchetypeResult::new("achiever", "lonewolf");
        let payload = ReportPayload::build(&result, &data, None, Some("Sam".into())).unwrap();

        assert_eq!(payload.primary_archetype.id, "achiever");
        assert_eq!(payload.secondary_archetype.id, "lonewolf");
        assert_eq!(
            payload.archetype_result.chakra,
            vec![Chakra::SolarPlexus, Chakra::Root]
        );
        assert_eq!(payload.user_name.as_deref(), Some("Sam"));

        let insight = payload.pairing_insight.unwrap();
        assert_eq!(insight.archetype_a, "achiever");
        assert_eq!(insight.archetype_b, "lonewolf");
        assert_eq!(payload.pairing_partner.unwrap().id, "lonewolf");
    }

    #[test]
    fn explicit_partner_uses_reverse_pairing() {
        let data = ReferenceData::embedded().unwrap();
        let result = ArchetypeResult::new("lonewolf", "rebel");
        let payload = ReportPayload::build(&result, &data, Some("achiever"), None).unwrap();

        let insight = payload.pairing_insight.unwrap();
        assert_eq!(insight.archetype_a, "lonewolf");
        assert_eq!(insight.archetype_b, "achiever");
    }

    #[test]
    fn missing_pairing_is_omitted() {
        let data = ReferenceData::embedded().unwrap();
        let result = ArchetypeResult::new("joker", "critic");
        let payload = ReportPayload::build(&result, &data, None, Some("  ".into())).unwrap();

        assert!(payload.pairing_insight.is_none());
        assert_eq!(payload.pairing_partner.unwrap().id, "critic");
        assert!(payload.user_name.is_none());
    }

    #[test]
    fn degenerate_result_has_no_partner() {
        let data = ReferenceData::embedded().unwrap();
        let result = ArchetypeResult::new("joker", "joker");
        let payload = ReportPayload::build(&result, &data, None, None).unwrap();
        assert!(payload.pairing_partner.is_none());
        assert!(payload.pairing_insight.is_none());
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let data = ReferenceData::embedded().unwrap();
        let result = ArchetypeResult::new("ghost", "rebel");
        assert!(ReportPayload::build(&result, &data, None, None).is_err());

        let result = ArchetypeResult::new("rebel", "pleaser");
        let err = ReportPayload::build(&result, &data, Some("phantom"), None).unwrap_err();
        assert_eq!(err, ResolveError::UnknownArchetype("phantom".into()));
    }

    #[test]
    fn json_roundtrip() {
        let data = ReferenceData::embedded().unwrap();
        let result = ArchetypeResult::new("pleaser", "rebel");
        let payload = ReportPayload::build(&result, &data, None, None)
            .unwrap()
            .with_summary("A **kind** summary.");

        let json = serde_json::to_string(&payload).unwrap();
        let loaded: ReportPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.id, payload.id);
        assert_eq!(loaded.archetype_result, payload.archetype_result);
        assert!(loaded.pairing_insight.is_some());
        assert_eq!(loaded.ai_summary.as_deref(), Some("A **kind** summary."));
    }

    #[test]
    fn file_stem_names_primary() {
        let data = ReferenceData::embedded().unwrap();
        let payload =
            ReportPayload::build(&ArchetypeResult::new("critic", "joker"), &data, None, None)
                .unwrap();
        assert!(payload.file_stem().starts_with("archetype-report-critic-"));
        assert_eq!(payload.date_label().len(), 10);
    }
}
