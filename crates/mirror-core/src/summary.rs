//! Personalized AI summary of an archetype pairing.
//!
//! The summary is optional: without a provider a fixed notice is returned,
//! and any provider failure collapses to a fixed apology. Callers always get
//! displayable text back.

use crate::error::ProviderError;
use crate::model::Archetype;
use crate::traits::{SummaryProvider, SummaryRequest};

/// Model used when none is configured.
pub const DEFAULT_SUMMARY_MODEL: &str = "gemini-2.5-flash-lite";

/// Returned when no summary provider is configured.
pub const SUMMARY_DISABLED_MESSAGE: &str =
    "AI provider API key not configured. This feature is disabled.";

/// Returned when the provider call fails.
pub const SUMMARY_FAILED_MESSAGE: &str =
    "There was an error generating your personalized summary. Please try again later.";

const SUMMARY_MAX_TOKENS: u32 = 1024;
const SUMMARY_TEMPERATURE: f64 = 0.7;

/// Build the prompt describing a primary/secondary mask combination.
pub fn build_summary_prompt(primary: &Archetype, secondary: &Archetype) -> String {
    format!(
        "Analyze the ELA archetype combination of a Primary Mask: \"{p_mask}\" (Sacred Archetype: {p_sacred}) \
         and a Secondary Mask: \"{s_mask}\" (Sacred Archetype: {s_sacred}).\n\
         \n\
         Primary Mask Details:\n\
         - Wound: {p_wound}\n\
         - Theme: {p_theme}\n\
         - Light Gifts: {p_gifts}\n\
         \n\
         Secondary Mask Details:\n\
         - Wound: {s_wound}\n\
         - Theme: {s_theme}\n\
         - Light Gifts: {s_gifts}\n\
         \n\
         Based on this information, provide a short, insightful, and empowering summary (2-3 paragraphs) \
         for the user. Address the following:\n\
         1. How the primary and secondary masks might interact or reinforce each other.\n\
         2. A key insight into the core challenge this combination presents.\n\
         3. A gentle, actionable suggestion for integrating the gifts of their sacred archetypes \
         ({p_sacred} and {s_sacred}) to find more balance.\n\
         \n\
         Write in a supportive and encouraging tone. Use markdown for formatting (bolding, lists).\n",
        p_mask = primary.mask_name,
        p_sacred = primary.sacred_archetype,
        p_wound = primary.wound,
        p_theme = primary.theme,
        p_gifts = primary.light_gifts.join(", "),
        s_mask = secondary.mask_name,
        s_sacred = secondary.sacred_archetype,
        s_wound = secondary.wound,
        s_theme = secondary.theme,
        s_gifts = secondary.light_gifts.join(", "),
    )
}

/// Request a personalized summary, never failing.
pub async fn personalized_summary(
    provider: Option<&dyn SummaryProvider>,
    model: &str,
    primary: &Archetype,
    secondary: &Archetype,
) -> String {
    let Some(provider) = provider else {
        tracing::warn!("no summary provider configured, AI summary disabled");
        return SUMMARY_DISABLED_MESSAGE.to_string();
    };

    let request = SummaryRequest {
        model: model.to_string(),
        prompt: build_summary_prompt(primary, secondary),
        max_tokens: SUMMARY_MAX_TOKENS,
        temperature: SUMMARY_TEMPERATURE,
    };

    match provider.summarize(&request).await {
        Ok(response) if !response.text.trim().is_empty() => {
            tracing::info!(
                provider = provider.name(),
                model = %response.model,
                latency_ms = response.latency_ms,
                "summary generated"
            );
            response.text
        }
        Ok(_) => {
            tracing::error!(provider = provider.name(), "summary provider returned no text");
            SUMMARY_FAILED_MESSAGE.to_string()
        }
        Err(e) => {
            match e.downcast_ref::<ProviderError>() {
                Some(pe) if pe.is_configuration() => tracing::error!(
                    provider = provider.name(),
                    "summary provider is misconfigured: {pe}"
                ),
                Some(ProviderError::RateLimited { retry_after_ms }) => tracing::warn!(
                    provider = provider.name(),
                    retry_after_ms,
                    "summary provider rate limited"
                ),
                _ => tracing::error!(provider = provider.name(), "error fetching summary: {e:#}"),
            }
            SUMMARY_FAILED_MESSAGE.to_string()
        }
    }
}
