//! Mock provider for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mirror_core::traits::{ModelInfo, SummaryProvider, SummaryRequest, SummaryResponse};

use crate::error::ProviderError;

/// A mock summary provider that never touches the network.
///
/// Responds based on prompt substrings, or fails every call when built with
/// [`MockProvider::failing`].
pub struct MockProvider {
    /// Map of prompt substring → summary text.
    responses: HashMap<String, String>,
    /// Text returned if no prompt matches.
    default_response: String,
    fail: bool,
    call_count: AtomicU32,
    last_request: Mutex<Option<SummaryRequest>>,
}

impl MockProvider {
    /// Create a new mock provider with the given prompt→summary mappings.
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_response: "Your masks are a map, not a verdict.".to_string(),
            fail: false,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same summary.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_response: response.to_string(),
            ..Self::new(HashMap::new())
        }
    }

    /// Create a mock whose every call fails with an API error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(HashMap::new())
        }
    }

    /// Number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last request made to this provider.
    pub fn last_request(&self) -> Option<SummaryRequest> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl SummaryProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn summarize(&self, request: &SummaryRequest) -> anyhow::Result<SummaryResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if self.fail {
            return Err(ProviderError::ApiError {
                status: 500,
                message: "mock failure".into(),
            }
            .into());
        }

        let text = self
            .responses
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone())
            .unwrap_or_else(|| self.default_response.clone());

        Ok(SummaryResponse {
            text,
            model: request.model.clone(),
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            max_context: 100_000,
        }]
    }
}
