/*!
 * Mock translation backend for testing.
 *
 * Behaviors cover the failure modes the orchestrators must isolate:
 * - `MockBackend::working()` - always succeeds with a tagged translation
 * - `MockBackend::failing()` - always fails with a generic API error
 * - `MockBackend::rate_limited()` - always fails with a rate-limit error
 * - `MockBackend::fail_when_contains(..)` - fails only for matching inputs
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::ClientError;
use crate::providers::{Glossary, TranslationBackend};
use crate::record::LocaleCode;

/// Behavior mode for the mock backend
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always succeeds with a tagged translation
    Working,
    /// Always fails with a generic API error
    Failing,
    /// Always fails with an authentication error
    AuthFailing,
    /// Always fails with a rate-limit error
    RateLimited,
    /// Fails only when the input text contains the marker
    FailWhenContains(String),
}

/// Mock backend for exercising translator and orchestrator behavior
#[derive(Debug)]
pub struct MockBackend {
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate calls made
    call_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str, &LocaleCode, &LocaleCode) -> String>,
}

impl MockBackend {
    /// Create a new mock backend with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Backend that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Backend that always fails with a generic API error
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Backend that always fails with an authentication error
    pub fn auth_failing() -> Self {
        Self::new(MockBehavior::AuthFailing)
    }

    /// Backend that always reports a rate-limit condition
    pub fn rate_limited() -> Self {
        Self::new(MockBehavior::RateLimited)
    }

    /// Backend that fails only for inputs containing `marker`
    pub fn fail_when_contains(marker: impl Into<String>) -> Self {
        Self::new(MockBehavior::FailWhenContains(marker.into()))
    }

    /// Set a custom response generator
    pub fn with_custom_response(
        mut self,
        generator: fn(&str, &LocaleCode, &LocaleCode) -> String,
    ) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of translate calls made so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationBackend for MockBackend {
    async fn translate(
        &self,
        text: &str,
        from: &LocaleCode,
        to: &LocaleCode,
        _context: Option<&str>,
        _glossary: Option<&Glossary>,
    ) -> Result<String, ClientError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Failing => {
                return Err(ClientError::Api("mock backend failure".to_string()));
            }
            MockBehavior::AuthFailing => {
                return Err(ClientError::Authentication("mock bad credentials".to_string()));
            }
            MockBehavior::RateLimited => {
                return Err(ClientError::RateLimited("mock rate limit".to_string()));
            }
            MockBehavior::FailWhenContains(marker) if text.contains(marker) => {
                return Err(ClientError::Api(format!(
                    "mock failure for input containing '{}'",
                    marker
                )));
            }
            _ => {}
        }

        if let Some(generator) = self.custom_response {
            return Ok(generator(text, from, to));
        }
        Ok(format!("[{}] {}", to, text))
    }
}
