/*!
 * Translation backend implementations.
 *
 * This module contains the seam between the translators and the remote API:
 * - `TranslationBackend`: common trait every backend implements
 * - `chat_api`: HTTP client for a chat-completion endpoint with rate-limit retry
 * - `mock`: configurable in-memory backend for tests
 */

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;

use crate::errors::ClientError;
use crate::record::LocaleCode;

pub mod chat_api;
pub mod mock;

/// Common trait for translation backends.
///
/// The translators and orchestrators only depend on this trait, so the remote
/// client can be swapped for a mock in tests.
#[async_trait]
pub trait TranslationBackend: Send + Sync + Debug {
    /// Translate `text` from one locale to another.
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `from` - Source locale
    /// * `to` - Target locale
    /// * `context` - Optional domain context embedded in the prompt
    /// * `glossary` - Optional glossary embedded in the prompt
    ///
    /// # Returns
    /// * `Result<String, ClientError>` - The translated text or a typed failure
    async fn translate(
        &self,
        text: &str,
        from: &LocaleCode,
        to: &LocaleCode,
        context: Option<&str>,
        glossary: Option<&Glossary>,
    ) -> Result<String, ClientError>;
}

/// Optional glossary handed to the backend at call time.
///
/// Term mappings render as `"key → value"` pairs joined by commas; freeform
/// text passes into the prompt verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glossary {
    /// Explicit term → term mapping (ordered for deterministic prompts)
    Terms(BTreeMap<String, String>),
    /// Free-form glossary text
    Freeform(String),
}

impl Glossary {
    /// Build a term mapping from pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Terms(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Rendered prompt fragment, `None` when there is nothing to say
    pub fn render(&self) -> Option<String> {
        match self {
            Self::Terms(terms) if terms.is_empty() => None,
            Self::Terms(terms) => Some(
                terms
                    .iter()
                    .map(|(k, v)| format!("{} → {}", k, v))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            Self::Freeform(text) if text.trim().is_empty() => None,
            Self::Freeform(text) => Some(text.clone()),
        }
    }
}

/// Retry schedule applied to rate-limited requests.
///
/// The number of delays is the maximum number of retries; each entry is the
/// wait before the corresponding retry. Only rate-limit errors are retried.
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    delays: Vec<Duration>,
}

impl RetryPolicy {
    /// Create a policy from an ordered delay sequence
    pub fn new(delays: Vec<Duration>) -> Self {
        Self { delays }
    }

    /// A policy that never retries
    pub fn none() -> Self {
        Self { delays: Vec::new() }
    }

    /// Maximum number of retries
    pub fn max_retries(&self) -> usize {
        self.delays.len()
    }

    /// The configured delay sequence
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }

    /// Run `op`, retrying on rate-limit errors per the delay schedule.
    ///
    /// Authentication, invalid-response and generic API errors propagate
    /// immediately. Once the schedule is exhausted the rate-limit error
    /// propagates as well.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ClientError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Err(ClientError::RateLimited(message)) if attempt < self.delays.len() => {
                    let wait = self.delays[attempt];
                    attempt += 1;
                    warn!(
                        "Rate limited ({}), waiting {:?} before retry {}/{}",
                        message,
                        wait,
                        attempt,
                        self.delays.len()
                    );
                    tokio::time::sleep(wait).await;
                }
                other => return other,
            }
        }
    }
}
