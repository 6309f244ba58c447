/*!
 * Plain-text translation service.
 */

use std::sync::Arc;

use log::error;

use crate::errors::ClientError;
use crate::providers::{Glossary, TranslationBackend};
use crate::record::LocaleCode;

/// Translates plain text through a backend, short-circuiting the cases that
/// need no remote call.
#[derive(Debug, Clone)]
pub struct TextTranslator {
    backend: Arc<dyn TranslationBackend>,
}

impl TextTranslator {
    /// Create a new translator on top of a backend
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self { backend }
    }

    /// The underlying backend
    pub fn backend(&self) -> Arc<dyn TranslationBackend> {
        Arc::clone(&self.backend)
    }

    /// Translate a plain-text string.
    ///
    /// Blank input yields an empty string and `from == to` yields the input
    /// unchanged; neither makes a remote call. Backend failures are logged
    /// and propagated unchanged.
    pub async fn translate_text(
        &self,
        text: &str,
        from: &LocaleCode,
        to: &LocaleCode,
        context: Option<&str>,
        glossary: Option<&Glossary>,
    ) -> Result<String, ClientError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        if from == to {
            return Ok(text.to_string());
        }

        self.backend
            .translate(text, from, to, context, glossary)
            .await
            .map_err(|e| {
                error!("Translation failed ({} -> {}): {}", from, to, e);
                e
            })
    }
}
