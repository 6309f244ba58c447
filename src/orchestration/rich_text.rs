/*!
 * Orchestrator for rich-text (HTML-bearing, per-locale content) fields.
 *
 * Reads consult the pending-write buffer before the persisted store; writes
 * always stage into the buffer and additionally upsert immediately when the
 * owning record is already durably stored. Content whose plain-text
 * extraction is blank counts as absent even when markup is present.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use crate::app_config::Config;
use crate::errors::OrchestrationError;
use crate::orchestration::{
    resolve_locales, SkipReason, TranslationOptions, TranslationOutcome,
};
use crate::providers::TranslationBackend;
use crate::record::{
    FieldKind, LocaleCode, PendingWriteBuffer, RichTextFields, TranslatableRecord,
};
use crate::translation::{extract_plain_text, HtmlTranslator, TextTranslator};

/// Translates the rich-text fields of one record across target locales
#[derive(Debug, Clone)]
pub struct RichTextOrchestrator {
    translator: HtmlTranslator,
    default_locale: LocaleCode,
    available_locales: Vec<LocaleCode>,
    pacing_delay: Duration,
}

impl RichTextOrchestrator {
    /// Create a new orchestrator
    pub fn new(
        translator: HtmlTranslator,
        default_locale: LocaleCode,
        available_locales: Vec<LocaleCode>,
        pacing_delay: Duration,
    ) -> Self {
        Self {
            translator,
            default_locale,
            available_locales,
            pacing_delay,
        }
    }

    /// Create a new orchestrator from the application configuration
    pub fn from_config(config: &Config, backend: Arc<dyn TranslationBackend>) -> Self {
        Self::new(
            HtmlTranslator::new(TextTranslator::new(backend)),
            config.default_locale_code(),
            config.available_locale_codes(),
            config.pacing_delay(),
        )
    }

    /// Translate the requested rich-text fields of `record` into every target
    /// locale, staging writes into `buffer`.
    ///
    /// Fails with a capability error when the record type does not expose
    /// rich-text field translation.
    pub async fn translate_record(
        &self,
        record: &mut dyn TranslatableRecord,
        buffer: &mut PendingWriteBuffer,
        fields: &[String],
        options: &TranslationOptions,
    ) -> Result<Vec<TranslationOutcome>, OrchestrationError> {
        let store = record
            .rich_text_mut()
            .ok_or(OrchestrationError::MissingCapability {
                kind: FieldKind::RichText,
            })?;

        let (from, targets) =
            resolve_locales(options, &self.default_locale, &self.available_locales);
        let declared = store.declared_fields();
        let mut outcomes = Vec::new();

        for target in &targets {
            if target == &from {
                continue;
            }

            for field in fields {
                if !declared.contains(field) {
                    outcomes.push(TranslationOutcome::skipped(
                        field,
                        target.clone(),
                        SkipReason::UndeclaredField,
                    ));
                    continue;
                }

                let Some(source_content) = read_content(&*store, buffer, field, &from) else {
                    debug!("No source content for {} ({})", field, from);
                    outcomes.push(TranslationOutcome::skipped(
                        field,
                        target.clone(),
                        SkipReason::EmptySource,
                    ));
                    continue;
                };

                let existing = read_content(&*store, buffer, field, target);
                if !options.force && existing.is_some() {
                    debug!("Existing translation for {} ({}), skipped", field, target);
                    outcomes.push(TranslationOutcome::skipped(
                        field,
                        target.clone(),
                        SkipReason::AlreadyTranslated,
                    ));
                    continue;
                }

                info!("Translating {} ({} -> {})", field, from, target);
                match self
                    .translator
                    .translate_html(
                        &source_content,
                        &from,
                        target,
                        options.context.as_deref(),
                        options.glossary.as_ref(),
                    )
                    .await
                {
                    Ok(translated) => {
                        write_content(store, buffer, field, target, &translated);
                        outcomes.push(TranslationOutcome::translated(field, target.clone()));
                    }
                    Err(e) => {
                        error!(
                            "Failed to translate {} ({} -> {}): {}",
                            field, from, target, e
                        );
                        outcomes.push(TranslationOutcome::failed(
                            field,
                            target.clone(),
                            e.kind(),
                            e.to_string(),
                        ));
                    }
                }

                // Minimum spacing between consecutive remote calls
                tokio::time::sleep(self.pacing_delay).await;
            }
        }

        Ok(outcomes)
    }
}

/// Content for a field/locale pair: the pending buffer first, then the
/// persisted store. Bodies whose plain-text extraction is blank count as
/// absent.
fn read_content(
    store: &dyn RichTextFields,
    buffer: &PendingWriteBuffer,
    field: &str,
    locale: &LocaleCode,
) -> Option<String> {
    if let Some(staged) = buffer.get(field, locale) {
        if !extract_plain_text(staged).trim().is_empty() {
            return Some(staged.to_string());
        }
    }

    let body = store.body(field, locale)?;
    if extract_plain_text(&body).trim().is_empty() {
        return None;
    }
    Some(body)
}

/// Stage a translated body, and upsert it immediately when the record is
/// already durably stored; otherwise the record's own save commits the buffer.
fn write_content(
    store: &mut dyn RichTextFields,
    buffer: &mut PendingWriteBuffer,
    field: &str,
    locale: &LocaleCode,
    body: &str,
) {
    buffer.stage(field, locale, body);
    if store.is_persisted() {
        store.upsert_body(field, locale, body);
    }
}
