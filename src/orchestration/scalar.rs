/*!
 * Orchestrator for scalar (short, per-locale attribute) fields.
 */

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info};

use crate::app_config::Config;
use crate::errors::OrchestrationError;
use crate::orchestration::{
    is_blank, resolve_locales, SkipReason, TranslationOptions, TranslationOutcome,
};
use crate::providers::TranslationBackend;
use crate::record::{FieldKind, LocaleCode, TranslatableRecord};
use crate::translation::TextTranslator;

/// Translates the scalar fields of one record across target locales.
///
/// Iteration is strictly sequential: target locales in caller order, fields in
/// caller order. One failed pair never aborts the loop.
#[derive(Debug, Clone)]
pub struct ScalarOrchestrator {
    translator: TextTranslator,
    default_locale: LocaleCode,
    available_locales: Vec<LocaleCode>,
    pacing_delay: Duration,
}

impl ScalarOrchestrator {
    /// Create a new orchestrator
    pub fn new(
        translator: TextTranslator,
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
            TextTranslator::new(backend),
            config.default_locale_code(),
            config.available_locale_codes(),
            config.pacing_delay(),
        )
    }

    /// Translate the requested scalar fields of `record` into every target
    /// locale, returning one outcome per attempted field/locale pair.
    ///
    /// Fails with a capability error when the record type does not expose
    /// scalar field translation.
    pub async fn translate_record(
        &self,
        record: &mut dyn TranslatableRecord,
        fields: &[String],
        options: &TranslationOptions,
    ) -> Result<Vec<TranslationOutcome>, OrchestrationError> {
        let store = record
            .scalar_mut()
            .ok_or(OrchestrationError::MissingCapability {
                kind: FieldKind::Scalar,
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

                let source_value = store.value(field, &from);
                if is_blank(source_value.as_deref()) {
                    debug!("No source content for {} ({})", field, from);
                    outcomes.push(TranslationOutcome::skipped(
                        field,
                        target.clone(),
                        SkipReason::EmptySource,
                    ));
                    continue;
                }
                let source_value = source_value.unwrap_or_default();

                let existing = store.value(field, target);
                if !options.force && !is_blank(existing.as_deref()) {
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
                    .translate_text(
                        &source_value,
                        &from,
                        target,
                        options.context.as_deref(),
                        options.glossary.as_ref(),
                    )
                    .await
                {
                    Ok(translated) => {
                        store.set_value(field, target, &translated);
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
