/*!
 * Record-level orchestrator: field discovery, partitioning and aggregation.
 */

use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::app_config::Config;
use crate::errors::OrchestrationError;
use crate::orchestration::{
    RecordTranslationResult, RichTextOrchestrator, ScalarOrchestrator, TranslationOptions,
};
use crate::providers::chat_api::ChatApi;
use crate::providers::TranslationBackend;
use crate::record::{FieldDescriptor, FieldKind, PendingWriteBuffer, TranslatableRecord};

/// Entry point for translating a whole record.
///
/// Classifies the requested fields by the record type's declared capabilities,
/// delegates disjoint subsets to the field-kind orchestrators, and aggregates
/// their outcome reports.
#[derive(Debug, Clone)]
pub struct RecordTranslator {
    scalar: ScalarOrchestrator,
    rich_text: RichTextOrchestrator,
}

impl RecordTranslator {
    /// Create a record translator on top of an explicit backend
    pub fn new(config: &Config, backend: Arc<dyn TranslationBackend>) -> Self {
        Self {
            scalar: ScalarOrchestrator::from_config(config, Arc::clone(&backend)),
            rich_text: RichTextOrchestrator::from_config(config, backend),
        }
    }

    /// Create a record translator backed by the remote chat-completion API.
    /// Fails fast when the configuration carries no usable API key.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn TranslationBackend> = Arc::new(ChatApi::from_config(config)?);
        Ok(Self::new(config, backend))
    }

    /// Translate a record.
    ///
    /// When the options name no fields, every declared translatable field is
    /// used; a field declared as both kinds is treated as rich-text only.
    /// Requested names matching neither capability are silently dropped.
    pub async fn translate_record(
        &self,
        record: &mut dyn TranslatableRecord,
        buffer: &mut PendingWriteBuffer,
        options: &TranslationOptions,
    ) -> Result<RecordTranslationResult, OrchestrationError> {
        let requested = options
            .fields
            .clone()
            .unwrap_or_else(|| discover_fields(record));
        let descriptors = classify_fields(record, &requested);

        let scalar_fields: Vec<String> = descriptors
            .iter()
            .filter(|d| d.kind == FieldKind::Scalar)
            .map(|d| d.name.clone())
            .collect();
        let rich_text_fields: Vec<String> = descriptors
            .iter()
            .filter(|d| d.kind == FieldKind::RichText)
            .map(|d| d.name.clone())
            .collect();

        let mut result = RecordTranslationResult::default();
        if !scalar_fields.is_empty() {
            result.scalar = self
                .scalar
                .translate_record(record, &scalar_fields, options)
                .await?;
        }
        if !rich_text_fields.is_empty() {
            result.rich_text = self
                .rich_text
                .translate_record(record, buffer, &rich_text_fields, options)
                .await?;
        }
        Ok(result)
    }
}

/// Every declared translatable field of the record, scalar fields first,
/// rich-text classification winning for names declared as both.
pub fn discover_fields(record: &dyn TranslatableRecord) -> Vec<String> {
    let rich_text = record
        .rich_text()
        .map(|c| c.declared_fields())
        .unwrap_or_default();

    let mut fields: Vec<String> = record
        .scalar()
        .map(|c| c.declared_fields())
        .unwrap_or_default()
        .into_iter()
        .filter(|f| !rich_text.contains(f))
        .collect();

    for field in rich_text {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    fields
}

/// Classify requested field names by the record's declared capabilities.
///
/// Rich-text wins when a name is declared as both kinds; names matching
/// neither are dropped (callers may pass loosely-typed lists).
pub fn classify_fields(record: &dyn TranslatableRecord, names: &[String]) -> Vec<FieldDescriptor> {
    let scalar = record
        .scalar()
        .map(|c| c.declared_fields())
        .unwrap_or_default();
    let rich_text = record
        .rich_text()
        .map(|c| c.declared_fields())
        .unwrap_or_default();

    let mut descriptors = Vec::new();
    for name in names {
        if descriptors.iter().any(|d: &FieldDescriptor| &d.name == name) {
            continue;
        }
        if rich_text.contains(name) {
            descriptors.push(FieldDescriptor::new(name.clone(), FieldKind::RichText));
        } else if scalar.contains(name) {
            descriptors.push(FieldDescriptor::new(name.clone(), FieldKind::Scalar));
        } else {
            debug!("Dropping field '{}': not declared translatable", name);
        }
    }
    descriptors
}
