/*!
 * Common test utilities for the lingofill test suite
 */

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use lingofill::app_config::{ApiConfig, Config};
use lingofill::orchestration::{RecordTranslator, RichTextOrchestrator, ScalarOrchestrator};
use lingofill::providers::mock::MockBackend;
use lingofill::providers::TranslationBackend;
use lingofill::record::{LocaleCode, MemoryRecord, RecordSchema};
use lingofill::translation::{HtmlTranslator, TextTranslator};

/// Source locale used throughout the fixtures
pub const SOURCE_LOCALE: &str = "fr";

/// Locales available in the test configuration, source first
pub fn test_locales() -> Vec<LocaleCode> {
    vec!["fr".into(), "en".into(), "es".into()]
}

/// Configuration with a dummy API key, zero pacing and the test locales
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            api_key: "sk-test".to_string(),
            ..ApiConfig::default()
        },
        rate_limit_delay_ms: 0,
        default_locale: SOURCE_LOCALE.to_string(),
        available_locales: vec!["fr".to_string(), "en".to_string(), "es".to_string()],
        ..Config::default()
    }
}

/// Scalar orchestrator wired to a mock backend, zero pacing
pub fn scalar_orchestrator(backend: Arc<MockBackend>) -> ScalarOrchestrator {
    ScalarOrchestrator::new(
        TextTranslator::new(backend),
        LocaleCode::from(SOURCE_LOCALE),
        test_locales(),
        Duration::ZERO,
    )
}

/// Rich-text orchestrator wired to a mock backend, zero pacing
pub fn rich_text_orchestrator(backend: Arc<MockBackend>) -> RichTextOrchestrator {
    RichTextOrchestrator::new(
        HtmlTranslator::new(TextTranslator::new(backend)),
        LocaleCode::from(SOURCE_LOCALE),
        test_locales(),
        Duration::ZERO,
    )
}

/// Record-level translator wired to a mock backend
pub fn record_translator(backend: Arc<MockBackend>) -> RecordTranslator {
    let backend: Arc<dyn TranslationBackend> = backend;
    RecordTranslator::new(&test_config(), backend)
}

/// A persisted record with scalar `title`/`summary` fields and a rich-text
/// `context` field, seeded with French source content
pub fn project_record() -> MemoryRecord {
    MemoryRecord::new(
        RecordSchema::new()
            .with_scalar_fields(["title", "summary"])
            .with_rich_text_fields(["context"]),
    )
    .persisted(true)
    .with_scalar_value("title", "fr", "Bonjour")
    .with_scalar_value("summary", "fr", "Un projet de démonstration")
    .with_rich_text_body("context", "fr", "<p>Bonjour le monde</p>")
}
