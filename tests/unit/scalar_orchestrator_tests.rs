/*!
 * Tests for the scalar-field orchestrator
 */

use std::sync::Arc;

use lingofill::errors::{ClientErrorKind, OrchestrationError};
use lingofill::orchestration::{OutcomeStatus, SkipReason, TranslationOptions};
use lingofill::providers::mock::MockBackend;
use lingofill::record::{LocaleCode, MemoryRecord, RecordSchema, ScalarFields};

use crate::common;

fn titled_record() -> MemoryRecord {
    MemoryRecord::new(RecordSchema::new().with_scalar_fields(["title", "summary"]))
        .with_scalar_value("title", "fr", "Bonjour")
        .with_scalar_value("summary", "fr", "Un résumé")
}

fn fields(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn test_translateRecord_withBlankTargets_shouldTranslateAndWriteBack() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = titled_record();

    let options = TranslationOptions::new().to(["en"]);
    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["title", "summary"]), &options)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.is_translated()));
    let en = LocaleCode::from("en");
    assert_eq!(record.value("title", &en).as_deref(), Some("[en] Bonjour"));
    assert_eq!(
        record.value("summary", &en).as_deref(),
        Some("[en] Un résumé")
    );
    assert_eq!(backend.calls(), 2);
}

/// Second run with force off must skip everything it already translated
#[tokio::test]
async fn test_translateRecord_secondRunWithoutForce_shouldSkipEverything() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = titled_record();
    let options = TranslationOptions::new().to(["en"]);
    let field_list = fields(&["title", "summary"]);

    orchestrator
        .translate_record(&mut record, &field_list, &options)
        .await
        .unwrap();
    let second = orchestrator
        .translate_record(&mut record, &field_list, &options)
        .await
        .unwrap();

    assert_eq!(second.len(), 2);
    assert!(second.iter().all(|o| {
        o.status
            == OutcomeStatus::Skipped {
                reason: SkipReason::AlreadyTranslated,
            }
    }));
    assert_eq!(backend.calls(), 2);
}

/// Force must overwrite an existing non-blank target value
#[tokio::test]
async fn test_translateRecord_withForce_shouldOverwriteExistingTarget() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = titled_record().with_scalar_value("title", "en", "Stale translation");

    let options = TranslationOptions::new().to(["en"]).force(true);
    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["title"]), &options)
        .await
        .unwrap();

    assert!(outcomes[0].is_translated());
    assert_eq!(
        record.value("title", &LocaleCode::from("en")).as_deref(),
        Some("[en] Bonjour")
    );
}

#[tokio::test]
async fn test_translateRecord_withBlankSource_shouldSkipWithoutCall() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = MemoryRecord::new(RecordSchema::new().with_scalar_fields(["title"]))
        .with_scalar_value("title", "fr", "   ");

    let options = TranslationOptions::new().to(["en"]);
    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["title"]), &options)
        .await
        .unwrap();

    assert_eq!(
        outcomes[0].status,
        OutcomeStatus::Skipped {
            reason: SkipReason::EmptySource
        }
    );
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_translateRecord_withUndeclaredField_shouldSkipIt() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = titled_record();

    let options = TranslationOptions::new().to(["en"]);
    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["nickname"]), &options)
        .await
        .unwrap();

    assert_eq!(
        outcomes[0].status,
        OutcomeStatus::Skipped {
            reason: SkipReason::UndeclaredField
        }
    );
    assert_eq!(backend.calls(), 0);
}

/// One failing field must not prevent the other fields' attempts
#[tokio::test]
async fn test_translateRecord_withOneFailingField_shouldIsolateFailure() {
    let backend = Arc::new(MockBackend::fail_when_contains("Bonjour"));
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = titled_record();

    let options = TranslationOptions::new().to(["en"]);
    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["title", "summary"]), &options)
        .await
        .unwrap();

    assert!(matches!(
        outcomes[0].status,
        OutcomeStatus::Failed {
            kind: ClientErrorKind::Api,
            ..
        }
    ));
    assert!(outcomes[1].is_translated());
    assert_eq!(
        record.value("summary", &LocaleCode::from("en")).as_deref(),
        Some("[en] Un résumé")
    );
    assert!(record.value("title", &LocaleCode::from("en")).is_none());
}

#[tokio::test]
async fn test_translateRecord_withoutScalarCapability_shouldFail() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend);
    let mut record = MemoryRecord::new(RecordSchema::new().with_rich_text_fields(["context"]));

    let result = orchestrator
        .translate_record(
            &mut record,
            &fields(&["title"]),
            &TranslationOptions::new().to(["en"]),
        )
        .await;

    assert!(matches!(
        result,
        Err(OrchestrationError::MissingCapability { .. })
    ));
}

/// Targeting the source locale produces no outcomes and no calls
#[tokio::test]
async fn test_translateRecord_withSourceAsTarget_shouldDoNothing() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = titled_record();

    let options = TranslationOptions::new().to(["fr"]);
    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["title"]), &options)
        .await
        .unwrap();

    assert!(outcomes.is_empty());
    assert_eq!(backend.calls(), 0);
}

/// Outcome order follows caller-supplied locale order, then field order
#[tokio::test]
async fn test_translateRecord_shouldPreserveLocaleAndFieldOrder() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend);
    let mut record = titled_record();

    let options = TranslationOptions::new().to(["es", "en"]);
    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["summary", "title"]), &options)
        .await
        .unwrap();

    let pairs: Vec<(String, String)> = outcomes
        .iter()
        .map(|o| (o.locale.to_string(), o.field.clone()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("es".to_string(), "summary".to_string()),
            ("es".to_string(), "title".to_string()),
            ("en".to_string(), "summary".to_string()),
            ("en".to_string(), "title".to_string()),
        ]
    );
}

/// A duplicated target locale collapses to its first occurrence, so each
/// field/locale pair is visited exactly once
#[tokio::test]
async fn test_translateRecord_withDuplicateTargets_shouldVisitEachPairOnce() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = titled_record();

    let options = TranslationOptions::new().to(["en", "es", "en"]);
    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["title"]), &options)
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].locale, LocaleCode::from("en"));
    assert_eq!(outcomes[1].locale, LocaleCode::from("es"));
    assert_eq!(backend.calls(), 2);
}

/// Without explicit targets, all configured locales except the source apply
#[tokio::test]
async fn test_translateRecord_withDefaultTargets_shouldUseConfiguredLocales() {
    let backend = Arc::new(MockBackend::working());
    let orchestrator = common::scalar_orchestrator(backend.clone());
    let mut record = titled_record();

    let outcomes = orchestrator
        .translate_record(&mut record, &fields(&["title"]), &TranslationOptions::new())
        .await
        .unwrap();

    // Configured locales are fr, en, es with fr as the source
    assert_eq!(outcomes.len(), 2);
    assert_eq!(backend.calls(), 2);
    let en = LocaleCode::from("en");
    let es = LocaleCode::from("es");
    assert!(record.value("title", &en).is_some());
    assert!(record.value("title", &es).is_some());
}
