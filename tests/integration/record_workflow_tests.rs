/*!
 * End-to-end record translation tests against the mock backend
 */

use std::sync::Arc;

use lingofill::errors::ClientErrorKind;
use lingofill::orchestration::{OutcomeStatus, SkipReason, TranslationOptions};
use lingofill::providers::mock::MockBackend;
use lingofill::record::{
    LocaleCode, MemoryRecord, PendingWriteBuffer, RecordSchema, RichTextFields, ScalarFields,
};

use crate::common;

/// Scalar `title` and rich-text `context` seeded in French, blank in English:
/// one orchestration call fills both and writes them where they belong.
#[tokio::test]
async fn test_translateRecord_endToEnd_shouldFillScalarAndRichTextTargets() {
    let backend = Arc::new(MockBackend::working());
    let translator = common::record_translator(backend.clone());
    let mut record = MemoryRecord::new(
        RecordSchema::new()
            .with_scalar_fields(["title"])
            .with_rich_text_fields(["context"]),
    )
    .persisted(true)
    .with_scalar_value("title", "fr", "Bonjour")
    .with_rich_text_body("context", "fr", "<p>Bonjour le monde</p>");
    let mut buffer = PendingWriteBuffer::new();

    let options = TranslationOptions::new().from("fr").to(["en"]);
    let result = translator
        .translate_record(&mut record, &mut buffer, &options)
        .await
        .unwrap();

    assert_eq!(result.scalar.len(), 1);
    assert_eq!(result.scalar[0].field, "title");
    assert_eq!(result.scalar[0].locale, LocaleCode::from("en"));
    assert!(result.scalar[0].is_translated());

    assert_eq!(result.rich_text.len(), 1);
    assert_eq!(result.rich_text[0].field, "context");
    assert_eq!(result.rich_text[0].locale, LocaleCode::from("en"));
    assert!(result.rich_text[0].is_translated());

    let en = LocaleCode::from("en");
    assert_eq!(record.value("title", &en).as_deref(), Some("[en] Bonjour"));
    assert_eq!(
        record.body("context", &en).as_deref(),
        Some("[en] Bonjour le monde")
    );
    assert_eq!(backend.calls(), 2);
}

/// Running the same orchestration twice must not redo any work
#[tokio::test]
async fn test_translateRecord_repeatedRun_shouldBeIdempotent() {
    let backend = Arc::new(MockBackend::working());
    let translator = common::record_translator(backend.clone());
    let mut record = common::project_record();
    let mut buffer = PendingWriteBuffer::new();
    let options = TranslationOptions::new().from("fr").to(["en"]);

    let first = translator
        .translate_record(&mut record, &mut buffer, &options)
        .await
        .unwrap();
    assert_eq!(first.translated_count(), 3);
    let calls_after_first = backend.calls();

    let second = translator
        .translate_record(&mut record, &mut buffer, &options)
        .await
        .unwrap();
    assert_eq!(second.translated_count(), 0);
    assert!(second.outcomes().all(|o| {
        o.status
            == OutcomeStatus::Skipped {
                reason: SkipReason::AlreadyTranslated,
            }
    }));
    assert_eq!(backend.calls(), calls_after_first);
}

/// A backend outage on one field leaves the rest of the record translated
#[tokio::test]
async fn test_translateRecord_withPartialOutage_shouldKeepOtherFields() {
    let backend = Arc::new(MockBackend::fail_when_contains("démonstration"));
    let translator = common::record_translator(backend);
    let mut record = common::project_record();
    let mut buffer = PendingWriteBuffer::new();

    let options = TranslationOptions::new().from("fr").to(["en"]);
    let result = translator
        .translate_record(&mut record, &mut buffer, &options)
        .await
        .unwrap();

    assert_eq!(result.failed_count(), 1);
    assert_eq!(result.translated_count(), 2);
    let en = LocaleCode::from("en");
    assert!(record.value("title", &en).is_some());
    assert!(record.value("summary", &en).is_none());
    assert!(record.body("context", &en).is_some());
}

/// Bad credentials fail every field/locale pair individually instead of
/// aborting the invocation; nothing is written back
#[test]
fn test_translateRecord_withBadCredentials_shouldRecordAuthFailurePerField() {
    let backend = Arc::new(MockBackend::auth_failing());
    let translator = common::record_translator(backend);
    let mut record = common::project_record();
    let mut buffer = PendingWriteBuffer::new();

    let options = TranslationOptions::new().from("fr").to(["en"]);
    let result = tokio_test::block_on(async {
        translator
            .translate_record(&mut record, &mut buffer, &options)
            .await
    })
    .unwrap();

    assert_eq!(result.failed_count(), 3);
    assert!(result.outcomes().all(|o| matches!(
        o.status,
        OutcomeStatus::Failed {
            kind: ClientErrorKind::Authentication,
            ..
        }
    )));
    let en = LocaleCode::from("en");
    assert!(record.value("title", &en).is_none());
    assert!(record.body("context", &en).is_none());
    assert!(buffer.is_empty());
}

/// Multiple target locales are filled in the caller-supplied order
#[tokio::test]
async fn test_translateRecord_withMultipleTargets_shouldFillEachLocale() {
    let backend = Arc::new(MockBackend::working());
    let translator = common::record_translator(backend);
    let mut record = common::project_record();
    let mut buffer = PendingWriteBuffer::new();

    let options = TranslationOptions::new().from("fr").to(["en", "es"]);
    let result = translator
        .translate_record(&mut record, &mut buffer, &options)
        .await
        .unwrap();

    // 2 scalar fields x 2 locales, 1 rich-text field x 2 locales
    assert_eq!(result.scalar.len(), 4);
    assert_eq!(result.rich_text.len(), 2);
    assert_eq!(result.translated_count(), 6);

    for locale in ["en", "es"] {
        let locale = LocaleCode::from(locale);
        assert!(record.value("title", &locale).is_some());
        assert!(record.value("summary", &locale).is_some());
        assert!(record.body("context", &locale).is_some());
    }
}
