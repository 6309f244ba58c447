/*!
 * # lingofill
 *
 * A Rust library for translating the localizable fields of structured records
 * into one or more target locales using an LLM chat-completion API.
 *
 * ## Features
 *
 * - Scalar (short attribute) and rich-text (HTML-bearing) field translation
 * - Idempotent skip/force semantics: existing translations are not redone
 *   unless forced
 * - Exponential-style retry schedule on rate-limit responses
 * - Fixed inter-call pacing toward the remote API
 * - Per-field failure isolation with a typed outcome report
 * - Optional call-time context and glossary embedded in the prompt
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `record`: Locale codes, field capability traits and the pending-write buffer
 * - `providers`: Translation backends:
 *   - `providers::chat_api`: HTTP client with rate-limit retry
 *   - `providers::mock`: Configurable backend for tests
 * - `translation`: Text and HTML translation services
 * - `orchestration`: Field-kind orchestrators and the record-level entry point
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod errors;
pub mod orchestration;
pub mod providers;
pub mod record;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use errors::{ClientError, ClientErrorKind, OrchestrationError};
pub use orchestration::{
    OutcomeStatus, RecordTranslationResult, RecordTranslator, RichTextOrchestrator,
    ScalarOrchestrator, SkipReason, TranslationOptions, TranslationOutcome,
};
pub use providers::{Glossary, RetryPolicy, TranslationBackend};
pub use record::{
    FieldDescriptor, FieldKind, LocaleCode, MemoryRecord, PendingWriteBuffer, RecordSchema,
    RichTextFields, ScalarFields, TranslatableRecord,
};
pub use translation::{HtmlTranslator, TextTranslator};
