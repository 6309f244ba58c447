/*!
 * Translation orchestration.
 *
 * For one record, the orchestrators fan translation work out across target
 * locales and requested fields, apply skip-if-exists-unless-forced semantics,
 * isolate per-field failures, and aggregate typed outcomes:
 * - `scalar`: orchestrator for short per-locale attribute fields
 * - `rich_text`: orchestrator for HTML-bearing per-locale content fields
 * - `record`: field classification, partitioning and result aggregation
 */

use serde::{Deserialize, Serialize};

use crate::errors::ClientErrorKind;
use crate::providers::Glossary;
use crate::record::LocaleCode;

pub mod record;
pub mod rich_text;
pub mod scalar;

pub use record::RecordTranslator;
pub use rich_text::RichTextOrchestrator;
pub use scalar::ScalarOrchestrator;

/// Options bundle for one orchestration call
#[derive(Debug, Clone, Default)]
pub struct TranslationOptions {
    /// Source locale, defaults to the configured default locale
    pub from: Option<LocaleCode>,

    /// Target locales in order, defaults to all configured locales except the
    /// source
    pub to: Option<Vec<LocaleCode>>,

    /// Fields to translate, defaults to every declared translatable field
    pub fields: Option<Vec<String>>,

    /// Domain context embedded in the prompt
    pub context: Option<String>,

    /// Glossary applied at call time
    pub glossary: Option<Glossary>,

    /// Overwrite existing non-blank target values instead of skipping them
    pub force: bool,
}

impl TranslationOptions {
    /// Empty options: configured defaults apply
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source locale
    pub fn from(mut self, from: impl Into<LocaleCode>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the target locales
    pub fn to<I, L>(mut self, to: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<LocaleCode>,
    {
        self.to = Some(to.into_iter().map(Into::into).collect());
        self
    }

    /// Set the fields to translate
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Set the domain context
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the glossary
    pub fn glossary(mut self, glossary: Glossary) -> Self {
        self.glossary = Some(glossary);
        self
    }

    /// Set the force flag
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// Why a field/locale pair was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The source value was blank
    EmptySource,
    /// The target already holds a non-blank value and force was off
    AlreadyTranslated,
    /// The record type does not declare the field for this kind
    UndeclaredField,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySource => write!(f, "empty source"),
            Self::AlreadyTranslated => write!(f, "already translated"),
            Self::UndeclaredField => write!(f, "undeclared field"),
        }
    }
}

/// Result of one field/locale translation attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum OutcomeStatus {
    /// The field was translated and written back
    Translated,
    /// The pair needed no work
    Skipped {
        /// Why it was skipped
        reason: SkipReason,
    },
    /// The translation attempt failed; the loop continued
    Failed {
        /// Classification of the failure
        kind: ClientErrorKind,
        /// Human-readable failure message
        message: String,
    },
}

/// One entry of the outcome report, produced per attempted field/locale pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationOutcome {
    /// Field name
    pub field: String,
    /// Target locale
    pub locale: LocaleCode,
    /// What happened
    pub status: OutcomeStatus,
}

impl TranslationOutcome {
    /// Successful translation outcome
    pub fn translated(field: impl Into<String>, locale: LocaleCode) -> Self {
        Self {
            field: field.into(),
            locale,
            status: OutcomeStatus::Translated,
        }
    }

    /// Skipped outcome with a reason
    pub fn skipped(field: impl Into<String>, locale: LocaleCode, reason: SkipReason) -> Self {
        Self {
            field: field.into(),
            locale,
            status: OutcomeStatus::Skipped { reason },
        }
    }

    /// Failed outcome carrying the error classification and message
    pub fn failed(
        field: impl Into<String>,
        locale: LocaleCode,
        kind: ClientErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            locale,
            status: OutcomeStatus::Failed {
                kind,
                message: message.into(),
            },
        }
    }

    /// Whether this outcome is a successful translation
    pub fn is_translated(&self) -> bool {
        matches!(self.status, OutcomeStatus::Translated)
    }
}

/// Aggregated outcome report for one record orchestration call.
///
/// Built fresh per invocation; persistence of the underlying field values is
/// the collaborator's job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordTranslationResult {
    /// Outcomes from the scalar-field orchestrator, in iteration order
    pub scalar: Vec<TranslationOutcome>,
    /// Outcomes from the rich-text-field orchestrator, in iteration order
    pub rich_text: Vec<TranslationOutcome>,
}

impl RecordTranslationResult {
    /// All outcomes, scalar first
    pub fn outcomes(&self) -> impl Iterator<Item = &TranslationOutcome> {
        self.scalar.iter().chain(self.rich_text.iter())
    }

    /// Number of successful translations
    pub fn translated_count(&self) -> usize {
        self.outcomes().filter(|o| o.is_translated()).count()
    }

    /// Number of failed attempts
    pub fn failed_count(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o.status, OutcomeStatus::Failed { .. }))
            .count()
    }
}

/// Treat `None` and whitespace-only values as blank
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Resolve the source locale and ordered target locales from the options,
/// falling back to the configured defaults. The source is excluded from the
/// default target set. Targets are an ordered set: duplicates collapse to
/// their first occurrence so no `(field, locale)` pair is visited twice.
pub(crate) fn resolve_locales(
    options: &TranslationOptions,
    default_locale: &LocaleCode,
    available_locales: &[LocaleCode],
) -> (LocaleCode, Vec<LocaleCode>) {
    let from = options.from.clone().unwrap_or_else(|| default_locale.clone());
    let mut to = options.to.clone().unwrap_or_else(|| {
        available_locales
            .iter()
            .filter(|l| *l != &from)
            .cloned()
            .collect()
    });
    let mut seen = std::collections::HashSet::new();
    to.retain(|l| seen.insert(l.clone()));
    (from, to)
}
