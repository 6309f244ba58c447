/*!
 * Record-side data model for field translation.
 *
 * A record type declares which of its fields are translatable and of which
 * kind through capability traits registered at type-definition time, instead
 * of resolving `<field>_<locale>` accessor names at runtime. The orchestrators
 * only ever talk to records through these traits.
 */

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a language/locale (e.g. "fr", "en").
///
/// Only compared for equality; translating from a locale to itself is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Create a new locale code
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The raw locale string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocaleCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for LocaleCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two kinds of translatable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Short flat attribute stored directly per locale (e.g. a title)
    Scalar,
    /// Long-form HTML-bearing attribute stored in a per-locale content record
    RichText,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::RichText => write!(f, "rich text"),
        }
    }
}

/// Identifies a translatable field by name and kind.
///
/// A field must not be claimed by both kinds at once; when a name appears in
/// both capability sets, rich-text classification wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Which orchestrator and accessor pattern applies
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Create a new field descriptor
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(), kind }
    }
}

/// Scalar-field translation capability.
///
/// Replaces the convention-based `<field>_<locale>` accessor pair with an
/// explicit getter/setter keyed by `(field, locale)`.
pub trait ScalarFields {
    /// Names of the scalar fields this record type declares as translatable
    fn declared_fields(&self) -> Vec<String>;

    /// Read the value of a field in a locale, `None` when unset
    fn value(&self, field: &str, locale: &LocaleCode) -> Option<String>;

    /// Write the value of a field in a locale
    fn set_value(&mut self, field: &str, locale: &LocaleCode, value: &str);
}

/// Rich-text-field translation capability, backed by a per-locale content
/// store with find-or-create-by-key upsert semantics.
pub trait RichTextFields {
    /// Names of the rich-text fields this record type declares as translatable
    fn declared_fields(&self) -> Vec<String>;

    /// Read the persisted body for a field in a locale, `None` when absent
    fn body(&self, field: &str, locale: &LocaleCode) -> Option<String>;

    /// Upsert the body for a field in a locale
    fn upsert_body(&mut self, field: &str, locale: &LocaleCode, body: &str);

    /// Whether the owning record is already durably stored.
    /// When false, writes stay in the pending buffer until the record's own
    /// save commits them.
    fn is_persisted(&self) -> bool;
}

/// A record that may expose one or both field-translation capabilities.
///
/// `None` from an accessor means the record type lacks that capability, which
/// the field-kind orchestrators surface as a capability error.
pub trait TranslatableRecord {
    /// Scalar capability, if declared
    fn scalar(&self) -> Option<&dyn ScalarFields>;

    /// Mutable scalar capability, if declared
    fn scalar_mut(&mut self) -> Option<&mut dyn ScalarFields>;

    /// Rich-text capability, if declared
    fn rich_text(&self) -> Option<&dyn RichTextFields>;

    /// Mutable rich-text capability, if declared
    fn rich_text_mut(&mut self) -> Option<&mut dyn RichTextFields>;
}

/// In-memory staging area for rich-text writes.
///
/// Rich-text translations may land before the owning record is first
/// persisted; they are staged here and drained by an explicit [`commit`]
/// the persistence collaborator invokes after its own save succeeds.
///
/// [`commit`]: PendingWriteBuffer::commit
#[derive(Debug, Clone, Default)]
pub struct PendingWriteBuffer {
    entries: HashMap<(String, LocaleCode), String>,
}

impl PendingWriteBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Staged body for a field/locale pair, if any
    pub fn get(&self, field: &str, locale: &LocaleCode) -> Option<&str> {
        self.entries
            .get(&(field.to_string(), locale.clone()))
            .map(String::as_str)
    }

    /// Stage a body for a field/locale pair, replacing any previous staging
    pub fn stage(&mut self, field: &str, locale: &LocaleCode, body: impl Into<String>) {
        self.entries
            .insert((field.to_string(), locale.clone()), body.into());
    }

    /// Whether nothing is staged
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of staged writes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Flush every staged write into the rich-text store and clear the buffer.
    ///
    /// Called by the persistence collaborator after the owning record's save
    /// completes.
    pub fn commit(&mut self, store: &mut dyn RichTextFields) {
        for ((field, locale), body) in self.entries.drain() {
            store.upsert_body(&field, &locale, &body);
        }
    }
}

/// Declared translatable fields of a [`MemoryRecord`] type.
///
/// `None` for a kind means the capability is absent entirely, not merely
/// empty; the distinction drives capability errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Declared scalar field names, absent when the capability is not exposed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar: Option<Vec<String>>,

    /// Declared rich-text field names, absent when the capability is not exposed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_text: Option<Vec<String>>,
}

impl RecordSchema {
    /// Schema with no capabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the scalar capability with the given field names
    pub fn with_scalar_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scalar = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Declare the rich-text capability with the given field names
    pub fn with_rich_text_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rich_text = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// A serde-friendly in-memory record implementing both capabilities.
///
/// Used by the CLI binary (records are plain JSON documents) and throughout
/// the test suite. Values are stored as field -> locale -> value maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Declared translatable fields
    #[serde(default)]
    pub schema: RecordSchema,

    /// Whether the record counts as durably stored
    #[serde(default)]
    pub persisted: bool,

    /// Scalar values keyed by field name then locale
    #[serde(default)]
    pub scalar_values: HashMap<String, HashMap<String, String>>,

    /// Rich-text bodies keyed by field name then locale
    #[serde(default)]
    pub rich_text_bodies: HashMap<String, HashMap<String, String>>,
}

impl MemoryRecord {
    /// Create an empty record with the given schema
    pub fn new(schema: RecordSchema) -> Self {
        Self {
            schema,
            ..Default::default()
        }
    }

    /// Mark the record as durably stored (or not)
    pub fn persisted(mut self, persisted: bool) -> Self {
        self.persisted = persisted;
        self
    }

    /// Seed a scalar value
    pub fn with_scalar_value(
        mut self,
        field: impl Into<String>,
        locale: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.scalar_values
            .entry(field.into())
            .or_default()
            .insert(locale.into(), value.into());
        self
    }

    /// Seed a rich-text body
    pub fn with_rich_text_body(
        mut self,
        field: impl Into<String>,
        locale: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.rich_text_bodies
            .entry(field.into())
            .or_default()
            .insert(locale.into(), body.into());
        self
    }
}

impl ScalarFields for MemoryRecord {
    fn declared_fields(&self) -> Vec<String> {
        self.schema.scalar.clone().unwrap_or_default()
    }

    fn value(&self, field: &str, locale: &LocaleCode) -> Option<String> {
        self.scalar_values
            .get(field)
            .and_then(|locales| locales.get(locale.as_str()))
            .cloned()
    }

    fn set_value(&mut self, field: &str, locale: &LocaleCode, value: &str) {
        self.scalar_values
            .entry(field.to_string())
            .or_default()
            .insert(locale.as_str().to_string(), value.to_string());
    }
}

impl RichTextFields for MemoryRecord {
    fn declared_fields(&self) -> Vec<String> {
        self.schema.rich_text.clone().unwrap_or_default()
    }

    fn body(&self, field: &str, locale: &LocaleCode) -> Option<String> {
        self.rich_text_bodies
            .get(field)
            .and_then(|locales| locales.get(locale.as_str()))
            .cloned()
    }

    fn upsert_body(&mut self, field: &str, locale: &LocaleCode, body: &str) {
        self.rich_text_bodies
            .entry(field.to_string())
            .or_default()
            .insert(locale.as_str().to_string(), body.to_string());
    }

    fn is_persisted(&self) -> bool {
        self.persisted
    }
}

impl TranslatableRecord for MemoryRecord {
    fn scalar(&self) -> Option<&dyn ScalarFields> {
        self.schema.scalar.as_ref().map(|_| self as &dyn ScalarFields)
    }

    fn scalar_mut(&mut self) -> Option<&mut dyn ScalarFields> {
        if self.schema.scalar.is_some() {
            Some(self as &mut dyn ScalarFields)
        } else {
            None
        }
    }

    fn rich_text(&self) -> Option<&dyn RichTextFields> {
        self.schema
            .rich_text
            .as_ref()
            .map(|_| self as &dyn RichTextFields)
    }

    fn rich_text_mut(&mut self) -> Option<&mut dyn RichTextFields> {
        if self.schema.rich_text.is_some() {
            Some(self as &mut dyn RichTextFields)
        } else {
            None
        }
    }
}
