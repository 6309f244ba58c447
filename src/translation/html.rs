/*!
 * Rich-text (HTML) translation service.
 *
 * HTML content is reduced to plain text before translation. Rebuilding the
 * original markup around the translated text is a documented limitation:
 * [`HtmlTranslator::translate_html`] returns translated plain text only.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ClientError;
use crate::providers::Glossary;
use crate::record::LocaleCode;
use crate::translation::TextTranslator;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Translates HTML-bearing content by extracting and translating its plain text
#[derive(Debug, Clone)]
pub struct HtmlTranslator {
    text: TextTranslator,
}

impl HtmlTranslator {
    /// Create a new HTML translator on top of a text translator
    pub fn new(text: TextTranslator) -> Self {
        Self { text }
    }

    /// Translate HTML-ish content.
    ///
    /// Blank input yields an empty string and `from == to` yields the input
    /// unchanged. Content whose plain-text extraction is blank (markup with
    /// nothing to say) is returned unchanged without a remote call.
    pub async fn translate_html(
        &self,
        html_content: &str,
        from: &LocaleCode,
        to: &LocaleCode,
        context: Option<&str>,
        glossary: Option<&Glossary>,
    ) -> Result<String, ClientError> {
        if html_content.trim().is_empty() {
            return Ok(String::new());
        }
        if from == to {
            return Ok(html_content.to_string());
        }

        let plain_text = extract_plain_text(html_content);
        if plain_text.trim().is_empty() {
            return Ok(html_content.to_string());
        }

        let translated = self
            .text
            .translate_text(&plain_text, from, to, context, glossary)
            .await?;
        Ok(preserve_html_structure(html_content, &plain_text, translated))
    }
}

/// Extract plain text from HTML-ish content.
///
/// Content without tag-like markup passes through unchanged; otherwise all
/// tag-like substrings are stripped and whitespace is collapsed.
pub fn extract_plain_text(html_content: &str) -> String {
    if !TAG_RE.is_match(html_content) {
        return html_content.to_string();
    }
    let without_tags = TAG_RE.replace_all(html_content, " ");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Placeholder for markup-preserving translation.
///
/// Rebuilding the source markup around the translated text needs real HTML
/// parsing and product sign-off; until then the translated plain text is
/// returned as-is.
fn preserve_html_structure(
    _original_html: &str,
    _original_text: &str,
    translated_text: String,
) -> String {
    translated_text
}
