/*!
 * Translation services layered on top of a translation backend:
 * - `text`: plain-text translation with blank and same-locale shortcuts
 * - `html`: rich-text translation via plain-text extraction
 */

pub mod html;
pub mod text;

pub use html::{extract_plain_text, HtmlTranslator};
pub use text::TextTranslator;
