//! Syntax highlighting seam.
//!
//! The renderer only knows this trait. Implementations live elsewhere (the
//! `mdterm-highlight` crate wraps syntect); [`PlainHighlighter`] is the
//! built-in no-color fallback.

use mdterm_theme::{StyleResolver, StyleRole};

/// Error returned when a code block cannot be highlighted.
///
/// The renderer recovers from every variant by styling the code with
/// [`StyleRole::Code`].
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// No syntax is known for the language hint.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// No hint was given and the content did not identify a syntax.
    #[error("no language hint and no syntax detected from content")]
    NoLanguage,

    /// The highlighter itself failed.
    #[error("highlighting failed: {0}")]
    Failed(String),
}

/// Colors source code for terminal output.
///
/// Must be safe to share read-only across concurrent renders.
pub trait CodeHighlighter {
    /// Highlight a block of code with an optional language hint (may be empty).
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;

    /// Style a short inline code literal.
    fn highlight_inline(&self, code: &str) -> String;
}

/// Highlighter that styles all code with the theme's code color.
#[derive(Debug)]
pub struct PlainHighlighter<'a, S: ?Sized> {
    styles: &'a S,
}

impl<'a, S: StyleResolver + ?Sized> PlainHighlighter<'a, S> {
    #[must_use]
    pub fn new(styles: &'a S) -> Self {
        Self { styles }
    }
}

impl<S: StyleResolver + ?Sized> CodeHighlighter for PlainHighlighter<'_, S> {
    fn highlight(&self, code: &str, _language: &str) -> Result<String, HighlightError> {
        Ok(self
            .styles
            .style(code.trim_end_matches('\n'), StyleRole::Code))
    }

    fn highlight_inline(&self, code: &str) -> String {
        self.styles.style(code, StyleRole::Code)
    }
}
