//! Syntax highlighting for mdterm code blocks.
//!
//! [`SyntectHighlighter`] implements the renderer's [`CodeHighlighter`] seam
//! with syntect's bundled syntaxes and themes, emitting 24-bit color escapes.
//! Failures (unknown language, undetectable content) are returned as
//! [`HighlightError`]; the renderer falls back to plain code styling.
//!
//! ```
//! use mdterm_highlight::{CodeHighlighter, SyntectHighlighter};
//! use mdterm_theme::Theme;
//!
//! let highlighter = SyntectHighlighter::for_theme(&Theme::default());
//! assert!(highlighter.highlight("let x = 1;", "rust").is_ok());
//! assert!(highlighter.highlight("x", "not-a-language").is_err());
//! ```

mod highlighter;
mod language;

pub use highlighter::{DEFAULT_SYNTAX_THEME, SyntectHighlighter};
pub use language::normalize_language;
pub use mdterm_renderer::{CodeHighlighter, HighlightError};
