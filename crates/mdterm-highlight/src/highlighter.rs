//! Syntect-backed [`CodeHighlighter`].

use mdterm_renderer::{CodeHighlighter, HighlightError};
use mdterm_theme::{StyleResolver, StyleRole, Theme};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme as SyntaxTheme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{LinesWithEndings, as_24_bit_terminal_escaped};

use crate::language::{find_syntax, normalize_language};

/// Syntect theme used when the requested one is not bundled.
pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";

/// Highlights code with syntect's bundled syntaxes and themes.
///
/// Syntaxes and the color theme are loaded once in the constructor; each
/// [`highlight`](CodeHighlighter::highlight) call only creates its own
/// line highlighter, so one instance can be shared between threads.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: SyntaxTheme,
    theme_name: String,
    /// Escape sequence for inline code and its reset, taken from the style resolver.
    code_style: String,
    reset: String,
}

impl SyntectHighlighter {
    /// Create a highlighter using `syntax_theme` for code blocks and `styles`
    /// for inline code.
    ///
    /// An unknown theme name falls back to [`DEFAULT_SYNTAX_THEME`].
    pub fn new<S: StyleResolver + ?Sized>(styles: &S, syntax_theme: &str) -> Self {
        let mut themes = ThemeSet::load_defaults();
        let (theme_name, theme) = match themes.themes.remove(syntax_theme) {
            Some(theme) => (syntax_theme.to_owned(), theme),
            None => {
                tracing::warn!(
                    theme = syntax_theme,
                    fallback = DEFAULT_SYNTAX_THEME,
                    "Unknown syntax theme, using fallback"
                );
                let theme = themes
                    .themes
                    .remove(DEFAULT_SYNTAX_THEME)
                    .unwrap_or_default();
                (DEFAULT_SYNTAX_THEME.to_owned(), theme)
            }
        };

        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
            theme_name,
            code_style: styles.resolve(StyleRole::Code).to_owned(),
            reset: styles.reset().to_owned(),
        }
    }

    /// Create a highlighter paired with a terminal theme, using its syntax theme name.
    #[must_use]
    pub fn for_theme(theme: &Theme) -> Self {
        Self::new(theme, theme.syntax_theme())
    }

    /// Name of the syntect theme in use.
    #[must_use]
    pub fn theme_name(&self) -> &str {
        &self.theme_name
    }

    /// Whether a language hint maps to a bundled syntax.
    #[must_use]
    pub fn supports(&self, language: &str) -> bool {
        find_syntax(&self.syntaxes, &normalize_language(language)).is_some()
    }

    /// Names of all bundled syntect themes.
    #[must_use]
    pub fn theme_names() -> Vec<String> {
        ThemeSet::load_defaults().themes.into_keys().collect()
    }

    fn syntax_for(&self, code: &str, language: &str) -> Result<&SyntaxReference, HighlightError> {
        let language = normalize_language(language);
        if language.is_empty() {
            let first_line = code.lines().next().unwrap_or_default();
            return self
                .syntaxes
                .find_syntax_by_first_line(first_line)
                .ok_or(HighlightError::NoLanguage);
        }

        find_syntax(&self.syntaxes, &language).ok_or(HighlightError::UnsupportedLanguage(language))
    }
}

impl CodeHighlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        if code.trim().is_empty() {
            return Ok(code.to_owned());
        }

        let syntax = self.syntax_for(code, language)?;
        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut out = String::with_capacity(code.len() * 4);
        for line in LinesWithEndings::from(code) {
            let ranges = lines
                .highlight_line(line, &self.syntaxes)
                .map_err(|e| HighlightError::Failed(e.to_string()))?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }

        let mut out = out.trim_end_matches('\n').to_owned();
        out.push_str(&self.reset);
        Ok(out)
    }

    fn highlight_inline(&self, code: &str) -> String {
        let mut out = String::with_capacity(self.code_style.len() + code.len() + self.reset.len());
        out.push_str(&self.code_style);
        out.push_str(code);
        out.push_str(&self.reset);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdterm_theme::Background;
    use pretty_assertions::assert_eq;

    fn highlighter() -> SyntectHighlighter {
        SyntectHighlighter::for_theme(&Theme::new(Background::Dark))
    }

    #[test]
    fn test_highlight_known_language() {
        let output = highlighter().highlight("fn main() {}\n", "rust").unwrap();
        assert!(output.contains("\x1b[38;2;"));
        assert!(output.ends_with("\x1b[0m"));
        assert_eq!(console::strip_ansi_codes(&output), "fn main() {}");
    }

    #[test]
    fn test_highlight_normalizes_hint() {
        let output = highlighter().highlight("x = 1\n", " PY ").unwrap();
        assert_eq!(console::strip_ansi_codes(&output), "x = 1");
    }

    #[test]
    fn test_highlight_keeps_inner_lines() {
        let output = highlighter()
            .highlight("let a = 1;\n\nlet b = 2;\n", "rs")
            .unwrap();
        assert_eq!(
            console::strip_ansi_codes(&output),
            "let a = 1;\n\nlet b = 2;"
        );
    }

    #[test]
    fn test_unknown_language_is_error() {
        let err = highlighter().highlight("x=1", "foo").unwrap_err();
        assert!(matches!(err, HighlightError::UnsupportedLanguage(ref lang) if lang == "foo"));
    }

    #[test]
    fn test_empty_hint_detects_shebang() {
        let output = highlighter()
            .highlight("#!/bin/bash\necho hi\n", "")
            .unwrap();
        assert!(output.contains("\x1b[38;2;"));
    }

    #[test]
    fn test_empty_hint_without_detection_is_error() {
        let err = highlighter().highlight("just words", "").unwrap_err();
        assert!(matches!(err, HighlightError::NoLanguage));
    }

    #[test]
    fn test_blank_code_is_unchanged() {
        assert_eq!(highlighter().highlight("  \n", "rust").unwrap(), "  \n");
        assert_eq!(highlighter().highlight("", "whatever").unwrap(), "");
    }

    #[test]
    fn test_inline_uses_code_role() {
        assert_eq!(highlighter().highlight_inline("x"), "\x1b[38;5;208mx\x1b[0m");

        let light = SyntectHighlighter::for_theme(&Theme::new(Background::Light));
        assert_eq!(light.highlight_inline("x"), "\x1b[38;5;166mx\x1b[0m");
    }

    #[test]
    fn test_theme_selection() {
        assert_eq!(highlighter().theme_name(), "base16-ocean.dark");

        let light = SyntectHighlighter::for_theme(&Theme::new(Background::Light));
        assert_eq!(light.theme_name(), "InspiredGitHub");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let theme = Theme::default();
        let highlighter = SyntectHighlighter::new(&theme, "no-such-theme");
        assert_eq!(highlighter.theme_name(), DEFAULT_SYNTAX_THEME);
    }

    #[test]
    fn test_theme_names_include_defaults() {
        let names = SyntectHighlighter::theme_names();
        assert!(names.iter().any(|name| name == "base16-ocean.dark"));
        assert!(names.iter().any(|name| name == "InspiredGitHub"));
    }

    #[test]
    fn test_supports() {
        let highlighter = highlighter();
        assert!(highlighter.supports("golang"));
        assert!(highlighter.supports("JSON"));
        assert!(!highlighter.supports("foo"));
    }

    #[test]
    fn test_highlighter_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyntectHighlighter>();
    }
}
