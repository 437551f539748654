//! Language hint normalization and syntax lookup.

use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Canonical name for a fence language hint: trimmed, lowercased, and with
/// common spellings folded together.
#[must_use]
pub fn normalize_language(hint: &str) -> String {
    let lang = hint.trim().to_lowercase();
    let canonical = match lang.as_str() {
        "js" => "javascript",
        "ts" => "typescript",
        "py" | "python3" => "python",
        "rb" => "ruby",
        "sh" | "shell" => "bash",
        "yml" => "yaml",
        "golang" => "go",
        "rs" => "rust",
        "c++" | "cxx" => "cpp",
        "kt" => "kotlin",
        "docker" => "dockerfile",
        "make" => "makefile",
        "plain" | "txt" => "text",
        _ => return lang,
    };
    canonical.to_owned()
}

/// Find the syntax for a normalized language name.
///
/// Lookup order: token (extension, then case-insensitive name), exact
/// case-insensitive name, extension, then the alias table.
pub(crate) fn find_syntax<'s>(syntaxes: &'s SyntaxSet, language: &str) -> Option<&'s SyntaxReference> {
    if language.is_empty() {
        return None;
    }

    syntaxes
        .find_syntax_by_token(language)
        .or_else(|| {
            syntaxes
                .syntaxes()
                .iter()
                .find(|syntax| syntax.name.eq_ignore_ascii_case(language))
        })
        .or_else(|| syntaxes.find_syntax_by_extension(language))
        .or_else(|| {
            let alias = alias_for(language)?;
            syntaxes
                .find_syntax_by_token(alias)
                .or_else(|| syntaxes.find_syntax_by_name(alias))
        })
}

/// Token understood by the bundled syntaxes for names they do not carry.
fn alias_for(language: &str) -> Option<&'static str> {
    let alias = match language {
        "javascript" | "jsx" | "mjs" | "cjs" => "js",
        "typescript" | "tsx" => "ts",
        "bash" | "zsh" | "fish" | "ksh" => "sh",
        "jsonc" | "json5" => "json",
        "bat" | "cmd" | "batch" => "bat",
        "tex" | "latex" => "tex",
        "md" | "markdown" => "md",
        "makefile" => "Makefile",
        "text" => "txt",
        "html" | "xhtml" => "html",
        "objc" | "objective-c" => "m",
        "csharp" | "c#" => "cs",
        _ => return None,
    };
    Some(alias)
}
