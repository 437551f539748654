//! Shared helpers for terminal output.

use pulldown_cmark::HeadingLevel;

/// Indentation unit for one nesting level.
pub(crate) const INDENT_UNIT: &str = "  ";

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Indent every non-blank line of `text` by `levels` units.
///
/// Blank and whitespace-only lines are kept as they are.
#[must_use]
pub(crate) fn indent(text: &str, levels: usize) -> String {
    let prefix = INDENT_UNIT.repeat(levels);
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_owned()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip trailing spaces and tabs from every line, then end the text with
/// exactly one newline.
///
/// # Examples
///
/// ```
/// use mdterm_renderer::normalize_output;
///
/// assert_eq!(normalize_output("a  \nb\t\n\n\n"), "a\nb\n");
/// assert_eq!(normalize_output(""), "\n");
/// ```
#[must_use]
pub fn normalize_output(text: &str) -> String {
    let mut out = text
        .split('\n')
        .map(|line| line.trim_end_matches([' ', '\t']))
        .collect::<Vec<_>>()
        .join("\n");
    let content_len = out.trim_end_matches('\n').len();
    out.truncate(content_len);
    out.push('\n');
    out
}
