//! Built-in palettes as SGR parameter lists.

use crate::StyleRole;

/// Escape sequence that clears all attributes.
pub const ANSI_RESET: &str = "\x1b[0m";

pub(crate) const DARK: &[(StyleRole, &str)] = &[
    (StyleRole::Header1, "1;96"),
    (StyleRole::Header2, "1;94"),
    (StyleRole::Header3, "1;95"),
    (StyleRole::Header4, "1;93"),
    (StyleRole::Header5, "1;92"),
    (StyleRole::Header6, "1;91"),
    (StyleRole::Bold, "1"),
    (StyleRole::Italic, "3"),
    (StyleRole::Strikethrough, "9"),
    (StyleRole::Code, "38;5;208"),
    (StyleRole::BlockQuote, "38;5;244"),
    (StyleRole::Link, "4;94"),
    (StyleRole::BulletPoint, "1;97"),
    (StyleRole::OrderedList, "1;97"),
    (StyleRole::TableHeader, "1;97"),
    (StyleRole::TableBorder, "38;5;244"),
    (StyleRole::Reset, "0"),
];

pub(crate) const LIGHT: &[(StyleRole, &str)] = &[
    (StyleRole::Header1, "1;34"),
    (StyleRole::Header2, "1;36"),
    (StyleRole::Header3, "1;35"),
    (StyleRole::Header4, "1;33"),
    (StyleRole::Header5, "1;32"),
    (StyleRole::Header6, "1;31"),
    (StyleRole::Bold, "1"),
    (StyleRole::Italic, "3"),
    (StyleRole::Strikethrough, "9"),
    (StyleRole::Code, "38;5;166"),
    (StyleRole::BlockQuote, "38;5;240"),
    (StyleRole::Link, "4;34"),
    (StyleRole::BulletPoint, "1;30"),
    (StyleRole::OrderedList, "1;30"),
    (StyleRole::TableHeader, "1;30"),
    (StyleRole::TableBorder, "38;5;240"),
    (StyleRole::Reset, "0"),
];

/// Build a CSI escape sequence from SGR parameters (`"1;96"` → `"\x1b[1;96m"`).
#[must_use]
pub fn sgr(params: &str) -> String {
    format!("\x1b[{params}m")
}

/// Check that a value contains only SGR parameters: digits separated by `;`.
pub(crate) fn is_valid_sgr(params: &str) -> bool {
    !params.is_empty()
        && params
            .split(';')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_cover_every_role() {
        for palette in [DARK, LIGHT] {
            for role in StyleRole::ALL {
                assert!(
                    palette.iter().any(|(r, _)| *r == role),
                    "missing {role} in palette"
                );
            }
        }
    }

    #[test]
    fn test_sgr() {
        assert_eq!(sgr("1;96"), "\x1b[1;96m");
        assert_eq!(sgr("0"), ANSI_RESET);
    }

    #[test]
    fn test_is_valid_sgr() {
        assert!(is_valid_sgr("1"));
        assert!(is_valid_sgr("38;5;208"));
        assert!(!is_valid_sgr(""));
        assert!(!is_valid_sgr("1;"));
        assert!(!is_valid_sgr("bold"));
        assert!(!is_valid_sgr("\x1b[1m"));
    }
}
