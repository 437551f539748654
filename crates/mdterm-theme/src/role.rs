//! Symbolic style roles.

use std::fmt;
use std::str::FromStr;

use crate::ThemeError;

/// Document-semantic styling key resolved to an escape sequence by a theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleRole {
    Header1,
    Header2,
    Header3,
    Header4,
    Header5,
    Header6,
    Bold,
    Italic,
    Strikethrough,
    Code,
    BlockQuote,
    Link,
    BulletPoint,
    OrderedList,
    TableHeader,
    TableBorder,
    Reset,
}

impl StyleRole {
    /// Every role, in palette order.
    pub const ALL: [StyleRole; 17] = [
        StyleRole::Header1,
        StyleRole::Header2,
        StyleRole::Header3,
        StyleRole::Header4,
        StyleRole::Header5,
        StyleRole::Header6,
        StyleRole::Bold,
        StyleRole::Italic,
        StyleRole::Strikethrough,
        StyleRole::Code,
        StyleRole::BlockQuote,
        StyleRole::Link,
        StyleRole::BulletPoint,
        StyleRole::OrderedList,
        StyleRole::TableHeader,
        StyleRole::TableBorder,
        StyleRole::Reset,
    ];

    /// Heading role for a heading level.
    ///
    /// Level 1 gets the most prominent role. Levels above 6 (and 0) clamp to
    /// [`StyleRole::Header6`].
    #[must_use]
    pub fn heading(level: u8) -> Self {
        match level {
            1 => Self::Header1,
            2 => Self::Header2,
            3 => Self::Header3,
            4 => Self::Header4,
            5 => Self::Header5,
            _ => Self::Header6,
        }
    }

    /// Key used for this role in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Header1 => "header1",
            Self::Header2 => "header2",
            Self::Header3 => "header3",
            Self::Header4 => "header4",
            Self::Header5 => "header5",
            Self::Header6 => "header6",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
            Self::BlockQuote => "blockquote",
            Self::Link => "link",
            Self::BulletPoint => "bullet",
            Self::OrderedList => "ordered",
            Self::TableHeader => "table_header",
            Self::TableBorder => "table_border",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for StyleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleRole {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.name() == s)
            .ok_or_else(|| ThemeError::UnknownRole(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels_map_to_distinct_roles() {
        let roles: Vec<_> = (1..=6).map(StyleRole::heading).collect();
        assert_eq!(
            roles,
            vec![
                StyleRole::Header1,
                StyleRole::Header2,
                StyleRole::Header3,
                StyleRole::Header4,
                StyleRole::Header5,
                StyleRole::Header6,
            ]
        );
    }

    #[test]
    fn test_heading_level_clamps_to_weakest() {
        assert_eq!(StyleRole::heading(7), StyleRole::Header6);
        assert_eq!(StyleRole::heading(0), StyleRole::Header6);
    }

    #[test]
    fn test_name_round_trips_through_from_str() {
        for role in StyleRole::ALL {
            assert_eq!(role.name().parse::<StyleRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_name() {
        let err = "sparkles".parse::<StyleRole>().unwrap_err();
        assert!(matches!(err, ThemeError::UnknownRole(ref name) if name == "sparkles"));
    }
}
