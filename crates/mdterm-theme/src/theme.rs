//! Background-aware theme.

use std::collections::HashMap;

use crate::detect::{Background, TerminalEnv, detect_background};
use crate::palette::{self, ANSI_RESET, is_valid_sgr, sgr};
use crate::{StyleResolver, StyleRole, ThemeError};

/// Color theme for a terminal background.
///
/// Built once at startup and read-only afterwards. Cheap to share by
/// reference across threads.
#[derive(Clone, Debug)]
pub struct Theme {
    background: Background,
    colors: HashMap<StyleRole, String>,
    syntax_theme: String,
}

impl Theme {
    /// Create the built-in theme for a background.
    #[must_use]
    pub fn new(background: Background) -> Self {
        let source = match background {
            Background::Dark => palette::DARK,
            Background::Light => palette::LIGHT,
        };
        let colors = source
            .iter()
            .map(|(role, params)| (*role, sgr(params)))
            .collect();

        Self {
            background,
            colors,
            syntax_theme: default_syntax_theme(background).to_owned(),
        }
    }

    /// Create a theme for the background detected from `env`.
    #[must_use]
    pub fn detect(env: &TerminalEnv) -> Self {
        Self::new(detect_background(env))
    }

    /// Override one role with SGR parameters (e.g. `"1;96"`).
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::InvalidColor`] if `params` is not a `;`-separated
    /// list of numbers.
    pub fn with_color(mut self, role: StyleRole, params: &str) -> Result<Self, ThemeError> {
        if !is_valid_sgr(params) {
            return Err(ThemeError::InvalidColor {
                role: role.name().to_owned(),
                value: params.to_owned(),
            });
        }
        self.colors.insert(role, sgr(params));
        Ok(self)
    }

    /// Apply overrides keyed by role name, as found in configuration files.
    ///
    /// # Errors
    ///
    /// Returns an error on the first unknown role or invalid color.
    pub fn with_colors<'a, I>(self, overrides: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        overrides.into_iter().try_fold(self, |theme, (name, params)| {
            let role: StyleRole = name.parse()?;
            theme.with_color(role, params)
        })
    }

    /// Use a different syntax highlighting theme name.
    #[must_use]
    pub fn with_syntax_theme(mut self, name: impl Into<String>) -> Self {
        self.syntax_theme = name.into();
        self
    }

    /// Background this theme was built for.
    #[must_use]
    pub fn background(&self) -> Background {
        self.background
    }

    /// Name of the syntax highlighting theme to pair with this palette.
    #[must_use]
    pub fn syntax_theme(&self) -> &str {
        &self.syntax_theme
    }
}

impl StyleResolver for Theme {
    fn resolve(&self, role: StyleRole) -> &str {
        self.colors
            .get(&role)
            .or_else(|| self.colors.get(&StyleRole::Reset))
            .map_or(ANSI_RESET, String::as_str)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(Background::default())
    }
}

fn default_syntax_theme(background: Background) -> &'static str {
    match background {
        Background::Dark => "base16-ocean.dark",
        Background::Light => "InspiredGitHub",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dark_theme_colors() {
        let theme = Theme::new(Background::Dark);
        assert_eq!(theme.resolve(StyleRole::Header1), "\x1b[1;96m");
        assert_eq!(theme.resolve(StyleRole::Code), "\x1b[38;5;208m");
        assert_eq!(theme.resolve(StyleRole::Link), "\x1b[4;94m");
        assert_eq!(theme.reset(), "\x1b[0m");
        assert_eq!(theme.syntax_theme(), "base16-ocean.dark");
    }

    #[test]
    fn test_light_theme_colors() {
        let theme = Theme::new(Background::Light);
        assert_eq!(theme.resolve(StyleRole::Header1), "\x1b[1;34m");
        assert_eq!(theme.resolve(StyleRole::TableBorder), "\x1b[38;5;240m");
        assert_eq!(theme.syntax_theme(), "InspiredGitHub");
    }

    #[test]
    fn test_every_role_resolves_to_non_empty_sequence() {
        for background in [Background::Dark, Background::Light] {
            let theme = Theme::new(background);
            for role in StyleRole::ALL {
                assert!(theme.resolve(role).starts_with("\x1b["), "{role}");
            }
        }
    }

    #[test]
    fn test_missing_role_falls_back_to_reset() {
        let mut theme = Theme::new(Background::Dark);
        theme.colors.remove(&StyleRole::Bold);
        assert_eq!(theme.resolve(StyleRole::Bold), "\x1b[0m");

        theme.colors.clear();
        assert_eq!(theme.resolve(StyleRole::Bold), ANSI_RESET);
    }

    #[test]
    fn test_style_wraps_with_reset() {
        let theme = Theme::new(Background::Dark);
        assert_eq!(theme.style("•", StyleRole::BulletPoint), "\x1b[1;97m•\x1b[0m");
        assert_eq!(theme.style_no_reset("# ", StyleRole::Header1), "\x1b[1;96m# ");
    }

    #[test]
    fn test_with_color_override() {
        let theme = Theme::new(Background::Dark)
            .with_color(StyleRole::Code, "32")
            .unwrap();
        assert_eq!(theme.resolve(StyleRole::Code), "\x1b[32m");
    }

    #[test]
    fn test_with_color_rejects_invalid() {
        let err = Theme::new(Background::Dark)
            .with_color(StyleRole::Code, "green")
            .unwrap_err();
        assert!(err.to_string().contains("code"));
    }

    #[test]
    fn test_with_colors_by_name() {
        let theme = Theme::new(Background::Light)
            .with_colors([("header2", "1;31"), ("table_border", "90")])
            .unwrap();
        assert_eq!(theme.resolve(StyleRole::Header2), "\x1b[1;31m");
        assert_eq!(theme.resolve(StyleRole::TableBorder), "\x1b[90m");
    }

    #[test]
    fn test_with_colors_unknown_role() {
        let result = Theme::new(Background::Dark).with_colors([("headline", "1")]);
        assert!(matches!(result, Err(ThemeError::UnknownRole(_))));
    }

    #[test]
    fn test_detect_uses_env() {
        let env = TerminalEnv::from_vars([("COLORFGBG", "0;15")]);
        assert_eq!(Theme::detect(&env).background(), Background::Light);
    }

    #[test]
    fn test_theme_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Theme>();
    }
}
