//! Terminal background detection.
//!
//! Detection is a pure function of a [`TerminalEnv`] snapshot. The CLI
//! captures the snapshot once at startup; tests build one from literals.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::ThemeError;

/// Terminal background brightness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Background {
    #[default]
    Dark,
    Light,
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dark => "dark",
            Self::Light => "light",
        })
    }
}

/// Configured background: detect it or force one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BackgroundPreference {
    #[default]
    Auto,
    Dark,
    Light,
}

impl BackgroundPreference {
    /// Resolve the preference, running detection only for `Auto`.
    #[must_use]
    pub fn resolve(self, env: &TerminalEnv) -> Background {
        match self {
            Self::Auto => detect_background(env),
            Self::Dark => Background::Dark,
            Self::Light => Background::Light,
        }
    }
}

impl FromStr for BackgroundPreference {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(ThemeError::UnknownBackground(s.to_owned())),
        }
    }
}

/// Snapshot of the environment variables relevant to theming.
#[derive(Clone, Debug, Default)]
pub struct TerminalEnv {
    vars: HashMap<String, String>,
    os: String,
}

impl TerminalEnv {
    /// Capture the current process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
            os: std::env::consts::OS.to_owned(),
        }
    }

    /// Build a snapshot from explicit variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            os: std::env::consts::OS.to_owned(),
        }
    }

    /// Override the operating system name (as in `std::env::consts::OS`).
    #[must_use]
    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = os.into();
        self
    }

    /// Look up a variable.
    #[must_use]
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    fn var_is(&self, name: &str, value: &str) -> bool {
        self.var(name) == Some(value)
    }
}

/// Terminals that ship with dark defaults.
const DARK_TERMINALS: &[&str] = &["alacritty", "kitty", "wezterm"];

/// Guess the terminal background from the environment.
///
/// Order: `COLORFGBG`, explicit dark hints, explicit light hints, then the
/// platform default (dark everywhere).
#[must_use]
pub fn detect_background(env: &TerminalEnv) -> Background {
    if let Some(background) = env.var("COLORFGBG").and_then(parse_colorfgbg) {
        tracing::debug!(%background, "Background from COLORFGBG");
        return background;
    }

    if is_dark_environment(env) {
        tracing::debug!("Background from dark theme hints");
        return Background::Dark;
    }

    if is_light_environment(env) {
        tracing::debug!("Background from light theme hints");
        return Background::Light;
    }

    tracing::debug!(os = %env.os, "No background hints, using dark default");
    Background::Dark
}

/// Parse `COLORFGBG` (`"fg;bg"` or `"fg;default;bg"`): the last field is the
/// background palette index.
fn parse_colorfgbg(value: &str) -> Option<Background> {
    let mut fields = value.split(';');
    fields.next()?;
    let bg: u8 = fields.last()?.trim().parse().ok()?;
    match bg {
        0..=7 => Some(Background::Dark),
        8..=15 => Some(Background::Light),
        _ => None,
    }
}

fn is_dark_environment(env: &TerminalEnv) -> bool {
    if env.var_is("DARK_MODE", "1") || env.var_is("THEME", "dark") || env.var_is("COLOR_SCHEME", "dark")
    {
        return true;
    }

    let term = env.var("TERM").unwrap_or_default().to_lowercase();
    let program = env.var("TERM_PROGRAM").unwrap_or_default().to_lowercase();
    DARK_TERMINALS
        .iter()
        .any(|name| term.contains(name) || program.contains(name))
}

fn is_light_environment(env: &TerminalEnv) -> bool {
    env.var_is("LIGHT_MODE", "1") || env.var_is("THEME", "light") || env.var_is("COLOR_SCHEME", "light")
}
