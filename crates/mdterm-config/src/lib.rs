//! Configuration management for mdterm.
//!
//! Parses `mdterm.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `highlight.theme`
//! - `pager.command`
//! - `pager.args`

mod expand;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use mdterm_theme::{BackgroundPreference, TerminalEnv, Theme, ThemeError};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override background detection.
    pub background: Option<BackgroundPreference>,
    /// Override the syntax highlighting theme.
    pub syntax_theme: Option<String>,
    /// Override pager usage.
    pub pager_enabled: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdterm.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Terminal color theme.
    pub theme: ThemeConfig,
    /// Code block highlighting.
    pub highlight: HighlightConfig,
    /// Pager for `--vim` mode.
    pub pager: PagerConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Theme configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Background to build the palette for.
    pub background: BackgroundPreference,
    /// SGR parameter overrides keyed by role name (e.g. `header1 = "1;31"`).
    pub colors: BTreeMap<String, String>,
}

/// Code highlighting configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Whether code blocks are syntax highlighted.
    pub enabled: bool,
    /// Syntect theme name; defaults to one matching the background.
    pub theme: Option<String>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            theme: None,
        }
    }
}

/// Pager configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Always page output, as if `--vim` was given.
    pub enabled: bool,
    /// Pager executable, looked up on `PATH`.
    pub command: String,
    /// Arguments passed to the pager.
    pub args: Vec<String>,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: "less".to_owned(),
            args: ["-R", "-S", "-X", "-F", "-K", "+g"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Invalid `[theme.colors]` entry.
    #[error("Invalid theme: {0}")]
    Theme(#[from] ThemeError),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`pager.command`").
        field: String,
        /// Error message (e.g., "${`PAGER`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdterm.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading, so they take precedence over
    /// config file values.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(background) = settings.background {
            self.theme.background = background;
        }
        if let Some(syntax_theme) = &settings.syntax_theme {
            self.highlight.theme = Some(syntax_theme.clone());
        }
        if let Some(pager_enabled) = settings.pager_enabled {
            self.pager.enabled = pager_enabled;
        }
    }

    /// Build the terminal theme: detect or force the background, apply color
    /// overrides and the syntax theme override.
    pub fn build_theme(&self, env: &TerminalEnv) -> Result<Theme, ConfigError> {
        let background = self.theme.background.resolve(env);
        let mut theme = Theme::new(background).with_colors(
            self.theme
                .colors
                .iter()
                .map(|(role, params)| (role.as_str(), params.as_str())),
        )?;
        if let Some(name) = &self.highlight.theme {
            theme = theme.with_syntax_theme(name.as_str());
        }
        Ok(theme)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(mut current: PathBuf) -> Option<PathBuf> {
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_theme()?;
        self.validate_highlight()?;
        self.validate_pager()?;
        Ok(())
    }

    /// Every color override must name a known role and hold SGR parameters.
    fn validate_theme(&self) -> Result<(), ConfigError> {
        Theme::default().with_colors(
            self.theme
                .colors
                .iter()
                .map(|(role, params)| (role.as_str(), params.as_str())),
        )?;
        Ok(())
    }

    fn validate_highlight(&self) -> Result<(), ConfigError> {
        if let Some(theme) = &self.highlight.theme {
            require_non_empty(theme, "highlight.theme")?;
        }
        Ok(())
    }

    fn validate_pager(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.pager.command, "pager.command")
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(theme) = &self.highlight.theme {
            self.highlight.theme = Some(expand::expand_env(theme, "highlight.theme")?);
        }

        self.pager.command = expand::expand_env(&self.pager.command, "pager.command")?;
        self.pager.args = self
            .pager
            .args
            .iter()
            .map(|arg| expand::expand_env(arg, "pager.args"))
            .collect::<Result<_, _>>()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdterm_theme::{Background, StyleResolver, StyleRole};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme.background, BackgroundPreference::Auto);
        assert!(config.theme.colors.is_empty());
        assert!(config.highlight.enabled);
        assert_eq!(config.highlight.theme, None);
        assert!(!config.pager.enabled);
        assert_eq!(config.pager.command, "less");
        assert_eq!(config.pager.args, vec!["-R", "-S", "-X", "-F", "-K", "+g"]);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.highlight.enabled);
        assert_eq!(config.pager.command, "less");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[theme]
background = "light"

[theme.colors]
header1 = "1;31"
code = "32"

[highlight]
enabled = false
theme = "Solarized (light)"

[pager]
enabled = true
command = "most"
args = ["-s"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.theme.background, BackgroundPreference::Light);
        assert_eq!(config.theme.colors.get("header1").map(String::as_str), Some("1;31"));
        assert!(!config.highlight.enabled);
        assert_eq!(config.highlight.theme.as_deref(), Some("Solarized (light)"));
        assert!(config.pager.enabled);
        assert_eq!(config.pager.command, "most");
        assert_eq!(config.pager.args, vec!["-s"]);
    }

    #[test]
    fn test_parse_invalid_background() {
        let result: Result<Config, _> = toml::from_str("[theme]\nbackground = \"grey\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_role() {
        let mut config = Config::default();
        config.theme.colors.insert("headline".to_owned(), "1".to_owned());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Theme(ThemeError::UnknownRole(_))));
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let mut config = Config::default();
        config.theme.colors.insert("code".to_owned(), "orange".to_owned());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Theme(ThemeError::InvalidColor { .. })));
    }

    #[test]
    fn test_validate_rejects_empty_pager() {
        let mut config = Config::default();
        config.pager.command = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: pager.command cannot be empty");
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            background: Some(BackgroundPreference::Dark),
            syntax_theme: Some("InspiredGitHub".to_owned()),
            pager_enabled: Some(true),
        });
        assert_eq!(config.theme.background, BackgroundPreference::Dark);
        assert_eq!(config.highlight.theme.as_deref(), Some("InspiredGitHub"));
        assert!(config.pager.enabled);
    }

    #[test]
    fn test_cli_settings_none_keeps_values() {
        let mut config = Config::default();
        config.pager.enabled = true;
        config.apply_cli_settings(&CliSettings::default());
        assert!(config.pager.enabled);
        assert_eq!(config.theme.background, BackgroundPreference::Auto);
    }

    #[test]
    fn test_build_theme() {
        let mut config = Config::default();
        config.theme.background = BackgroundPreference::Light;
        config.theme.colors.insert("bold".to_owned(), "1;4".to_owned());
        config.highlight.theme = Some("Solarized (light)".to_owned());

        let theme = config.build_theme(&TerminalEnv::from_vars([("THEME", "dark")])).unwrap();
        assert_eq!(theme.background(), Background::Light);
        assert_eq!(theme.resolve(StyleRole::Bold), "\x1b[1;4m");
        assert_eq!(theme.syntax_theme(), "Solarized (light)");
    }

    #[test]
    fn test_build_theme_detects_background() {
        let config = Config::default();
        let theme = config
            .build_theme(&TerminalEnv::from_vars([("COLORFGBG", "0;15")]))
            .unwrap();
        assert_eq!(theme.background(), Background::Light);
        assert_eq!(theme.syntax_theme(), "InspiredGitHub");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[pager]\ncommand = \"more\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.pager.command, "more");
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_applies_cli_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[theme]\nbackground = \"light\"\n").unwrap();

        let settings = CliSettings {
            background: Some(BackgroundPreference::Dark),
            ..CliSettings::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert_eq!(config.theme.background, BackgroundPreference::Dark);
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[pager\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_expands_env() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("MDTERM_TEST_CONFIG_PAGER", "bat");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[pager]\ncommand = \"${MDTERM_TEST_CONFIG_PAGER}\"\n\n[highlight]\ntheme = \"${MDTERM_TEST_CONFIG_UNSET:-base16-eighties.dark}\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.pager.command, "bat");
        assert_eq!(config.highlight.theme.as_deref(), Some("base16-eighties.dark"));
        unsafe {
            std::env::remove_var("MDTERM_TEST_CONFIG_PAGER");
        }
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_path, "").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config_from(nested), Some(config_path));
    }

    #[test]
    fn test_discover_ignores_directories_named_like_config() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join(CONFIG_FILENAME);
        std::fs::create_dir_all(&nested).unwrap();

        let found = Config::discover_config_from(nested.clone());
        assert_ne!(found, Some(nested.join(CONFIG_FILENAME)));
        assert_ne!(found, Some(nested));
    }
}
