//! Render a markdown file and show it.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use mdterm_config::{CliSettings, Config};
use mdterm_highlight::SyntectHighlighter;
use mdterm_renderer::{CodeHighlighter, PlainHighlighter, TerminalRenderer};
use mdterm_theme::{BackgroundPreference, TerminalEnv, Theme};

use crate::error::CliError;
use crate::pager::Pager;

/// Arguments for viewing a file.
#[derive(Args, Debug)]
pub(crate) struct ViewArgs {
    /// Markdown file to render.
    file: PathBuf,

    /// Display in `less` with vim-style navigation.
    #[arg(short, long)]
    vim: bool,

    /// Print directly even if the config enables the pager.
    #[arg(long, conflicts_with = "vim")]
    no_pager: bool,

    /// Path to configuration file (default: auto-discover mdterm.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Terminal background: auto, dark or light (overrides config).
    #[arg(long, env = "MDTERM_BACKGROUND")]
    background: Option<BackgroundPreference>,

    /// Syntax highlighting theme (overrides config).
    #[arg(long)]
    syntax_theme: Option<String>,

    /// Enable verbose output.
    #[arg(long)]
    pub verbose: bool,
}

impl ViewArgs {
    /// Render the file and print it or page it.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let path = resolve_file(&self.file)?;
        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(config_path) = &config.config_path {
            tracing::info!(path = %config_path.display(), "Loaded config");
        }

        let theme = config.build_theme(&TerminalEnv::capture())?;
        tracing::info!(
            background = %theme.background(),
            syntax_theme = theme.syntax_theme(),
            "Theme ready"
        );

        let markdown = std::fs::read_to_string(&path)?;
        let rendered = render(&markdown, &theme, config.highlight.enabled)?;

        if config.pager.enabled {
            Pager::from_config(&config.pager).display(&rendered)?;
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
        Ok(())
    }

    fn cli_settings(&self) -> CliSettings {
        let pager_enabled = if self.vim {
            Some(true)
        } else if self.no_pager {
            Some(false)
        } else {
            None
        };
        CliSettings {
            background: self.background,
            syntax_theme: self.syntax_theme.clone(),
            pager_enabled,
        }
    }
}

/// Render markdown with syntect highlighting, or plain code styling when
/// highlighting is disabled.
fn render(markdown: &str, theme: &Theme, highlight: bool) -> Result<String, CliError> {
    let syntect;
    let plain;
    let highlighter: &dyn CodeHighlighter = if highlight {
        syntect = SyntectHighlighter::for_theme(theme);
        &syntect
    } else {
        plain = PlainHighlighter::new(theme);
        &plain
    };

    Ok(TerminalRenderer::new(theme, highlighter).render_markdown(markdown)?)
}

/// Make the path absolute and check that it exists.
fn resolve_file(file: &Path) -> Result<PathBuf, CliError> {
    let path = std::path::absolute(file)?;
    if !path.exists() {
        return Err(CliError::FileNotFound(path));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mdterm_theme::Background;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: ViewArgs,
    }

    fn parse(args: &[&str]) -> ViewArgs {
        TestCli::try_parse_from(std::iter::once("mdterm").chain(args.iter().copied()))
            .unwrap()
            .args
    }

    #[test]
    fn test_parse_flags() {
        let args = parse(&["-v", "--background", "light", "--syntax-theme", "InspiredGitHub", "README.md"]);
        assert!(args.vim);
        assert_eq!(args.file, PathBuf::from("README.md"));
        assert_eq!(args.background, Some(BackgroundPreference::Light));
        assert_eq!(args.syntax_theme.as_deref(), Some("InspiredGitHub"));
    }

    #[test]
    fn test_vim_conflicts_with_no_pager() {
        let result = TestCli::try_parse_from(["mdterm", "--vim", "--no-pager", "a.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_background_is_rejected() {
        let result = TestCli::try_parse_from(["mdterm", "--background", "grey", "a.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_settings_pager() {
        assert_eq!(parse(&["a.md"]).cli_settings().pager_enabled, None);
        assert_eq!(parse(&["--vim", "a.md"]).cli_settings().pager_enabled, Some(true));
        assert_eq!(parse(&["--no-pager", "a.md"]).cli_settings().pager_enabled, Some(false));
    }

    #[test]
    fn test_resolve_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.md");
        let err = resolve_file(&missing).unwrap_err();
        assert_eq!(err.to_string(), format!("file not found: {}", missing.display()));
    }

    #[test]
    fn test_resolve_file_makes_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("doc.md");
        std::fs::write(&file, "# Doc").unwrap();
        let resolved = resolve_file(&file).unwrap();
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_render_without_highlighting() {
        let theme = Theme::new(Background::Dark);
        let output = render("```rust\nfn main() {}\n```", &theme, false).unwrap();
        assert_eq!(output, "\n  \x1b[38;5;208mfn main() {}\x1b[0m\n");
    }

    #[test]
    fn test_render_with_highlighting() {
        let theme = Theme::new(Background::Dark);
        let output = render("```rust\nfn main() {}\n```", &theme, true).unwrap();
        assert!(output.contains("\x1b[38;2;"));
        assert!(output.starts_with("\n  "));
    }
}
