//! CLI error types.

use std::path::PathBuf;

use mdterm_config::ConfigError;
use mdterm_renderer::RenderError;

use crate::pager::PagerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Pager(#[from] PagerError),
}
