//! Render errors.

/// Error that aborts a render call.
///
/// No partial output is returned when rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Writing to the output buffer failed.
    #[error("failed to render markdown: {0}")]
    Format(#[from] std::fmt::Error),
}
