//! Theme error types.

/// Errors raised while building or customizing a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// Role name not recognized in a color override.
    #[error("Unknown style role: {0}")]
    UnknownRole(String),
    /// Color override is not a list of SGR parameters.
    #[error("Invalid color for {role}: {value:?} (expected SGR parameters like \"1;96\")")]
    InvalidColor {
        /// Role the override was meant for.
        role: String,
        /// Rejected value.
        value: String,
    },
    /// Background name not recognized.
    #[error("Unknown background: {0} (expected auto, dark or light)")]
    UnknownBackground(String),
}
