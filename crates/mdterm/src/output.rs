//! Colored status output on stderr.

use console::{Style, Term};

/// Terminal output formatter for messages that must not mix with rendered
/// markdown on stdout.
pub(crate) struct Output {
    term: Term,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            red: Style::new().red(),
        }
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
