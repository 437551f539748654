//! Display rendered output through `less` (or another pager).

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use mdterm_config::PagerConfig;

/// Colors `less` uses for its own bold, underline and standout text.
const LESS_TERMCAP: [(&str, &str); 6] = [
    ("LESS_TERMCAP_md", "\x1b[1;36m"),
    ("LESS_TERMCAP_us", "\x1b[1;32m"),
    ("LESS_TERMCAP_so", "\x1b[1;44;33m"),
    ("LESS_TERMCAP_se", "\x1b[0m"),
    ("LESS_TERMCAP_ue", "\x1b[0m"),
    ("LESS_TERMCAP_me", "\x1b[0m"),
];

/// Well-known `less` locations tried when it is not on `PATH`.
const LESS_LOCATIONS: &[&str] = &[
    "/usr/bin/less",
    "/bin/less",
    "/opt/homebrew/bin/less",
    "/usr/local/bin/less",
];

const SEPARATOR_WIDTH: usize = 80;

/// Pager error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PagerError {
    #[error("no content to display")]
    NoContent,

    #[error("failed to start {}: {source}", .command.display())]
    Spawn {
        command: PathBuf,
        source: io::Error,
    },

    #[error("failed to write to pager: {0}")]
    Write(#[source] io::Error),

    #[error("{} command failed: {status}", .command.display())]
    Failed { command: PathBuf, status: ExitStatus },
}

/// External pager process.
#[derive(Debug)]
pub(crate) struct Pager {
    /// Resolved executable, `None` when it could not be found.
    command: Option<PathBuf>,
    args: Vec<String>,
}

impl Pager {
    /// Locate the configured pager.
    pub(crate) fn from_config(config: &PagerConfig) -> Self {
        let command = find_command(&config.command);
        match &command {
            Some(path) => tracing::debug!(path = %path.display(), "Found pager"),
            None => tracing::info!(command = %config.command, "Pager not found"),
        }
        Self {
            command,
            args: config.args.clone(),
        }
    }

    #[cfg(test)]
    fn with_command(command: Option<PathBuf>, args: &[&str]) -> Self {
        Self {
            command,
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
        }
    }

    /// Show `content` in the pager, or print it between separators when no
    /// pager is available.
    pub(crate) fn display(&self, content: &str) -> Result<(), PagerError> {
        if content.is_empty() {
            return Err(PagerError::NoContent);
        }

        match &self.command {
            Some(command) => self.run(command, content),
            None => {
                let stdout = io::stdout();
                fallback_display(&mut stdout.lock(), content).map_err(PagerError::Write)
            }
        }
    }

    fn run(&self, command: &Path, content: &str) -> Result<(), PagerError> {
        let mut child = Command::new(command)
            .args(&self.args)
            .envs(LESS_TERMCAP)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|source| PagerError::Spawn {
                command: command.to_path_buf(),
                source,
            })?;

        // Feed stdin from a separate thread: the pager only reads as the user
        // scrolls, and may quit before reading everything.
        let writer = child.stdin.take().map(|mut stdin| {
            let content = content.to_owned();
            std::thread::spawn(move || stdin.write_all(content.as_bytes()))
        });

        let status = child.wait().map_err(PagerError::Write)?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Err(err)) if err.kind() != io::ErrorKind::BrokenPipe => {
                    return Err(PagerError::Write(err));
                }
                _ => {}
            }
        }

        if exit_ok(status) {
            Ok(())
        } else {
            Err(PagerError::Failed {
                command: command.to_path_buf(),
                status,
            })
        }
    }
}

/// `less` exits with 1 on some normal quits; only higher codes and signals
/// are failures.
fn exit_ok(status: ExitStatus) -> bool {
    status.code().is_some_and(|code| code <= 1)
}

fn find_command(command: &str) -> Option<PathBuf> {
    if let Ok(path) = which::which(command) {
        return Some(path);
    }
    if command != "less" {
        return None;
    }
    LESS_LOCATIONS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Print content framed by separator lines, with a note that no pager is used.
fn fallback_display<W: Write>(out: &mut W, content: &str) -> io::Result<()> {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    writeln!(out, "Note: pager not available, displaying content directly:")?;
    writeln!(out, "{separator}")?;
    out.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(out, "{separator}")?;
    out.flush()
}
