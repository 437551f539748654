//! mdterm - render markdown files in the terminal.
//!
//! Prints the rendered file to stdout, or shows it in `less` with `--vim`.

mod error;
mod output;
mod pager;
mod view;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use output::Output;
use view::ViewArgs;

/// Render markdown with colors, tables and syntax highlighting.
#[derive(Parser)]
#[command(name = "mdterm", version, about)]
struct Cli {
    #[command(flatten)]
    view: ViewArgs,
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.view.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.view.execute() {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
