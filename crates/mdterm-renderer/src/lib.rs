//! Markdown to ANSI-styled terminal text.
//!
//! Markdown is parsed with pulldown-cmark into an arena-owned [`Document`]
//! tree, which [`TerminalRenderer`] walks depth-first. Every node kind has an
//! enter and an exit action; containers that render in one step (code blocks,
//! code spans, autolinks) skip their children.
//!
//! Colors come from a [`StyleResolver`](mdterm_theme::StyleResolver) and code
//! highlighting from a [`CodeHighlighter`]. Both are borrowed immutably, so a
//! single renderer can be shared across threads; all mutable state lives in a
//! per-call context.
//!
//! # Example
//!
//! ```
//! use mdterm_renderer::{Document, PlainHighlighter, render};
//! use mdterm_theme::Theme;
//!
//! let theme = Theme::default();
//! let doc = Document::parse("# Hello\n\n- one\n- two");
//! let output = render(&doc, &theme, &PlainHighlighter::new(&theme)).unwrap();
//! assert!(output.contains("# Hello"));
//! assert!(output.ends_with("two\n"));
//! ```

mod block;
mod error;
mod highlight;
mod inline;
mod parse;
mod renderer;
mod state;
mod table;
mod tree;
mod util;

pub use error::RenderError;
pub use highlight::{CodeHighlighter, HighlightError, PlainHighlighter};
pub use parse::gfm_options;
pub use renderer::{TerminalRenderer, render};
pub use tree::{Children, Document, EmphasisWeight, LineBreak, Node, NodeId, NodeKind};
pub use util::normalize_output;
