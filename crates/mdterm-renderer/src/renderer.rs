//! Tree walker that dispatches nodes to the block and inline formatters.

use mdterm_theme::StyleResolver;
use pulldown_cmark::Options;

use crate::error::RenderError;
use crate::highlight::CodeHighlighter;
use crate::parse::gfm_options;
use crate::state::{ListState, TableState};
use crate::tree::{Document, NodeId, NodeKind};
use crate::util::normalize_output;

/// What the walker does after a node's enter handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum WalkStatus {
    /// Descend into the children.
    Continue,
    /// Skip the children; the exit handler still runs.
    SkipChildren,
}

/// Pending step of the tree walk.
#[derive(Clone, Copy)]
enum Visit {
    Enter(NodeId),
    Exit(NodeId),
}

/// Mutable state for one render call.
pub(crate) struct RenderContext<'d, 'a> {
    pub(crate) doc: &'d Document<'a>,
    pub(crate) out: String,
    pub(crate) lists: ListState,
    pub(crate) table: TableState,
}

impl<'d, 'a> RenderContext<'d, 'a> {
    fn new(doc: &'d Document<'a>) -> Self {
        Self {
            doc,
            out: String::with_capacity(doc.source().len() * 2),
            lists: ListState::default(),
            table: TableState::default(),
        }
    }

    /// Make sure the output ends with a blank line, unless nothing was written yet.
    pub(crate) fn ensure_blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }
}

/// Markdown renderer producing ANSI-styled terminal text.
///
/// Holds only shared references, so one renderer can serve any number of
/// concurrent [`render`](Self::render) calls.
///
/// # Example
///
/// ```
/// use mdterm_renderer::{PlainHighlighter, TerminalRenderer};
/// use mdterm_theme::Theme;
///
/// let theme = Theme::default();
/// let highlighter = PlainHighlighter::new(&theme);
/// let output = TerminalRenderer::new(&theme, &highlighter)
///     .render_markdown("**Bold** text")
///     .unwrap();
/// assert!(output.ends_with("text\n"));
/// ```
pub struct TerminalRenderer<'r, S: ?Sized, H: ?Sized> {
    pub(crate) styles: &'r S,
    pub(crate) highlighter: &'r H,
    gfm: bool,
}

impl<'r, S, H> TerminalRenderer<'r, S, H>
where
    S: StyleResolver + ?Sized,
    H: CodeHighlighter + ?Sized,
{
    /// Create a renderer with GitHub Flavored Markdown enabled.
    #[must_use]
    pub fn new(styles: &'r S, highlighter: &'r H) -> Self {
        Self {
            styles,
            highlighter,
            gfm: true,
        }
    }

    /// Enable or disable GitHub Flavored Markdown for [`render_markdown`](Self::render_markdown).
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Parser options matching this renderer's configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            gfm_options()
        } else {
            Options::empty()
        }
    }

    /// Parse and render markdown source.
    pub fn render_markdown(&self, markdown: &str) -> Result<String, RenderError> {
        let doc = Document::parse_with_options(markdown, self.parser_options());
        self.render(&doc)
    }

    /// Render a parsed document.
    ///
    /// The result has no trailing spaces or tabs on any line and ends with
    /// exactly one newline.
    pub fn render(&self, doc: &Document<'_>) -> Result<String, RenderError> {
        let mut ctx = RenderContext::new(doc);
        self.walk(&mut ctx, doc.root())?;
        tracing::trace!(nodes = doc.len(), bytes = ctx.out.len(), "Rendered document");
        Ok(normalize_output(&ctx.out))
    }

    /// Depth-first walk driven by an explicit stack; deep nesting never grows
    /// the call stack.
    fn walk(&self, ctx: &mut RenderContext<'_, '_>, root: NodeId) -> Result<(), RenderError> {
        let doc = ctx.doc;
        let mut stack = vec![Visit::Enter(root)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(id) => {
                    let status = self.enter(ctx, id)?;
                    stack.push(Visit::Exit(id));
                    if status == WalkStatus::Continue
                        && let Some(child) = doc.first_child(id)
                    {
                        stack.push(Visit::Enter(child));
                    }
                }
                Visit::Exit(id) => {
                    self.exit(ctx, id)?;
                    if id != root
                        && let Some(next) = doc.next_sibling(id)
                    {
                        stack.push(Visit::Enter(next));
                    }
                }
            }
        }
        Ok(())
    }

    fn enter(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId) -> Result<WalkStatus, RenderError> {
        let doc = ctx.doc;
        match doc.kind(id) {
            NodeKind::Heading { level } => self.heading_enter(ctx, id, *level),
            NodeKind::Text {
                content,
                line_break,
            } => self.text(ctx, content, *line_break),
            NodeKind::Emphasis { weight } => self.emphasis_enter(ctx, *weight),
            NodeKind::Strikethrough => self.strikethrough_enter(ctx),
            NodeKind::CodeSpan => {
                self.code_span(ctx, id);
                return Ok(WalkStatus::SkipChildren);
            }
            NodeKind::FencedCodeBlock { .. } | NodeKind::CodeBlock => {
                let language = doc.kind(id).fence_language().unwrap_or_default();
                self.code_block(ctx, id, language);
                return Ok(WalkStatus::SkipChildren);
            }
            NodeKind::Blockquote => self.blockquote_enter(ctx),
            NodeKind::List { .. } => self.list_enter(ctx, id),
            NodeKind::ListItem => self.list_item_enter(ctx, id),
            NodeKind::Link { .. } | NodeKind::Image { .. } => self.link_enter(ctx),
            NodeKind::AutoLink { url } => {
                self.autolink(ctx, url);
                return Ok(WalkStatus::SkipChildren);
            }
            NodeKind::ThematicBreak => self.thematic_break(ctx),
            NodeKind::Table => self.table_enter(ctx),
            NodeKind::TableRow { header } => self.table_row_enter(ctx, *header),
            NodeKind::TableCell => self.table_cell_enter(ctx),
            NodeKind::TaskCheckBox { .. } => self.task_check_box(ctx),
            NodeKind::Unsupported | NodeKind::RawHtml | NodeKind::HtmlBlock => {
                return Ok(WalkStatus::SkipChildren);
            }
            NodeKind::Document | NodeKind::Paragraph => {}
        }
        Ok(WalkStatus::Continue)
    }

    fn exit(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId) -> Result<(), RenderError> {
        let doc = ctx.doc;
        match doc.kind(id) {
            NodeKind::Heading { .. } => self.heading_exit(ctx, id),
            NodeKind::Paragraph => self.paragraph_exit(ctx, id),
            NodeKind::Emphasis { .. } | NodeKind::Strikethrough => self.reset(ctx),
            NodeKind::Blockquote => self.blockquote_exit(ctx),
            NodeKind::List { .. } => self.list_exit(ctx, id),
            NodeKind::ListItem => self.list_item_exit(ctx),
            NodeKind::Link { destination } | NodeKind::Image { destination } => {
                self.link_exit(ctx, destination)?;
            }
            NodeKind::Table => self.table_exit(ctx),
            NodeKind::TableRow { header } => self.table_row_exit(ctx, id, *header),
            NodeKind::TableCell => self.table_cell_exit(ctx),
            NodeKind::Document
            | NodeKind::Text { .. }
            | NodeKind::CodeSpan
            | NodeKind::FencedCodeBlock { .. }
            | NodeKind::CodeBlock
            | NodeKind::AutoLink { .. }
            | NodeKind::RawHtml
            | NodeKind::HtmlBlock
            | NodeKind::ThematicBreak
            | NodeKind::TaskCheckBox { .. }
            | NodeKind::Unsupported => {}
        }
        Ok(())
    }

    /// Emit the reset sequence.
    pub(crate) fn reset(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.out.push_str(self.styles.reset());
    }
}

/// Render a document with the given styles and highlighter.
///
/// Shorthand for [`TerminalRenderer::new`] followed by [`TerminalRenderer::render`].
pub fn render<S, H>(doc: &Document<'_>, styles: &S, highlighter: &H) -> Result<String, RenderError>
where
    S: StyleResolver + ?Sized,
    H: CodeHighlighter + ?Sized,
{
    TerminalRenderer::new(styles, highlighter).render(doc)
}
