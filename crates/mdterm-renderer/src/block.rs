//! Block-level formatters: headings, paragraphs, quotes, lists, code blocks
//! and thematic breaks.

use mdterm_theme::{StyleResolver, StyleRole};

use crate::highlight::CodeHighlighter;
use crate::renderer::{RenderContext, TerminalRenderer};
use crate::tree::{NodeId, NodeKind};
use crate::util::indent;

const HEADING_PREFIXES: [&str; 6] = ["# ", "## ", "### ", "#### ", "##### ", "###### "];

const BULLET_MARKER: &str = "•";
/// Ordered items all use the same marker; source numbering is not kept.
const ORDERED_MARKER: &str = "1.";
const BLOCKQUOTE_MARKER: &str = "│ ";
const THEMATIC_BREAK_WIDTH: usize = 50;

impl<S, H> TerminalRenderer<'_, S, H>
where
    S: StyleResolver + ?Sized,
    H: CodeHighlighter + ?Sized,
{
    pub(crate) fn heading_enter(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId, level: u8) {
        if ctx.doc.has_previous_sibling(id) {
            ctx.ensure_blank_line();
        }
        let prefix = HEADING_PREFIXES[usize::from(level.clamp(1, 6)) - 1];
        ctx.out
            .push_str(&self.styles.style_no_reset(prefix, StyleRole::heading(level)));
    }

    pub(crate) fn heading_exit(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId) {
        self.reset(ctx);
        ctx.out.push('\n');
        let doc = ctx.doc;
        if doc
            .next_sibling(id)
            .is_some_and(|next| !opens_with_newline(doc.kind(next)))
        {
            ctx.out.push('\n');
        }
    }

    pub(crate) fn paragraph_exit(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId) {
        ctx.out.push('\n');
        if ctx.doc.has_next_sibling(id) {
            ctx.out.push('\n');
        }
    }

    pub(crate) fn blockquote_enter(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.out.push('\n');
        ctx.out
            .push_str(&self.styles.style_no_reset(BLOCKQUOTE_MARKER, StyleRole::BlockQuote));
    }

    pub(crate) fn blockquote_exit(&self, ctx: &mut RenderContext<'_, '_>) {
        self.reset(ctx);
        ctx.out.push_str("\n\n");
    }

    pub(crate) fn list_enter(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId) {
        if ctx.doc.has_previous_sibling(id) {
            ctx.out.push('\n');
        }
        ctx.lists.enter();
    }

    pub(crate) fn list_exit(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId) {
        ctx.lists.exit();
        if ctx.doc.has_next_sibling(id) {
            ctx.out.push('\n');
        }
    }

    pub(crate) fn list_item_enter(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId) {
        let doc = ctx.doc;
        let ordered = doc
            .parent(id)
            .is_some_and(|parent| matches!(doc.kind(parent), NodeKind::List { ordered: true }));
        let marker = if ordered {
            self.styles.style(ORDERED_MARKER, StyleRole::OrderedList)
        } else {
            self.styles.style(BULLET_MARKER, StyleRole::BulletPoint)
        };

        ctx.out.push_str(&ctx.lists.item_indent());
        ctx.out.push_str(&marker);
        ctx.out.push(' ');
    }

    pub(crate) fn list_item_exit(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.out.push('\n');
    }

    /// Render a fenced or indented code block in one step.
    pub(crate) fn code_block(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId, language: &str) {
        let code = ctx.doc.child_text(id);
        let highlighted = self
            .highlighter
            .highlight(&code, language)
            .unwrap_or_else(|error| {
                tracing::debug!(language, %error, "Using plain code style");
                self.styles
                    .style(code.trim_end_matches('\n'), StyleRole::Code)
            });

        ctx.out.push('\n');
        ctx.out
            .push_str(&indent(highlighted.trim_end_matches('\n'), 1));
        ctx.out.push_str("\n\n");
    }

    pub(crate) fn thematic_break(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.out.push('\n');
        ctx.out.push_str(
            &self
                .styles
                .style(&"─".repeat(THEMATIC_BREAK_WIDTH), StyleRole::TableBorder),
        );
        ctx.out.push_str("\n\n");
    }
}

/// Blocks whose enter handler already starts with a newline after a sibling.
fn opens_with_newline(kind: &NodeKind<'_>) -> bool {
    matches!(
        kind,
        NodeKind::List { .. }
            | NodeKind::FencedCodeBlock { .. }
            | NodeKind::CodeBlock
            | NodeKind::Blockquote
            | NodeKind::ThematicBreak
            | NodeKind::Table
    )
}
