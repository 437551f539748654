//! Inline formatters.

use std::fmt::Write;

use mdterm_theme::{StyleResolver, StyleRole};

use crate::error::RenderError;
use crate::highlight::CodeHighlighter;
use crate::renderer::{RenderContext, TerminalRenderer};
use crate::tree::{EmphasisWeight, LineBreak, NodeId};

const TASK_BOX: &str = "[ ]";

impl<S, H> TerminalRenderer<'_, S, H>
where
    S: StyleResolver + ?Sized,
    H: CodeHighlighter + ?Sized,
{
    /// Write a text run.
    ///
    /// The parser ends a run at every line break, so source line breaks,
    /// soft or hard, are kept as newlines. Only a run built with embedded
    /// newlines joins its inner lines with spaces.
    pub(crate) fn text(
        &self,
        ctx: &mut RenderContext<'_, '_>,
        content: &str,
        line_break: Option<LineBreak>,
    ) {
        let mut lines = content.split('\n');
        if let Some(first) = lines.next() {
            ctx.out.push_str(first);
        }

        let mut rest = lines.peekable();
        while let Some(line) = rest.next() {
            let last = rest.peek().is_none() && line_break.is_none();
            ctx.out.push(if last { '\n' } else { ' ' });
            ctx.out.push_str(line);
        }

        if line_break.is_some() {
            ctx.out.push('\n');
        }
    }

    pub(crate) fn emphasis_enter(&self, ctx: &mut RenderContext<'_, '_>, weight: EmphasisWeight) {
        let role = match weight {
            EmphasisWeight::Italic => StyleRole::Italic,
            EmphasisWeight::Bold => StyleRole::Bold,
        };
        ctx.out.push_str(self.styles.resolve(role));
    }

    pub(crate) fn strikethrough_enter(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.out.push_str(self.styles.resolve(StyleRole::Strikethrough));
    }

    pub(crate) fn code_span(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId) {
        let literal = ctx.doc.child_text(id);
        ctx.out.push_str(&self.highlighter.highlight_inline(&literal));
    }

    pub(crate) fn link_enter(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.out.push_str(self.styles.resolve(StyleRole::Link));
    }

    pub(crate) fn link_exit(
        &self,
        ctx: &mut RenderContext<'_, '_>,
        destination: &str,
    ) -> Result<(), RenderError> {
        write!(ctx.out, " ({destination})")?;
        self.reset(ctx);
        Ok(())
    }

    pub(crate) fn autolink(&self, ctx: &mut RenderContext<'_, '_>, url: &str) {
        ctx.out.push_str(&self.styles.style(url, StyleRole::Link));
    }

    /// Checked state is not shown: every task renders as an open box.
    pub(crate) fn task_check_box(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.out
            .push_str(&self.styles.style(TASK_BOX, StyleRole::BulletPoint));
        ctx.out.push(' ');
    }
}
