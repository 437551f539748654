//! Table formatter.
//!
//! Cells are not measured: every cell gets the same padding and the header
//! separator uses a fixed segment width per column.

use mdterm_theme::{StyleResolver, StyleRole};

use crate::highlight::CodeHighlighter;
use crate::renderer::{RenderContext, TerminalRenderer};
use crate::tree::NodeId;

const CELL_PADDING: usize = 14;
const SEPARATOR_SEGMENT_WIDTH: usize = 15;

const BORDER: &str = "│";

impl<S, H> TerminalRenderer<'_, S, H>
where
    S: StyleResolver + ?Sized,
    H: CodeHighlighter + ?Sized,
{
    pub(crate) fn table_enter(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.table.start();
        ctx.out.push('\n');
    }

    pub(crate) fn table_exit(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.table.start();
        ctx.out.push('\n');
    }

    pub(crate) fn table_row_enter(&self, ctx: &mut RenderContext<'_, '_>, header: bool) {
        ctx.table.start_row(header);
        ctx.out
            .push_str(&self.styles.style(BORDER, StyleRole::TableBorder));
    }

    pub(crate) fn table_row_exit(&self, ctx: &mut RenderContext<'_, '_>, id: NodeId, header: bool) {
        ctx.table.end_row();
        self.reset(ctx);
        ctx.out.push('\n');

        if header {
            let columns = ctx.table.column_count(ctx.doc, id);
            let separator = separator_line(columns);
            ctx.out
                .push_str(&self.styles.style(&separator, StyleRole::TableBorder));
            ctx.out.push('\n');
        }
    }

    pub(crate) fn table_cell_enter(&self, ctx: &mut RenderContext<'_, '_>) {
        ctx.out.push(' ');
        if ctx.table.is_in_header() {
            ctx.out.push_str(self.styles.resolve(StyleRole::TableHeader));
        }
    }

    pub(crate) fn table_cell_exit(&self, ctx: &mut RenderContext<'_, '_>) {
        if ctx.table.is_in_header() {
            self.reset(ctx);
        }
        ctx.out.push_str(&" ".repeat(CELL_PADDING));
        ctx.out
            .push_str(&self.styles.style(BORDER, StyleRole::TableBorder));
    }
}

/// Header separator: one segment per column, joined by crosses and capped.
fn separator_line(columns: usize) -> String {
    let segment = "─".repeat(SEPARATOR_SEGMENT_WIDTH);
    let mut line = String::from("├");
    line.push_str(&vec![segment; columns].join("┼"));
    line.push('┤');
    line
}
