//! Container state tracked while walking the tree.
//!
//! One instance of each lives in the per-call render context, so concurrent
//! renders never share state.

use crate::tree::{Document, NodeId};
use crate::util::INDENT_UNIT;

/// State for tracking list nesting.
#[derive(Debug, Default)]
pub(crate) struct ListState {
    /// Number of lists currently open.
    depth: usize,
}

impl ListState {
    /// Enter a list.
    pub(crate) fn enter(&mut self) {
        self.depth += 1;
    }

    /// Leave a list.
    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Indentation for an item of the innermost list: one unit per enclosing list.
    pub(crate) fn item_indent(&self) -> String {
        INDENT_UNIT.repeat(self.depth.saturating_sub(1))
    }
}

/// State for tracking table rendering.
#[derive(Debug, Default)]
pub(crate) struct TableState {
    /// Whether we're inside the header row.
    in_header: bool,
    /// Column count, taken from the header row on first use.
    columns: Option<usize>,
}

impl TableState {
    /// Start a new table.
    pub(crate) fn start(&mut self) {
        self.in_header = false;
        self.columns = None;
    }

    /// Start a row.
    pub(crate) fn start_row(&mut self, header: bool) {
        self.in_header = header;
    }

    /// End the current row.
    pub(crate) fn end_row(&mut self) {
        self.in_header = false;
    }

    /// Check if we're in the header row.
    pub(crate) fn is_in_header(&self) -> bool {
        self.in_header
    }

    /// Number of columns, counted from the cells of `header_row` the first time.
    pub(crate) fn column_count(&mut self, doc: &Document<'_>, header_row: NodeId) -> usize {
        *self
            .columns
            .get_or_insert_with(|| doc.children(header_row).count())
    }
}
