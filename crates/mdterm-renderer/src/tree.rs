//! Arena-owned document tree.
//!
//! All nodes live in one vector; parent, child and sibling links are
//! [`NodeId`] indices into it. The tree is built once by the parser and only
//! read during rendering.

use std::ops::Range;

use pulldown_cmark::CowStr;

/// Index of a node in a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Line break that ends a text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineBreak {
    /// Plain newline in the source.
    Soft,
    /// Explicit break (two trailing spaces or a backslash).
    Hard,
}

/// Emphasis strength.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmphasisWeight {
    /// `*text*`
    Italic,
    /// `**text**`
    Bold,
}

/// Structural kind of a node.
///
/// Payloads borrow from the markdown source whenever the parser did not
/// have to unescape them.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind<'a> {
    Document,
    Heading {
        level: u8,
    },
    Paragraph,
    Text {
        content: CowStr<'a>,
        line_break: Option<LineBreak>,
    },
    Emphasis {
        weight: EmphasisWeight,
    },
    Strikethrough,
    /// Inline code. The literal is held by a single [`NodeKind::Text`] child.
    CodeSpan,
    /// Fenced code block; lines are [`NodeKind::Text`] children.
    FencedCodeBlock {
        info: CowStr<'a>,
    },
    /// Indented code block; lines are [`NodeKind::Text`] children.
    CodeBlock,
    Blockquote,
    List {
        ordered: bool,
    },
    ListItem,
    Link {
        destination: CowStr<'a>,
    },
    AutoLink {
        url: CowStr<'a>,
    },
    /// Image; the alt text is held by its children.
    Image {
        destination: CowStr<'a>,
    },
    RawHtml,
    HtmlBlock,
    ThematicBreak,
    Table,
    TableRow {
        header: bool,
    },
    TableCell,
    TaskCheckBox {
        checked: bool,
    },
    /// Construct the renderer has no terminal form for (footnotes, math,
    /// definition lists, metadata blocks).
    Unsupported,
}

impl NodeKind<'_> {
    /// Language hint of a fenced code block: the first word of the info string.
    #[must_use]
    pub fn fence_language(&self) -> Option<&str> {
        match self {
            Self::FencedCodeBlock { info } => Some(info.split_whitespace().next().unwrap_or("")),
            _ => None,
        }
    }
}

/// A node and its links.
#[derive(Debug)]
pub struct Node<'a> {
    kind: NodeKind<'a>,
    span: Range<usize>,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl<'a> Node<'a> {
    fn new(kind: NodeKind<'a>, span: Range<usize>) -> Self {
        Self {
            kind,
            span,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Structural kind.
    #[must_use]
    pub fn kind(&self) -> &NodeKind<'a> {
        &self.kind
    }

    /// Byte range of the node in the source.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Parsed markdown document.
#[derive(Debug)]
pub struct Document<'a> {
    source: &'a str,
    nodes: Vec<Node<'a>>,
}

impl<'a> Document<'a> {
    /// Create a document holding only the root node.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            nodes: vec![Node::new(NodeKind::Document, 0..source.len())],
        }
    }

    /// Root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Markdown source the tree was built from.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Number of nodes, including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no content besides the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Get a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id.index()]
    }

    /// Kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> &NodeKind<'a> {
        &self.node(id).kind
    }

    /// Parent of a node (`None` for the root).
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// First child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    /// Last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).last_child
    }

    /// Sibling following a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Whether a sibling precedes the node.
    #[must_use]
    pub fn has_previous_sibling(&self, id: NodeId) -> bool {
        self.node(id).prev_sibling.is_some()
    }

    /// Whether a sibling follows the node.
    #[must_use]
    pub fn has_next_sibling(&self, id: NodeId) -> bool {
        self.node(id).next_sibling.is_some()
    }

    /// Iterate over the children of a node in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_, 'a> {
        Children {
            doc: self,
            next: self.node(id).first_child,
        }
    }

    /// Source text covered by a node.
    #[must_use]
    pub fn source_text(&self, id: NodeId) -> &'a str {
        self.source.get(self.node(id).span.clone()).unwrap_or_default()
    }

    /// Concatenated content of the direct text children of a node.
    #[must_use]
    pub fn child_text(&self, id: NodeId) -> String {
        self.children(id)
            .filter_map(|child| match self.kind(child) {
                NodeKind::Text { content, .. } => Some(content.as_ref()),
                _ => None,
            })
            .collect()
    }

    /// Append a new node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind<'a>, span: Range<usize>) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        let prev = self.nodes[parent.index()].last_child;

        let mut node = Node::new(kind, span);
        node.parent = Some(parent);
        node.prev_sibling = prev;
        self.nodes.push(node);

        if let Some(prev) = prev {
            self.nodes[prev.index()].next_sibling = Some(id);
        }
        let parent_node = &mut self.nodes[parent.index()];
        parent_node.first_child.get_or_insert(id);
        parent_node.last_child = Some(id);

        id
    }

    /// Mutable kind, for the parser to fold line breaks into text runs.
    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind<'a> {
        &mut self.nodes[id.index()].kind
    }
}

/// Iterator over the children of a node.
pub struct Children<'d, 'a> {
    doc: &'d Document<'a>,
    next: Option<NodeId>,
}

impl Iterator for Children<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.node(current).next_sibling;
        Some(current)
    }
}
