//! Build a [`Document`] from pulldown-cmark events.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag};

use crate::tree::{Document, EmphasisWeight, LineBreak, NodeId, NodeKind};
use crate::util::heading_level_to_num;

/// Parser options with GitHub Flavored Markdown extensions.
#[must_use]
pub fn gfm_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

impl<'a> Document<'a> {
    /// Parse markdown with GitHub Flavored Markdown extensions enabled.
    #[must_use]
    pub fn parse(markdown: &'a str) -> Self {
        Self::parse_with_options(markdown, gfm_options())
    }

    /// Parse markdown with explicit parser options.
    #[must_use]
    pub fn parse_with_options(markdown: &'a str, options: Options) -> Self {
        let mut builder = TreeBuilder::new(markdown);
        for (event, range) in Parser::new_ext(markdown, options).into_offset_iter() {
            builder.push(event, range);
        }
        builder.finish()
    }
}

/// Folds the flat event stream into an arena tree.
struct TreeBuilder<'a> {
    doc: Document<'a>,
    /// Open containers, innermost last. Never empty: the root stays at the bottom.
    open: Vec<NodeId>,
}

impl<'a> TreeBuilder<'a> {
    fn new(markdown: &'a str) -> Self {
        let doc = Document::new(markdown);
        let root = doc.root();
        Self {
            doc,
            open: vec![root],
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or_else(|| self.doc.root())
    }

    fn push(&mut self, event: Event<'a>, range: Range<usize>) {
        match event {
            Event::Start(tag) => {
                let id = self.doc.append(self.current(), kind_for_tag(tag), range);
                self.open.push(id);
            }
            Event::End(_) => {
                if self.open.len() > 1 {
                    self.open.pop();
                }
            }
            Event::Text(content) => self.push_text(content, range),
            Event::Code(content) => {
                let span = self.doc.append(self.current(), NodeKind::CodeSpan, range.clone());
                self.doc.append(
                    span,
                    NodeKind::Text {
                        content,
                        line_break: None,
                    },
                    range,
                );
            }
            Event::InlineHtml(_) => {
                self.doc.append(self.current(), NodeKind::RawHtml, range);
            }
            // Block HTML lines belong to the enclosing HtmlBlock, which is never printed.
            Event::Html(_) => {}
            Event::SoftBreak => self.push_break(LineBreak::Soft, range),
            Event::HardBreak => self.push_break(LineBreak::Hard, range),
            Event::Rule => {
                self.doc.append(self.current(), NodeKind::ThematicBreak, range);
            }
            Event::TaskListMarker(checked) => {
                self.doc
                    .append(self.current(), NodeKind::TaskCheckBox { checked }, range);
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                self.doc.append(self.current(), NodeKind::Unsupported, range);
            }
        }
    }

    fn push_text(&mut self, content: CowStr<'a>, range: Range<usize>) {
        self.doc.append(
            self.current(),
            NodeKind::Text {
                content,
                line_break: None,
            },
            range,
        );
    }

    /// Attach a break to the text run it terminates, or to a fresh empty run
    /// when the break follows a non-text inline.
    fn push_break(&mut self, kind: LineBreak, range: Range<usize>) {
        let parent = self.current();
        if let Some(last) = self.doc.last_child(parent)
            && let NodeKind::Text { line_break, .. } = self.doc.kind_mut(last)
            && line_break.is_none()
        {
            *line_break = Some(kind);
            return;
        }

        self.doc.append(
            parent,
            NodeKind::Text {
                content: CowStr::Borrowed(""),
                line_break: Some(kind),
            },
            range,
        );
    }

    fn finish(self) -> Document<'a> {
        self.doc
    }
}

fn kind_for_tag(tag: Tag<'_>) -> NodeKind<'_> {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading {
            level: heading_level_to_num(level),
        },
        Tag::BlockQuote(_) => NodeKind::Blockquote,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::FencedCodeBlock { info },
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::CodeBlock,
        Tag::HtmlBlock => NodeKind::HtmlBlock,
        Tag::List(start) => NodeKind::List {
            ordered: start.is_some(),
        },
        Tag::Item => NodeKind::ListItem,
        Tag::Table(_) => NodeKind::Table,
        Tag::TableHead => NodeKind::TableRow { header: true },
        Tag::TableRow => NodeKind::TableRow { header: false },
        Tag::TableCell => NodeKind::TableCell,
        Tag::Emphasis => NodeKind::Emphasis {
            weight: EmphasisWeight::Italic,
        },
        Tag::Strong => NodeKind::Emphasis {
            weight: EmphasisWeight::Bold,
        },
        Tag::Strikethrough => NodeKind::Strikethrough,
        Tag::Link {
            link_type: LinkType::Autolink | LinkType::Email,
            dest_url,
            ..
        } => NodeKind::AutoLink { url: dest_url },
        Tag::Link { dest_url, .. } => NodeKind::Link {
            destination: dest_url,
        },
        Tag::Image { dest_url, .. } => NodeKind::Image {
            destination: dest_url,
        },
        Tag::FootnoteDefinition(_)
        | Tag::DefinitionList
        | Tag::DefinitionListTitle
        | Tag::DefinitionListDefinition
        | Tag::MetadataBlock(_)
        | Tag::Superscript
        | Tag::Subscript => NodeKind::Unsupported,
    }
}
