//! Markdown to a line model that any front-end can style.
//!
//! The layout knows which block every line belongs to and which inline
//! emphasis every span carries. It knows nothing about colors: a renderer
//! looks each kind up in its own style table.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Heading level 1 to 6.
    Heading(u8),
    Paragraph,
    /// List item line; `depth` starts at 1 for a top-level list.
    ListItem { depth: usize },
    CodeBlock,
    BlockQuote,
    Rule,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct InlineStyle {
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
    pub link: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: InlineStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub block: BlockKind,
    pub spans: Vec<StyledSpan>,
}

impl StyledLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// Lays out `source` into styled lines, with one blank line between blocks.
pub fn layout_markdown(source: &str) -> Vec<StyledLine> {
    let mut builder = LayoutBuilder::default();
    for event in Parser::new(source) {
        builder.event(event);
    }
    builder.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Paragraph,
    Heading(u8),
    Quote,
    Code,
    List,
    Item,
    Strong,
    Emphasis,
    Link,
    Other,
}

#[derive(Default)]
struct LayoutBuilder {
    lines: Vec<StyledLine>,
    current: Vec<StyledSpan>,
    frames: Vec<Frame>,
    /// Next number per open list; `None` for bullet lists.
    counters: Vec<Option<u64>>,
}

impl LayoutBuilder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                if self.inside(Frame::Code) {
                    self.code_text(&text);
                } else {
                    self.push_text(&text, self.inline_style());
                }
            }
            Event::Code(code) => {
                let style = InlineStyle {
                    code: true,
                    ..self.inline_style()
                };
                self.push_text(&code, style);
            }
            Event::SoftBreak => self.push_text(" ", self.inline_style()),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(StyledLine {
                    block: BlockKind::Rule,
                    spans: Vec::new(),
                });
                self.blank();
            }
            Event::Html(raw) | Event::InlineHtml(raw) => {
                self.push_text(&raw, self.inline_style());
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph,
            Tag::Heading { level, .. } => {
                self.flush();
                Frame::Heading(heading_depth(level))
            }
            Tag::BlockQuote { .. } => {
                self.flush();
                Frame::Quote
            }
            Tag::CodeBlock { .. } => {
                self.flush();
                Frame::Code
            }
            Tag::List(first) => {
                self.flush();
                self.counters.push(first);
                Frame::List
            }
            Tag::Item => {
                self.flush();
                let marker = match self.counters.last_mut() {
                    Some(Some(next)) => {
                        let marker = format!("{next}. ");
                        *next += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                let indent = "  ".repeat(self.counters.len().saturating_sub(1));
                self.push_text(&format!("{indent}{marker}"), InlineStyle::default());
                Frame::Item
            }
            Tag::Strong => Frame::Strong,
            Tag::Emphasis => Frame::Emphasis,
            Tag::Link { .. } => Frame::Link,
            _ => Frame::Other,
        };
        self.frames.push(frame);
    }

    fn end(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match frame {
            Frame::Paragraph => {
                self.flush_as(self.block_kind_with(Frame::Paragraph));
                if !self.inside(Frame::Item) {
                    self.blank();
                }
            }
            Frame::Heading(level) => {
                self.flush_as(BlockKind::Heading(level));
                self.blank();
            }
            Frame::Item => {
                self.flush_as(BlockKind::ListItem {
                    depth: self.counters.len(),
                });
            }
            Frame::List => {
                self.flush();
                self.counters.pop();
                if self.counters.is_empty() {
                    self.blank();
                }
            }
            Frame::Code | Frame::Quote => {
                self.flush();
                self.blank();
            }
            Frame::Strong | Frame::Emphasis | Frame::Link | Frame::Other => {}
        }
    }

    fn inside(&self, frame: Frame) -> bool {
        self.frames.contains(&frame)
    }

    fn inline_style(&self) -> InlineStyle {
        InlineStyle {
            strong: self.inside(Frame::Strong),
            emphasis: self.inside(Frame::Emphasis),
            code: false,
            link: self.inside(Frame::Link),
        }
    }

    /// Block kind for text at the current nesting, given the frame being closed.
    fn block_kind_with(&self, closing: Frame) -> BlockKind {
        let open = self.frames.iter().chain(std::iter::once(&closing));
        let mut kind = BlockKind::Paragraph;
        for frame in open {
            match frame {
                Frame::Heading(level) => return BlockKind::Heading(*level),
                Frame::Code => return BlockKind::CodeBlock,
                Frame::Item => {
                    kind = BlockKind::ListItem {
                        depth: self.counters.len(),
                    }
                }
                Frame::Quote if !matches!(kind, BlockKind::ListItem { .. }) => {
                    kind = BlockKind::BlockQuote
                }
                _ => {}
            }
        }
        kind
    }

    fn push_text(&mut self, text: &str, style: InlineStyle) {
        if text.is_empty() {
            return;
        }
        match self.current.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.current.push(StyledSpan {
                text: text.to_string(),
                style,
            }),
        }
    }

    fn code_text(&mut self, text: &str) {
        for line in text.lines() {
            self.lines.push(StyledLine {
                block: BlockKind::CodeBlock,
                spans: vec![StyledSpan {
                    text: line.to_string(),
                    style: InlineStyle {
                        code: true,
                        ..InlineStyle::default()
                    },
                }],
            });
        }
    }

    fn flush(&mut self) {
        let kind = self.block_kind_with(Frame::Other);
        self.flush_as(kind);
    }

    fn flush_as(&mut self, block: BlockKind) {
        if self.current.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.current);
        self.lines.push(StyledLine { block, spans });
    }

    fn blank(&mut self) {
        match self.lines.last() {
            None => {}
            Some(line) if line.block == BlockKind::Blank => {}
            Some(_) => self.lines.push(StyledLine {
                block: BlockKind::Blank,
                spans: Vec::new(),
            }),
        }
    }

    fn finish(mut self) -> Vec<StyledLine> {
        self.flush();
        while self
            .lines
            .last()
            .is_some_and(|line| line.block == BlockKind::Blank)
        {
            self.lines.pop();
        }
        self.lines
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
