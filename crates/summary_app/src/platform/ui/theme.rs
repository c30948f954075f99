//! Static style map from markdown block and inline kinds to terminal styles.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use summary_engine::{BlockKind, InlineStyle, StyledLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockClass {
    Heading1,
    Heading2,
    Heading3,
    MinorHeading,
    Paragraph,
    ListItem,
    CodeBlock,
    BlockQuote,
    Rule,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineClass {
    Strong,
    Emphasis,
    Code,
    Link,
}

struct BlockTheme {
    class: BlockClass,
    style: Style,
    prefix: &'static str,
}

const BLOCK_THEMES: &[BlockTheme] = &[
    BlockTheme {
        class: BlockClass::Heading1,
        style: Style::new()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD.union(Modifier::UNDERLINED)),
        prefix: "",
    },
    BlockTheme {
        class: BlockClass::Heading2,
        style: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        prefix: "",
    },
    BlockTheme {
        class: BlockClass::Heading3,
        style: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
        prefix: "",
    },
    BlockTheme {
        class: BlockClass::MinorHeading,
        style: Style::new().add_modifier(Modifier::BOLD),
        prefix: "",
    },
    BlockTheme {
        class: BlockClass::Paragraph,
        style: Style::new(),
        prefix: "",
    },
    BlockTheme {
        class: BlockClass::ListItem,
        style: Style::new(),
        prefix: "  ",
    },
    BlockTheme {
        class: BlockClass::CodeBlock,
        style: Style::new().fg(Color::Yellow).bg(Color::Black),
        prefix: "    ",
    },
    BlockTheme {
        class: BlockClass::BlockQuote,
        style: Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        prefix: "│ ",
    },
    BlockTheme {
        class: BlockClass::Rule,
        style: Style::new().fg(Color::DarkGray),
        prefix: "",
    },
    BlockTheme {
        class: BlockClass::Blank,
        style: Style::new(),
        prefix: "",
    },
];

/// Patched on top of the block style, in order.
const INLINE_THEMES: &[(InlineClass, Style)] = &[
    (InlineClass::Strong, Style::new().add_modifier(Modifier::BOLD)),
    (InlineClass::Emphasis, Style::new().add_modifier(Modifier::ITALIC)),
    (InlineClass::Code, Style::new().fg(Color::Yellow)),
    (
        InlineClass::Link,
        Style::new().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
    ),
];

const RULE_WIDTH: usize = 40;

fn block_class(kind: BlockKind) -> BlockClass {
    match kind {
        BlockKind::Heading(1) => BlockClass::Heading1,
        BlockKind::Heading(2) => BlockClass::Heading2,
        BlockKind::Heading(3) => BlockClass::Heading3,
        BlockKind::Heading(_) => BlockClass::MinorHeading,
        BlockKind::Paragraph => BlockClass::Paragraph,
        BlockKind::ListItem { .. } => BlockClass::ListItem,
        BlockKind::CodeBlock => BlockClass::CodeBlock,
        BlockKind::BlockQuote => BlockClass::BlockQuote,
        BlockKind::Rule => BlockClass::Rule,
        BlockKind::Blank => BlockClass::Blank,
    }
}

fn block_theme(kind: BlockKind) -> (Style, &'static str) {
    let class = block_class(kind);
    BLOCK_THEMES
        .iter()
        .find(|theme| theme.class == class)
        .map_or((Style::new(), ""), |theme| (theme.style, theme.prefix))
}

fn inline_classes(style: InlineStyle) -> impl Iterator<Item = InlineClass> {
    [
        (style.strong, InlineClass::Strong),
        (style.emphasis, InlineClass::Emphasis),
        (style.code, InlineClass::Code),
        (style.link, InlineClass::Link),
    ]
    .into_iter()
    .filter_map(|(on, class)| on.then_some(class))
}

pub fn span_style(block: BlockKind, inline: InlineStyle) -> Style {
    let (base, _) = block_theme(block);
    inline_classes(inline).fold(base, |style, class| {
        INLINE_THEMES
            .iter()
            .find(|(candidate, _)| *candidate == class)
            .map_or(style, |(_, patch)| style.patch(*patch))
    })
}

/// Styles laid-out summary lines for display.
pub fn styled_text(lines: &[StyledLine]) -> Text<'static> {
    let rendered: Vec<Line<'static>> = lines.iter().map(styled_line).collect();
    Text::from(rendered)
}

fn styled_line(line: &StyledLine) -> Line<'static> {
    let (style, prefix) = block_theme(line.block);
    if line.block == BlockKind::Rule {
        return Line::from(Span::styled("─".repeat(RULE_WIDTH), style));
    }
    let mut spans = Vec::with_capacity(line.spans.len() + 1);
    if !prefix.is_empty() {
        spans.push(Span::styled(prefix, style));
    }
    spans.extend(
        line.spans
            .iter()
            .map(|span| Span::styled(span.text.clone(), span_style(line.block, span.style))),
    );
    Line::from(spans)
}

/// Surrounding chrome: title, hints and panels.
pub mod chrome {
    use ratatui::style::{Color, Modifier, Style};

    pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    pub const PLACEHOLDER: Style = Style::new().fg(Color::DarkGray);
    pub const HINT: Style = Style::new().fg(Color::DarkGray);
    pub const VALIDATION: Style = Style::new().fg(Color::Red);
    pub const SUBMIT_ENABLED: Style = Style::new()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    pub const SUBMIT_DISABLED: Style = Style::new().fg(Color::DarkGray);
    pub const SPINNER: Style = Style::new().fg(Color::Cyan);
    pub const ERROR: Style = Style::new().fg(Color::Red);
    pub const NOTICE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
    pub const ONLINE: Style = Style::new().fg(Color::Green);
    pub const OFFLINE: Style = Style::new().fg(Color::Red);
    pub const UNKNOWN: Style = Style::new().fg(Color::Yellow);
}
