use pretty_assertions::assert_eq;
use summary_engine::{layout_markdown, BlockKind, InlineStyle, StyledLine};

fn blocks(lines: &[StyledLine]) -> Vec<BlockKind> {
    lines.iter().map(|line| line.block).collect()
}

fn texts(lines: &[StyledLine]) -> Vec<String> {
    lines.iter().map(StyledLine::text).collect()
}

#[test]
fn heading_and_paragraph_are_separated_by_blank_line() {
    let lines = layout_markdown("# Hi\n\nSome text\nwrapped here.");

    assert_eq!(
        blocks(&lines),
        vec![BlockKind::Heading(1), BlockKind::Blank, BlockKind::Paragraph]
    );
    assert_eq!(texts(&lines), vec!["Hi", "", "Some text wrapped here."]);
}

#[test]
fn bullet_and_numbered_lists_get_markers() {
    let lines = layout_markdown("- one\n- two\n\n3. three\n4. four\n");

    assert_eq!(
        texts(&lines),
        vec!["• one", "• two", "", "3. three", "4. four"]
    );
    assert_eq!(lines[0].block, BlockKind::ListItem { depth: 1 });
}

#[test]
fn nested_list_is_indented_one_level() {
    let lines = layout_markdown("- outer\n  - inner\n- next\n");

    assert_eq!(texts(&lines), vec!["• outer", "  • inner", "• next"]);
    assert_eq!(
        blocks(&lines),
        vec![
            BlockKind::ListItem { depth: 1 },
            BlockKind::ListItem { depth: 2 },
            BlockKind::ListItem { depth: 1 },
        ]
    );
}

#[test]
fn inline_styles_are_split_into_spans() {
    let lines = layout_markdown("plain **bold** *italic* `code`");
    let spans = &lines[0].spans;

    let styled: Vec<(&str, InlineStyle)> = spans
        .iter()
        .map(|span| (span.text.as_str(), span.style))
        .collect();
    assert_eq!(
        styled,
        vec![
            ("plain ", InlineStyle::default()),
            (
                "bold",
                InlineStyle {
                    strong: true,
                    ..InlineStyle::default()
                }
            ),
            (" ", InlineStyle::default()),
            (
                "italic",
                InlineStyle {
                    emphasis: true,
                    ..InlineStyle::default()
                }
            ),
            (" ", InlineStyle::default()),
            (
                "code",
                InlineStyle {
                    code: true,
                    ..InlineStyle::default()
                }
            ),
        ]
    );
}

#[test]
fn code_block_keeps_each_line() {
    let lines = layout_markdown("```rust\nfn main() {\n}\n```\nafter");

    assert_eq!(
        blocks(&lines),
        vec![
            BlockKind::CodeBlock,
            BlockKind::CodeBlock,
            BlockKind::Blank,
            BlockKind::Paragraph,
        ]
    );
    assert_eq!(texts(&lines)[..2], ["fn main() {", "}"]);
}

#[test]
fn blockquote_paragraph_is_marked_as_quote() {
    let lines = layout_markdown("> quoted words\n\nafter");

    assert_eq!(
        blocks(&lines),
        vec![BlockKind::BlockQuote, BlockKind::Blank, BlockKind::Paragraph]
    );
}

#[test]
fn rule_and_empty_input() {
    assert!(layout_markdown("").is_empty());

    let lines = layout_markdown("above\n\n---\n\nbelow");
    assert_eq!(
        blocks(&lines),
        vec![
            BlockKind::Paragraph,
            BlockKind::Blank,
            BlockKind::Rule,
            BlockKind::Blank,
            BlockKind::Paragraph,
        ]
    );
}
