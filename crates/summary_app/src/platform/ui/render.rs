use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use summary_core::{AppViewModel, BackendStatus, Panel};

use super::constants::*;
use super::layout::{self, ScreenAreas};
use super::theme::chrome;

/// Platform-side state the view model does not carry.
pub struct RenderContext<'a> {
    pub input_cursor: usize,
    pub spinner_frame: usize,
    pub scroll: u16,
    /// Styled summary, laid out once per summary.
    pub summary: &'a Text<'static>,
}

pub fn render(frame: &mut Frame<'_>, view: &AppViewModel, ctx: &RenderContext<'_>) {
    let areas = layout::split(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(APP_TITLE, chrome::TITLE))),
        areas.title,
    );
    render_input(frame, view, ctx, &areas);
    render_hint(frame, view, areas.hint);
    let submit_style = if view.submit_enabled {
        chrome::SUBMIT_ENABLED
    } else {
        chrome::SUBMIT_DISABLED
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(SUBMIT_LABEL, submit_style))),
        areas.submit,
    );
    render_panel(frame, &view.panel, ctx, areas.panel);
    render_status(frame, view.backend, areas.status);

    if let Some(notice) = &view.notice {
        render_notice(frame, notice);
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    view: &AppViewModel,
    ctx: &RenderContext<'_>,
    areas: &ScreenAreas,
) {
    let block = Block::default().borders(Borders::ALL).title(INPUT_TITLE);
    let inner = block.inner(areas.input);

    let before_cursor: String = view.input.chars().take(ctx.input_cursor).collect();
    let cursor_col = display_width(&before_cursor);
    // Scroll sideways so the cursor stays inside the box.
    let offset = cursor_col.saturating_sub(inner.width.saturating_sub(1));

    let content = if view.input.is_empty() {
        Line::from(Span::styled(INPUT_PLACEHOLDER, chrome::PLACEHOLDER))
    } else {
        Line::from(view.input.as_str())
    };
    frame.render_widget(
        Paragraph::new(content).block(block).scroll((0, offset)),
        areas.input,
    );

    if view.notice.is_none() && inner.width > 0 {
        frame.set_cursor_position((inner.x.saturating_add(cursor_col - offset), inner.y));
    }
}

fn render_hint(frame: &mut Frame<'_>, view: &AppViewModel, area: Rect) {
    let line = match &view.validation_error {
        Some(message) => Line::from(Span::styled(message.as_str(), chrome::VALIDATION)),
        None => Line::from(Span::styled(INPUT_HINT, chrome::HINT)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_panel(frame: &mut Frame<'_>, panel: &Panel, ctx: &RenderContext<'_>, area: Rect) {
    match panel {
        Panel::Form => {}
        Panel::Spinner => {
            let glyph = SPINNER_FRAMES[ctx.spinner_frame % SPINNER_FRAMES.len()];
            let line = Line::from(vec![
                Span::styled(format!("{glyph} "), chrome::SPINNER),
                Span::raw(LOADING_TEXT),
            ]);
            frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
        }
        Panel::Error(message) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(chrome::ERROR)
                .title(ERROR_TITLE);
            let body = Paragraph::new(Span::styled(message.as_str(), chrome::ERROR))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(body, area);
        }
        Panel::Summary(_) => {
            let body = summary_body(ctx.summary)
                .block(summary_block())
                .scroll((ctx.scroll, 0));
            frame.render_widget(body, area);
        }
    }
}

fn summary_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title(SUMMARY_TITLE)
}

fn summary_body(summary: &Text<'static>) -> Paragraph<'static> {
    Paragraph::new(summary.clone()).wrap(Wrap { trim: false })
}

/// Largest scroll offset that still fills the summary panel, counted in wrapped rows.
pub fn summary_max_scroll(summary: &Text<'static>, area: Rect) -> u16 {
    let inner = summary_block().inner(area);
    if inner.width == 0 {
        return 0;
    }
    let rows = summary_body(summary).line_count(inner.width);
    let hidden = rows.saturating_sub(usize::from(inner.height));
    u16::try_from(hidden).unwrap_or(u16::MAX)
}

fn render_status(frame: &mut Frame<'_>, backend: BackendStatus, area: Rect) {
    let (label, style) = match backend {
        BackendStatus::Unknown => ("server: checking", chrome::UNKNOWN),
        BackendStatus::Online => ("server: online", chrome::ONLINE),
        BackendStatus::Offline => ("server: offline", chrome::OFFLINE),
    };
    let line = Line::from(vec![
        Span::styled(label, style),
        Span::raw(" | "),
        Span::styled(HELP_TEXT, chrome::HINT),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_notice(frame: &mut Frame<'_>, notice: &str) {
    let width = display_width(notice);
    let area = layout::notice_area(frame.area(), width);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(NOTICE_TITLE)
        .title_bottom(Line::from(NOTICE_HINT).right_aligned());
    let body = Paragraph::new(Span::styled(notice, chrome::NOTICE))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}

/// Terminal columns taken by `text`, saturating at `u16::MAX`.
fn display_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}
