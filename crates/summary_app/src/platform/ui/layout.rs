use ratatui::layout::{Constraint, Layout, Rect};

/// Fixed screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub title: Rect,
    pub input: Rect,
    pub hint: Rect,
    pub submit: Rect,
    pub panel: Rect,
    pub status: Rect,
}

pub fn split(area: Rect) -> ScreenAreas {
    let [title, input, hint, submit, panel, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    ScreenAreas {
        title,
        input,
        hint,
        submit,
        panel,
        status,
    }
}

/// Centered box for the notice popup, clamped to the screen.
pub fn notice_area(area: Rect, text_width: u16) -> Rect {
    let width = text_width.saturating_add(4).clamp(20, area.width.max(20)).min(area.width);
    let height = 5.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
