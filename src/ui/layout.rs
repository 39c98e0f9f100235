use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub tab_bar: Rect,
    pub body: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(3),    // Play surface or scores
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    AppLayout {
        tab_bar: chunks[0],
        body: chunks[1],
        status_bar: chunks[2],
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
