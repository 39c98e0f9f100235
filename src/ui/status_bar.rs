use crate::app::state::*;
use crate::trial::History;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, history: &History) {
    let hints = match state.tab {
        Tab::Play => " Tab: scores | q: quit ",
        Tab::Scores => " ↑/↓: select | d: delete | c: clear all | Tab: play | q: quit ",
    };

    let count = format!(" Trials: {} ", history.len());

    // Pad to fill remaining space
    let used = hints.chars().count() + count.chars().count();
    let remaining = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(hints, Theme::status_bar()),
        Span::styled(" ".repeat(remaining), Theme::status_bar()),
        Span::styled(count, Style::default().fg(Theme::ACCENT).bg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
