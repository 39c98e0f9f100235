use crate::app::state::AppState;
use crate::ui::theme::Theme;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let bg = Theme::backdrop(state.backdrop);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1), // Prompt
            Constraint::Length(1),
            Constraint::Length(1), // Hint
            Constraint::Fill(1),
        ])
        .split(inner);

    let prompt = Paragraph::new(Span::styled(state.status_text.clone(), Theme::prompt()))
        .alignment(Alignment::Center);
    frame.render_widget(prompt, rows[1]);

    let hint = Paragraph::new(Span::styled(hint_text(state), Theme::hint()))
        .alignment(Alignment::Center);
    frame.render_widget(hint, rows[3]);
}

fn hint_text(state: &AppState) -> String {
    let key = key_label(state);
    match (state.config.input.mouse, state.key_release_supported) {
        (true, true) => format!("Hold the mouse button or {}, let go on green", key),
        (true, false) => format!("Hold the mouse button (or tap {} twice), let go on green", key),
        (false, true) => format!("Hold {}, let go on green", key),
        (false, false) => format!("Tap {} to start, tap again on green", key),
    }
}

fn key_label(state: &AppState) -> String {
    match state.hold_key {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
        other => format!("{:?}", other),
    }
}
