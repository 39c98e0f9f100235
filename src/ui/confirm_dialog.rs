use crate::app::state::AppState;
use crate::trial::History;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

pub fn render(frame: &mut Frame, state: &AppState, history: &History) {
    if !state.confirm_clear {
        return;
    }

    let popup_area = centered(frame.area(), 44, 5);

    // Clear background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Clear results ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::dialog_border());

    let text = vec![
        Line::from(format!("Delete all {} results?", history.len())),
        Line::from(Span::styled("y / Enter: clear    n / Esc: keep", Theme::hint())),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, popup_area);
}
