use crate::app::state::AppState;
use crate::trial::History;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, history: &History) {
    let block = Block::default()
        .title(" List of reaction times (ms) ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Trials
            Constraint::Length(1), // Average
        ])
        .split(inner);

    if history.is_empty() {
        let empty = Paragraph::new(Span::styled(
            " No trials yet",
            Style::default().fg(Theme::TEXT_MUTED),
        ));
        frame.render_widget(empty, rows[0]);
    } else {
        let format = &state.config.ui.timestamp_format;
        let items: Vec<ListItem> = history
            .iter()
            .map(|t| ListItem::new(Span::styled(t.describe(format), Theme::list_item())))
            .collect();
        let list = List::new(items)
            .highlight_style(Theme::list_selected())
            .highlight_symbol("> ");
        let mut list_state = ListState::default().with_selected(Some(state.selected));
        frame.render_stateful_widget(list, rows[0], &mut list_state);
    }

    let average = Paragraph::new(Span::styled(
        format!("Average reaction time: {}ms", history.average()),
        Theme::average(),
    ));
    frame.render_widget(average, rows[1]);
}
