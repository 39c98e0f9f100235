mod confirm_dialog;
pub mod layout;
mod play_surface;
mod scores;
mod status_bar;
mod theme;

use crate::app::state::{AppState, Tab};
use crate::trial::History;
use ratatui::prelude::*;
use ratatui::widgets::Tabs;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState, history: &History) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    render_tab_bar(frame, app_layout.tab_bar, state);
    match state.tab {
        Tab::Play => play_surface::render(frame, app_layout.body, state),
        Tab::Scores => scores::render(frame, app_layout.body, state, history),
    }
    status_bar::render(frame, app_layout.status_bar, state, history);
    confirm_dialog::render(frame, state, history);
}

fn render_tab_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    let selected = match state.tab {
        Tab::Play => 0,
        Tab::Scores => 1,
    };
    let tabs = Tabs::new(vec![" 1 Play ", " 2 Scores "])
        .select(selected)
        .style(Theme::tab())
        .highlight_style(Theme::tab_active())
        .divider("|");
    frame.render_widget(tabs, area);
}
