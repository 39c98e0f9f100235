use crate::app::state::Backdrop;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const WAITING: Color = Color::Rgb(178, 34, 34);
    pub const GO: Color = Color::Rgb(34, 139, 34);
    pub const TOO_SOON: Color = Color::Rgb(30, 80, 180);
    pub const TEXT_MUTED: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;

    pub fn backdrop(backdrop: Backdrop) -> Color {
        match backdrop {
            Backdrop::Waiting => Self::WAITING,
            Backdrop::Go => Self::GO,
            Backdrop::TooSoon => Self::TOO_SOON,
        }
    }

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn prompt() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn hint() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn tab() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn tab_active() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn list_item() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn list_selected() -> Style {
        Style::default().fg(Color::Black).bg(Self::ACCENT)
    }

    pub fn average() -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn dialog_border() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
