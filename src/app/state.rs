use crate::config::AppConfig;
use crate::trial::{Trial, TrialObserver, TrialState};
use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use std::time::Instant;

pub const PROMPT_START: &str = "Click to start";
pub const PROMPT_HOLD: &str = "HOLD...";
pub const PROMPT_RELEASE: &str = "RELEASE!";
pub const PROMPT_TOO_SOON: &str = "Too Soon!";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Play,
    Scores,
}

impl Tab {
    pub fn toggle(self) -> Self {
        match self {
            Tab::Play => Tab::Scores,
            Tab::Scores => Tab::Play,
        }
    }
}

/// Colour of the play surface. Mapped to concrete colours by the theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backdrop {
    Waiting,
    Go,
    TooSoon,
}

/// Presentation model. Fed by `TrialObserver` notifications and by the
/// handler's navigation; never reads the trial machine directly.
pub struct AppState {
    pub config: AppConfig,
    pub hold_key: KeyCode,
    pub tab: Tab,
    pub status_text: String,
    pub backdrop: Backdrop,
    /// Selected row on the scores tab.
    pub selected: usize,
    pub confirm_clear: bool,
    /// When false the hold key toggles instead of press/release.
    pub key_release_supported: bool,
    /// Last hold-key press and the press that armed, for tap mode.
    pub last_hold_press: Option<Instant>,
    pub tap_armed_at: Option<Instant>,
    /// Terminal area, used to hit-test mouse presses.
    pub screen: Rect,
    pub pending_bell: bool,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let hold_key = config.input.hold_key_code().unwrap_or(KeyCode::Char(' '));
        Self {
            config,
            hold_key,
            tab: Tab::Play,
            status_text: PROMPT_START.to_string(),
            backdrop: Backdrop::Waiting,
            selected: 0,
            confirm_clear: false,
            key_release_supported: false,
            last_hold_press: None,
            tap_armed_at: None,
            screen: Rect::default(),
            pending_bell: false,
            should_quit: false,
            dirty: true,
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.dirty = true;
        }
    }

    pub fn select_next(&mut self, len: usize) {
        if len > 0 && self.selected + 1 < len {
            self.selected += 1;
            self.dirty = true;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.dirty = true;
        }
    }

    /// Keep the selection on a valid row after the list shrinks.
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Back to the resting prompt after an attempt was abandoned.
    pub fn reset_prompt(&mut self) {
        self.show(PROMPT_START.to_string(), Backdrop::Waiting);
    }

    fn show(&mut self, text: String, backdrop: Backdrop) {
        self.status_text = text;
        self.backdrop = backdrop;
        self.dirty = true;
    }
}

impl TrialObserver for AppState {
    fn on_state_changed(&mut self, state: TrialState) {
        match state {
            TrialState::Armed { .. } => self.show(PROMPT_HOLD.to_string(), Backdrop::Waiting),
            TrialState::ReadyToRelease { .. } => {
                self.show(PROMPT_RELEASE.to_string(), Backdrop::Go)
            }
            // Outcome notifications set the resting text
            TrialState::Idle => self.dirty = true,
        }
    }

    fn on_trial_recorded(&mut self, trial: &Trial) {
        self.show(format!("Time: {}ms", trial.elapsed_ms), Backdrop::Go);
    }

    fn on_too_soon(&mut self) {
        self.show(PROMPT_TOO_SOON.to_string(), Backdrop::TooSoon);
        if self.config.ui.bell_on_too_soon {
            self.pending_bell = true;
        }
    }

    fn on_history_cleared(&mut self) {
        self.selected = 0;
        self.confirm_clear = false;
        self.show(PROMPT_START.to_string(), Backdrop::Waiting);
    }

    fn on_trial_removed(&mut self, _trial: &Trial) {
        self.dirty = true;
    }
}
