use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::trial::{Clock, ReactionTrial, Scheduler, MIN_CUE_DELAY};
use crate::ui::layout::compute_layout;
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use rand::RngExt;
use ratatui::layout::{Position, Rect};
use std::time::Duration;

/// Hold-key presses closer together than this are keyboard auto-repeat.
const TAP_REPEAT_GAP: Duration = Duration::from_millis(100);

pub fn handle_event<S, C, R>(
    state: &mut AppState,
    trial: &mut ReactionTrial<S, C, R>,
    event: AppEvent,
) -> Vec<Action>
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    let mut actions = match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, trial, cevent),
        AppEvent::CueFired(generation) => {
            trial.cue_fired(generation, state);
            vec![]
        }
    };

    if state.pending_bell {
        state.pending_bell = false;
        actions.push(Action::Bell);
    }
    actions
}

fn handle_terminal<S, C, R>(
    state: &mut AppState,
    trial: &mut ReactionTrial<S, C, R>,
    event: CEvent,
) -> Vec<Action>
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    match event {
        CEvent::Key(key) => handle_key(state, trial, key),
        CEvent::Mouse(mouse) if state.config.input.mouse => {
            handle_mouse(state, trial, mouse);
            vec![]
        }
        CEvent::FocusLost => {
            abandon_hold(state, trial);
            vec![]
        }
        CEvent::Resize(width, height) => {
            state.screen = Rect::new(0, 0, width, height);
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_mouse<S, C, R>(state: &mut AppState, trial: &mut ReactionTrial<S, C, R>, mouse: MouseEvent)
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left)
            if on_play_surface(state) && in_body(state, mouse.column, mouse.row) =>
        {
            trial.press(state);
        }
        // A hold that started on the play surface ends wherever the button comes up
        MouseEventKind::Up(MouseButton::Left) => {
            trial.release(state);
        }
        _ => {}
    }
}

fn handle_key<S, C, R>(state: &mut AppState, trial: &mut ReactionTrial<S, C, R>, key: KeyEvent) -> Vec<Action>
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return if key.kind == KeyEventKind::Release {
            vec![]
        } else {
            vec![Action::Quit]
        };
    }

    if is_hold_key(state, key.code) && on_play_surface(state) {
        handle_hold_key(state, trial, key.kind);
        return vec![];
    }

    if key.kind == KeyEventKind::Release {
        return vec![];
    }

    // Confirmation dialog captures all input when visible
    if state.confirm_clear {
        handle_confirm_key(state, trial, key);
        return vec![];
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            let next = state.tab.toggle();
            switch_tab(state, trial, next);
            vec![]
        }
        KeyCode::Char('1') => {
            switch_tab(state, trial, Tab::Play);
            vec![]
        }
        KeyCode::Char('2') => {
            switch_tab(state, trial, Tab::Scores);
            vec![]
        }
        _ if state.tab == Tab::Scores => {
            handle_scores_key(state, trial, key);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_hold_key<S, C, R>(state: &mut AppState, trial: &mut ReactionTrial<S, C, R>, kind: KeyEventKind)
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    match kind {
        KeyEventKind::Press if !state.key_release_supported => handle_tap(state, trial),
        KeyEventKind::Press | KeyEventKind::Repeat => {
            trial.press(state);
        }
        KeyEventKind::Release => {
            trial.release(state);
        }
    }
}

/// Without release reporting the second tap stands in for the release.
/// Auto-repeat arrives as plain presses, so rapid presses are dropped, as is
/// any press before the earliest possible cue.
fn handle_tap<S, C, R>(state: &mut AppState, trial: &mut ReactionTrial<S, C, R>)
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    let now = trial.now();
    let previous = state.last_hold_press.replace(now);
    if previous.is_some_and(|at| now.saturating_duration_since(at) < TAP_REPEAT_GAP) {
        return;
    }

    if trial.state().is_idle() {
        if trial.press(state) {
            state.tap_armed_at = Some(now);
        }
        return;
    }

    let too_early = state
        .tap_armed_at
        .is_some_and(|at| now.saturating_duration_since(at) < MIN_CUE_DELAY);
    if !too_early {
        state.tap_armed_at = None;
        trial.release(state);
    }
}

fn handle_scores_key<S, C, R>(state: &mut AppState, trial: &mut ReactionTrial<S, C, R>, key: KeyEvent)
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => state.select_next(trial.history().len()),
        KeyCode::Char('d') | KeyCode::Delete => {
            let selected = trial.history().get(state.selected).map(|t| t.id);
            if let Some(id) = selected {
                trial.remove_trial(id, state);
                state.clamp_selection(trial.history().len());
            }
        }
        KeyCode::Char('c') => {
            state.confirm_clear = true;
            state.dirty = true;
        }
        _ => {}
    }
}

fn handle_confirm_key<S, C, R>(state: &mut AppState, trial: &mut ReactionTrial<S, C, R>, key: KeyEvent)
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => trial.clear_history(state),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm_clear = false;
            state.dirty = true;
        }
        _ => {}
    }
}

fn switch_tab<S, C, R>(state: &mut AppState, trial: &mut ReactionTrial<S, C, R>, tab: Tab)
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    if tab != state.tab {
        abandon_hold(state, trial);
        state.set_tab(tab);
    }
}

fn abandon_hold<S, C, R>(state: &mut AppState, trial: &mut ReactionTrial<S, C, R>)
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    if trial.abandon(state) {
        state.reset_prompt();
    }
}

fn on_play_surface(state: &AppState) -> bool {
    state.tab == Tab::Play && !state.confirm_clear
}

fn in_body(state: &AppState, column: u16, row: u16) -> bool {
    compute_layout(state.screen)
        .body
        .contains(Position::new(column, row))
}

fn is_hold_key(state: &AppState, code: KeyCode) -> bool {
    match (code, state.hold_key) {
        (KeyCode::Char(c), KeyCode::Char(hold)) => c.to_ascii_lowercase() == hold,
        (code, hold) => code == hold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::trial::testing::{FakeClock, FakeScheduler};
    use crate::trial::TrialState;
    use crossterm::event::KeyEventState;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    type TestTrial = ReactionTrial<FakeScheduler, FakeClock, StdRng>;

    fn setup(key_release_supported: bool) -> (AppState, TestTrial, FakeScheduler, FakeClock) {
        let scheduler = FakeScheduler::default();
        let clock = FakeClock::new();
        let trial = ReactionTrial::new(scheduler.clone(), clock.clone(), StdRng::seed_from_u64(1));
        let mut state = AppState::new(AppConfig::default());
        state.key_release_supported = key_release_supported;
        state.screen = Rect::new(0, 0, 80, 24);
        (state, trial, scheduler, clock)
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> AppEvent {
        AppEvent::Terminal(CEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }))
    }

    fn press_key(code: KeyCode) -> AppEvent {
        key(code, KeyEventKind::Press)
    }

    fn mouse(kind: MouseEventKind) -> AppEvent {
        mouse_at(kind, 10, 5)
    }

    fn mouse_at(kind: MouseEventKind, column: u16, row: u16) -> AppEvent {
        AppEvent::Terminal(CEvent::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn fire_cue(state: &mut AppState, trial: &mut TestTrial, scheduler: &FakeScheduler, clock: &FakeClock) {
        let (at, generation, _) = scheduler.last();
        clock.set(at);
        handle_event(state, trial, AppEvent::CueFired(generation));
    }

    /// One full mouse round: press, cue, release after `ms`.
    fn mouse_round(
        state: &mut AppState,
        trial: &mut TestTrial,
        scheduler: &FakeScheduler,
        clock: &FakeClock,
        ms: u64,
    ) {
        handle_event(state, trial, mouse(MouseEventKind::Down(MouseButton::Left)));
        fire_cue(state, trial, scheduler, clock);
        clock.advance(Duration::from_millis(ms));
        handle_event(state, trial, mouse(MouseEventKind::Up(MouseButton::Left)));
    }

    #[test]
    fn test_mouse_hold_and_release_records_trial() {
        let (mut state, mut trial, scheduler, clock) = setup(false);

        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(state.status_text, PROMPT_HOLD);

        fire_cue(&mut state, &mut trial, &scheduler, &clock);
        assert_eq!(state.status_text, PROMPT_RELEASE);
        assert_eq!(state.backdrop, Backdrop::Go);

        clock.advance(Duration::from_millis(250));
        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Up(MouseButton::Left)));

        assert_eq!(state.status_text, "Time: 250ms");
        assert_eq!(trial.history().len(), 1);
        assert_eq!(trial.history().last().map(|t| t.elapsed_ms), Some(250));
    }

    #[test]
    fn test_mouse_release_before_cue_is_too_soon() {
        let (mut state, mut trial, scheduler, _clock) = setup(false);

        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Down(MouseButton::Left)));
        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Up(MouseButton::Left)));

        assert_eq!(state.status_text, PROMPT_TOO_SOON);
        assert_eq!(state.backdrop, Backdrop::TooSoon);
        assert!(trial.history().is_empty());
        assert!(scheduler.is_cancelled(0));

        // The cancelled cue arriving late changes nothing
        let (_, generation, _) = scheduler.last();
        handle_event(&mut state, &mut trial, AppEvent::CueFired(generation));
        assert_eq!(state.status_text, PROMPT_TOO_SOON);
        assert_eq!(trial.state(), TrialState::Idle);
    }

    #[test]
    fn test_mouse_drag_does_not_rearm() {
        let (mut state, mut trial, scheduler, _clock) = setup(false);
        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Down(MouseButton::Left)));
        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Drag(MouseButton::Left)));
        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(scheduler.count(), 1);
    }

    #[test]
    fn test_mouse_disabled_in_config() {
        let (mut state, mut trial, scheduler, _clock) = setup(false);
        state.config.input.mouse = false;
        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(scheduler.count(), 0);
        assert!(trial.state().is_idle());
    }

    #[test]
    fn test_hold_key_press_release() {
        let (mut state, mut trial, scheduler, clock) = setup(true);

        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        handle_event(&mut state, &mut trial, key(KeyCode::Char(' '), KeyEventKind::Repeat));
        assert_eq!(scheduler.count(), 1);

        fire_cue(&mut state, &mut trial, &scheduler, &clock);
        clock.advance(Duration::from_millis(180));
        handle_event(&mut state, &mut trial, key(KeyCode::Char(' '), KeyEventKind::Release));

        assert_eq!(trial.history().last().map(|t| t.elapsed_ms), Some(180));
    }

    #[test]
    fn test_hold_key_tap_mode_without_release_events() {
        let (mut state, mut trial, scheduler, clock) = setup(false);

        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        fire_cue(&mut state, &mut trial, &scheduler, &clock);
        clock.advance(Duration::from_millis(300));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));

        assert_eq!(trial.history().last().map(|t| t.elapsed_ms), Some(300));
        assert!(trial.state().is_idle());
    }

    #[test]
    fn test_tap_mode_ignores_auto_repeat() {
        let (mut state, mut trial, scheduler, clock) = setup(false);

        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        for _ in 0..5 {
            clock.advance(Duration::from_millis(30));
            handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        }
        assert!(matches!(trial.state(), TrialState::Armed { .. }));
        assert_eq!(state.status_text, PROMPT_HOLD);
        assert_eq!(scheduler.count(), 1);

        fire_cue(&mut state, &mut trial, &scheduler, &clock);
        clock.advance(Duration::from_millis(220));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        assert_eq!(trial.history().last().map(|t| t.elapsed_ms), Some(220));

        // Repeats trailing the release do not arm a new round
        clock.advance(Duration::from_millis(30));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        assert!(trial.state().is_idle());
        assert_eq!(scheduler.count(), 1);
    }

    #[test]
    fn test_tap_mode_press_before_earliest_cue_is_ignored() {
        let (mut state, mut trial, scheduler, clock) = setup(false);

        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        clock.advance(Duration::from_millis(300));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        assert!(matches!(trial.state(), TrialState::Armed { .. }));
        assert_ne!(state.status_text, PROMPT_TOO_SOON);

        // A deliberate tap once a cue is possible, but before it fired, is too soon
        clock.advance(Duration::from_millis(200));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        assert_eq!(state.status_text, PROMPT_TOO_SOON);
        assert!(scheduler.is_cancelled(0));
    }

    #[test]
    fn test_mouse_press_outside_play_surface_ignored() {
        let (mut state, mut trial, scheduler, _clock) = setup(false);

        // Tab bar is the first row, status bar the last
        handle_event(&mut state, &mut trial, mouse_at(MouseEventKind::Down(MouseButton::Left), 10, 0));
        handle_event(&mut state, &mut trial, mouse_at(MouseEventKind::Down(MouseButton::Left), 10, 23));
        assert_eq!(scheduler.count(), 0);

        handle_event(&mut state, &mut trial, mouse_at(MouseEventKind::Down(MouseButton::Left), 79, 22));
        assert_eq!(scheduler.count(), 1);
    }

    #[test]
    fn test_resize_updates_hit_area() {
        let (mut state, mut trial, scheduler, _clock) = setup(false);
        handle_event(&mut state, &mut trial, AppEvent::Terminal(CEvent::Resize(40, 10)));
        assert_eq!(state.screen, Rect::new(0, 0, 40, 10));

        handle_event(&mut state, &mut trial, mouse_at(MouseEventKind::Down(MouseButton::Left), 10, 9));
        assert_eq!(scheduler.count(), 0);
        handle_event(&mut state, &mut trial, mouse_at(MouseEventKind::Down(MouseButton::Left), 10, 8));
        assert_eq!(scheduler.count(), 1);
    }

    #[test]
    fn test_custom_hold_key_ignores_case() {
        let (mut state, mut trial, scheduler, _clock) = setup(true);
        state.hold_key = KeyCode::Char('j');
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('J')));
        assert_eq!(scheduler.count(), 1);
    }

    #[test]
    fn test_tab_switch_abandons_hold() {
        let (mut state, mut trial, scheduler, _clock) = setup(true);
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));

        handle_event(&mut state, &mut trial, press_key(KeyCode::Tab));

        assert_eq!(state.tab, Tab::Scores);
        assert!(trial.state().is_idle());
        assert!(scheduler.is_cancelled(0));
        assert_eq!(state.status_text, PROMPT_START);
        assert!(trial.history().is_empty());
    }

    #[test]
    fn test_focus_lost_abandons_hold() {
        let (mut state, mut trial, scheduler, _clock) = setup(true);
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        handle_event(&mut state, &mut trial, AppEvent::Terminal(CEvent::FocusLost));
        assert!(trial.state().is_idle());
        assert!(scheduler.is_cancelled(0));
    }

    #[test]
    fn test_no_press_from_scores_tab() {
        let (mut state, mut trial, scheduler, _clock) = setup(true);
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('2')));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char(' ')));
        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Down(MouseButton::Left)));
        assert_eq!(scheduler.count(), 0);
    }

    #[test]
    fn test_delete_selected_trial() {
        let (mut state, mut trial, scheduler, clock) = setup(false);
        for ms in [100, 200, 300] {
            mouse_round(&mut state, &mut trial, &scheduler, &clock, ms);
        }
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('2')));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Down));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Down));
        assert_eq!(state.selected, 2);

        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('d')));

        let times: Vec<u64> = trial.history().iter().map(|t| t.elapsed_ms).collect();
        assert_eq!(times, vec![100, 200]);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let (mut state, mut trial, scheduler, clock) = setup(false);
        mouse_round(&mut state, &mut trial, &scheduler, &clock, 220);
        mouse_round(&mut state, &mut trial, &scheduler, &clock, 240);
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('2')));

        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('c')));
        assert!(state.confirm_clear);
        assert_eq!(trial.history().len(), 2);

        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('n')));
        assert!(!state.confirm_clear);
        assert_eq!(trial.history().len(), 2);

        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('c')));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('y')));
        assert!(!state.confirm_clear);
        assert!(trial.history().is_empty());
        assert_eq!(state.status_text, PROMPT_START);
    }

    #[test]
    fn test_dialog_swallows_quit_and_tab_keys() {
        let (mut state, mut trial, _scheduler, _clock) = setup(false);
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('2')));
        handle_event(&mut state, &mut trial, press_key(KeyCode::Char('c')));

        assert!(handle_event(&mut state, &mut trial, press_key(KeyCode::Char('q'))).is_empty());
        handle_event(&mut state, &mut trial, press_key(KeyCode::Tab));
        assert_eq!(state.tab, Tab::Scores);
        assert!(state.confirm_clear);

        // Esc dismisses the dialog rather than quitting
        assert!(handle_event(&mut state, &mut trial, press_key(KeyCode::Esc)).is_empty());
        assert!(!state.confirm_clear);
    }

    #[test]
    fn test_quit_keys() {
        let (mut state, mut trial, _scheduler, _clock) = setup(false);
        assert_eq!(
            handle_event(&mut state, &mut trial, press_key(KeyCode::Char('q'))),
            vec![Action::Quit]
        );
        let ctrl_c = AppEvent::Terminal(CEvent::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }));
        assert_eq!(handle_event(&mut state, &mut trial, ctrl_c), vec![Action::Quit]);
    }

    #[test]
    fn test_bell_action_on_too_soon() {
        let (mut state, mut trial, _scheduler, _clock) = setup(false);
        state.config.ui.bell_on_too_soon = true;
        handle_event(&mut state, &mut trial, mouse(MouseEventKind::Down(MouseButton::Left)));
        let actions = handle_event(&mut state, &mut trial, mouse(MouseEventKind::Up(MouseButton::Left)));
        assert_eq!(actions, vec![Action::Bell]);
        assert!(!state.pending_bell);
    }
}
