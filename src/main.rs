mod app;
mod config;
mod logging;
mod trial;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::AppState;
use crate::trial::{ReactionTrial, SystemClock, TokioScheduler};
use anyhow::Result;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        EventStream, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io::{self, Write};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let cfg = config::load_config()?;

    if let Some(path) = logging::init(&cfg.logging)? {
        info!(path = %path.display(), "logging started");
    }

    // Key release events need the kitty keyboard protocol
    let key_release_supported = supports_keyboard_enhancement().unwrap_or(false);
    if !key_release_supported {
        warn!("terminal does not report key releases, hold key falls back to tap mode");
    }

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal(key_release_supported);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    if key_release_supported {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, cfg, key_release_supported).await;

    // Restore terminal
    restore_terminal(key_release_supported)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal(key_release_supported: bool) -> Result<()> {
    let mut stdout = io::stdout();
    if key_release_supported {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture, DisableFocusChange)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
    key_release_supported: bool,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg);
    state.key_release_supported = key_release_supported;
    let size = terminal.size()?;
    state.screen = Rect::new(0, 0, size.width, size.height);
    let mut trial = ReactionTrial::new(
        TokioScheduler::new(event_tx.clone()),
        SystemClock,
        rand::rng(),
    );

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(event)) => {
                    if term_tx.send(AppEvent::Terminal(event)).is_err() {
                        break;
                    }
                }
                Some(Err(_)) => break,
                None => break,
            }
        }
    });

    // Initial render
    terminal.draw(|f| ui::render(f, &state, trial.history()))?;

    // Main event loop
    loop {
        let event = event_rx.recv().await;
        let Some(event) = event else { break };

        let actions = handler::handle_event(&mut state, &mut trial, event);

        for action in actions {
            match action {
                Action::Quit => state.should_quit = true,
                Action::Bell => {
                    let _ = io::stdout().write_all(b"\x07");
                    let _ = io::stdout().flush();
                }
            }
        }

        if state.should_quit {
            info!(trials = trial.history().len(), "quitting");
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state, trial.history()))?;
            state.dirty = false;
        }
    }

    Ok(())
}
