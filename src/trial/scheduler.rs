//! One-shot cue scheduling.
//!
//! The state machine never touches a runtime directly: it asks a `Scheduler`
//! to deliver a cue at a deadline and holds on to the returned handle so the
//! cue can be deregistered before it fires. Every scheduled cue carries the
//! `Generation` it was armed with, which lets the machine drop a firing that
//! was already in flight when the attempt ended.

use crate::app::event::AppEvent;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Arming counter. Bumped each time a new attempt is armed; a cue whose
/// generation differs from the current one is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Generation(self.0.wrapping_add(1))
    }
}

pub trait CancelHandle {
    /// Deregister the cue. After this returns the cue is never delivered.
    fn cancel(self);
}

pub trait Scheduler {
    type Handle: CancelHandle;

    fn schedule_at(&mut self, at: Instant, generation: Generation) -> Self::Handle;
}

/// Delivers cues as `AppEvent::CueFired` on the application event channel.
pub struct TokioScheduler {
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl TokioScheduler {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { event_tx }
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioCueHandle;

    fn schedule_at(&mut self, at: Instant, generation: Generation) -> TokioCueHandle {
        let tx = self.event_tx.clone();
        let deadline = tokio::time::Instant::from_std(at);
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(AppEvent::CueFired(generation));
        });
        TokioCueHandle { task }
    }
}

#[derive(Debug)]
pub struct TokioCueHandle {
    task: JoinHandle<()>,
}

impl CancelHandle for TokioCueHandle {
    fn cancel(self) {
        self.task.abort();
    }
}
