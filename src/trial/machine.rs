//! Press-hold-release timing state machine.
//!
//! ```text
//!   Idle --press--> Armed(cue_at) --cue fired--> ReadyToRelease(cue_at)
//!    ^                  |                               |
//!    +---release (too soon)                             |
//!    +--------------------release (record trial)--------+
//! ```
//!
//! The machine owns the pending cue handle and the history. Presentation is
//! driven through `TrialObserver`, passed in by the caller on every input.

use super::clock::Clock;
use super::history::{History, Trial, TrialId};
use super::scheduler::{CancelHandle, Generation, Scheduler};
use rand::RngExt;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Shortest wait between press and cue.
pub const MIN_CUE_DELAY: Duration = Duration::from_millis(500);
/// Longest wait between press and cue.
pub const MAX_CUE_DELAY: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    Idle,
    /// Holding; the cue is scheduled for `cue_at` and not yet shown.
    Armed { cue_at: Instant },
    /// Cue visible; the reaction window is open.
    ReadyToRelease { cue_at: Instant },
}

impl TrialState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TrialState::Idle)
    }
}

/// What a release resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Recorded(Trial),
    TooSoon,
    /// Release with no hold in progress.
    Ignored,
}

/// Outbound notifications for the presentation layer.
pub trait TrialObserver {
    fn on_state_changed(&mut self, state: TrialState);
    fn on_trial_recorded(&mut self, trial: &Trial);
    fn on_too_soon(&mut self);
    fn on_history_cleared(&mut self);
    fn on_trial_removed(&mut self, _trial: &Trial) {}
}

pub struct ReactionTrial<S, C, R>
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    state: TrialState,
    generation: Generation,
    pending: Option<S::Handle>,
    history: History,
    scheduler: S,
    clock: C,
    rng: R,
}

impl<S, C, R> ReactionTrial<S, C, R>
where
    S: Scheduler,
    C: Clock,
    R: RngExt,
{
    pub fn new(scheduler: S, clock: C, rng: R) -> Self {
        Self {
            state: TrialState::Idle,
            generation: Generation::default(),
            pending: None,
            history: History::new(),
            scheduler,
            clock,
            rng,
        }
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current reading of the machine's monotonic clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Start holding. Only an idle machine arms; a press while a hold is
    /// already in progress leaves the state and the pending cue untouched.
    pub fn press(&mut self, observer: &mut impl TrialObserver) -> bool {
        if !self.state.is_idle() {
            debug!(state = ?self.state, "press ignored, hold already in progress");
            return false;
        }

        let delay = self.rng.random_range(MIN_CUE_DELAY..=MAX_CUE_DELAY);
        let cue_at = self.clock.now() + delay;
        self.generation = self.generation.next();
        self.pending = Some(self.scheduler.schedule_at(cue_at, self.generation));
        self.state = TrialState::Armed { cue_at };
        debug!(delay_ms = delay.as_millis() as u64, generation = ?self.generation, "armed");

        observer.on_state_changed(self.state);
        true
    }

    /// Deliver a scheduled cue. A cue from an earlier generation, or one that
    /// arrives when nothing is armed, is dropped without any notification.
    pub fn cue_fired(&mut self, generation: Generation, observer: &mut impl TrialObserver) -> bool {
        match self.state {
            TrialState::Armed { cue_at } if generation == self.generation => {
                self.pending = None;
                self.state = TrialState::ReadyToRelease { cue_at };
                debug!(generation = ?generation, "cue visible");
                observer.on_state_changed(self.state);
                true
            }
            _ => {
                debug!(
                    fired = ?generation,
                    current = ?self.generation,
                    state = ?self.state,
                    "stale cue dropped"
                );
                false
            }
        }
    }

    pub fn release(&mut self, observer: &mut impl TrialObserver) -> ReleaseOutcome {
        match self.state {
            TrialState::Idle => ReleaseOutcome::Ignored,
            TrialState::Armed { .. } => {
                self.cancel_pending();
                self.state = TrialState::Idle;
                debug!("released before cue");
                observer.on_state_changed(self.state);
                observer.on_too_soon();
                ReleaseOutcome::TooSoon
            }
            TrialState::ReadyToRelease { cue_at } => {
                let elapsed_ms = round_to_millis(self.clock.now().saturating_duration_since(cue_at));
                let trial = self.history.append(elapsed_ms, self.clock.wall_now());
                self.state = TrialState::Idle;
                info!(id = trial.id, elapsed_ms, "trial recorded");
                observer.on_state_changed(self.state);
                observer.on_trial_recorded(&trial);
                ReleaseOutcome::Recorded(trial)
            }
        }
    }

    /// Drop any hold in progress without recording or reporting an outcome.
    /// Used when the play surface loses the gesture (tab switch, focus loss).
    pub fn abandon(&mut self, observer: &mut impl TrialObserver) -> bool {
        if self.state.is_idle() {
            return false;
        }
        self.cancel_pending();
        self.state = TrialState::Idle;
        debug!("hold abandoned");
        observer.on_state_changed(self.state);
        true
    }

    pub fn clear_history(&mut self, observer: &mut impl TrialObserver) {
        let removed = self.history.clear();
        info!(removed, "history cleared");
        observer.on_history_cleared();
    }

    pub fn remove_trial(&mut self, id: TrialId, observer: &mut impl TrialObserver) -> Option<Trial> {
        let trial = self.history.remove(id)?;
        info!(id, elapsed_ms = trial.elapsed_ms, "trial removed");
        observer.on_trial_removed(&trial);
        Some(trial)
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

/// Whole milliseconds, half-up.
fn round_to_millis(d: Duration) -> u64 {
    ((d.as_micros() + 500) / 1000) as u64
}
