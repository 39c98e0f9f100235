//! Reaction trial core: the timing state machine, its scheduling seam and the
//! in-memory results history.

pub mod clock;
pub mod history;
pub mod machine;
pub mod scheduler;
#[cfg(test)]
pub mod testing;

pub use clock::{Clock, SystemClock};
pub use history::{History, Trial, TrialId};
pub use machine::{ReactionTrial, MIN_CUE_DELAY, ReleaseOutcome, TrialObserver, TrialState};
pub use scheduler::{CancelHandle, Generation, Scheduler, TokioScheduler};
