use chrono::{DateTime, Local};
use std::time::Instant;

/// Time source for the trial state machine.
///
/// `now` is monotonic and used for reaction arithmetic; `wall_now` is only
/// used to stamp recorded trials for display.
pub trait Clock {
    fn now(&self) -> Instant;
    fn wall_now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn wall_now(&self) -> DateTime<Local> {
        Local::now()
    }
}
