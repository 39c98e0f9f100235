//! Deterministic clock and scheduler for tests.

use super::clock::Clock;
use super::scheduler::{CancelHandle, Generation, Scheduler};
use chrono::{DateTime, Local};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, d: Duration) {
        self.now.set(self.now.get() + d);
    }

    pub fn set(&self, at: Instant) {
        self.now.set(at);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn wall_now(&self) -> DateTime<Local> {
        Local::now()
    }
}

struct Scheduled {
    at: Instant,
    generation: Generation,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Clone, Default)]
pub struct FakeScheduler {
    scheduled: Rc<RefCell<Vec<Scheduled>>>,
}

impl FakeScheduler {
    pub fn count(&self) -> usize {
        self.scheduled.borrow().len()
    }

    pub fn last(&self) -> (Instant, Generation, bool) {
        let scheduled = self.scheduled.borrow();
        let s = &scheduled[scheduled.len() - 1];
        (s.at, s.generation, s.cancelled.get())
    }

    pub fn is_cancelled(&self, index: usize) -> bool {
        self.scheduled.borrow()[index].cancelled.get()
    }
}

pub struct FakeHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle for FakeHandle {
    fn cancel(self) {
        self.cancelled.set(true);
    }
}

impl Scheduler for FakeScheduler {
    type Handle = FakeHandle;

    fn schedule_at(&mut self, at: Instant, generation: Generation) -> FakeHandle {
        let cancelled = Rc::new(Cell::new(false));
        self.scheduled.borrow_mut().push(Scheduled {
            at,
            generation,
            cancelled: cancelled.clone(),
        });
        FakeHandle { cancelled }
    }
}
