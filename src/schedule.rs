//! Deferred, fire-and-forget actions.
//!
//! Handlers schedule cosmetic continuations (removing an attention cue,
//! completing a faded-out delete) and the event loop drains whatever has
//! come due. Actions are never cancelled; whoever applies them must cope
//! with the target having disappeared in the meantime.

use std::time::{Duration, Instant};

use crate::validate::Field;

/// A continuation to run after a delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Drop the attention cue from an input.
    ClearCue(Field),
    /// Remove the task with this id from the list.
    Remove(String),
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, action: Deferred);
    /// Take every action whose delay has elapsed, in scheduling order.
    fn due(&mut self) -> Vec<Deferred>;
}

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Wall-clock timer queue used by the TUI.
#[derive(Debug, Default)]
pub struct TimerQueue<C = SystemClock> {
    clock: C,
    pending: Vec<(Instant, Deferred)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> TimerQueue<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            pending: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<C: Clock> Scheduler for TimerQueue<C> {
    fn schedule(&mut self, delay: Duration, action: Deferred) {
        self.pending.push((self.clock.now() + delay, action));
    }

    fn due(&mut self) -> Vec<Deferred> {
        let now = self.clock.now();
        let mut ready = Vec::new();
        self.pending.retain(|(at, action)| {
            if *at <= now {
                ready.push(action.clone());
                false
            } else {
                true
            }
        });
        ready
    }
}

/// Runs everything on the next drain regardless of delay.
#[derive(Debug, Default)]
pub struct Immediate {
    pending: Vec<Deferred>,
}

impl Scheduler for Immediate {
    fn schedule(&mut self, _delay: Duration, action: Deferred) {
        self.pending.push(action);
    }

    fn due(&mut self) -> Vec<Deferred> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::Clock;

    /// Clock that only moves when told to.
    #[derive(Debug, Clone)]
    pub struct ManualClock(Rc<Cell<Instant>>);

    impl ManualClock {
        pub fn new() -> Self {
            Self(Rc::new(Cell::new(Instant::now())))
        }

        pub fn advance(&self, by: Duration) {
            self.0.set(self.0.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.0.get()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualClock;
    use super::*;

    #[test]
    fn timer_queue_releases_in_time() {
        let clock = ManualClock::new();
        let mut q = TimerQueue::with_clock(clock.clone());
        q.schedule(Duration::from_millis(300), Deferred::Remove("a".into()));
        q.schedule(Duration::from_millis(400), Deferred::ClearCue(Field::Text));

        assert!(q.due().is_empty());
        clock.advance(Duration::from_millis(300));
        assert_eq!(q.due(), vec![Deferred::Remove("a".into())]);
        clock.advance(Duration::from_millis(100));
        assert_eq!(q.due(), vec![Deferred::ClearCue(Field::Text)]);
        assert!(q.is_empty());
    }

    #[test]
    fn immediate_releases_everything() {
        let mut s = Immediate::default();
        s.schedule(Duration::from_secs(60), Deferred::ClearCue(Field::DueDate));
        assert_eq!(s.due().len(), 1);
        assert!(s.due().is_empty());
    }
}
