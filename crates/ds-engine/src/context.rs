//! Mutable simulation state lent to model callbacks.

use ds_core::{Clock, SimRng, SimTime};

use crate::EventList;

/// What a model callback may touch while handling one event.
///
/// Built by the engine for every callback from disjoint borrows of its own
/// fields, so the model can read the clock, schedule follow-up events and
/// draw random numbers without holding the engine itself.  The clock is
/// read-only: only the engine advances time.
pub struct EventContext<'a, E> {
    pub clock:  &'a Clock,
    pub events: &'a mut EventList<E>,
    pub rng:    &'a mut SimRng,
}

impl<'a, E> EventContext<'a, E> {
    #[inline]
    pub fn new(clock: &'a Clock, events: &'a mut EventList<E>, rng: &'a mut SimRng) -> Self {
        Self { clock, events, rng }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Schedule `kind` at absolute time `at`.
    ///
    /// # Panics
    /// Panics if `at` is before the current time.
    pub fn schedule_at(&mut self, kind: E, at: SimTime) {
        assert!(
            at >= self.clock.now(),
            "event scheduled in the past: now {}, requested {}",
            self.clock.now(),
            at
        );
        self.events.schedule(kind, at);
    }

    /// Schedule `kind` `delay` units from now and return its time.
    pub fn schedule_in(&mut self, kind: E, delay: f64) -> SimTime {
        let at = self.clock.now().plus(delay);
        self.schedule_at(kind, at);
        at
    }
}
