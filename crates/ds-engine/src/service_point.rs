//! A queue with a single server slot.
//!
//! The head of the queue is the entity in service; everyone behind it waits.
//! A service point is `busy` exactly while one departure event is pending on
//! its behalf: [`begin_service`][ServicePoint::begin_service] schedules that
//! event and sets the flag, [`dequeue`][ServicePoint::dequeue] (called when
//! the event fires) clears it.

use std::collections::VecDeque;
use std::fmt;

use ds_core::{Sampler, SimRng, SimTime};
use tracing::debug;

use crate::EventContext;

// ── ServiceTime ───────────────────────────────────────────────────────────────

/// How long serving one entity takes.
///
/// [`Sampler`] is the common case and ignores the entity; models plug in
/// their own implementation when the duration depends on who is served.
pub trait ServiceTime<T>: Send {
    fn duration(&mut self, entity: &T, rng: &mut SimRng) -> f64;
}

impl<T> ServiceTime<T> for Sampler {
    fn duration(&mut self, _entity: &T, rng: &mut SimRng) -> f64 {
        self.sample(rng)
    }
}

// ── ServiceStats ──────────────────────────────────────────────────────────────

/// Aggregate service statistics, updated on every departure.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ServiceStats {
    pub served:             u64,
    pub total_service_time: f64,
    last_service_start:     SimTime,
}

impl ServiceStats {
    pub fn mean_service_time(&self) -> f64 {
        if self.served == 0 {
            0.0
        } else {
            self.total_service_time / self.served as f64
        }
    }
}

// ── ServicePoint ──────────────────────────────────────────────────────────────

pub struct ServicePoint<T, E> {
    label:        &'static str,
    queue:        VecDeque<T>,
    busy:         bool,
    service_time: Box<dyn ServiceTime<T>>,
    /// Event kind scheduled when a service completes.
    departure:    E,
    stats:        ServiceStats,
}

impl<T, E: Copy + fmt::Debug> ServicePoint<T, E> {
    pub fn new(
        label:        &'static str,
        service_time: impl ServiceTime<T> + 'static,
        departure:    E,
    ) -> Self {
        Self {
            label,
            queue: VecDeque::new(),
            busy: false,
            service_time: Box::new(service_time),
            departure,
            stats: ServiceStats::default(),
        }
    }

    /// Append `entity` to the back of the queue.  Does not start service.
    pub fn enqueue(&mut self, entity: T) {
        self.queue.push_back(entity);
    }

    /// Remove the entity whose service just completed.
    ///
    /// Clears `busy` and records `now - service start` in the statistics.
    /// Returns `None` if the queue is empty; callers outside the one
    /// documented race treat that as a broken invariant.
    pub fn dequeue(&mut self, now: SimTime) -> Option<T> {
        self.busy = false;
        let served = self.queue.pop_front()?;
        self.stats.served += 1;
        self.stats.total_service_time += now.since(self.stats.last_service_start);
        Some(served)
    }

    /// Start serving the head of the queue.
    ///
    /// No-op (returns `None`) if the queue is empty or a service is already
    /// in progress.  Otherwise samples a duration, schedules the departure
    /// event and returns its time.
    pub fn begin_service(&mut self, ctx: &mut EventContext<'_, E>) -> Option<SimTime> {
        if self.busy {
            return None;
        }
        let head = self.queue.front()?;
        let duration = self.service_time.duration(head, ctx.rng);
        let now = ctx.now();
        let done = ctx.schedule_in(self.departure, duration);

        self.busy = true;
        self.stats.last_service_start = now;
        debug!(
            point = self.label,
            now = now.value(),
            duration,
            departure = ?self.departure,
            "service started"
        );
        Some(done)
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    #[inline]
    pub fn has_waiting(&self) -> bool {
        !self.queue.is_empty()
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// The entity at the head of the queue (the one in service, if busy).
    pub fn front(&self) -> Option<&T> {
        self.queue.front()
    }

    /// Queue contents, head first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn departure(&self) -> E {
        self.departure
    }

    pub fn stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// Fraction of `[0, now]` spent serving.  Zero at time zero.
    pub fn utilization(&self, now: SimTime) -> f64 {
        if now.value() <= 0.0 {
            0.0
        } else {
            self.stats.total_service_time / now.value()
        }
    }

    /// Empty the queue, clear `busy`, and zero the statistics.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.busy = false;
        self.stats = ServiceStats::default();
    }
}

impl<T, E: fmt::Debug> fmt::Debug for ServicePoint<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServicePoint")
            .field("label", &self.label)
            .field("queue_len", &self.queue.len())
            .field("busy", &self.busy)
            .field("departure", &self.departure)
            .field("stats", &self.stats)
            .finish()
    }
}
