//! Self-perpetuating arrival stream.

use ds_core::{Sampler, SimTime};
use tracing::trace;

use crate::EventContext;

/// Generates arrival events separated by sampled inter-arrival times.
///
/// The model calls [`schedule_first`][Self::schedule_first] once during
/// initialisation and [`generate_next`][Self::generate_next] exactly once
/// per arrival it processes.  Skipping the reschedule silently ends the
/// customer stream.
#[derive(Clone, Debug)]
pub struct ArrivalProcess<E> {
    sampler: Sampler,
    kind:    E,
}

impl<E: Copy> ArrivalProcess<E> {
    pub fn new(sampler: Sampler, kind: E) -> Self {
        Self { sampler, kind }
    }

    /// The opening arrival, at the current time.
    pub fn schedule_first(&self, ctx: &mut EventContext<'_, E>) -> SimTime {
        let at = ctx.now();
        ctx.schedule_at(self.kind, at);
        at
    }

    /// The next arrival, one sampled gap after now.
    pub fn generate_next(&self, ctx: &mut EventContext<'_, E>) -> SimTime {
        let gap = self.sampler.sample(ctx.rng);
        let at = ctx.schedule_in(self.kind, gap);
        trace!(gap, at = at.value(), "next arrival scheduled");
        at
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }
}
