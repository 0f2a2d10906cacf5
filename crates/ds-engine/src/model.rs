//! The `Model` trait — the extension point the engine drives.

use std::fmt;

use ds_core::Clock;

use crate::{Event, EventContext, ServicePoint};

/// A concrete simulation plugged into [`Engine`][crate::Engine].
///
/// The engine owns the clock, the event list and the RNG; the model owns its
/// service points and entities.  Every callback runs on the single
/// simulation worker, one at a time, so implementations need `Send` (to move
/// onto that worker) but never `Sync`.
///
/// # Event handling
///
/// `Event` should be a closed enum and [`run_event`][Self::run_event] an
/// exhaustive `match` over it.  Handlers are total: there is no error path,
/// and a handler that cannot proceed indicates a defect and panics.
pub trait Model: Send + 'static {
    /// The model's event kinds.
    type Event: Copy + Eq + fmt::Debug + Send + 'static;

    /// What waits in the service point queues.
    type Entity: Send + 'static;

    /// Schedule the opening events of a run.  Called once per run.
    fn initialize(&mut self, ctx: &mut EventContext<'_, Self::Event>);

    /// B-phase handler for one due event.
    fn run_event(&mut self, event: Event<Self::Event>, ctx: &mut EventContext<'_, Self::Event>);

    /// Every service point, visited by the C-phase in slice order.
    fn service_points_mut(&mut self) -> &mut [ServicePoint<Self::Entity, Self::Event>];

    /// Called exactly once when the run reaches its horizon.
    fn results(&mut self, clock: &Clock);

    /// Return to the pre-run state: empty queues, zeroed statistics,
    /// rewound id counters.
    fn reset(&mut self);
}
