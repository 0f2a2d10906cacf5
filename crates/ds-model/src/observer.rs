//! Store notifications and the channel hand-off to consumer threads.
//!
//! The model calls a [`StoreObserver`] synchronously from the simulation
//! worker.  Consumers that live on another thread (a UI, a report writer)
//! install a [`ChannelObserver`] instead; it turns every callback into an
//! owned [`Notification`] and sends it over an unbounded channel, so the
//! worker never blocks.  The consumer replays each message onto its own
//! observer with [`Notification::dispatch`].

use crossbeam_channel::{Receiver, Sender};
use ds_core::{CustomerId, SimTime};

use crate::{Customer, Lane, Stage};

// ── StoreObserver ─────────────────────────────────────────────────────────────

/// Callbacks fired by the store model.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait StoreObserver {
    /// A customer was created at the entrance.
    fn on_customer_created(&mut self, _customer: &Customer) {}

    /// A customer moved between stages at simulation time `at`.
    fn on_customer_moved(&mut self, _id: CustomerId, _from: Stage, _to: Stage, _at: SimTime) {}

    /// A customer left the store through `lane`.  `customer` carries the
    /// complete set of timestamps.
    fn on_customer_completed(&mut self, _customer: &Customer, _lane: Lane) {}

    /// The run reached its horizon.
    fn on_simulation_ended(&mut self, _final_time: SimTime) {}

    /// Wall-clock seconds left at the current pacing delay, or `None` when
    /// the run is unpaced.
    fn on_time_remaining(&mut self, _seconds: Option<u64>) {}
}

/// Ignores everything.
impl StoreObserver for () {}

/// Fan out to both observers, first `A` then `B`.
impl<A: StoreObserver, B: StoreObserver> StoreObserver for (A, B) {
    fn on_customer_created(&mut self, customer: &Customer) {
        self.0.on_customer_created(customer);
        self.1.on_customer_created(customer);
    }

    fn on_customer_moved(&mut self, id: CustomerId, from: Stage, to: Stage, at: SimTime) {
        self.0.on_customer_moved(id, from, to, at);
        self.1.on_customer_moved(id, from, to, at);
    }

    fn on_customer_completed(&mut self, customer: &Customer, lane: Lane) {
        self.0.on_customer_completed(customer, lane);
        self.1.on_customer_completed(customer, lane);
    }

    fn on_simulation_ended(&mut self, final_time: SimTime) {
        self.0.on_simulation_ended(final_time);
        self.1.on_simulation_ended(final_time);
    }

    fn on_time_remaining(&mut self, seconds: Option<u64>) {
        self.0.on_time_remaining(seconds);
        self.1.on_time_remaining(seconds);
    }
}

// ── Notification ──────────────────────────────────────────────────────────────

/// Owned form of one [`StoreObserver`] callback.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    CustomerCreated(Customer),
    CustomerMoved { id: CustomerId, from: Stage, to: Stage, at: SimTime },
    CustomerCompleted { customer: Customer, lane: Lane },
    SimulationEnded(SimTime),
    TimeRemaining(Option<u64>),
}

impl Notification {
    /// Replay this notification onto `observer`.
    pub fn dispatch<O: StoreObserver + ?Sized>(&self, observer: &mut O) {
        match self {
            Notification::CustomerCreated(customer) => observer.on_customer_created(customer),
            Notification::CustomerMoved { id, from, to, at } => {
                observer.on_customer_moved(*id, *from, *to, *at)
            }
            Notification::CustomerCompleted { customer, lane } => {
                observer.on_customer_completed(customer, *lane)
            }
            Notification::SimulationEnded(t) => observer.on_simulation_ended(*t),
            Notification::TimeRemaining(s) => observer.on_time_remaining(*s),
        }
    }

    /// `true` for the last notification of a run.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Notification::SimulationEnded(_))
    }
}

// ── ChannelObserver ───────────────────────────────────────────────────────────

/// Forwards every callback as a [`Notification`] over an unbounded channel.
///
/// Sends never block.  Messages arrive in the order they were produced.  A
/// dropped receiver is not an error: the notification is discarded.
#[derive(Clone, Debug)]
pub struct ChannelObserver {
    tx: Sender<Notification>,
}

impl ChannelObserver {
    pub fn new(tx: Sender<Notification>) -> Self {
        Self { tx }
    }

    /// A fresh channel and the observer feeding it.
    pub fn channel() -> (Self, Receiver<Notification>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }

    pub fn sender(&self) -> &Sender<Notification> {
        &self.tx
    }

    #[inline]
    pub fn send(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

impl StoreObserver for ChannelObserver {
    fn on_customer_created(&mut self, customer: &Customer) {
        self.send(Notification::CustomerCreated(customer.clone()));
    }

    fn on_customer_moved(&mut self, id: CustomerId, from: Stage, to: Stage, at: SimTime) {
        self.send(Notification::CustomerMoved { id, from, to, at });
    }

    fn on_customer_completed(&mut self, customer: &Customer, lane: Lane) {
        self.send(Notification::CustomerCompleted { customer: customer.clone(), lane });
    }

    fn on_simulation_ended(&mut self, final_time: SimTime) {
        self.send(Notification::SimulationEnded(final_time));
    }

    fn on_time_remaining(&mut self, seconds: Option<u64>) {
        self.send(Notification::TimeRemaining(seconds));
    }
}
