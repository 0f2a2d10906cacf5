//! `EventList` — the time-ordered future event set.
//!
//! # Ordering
//!
//! Events are keyed by `(time, seq)` where `seq` is a per-list counter
//! assigned on insertion.  `BinaryHeap` is a max-heap, so `Event` reverses
//! its `Ord`; the result pops the earliest time first and, among equal
//! times, the event that was pushed first.  Two lists fed the same pushes
//! therefore always pop in the same order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ds_core::SimTime;

// ── Event ─────────────────────────────────────────────────────────────────────

/// A time-stamped model action.
///
/// `E` is the model's closed event enum; the engine never looks inside it.
/// Time and kind may be adjusted with the setters until the event is pushed;
/// after that the list owns it and it is immutable.
#[derive(Clone, Debug)]
pub struct Event<E> {
    kind: E,
    time: SimTime,
    seq:  u64,
}

impl<E> Event<E> {
    pub fn new(kind: E, time: SimTime) -> Self {
        Self { kind, time, seq: 0 }
    }

    #[inline]
    pub fn kind(&self) -> &E {
        &self.kind
    }

    #[inline]
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Insertion sequence number within the owning list.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn set_kind(&mut self, kind: E) {
        self.kind = kind;
    }

    pub fn set_time(&mut self, time: SimTime) {
        self.time = time;
    }

    pub fn into_kind(self) -> E {
        self.kind
    }
}

impl<E> PartialEq for Event<E> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl<E> Eq for Event<E> {}

impl<E> PartialOrd for Event<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Event<E> {
    /// Reversed so `BinaryHeap` pops the smallest `(time, seq)`.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ── EventList ─────────────────────────────────────────────────────────────────

/// Min-heap of pending events.  O(log n) push and pop.
#[derive(Clone, Debug)]
pub struct EventList<E> {
    heap:     BinaryHeap<Event<E>>,
    next_seq: u64,
}

impl<E> Default for EventList<E> {
    fn default() -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0 }
    }
}

impl<E> EventList<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `event`, stamping it with the next sequence number.
    pub fn push(&mut self, mut event: Event<E>) {
        event.seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(event);
    }

    /// Shorthand for `push(Event::new(kind, time))`.
    pub fn schedule(&mut self, kind: E, time: SimTime) {
        self.push(Event::new(kind, time));
    }

    /// Remove and return the earliest event.
    ///
    /// # Panics
    /// Panics if the list is empty.  The engine only pops after checking
    /// [`peek_time`][Self::peek_time].
    pub fn pop(&mut self) -> Event<E> {
        match self.heap.pop() {
            Some(event) => event,
            None => panic!("pop on an empty event list"),
        }
    }

    /// Time of the earliest event, or `None` if nothing is scheduled.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(Event::time)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending event and restart the sequence counter.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_seq = 0;
    }

    /// Drain all events in pop order into a `Vec`.
    /// Useful for testing and snapshotting.
    pub fn drain_ordered(&mut self) -> Vec<Event<E>> {
        let mut events = Vec::with_capacity(self.heap.len());
        while let Some(e) = self.heap.pop() {
            events.push(e);
        }
        events
    }
}
