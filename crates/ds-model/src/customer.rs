//! The entity that flows through the store.

use std::fmt;

use ds_core::{CustomerId, SimRng, SimTime, StoreConfig};

use crate::Stage;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CustomerKind {
    Regular,
    Express,
}

impl CustomerKind {
    pub fn label(self) -> &'static str {
        match self {
            CustomerKind::Regular => "REGULAR",
            CustomerKind::Express => "EXPRESS",
        }
    }
}

impl fmt::Display for CustomerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One shopper and the timestamps of their visit.
///
/// Stage timestamps are `None` until the customer reaches the stage and are
/// written once.  Along any completed visit they satisfy
/// `arrival ≤ shopping_start ≤ shopping_end ≤ checkout_start ≤ removal`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    id:             CustomerId,
    kind:           CustomerKind,
    items:          u32,
    arrival:        SimTime,
    shopping_start: Option<SimTime>,
    shopping_end:   Option<SimTime>,
    checkout_start: Option<SimTime>,
    removal:        Option<SimTime>,
    location:       Stage,
    previous:       Option<Stage>,
}

impl Customer {
    /// A customer standing at the entrance at `arrival`.
    pub fn new(id: CustomerId, kind: CustomerKind, items: u32, arrival: SimTime) -> Self {
        Self {
            id,
            kind,
            items,
            arrival,
            shopping_start: None,
            shopping_end: None,
            checkout_start: None,
            removal: None,
            location: Stage::Entrance,
            previous: None,
        }
    }

    /// Draw a customer's kind and basket size from `config`.
    ///
    /// Express with probability `express_percentage / 100` (never when the
    /// percentage is zero); items uniform over the kind's inclusive range.
    pub fn generate(id: CustomerId, config: &StoreConfig, arrival: SimTime, rng: &mut SimRng) -> Self {
        let kind = if config.express_percentage > 0.0 && rng.gen_bool(config.express_probability()) {
            CustomerKind::Express
        } else {
            CustomerKind::Regular
        };
        let range = match kind {
            CustomerKind::Express => config.express_items,
            CustomerKind::Regular => config.regular_items,
        };
        let items = rng.gen_range(range.min..=range.max);
        Self::new(id, kind, items, arrival)
    }

    #[inline]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> CustomerKind {
        self.kind
    }

    #[inline]
    pub fn items(&self) -> u32 {
        self.items
    }

    #[inline]
    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    pub fn shopping_start(&self) -> Option<SimTime> {
        self.shopping_start
    }

    pub fn shopping_end(&self) -> Option<SimTime> {
        self.shopping_end
    }

    pub fn checkout_start(&self) -> Option<SimTime> {
        self.checkout_start
    }

    pub fn removal(&self) -> Option<SimTime> {
        self.removal
    }

    pub fn location(&self) -> Stage {
        self.location
    }

    pub fn previous_location(&self) -> Option<Stage> {
        self.previous
    }

    // ── Transitions ───────────────────────────────────────────────────────

    pub fn move_to(&mut self, stage: Stage) {
        self.previous = Some(self.location);
        self.location = stage;
    }

    pub fn stamp_shopping_start(&mut self, at: SimTime) {
        debug_assert!(self.shopping_start.is_none(), "shopping start stamped twice for {}", self.id);
        self.shopping_start = Some(at);
    }

    pub fn stamp_shopping_end(&mut self, at: SimTime) {
        debug_assert!(self.shopping_end.is_none(), "shopping end stamped twice for {}", self.id);
        self.shopping_end = Some(at);
    }

    pub fn stamp_checkout_start(&mut self, at: SimTime) {
        debug_assert!(self.checkout_start.is_none(), "checkout start stamped twice for {}", self.id);
        self.checkout_start = Some(at);
    }

    pub fn stamp_removal(&mut self, at: SimTime) {
        debug_assert!(self.removal.is_none(), "removal stamped twice for {}", self.id);
        self.removal = Some(at);
    }

    // ── Durations (0 when a defining timestamp is unset) ──────────────────

    /// Arrival until entering the shopping area.
    pub fn entrance_duration(&self) -> f64 {
        span(Some(self.arrival), self.shopping_start)
    }

    pub fn shopping_duration(&self) -> f64 {
        span(self.shopping_start, self.shopping_end)
    }

    /// Joining a checkout queue until leaving the store.
    pub fn checkout_duration(&self) -> f64 {
        span(self.checkout_start, self.removal)
    }

    /// Arrival until removal.
    pub fn total_time(&self) -> f64 {
        span(Some(self.arrival), self.removal)
    }
}

fn span(from: Option<SimTime>, to: Option<SimTime>) -> f64 {
    match (from, to) {
        (Some(from), Some(to)) => to.since(from),
        _ => 0.0,
    }
}
