//! Where a customer can be, and the events that move them.

use std::fmt;

use ds_core::LaneMultipliers;

// ── Stage ─────────────────────────────────────────────────────────────────────

/// One of the five service points of the store, in the order customers
/// pass through them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Entrance,
    Shopping,
    RegularCheckout,
    ExpressCheckout,
    SelfCheckout,
}

impl Stage {
    pub const COUNT: usize = 5;

    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::Entrance,
        Stage::Shopping,
        Stage::RegularCheckout,
        Stage::ExpressCheckout,
        Stage::SelfCheckout,
    ];

    /// Position in [`Stage::ALL`]; usable as a dense array index.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Entrance => "entrance",
            Stage::Shopping => "shopping",
            Stage::RegularCheckout => "regular checkout",
            Stage::ExpressCheckout => "express checkout",
            Stage::SelfCheckout => "self checkout",
        }
    }

    #[inline]
    pub fn is_checkout(self) -> bool {
        self.lane().is_some()
    }

    /// The checkout lane this stage serves, if it is one.
    pub fn lane(self) -> Option<Lane> {
        match self {
            Stage::RegularCheckout => Some(Lane::Regular),
            Stage::ExpressCheckout => Some(Lane::Express),
            Stage::SelfCheckout => Some(Lane::SelfService),
            Stage::Entrance | Stage::Shopping => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Lane ──────────────────────────────────────────────────────────────────────

/// A checkout lane.  Each maps to exactly one checkout [`Stage`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lane {
    Regular,
    Express,
    SelfService,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Regular, Lane::Express, Lane::SelfService];

    pub fn stage(self) -> Stage {
        match self {
            Lane::Regular => Stage::RegularCheckout,
            Lane::Express => Stage::ExpressCheckout,
            Lane::SelfService => Stage::SelfCheckout,
        }
    }

    /// Service-time factor for this lane.
    pub fn multiplier(self, multipliers: &LaneMultipliers) -> f64 {
        match self {
            Lane::Regular => multipliers.regular,
            Lane::Express => multipliers.express,
            Lane::SelfService => multipliers.self_checkout,
        }
    }
}

impl From<Lane> for Stage {
    fn from(lane: Lane) -> Stage {
        lane.stage()
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stage().label())
    }
}

// ── StoreEvent ────────────────────────────────────────────────────────────────

/// Every transition the store model schedules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoreEvent {
    /// A new customer walks in.
    Arrival,
    /// The customer at the head of the entrance queue is through.
    EntranceDone,
    /// The customer at the head of the shopping queue has finished shopping.
    ShoppingDone,
    /// The customer being served at `Lane` has paid and leaves.
    CheckoutDone(Lane),
}
