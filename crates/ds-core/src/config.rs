//! Store model configuration.
//!
//! Built by the application (command-line flags, a UI form, …) and handed to
//! the model by value.  Defaults reproduce the store the simulator was
//! calibrated against.

use crate::{DistributionSpec, DsError, DsResult};

// ── ItemRange ─────────────────────────────────────────────────────────────────

/// Inclusive range of basket sizes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemRange {
    pub min: u32,
    pub max: u32,
}

impl ItemRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, items: u32) -> bool {
        (self.min..=self.max).contains(&items)
    }

    fn validate(&self, field: &'static str) -> DsResult<()> {
        if self.min == 0 {
            return Err(DsError::invalid(field, "minimum item count must be at least 1"));
        }
        if self.min > self.max {
            return Err(DsError::invalid(
                field,
                format!("minimum {} exceeds maximum {}", self.min, self.max),
            ));
        }
        Ok(())
    }
}

// ── LaneMultipliers ───────────────────────────────────────────────────────────

/// Factors applied to the checkout service parameter per lane.
///
/// The shopping stage has no multiplier: its duration is derived from the
/// basket size, not from the service distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneMultipliers {
    pub regular:       f64,
    pub express:       f64,
    pub self_checkout: f64,
}

impl Default for LaneMultipliers {
    fn default() -> Self {
        Self { regular: 1.0, express: 0.7, self_checkout: 1.2 }
    }
}

impl LaneMultipliers {
    fn validate(&self) -> DsResult<()> {
        for (field, m) in [
            ("multipliers.regular", self.regular),
            ("multipliers.express", self.express),
            ("multipliers.self_checkout", self.self_checkout),
        ] {
            if !m.is_finite() || m <= 0.0 {
                return Err(DsError::invalid(field, format!("must be positive and finite, got {m}")));
            }
        }
        Ok(())
    }
}

// ── StoreConfig ───────────────────────────────────────────────────────────────

/// Every tunable of the store model.  Immutable for the duration of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreConfig {
    /// Inter-arrival time distribution.
    pub arrival: DistributionSpec,

    /// Service time at the entrance.
    pub entrance: DistributionSpec,

    /// Base checkout service time; scaled per lane by `multipliers`.
    pub service: DistributionSpec,

    pub multipliers: LaneMultipliers,

    /// Share of arriving customers classified as express, in percent.
    pub express_percentage: f64,

    pub regular_items: ItemRange,
    pub express_items: ItemRange,

    /// Customers with at most this many items use the express lane even
    /// when classified as regular.
    pub express_item_threshold: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            arrival:                DistributionSpec::exponential(5.0),
            entrance:               DistributionSpec::exponential(1.0),
            service:                DistributionSpec::normal(8.0),
            multipliers:            LaneMultipliers::default(),
            express_percentage:     20.0,
            regular_items:          ItemRange::new(10, 30),
            express_items:          ItemRange::new(1, 10),
            express_item_threshold: 10,
        }
    }
}

impl StoreConfig {
    /// Reject every value the model cannot run with.  Called before a run
    /// starts; nothing is re-validated mid-run.
    pub fn validate(&self) -> DsResult<()> {
        self.arrival.validate("arrival")?;
        self.entrance.validate("entrance")?;
        self.service.validate("service")?;
        self.multipliers.validate()?;
        // Each lane samples the scaled parameter, so the ceiling applies after scaling.
        let m = &self.multipliers;
        self.service.scaled(m.regular).validate("service.regular")?;
        self.service.scaled(m.express).validate("service.express")?;
        self.service.scaled(m.self_checkout).validate("service.self_checkout")?;
        if !(0.0..=100.0).contains(&self.express_percentage) {
            return Err(DsError::invalid(
                "express_percentage",
                format!("must lie in [0, 100], got {}", self.express_percentage),
            ));
        }
        self.regular_items.validate("regular_items")?;
        self.express_items.validate("express_items")?;
        Ok(())
    }

    /// Probability in [0, 1] that a new customer is express.
    #[inline]
    pub fn express_probability(&self) -> f64 {
        self.express_percentage / 100.0
    }
}
