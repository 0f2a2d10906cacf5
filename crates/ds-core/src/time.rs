//! Simulation time model.
//!
//! # Design
//!
//! Time is a non-negative real number of abstract units (the CSV report
//! reads one unit as one minute).  Unlike a fixed-step tick counter, the
//! clock jumps straight to the timestamp of the next scheduled event, so
//! `SimTime` wraps an `f64` and supplies the total order the event heap needs.
//!
//! The `Clock` is owned by the engine and lent to collaborators by shared
//! reference; there is no process-wide clock.

use std::cmp::Ordering;
use std::fmt;

use crate::{DsError, DsResult};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute point in simulated time.
///
/// Always finite.  Negative zero is normalised to zero on construction so
/// that equality and ordering agree.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// # Panics
    /// Panics if `t` is NaN or infinite.
    #[inline]
    pub fn new(t: f64) -> SimTime {
        assert!(t.is_finite(), "simulation time must be finite, got {t}");
        SimTime(t + 0.0)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// The time `delta` units after `self`.
    #[inline]
    pub fn plus(self, delta: f64) -> SimTime {
        SimTime::new(self.0 + delta)
    }

    /// Units elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        self.0 - earlier.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        self.plus(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.since(rhs)
    }
}

impl From<f64> for SimTime {
    fn from(t: f64) -> SimTime {
        SimTime::new(t)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}", self.0)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// The current simulation time of one engine.
///
/// Single writer (the engine), many readers.  Monotonically non-decreasing
/// between resets.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    now: SimTime,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward to `t`.
    ///
    /// # Panics
    /// Panics if `t` is earlier than the current time.  Going backwards means
    /// an event was scheduled in the past, which the event protocol forbids.
    pub fn advance_to(&mut self, t: SimTime) {
        assert!(
            t >= self.now,
            "clock cannot move backwards: now {}, requested {}",
            self.now,
            t
        );
        self.now = t;
    }

    /// Rewind to zero.  Only valid between runs.
    pub fn reset(&mut self) {
        self.now = SimTime::ZERO;
    }
}

impl fmt::Display for Clock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.now)
    }
}

/// Largest accepted run horizon.  Leaves room for events scheduled past the
/// horizon by the final tick.
pub const MAX_HORIZON: f64 = f64::MAX / 2.0;

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level configuration.
///
/// Read-only for the duration of one run.  Model parameters (distributions,
/// item ranges, …) live in [`StoreConfig`][crate::StoreConfig].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated length of one run.  The run ends on the first tick whose
    /// time is at or beyond the horizon.
    pub horizon: f64,

    /// Artificial real-time wait before every tick, in milliseconds.  Only
    /// paces observation; has no effect on simulated time.
    pub pacing_delay_ms: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// How often the time-remaining estimate is reported, in milliseconds.
    pub estimate_interval_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            horizon:              1_000.0,
            pacing_delay_ms:      0,
            seed:                 42,
            estimate_interval_ms: 1_000,
        }
    }
}

impl SimConfig {
    /// The horizon as a `SimTime`.  Call [`validate`][Self::validate] first.
    #[inline]
    pub fn end_time(&self) -> SimTime {
        SimTime::new(self.horizon)
    }

    pub fn validate(&self) -> DsResult<()> {
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(DsError::invalid(
                "horizon",
                format!("must be a positive finite number, got {}", self.horizon),
            ));
        }
        if self.horizon > MAX_HORIZON {
            return Err(DsError::invalid(
                "horizon",
                format!("{} exceeds the maximum {MAX_HORIZON:e}", self.horizon),
            ));
        }
        if self.estimate_interval_ms == 0 {
            return Err(DsError::invalid("estimate_interval_ms", "must be greater than zero"));
        }
        Ok(())
    }
}
