//! `ds-core` — foundational types for the discrete-event store simulator.
//!
//! This crate is a dependency of every other `ds-*` crate.  It intentionally
//! has no `ds-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module           | Contents                                             |
//! |------------------|------------------------------------------------------|
//! | [`ids`]          | `CustomerId`                                         |
//! | [`time`]         | `SimTime`, `Clock`, `SimConfig`                      |
//! | [`rng`]          | `SimRng` (seeded, run-level)                         |
//! | [`distribution`] | `DistributionKind`, `DistributionSpec`, `Sampler`    |
//! | [`config`]       | `StoreConfig`, `LaneMultipliers`, `ItemRange`        |
//! | [`error`]        | `DsError`, `DsResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, time and config.    |

pub mod config;
pub mod distribution;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ItemRange, LaneMultipliers, StoreConfig};
pub use distribution::{DistributionKind, DistributionSpec, MAX_PARAMETER, Sampler};
pub use error::{DsError, DsResult};
pub use ids::CustomerId;
pub use rng::SimRng;
pub use time::{Clock, MAX_HORIZON, SimConfig, SimTime};
