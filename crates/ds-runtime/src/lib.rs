//! `ds-runtime` — interactive execution of the store simulation.
//!
//! [`SimulationController`] runs the engine on a background worker thread
//! with an adjustable wall-clock pacing delay between ticks, and supports
//! pause, resume and reset from the controlling thread.  Pacing never
//! changes simulated-time semantics: a paced run and an unpaced run with
//! the same seed produce the same notifications.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`controller`] | `SimulationController`                                |
//! | [`shared`]     | `RunState`; the lock, condvar and atomics the threads share |
//! | [`worker`]     | the worker loop; `StoreEngine`                        |
//! | [`estimator`]  | `estimate_seconds`; the time-remaining thread         |
//! | [`error`]      | `RuntimeError`, `RuntimeResult<T>`                    |

pub mod controller;
pub mod error;
pub mod estimator;
pub mod shared;
pub mod worker;

#[cfg(test)]
mod tests;

pub use controller::SimulationController;
pub use error::{RuntimeError, RuntimeResult};
pub use estimator::estimate_seconds;
pub use shared::RunState;
pub use worker::StoreEngine;
