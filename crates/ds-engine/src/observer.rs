//! Engine observer trait for progress reporting.

use ds_core::SimTime;

use crate::TickSummary;

/// Callbacks invoked by [`Engine::run`][crate::Engine::run] at tick
/// boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl EngineObserver for ProgressPrinter {
///     fn on_tick(&mut self, tick: &TickSummary) {
///         println!("{}: {} events, {} services started", tick.time, tick.events, tick.services_started);
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called after each tick's B- and C-phase.
    fn on_tick(&mut self, _tick: &TickSummary) {}

    /// Called once after the model's `results` hook.
    fn on_run_end(&mut self, _final_time: SimTime) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
