//! Periodic wall-clock "time remaining" reports.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender};
use ds_core::SimTime;
use ds_model::{ChannelObserver, StoreObserver};
use tracing::trace;

use crate::shared::Shared;
use crate::{RuntimeError, RuntimeResult};

/// Seconds of wall-clock time left if every remaining unit of simulated
/// time costs one pacing delay.  `None` for an unpaced run.
pub fn estimate_seconds(now: SimTime, horizon: SimTime, pacing_delay_ms: u64) -> Option<u64> {
    if pacing_delay_ms == 0 {
        return None;
    }
    let remaining = (horizon - now).max(0.0);
    Some((remaining * pacing_delay_ms as f64 / 1000.0).ceil() as u64)
}

/// A running estimator thread.  Dropping the handle cancels it.
pub(crate) struct Estimator {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Estimator {
    /// Report every `interval` until cancelled or the worker exits.
    ///
    /// Only reads the published clock and delay.
    pub fn spawn(
        shared:   Arc<Shared>,
        horizon:  SimTime,
        interval: Duration,
        mut observer: ChannelObserver,
    ) -> RuntimeResult<Self> {
        let (cancel, cancelled) = crossbeam_channel::bounded::<()>(0);
        let handle = thread::Builder::new()
            .name("ds-estimator".into())
            .spawn(move || {
                loop {
                    match cancelled.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        // Cancelled, or the controller went away.
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                    if shared.worker_done() {
                        break;
                    }
                    let estimate = estimate_seconds(shared.now(), horizon, shared.delay_ms());
                    trace!(?estimate, "time remaining");
                    observer.on_time_remaining(estimate);
                }
            })
            .map_err(|source| RuntimeError::Spawn { name: "estimator", source })?;

        Ok(Self { cancel: Some(cancel), handle: Some(handle) })
    }

    /// Cancel and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Disconnecting wakes the thread immediately.
        drop(self.cancel.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Estimator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
