//! `SimulationController` — the control surface for interactive runs.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use ds_core::{SimConfig, SimTime, StoreConfig};
use ds_engine::Engine;
use ds_model::{ChannelObserver, Notification, StoreModel};
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::estimator::Estimator;
use crate::shared::{RunState, Shared};
use crate::worker::{self, StoreEngine};
use crate::{RuntimeError, RuntimeResult};

/// Runs a [`StoreModel`] on a background worker and exposes
/// start / pause / resume / reset.
///
/// Notifications, including time-remaining estimates, go to the `Sender`
/// given at construction; the consumer drains them on its own thread.
///
/// # Threads
///
/// - The **worker** owns the simulation loop.  It takes the engine lock for
///   one tick at a time and waits on a condition variable between ticks,
///   both for the pacing delay and while paused.
/// - The **estimator** wakes every `estimate_interval_ms` and reports the
///   remaining wall-clock time.  It runs only while the simulation is
///   running.
///
/// Dropping the controller stops and joins both.
pub struct SimulationController {
    shared:    Arc<Shared>,
    engine:    Arc<Mutex<StoreEngine>>,
    observer:  ChannelObserver,
    worker:    Option<JoinHandle<()>>,
    estimator: Option<Estimator>,
}

impl SimulationController {
    /// Validate both configurations and build a stopped controller.
    pub fn new(store: StoreConfig, sim: SimConfig, sender: Sender<Notification>) -> RuntimeResult<Self> {
        let observer = ChannelObserver::new(sender);
        let engine = build_engine(store, sim, observer.clone())?;
        let shared = Arc::new(Shared::new(engine.config().pacing_delay_ms));
        Ok(Self {
            shared,
            engine: Arc::new(Mutex::new(engine)),
            observer,
            worker: None,
            estimator: None,
        })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.shared.control.lock().state
    }

    /// Simulation time as of the last completed tick.  Never blocks on the
    /// worker.
    pub fn now(&self) -> SimTime {
        self.shared.now()
    }

    pub fn horizon(&self) -> SimTime {
        self.engine.lock().horizon()
    }

    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.shared.delay_ms())
    }

    /// Run `f` against the engine.  Waits for the current tick to finish.
    pub fn with_engine<R>(&self, f: impl FnOnce(&StoreEngine) -> R) -> R {
        f(&self.engine.lock())
    }

    // ── Control ───────────────────────────────────────────────────────────

    /// Replace both configurations.  Only accepted while no run is active.
    pub fn configure(&mut self, store: StoreConfig, sim: SimConfig) -> RuntimeResult<()> {
        self.require_idle()?;
        let engine = build_engine(store, sim, self.observer.clone())?;
        {
            let mut ctl = self.shared.control.lock();
            self.shared.set_delay(&mut ctl, engine.config().pacing_delay_ms);
            ctl.state = RunState::Stopped;
        }
        self.reap_worker();
        *self.engine.lock() = engine;
        self.shared.publish_now(SimTime::ZERO);
        info!("simulation configured");
        Ok(())
    }

    /// Begin a fresh run.  A previous, finished run is reset first.
    pub fn start(&mut self) -> RuntimeResult<()> {
        self.require_idle()?;
        self.reap_worker();
        {
            let mut engine = self.engine.lock();
            if engine.is_initialized() {
                engine.reset();
            }
        }
        self.shared.publish_now(SimTime::ZERO);
        self.shared.set_worker_done(false);
        {
            let mut ctl = self.shared.control.lock();
            ctl.state = RunState::Running;
            ctl.parked = false;
            ctl.worker_alive = true;
        }

        let shared = Arc::clone(&self.shared);
        let engine = Arc::clone(&self.engine);
        let spawned = thread::Builder::new()
            .name("ds-worker".into())
            .spawn(move || worker::run(shared, engine));
        match spawned {
            Ok(handle) => self.worker = Some(handle),
            Err(source) => {
                let mut ctl = self.shared.control.lock();
                ctl.state = RunState::Stopped;
                ctl.worker_alive = false;
                return Err(RuntimeError::Spawn { name: "worker", source });
            }
        }

        info!(horizon = self.horizon().value(), delay_ms = self.shared.delay_ms(), "simulation started");
        self.start_estimator()
    }

    /// Suspend the run between ticks.  Returns once the worker is parked, or
    /// the run has ended.
    pub fn pause(&mut self) -> RuntimeResult<()> {
        {
            let mut ctl = self.shared.control.lock();
            if ctl.state != RunState::Running {
                return Err(RuntimeError::NotRunning(ctl.state));
            }
            ctl.state = RunState::Paused;
            self.shared.cond.notify_all();
            while ctl.state == RunState::Paused && !ctl.parked && ctl.worker_alive {
                self.shared.cond.wait(&mut ctl);
            }
        }
        self.stop_estimator();
        info!(now = self.now().value(), "simulation paused");
        Ok(())
    }

    /// Continue a paused run from exactly where it stopped.
    pub fn resume(&mut self) -> RuntimeResult<()> {
        {
            let mut ctl = self.shared.control.lock();
            if ctl.state != RunState::Paused {
                return Err(RuntimeError::NotPaused(ctl.state));
            }
            ctl.state = RunState::Running;
            self.shared.cond.notify_all();
        }
        info!(now = self.now().value(), "simulation resumed");
        self.start_estimator()
    }

    /// Change the wall-clock wait between ticks.  Takes effect immediately,
    /// including for a wait already in progress.
    pub fn set_pacing_delay(&self, ms: u64) {
        let mut ctl = self.shared.control.lock();
        self.shared.set_delay(&mut ctl, ms);
        self.shared.cond.notify_all();
        info!(delay_ms = ms, "pacing delay changed");
    }

    /// Stop any run and return to the pre-run state: clock at zero, empty
    /// queues, no pending events.
    ///
    /// The worker finishes its current tick and is joined before anything
    /// is cleared.  Reports [`RuntimeError::WorkerPanicked`] if the worker
    /// had died, after resetting regardless.
    pub fn reset(&mut self) -> RuntimeResult<()> {
        {
            let mut ctl = self.shared.control.lock();
            ctl.state = RunState::Stopped;
            self.shared.cond.notify_all();
        }
        self.stop_estimator();
        let joined = self.join_worker();

        self.engine.lock().reset();
        self.shared.publish_now(SimTime::ZERO);
        self.shared.set_worker_done(false);
        info!("simulation reset");
        joined
    }

    /// Block until the current run reaches its horizon or is stopped.
    ///
    /// Returns immediately when nothing is running, including while paused.
    pub fn wait(&mut self) -> RuntimeResult<()> {
        {
            let mut ctl = self.shared.control.lock();
            while ctl.worker_alive && ctl.state == RunState::Running {
                self.shared.cond.wait(&mut ctl);
            }
            if ctl.worker_alive {
                return Ok(());
            }
        }
        self.stop_estimator();
        self.join_worker()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn require_idle(&self) -> RuntimeResult<()> {
        match self.state() {
            RunState::Stopped | RunState::Finished => Ok(()),
            state => Err(RuntimeError::NotStopped(state)),
        }
    }

    fn start_estimator(&mut self) -> RuntimeResult<()> {
        self.stop_estimator();
        let (horizon, interval) = {
            let engine = self.engine.lock();
            (engine.horizon(), Duration::from_millis(engine.config().estimate_interval_ms))
        };
        let estimator = Estimator::spawn(Arc::clone(&self.shared), horizon, interval, self.observer.clone())?;
        self.estimator = Some(estimator);
        Ok(())
    }

    fn stop_estimator(&mut self) {
        if let Some(estimator) = self.estimator.take() {
            estimator.stop();
        }
    }

    fn join_worker(&mut self) -> RuntimeResult<()> {
        match self.worker.take() {
            Some(handle) => handle.join().map_err(|_| RuntimeError::WorkerPanicked),
            None => Ok(()),
        }
    }

    /// Join a worker that has already exited, logging a panic instead of
    /// returning it.
    fn reap_worker(&mut self) {
        self.stop_estimator();
        if let Err(e) = self.join_worker() {
            warn!(error = %e, "previous run ended abnormally");
        }
    }
}

impl Drop for SimulationController {
    fn drop(&mut self) {
        {
            let mut ctl = self.shared.control.lock();
            ctl.state = RunState::Stopped;
            self.shared.cond.notify_all();
        }
        self.stop_estimator();
        let _ = self.join_worker();
    }
}

fn build_engine(store: StoreConfig, sim: SimConfig, observer: ChannelObserver) -> RuntimeResult<StoreEngine> {
    let model = StoreModel::new(store, observer)?;
    Ok(Engine::new(model, sim)?)
}
