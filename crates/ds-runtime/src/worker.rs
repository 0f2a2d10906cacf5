//! The simulation worker thread.

use std::sync::Arc;
use std::time::Instant;

use ds_engine::Engine;
use ds_model::{ChannelObserver, StoreModel};
use parking_lot::Mutex;
use tracing::{debug, info, trace};

use crate::shared::{RunState, Shared};

/// The engine type the controller runs.
pub type StoreEngine = Engine<StoreModel<ChannelObserver>>;

/// Marks the worker as exited when dropped, including on panic, so that
/// nobody blocks forever on a dead worker.
struct ExitGuard<'a>(&'a Shared);

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        let mut ctl = self.0.control.lock();
        ctl.worker_alive = false;
        ctl.parked = false;
        if ctl.state != RunState::Stopped {
            ctl.state = RunState::Finished;
        }
        self.0.set_worker_done(true);
        self.0.cond.notify_all();
    }
}

/// Drive `engine` tick by tick until it reaches its horizon or the
/// controller stops it.
///
/// The engine lock is held for exactly one tick at a time, so every event
/// runs to completion before a pause or stop can take effect.
pub(crate) fn run(shared: Arc<Shared>, engine: Arc<Mutex<StoreEngine>>) {
    let _guard = ExitGuard(&shared);
    engine.lock().initialize();

    loop {
        if !wait_turn(&shared) {
            debug!("worker stopped");
            return;
        }

        let mut engine = engine.lock();
        let tick = engine.step();
        shared.publish_now(tick.time);
        trace!(now = tick.time.value(), events = tick.events, "tick");

        if engine.is_done() {
            engine.finish();
            info!(final_time = engine.now().value(), "run reached its horizon");
            return;
        }
    }
}

/// Block at the pause gate, then sleep the pacing delay.
///
/// Returns `false` once the run has been stopped.  A pause requested during
/// the delay sends the worker back to the gate; a delay change takes effect
/// immediately.
fn wait_turn(shared: &Shared) -> bool {
    let mut ctl = shared.control.lock();
    'gate: loop {
        while ctl.state == RunState::Paused {
            if !ctl.parked {
                ctl.parked = true;
                shared.cond.notify_all();
                debug!("worker parked");
            }
            shared.cond.wait(&mut ctl);
        }
        ctl.parked = false;
        if ctl.state != RunState::Running {
            return false;
        }

        let started = Instant::now();
        loop {
            let deadline = started + ctl.pacing_delay;
            if Instant::now() >= deadline {
                return true;
            }
            shared.cond.wait_until(&mut ctl, deadline);
            if ctl.state != RunState::Running {
                continue 'gate;
            }
        }
    }
}
