//! State shared between the controller, the worker and the estimator.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use ds_core::SimTime;
use parking_lot::{Condvar, Mutex};

/// Lifecycle of one run.
///
/// ```text
///   Stopped ──start──▶ Running ──pause──▶ Paused
///      ▲                │  ▲               │
///      │                │  └────resume─────┘
///      │             horizon
///      │                ▼
///      └──reset──── Finished ──start (resets first)──▶ Running
/// ```
///
/// `reset` returns any state to `Stopped`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
    Finished,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RunState::Stopped => "stopped",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Finished => "finished",
        })
    }
}

/// Guarded by [`Shared::control`].
#[derive(Debug)]
pub(crate) struct Control {
    pub state:        RunState,
    /// The worker is blocked at its pause gate.
    pub parked:       bool,
    /// A worker thread exists and has not exited.
    pub worker_alive: bool,
    pub pacing_delay: Duration,
}

pub(crate) struct Shared {
    pub control:  Mutex<Control>,
    /// Signalled on every change to `control`.
    pub cond:     Condvar,
    /// `SimTime` bits, published after every tick.
    now_bits:     AtomicU64,
    delay_ms:     AtomicU64,
    /// Set when the worker exits for any reason.
    worker_done:  AtomicBool,
}

impl Shared {
    pub fn new(pacing_delay_ms: u64) -> Self {
        Self {
            control:     Mutex::new(Control {
                state:        RunState::Stopped,
                parked:       false,
                worker_alive: false,
                pacing_delay: Duration::from_millis(pacing_delay_ms),
            }),
            cond:        Condvar::new(),
            now_bits:    AtomicU64::new(SimTime::ZERO.value().to_bits()),
            delay_ms:    AtomicU64::new(pacing_delay_ms),
            worker_done: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        SimTime::new(f64::from_bits(self.now_bits.load(Ordering::Acquire)))
    }

    #[inline]
    pub fn publish_now(&self, now: SimTime) {
        self.now_bits.store(now.value().to_bits(), Ordering::Release);
    }

    #[inline]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms.load(Ordering::Relaxed)
    }

    /// Update the pacing delay; the caller holds `control`.
    pub fn set_delay(&self, control: &mut Control, ms: u64) {
        control.pacing_delay = Duration::from_millis(ms);
        self.delay_ms.store(ms, Ordering::Relaxed);
    }

    #[inline]
    pub fn worker_done(&self) -> bool {
        self.worker_done.load(Ordering::Acquire)
    }

    pub fn set_worker_done(&self, done: bool) {
        self.worker_done.store(done, Ordering::Release);
    }
}
