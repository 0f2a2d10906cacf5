//! Threaded tests for ds-runtime.  Waits are bounded so a broken worker fails
//! the test instead of hanging it.

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use ds_core::{SimConfig, SimTime, StoreConfig};
use ds_model::{Notification, Stage};

use crate::{RunState, RuntimeError, SimulationController, estimate_seconds};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn controller(horizon: f64, delay_ms: u64, seed: u64) -> (SimulationController, Receiver<Notification>) {
    let (tx, rx) = crossbeam_channel::unbounded();
    let sim = SimConfig { horizon, pacing_delay_ms: delay_ms, seed, ..SimConfig::default() };
    let ctl = SimulationController::new(StoreConfig::default(), sim, tx).unwrap();
    (ctl, rx)
}

/// A long run that will not end on its own during a test.
fn endless(delay_ms: u64) -> (SimulationController, Receiver<Notification>) {
    controller(1.0e9, delay_ms, 1)
}

/// Poll `cond` every millisecond for up to two seconds.
fn eventually(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    cond()
}

/// Everything but time-remaining reports, which depend on wall-clock timing.
fn simulated(rx: &Receiver<Notification>) -> Vec<Notification> {
    rx.try_iter().filter(|n| !matches!(n, Notification::TimeRemaining(_))).collect()
}

// ── Estimate ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod estimate {
    use super::*;

    #[test]
    fn unpaced_run_has_no_estimate() {
        assert_eq!(estimate_seconds(SimTime::ZERO, SimTime::new(100.0), 0), None);
    }

    #[test]
    fn remaining_time_times_delay() {
        // 90 units left at 100 ms each.
        assert_eq!(estimate_seconds(SimTime::new(10.0), SimTime::new(100.0), 100), Some(9));
        // Rounds up.
        assert_eq!(estimate_seconds(SimTime::new(99.5), SimTime::new(100.0), 1), Some(1));
    }

    #[test]
    fn past_the_horizon_is_zero() {
        assert_eq!(estimate_seconds(SimTime::new(120.0), SimTime::new(100.0), 50), Some(0));
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod control {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let sim = SimConfig { horizon: -1.0, ..SimConfig::default() };
        let err = SimulationController::new(StoreConfig::default(), sim, tx).err().unwrap();
        assert!(matches!(err, RuntimeError::Engine(_)));

        let (mut ctl, _rx) = controller(100.0, 0, 1);
        let store = StoreConfig { express_percentage: -5.0, ..StoreConfig::default() };
        let err = ctl.configure(store, SimConfig::default()).unwrap_err();
        assert!(matches!(err, RuntimeError::Config(_)));
        assert_eq!(ctl.state(), RunState::Stopped);
    }

    #[test]
    fn runs_to_completion() {
        let (mut ctl, rx) = controller(500.0, 0, 3);
        assert_eq!(ctl.state(), RunState::Stopped);
        ctl.start().unwrap();
        ctl.wait().unwrap();

        assert_eq!(ctl.state(), RunState::Finished);
        assert!(ctl.now() >= SimTime::new(500.0));
        assert_eq!(ctl.now(), ctl.with_engine(|e| e.now()));

        let notes = simulated(&rx);
        assert_eq!(notes.iter().filter(|n| n.is_terminal()).count(), 1);
        assert!(notes.last().is_some_and(Notification::is_terminal));
    }

    #[test]
    fn wrong_state_transitions_are_errors() {
        let (mut ctl, _rx) = endless(20);
        assert!(matches!(ctl.pause(), Err(RuntimeError::NotRunning(RunState::Stopped))));
        assert!(matches!(ctl.resume(), Err(RuntimeError::NotPaused(RunState::Stopped))));

        ctl.start().unwrap();
        assert!(matches!(ctl.start(), Err(RuntimeError::NotStopped(RunState::Running))));
        assert!(matches!(
            ctl.configure(StoreConfig::default(), SimConfig::default()),
            Err(RuntimeError::NotStopped(RunState::Running))
        ));
        assert!(matches!(ctl.resume(), Err(RuntimeError::NotPaused(RunState::Running))));

        ctl.pause().unwrap();
        assert!(matches!(ctl.pause(), Err(RuntimeError::NotRunning(RunState::Paused))));
        assert!(matches!(ctl.start(), Err(RuntimeError::NotStopped(RunState::Paused))));

        ctl.reset().unwrap();
        assert_eq!(ctl.state(), RunState::Stopped);
    }

    #[test]
    fn pause_freezes_the_clock_and_resume_continues() {
        let (mut ctl, _rx) = endless(1);
        ctl.start().unwrap();
        assert!(eventually(|| ctl.now() > SimTime::new(20.0)), "worker made no progress");

        ctl.pause().unwrap();
        assert_eq!(ctl.state(), RunState::Paused);
        let frozen = ctl.now();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(ctl.now(), frozen);
        assert_eq!(ctl.with_engine(|e| e.now()), frozen);

        ctl.resume().unwrap();
        assert_eq!(ctl.state(), RunState::Running);
        assert!(eventually(|| ctl.now() > frozen), "resume did not continue");

        ctl.reset().unwrap();
    }

    #[test]
    fn reset_returns_to_a_clean_state() {
        let (mut ctl, _rx) = endless(1);
        ctl.start().unwrap();
        assert!(eventually(|| ctl.now() > SimTime::new(50.0)));
        ctl.reset().unwrap();

        assert_eq!(ctl.state(), RunState::Stopped);
        assert_eq!(ctl.now(), SimTime::ZERO);
        ctl.with_engine(|e| {
            assert_eq!(e.now(), SimTime::ZERO);
            assert!(e.events().is_empty());
            for stage in Stage::ALL {
                let point = e.model().service_point(stage);
                assert!(!point.is_busy() && !point.has_waiting(), "{stage} not cleared");
            }
            assert_eq!(e.model().customers_created(), 0);
        });
    }

    #[test]
    fn reset_while_paused() {
        let (mut ctl, _rx) = endless(1);
        ctl.start().unwrap();
        assert!(eventually(|| ctl.now() > SimTime::ZERO));
        ctl.pause().unwrap();
        ctl.reset().unwrap();
        assert_eq!(ctl.state(), RunState::Stopped);
        assert_eq!(ctl.now(), SimTime::ZERO);
    }

    #[test]
    fn restart_matches_a_fresh_controller() {
        let (mut fresh, fresh_rx) = controller(400.0, 0, 17);
        fresh.start().unwrap();
        fresh.wait().unwrap();
        let expected = simulated(&fresh_rx);

        let (mut ctl, rx) = controller(400.0, 0, 17);
        ctl.start().unwrap();
        ctl.wait().unwrap();
        let _ = simulated(&rx);

        // Explicit reset, then start.
        ctl.reset().unwrap();
        ctl.start().unwrap();
        ctl.wait().unwrap();
        assert_eq!(simulated(&rx), expected);

        // Start straight after a finished run resets implicitly.
        ctl.start().unwrap();
        ctl.wait().unwrap();
        assert_eq!(simulated(&rx), expected);
    }

    #[test]
    fn pacing_does_not_change_the_outcome() {
        let (mut unpaced, unpaced_rx) = controller(60.0, 0, 5);
        unpaced.start().unwrap();
        unpaced.wait().unwrap();

        let (mut paced, paced_rx) = controller(60.0, 1, 5);
        paced.start().unwrap();
        paced.set_pacing_delay(0);
        paced.wait().unwrap();

        assert_eq!(simulated(&paced_rx), simulated(&unpaced_rx));
    }

    #[test]
    fn set_pacing_delay_is_visible() {
        let (ctl, _rx) = controller(100.0, 0, 1);
        assert_eq!(ctl.pacing_delay(), Duration::ZERO);
        ctl.set_pacing_delay(25);
        assert_eq!(ctl.pacing_delay(), Duration::from_millis(25));
    }

    #[test]
    fn configure_replaces_the_horizon() {
        let (mut ctl, _rx) = controller(100.0, 0, 1);
        let sim = SimConfig { horizon: 250.0, ..SimConfig::default() };
        ctl.configure(StoreConfig::default(), sim).unwrap();
        assert_eq!(ctl.horizon(), SimTime::new(250.0));
    }

    #[test]
    fn estimator_reports_while_running() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sim = SimConfig { horizon: 1.0e9, pacing_delay_ms: 5, estimate_interval_ms: 10, ..SimConfig::default() };
        let mut ctl = SimulationController::new(StoreConfig::default(), sim, tx).unwrap();
        ctl.start().unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut estimate = None;
        while let Ok(n) = rx.recv_deadline(deadline) {
            if let Notification::TimeRemaining(s) = n {
                estimate = s;
                break;
            }
        }
        let seconds = estimate.expect("no time-remaining report");
        // Nearly 1e9 units at 5 ms each.
        assert!(seconds > 1_000_000);

        ctl.pause().unwrap();
        let _ = rx.try_iter().count();
        thread::sleep(Duration::from_millis(50));
        assert!(
            rx.try_iter().all(|n| !matches!(n, Notification::TimeRemaining(_))),
            "estimator kept reporting while paused"
        );
        ctl.reset().unwrap();
    }

    fn no_estimates_within(rx: &Receiver<Notification>, window: Duration) -> bool {
        thread::sleep(window);
        rx.try_iter().all(|n| !matches!(n, Notification::TimeRemaining(_)))
    }

    #[test]
    fn estimator_stops_when_the_run_completes() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sim = SimConfig { horizon: 30.0, pacing_delay_ms: 1, estimate_interval_ms: 2, ..SimConfig::default() };
        let mut ctl = SimulationController::new(StoreConfig::default(), sim, tx).unwrap();
        ctl.start().unwrap();
        ctl.wait().unwrap();
        assert_eq!(ctl.state(), RunState::Finished);

        let _ = rx.try_iter().count();
        assert!(no_estimates_within(&rx, Duration::from_millis(50)), "estimator outlived the run");
    }

    #[test]
    fn estimator_stops_on_reset() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sim = SimConfig { horizon: 1.0e9, pacing_delay_ms: 2, estimate_interval_ms: 5, ..SimConfig::default() };
        let mut ctl = SimulationController::new(StoreConfig::default(), sim, tx).unwrap();
        ctl.start().unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        let mut reported = false;
        while let Ok(n) = rx.recv_deadline(deadline) {
            if matches!(n, Notification::TimeRemaining(_)) {
                reported = true;
                break;
            }
        }
        assert!(reported, "no time-remaining report before reset");

        ctl.reset().unwrap();
        let _ = rx.try_iter().count();
        assert!(no_estimates_within(&rx, Duration::from_millis(50)), "estimator kept reporting after reset");
    }
}
