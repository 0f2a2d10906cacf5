//! The `Engine` struct and its B/C-phase loop.

use ds_core::{Clock, SimConfig, SimRng, SimTime};
use tracing::{debug, info, trace, warn};

use crate::{EngineObserver, EngineResult, EventContext, EventList, Model};

// ── TickSummary ───────────────────────────────────────────────────────────────

/// What one call to [`Engine::step`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickSummary {
    /// The clock time the tick ran at.
    pub time:             SimTime,
    /// Events processed in the B-phase.
    pub events:           usize,
    /// Services started in the C-phase.
    pub services_started: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Finished,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Three-phase discrete-event executive.
///
/// Each [`step`][Self::step] performs:
///
/// 1. **A** — advance the clock to the earliest pending event.
/// 2. **B** — pop and hand to [`Model::run_event`] every event due at that
///    exact time, in `(time, insertion)` order.
/// 3. **C** — for every service point that is idle with a non-empty queue,
///    begin service.  This lets an entity that arrived at an idle stage in
///    the B-phase start in the same tick.
///
/// A run ends on the first tick whose time is at or past the horizon; the
/// model's [`results`][Model::results] hook then fires exactly once.
///
/// The engine has no notion of wall-clock time.  Pacing, pausing and
/// background execution live in `ds-runtime`, which drives `step` directly.
pub struct Engine<M: Model> {
    config: SimConfig,
    clock:  Clock,
    events: EventList<M::Event>,
    rng:    SimRng,
    model:  M,
    phase:  Phase,
}

impl<M: Model> Engine<M> {
    /// Validate `config` and wrap `model`.
    pub fn new(model: M, config: SimConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            rng: SimRng::new(config.seed),
            config,
            clock: Clock::new(),
            events: EventList::new(),
            model,
            phase: Phase::Idle,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        self.config.end_time()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn events(&self) -> &EventList<M::Event> {
        &self.events
    }

    /// `true` once [`initialize`][Self::initialize] has run for this run.
    pub fn is_initialized(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// `true` once the `results` hook has fired.
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// `true` when the clock has reached the horizon.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.clock.now() >= self.horizon()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Run the model's initialisation hook.  Idempotent within a run.
    pub fn initialize(&mut self) {
        if self.phase != Phase::Idle {
            return;
        }
        self.phase = Phase::Running;
        let mut ctx = EventContext::new(&self.clock, &mut self.events, &mut self.rng);
        self.model.initialize(&mut ctx);
        info!(
            horizon = self.config.horizon,
            seed = self.config.seed,
            pending = self.events.len(),
            "simulation initialised"
        );
    }

    /// Execute one A/B/C tick.
    ///
    /// # Panics
    /// Panics if called before [`initialize`][Self::initialize] or after
    /// [`finish`][Self::finish].
    pub fn step(&mut self) -> TickSummary {
        assert!(self.phase == Phase::Running, "step called outside a run ({:?})", self.phase);

        // ── A: advance the clock ──────────────────────────────────────────
        let Some(next) = self.events.peek_time() else {
            // Nothing can ever happen again; close the run at the horizon.
            let end = self.horizon().max(self.clock.now());
            warn!(now = self.clock.now().value(), "event list drained before the horizon");
            self.clock.advance_to(end);
            return TickSummary { time: end, events: 0, services_started: 0 };
        };
        self.clock.advance_to(next);
        let now = self.clock.now();
        trace!(now = now.value(), "clock advanced");

        // ── B: every event due now ────────────────────────────────────────
        let mut processed = 0;
        while self.events.peek_time() == Some(now) {
            let event = self.events.pop();
            debug!(now = now.value(), kind = ?event.kind(), seq = event.seq(), "event");
            let mut ctx = EventContext::new(&self.clock, &mut self.events, &mut self.rng);
            self.model.run_event(event, &mut ctx);
            processed += 1;
        }

        // ── C: start service wherever possible ────────────────────────────
        let started = self.try_c_events();

        TickSummary { time: now, events: processed, services_started: started }
    }

    fn try_c_events(&mut self) -> usize {
        let mut ctx = EventContext::new(&self.clock, &mut self.events, &mut self.rng);
        let mut started = 0;
        for point in self.model.service_points_mut() {
            if !point.is_busy() && point.has_waiting() && point.begin_service(&mut ctx).is_some() {
                started += 1;
            }
        }
        started
    }

    /// Fire the model's `results` hook.  Idempotent within a run.
    pub fn finish(&mut self) {
        if self.phase == Phase::Finished {
            return;
        }
        self.phase = Phase::Finished;
        self.model.results(&self.clock);
        info!(final_time = self.clock.now().value(), "simulation finished");
    }

    /// Run from the current position to the horizon without pacing.
    ///
    /// Initialises first if needed.  Calls `observer` after every tick.
    pub fn run<O: EngineObserver>(&mut self, observer: &mut O) {
        self.initialize();
        while !self.is_finished() && !self.is_done() {
            let tick = self.step();
            observer.on_tick(&tick);
        }
        if !self.is_finished() {
            self.finish();
            observer.on_run_end(self.clock.now());
        }
    }

    /// Return to the pre-run state: no pending events, clock at zero, RNG
    /// re-seeded, model reset.  The next run is indistinguishable from one
    /// on a fresh engine.
    pub fn reset(&mut self) {
        self.events.clear();
        self.clock.reset();
        self.rng = SimRng::new(self.config.seed);
        self.model.reset();
        self.phase = Phase::Idle;
        info!("simulation reset");
    }
}
