//! `StoreStats` — live run statistics built from notifications.

use ds_core::{CustomerId, SimTime};
use ds_model::{Customer, Lane, Stage, StoreObserver};
use rustc_hash::FxHashMap;

/// Per-stage counters.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StageStats {
    /// Customers at the stage now, queued or in service.
    pub occupancy:          u64,
    /// Customers that have left the stage.
    pub completed:          u64,
    /// Sum of time spent at the stage by those customers.
    pub total_service_time: f64,
}

impl StageStats {
    pub fn mean_service_time(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.total_service_time / self.completed as f64
        }
    }

    /// Total service time as a fraction of `now`.  Zero at time zero.
    pub fn utilization(&self, now: SimTime) -> f64 {
        if now.value() > 0.0 {
            self.total_service_time / now.value()
        } else {
            0.0
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Visit {
    entered_stage: SimTime,
}

/// Aggregates store notifications into the figures a dashboard shows.
///
/// Time at a stage is measured from entering the stage (arrival, for the
/// entrance) to leaving it, so it includes queueing.  Checkout time comes
/// from the completed customer's own timestamps.
#[derive(Clone, Debug, Default)]
pub struct StoreStats {
    stages:         [StageStats; Stage::COUNT],
    active:         FxHashMap<CustomerId, Visit>,
    created:        u64,
    completed:      u64,
    total_time:     f64,
    max_occupancy:  u64,
    series:         Vec<(SimTime, u64)>,
    now:            SimTime,
    ended_at:       Option<SimTime>,
    time_remaining: Option<u64>,
}

impl StoreStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything, as for a new run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn stage(&self, stage: Stage) -> &StageStats {
        &self.stages[stage.index()]
    }

    pub fn stages(&self) -> impl Iterator<Item = (Stage, &StageStats)> {
        Stage::ALL.into_iter().zip(self.stages.iter())
    }

    pub fn customers_created(&self) -> u64 {
        self.created
    }

    pub fn customers_completed(&self) -> u64 {
        self.completed
    }

    /// Customers anywhere in the store.
    pub fn occupancy(&self) -> u64 {
        self.stages.iter().map(|s| s.occupancy).sum()
    }

    pub fn max_occupancy(&self) -> u64 {
        self.max_occupancy
    }

    /// `(time, occupancy)` after every move between stages.
    pub fn occupancy_series(&self) -> &[(SimTime, u64)] {
        &self.series
    }

    pub fn mean_time_in_store(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.total_time / self.completed as f64
        }
    }

    /// Latest simulation time seen in any notification.
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn ended_at(&self) -> Option<SimTime> {
        self.ended_at
    }

    pub fn time_remaining(&self) -> Option<u64> {
        self.time_remaining
    }

    pub fn utilization(&self, stage: Stage) -> f64 {
        self.stage(stage).utilization(self.now)
    }

    fn observe_time(&mut self, at: SimTime) {
        self.now = self.now.max(at);
    }

    fn enter(&mut self, stage: Stage) {
        self.stages[stage.index()].occupancy += 1;
        self.max_occupancy = self.max_occupancy.max(self.occupancy());
    }

    fn leave(&mut self, stage: Stage, time_spent: f64) {
        let s = &mut self.stages[stage.index()];
        s.occupancy = s.occupancy.saturating_sub(1);
        s.completed += 1;
        s.total_service_time += time_spent;
    }
}

impl StoreObserver for StoreStats {
    fn on_customer_created(&mut self, customer: &Customer) {
        self.created += 1;
        self.observe_time(customer.arrival());
        self.active.insert(customer.id(), Visit { entered_stage: customer.arrival() });
        self.enter(Stage::Entrance);
    }

    fn on_customer_moved(&mut self, id: CustomerId, from: Stage, to: Stage, at: SimTime) {
        self.observe_time(at);
        let spent = match self.active.get_mut(&id) {
            Some(visit) => {
                let spent = at.since(visit.entered_stage);
                visit.entered_stage = at;
                spent
            }
            None => 0.0,
        };
        self.leave(from, spent);
        self.enter(to);
        self.series.push((at, self.occupancy()));
    }

    fn on_customer_completed(&mut self, customer: &Customer, lane: Lane) {
        if let Some(removal) = customer.removal() {
            self.observe_time(removal);
        }
        self.active.remove(&customer.id());
        self.leave(lane.stage(), customer.checkout_duration());
        self.completed += 1;
        self.total_time += customer.total_time();
    }

    fn on_simulation_ended(&mut self, final_time: SimTime) {
        self.observe_time(final_time);
        self.ended_at = Some(final_time);
    }

    fn on_time_remaining(&mut self, seconds: Option<u64>) {
        self.time_remaining = seconds;
    }
}
