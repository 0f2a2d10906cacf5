//! `StoreModel` — the retail store plugged into the engine.

use ds_core::{Clock, CustomerId, DsResult, Sampler, SimTime, StoreConfig};
use ds_engine::{ArrivalProcess, Event, EventContext, Model, ServicePoint};
use tracing::{debug, info, warn};

use crate::routing::route_checkout;
use crate::{Customer, Lane, ShoppingTime, Stage, StoreEvent, StoreObserver};

/// Customer flow through entrance, shopping, and three checkout lanes.
///
/// ```text
/// Arrival ─▶ Entrance ─▶ Shopping ─┬─▶ Express checkout ─▶ exit
///                                  ├─▶ Self checkout    ─▶ exit
///                                  └─▶ Regular checkout ─▶ exit
/// ```
///
/// Entrance and checkout times come from the configured distributions, each
/// checkout lane scaled by its multiplier; shopping time is derived from
/// the basket size (see [`ShoppingTime`]).  Routing follows
/// [`route_checkout`].  Every transition is reported to the observer `O`.
pub struct StoreModel<O> {
    config:    StoreConfig,
    arrivals:  ArrivalProcess<StoreEvent>,
    /// Indexed by [`Stage::index`].
    points:    Vec<ServicePoint<Customer, StoreEvent>>,
    next_id:   CustomerId,
    created:   u64,
    completed: u64,
    /// Sum of time in store over completed customers.
    total_time_in_store: f64,
    observer:  O,
}

impl<O: StoreObserver> StoreModel<O> {
    /// Validate `config` and build the five service points.
    pub fn new(config: StoreConfig, observer: O) -> DsResult<Self> {
        config.validate()?;

        let checkout = |lane: Lane, field: &'static str| -> DsResult<ServicePoint<Customer, StoreEvent>> {
            let spec = config.service.scaled(lane.multiplier(&config.multipliers));
            Ok(ServicePoint::new(lane.stage().label(), Sampler::new(spec, field)?, StoreEvent::CheckoutDone(lane)))
        };

        let points = vec![
            ServicePoint::new(
                Stage::Entrance.label(),
                Sampler::new(config.entrance, "entrance")?,
                StoreEvent::EntranceDone,
            ),
            ServicePoint::new(Stage::Shopping.label(), ShoppingTime::default(), StoreEvent::ShoppingDone),
            checkout(Lane::Regular, "service.regular")?,
            checkout(Lane::Express, "service.express")?,
            checkout(Lane::SelfService, "service.self_checkout")?,
        ];
        debug_assert!(Stage::ALL.iter().all(|s| points[s.index()].label() == s.label()));

        Ok(Self {
            arrivals: ArrivalProcess::new(Sampler::new(config.arrival, "arrival")?, StoreEvent::Arrival),
            config,
            points,
            next_id: CustomerId::FIRST,
            created: 0,
            completed: 0,
            total_time_in_store: 0.0,
            observer,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn service_point(&self, stage: Stage) -> &ServicePoint<Customer, StoreEvent> {
        &self.points[stage.index()]
    }

    /// Every service point with its stage, in flow order.
    pub fn service_points(&self) -> impl Iterator<Item = (Stage, &ServicePoint<Customer, StoreEvent>)> {
        Stage::ALL.into_iter().zip(self.points.iter())
    }

    pub fn customers_created(&self) -> u64 {
        self.created
    }

    pub fn customers_completed(&self) -> u64 {
        self.completed
    }

    /// Customers currently inside the store.
    pub fn customers_in_store(&self) -> u64 {
        self.created - self.completed
    }

    /// Mean time in store over completed customers; 0 before the first
    /// completion.
    pub fn mean_time_in_store(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.total_time_in_store / self.completed as f64
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn point_mut(&mut self, stage: Stage) -> &mut ServicePoint<Customer, StoreEvent> {
        &mut self.points[stage.index()]
    }

    // ── Event handlers ────────────────────────────────────────────────────

    fn on_arrival(&mut self, ctx: &mut EventContext<'_, StoreEvent>) {
        let now = ctx.now();
        let id = self.next_id;
        self.next_id = id.next();
        self.created += 1;

        let customer = Customer::generate(id, &self.config, now, ctx.rng);
        debug!(
            customer = %id,
            kind = %customer.kind(),
            items = customer.items(),
            now = now.value(),
            "customer arrived"
        );
        self.observer.on_customer_created(&customer);
        self.point_mut(Stage::Entrance).enqueue(customer);

        self.arrivals.generate_next(ctx);
    }

    fn on_entrance_done(&mut self, ctx: &mut EventContext<'_, StoreEvent>) {
        let now = ctx.now();
        let Some(mut customer) = self.point_mut(Stage::Entrance).dequeue(now) else {
            panic!("entrance departure at {now} with an empty entrance queue");
        };
        let id = customer.id();
        customer.stamp_shopping_start(now);
        customer.move_to(Stage::Shopping);

        self.point_mut(Stage::Shopping).enqueue(customer);
        self.observer.on_customer_moved(id, Stage::Entrance, Stage::Shopping, now);

        // Start now rather than waiting for the C-phase; a no-op when busy.
        self.point_mut(Stage::Shopping).begin_service(ctx);
    }

    fn on_shopping_done(&mut self, ctx: &mut EventContext<'_, StoreEvent>) {
        let now = ctx.now();
        let Some(mut customer) = self.point_mut(Stage::Shopping).dequeue(now) else {
            warn!(now = now.value(), "shopping departure with an empty shopping queue; skipped");
            return;
        };
        customer.stamp_shopping_end(now);

        let lane = route_checkout(&customer, self.config.express_item_threshold, ctx.rng);
        let to = lane.stage();
        let id = customer.id();
        debug!(customer = %id, items = customer.items(), lane = %lane, "routed to checkout");

        customer.stamp_checkout_start(now);
        customer.move_to(to);
        self.point_mut(to).enqueue(customer);
        self.observer.on_customer_moved(id, Stage::Shopping, to, now);
    }

    fn on_checkout_done(&mut self, lane: Lane, now: SimTime) {
        let Some(mut customer) = self.point_mut(lane.stage()).dequeue(now) else {
            panic!("{lane} departure at {now} with an empty queue");
        };
        customer.stamp_removal(now);

        self.completed += 1;
        self.total_time_in_store += customer.total_time();
        debug!(
            customer = %customer.id(),
            lane = %lane,
            total_time = customer.total_time(),
            mean_time = self.mean_time_in_store(),
            "customer left"
        );
        self.observer.on_customer_completed(&customer, lane);
    }
}

impl<O: StoreObserver + Send + 'static> Model for StoreModel<O> {
    type Event = StoreEvent;
    type Entity = Customer;

    fn initialize(&mut self, ctx: &mut EventContext<'_, StoreEvent>) {
        self.arrivals.schedule_first(ctx);
    }

    fn run_event(&mut self, event: Event<StoreEvent>, ctx: &mut EventContext<'_, StoreEvent>) {
        match event.into_kind() {
            StoreEvent::Arrival => self.on_arrival(ctx),
            StoreEvent::EntranceDone => self.on_entrance_done(ctx),
            StoreEvent::ShoppingDone => self.on_shopping_done(ctx),
            StoreEvent::CheckoutDone(lane) => self.on_checkout_done(lane, ctx.now()),
        }
    }

    fn service_points_mut(&mut self) -> &mut [ServicePoint<Customer, StoreEvent>] {
        &mut self.points
    }

    fn results(&mut self, clock: &Clock) {
        let now = clock.now();
        info!(
            final_time = now.value(),
            created = self.created,
            completed = self.completed,
            in_store = self.customers_in_store(),
            mean_time_in_store = self.mean_time_in_store(),
            "store closed"
        );
        for (stage, point) in self.service_points() {
            info!(
                stage = %stage,
                served = point.stats().served,
                mean_service_time = point.stats().mean_service_time(),
                utilization = point.utilization(now),
                waiting = point.queue_len(),
                "stage summary"
            );
        }
        self.observer.on_simulation_ended(now);
    }

    fn reset(&mut self) {
        for point in &mut self.points {
            point.reset();
        }
        self.next_id = CustomerId::FIRST;
        self.created = 0;
        self.completed = 0;
        self.total_time_in_store = 0.0;
    }
}
