//! storesim — run the retail store simulation from the command line.
//!
//! Starts the simulation on its background worker, drains notifications on
//! the main thread into live statistics (and optionally the CSV customer
//! report), then prints a per-stage summary.
//!
//! ```text
//! storesim --horizon 480 --arrival-mean 3 --report ./output
//! RUST_LOG=debug storesim --delay 5 --seed 7
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::RecvTimeoutError;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ds_core::{DistributionKind, DistributionSpec, ItemRange, SimConfig, StoreConfig};
use ds_model::Notification;
use ds_output::{CsvReport, ReportObserver, StoreStats};
use ds_runtime::{RunState, SimulationController};

// ── Command line ──────────────────────────────────────────────────────────────

/// Every model option defaults to the calibrated store when omitted.
#[derive(Parser, Debug)]
#[command(name = "storesim", version, about = "Discrete-event simulation of customer flow through a retail store")]
struct Args {
    /// Simulated minutes to run
    #[arg(long, default_value_t = 1_000.0)]
    horizon: f64,

    /// Wall-clock delay between ticks, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay: u64,

    /// RNG seed; the same seed reproduces the same run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Interval between time-remaining estimates, in milliseconds
    #[arg(long, default_value_t = 1_000)]
    estimate_interval: u64,

    /// Inter-arrival distribution (exponential, normal, uniform, constant)
    #[arg(long)]
    arrival_dist: Option<DistributionKind>,

    /// Inter-arrival distribution parameter
    #[arg(long)]
    arrival_mean: Option<f64>,

    /// Entrance service distribution
    #[arg(long)]
    entrance_dist: Option<DistributionKind>,

    #[arg(long)]
    entrance_mean: Option<f64>,

    /// Checkout service distribution
    #[arg(long)]
    service_dist: Option<DistributionKind>,

    #[arg(long)]
    service_mean: Option<f64>,

    #[arg(long)]
    regular_multiplier: Option<f64>,

    #[arg(long)]
    express_multiplier: Option<f64>,

    #[arg(long)]
    self_checkout_multiplier: Option<f64>,

    /// Percentage of customers classified as express
    #[arg(long)]
    express_percentage: Option<f64>,

    #[arg(long)]
    regular_min_items: Option<u32>,

    #[arg(long)]
    regular_max_items: Option<u32>,

    #[arg(long)]
    express_min_items: Option<u32>,

    #[arg(long)]
    express_max_items: Option<u32>,

    /// Baskets of at most this many items use the express lane
    #[arg(long)]
    express_threshold: Option<u32>,

    /// Write customer_report.csv into this directory
    #[arg(long, value_name = "DIR")]
    report: Option<PathBuf>,

    /// Print the effective configuration as JSON before running
    #[arg(long)]
    print_config: bool,
}

fn override_spec(spec: &mut DistributionSpec, kind: Option<DistributionKind>, param: Option<f64>) {
    if let Some(kind) = kind {
        spec.kind = kind;
    }
    if let Some(param) = param {
        spec.param = param;
    }
}

impl Args {
    fn store_config(&self) -> StoreConfig {
        let mut c = StoreConfig::default();
        override_spec(&mut c.arrival, self.arrival_dist, self.arrival_mean);
        override_spec(&mut c.entrance, self.entrance_dist, self.entrance_mean);
        override_spec(&mut c.service, self.service_dist, self.service_mean);

        c.multipliers.regular = self.regular_multiplier.unwrap_or(c.multipliers.regular);
        c.multipliers.express = self.express_multiplier.unwrap_or(c.multipliers.express);
        c.multipliers.self_checkout = self.self_checkout_multiplier.unwrap_or(c.multipliers.self_checkout);
        c.express_percentage = self.express_percentage.unwrap_or(c.express_percentage);
        c.regular_items = ItemRange::new(
            self.regular_min_items.unwrap_or(c.regular_items.min),
            self.regular_max_items.unwrap_or(c.regular_items.max),
        );
        c.express_items = ItemRange::new(
            self.express_min_items.unwrap_or(c.express_items.min),
            self.express_max_items.unwrap_or(c.express_items.max),
        );
        c.express_item_threshold = self.express_threshold.unwrap_or(c.express_item_threshold);
        c
    }

    fn sim_config(&self) -> SimConfig {
        SimConfig {
            horizon:              self.horizon,
            pacing_delay_ms:      self.delay,
            seed:                 self.seed,
            estimate_interval_ms: self.estimate_interval,
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let store = args.store_config();
    let sim = args.sim_config();

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&json!({ "store": store, "sim": sim }))?);
    }

    let mut report = match &args.report {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            Some(ReportObserver::new(CsvReport::new(dir)?))
        }
        None => None,
    };

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut controller = SimulationController::new(store, sim, tx).context("invalid configuration")?;
    let mut stats = StoreStats::new();

    let t0 = Instant::now();
    controller.start()?;

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(note) => {
                if let Notification::TimeRemaining(Some(seconds)) = note {
                    info!(seconds, now = controller.now().value(), "time remaining");
                }
                note.dispatch(&mut stats);
                if let Some(report) = report.as_mut() {
                    note.dispatch(report);
                }
                if note.is_terminal() {
                    break;
                }
            }
            // Nothing pending and nothing running: the worker died.
            Err(RecvTimeoutError::Timeout) if !matches!(controller.state(), RunState::Running) => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    controller.wait()?;
    let elapsed = t0.elapsed();

    // ── Summary ───────────────────────────────────────────────────────────
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  final time          : {:.2}", stats.now().value());
    println!("  customers created   : {}", stats.customers_created());
    println!("  customers completed : {}", stats.customers_completed());
    println!("  still in store      : {}", stats.occupancy());
    println!("  max in store        : {}", stats.max_occupancy());
    println!("  mean time in store  : {:.2}", stats.mean_time_in_store());
    println!();

    println!("{:<18} {:>9} {:>10} {:>10} {:>12}", "Stage", "In stage", "Completed", "Mean time", "Utilization");
    println!("{}", "-".repeat(63));
    for (stage, s) in stats.stages() {
        println!(
            "{:<18} {:>9} {:>10} {:>10.2} {:>11.0}%",
            stage.label(),
            s.occupancy,
            s.completed,
            s.mean_service_time(),
            stats.utilization(stage) * 100.0,
        );
    }

    if let Some(mut report) = report {
        match report.take_error() {
            Some(e) => eprintln!("report error: {e}"),
            None => {
                println!();
                println!("  {} : {} rows", report.writer().path().display(), report.rows_written());
            }
        }
    }

    Ok(())
}
