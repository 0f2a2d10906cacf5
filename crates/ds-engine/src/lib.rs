//! `ds-engine` — the discrete-event executive.
//!
//! # Three-phase tick
//!
//! ```text
//! while clock < horizon:
//!   A  clock ← time of earliest pending event
//!   B  for each event due at clock (insertion order):
//!        model.run_event(event)      → may enqueue, dequeue, schedule
//!   C  for each service point, in model order:
//!        if idle and queue non-empty → begin_service (schedules departure)
//! model.results()
//! ```
//!
//! # Crate layout
//!
//! | Module            | Contents                                            |
//! |-------------------|-----------------------------------------------------|
//! | [`event`]         | `Event<E>`, `EventList<E>` (stable min-heap)        |
//! | [`context`]       | `EventContext` — clock, event list, RNG for callbacks |
//! | [`service_point`] | `ServicePoint<T, E>`, `ServiceTime`, `ServiceStats` |
//! | [`arrival`]       | `ArrivalProcess<E>`                                 |
//! | [`model`]         | `Model` trait                                       |
//! | [`engine`]        | `Engine<M>`, `TickSummary`                          |
//! | [`observer`]      | `EngineObserver`, `NoopObserver`                    |
//! | [`error`]         | `EngineError`, `EngineResult<T>`                    |

pub mod arrival;
pub mod context;
pub mod engine;
pub mod error;
pub mod event;
pub mod model;
pub mod observer;
pub mod service_point;


pub use arrival::ArrivalProcess;
pub use context::EventContext;
pub use engine::{Engine, TickSummary};
pub use error::{EngineError, EngineResult};
pub use event::{Event, EventList};
pub use model::Model;
pub use observer::{EngineObserver, NoopObserver};
pub use service_point::{ServicePoint, ServiceStats, ServiceTime};
