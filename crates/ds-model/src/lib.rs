//! `ds-model` — the retail store model.
//!
//! Customers arrive, pass the entrance, shop for a time proportional to
//! their basket, and leave through one of three checkout lanes.
//! [`StoreModel`] implements [`ds_engine::Model`]; the engine drives it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`stage`]    | `Stage`, `Lane`, `StoreEvent`                             |
//! | [`customer`] | `Customer`, `CustomerKind`                                |
//! | [`routing`]  | `route_checkout`, `SELF_CHECKOUT_SHARE`                   |
//! | [`shopping`] | `ShoppingTime`                                            |
//! | [`observer`] | `StoreObserver`, `Notification`, `ChannelObserver`        |
//! | [`store`]    | `StoreModel<O>`                                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to customers and stages.    |

pub mod customer;
pub mod observer;
pub mod routing;
pub mod shopping;
pub mod stage;
pub mod store;


pub use customer::{Customer, CustomerKind};
pub use observer::{ChannelObserver, Notification, StoreObserver};
pub use routing::{SELF_CHECKOUT_SHARE, route_checkout};
pub use shopping::ShoppingTime;
pub use stage::{Lane, Stage, StoreEvent};
pub use store::StoreModel;
