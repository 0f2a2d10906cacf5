//! Checkout lane selection.

use ds_core::SimRng;

use crate::{Customer, CustomerKind, Lane};

/// Share of customers not bound for the express lane who pick self-checkout.
pub const SELF_CHECKOUT_SHARE: f64 = 0.3;

/// Pick the checkout lane for a customer who has finished shopping.
///
/// Express customers, and anyone with at most `express_item_threshold`
/// items, go to the express lane.  Everyone else goes to self-checkout with
/// probability [`SELF_CHECKOUT_SHARE`] and to the regular lane otherwise.
/// The RNG is only drawn from in the second case.
pub fn route_checkout(customer: &Customer, express_item_threshold: u32, rng: &mut SimRng) -> Lane {
    if customer.kind() == CustomerKind::Express || customer.items() <= express_item_threshold {
        Lane::Express
    } else if rng.unit() < SELF_CHECKOUT_SHARE {
        Lane::SelfService
    } else {
        Lane::Regular
    }
}
