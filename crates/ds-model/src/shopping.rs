//! Basket-size driven shopping time.

use ds_core::SimRng;
use ds_engine::ServiceTime;

use crate::Customer;

/// Shopping takes `base + per_item × items`, independent of the configured
/// service distribution.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShoppingTime {
    pub base:     f64,
    pub per_item: f64,
}

impl Default for ShoppingTime {
    fn default() -> Self {
        Self { base: 10.0, per_item: 2.0 }
    }
}

impl ShoppingTime {
    #[inline]
    pub fn for_items(&self, items: u32) -> f64 {
        self.base + self.per_item * f64::from(items)
    }
}

impl ServiceTime<Customer> for ShoppingTime {
    fn duration(&mut self, customer: &Customer, _rng: &mut SimRng) -> f64 {
        self.for_items(customer.items())
    }
}
