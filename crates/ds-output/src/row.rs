//! Plain data rows written by report backends.

use ds_model::{Customer, CustomerKind};

/// One completed customer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerRow {
    pub customer_id:        u32,
    pub customer_type:      CustomerKind,
    pub arrival_time:       f64,
    pub removal_time:       f64,
    pub total_time:         f64,
    pub items:              u32,
    /// Mean time in store over every customer completed so far, this one
    /// included.
    pub mean_time_in_store: f64,
}

impl CustomerRow {
    /// Build a row from a customer who has left the store.  An unset
    /// removal time is reported as the arrival time.
    pub fn new(customer: &Customer, mean_time_in_store: f64) -> Self {
        let arrival = customer.arrival();
        Self {
            customer_id: customer.id().0,
            customer_type: customer.kind(),
            arrival_time: arrival.value(),
            removal_time: customer.removal().unwrap_or(arrival).value(),
            total_time: customer.total_time(),
            items: customer.items(),
            mean_time_in_store,
        }
    }
}

/// Format a duration in minutes as `hh:mm:ss`, truncating partial seconds.
pub fn format_minutes(minutes: f64) -> String {
    let total = (minutes.max(0.0) * 60.0) as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
