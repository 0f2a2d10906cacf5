//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `DsError` as one variant
//! via `#[from]`.  Only configuration problems are represented here: broken
//! engine invariants are programming defects and panic instead.

use thiserror::Error;

/// The top-level error type for `ds-core` and a common base for sub-crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DsError {
    #[error("invalid {field}: {reason}")]
    InvalidParameter {
        field:  &'static str,
        reason: String,
    },

    #[error("unknown distribution family {0:?} (expected exponential, normal, uniform or constant)")]
    UnknownDistribution(String),
}

impl DsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DsError::InvalidParameter { field, reason: reason.into() }
    }
}

/// Shorthand result type for all `ds-*` crates.
pub type DsResult<T> = Result<T, DsError>;
