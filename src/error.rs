//! Error kinds surfaced by the crate.
//!
//! Everything is reported at the call site; nothing is retried and nothing
//! is logged.

use thiserror::Error;

/// Errors for approximate matching and retrieval.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A ratio parameter was non-finite or outside `[0.0, 1.0]`.
    #[error("ratio must be a finite number in [0.0, 1.0], got {0}")]
    InvalidRatio(f64),

    /// An index pointed past the end of a collection.
    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// A destination slice cannot hold the elements to be copied.
    #[error("destination has room for {available} elements, {required} required")]
    DestinationTooSmall { required: usize, available: usize },
}

/// Validate that a ratio value is finite and within `[0.0, 1.0]`.
pub(crate) fn validate_ratio(value: f64) -> Result<f64, Error> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(Error::InvalidRatio(value));
    }
    Ok(value)
}
