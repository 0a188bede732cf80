//! Error types for U-LoadPlan.

use thiserror::Error;

/// Result type alias for U-LoadPlan operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the allocation engine proper.
///
/// Packing shortfalls are never errors: the engine reports them as data
/// through [`AllocationResult`](crate::result::AllocationResult).
#[derive(Debug, Error)]
pub enum Error {
    /// A truck catalog row cannot be used.
    #[error("Invalid truck: {0}")]
    InvalidTruck(String),

    /// A configuration value is out of range.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// The truck catalog could not be fetched.
    #[error("Truck catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
