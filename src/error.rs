// src/error.rs

use thiserror::Error;

/// Result type alias for inventory operations.
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Every way a simulation or search can refuse to run.
///
/// A search that exhausts its range is *not* an error; see
/// [`SearchOutcome::NotFound`](crate::strategy::traits::SearchOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// A distribution table is malformed (its cumulative probabilities
    /// never reach 1.0, or are not strictly increasing).
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A policy or search parameter is out of its valid domain.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl InventoryError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
