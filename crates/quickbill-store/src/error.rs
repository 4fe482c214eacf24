//! # Store Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError / CoreError (quickbill-core)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← adds configuration failures                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (demo binary, embedding application)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use quickbill_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the inventory, ledger, service and configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Business rule failure from quickbill-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values are inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure (JSON snapshot export).
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates a `ProductNotFound` error.
    pub fn product_not_found(id: impl Into<String>) -> Self {
        StoreError::Core(CoreError::ProductNotFound(id.into()))
    }

    /// True if the error is a rejected input rather than an environment
    /// failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            StoreError::Core(
                CoreError::Validation(_)
                    | CoreError::EmptyCart
                    | CoreError::InsufficientStock { .. }
                    | CoreError::InsufficientTender { .. }
            )
        )
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}
