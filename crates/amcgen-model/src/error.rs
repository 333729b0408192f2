//! Error types for the amcgen-model crate.

use thiserror::Error;

/// Errors that can occur while validating model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Namespace name does not satisfy the cluster naming rules.
    #[error("invalid namespace name: {reason}")]
    InvalidNamespaceName {
        /// The reason the name is invalid.
        reason: String,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
