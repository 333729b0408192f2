//! Error types for secret lookups.

use thiserror::Error;

/// Errors that can occur when reading from the secret store.
#[derive(Debug, Clone, Error)]
pub enum SecretError {
    /// The secret object or the requested key within it does not exist.
    ///
    /// A secret that exists but lacks the requested key reports this same
    /// variant; callers treat both identically.
    #[error("secret not found: {namespace}/{name} key {key}")]
    NotFound {
        /// Namespace the lookup was scoped to.
        namespace: String,
        /// Name of the secret object.
        name: String,
        /// Key within the secret object.
        key: String,
    },

    /// The caller is not allowed to read the secret.
    #[error("access denied: {reason}")]
    AccessDenied {
        /// The reason access was denied.
        reason: String,
    },
}

/// Result type alias for secret operations.
pub type Result<T> = std::result::Result<T, SecretError>;
