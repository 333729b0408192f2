//! Error types for the amcgen-core crate.
//!
//! Only structural failures surface here: a broken base configuration, a
//! document that cannot be rendered or re-parsed, or a cancelled cycle.
//! Everything local to one CR or one credential is a
//! [`crate::Warning`], aggregated alongside the output instead of aborting
//! the cycle.

use thiserror::Error;

/// Fatal errors that abort a whole generation cycle.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The base configuration violates its own contract.
    #[error("invalid base configuration: {reason}")]
    InvalidBase {
        /// The reason the base is invalid.
        reason: String,
    },

    /// The composite document could not be rendered.
    #[error("serialization failed: {reason}")]
    Serialize {
        /// The reason serialization failed.
        reason: String,
    },

    /// A document failed the round-trip parse or its referential check.
    #[error("parse failed: {reason}")]
    Parse {
        /// The reason parsing failed.
        reason: String,
    },

    /// The generation cycle was cancelled mid-flight. No partial output
    /// is produced.
    #[error("generation cycle cancelled")]
    Cancelled,
}

impl From<serde_yaml::Error> for GeneratorError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialize {
            reason: err.to_string(),
        }
    }
}

/// A route node referencing a receiver its own CR never declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("route references undeclared receiver: {receiver}")]
pub struct UnknownReceiver {
    /// The dangling declared receiver name.
    pub receiver: String,
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;
