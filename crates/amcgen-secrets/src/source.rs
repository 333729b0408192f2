//! The secret store seam.

use async_trait::async_trait;

use crate::error::Result;

/// Read access to the cluster secret store, scoped per namespace.
///
/// Implementations must be `Send + Sync` so a generator handle can be
/// shared across generation cycles. A lookup is a single synchronous read
/// from the caller's point of view; retry policy belongs to whoever drives
/// the generation cycle, never to the store itself.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Returns the value stored under `key` in the secret object `name`
    /// within `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SecretError::NotFound`] when the object or the key
    /// is absent, and [`crate::SecretError::AccessDenied`] when the read is
    /// not permitted.
    async fn get(&self, namespace: &str, name: &str, key: &str) -> Result<Vec<u8>>;
}

// The `+ '_` keeps the impl usable for borrowed trait objects, not just
// `dyn SecretSource + 'static`.
impl std::fmt::Debug for dyn SecretSource + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretSource").finish_non_exhaustive()
    }
}
