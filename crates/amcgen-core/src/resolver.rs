//! Credential resolution against the cluster secret store.

use amcgen_model::SecretKeySelector;
use amcgen_secrets::{SecretError, SecretSource};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a single credential lookup failed.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The store reported the secret missing or the read forbidden.
    #[error(transparent)]
    Secret(#[from] SecretError),

    /// The stored value is not valid UTF-8 and cannot appear in the
    /// configuration document.
    #[error("secret value is not valid UTF-8")]
    InvalidUtf8,

    /// The generation cycle was cancelled.
    #[error("generation cycle cancelled")]
    Cancelled,
}

impl ResolveError {
    /// Returns true if the failure aborts the whole cycle rather than
    /// dropping one integration config.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Resolves secret key selectors for one generation cycle.
///
/// Performs exactly one lookup per call and never retries; whoever drives
/// the cycle owns the retry policy. Lookups are always scoped to the
/// namespace the caller passes — the namespace of the CR being processed,
/// never one named by the fragment itself.
#[derive(Debug)]
pub struct SecretResolver<'a> {
    source: &'a dyn SecretSource,
    cancel: CancellationToken,
}

impl<'a> SecretResolver<'a> {
    /// Creates a resolver over the given store, observing the given
    /// cancellation token.
    #[must_use]
    pub fn new(source: &'a dyn SecretSource, cancel: CancellationToken) -> Self {
        Self { source, cancel }
    }

    /// Resolves one selector to its literal value.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Cancelled`] when the cycle's token has been
    /// cancelled, otherwise the store's own failure.
    pub async fn resolve(
        &self,
        namespace: &str,
        selector: &SecretKeySelector,
    ) -> Result<String, ResolveError> {
        if self.cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let bytes = self
            .source
            .get(namespace, &selector.name, &selector.key)
            .await?;
        String::from_utf8(bytes).map_err(|_| ResolveError::InvalidUtf8)
    }
}
