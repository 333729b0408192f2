//! Non-fatal diagnostics aggregated across a generation cycle.

use thiserror::Error;

/// A per-CR or per-credential failure that degraded, but did not abort,
/// a generation cycle.
///
/// Warnings are values, not control flow: the generator accumulates them
/// next to its best-effort output so the caller decides whether partial
/// success is acceptable to publish.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// A credential reference could not be resolved; the single affected
    /// integration config was dropped.
    #[error("{namespace}/{cr_name}: receiver {receiver}: field {field}: {reason}")]
    SecretResolution {
        /// Namespace owning the CR.
        namespace: String,
        /// Object name of the CR.
        cr_name: String,
        /// Declared receiver name.
        receiver: String,
        /// The CR field whose reference failed.
        field: String,
        /// The underlying lookup failure.
        reason: String,
    },

    /// A CR's entire contribution was dropped.
    #[error("{namespace}/{cr_name}: contribution dropped: {reason}")]
    ContributionDropped {
        /// Namespace owning the CR.
        namespace: String,
        /// Object name of the CR.
        cr_name: String,
        /// Why the contribution was dropped.
        reason: String,
    },

    /// A whole namespace was skipped before any of its CRs were read.
    #[error("namespace {namespace} skipped: {reason}")]
    NamespaceSkipped {
        /// The namespace that was skipped.
        namespace: String,
        /// Why it was skipped.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_display_names_failed_field() {
        let warning = Warning::SecretResolution {
            namespace: "mynamespace".to_string(),
            cr_name: "myamc".to_string(),
            receiver: "test".to_string(),
            field: "routingKey".to_string(),
            reason: "secret not found: mynamespace/am-pd-test-receiver key routingKey".to_string(),
        };
        let text = warning.to_string();
        assert!(text.contains("mynamespace/myamc"));
        assert!(text.contains("routingKey"));
    }

    #[test]
    fn warning_display_contribution_dropped() {
        let warning = Warning::ContributionDropped {
            namespace: "mynamespace".to_string(),
            cr_name: "myamc".to_string(),
            reason: "route references undeclared receiver: test".to_string(),
        };
        assert_eq!(
            warning.to_string(),
            "mynamespace/myamc: contribution dropped: route references undeclared receiver: test"
        );
    }
}
