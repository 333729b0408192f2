//! Receiver naming and namespace-name validation.

use crate::error::{ModelError, Result};

/// Minimum length for namespace names.
pub const MIN_NAMESPACE_NAME_LENGTH: usize = 1;

/// Maximum length for namespace names.
pub const MAX_NAMESPACE_NAME_LENGTH: usize = 63;

/// Derives the globally unique output name for a CR-declared receiver.
///
/// The name is a pure function of (namespace, CR object name, declared
/// name), so uniqueness across namespaces needs no registry or collision
/// check: two fragments can only collide by being the same fragment.
#[must_use]
pub fn qualified_receiver_name(namespace: &str, cr_name: &str, declared: &str) -> String {
    format!("{namespace}-{cr_name}-{declared}")
}

/// Validate a namespace name.
///
/// Namespace names must:
/// - Be 1-63 characters long
/// - Start with a lowercase letter
/// - Contain only lowercase letters, numbers, and hyphens
/// - Not end with a hyphen
///
/// # Errors
///
/// Returns an error if the name is invalid.
pub fn validate_namespace_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ModelError::InvalidNamespaceName {
            reason: "name cannot be empty".to_string(),
        });
    }

    if name.len() > MAX_NAMESPACE_NAME_LENGTH {
        return Err(ModelError::InvalidNamespaceName {
            reason: format!("name too long: {} > {}", name.len(), MAX_NAMESPACE_NAME_LENGTH),
        });
    }

    let mut chars = name.chars();
    let first = chars.next().unwrap_or('-');
    if !first.is_ascii_lowercase() {
        return Err(ModelError::InvalidNamespaceName {
            reason: "name must start with a lowercase letter".to_string(),
        });
    }

    if name.ends_with('-') {
        return Err(ModelError::InvalidNamespaceName {
            reason: "name cannot end with a hyphen".to_string(),
        });
    }

    for c in chars {
        if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
            return Err(ModelError::InvalidNamespaceName {
                reason: format!("invalid character: {c}"),
            });
        }
    }

    Ok(())
}
