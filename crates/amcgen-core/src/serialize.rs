//! Rendering and re-parsing of the composite document.
//!
//! The byte output must be accepted by the downstream alerting engine's
//! own parser, so [`parse`] doubles as the correctness oracle: it reads
//! the document back through the same wire types and performs the
//! referential check the engine's loader performs — every route-referenced
//! receiver must be declared.

use amcgen_model::AlertmanagerConfig;

use crate::error::{GeneratorError, Result};

/// Renders the composite document into the engine's wire format.
///
/// Field presence and ordering follow the conventions encoded in the
/// model types: optional fields are omitted, the template list is always
/// present, ambiguous scalars (a receiver literally named `null`) are
/// quoted by the emitter.
///
/// # Errors
///
/// Returns [`GeneratorError::Serialize`] if the document cannot be
/// rendered.
pub fn serialize(config: &AlertmanagerConfig) -> Result<String> {
    Ok(serde_yaml::to_string(config)?)
}

/// Parses a rendered document and verifies its referential integrity.
///
/// # Errors
///
/// Returns [`GeneratorError::Parse`] if the input is not valid YAML for
/// the wire types, or if any route references an undeclared receiver.
pub fn parse(input: &str) -> Result<AlertmanagerConfig> {
    let config: AlertmanagerConfig =
        serde_yaml::from_str(input).map_err(|err| GeneratorError::Parse {
            reason: err.to_string(),
        })?;

    let dangling = dangling_receivers(&config);
    if !dangling.is_empty() {
        return Err(GeneratorError::Parse {
            reason: format!("undefined receivers referenced by routes: {}", dangling.join(", ")),
        });
    }

    Ok(config)
}

/// Returns the receiver names referenced by routes but never declared.
#[must_use]
pub fn dangling_receivers(config: &AlertmanagerConfig) -> Vec<String> {
    let declared: Vec<&str> = config.receiver_names();
    let Some(root) = &config.route else {
        return Vec::new();
    };

    let mut dangling = Vec::new();
    for name in root.referenced_receivers() {
        if !declared.contains(&name) && !dangling.iter().any(|d| d == name) {
            dangling.push(name.to_string());
        }
    }
    dangling
}
