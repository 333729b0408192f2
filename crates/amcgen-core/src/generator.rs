//! Orchestrates a generation cycle.
//!
//! One cycle is a single synchronous pass: namespaces in lexicographic
//! order, CRs within a namespace by object name, every fragment merged
//! against an untouched base. Nothing reaches the serializer until the
//! whole merge loop completes, so a cancelled or failed cycle never emits
//! partial output.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use amcgen_model::{
    qualified_receiver_name, validate_namespace_name, AlertmanagerConfig, AlertmanagerConfigCr,
    Receiver, Route,
};
use amcgen_secrets::SecretSource;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{GeneratorError, Result};
use crate::receiver::build_receiver;
use crate::resolver::SecretResolver;
use crate::route::merge_route;
use crate::serialize::{dangling_receivers, serialize};
use crate::warning::Warning;

/// The outcome of a successful (possibly degraded) generation cycle.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The rendered configuration document.
    pub yaml: String,
    /// Non-fatal diagnostics accumulated during the cycle. The caller
    /// decides whether partial success is acceptable to publish.
    pub warnings: Vec<Warning>,
}

/// Generates composite configuration documents.
///
/// Holds no cross-cycle state beyond the secret store handle; independent
/// cycles may run concurrently on the same generator.
pub struct ConfigGenerator {
    source: Arc<dyn SecretSource>,
}

impl ConfigGenerator {
    /// Creates a generator reading credentials from the given store.
    #[must_use]
    pub fn new(source: Arc<dyn SecretSource>) -> Self {
        Self { source }
    }

    /// Runs one generation cycle.
    ///
    /// The base configuration is copied, never mutated. CR fragments are
    /// processed deterministically; each contributes qualified receivers
    /// and, if it declares a route, one namespace-pinned subtree attached
    /// under the base root — ahead of the base's own children, which would
    /// otherwise shadow it under first-match evaluation.
    ///
    /// # Errors
    ///
    /// Fails only structurally: invalid base, serialization failure, or
    /// cancellation. Per-CR and per-credential problems are returned as
    /// warnings inside [`Generated`].
    pub async fn generate(
        &self,
        cancel: CancellationToken,
        base: &AlertmanagerConfig,
        crs: &BTreeMap<String, Vec<AlertmanagerConfigCr>>,
    ) -> Result<Generated> {
        if base.route.is_none() {
            return Err(GeneratorError::InvalidBase {
                reason: "missing root route".to_string(),
            });
        }
        let dangling = dangling_receivers(base);
        if !dangling.is_empty() {
            return Err(GeneratorError::InvalidBase {
                reason: format!("routes reference undeclared receivers: {}", dangling.join(", ")),
            });
        }

        let resolver = SecretResolver::new(self.source.as_ref(), cancel.clone());
        let mut warnings = Vec::new();
        let mut new_receivers = Vec::new();
        let mut cr_routes = Vec::new();

        for (namespace, cr_list) in crs {
            if cancel.is_cancelled() {
                return Err(GeneratorError::Cancelled);
            }

            if let Err(err) = validate_namespace_name(namespace) {
                warn!(namespace, %err, "skipping namespace");
                warnings.push(Warning::NamespaceSkipped {
                    namespace: namespace.clone(),
                    reason: err.to_string(),
                });
                continue;
            }

            let mut ordered: Vec<&AlertmanagerConfigCr> = cr_list.iter().collect();
            ordered.sort_by(|a, b| a.name.cmp(&b.name));

            for cr in ordered {
                self.merge_cr(
                    &resolver,
                    namespace,
                    cr,
                    &mut warnings,
                    &mut new_receivers,
                    &mut cr_routes,
                )
                .await?;
            }
        }

        if cancel.is_cancelled() {
            return Err(GeneratorError::Cancelled);
        }

        let mut composite = base.clone();
        composite.receivers.extend(new_receivers);
        if let Some(root) = composite.route.as_mut() {
            let base_children = std::mem::take(&mut root.routes);
            root.routes = cr_routes;
            root.routes.extend(base_children);
        }

        let yaml = serialize(&composite)?;
        Ok(Generated { yaml, warnings })
    }

    /// Merges one CR's contribution, or drops it wholesale.
    async fn merge_cr(
        &self,
        resolver: &SecretResolver<'_>,
        namespace: &str,
        cr: &AlertmanagerConfigCr,
        warnings: &mut Vec<Warning>,
        out_receivers: &mut Vec<Receiver>,
        out_routes: &mut Vec<Route>,
    ) -> Result<()> {
        let dropped = |reason: String| {
            warn!(namespace, cr = cr.name, %reason, "dropping CR contribution");
            Warning::ContributionDropped {
                namespace: namespace.to_string(),
                cr_name: cr.name.clone(),
                reason,
            }
        };

        if cr.namespace != namespace {
            warnings.push(dropped(format!(
                "object namespace {} does not match its map key",
                cr.namespace
            )));
            return Ok(());
        }

        // Collect the full declared-name map first; the route merge needs
        // it complete.
        let mut name_map = HashMap::new();
        for spec in &cr.spec.receivers {
            if spec.name.is_empty() {
                warnings.push(dropped("receiver with empty name".to_string()));
                return Ok(());
            }
            let qualified = qualified_receiver_name(namespace, &cr.name, &spec.name);
            if name_map.insert(spec.name.clone(), qualified).is_some() {
                warnings.push(dropped(format!("duplicate receiver name: {}", spec.name)));
                return Ok(());
            }
        }

        let mut cr_warnings = Vec::new();
        let mut receivers = Vec::new();
        for spec in &cr.spec.receivers {
            let receiver =
                build_receiver(resolver, namespace, &cr.name, spec, &mut cr_warnings).await?;
            receivers.push(receiver);
        }

        let route = match &cr.spec.route {
            Some(spec) => match merge_route(namespace, spec, &name_map) {
                Ok(route) => Some(route),
                Err(err) => {
                    // Credential diagnostics stay useful even though the
                    // contribution is gone.
                    warnings.append(&mut cr_warnings);
                    warnings.push(dropped(err.to_string()));
                    return Ok(());
                }
            },
            None => None,
        };

        debug!(
            namespace,
            cr = cr.name,
            receivers = receivers.len(),
            has_route = route.is_some(),
            "merged CR fragment"
        );

        warnings.append(&mut cr_warnings);
        out_receivers.append(&mut receivers);
        if let Some(route) = route {
            out_routes.push(route);
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConfigGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigGenerator").finish_non_exhaustive()
    }
}
