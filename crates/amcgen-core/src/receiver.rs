//! Builds output receivers from CR-declared receiver specs.
//!
//! Non-credential fields are copied verbatim; every credential-bearing
//! field goes through the [`SecretResolver`], scoped to the CR's own
//! namespace. A failed credential drops only the integration config that
//! declared it, recording a [`Warning`] naming the exact field — sibling
//! configs and other receivers keep building.

use amcgen_model::{
    qualified_receiver_name, EmailConfig, EmailConfigSpec, PagerDutyConfig, PagerDutyConfigSpec,
    Receiver, ReceiverSpec, SecretKeySelector, SlackConfig, SlackConfigSpec, WebhookConfig,
    WebhookConfigSpec,
};
use tracing::warn;

use crate::error::{GeneratorError, Result};
use crate::resolver::SecretResolver;
use crate::warning::Warning;

/// Identifies the CR receiver currently being built, for diagnostics.
struct ReceiverContext<'a> {
    namespace: &'a str,
    cr_name: &'a str,
    receiver: &'a str,
}

impl ReceiverContext<'_> {
    fn secret_warning(&self, field: &str, reason: String) -> Warning {
        warn!(
            namespace = self.namespace,
            cr = self.cr_name,
            receiver = self.receiver,
            field,
            %reason,
            "dropping integration config, credential unresolved"
        );
        Warning::SecretResolution {
            namespace: self.namespace.to_string(),
            cr_name: self.cr_name.to_string(),
            receiver: self.receiver.to_string(),
            field: field.to_string(),
            reason,
        }
    }
}

/// Outcome of resolving one optional credential field.
enum CredentialOutcome {
    /// Resolved, or not declared at all.
    Value(Option<String>),
    /// Unresolvable; the integration config declaring it must be dropped.
    Dropped {
        /// CR field name of the failed reference.
        field: &'static str,
        /// The underlying lookup failure.
        reason: String,
    },
}

async fn resolve_credential(
    resolver: &SecretResolver<'_>,
    namespace: &str,
    field: &'static str,
    selector: Option<&SecretKeySelector>,
) -> Result<CredentialOutcome> {
    let Some(selector) = selector else {
        return Ok(CredentialOutcome::Value(None));
    };
    match resolver.resolve(namespace, selector).await {
        Ok(value) => Ok(CredentialOutcome::Value(Some(value))),
        Err(err) if err.is_fatal() => Err(GeneratorError::Cancelled),
        Err(err) => Ok(CredentialOutcome::Dropped {
            field,
            reason: err.to_string(),
        }),
    }
}

/// Builds one output receiver from its CR spec.
///
/// The output name is the qualified `{namespace}-{crName}-{declared}`
/// form. Credential failures are recorded into `warnings`; only
/// cancellation is returned as an error.
///
/// # Errors
///
/// Returns [`GeneratorError::Cancelled`] if the cycle's cancellation token
/// fires during a lookup.
pub async fn build_receiver(
    resolver: &SecretResolver<'_>,
    namespace: &str,
    cr_name: &str,
    spec: &ReceiverSpec,
    warnings: &mut Vec<Warning>,
) -> Result<Receiver> {
    let ctx = ReceiverContext {
        namespace,
        cr_name,
        receiver: &spec.name,
    };

    let mut receiver = Receiver::new(qualified_receiver_name(namespace, cr_name, &spec.name));

    for pd in &spec.pagerduty_configs {
        if let Some(config) = build_pagerduty(resolver, &ctx, pd, warnings).await? {
            receiver.pagerduty_configs.push(config);
        }
    }
    for slack in &spec.slack_configs {
        if let Some(config) = build_slack(resolver, &ctx, slack, warnings).await? {
            receiver.slack_configs.push(config);
        }
    }
    for webhook in &spec.webhook_configs {
        if let Some(config) = build_webhook(resolver, &ctx, webhook, warnings).await? {
            receiver.webhook_configs.push(config);
        }
    }
    for email in &spec.email_configs {
        if let Some(config) = build_email(resolver, &ctx, email, warnings).await? {
            receiver.email_configs.push(config);
        }
    }

    Ok(receiver)
}

async fn build_pagerduty(
    resolver: &SecretResolver<'_>,
    ctx: &ReceiverContext<'_>,
    spec: &PagerDutyConfigSpec,
    warnings: &mut Vec<Warning>,
) -> Result<Option<PagerDutyConfig>> {
    let routing_key =
        match resolve_credential(resolver, ctx.namespace, "routingKey", spec.routing_key.as_ref())
            .await?
        {
            CredentialOutcome::Value(value) => value,
            CredentialOutcome::Dropped { field, reason } => {
                warnings.push(ctx.secret_warning(field, reason));
                return Ok(None);
            }
        };
    let service_key =
        match resolve_credential(resolver, ctx.namespace, "serviceKey", spec.service_key.as_ref())
            .await?
        {
            CredentialOutcome::Value(value) => value,
            CredentialOutcome::Dropped { field, reason } => {
                warnings.push(ctx.secret_warning(field, reason));
                return Ok(None);
            }
        };

    Ok(Some(PagerDutyConfig {
        send_resolved: false,
        routing_key,
        service_key,
        url: spec.url.clone(),
        client: spec.client.clone(),
        client_url: spec.client_url.clone(),
        description: spec.description.clone(),
        severity: spec.severity.clone(),
    }))
}

async fn build_slack(
    resolver: &SecretResolver<'_>,
    ctx: &ReceiverContext<'_>,
    spec: &SlackConfigSpec,
    warnings: &mut Vec<Warning>,
) -> Result<Option<SlackConfig>> {
    let api_url =
        match resolve_credential(resolver, ctx.namespace, "apiURL", spec.api_url.as_ref()).await? {
            CredentialOutcome::Value(value) => value,
            CredentialOutcome::Dropped { field, reason } => {
                warnings.push(ctx.secret_warning(field, reason));
                return Ok(None);
            }
        };

    Ok(Some(SlackConfig {
        send_resolved: false,
        api_url,
        channel: spec.channel.clone(),
        username: spec.username.clone(),
        title: spec.title.clone(),
        text: spec.text.clone(),
    }))
}

async fn build_webhook(
    resolver: &SecretResolver<'_>,
    ctx: &ReceiverContext<'_>,
    spec: &WebhookConfigSpec,
    warnings: &mut Vec<Warning>,
) -> Result<Option<WebhookConfig>> {
    let url = match resolve_credential(
        resolver,
        ctx.namespace,
        "urlSecret",
        spec.url_secret.as_ref(),
    )
    .await?
    {
        // A secret-held URL takes precedence over the plain field.
        CredentialOutcome::Value(Some(value)) => Some(value),
        CredentialOutcome::Value(None) => spec.url.clone(),
        CredentialOutcome::Dropped { field, reason } => {
            warnings.push(ctx.secret_warning(field, reason));
            return Ok(None);
        }
    };

    Ok(Some(WebhookConfig {
        send_resolved: false,
        url,
        max_alerts: spec.max_alerts,
    }))
}

async fn build_email(
    resolver: &SecretResolver<'_>,
    ctx: &ReceiverContext<'_>,
    spec: &EmailConfigSpec,
    warnings: &mut Vec<Warning>,
) -> Result<Option<EmailConfig>> {
    let auth_password = match resolve_credential(
        resolver,
        ctx.namespace,
        "authPassword",
        spec.auth_password.as_ref(),
    )
    .await?
    {
        CredentialOutcome::Value(value) => value,
        CredentialOutcome::Dropped { field, reason } => {
            warnings.push(ctx.secret_warning(field, reason));
            return Ok(None);
        }
    };

    Ok(Some(EmailConfig {
        send_resolved: false,
        to: spec.to.clone(),
        from: spec.from.clone(),
        smarthost: spec.smarthost.clone(),
        auth_username: spec.auth_username.clone(),
        auth_password,
        require_tls: spec.require_tls,
    }))
}

#[cfg(test)]
mod tests {
    use amcgen_secrets::MemorySecretStore;
    use tokio_util::sync::CancellationToken;

    use super::*;

    fn resolver(store: &MemorySecretStore) -> SecretResolver<'_> {
        SecretResolver::new(store, CancellationToken::new())
    }

    #[tokio::test]
    async fn builds_qualified_empty_receiver() {
        let store = MemorySecretStore::new();
        let mut warnings = Vec::new();
        let spec = ReceiverSpec {
            name: "test".to_string(),
            ..ReceiverSpec::default()
        };

        let receiver = build_receiver(&resolver(&store), "mynamespace", "myamc", &spec, &mut warnings)
            .await
            .expect("builds");

        assert_eq!(receiver.name, "mynamespace-myamc-test");
        assert!(receiver.is_empty());
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn pagerduty_routing_key_resolved_from_own_namespace() {
        let store = MemorySecretStore::new();
        store.insert("mynamespace", "am-pd-test-receiver", "routingKey", b"1234abc");
        let mut warnings = Vec::new();
        let spec = ReceiverSpec {
            name: "test".to_string(),
            pagerduty_configs: vec![PagerDutyConfigSpec {
                routing_key: Some(SecretKeySelector::new("am-pd-test-receiver", "routingKey")),
                ..PagerDutyConfigSpec::default()
            }],
            ..ReceiverSpec::default()
        };

        let receiver = build_receiver(&resolver(&store), "mynamespace", "myamc", &spec, &mut warnings)
            .await
            .expect("builds");

        assert_eq!(receiver.pagerduty_configs.len(), 1);
        let pd = &receiver.pagerduty_configs[0];
        assert_eq!(pd.routing_key.as_deref(), Some("1234abc"));
        assert!(!pd.send_resolved);
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn unresolved_credential_drops_only_that_config() {
        let store = MemorySecretStore::new();
        store.insert("mynamespace", "good", "key", b"https://hooks.example.com");
        let mut warnings = Vec::new();
        let spec = ReceiverSpec {
            name: "test".to_string(),
            pagerduty_configs: vec![PagerDutyConfigSpec {
                routing_key: Some(SecretKeySelector::new("missing", "routingKey")),
                ..PagerDutyConfigSpec::default()
            }],
            slack_configs: vec![SlackConfigSpec {
                api_url: Some(SecretKeySelector::new("good", "key")),
                ..SlackConfigSpec::default()
            }],
            ..ReceiverSpec::default()
        };

        let receiver = build_receiver(&resolver(&store), "mynamespace", "myamc", &spec, &mut warnings)
            .await
            .expect("builds");

        // The pagerduty config is gone, the slack sibling survives.
        assert!(receiver.pagerduty_configs.is_empty());
        assert_eq!(receiver.slack_configs.len(), 1);
        assert_eq!(
            receiver.slack_configs[0].api_url.as_deref(),
            Some("https://hooks.example.com")
        );

        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            Warning::SecretResolution { field, .. } if field == "routingKey"
        ));
    }

    #[tokio::test]
    async fn webhook_secret_url_takes_precedence() {
        let store = MemorySecretStore::new();
        store.insert("ns", "hook", "url", b"https://secret.example.com");
        let mut warnings = Vec::new();
        let spec = ReceiverSpec {
            name: "wh".to_string(),
            webhook_configs: vec![WebhookConfigSpec {
                url: Some("https://plain.example.com".to_string()),
                url_secret: Some(SecretKeySelector::new("hook", "url")),
                max_alerts: 3,
            }],
            ..ReceiverSpec::default()
        };

        let receiver = build_receiver(&resolver(&store), "ns", "cr", &spec, &mut warnings)
            .await
            .expect("builds");

        let webhook = &receiver.webhook_configs[0];
        assert_eq!(webhook.url.as_deref(), Some("https://secret.example.com"));
        assert_eq!(webhook.max_alerts, 3);
    }

    #[tokio::test]
    async fn cancellation_is_fatal_not_a_warning() {
        let store = MemorySecretStore::new();
        store.insert("ns", "secret", "key", b"v");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let resolver = SecretResolver::new(&store, cancel);
        let mut warnings = Vec::new();
        let spec = ReceiverSpec {
            name: "test".to_string(),
            email_configs: vec![EmailConfigSpec {
                auth_password: Some(SecretKeySelector::new("secret", "key")),
                ..EmailConfigSpec::default()
            }],
            ..ReceiverSpec::default()
        };

        let result = build_receiver(&resolver, "ns", "cr", &spec, &mut warnings).await;

        assert!(matches!(result, Err(GeneratorError::Cancelled)));
        assert!(warnings.is_empty());
    }
}
