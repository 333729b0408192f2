//! Input types for per-namespace configuration fragments.
//!
//! These mirror the custom-resource shape namespace operators declare:
//! camelCase field names, secret key selectors in place of credential
//! literals, and matcher lists instead of label maps. The generator turns
//! them into the output types in [`crate::config`].

use serde::{Deserialize, Serialize};

/// One namespace's declared configuration fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertmanagerConfigCr {
    /// Object name of the CR.
    pub name: String,
    /// Namespace owning the CR. Secret references resolve here and the
    /// merged route subtree is pinned here, regardless of anything the
    /// spec itself declares.
    pub namespace: String,
    /// The declared fragment.
    #[serde(default)]
    pub spec: AlertmanagerConfigSpec,
}

/// The declared fragment: an optional route tree plus receiver specs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertmanagerConfigSpec {
    /// Root of the declared route tree. A CR without a route contributes
    /// receivers only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteSpec>,
    /// Declared receivers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<ReceiverSpec>,
}

/// A declared route node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSpec {
    /// Declared receiver name. Must match a receiver declared in the same
    /// CR; the generator rewrites it to the qualified name.
    pub receiver: String,
    /// Label matchers, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matchers: Vec<Matcher>,
    /// Declared continue flag. Preserved on child nodes; forced to true on
    /// the root node at the point of attachment.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub r#continue: bool,
    /// Child route nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteSpec>,
}

/// A single label matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matcher {
    /// Label name.
    pub name: String,
    /// Value to match.
    #[serde(default)]
    pub value: String,
    /// Whether the value is a regular expression.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub regex: bool,
}

impl Matcher {
    /// Creates an exact-value matcher.
    #[must_use]
    pub fn equal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            regex: false,
        }
    }
}

/// Reference to one field of a secret object in the CR's own namespace.
///
/// There is deliberately no namespace field: a fragment can only reference
/// secrets co-located with it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretKeySelector {
    /// Name of the secret object.
    pub name: String,
    /// Key within the secret object.
    pub key: String,
}

impl SecretKeySelector {
    /// Creates a selector for the given secret object and key.
    #[must_use]
    pub fn new(name: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
        }
    }
}

/// A declared receiver: a name plus typed integration specs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiverSpec {
    /// Declared name, unique within the CR.
    pub name: String,
    /// PagerDuty integration specs.
    #[serde(
        rename = "pagerDutyConfigs",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pagerduty_configs: Vec<PagerDutyConfigSpec>,
    /// Slack integration specs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slack_configs: Vec<SlackConfigSpec>,
    /// Webhook integration specs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_configs: Vec<WebhookConfigSpec>,
    /// Email integration specs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_configs: Vec<EmailConfigSpec>,
}

/// Declared PagerDuty integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagerDutyConfigSpec {
    /// Selector for the Events API v2 routing key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<SecretKeySelector>,
    /// Selector for the Events API v1 service key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<SecretKeySelector>,
    /// PagerDuty API endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Client identifier reported to PagerDuty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Backlink for the client.
    #[serde(rename = "clientURL", default, skip_serializing_if = "Option::is_none")]
    pub client_url: Option<String>,
    /// Incident description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Incident severity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Declared Slack integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlackConfigSpec {
    /// Selector for the incoming webhook URL.
    #[serde(rename = "apiURL", default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<SecretKeySelector>,
    /// Channel or user to post to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Bot username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Message title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Message body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Declared webhook integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookConfigSpec {
    /// Plain endpoint URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Selector for an endpoint URL stored as a secret. Takes precedence
    /// over `url` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_secret: Option<SecretKeySelector>,
    /// Maximum number of alerts per notification (0 means all).
    #[serde(default)]
    pub max_alerts: u32,
}

/// Declared email integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailConfigSpec {
    /// Destination address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Sender address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// SMTP relay host and port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smarthost: Option<String>,
    /// SMTP authentication username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_username: Option<String>,
    /// Selector for the SMTP authentication password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<SecretKeySelector>,
    /// Whether to require a TLS session with the relay.
    #[serde(rename = "requireTLS", default, skip_serializing_if = "Option::is_none")]
    pub require_tls: Option<bool>,
}
