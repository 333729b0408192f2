//! Output document types for the Alertmanager configuration.
//!
//! These structs mirror the wire format Alertmanager's own configuration
//! loader parses. Field declaration order matches the conventional field
//! order of that format, optional fields are omitted when absent, and the
//! template list is always emitted so that downstream parsers never have to
//! distinguish a missing list from an empty one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A node in the alert routing decision tree.
///
/// A route matches alerts by label and selects a receiver by name. Every
/// receiver referenced by a route must exist in the receiver list of the
/// same [`AlertmanagerConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Name of the receiver this route delivers to.
    pub receiver: String,
    /// Exact-value label matchers. All must match for the route to apply.
    #[serde(
        rename = "match",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub match_labels: BTreeMap<String, String>,
    /// Regex label matchers.
    #[serde(
        rename = "match_re",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub match_re: BTreeMap<String, String>,
    /// If true, evaluation continues past this node after a match instead
    /// of stopping at the first matching route.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub r#continue: bool,
    /// Child routes, evaluated in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

impl Route {
    /// Creates a route delivering to the given receiver, with no matchers
    /// and no children.
    #[must_use]
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            ..Self::default()
        }
    }

    /// Iterates over every receiver name referenced by this route or any
    /// of its descendants.
    pub fn referenced_receivers(&self) -> Vec<&str> {
        let mut names = vec![self.receiver.as_str()];
        for child in &self.routes {
            names.extend(child.referenced_receivers());
        }
        names
    }
}

/// A named bundle of notification integration configurations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    /// Name of the receiver, unique within the document.
    pub name: String,
    /// PagerDuty integrations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pagerduty_configs: Vec<PagerDutyConfig>,
    /// Slack integrations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slack_configs: Vec<SlackConfig>,
    /// Webhook integrations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_configs: Vec<WebhookConfig>,
    /// Email integrations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_configs: Vec<EmailConfig>,
}

impl Receiver {
    /// Creates an empty receiver with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns true if the receiver carries no integration configs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pagerduty_configs.is_empty()
            && self.slack_configs.is_empty()
            && self.webhook_configs.is_empty()
            && self.email_configs.is_empty()
    }
}

/// A PagerDuty integration with resolved credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerDutyConfig {
    /// Whether to notify about resolved alerts.
    #[serde(default)]
    pub send_resolved: bool,
    /// Events API v2 routing key (resolved literal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_key: Option<String>,
    /// Events API v1 service key (resolved literal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_key: Option<String>,
    /// PagerDuty API endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Client identifier reported to PagerDuty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Backlink for the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_url: Option<String>,
    /// Incident description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Incident severity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// A Slack integration with resolved credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Whether to notify about resolved alerts.
    #[serde(default)]
    pub send_resolved: bool,
    /// Incoming webhook URL (resolved literal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
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

/// A generic webhook integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Whether to notify about resolved alerts.
    #[serde(default)]
    pub send_resolved: bool,
    /// Endpoint to POST notifications to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Maximum number of alerts per notification (0 means all).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub max_alerts: u32,
}

/// An email integration with resolved credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Whether to notify about resolved alerts.
    #[serde(default)]
    pub send_resolved: bool,
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
    /// SMTP authentication password (resolved literal).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_password: Option<String>,
    /// Whether to require a TLS session with the relay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_tls: Option<bool>,
}

/// An inhibition rule, passed through from the base configuration.
///
/// CR fragments cannot contribute inhibit rules; a namespace-scoped rule
/// could suppress another namespace's notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InhibitRule {
    /// Matchers the inhibited (target) alerts must satisfy.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub target_match: BTreeMap<String, String>,
    /// Matchers the inhibiting (source) alerts must satisfy.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub source_match: BTreeMap<String, String>,
    /// Labels that must be equal between source and target.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equal: Vec<String>,
}

/// The composite configuration document handed to the serializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertmanagerConfig {
    /// The root of the routing tree. Exactly one root exists in any
    /// document the generator emits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    /// Inhibition rules from the base configuration.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inhibit_rules: Vec<InhibitRule>,
    /// All receivers: base receivers first, then CR-derived receivers in
    /// processing order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub receivers: Vec<Receiver>,
    /// Template file references. Always serialized, even when empty: some
    /// parser versions treat an absent list differently from an empty one.
    #[serde(default)]
    pub templates: Vec<String>,
}

impl AlertmanagerConfig {
    /// Returns the names of all declared receivers, in order.
    pub fn receiver_names(&self) -> Vec<&str> {
        self.receivers.iter().map(|r| r.name.as_str()).collect()
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}
