//! Data model for the Amcgen configuration generator.
//!
//! `amcgen-model` provides the two type families the generator moves between:
//!
//! - **Output types** ([`config`]): the Alertmanager configuration document
//!   itself — routes, receivers, integration configs — with serde attributes
//!   matching the wire format Alertmanager's own loader parses.
//! - **Input types** ([`cr`]): the per-namespace configuration fragments
//!   declared as custom resources, including secret key selectors for
//!   credential-bearing fields.
//!
//! The [`name`] module holds the pure naming scheme that keeps receivers
//! from different namespaces from ever colliding.
//!
//! # Example
//!
//! ```rust
//! use amcgen_model::{AlertmanagerConfig, Receiver, Route};
//!
//! let base = AlertmanagerConfig {
//!     route: Some(Route {
//!         receiver: "null".to_string(),
//!         ..Route::default()
//!     }),
//!     receivers: vec![Receiver {
//!         name: "null".to_string(),
//!         ..Receiver::default()
//!     }],
//!     ..AlertmanagerConfig::default()
//! };
//! assert_eq!(base.receivers.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod cr;
pub mod error;
pub mod name;

// Re-export main types at crate root
pub use config::{
    AlertmanagerConfig, EmailConfig, InhibitRule, PagerDutyConfig, Receiver, Route, SlackConfig,
    WebhookConfig,
};
pub use cr::{
    AlertmanagerConfigCr, AlertmanagerConfigSpec, EmailConfigSpec, Matcher, PagerDutyConfigSpec,
    ReceiverSpec, RouteSpec, SecretKeySelector, SlackConfigSpec, WebhookConfigSpec,
};
pub use error::{ModelError, Result};
pub use name::{qualified_receiver_name, validate_namespace_name};
