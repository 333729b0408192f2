//! Merge and serialization engine for multi-tenant Alertmanager
//! configuration.
//!
//! `amcgen-core` composes a cluster operator's base configuration with
//! per-namespace CR fragments into one coherent document the alerting
//! engine accepts:
//!
//! - **Namespace isolation**: every CR subtree is pinned to its owning
//!   namespace at the single point it attaches to the shared route tree,
//!   and receivers are renamed to `{namespace}-{cr}-{name}` so tenants can
//!   never collide or escalate into the global default path
//! - **Credential resolution**: secret references resolve against the CR's
//!   own namespace at construction time, never at serialization time
//! - **Partial-failure tolerance**: one bad credential or one malformed CR
//!   degrades the output and records a warning; it never aborts the cycle
//! - **Wire fidelity**: the rendered YAML re-parses under the engine's own
//!   grammar, which the [`serialize::parse`] oracle checks
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//!
//! use amcgen_core::ConfigGenerator;
//! use amcgen_model::{AlertmanagerConfig, Receiver, Route};
//! use amcgen_secrets::MemorySecretStore;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let base = AlertmanagerConfig {
//!     route: Some(Route::new("null")),
//!     receivers: vec![Receiver::new("null")],
//!     ..AlertmanagerConfig::default()
//! };
//!
//! let generator = ConfigGenerator::new(Arc::new(MemorySecretStore::new()));
//! let generated = generator
//!     .generate(CancellationToken::new(), &base, &BTreeMap::new())
//!     .await
//!     .expect("generation succeeds");
//! assert!(generated.yaml.contains("templates: []"));
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod generator;
pub mod receiver;
pub mod resolver;
pub mod route;
pub mod serialize;
pub mod warning;

// Re-export main types at crate root
pub use error::{GeneratorError, Result, UnknownReceiver};
pub use generator::{ConfigGenerator, Generated};
pub use receiver::build_receiver;
pub use resolver::{ResolveError, SecretResolver};
pub use route::{merge_route, NAMESPACE_LABEL};
pub use serialize::{dangling_receivers, parse, serialize};
pub use warning::Warning;
