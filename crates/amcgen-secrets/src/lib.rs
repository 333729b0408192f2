//! # Amcgen Secrets
//!
//! The cluster secret store surface consumed by the configuration
//! generator:
//!
//! - **Namespace scoped**: every lookup names the namespace it reads from;
//!   there is no cross-namespace access path
//! - **Read only**: the generator dereferences credentials, it never writes
//! - **Single-key lookups**: one `(namespace, name, key)` triple per call
//!
//! ## Example
//!
//! ```rust
//! use amcgen_secrets::{MemorySecretStore, SecretSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = MemorySecretStore::new();
//! store.insert("mynamespace", "am-pd-test-receiver", "routingKey", b"1234abc");
//!
//! let value = store
//!     .get("mynamespace", "am-pd-test-receiver", "routingKey")
//!     .await
//!     .expect("secret present");
//! assert_eq!(value, b"1234abc");
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod source;

// Re-export commonly used types
pub use error::{Result, SecretError};
pub use memory::MemorySecretStore;
pub use source::SecretSource;
