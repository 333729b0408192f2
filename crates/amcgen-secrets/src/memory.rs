//! In-memory secret store.
//!
//! Backs tests and single-node deployments. Secrets live in a plain map
//! guarded by a read-write lock; there is no encryption layer because this
//! store models the cluster API surface, not a vault.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Result, SecretError};
use crate::source::SecretSource;

/// Identifies one secret object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ObjectRef {
    namespace: String,
    name: String,
}

/// An in-memory [`SecretSource`].
///
/// Supports a deny list so tests can exercise the access-denied path
/// without a real policy engine.
#[derive(Default)]
pub struct MemorySecretStore {
    objects: RwLock<HashMap<ObjectRef, HashMap<String, Vec<u8>>>>,
    denied: RwLock<HashSet<ObjectRef>>,
}

impl MemorySecretStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one key of a secret object, creating the object if needed.
    pub fn insert(&self, namespace: &str, name: &str, key: &str, value: &[u8]) {
        let object = ObjectRef {
            namespace: namespace.to_string(),
            name: name.to_string(),
        };
        let mut objects = self
            .objects
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        objects
            .entry(object)
            .or_default()
            .insert(key.to_string(), value.to_vec());
    }

    /// Marks a secret object as denied; subsequent reads fail with
    /// [`SecretError::AccessDenied`].
    pub fn deny(&self, namespace: &str, name: &str) {
        let object = ObjectRef {
            namespace: namespace.to_string(),
            name: name.to_string(),
        };
        let mut denied = self
            .denied
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        denied.insert(object);
    }

    /// Returns the number of secret objects in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Returns true if the store holds no secret objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SecretSource for MemorySecretStore {
    async fn get(&self, namespace: &str, name: &str, key: &str) -> Result<Vec<u8>> {
        let object = ObjectRef {
            namespace: namespace.to_string(),
            name: name.to_string(),
        };

        {
            let denied = self
                .denied
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if denied.contains(&object) {
                return Err(SecretError::AccessDenied {
                    reason: format!("read of {namespace}/{name} not permitted"),
                });
            }
        }

        let objects = self
            .objects
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        // An object missing the key reports the same NotFound as a missing
        // object.
        let value = objects
            .get(&object)
            .and_then(|data| data.get(key))
            .ok_or_else(|| SecretError::NotFound {
                namespace: namespace.to_string(),
                name: name.to_string(),
                key: key.to_string(),
            })?;
        Ok(value.clone())
    }
}

impl std::fmt::Debug for MemorySecretStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemorySecretStore")
            .field("objects_count", &self.len())
            .field("values", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_inserted_value() {
        let store = MemorySecretStore::new();
        store.insert("mynamespace", "am-pd-test-receiver", "routingKey", b"1234abc");

        let value = store
            .get("mynamespace", "am-pd-test-receiver", "routingKey")
            .await
            .expect("secret present");
        assert_eq!(value, b"1234abc");
    }

    #[tokio::test]
    async fn get_missing_object_is_not_found() {
        let store = MemorySecretStore::new();

        let err = store
            .get("mynamespace", "nope", "key")
            .await
            .expect_err("missing object");
        assert!(matches!(err, SecretError::NotFound { .. }));
    }

    #[tokio::test]
    async fn get_missing_key_is_not_found() {
        let store = MemorySecretStore::new();
        store.insert("mynamespace", "secret", "present", b"v");

        let err = store
            .get("mynamespace", "secret", "absent")
            .await
            .expect_err("missing key");
        // Missing key and missing object are the same error kind.
        assert!(matches!(err, SecretError::NotFound { .. }));
    }

    #[tokio::test]
    async fn get_is_namespace_scoped() {
        let store = MemorySecretStore::new();
        store.insert("ns-a", "shared-name", "key", b"a-value");

        let err = store
            .get("ns-b", "shared-name", "key")
            .await
            .expect_err("other namespace");
        assert!(matches!(err, SecretError::NotFound { .. }));
    }

    #[tokio::test]
    async fn denied_object_reports_access_denied() {
        let store = MemorySecretStore::new();
        store.insert("mynamespace", "locked", "key", b"v");
        store.deny("mynamespace", "locked");

        let err = store
            .get("mynamespace", "locked", "key")
            .await
            .expect_err("denied");
        assert!(matches!(err, SecretError::AccessDenied { .. }));
    }

    #[tokio::test]
    async fn insert_merges_keys_into_one_object() {
        let store = MemorySecretStore::new();
        store.insert("ns", "secret", "k1", b"v1");
        store.insert("ns", "secret", "k2", b"v2");

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("ns", "secret", "k2").await.expect("k2"), b"v2");
    }

    #[test]
    fn debug_redacts_values() {
        let store = MemorySecretStore::new();
        store.insert("ns", "secret", "key", b"sensitive");

        let debug = format!("{store:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sensitive"));
    }
}
