//! Keyed record store abstraction.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

/// Keyed store for document records.
///
/// Soft deletion is a field on the records themselves, so the store exposes
/// plain get/upsert/list; `remove` exists for the few hard-deleted record
/// types (invoice items). Reads return clones: mutation is read-modify-write
/// through `upsert`, last write wins.
pub trait DocumentStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn upsert(&self, key: K, value: V);
    fn remove(&self, key: &K) -> Option<V>;
    fn list(&self) -> Vec<V>;
}

impl<K, V, S> DocumentStore<K, V> for Arc<S>
where
    S: DocumentStore<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        (**self).remove(key)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryDocumentStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryDocumentStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryDocumentStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> DocumentStore<K, V> for InMemoryDocumentStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut map = self.inner.write().ok()?;
        map.remove(key)
    }

    fn list(&self) -> Vec<V> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.values().cloned().collect()
    }
}
