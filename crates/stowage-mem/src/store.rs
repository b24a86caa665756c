use std::collections::HashMap;
use std::sync::RwLock;

use crate::object::Object;

/// In-memory, HashMap-based object store.
///
/// One instance is shared by every bucket handle in the process and by the
/// HTTP gateway's read path. All entries are held behind a `RwLock` for safe
/// concurrent access; objects are cloned on read (`Bytes` makes the content
/// clone a reference-count bump). The last write for a key wins, keys are
/// case-sensitive arbitrary strings, and nothing is ever evicted.
pub struct ObjectStore {
    objects: RwLock<HashMap<String, Object>>,
}

impl ObjectStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Store an object under its key, replacing any previous entry.
    pub fn put(&self, object: Object) {
        let mut map = self.objects.write().expect("store lock poisoned");
        map.insert(object.key.clone(), object);
    }

    /// Look up an object by key.
    pub fn get(&self, key: &str) -> Option<Object> {
        let map = self.objects.read().expect("store lock poisoned");
        map.get(key).cloned()
    }

    /// Remove the object stored under `key`. Returns `true` if it existed.
    pub fn delete(&self, key: &str) -> bool {
        let mut map = self.objects.write().expect("store lock poisoned");
        map.remove(key).is_some()
    }

    /// Check whether an object exists without cloning it.
    pub fn contains(&self, key: &str) -> bool {
        let map = self.objects.read().expect("store lock poisoned");
        map.contains_key(key)
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("store lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("store lock poisoned").is_empty()
    }

    /// Total bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .expect("store lock poisoned")
            .values()
            .map(|obj| obj.content.len() as u64)
            .sum()
    }

    /// Remove all objects from the store.
    pub fn clear(&self) {
        self.objects.write().expect("store lock poisoned").clear();
    }

    /// Return a sorted list of all keys in the store.
    pub fn keys(&self) -> Vec<String> {
        let map = self.objects.read().expect("store lock poisoned");
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}
