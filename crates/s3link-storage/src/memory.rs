use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use s3link_core::store::{NewObject, ObjectStore, PutOutcome, Result, StoredObject};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct Slot {
    object: NewObject,
    etag: String,
}

/// In-memory implementation of the ObjectStore trait using DashMap.
///
/// Clones share the same underlying map, so a test can keep a handle
/// to inspect what an allocator wrote. Every write gets a fresh entity
/// tag, even when the body is unchanged.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<DashMap<String, Slot>>,
    versions: Arc<AtomicU64>,
}

impl InMemoryObjectStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the object stored at `key`, including its metadata.
    pub fn object(&self, key: &str) -> Option<NewObject> {
        self.objects.get(key).map(|slot| slot.object.clone())
    }

    /// Returns every key currently stored, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn slot(&self, object: NewObject) -> Slot {
        let version = self.versions.fetch_add(1, Ordering::SeqCst) + 1;
        Slot {
            object,
            etag: format!("\"{version}\""),
        }
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get(&self, key: &str) -> Result<Option<StoredObject>> {
        Ok(self.objects.get(key).map(|slot| StoredObject {
            body: slot.object.body.clone(),
            etag: slot.etag.clone(),
        }))
    }

    async fn put(&self, key: &str, object: NewObject) -> Result<()> {
        let slot = self.slot(object);
        self.objects.insert(key.to_owned(), slot);
        Ok(())
    }

    async fn put_if_absent(&self, key: &str, object: NewObject) -> Result<PutOutcome> {
        // The entry guard holds the shard lock, making check-and-insert atomic.
        match self.objects.entry(key.to_owned()) {
            Entry::Occupied(_) => Ok(PutOutcome::AlreadyExists),
            Entry::Vacant(vacant) => {
                vacant.insert(self.slot(object));
                Ok(PutOutcome::Written)
            }
        }
    }

    async fn put_if_match(&self, key: &str, object: NewObject, etag: &str) -> Result<PutOutcome> {
        match self.objects.entry(key.to_owned()) {
            Entry::Occupied(mut occupied) if occupied.get().etag == etag => {
                occupied.insert(self.slot(object));
                Ok(PutOutcome::Written)
            }
            Entry::Occupied(_) | Entry::Vacant(_) => Ok(PutOutcome::Modified),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.objects.contains_key(key))
    }
}
