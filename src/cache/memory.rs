// ABOUTME: In-memory key-value store with LRU eviction
// ABOUTME: Backs the image cache in tests and single-process deployments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::KeyValueStore;
use crate::errors::AppResult;
use lru::LruCache;
use macro_tracker_core::constants::cache::DEFAULT_STORE_MAX_ENTRIES;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory store bounded by entry count
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct InMemoryKeyValueStore {
    store: Arc<RwLock<LruCache<String, String>>>,
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_MAX_ENTRIES)
    }
}

impl InMemoryKeyValueStore {
    /// Capacity used when zero is requested
    const FALLBACK_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_STORE_MAX_ENTRIES) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a store holding at most `max_entries` values
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(Self::FALLBACK_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Number of stored values
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        // LruCache::get updates recency, so it needs the write lock
        Ok(self.store.write().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> AppResult<()> {
        self.store.write().await.put(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.store.write().await.pop(key);
        Ok(())
    }
}
