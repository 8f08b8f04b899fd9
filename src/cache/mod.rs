// ABOUTME: Key-value storage abstraction and the food image URL cache built on it
// ABOUTME: Pluggable store backends plus TTL policy and fire-and-forget image prefetch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Food image URL cache with a 30-day TTL
pub mod image_cache;
/// In-memory store implementation
pub mod memory;
/// Image prefetch collaborators
pub mod prefetch;

use crate::errors::AppResult;

pub use image_cache::{CachedImage, FoodImageCache};
pub use memory::InMemoryKeyValueStore;
pub use prefetch::{HttpImagePrefetcher, ImagePrefetcher, NoopPrefetcher};

/// Durable string key-value store
///
/// Values are opaque strings; callers encode structure as JSON. Backends only
/// need last-write-wins semantics.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn set(&self, key: &str, value: String) -> AppResult<()>;

    /// Delete a value; deleting a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    async fn remove(&self, key: &str) -> AppResult<()>;
}
