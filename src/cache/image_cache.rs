// ABOUTME: Food image URL cache with key normalization and a 30-day TTL
// ABOUTME: Expired entries are evicted on read; writes trigger a detached image prefetch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::{ImagePrefetcher, KeyValueStore};
use crate::clock::Clock;
use crate::config::ImageCacheConfig;
use crate::errors::AppResult;
use chrono::Duration;
use macro_tracker_core::constants::cache::{IMAGE_CACHE_KEY_PREFIX, IMAGE_CACHE_TTL_DAYS};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Stored value: the image URL and when it was written (Unix milliseconds)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CachedImage {
    /// Image URL
    pub image_url: String,
    /// Write time in Unix milliseconds
    pub timestamp: i64,
}

/// Normalized cache key for a food: `brand_food`, trimmed and lowercased
///
/// A missing brand leaves the leading underscore, so `apple` without a brand
/// becomes `_apple`.
#[must_use]
pub fn cache_key(food_name: &str, brand: Option<&str>) -> String {
    format!("{}_{}", brand.unwrap_or_default(), food_name)
        .trim()
        .to_lowercase()
}

/// Image URL cache over a durable key-value store
#[derive(Clone)]
pub struct FoodImageCache {
    store: Arc<dyn KeyValueStore>,
    prefetcher: Arc<dyn ImagePrefetcher>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    prefetch_enabled: bool,
}

impl FoodImageCache {
    /// Create a cache with the default 30-day TTL and prefetching enabled
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        prefetcher: Arc<dyn ImagePrefetcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_config(store, prefetcher, clock, &ImageCacheConfig::default())
    }

    /// Create a cache from configuration
    ///
    /// A TTL that is not positive or too large to represent falls back to the
    /// 30-day default.
    #[must_use]
    pub fn with_config(
        store: Arc<dyn KeyValueStore>,
        prefetcher: Arc<dyn ImagePrefetcher>,
        clock: Arc<dyn Clock>,
        config: &ImageCacheConfig,
    ) -> Self {
        let ttl = Duration::try_days(config.ttl_days)
            .filter(|ttl| *ttl > Duration::zero())
            .unwrap_or_else(|| {
                warn!(
                    ttl_days = config.ttl_days,
                    fallback_days = IMAGE_CACHE_TTL_DAYS,
                    "Image cache TTL out of range, using default"
                );
                Duration::days(IMAGE_CACHE_TTL_DAYS)
            });
        Self {
            store,
            prefetcher,
            clock,
            ttl,
            prefetch_enabled: config.prefetch_enabled,
        }
    }

    /// Entry lifetime
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    fn storage_key(food_name: &str, brand: Option<&str>) -> String {
        format!("{IMAGE_CACHE_KEY_PREFIX}{}", cache_key(food_name, brand))
    }

    /// Look up a cached image URL
    ///
    /// Entries at least one TTL old are removed and reported as absent. Store
    /// and decode failures are logged and treated as a miss.
    pub async fn get(&self, food_name: &str, brand: Option<&str>) -> Option<String> {
        let key = Self::storage_key(food_name, brand);

        let raw = match self.store.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "Image cache read failed");
                return None;
            }
        };

        let entry: CachedImage = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, error = %e, "Discarding undecodable image cache entry");
                self.evict(&key).await;
                return None;
            }
        };

        // A timestamp too far from now to subtract counts as expired
        let age_ms = self
            .clock
            .now()
            .timestamp_millis()
            .checked_sub(entry.timestamp);
        match age_ms {
            Some(age_ms) if age_ms < self.ttl.num_milliseconds() => {}
            _ => {
                debug!(key = %key, ?age_ms, "Image cache entry expired");
                self.evict(&key).await;
                return None;
            }
        }

        Some(entry.image_url)
    }

    async fn evict(&self, key: &str) {
        if let Err(e) = self.store.remove(key).await {
            warn!(key = %key, error = %e, "Failed to evict image cache entry");
        }
    }

    /// Store an image URL stamped with the current time, then prefetch it in the background
    ///
    /// The prefetch runs on a detached task; its outcome never affects the stored entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be encoded or written
    pub async fn put(&self, food_name: &str, brand: Option<&str>, image_url: &str) -> AppResult<()> {
        let key = Self::storage_key(food_name, brand);
        let entry = CachedImage {
            image_url: image_url.to_owned(),
            timestamp: self.clock.now().timestamp_millis(),
        };
        self.store.set(&key, serde_json::to_string(&entry)?).await?;
        debug!(key = %key, "Cached food image URL");

        if self.prefetch_enabled {
            self.spawn_prefetch(image_url.to_owned());
        }
        Ok(())
    }

    fn spawn_prefetch(&self, url: String) {
        let prefetcher = Arc::clone(&self.prefetcher);
        tokio::spawn(async move {
            if let Err(e) = prefetcher.prefetch(&url).await {
                warn!(url = %url, error = %e, "Food image prefetch failed");
            }
        });
    }
}
