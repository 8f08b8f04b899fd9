// ABOUTME: Cache-related constants for TTL, capacity, and key namespacing
// ABOUTME: Food image URL cache entries live for 30 days in the durable key-value store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Food image cache TTL in days
pub const IMAGE_CACHE_TTL_DAYS: i64 = 30;

/// Longest accepted image cache TTL in days
pub const MAX_IMAGE_CACHE_TTL_DAYS: i64 = 3650;

/// Namespace prefix for food image entries in the key-value store
pub const IMAGE_CACHE_KEY_PREFIX: &str = "food_image:";

/// Default maximum entries for the in-memory key-value store
pub const DEFAULT_STORE_MAX_ENTRIES: usize = 10_000;
