// ABOUTME: Main library entry point for the macro tracker nutrition engine
// ABOUTME: Goal calculation, serving scaling, OAuth1 signing, image caching, and LLM rate limiting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Macro Tracker
//!
//! Client-side engine for a calorie and macro tracking app.
//!
//! ## Features
//!
//! - **Goal calculation**: Mifflin-St Jeor BMR, activity-scaled TDEE, goal
//!   adjustment and a 30/30/40 macro split, with fallbacks for incomplete profiles
//! - **Serving adjustment**: branded foods by whole servings, generic foods by grams
//! - **OAuth 1.0a signing**: two-legged HMAC-SHA1 for the nutrition REST API
//! - **Image cache**: 30-day TTL over a pluggable key-value store with background prefetch
//! - **Rate limiting**: FIFO, one-at-a-time execution of LLM calls under a rolling cap
//!
//! ## Architecture
//!
//! - **intelligence**: pure calculators
//! - **oauth1**: request signing
//! - **cache**: key-value store abstraction and the image cache
//! - **`rate_limiting`**: the process-wide serializing queue
//! - **external**: the signed nutrition API client
//! - **services**: goal recomputation over a profile store
//! - **config** / **logging**: environment-driven setup
//!
//! Long-lived collaborators (store, limiter, clock, HTTP clients) are built once at
//! startup and passed into constructors.

/// Key-value storage and the food image cache
pub mod cache;

/// Wall-clock abstraction
pub mod clock;

/// Configuration management
pub mod config;

/// External API clients
pub mod external;

/// Nutrition calculators
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// OAuth 1.0a request signing
pub mod oauth1;

/// Serializing rate limiter for LLM calls
pub mod rate_limiting;

/// Domain services
pub mod services;

/// Unified error handling (re-exported from macro-tracker-core)
pub use macro_tracker_core::errors;

/// Application constants (re-exported from macro-tracker-core)
pub use macro_tracker_core::constants;

/// Domain models (re-exported from macro-tracker-core)
pub use macro_tracker_core::models;
