// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Nutrition formulas, cache TTLs, rate limits, OAuth parameters, and service names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Constants grouped by domain rather than in a single large file.

/// Image cache TTL, key namespacing, and capacity
pub mod cache;

/// Nutrition formula coefficients, multipliers, and fallbacks
pub mod nutrition;

/// OAuth 1.0a parameter names and fixed values
pub mod oauth;

/// LLM request throttling defaults
pub mod rate_limit;

/// Service identity used by logging
pub mod service_names {
    /// Library / CLI service name for structured logs
    pub const MACRO_TRACKER: &str = "macro-tracker";
}
