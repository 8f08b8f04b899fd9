// ABOUTME: External API client modules (signed nutrition REST API)
// ABOUTME: Provides nutrition data lookups for food logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! External API Clients

/// Signed nutrition REST client
pub mod nutrition_api;

pub use nutrition_api::NutritionApiClient;
