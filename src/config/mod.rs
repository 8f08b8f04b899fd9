// ABOUTME: Configuration management module for nutrition formulas and runtime settings
// ABOUTME: Handles goal formula parameters and environment-driven service configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration module for Macro Tracker
//!
//! - **Goals**: BMR coefficients, activity factors, goal adjustments, macro split, fallbacks
//! - **Environment**: Rate limiter, image cache, and nutrition API settings from env vars
//!
//! Configuration is built once at startup and handed to constructors; nothing here
//! is stored in a global.

/// Environment and service configuration
pub mod environment;
/// Configuration validation errors
pub mod error;
/// Nutrition goal formula configuration
pub mod goals;

pub use environment::{
    Environment, ImageCacheConfig, LlmRateLimitConfig, NutritionApiConfig, ServerConfig,
};
pub use error::ConfigError;
pub use goals::{
    ActivityFactorsConfig, BiometricDefaults, BmrConfig, GoalAdjustmentConfig, GoalConfig,
    MacroSplitConfig,
};
