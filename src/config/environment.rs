// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses rate limiter, image cache, and nutrition API settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ENVIRONMENT` | `development` |
//! | `LLM_MAX_REQUESTS_PER_MINUTE` | 5 |
//! | `LLM_INTER_REQUEST_DELAY_MS` | 1000 |
//! | `IMAGE_CACHE_TTL_DAYS` | 30 |
//! | `IMAGE_CACHE_MAX_ENTRIES` | 10000 |
//! | `IMAGE_PREFETCH_ENABLED` | `true` |
//! | `NUTRITION_API_BASE_URL` | `https://platform.fatsecret.com/rest/server.api` |
//! | `NUTRITION_API_CONSUMER_KEY` | unset |
//! | `NUTRITION_API_CONSUMER_SECRET` | unset |
//! | `NUTRITION_API_TIMEOUT_SECS` | 15 |

use super::error::ConfigError;
use super::goals::GoalConfig;
use macro_tracker_core::constants::cache::{
    DEFAULT_STORE_MAX_ENTRIES, IMAGE_CACHE_TTL_DAYS, MAX_IMAGE_CACHE_TTL_DAYS,
};
use macro_tracker_core::constants::rate_limit::{
    INTER_REQUEST_DELAY_MS, MAX_REQUESTS_PER_MINUTE, RATE_WINDOW_SECS,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Default nutrition REST endpoint (OAuth 1.0a signed)
const DEFAULT_NUTRITION_API_BASE_URL: &str = "https://platform.fatsecret.com/rest/server.api";

/// Default nutrition API request timeout
const DEFAULT_NUTRITION_API_TIMEOUT_SECS: u64 = 15;

/// Environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Throttling for outbound LLM calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRateLimitConfig {
    /// Maximum task starts within one rolling window
    pub max_requests_per_window: usize,
    /// Rolling window length
    pub window: Duration,
    /// Delay after each task completes
    pub inter_request_delay: Duration,
}

impl Default for LlmRateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests_per_window: MAX_REQUESTS_PER_MINUTE,
            window: Duration::from_secs(RATE_WINDOW_SECS),
            inter_request_delay: Duration::from_millis(INTER_REQUEST_DELAY_MS),
        }
    }
}

/// Food image URL cache settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCacheConfig {
    /// Entry lifetime in days
    pub ttl_days: i64,
    /// Capacity of the in-memory store backend
    pub max_entries: usize,
    /// Whether `put` triggers an image prefetch
    pub prefetch_enabled: bool,
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            ttl_days: IMAGE_CACHE_TTL_DAYS,
            max_entries: DEFAULT_STORE_MAX_ENTRIES,
            prefetch_enabled: true,
        }
    }
}

/// Nutrition REST API settings
#[derive(Clone, PartialEq, Eq)]
pub struct NutritionApiConfig {
    /// Endpoint receiving signed requests
    pub base_url: String,
    /// OAuth consumer key
    pub consumer_key: Option<String>,
    /// OAuth consumer secret
    pub consumer_secret: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl NutritionApiConfig {
    /// Whether both consumer credentials are present
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.consumer_key.is_some() && self.consumer_secret.is_some()
    }
}

impl Default for NutritionApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NUTRITION_API_BASE_URL.to_owned(),
            consumer_key: None,
            consumer_secret: None,
            timeout_secs: DEFAULT_NUTRITION_API_TIMEOUT_SECS,
        }
    }
}

// Secrets never reach logs
impl fmt::Debug for NutritionApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NutritionApiConfig")
            .field("base_url", &self.base_url)
            .field("consumer_key", &self.consumer_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "consumer_secret",
                &self.consumer_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Top-level configuration assembled at startup
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Goal formula parameters
    pub goals: GoalConfig,
    /// LLM throttling
    pub llm_rate_limit: LlmRateLimitConfig,
    /// Image cache
    pub image_cache: ImageCacheConfig,
    /// Nutrition API
    pub nutrition_api: NutritionApiConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT")
            .map(|v| Environment::from_str_or_default(&v))
            .unwrap_or_default();

        let llm_rate_limit = LlmRateLimitConfig {
            max_requests_per_window: env_parse(
                "LLM_MAX_REQUESTS_PER_MINUTE",
                MAX_REQUESTS_PER_MINUTE,
            )?,
            window: Duration::from_secs(RATE_WINDOW_SECS),
            inter_request_delay: Duration::from_millis(env_parse(
                "LLM_INTER_REQUEST_DELAY_MS",
                INTER_REQUEST_DELAY_MS,
            )?),
        };

        let image_cache = ImageCacheConfig {
            ttl_days: env_parse("IMAGE_CACHE_TTL_DAYS", IMAGE_CACHE_TTL_DAYS)?,
            max_entries: env_parse("IMAGE_CACHE_MAX_ENTRIES", DEFAULT_STORE_MAX_ENTRIES)?,
            prefetch_enabled: env_parse("IMAGE_PREFETCH_ENABLED", true)?,
        };

        let nutrition_api = NutritionApiConfig {
            base_url: env::var("NUTRITION_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_NUTRITION_API_BASE_URL.to_owned()),
            consumer_key: env::var("NUTRITION_API_CONSUMER_KEY").ok(),
            consumer_secret: env::var("NUTRITION_API_CONSUMER_SECRET").ok(),
            timeout_secs: env_parse(
                "NUTRITION_API_TIMEOUT_SECS",
                DEFAULT_NUTRITION_API_TIMEOUT_SECS,
            )?,
        };

        let config = Self {
            environment,
            goals: GoalConfig::default(),
            llm_rate_limit,
            image_cache,
            nutrition_api,
        };
        config.validate()?;

        if !config.nutrition_api.has_credentials() {
            warn!("Nutrition API credentials not configured; signed requests will be unavailable");
        }
        info!(
            environment = %config.environment,
            llm_max_per_minute = config.llm_rate_limit.max_requests_per_window,
            image_ttl_days = config.image_cache.ttl_days,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate cross-field constraints
    ///
    /// # Errors
    ///
    /// Returns an error if the rate limiter cap is zero, the cache TTL is outside
    /// 1 to 3650 days, or the goal configuration is invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_rate_limit.max_requests_per_window == 0 {
            return Err(ConfigError::InvalidRange(
                "LLM_MAX_REQUESTS_PER_MINUTE must be at least 1",
            ));
        }
        if !(1..=MAX_IMAGE_CACHE_TTL_DAYS).contains(&self.image_cache.ttl_days) {
            return Err(ConfigError::InvalidRange(
                "IMAGE_CACHE_TTL_DAYS must be between 1 and 3650",
            ));
        }
        self.goals.validate()
    }
}

/// Parse an optional environment variable, falling back to `default` when unset
fn env_parse<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::Parse(format!("{name}={raw}: {e}"))),
        Err(_) => Ok(default),
    }
}
