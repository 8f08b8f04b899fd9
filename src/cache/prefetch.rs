// ABOUTME: Image prefetch collaborators invoked after an image URL is cached
// ABOUTME: HTTP prefetcher that warms the URL and a no-op variant for offline use
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Warms an image URL so later display is fast
#[async_trait::async_trait]
pub trait ImagePrefetcher: Send + Sync {
    /// Fetch the image once
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be fetched
    async fn prefetch(&self, url: &str) -> AppResult<()>;
}

/// Prefetcher that downloads the image and discards the body
#[derive(Debug, Clone)]
pub struct HttpImagePrefetcher {
    client: Client,
}

impl HttpImagePrefetcher {
    /// Default request timeout for image downloads
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

    /// Build a prefetcher with its own HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new() -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Self::DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Reuse an existing HTTP client
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ImagePrefetcher for HttpImagePrefetcher {
    async fn prefetch(&self, url: &str) -> AppResult<()> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(url, size = bytes.len(), "Prefetched food image");
        Ok(())
    }
}

/// Prefetcher that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPrefetcher;

#[async_trait::async_trait]
impl ImagePrefetcher for NoopPrefetcher {
    async fn prefetch(&self, _url: &str) -> AppResult<()> {
        Ok(())
    }
}
