// ABOUTME: OAuth 1.0a signed client for the third-party nutrition REST API
// ABOUTME: Builds signed request URLs and returns raw JSON nutrition payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::config::NutritionApiConfig;
use crate::errors::{AppError, AppResult};
use crate::oauth1::{percent_encode, RequestSigner};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Service name used in error messages
const SERVICE: &str = "Nutrition API";

/// Largest page the API serves
const MAX_RESULTS_LIMIT: u32 = 50;

/// Client for the signed nutrition REST endpoint
///
/// Responses are passed through as JSON; mapping them into
/// [`crate::models::NutritionRecord`] is the caller's concern.
#[derive(Debug, Clone)]
pub struct NutritionApiClient {
    base_url: String,
    signer: RequestSigner,
    http_client: Client,
}

impl NutritionApiClient {
    /// Build a client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if consumer credentials are missing or the HTTP client
    /// cannot be built
    pub fn new(config: &NutritionApiConfig) -> AppResult<Self> {
        let (Some(key), Some(secret)) = (&config.consumer_key, &config.consumer_secret) else {
            return Err(AppError::config(
                "NUTRITION_API_CONSUMER_KEY and NUTRITION_API_CONSUMER_SECRET must be set",
            ));
        };

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_signer(
            config.base_url.clone(),
            RequestSigner::new(key.clone(), secret.clone()),
            http_client,
        ))
    }

    /// Build a client around an existing signer and HTTP client
    #[must_use]
    pub fn with_signer(base_url: impl Into<String>, signer: RequestSigner, http_client: Client) -> Self {
        Self {
            base_url: base_url.into(),
            signer,
            http_client,
        }
    }

    /// Endpoint requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parameters for a paged food search
    #[must_use]
    pub fn search_params(query: &str, page_number: u32, max_results: u32) -> Vec<(String, String)> {
        vec![
            ("method".to_owned(), "foods.search".to_owned()),
            ("search_expression".to_owned(), query.to_owned()),
            ("format".to_owned(), "json".to_owned()),
            ("page_number".to_owned(), page_number.to_string()),
            ("max_results".to_owned(), max_results.to_string()),
        ]
    }

    /// Sign `params` and attach them, plus the OAuth parameters, to the endpoint URL
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting URL is invalid
    pub fn signed_url(&self, method: &Method, params: &[(String, String)]) -> AppResult<Url> {
        let signed = self
            .signer
            .sign_request(method.as_str(), &self.base_url, params);
        let query = signed
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Url::parse(&format!("{}?{query}", self.base_url))
            .map_err(|e| AppError::config(format!("Invalid nutrition API URL: {e}")))
    }

    /// Send a signed request and return the JSON body
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a non-success
    /// status, or the body is not JSON
    pub async fn request(&self, method: Method, params: &[(String, String)]) -> AppResult<Value> {
        let url = self.signed_url(&method, params)?;
        debug!(method = %method, "Calling nutrition API");

        let response = self
            .http_client
            .request(method, url)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, e.to_string()).with_source(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Nutrition API returned an error");
            return Err(AppError::external_service(
                SERVICE,
                format!("HTTP {status}: {body}"),
            ));
        }

        response.json().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("JSON parse error: {e}")).with_source(e)
        })
    }

    /// Search foods by free text
    ///
    /// # Errors
    ///
    /// Returns an error if the query is blank, `max_results` is outside 1..=50,
    /// or the request fails
    pub async fn search_foods(
        &self,
        query: &str,
        page_number: u32,
        max_results: u32,
    ) -> AppResult<Value> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }
        if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
            return Err(AppError::invalid_input(format!(
                "max_results must be between 1 and {MAX_RESULTS_LIMIT}"
            )));
        }

        self.request(
            Method::GET,
            &Self::search_params(query.trim(), page_number, max_results),
        )
        .await
    }

    /// Fetch a single food by id
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the request fails
    pub async fn get_food(&self, food_id: &str) -> AppResult<Value> {
        if food_id.trim().is_empty() {
            return Err(AppError::invalid_input("Food id cannot be empty"));
        }
        let params = vec![
            ("method".to_owned(), "food.get.v2".to_owned()),
            ("food_id".to_owned(), food_id.trim().to_owned()),
            ("format".to_owned(), "json".to_owned()),
        ];
        self.request(Method::GET, &params).await
    }
}
