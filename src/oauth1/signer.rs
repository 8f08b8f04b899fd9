// ABOUTME: Two-legged OAuth 1.0a HMAC-SHA1 request signing
// ABOUTME: Builds the signature base string, signs it with the consumer secret, and returns OAuth params
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::clock::{Clock, SystemClock};
use base64::{engine::general_purpose, Engine as _};
use macro_tracker_core::constants::oauth::{
    NONCE_LENGTH, OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD,
    OAUTH_TIMESTAMP, OAUTH_VERSION, OAUTH_VERSION_1_0, SIGNATURE_METHOD_HMAC_SHA1,
};
use rand::{distributions::Alphanumeric, Rng};
use ring::hmac;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Produces `oauth_nonce` values
pub trait NonceSource: Send + Sync {
    /// A fresh nonce
    fn nonce(&self) -> String;
}

/// Random alphanumeric nonces from the thread RNG
#[derive(Debug, Clone, Copy)]
pub struct RandomNonce {
    length: usize,
}

impl Default for RandomNonce {
    fn default() -> Self {
        Self {
            length: NONCE_LENGTH,
        }
    }
}

impl RandomNonce {
    /// Nonces of `length` characters
    #[must_use]
    pub const fn with_length(length: usize) -> Self {
        Self { length }
    }
}

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Always returns the same nonce
#[derive(Debug, Clone)]
pub struct FixedNonce(pub String);

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.0.clone()
    }
}

/// OAuth parameters attached to a signed request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthParams {
    /// `oauth_consumer_key`
    #[serde(rename = "oauth_consumer_key")]
    pub consumer_key: String,
    /// `oauth_nonce`
    #[serde(rename = "oauth_nonce")]
    pub nonce: String,
    /// `oauth_signature_method`, always HMAC-SHA1
    #[serde(rename = "oauth_signature_method")]
    pub signature_method: String,
    /// `oauth_timestamp`, Unix seconds
    #[serde(rename = "oauth_timestamp")]
    pub timestamp: String,
    /// `oauth_version`, always 1.0
    #[serde(rename = "oauth_version")]
    pub version: String,
    /// `oauth_signature`, base64 HMAC-SHA1
    #[serde(rename = "oauth_signature")]
    pub signature: String,
}

impl OAuthParams {
    /// Name/value pairs in protocol order
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            (OAUTH_CONSUMER_KEY.to_owned(), self.consumer_key.clone()),
            (OAUTH_NONCE.to_owned(), self.nonce.clone()),
            (
                OAUTH_SIGNATURE_METHOD.to_owned(),
                self.signature_method.clone(),
            ),
            (OAUTH_TIMESTAMP.to_owned(), self.timestamp.clone()),
            (OAUTH_VERSION.to_owned(), self.version.clone()),
            (OAUTH_SIGNATURE.to_owned(), self.signature.clone()),
        ]
    }
}

/// Percent-encode per RFC 3986: only `A-Z a-z 0-9 - . _ ~` pass through
#[must_use]
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Normalized parameter string: encoded pairs sorted by key then value, joined by `&`
#[must_use]
pub fn normalized_parameters(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// `METHOD&enc(url)&enc(params)`
#[must_use]
pub fn signature_base_string(method: &str, url: &str, params: &[(String, String)]) -> String {
    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(url),
        percent_encode(&normalized_parameters(params))
    )
}

/// Base64 HMAC-SHA1 of `base_string` keyed with `enc(consumer_secret)&`
#[must_use]
pub fn hmac_sha1_signature(base_string: &str, consumer_secret: &str) -> String {
    let signing_key = format!("{}&", percent_encode(consumer_secret));
    let key = hmac::Key::new(
        hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
        signing_key.as_bytes(),
    );
    let tag = hmac::sign(&key, base_string.as_bytes());
    general_purpose::STANDARD.encode(tag.as_ref())
}

/// Everything that varies between two signatures of the same request
pub struct SigningInput<'a> {
    /// HTTP method
    pub method: &'a str,
    /// Endpoint URL without query string
    pub url: &'a str,
    /// Request parameters
    pub params: &'a [(String, String)],
    /// Consumer key
    pub consumer_key: &'a str,
    /// Consumer secret
    pub consumer_secret: &'a str,
    /// Nonce
    pub nonce: &'a str,
    /// Unix seconds
    pub timestamp: i64,
}

/// Deterministic signing with an explicit nonce and timestamp
#[must_use]
pub fn sign_with(input: &SigningInput<'_>) -> OAuthParams {
    let timestamp = input.timestamp.to_string();
    let mut merged: Vec<(String, String)> = input.params.to_vec();
    merged.extend([
        (OAUTH_CONSUMER_KEY.to_owned(), input.consumer_key.to_owned()),
        (OAUTH_NONCE.to_owned(), input.nonce.to_owned()),
        (
            OAUTH_SIGNATURE_METHOD.to_owned(),
            SIGNATURE_METHOD_HMAC_SHA1.to_owned(),
        ),
        (OAUTH_TIMESTAMP.to_owned(), timestamp.clone()),
        (OAUTH_VERSION.to_owned(), OAUTH_VERSION_1_0.to_owned()),
    ]);

    let base_string = signature_base_string(input.method, input.url, &merged);
    let signature = hmac_sha1_signature(&base_string, input.consumer_secret);

    OAuthParams {
        consumer_key: input.consumer_key.to_owned(),
        nonce: input.nonce.to_owned(),
        signature_method: SIGNATURE_METHOD_HMAC_SHA1.to_owned(),
        timestamp,
        version: OAUTH_VERSION_1_0.to_owned(),
        signature,
    }
}

/// Signs requests for one consumer, drawing nonces and timestamps from injected sources
#[derive(Clone)]
pub struct RequestSigner {
    consumer_key: String,
    consumer_secret: String,
    nonces: Arc<dyn NonceSource>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Signer with random nonces and the system clock
    #[must_use]
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self::with_sources(
            consumer_key,
            consumer_secret,
            Arc::new(RandomNonce::default()),
            Arc::new(SystemClock),
        )
    }

    /// Signer with explicit nonce and time sources
    #[must_use]
    pub fn with_sources(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        nonces: Arc<dyn NonceSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            nonces,
            clock,
        }
    }

    /// Consumer key this signer uses
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// Sign a request and return the OAuth parameters including `oauth_signature`
    #[must_use]
    pub fn sign(&self, method: &str, url: &str, params: &[(String, String)]) -> OAuthParams {
        let nonce = self.nonces.nonce();
        let timestamp = self.clock.now().timestamp();
        debug!(method, url, param_count = params.len(), "Signing OAuth 1.0a request");

        sign_with(&SigningInput {
            method,
            url,
            params,
            consumer_key: &self.consumer_key,
            consumer_secret: &self.consumer_secret,
            nonce: &nonce,
            timestamp,
        })
    }

    /// Sign a request and return its parameters merged with the OAuth parameters
    #[must_use]
    pub fn sign_request(
        &self,
        method: &str,
        url: &str,
        params: &[(String, String)],
    ) -> Vec<(String, String)> {
        let oauth = self.sign(method, url, params);
        let mut all = params.to_vec();
        all.extend(oauth.to_pairs());
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode_reserved_characters() {
        assert_eq!(percent_encode("Ladies + Gentlemen"), "Ladies%20%2B%20Gentlemen");
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("*'()"), "%2A%27%28%29");
        assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
        assert_eq!(percent_encode("\u{2603}"), "%E2%98%83");
    }

    #[test]
    fn test_parameters_sorted_after_encoding() {
        let params = vec![
            ("b".to_owned(), "2".to_owned()),
            ("a".to_owned(), "z".to_owned()),
            ("a".to_owned(), "y".to_owned()),
            ("c d".to_owned(), "x".to_owned()),
        ];
        assert_eq!(normalized_parameters(&params), "a=y&a=z&b=2&c%20d=x");
    }

    #[test]
    fn test_random_nonce_is_alphanumeric() {
        let nonce = RandomNonce::default().nonce();
        assert_eq!(nonce.len(), NONCE_LENGTH);
        assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
