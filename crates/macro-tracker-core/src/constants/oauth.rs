// ABOUTME: OAuth 1.0a protocol parameter names and fixed values
// ABOUTME: Used by the HMAC-SHA1 request signer for the nutrition REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Consumer key parameter name
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
/// Nonce parameter name
pub const OAUTH_NONCE: &str = "oauth_nonce";
/// Signature parameter name
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
/// Signature method parameter name
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
/// Timestamp parameter name
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
/// Version parameter name
pub const OAUTH_VERSION: &str = "oauth_version";

/// The only signature method we produce
pub const SIGNATURE_METHOD_HMAC_SHA1: &str = "HMAC-SHA1";
/// OAuth protocol version
pub const OAUTH_VERSION_1_0: &str = "1.0";

/// Length of generated nonces
pub const NONCE_LENGTH: usize = 32;
