// ABOUTME: OAuth 1.0a request signing for the nutrition REST API
// ABOUTME: Two-legged HMAC-SHA1 signer with injectable nonce and clock sources
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # OAuth 1.0a
//!
//! The nutrition API authenticates each request with a consumer key and an
//! HMAC-SHA1 signature over the method, URL and every parameter. There is no
//! token secret, so the signing key is `enc(consumer_secret)&`.
//!
//! Nonce and timestamp make every signature unique. Tests pin both through
//! [`FixedNonce`] and [`crate::clock::ManualClock`], or call [`sign_with`]
//! directly.

/// Signature base string construction and HMAC-SHA1 signing
pub mod signer;

pub use signer::{
    hmac_sha1_signature, normalized_parameters, percent_encode, sign_with,
    signature_base_string, FixedNonce, NonceSource, OAuthParams, RandomNonce, RequestSigner,
    SigningInput,
};
