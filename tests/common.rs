// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, fixed clocks, sample records, and recording prefetchers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `macro_tracker`

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use macro_tracker::cache::ImagePrefetcher;
use macro_tracker::errors::{AppError, AppResult};
use macro_tracker::models::{NutritionRecord, ServingDescriptor};
use std::sync::{Once, PoisonError};
use std::sync::Mutex;
use tokio::sync::mpsc;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fixed reference instant used as `t0` across tests
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

/// Branded record: one bar
pub fn branded_bar() -> NutritionRecord {
    NutritionRecord {
        name: "Protein Bar".to_owned(),
        brand: Some("Quest".to_owned()),
        calories: 190.0,
        protein: 21.0,
        fat: 8.5,
        carbs: 22.3,
        serving: ServingDescriptor::Unit {
            quantity: 1.0,
            unit: "bar".to_owned(),
        },
    }
}

/// Generic record: macros per 100 g
pub fn generic_rice() -> NutritionRecord {
    NutritionRecord {
        name: "White Rice, cooked".to_owned(),
        brand: None,
        calories: 130.0,
        protein: 2.7,
        fat: 0.3,
        carbs: 28.2,
        serving: ServingDescriptor::Grams { base_grams: 100.0 },
    }
}

/// Prefetcher that reports every URL it is asked for
pub struct RecordingPrefetcher {
    tx: mpsc::UnboundedSender<String>,
    fail: bool,
}

impl RecordingPrefetcher {
    /// Prefetcher that succeeds
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, fail: false }, rx)
    }

    /// Prefetcher that reports the URL and then fails
    pub fn failing() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, fail: true }, rx)
    }
}

#[async_trait]
impl ImagePrefetcher for RecordingPrefetcher {
    async fn prefetch(&self, url: &str) -> AppResult<()> {
        self.tx.send(url.to_owned()).ok();
        if self.fail {
            return Err(AppError::external_service("image host", "connection refused"));
        }
        Ok(())
    }
}

/// Ordered log of events recorded from concurrent tasks
#[derive(Default)]
pub struct EventLog<T> {
    events: Mutex<Vec<T>>,
}

impl<T: Clone> EventLog<T> {
    pub fn push(&self, event: T) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
