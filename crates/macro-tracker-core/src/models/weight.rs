// ABOUTME: Weight log entry model
// ABOUTME: The latest entry drives nutrition goal recomputation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single logged body weight
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// When the weight was recorded
    pub recorded_at: DateTime<Utc>,
}
