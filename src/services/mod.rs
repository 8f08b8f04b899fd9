// ABOUTME: Domain service layer wiring calculators to profile persistence
// ABOUTME: Goal recomputation on weight logging, over a pluggable profile store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Domain service layer

/// Goal recomputation and weight logging
pub mod goals;

/// Profile persistence boundary
pub mod profile_store;

pub use goals::{validate_weight, GoalService};
pub use profile_store::{InMemoryProfileStore, ProfileStore};
