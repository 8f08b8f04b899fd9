// ABOUTME: User profile persistence boundary used by goal recomputation
// ABOUTME: ProfileStore trait plus an in-memory implementation for tests and local runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use crate::models::{NutritionGoals, RawBiometrics, WeightEntry};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Access to user profile documents
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Read the biometric fields of a profile
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or cannot be read
    async fn load_biometrics(&self, user_id: Uuid) -> AppResult<RawBiometrics>;

    /// Merge computed goals into the profile, leaving other fields untouched
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or cannot be written
    async fn merge_goals(&self, user_id: Uuid, goals: &NutritionGoals) -> AppResult<()>;

    /// Append a weight log entry
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or cannot be written
    async fn append_weight(&self, user_id: Uuid, entry: WeightEntry) -> AppResult<()>;

    /// Most recent weight log entry, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or cannot be read
    async fn latest_weight(&self, user_id: Uuid) -> AppResult<Option<WeightEntry>>;
}

#[derive(Debug, Clone, Default)]
struct ProfileRecord {
    biometrics: RawBiometrics,
    goals: Option<NutritionGoals>,
    weights: Vec<WeightEntry>,
}

/// Profile store held in process memory
///
/// Appending a weight also updates the profile's `weight` field, mirroring how
/// the weight log screen writes through to the profile.
#[derive(Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Arc<RwLock<HashMap<Uuid, ProfileRecord>>>,
}

impl InMemoryProfileStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a profile's biometrics
    pub async fn upsert_biometrics(&self, user_id: Uuid, biometrics: RawBiometrics) {
        self.profiles
            .write()
            .await
            .entry(user_id)
            .or_default()
            .biometrics = biometrics;
    }

    /// Goals last merged into a profile
    pub async fn goals(&self, user_id: Uuid) -> Option<NutritionGoals> {
        self.profiles
            .read()
            .await
            .get(&user_id)
            .and_then(|record| record.goals)
    }

    /// Full weight log of a profile, oldest first
    pub async fn weights(&self, user_id: Uuid) -> Vec<WeightEntry> {
        self.profiles
            .read()
            .await
            .get(&user_id)
            .map(|record| record.weights.clone())
            .unwrap_or_default()
    }
}

fn profile_not_found(user_id: Uuid) -> AppError {
    AppError::not_found(format!("Profile {user_id}"))
}

#[async_trait::async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn load_biometrics(&self, user_id: Uuid) -> AppResult<RawBiometrics> {
        self.profiles
            .read()
            .await
            .get(&user_id)
            .map(|record| record.biometrics.clone())
            .ok_or_else(|| profile_not_found(user_id))
    }

    async fn merge_goals(&self, user_id: Uuid, goals: &NutritionGoals) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        let record = profiles
            .get_mut(&user_id)
            .ok_or_else(|| profile_not_found(user_id))?;
        record.goals = Some(*goals);
        drop(profiles);
        Ok(())
    }

    async fn append_weight(&self, user_id: Uuid, entry: WeightEntry) -> AppResult<()> {
        let mut profiles = self.profiles.write().await;
        let record = profiles
            .get_mut(&user_id)
            .ok_or_else(|| profile_not_found(user_id))?;
        record.weights.push(entry);
        record.biometrics.weight = Some(Value::from(entry.weight_kg));
        drop(profiles);
        Ok(())
    }

    async fn latest_weight(&self, user_id: Uuid) -> AppResult<Option<WeightEntry>> {
        self.profiles
            .read()
            .await
            .get(&user_id)
            .map(|record| record.weights.iter().max_by_key(|w| w.recorded_at).copied())
            .ok_or_else(|| profile_not_found(user_id))
    }
}
