// ABOUTME: Nutrition goal recomputation driven by profile changes and weight logging
// ABOUTME: Loads biometrics, computes goals, and merge-writes them back to the profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use super::profile_store::ProfileStore;
use crate::clock::Clock;
use crate::constants::nutrition::MAX_BODY_WEIGHT_KG;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::intelligence::GoalCalculator;
use crate::models::{NutritionGoals, WeightEntry};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Keeps stored goals in sync with the profile
#[derive(Clone)]
pub struct GoalService {
    store: Arc<dyn ProfileStore>,
    calculator: GoalCalculator,
    clock: Arc<dyn Clock>,
}

/// Check a logged weight
///
/// # Errors
///
/// Returns an invalid input error for a weight that is not finite or not
/// positive, and an out of range error above 635 kg
pub fn validate_weight(weight_kg: f64) -> AppResult<()> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(AppError::invalid_input(
            "Weight must be a number greater than 0",
        ));
    }
    if weight_kg > MAX_BODY_WEIGHT_KG {
        return Err(AppError::out_of_range(format!(
            "Weight must be at most {MAX_BODY_WEIGHT_KG} kg"
        )));
    }
    Ok(())
}

impl GoalService {
    /// Create a service
    #[must_use]
    pub fn new(store: Arc<dyn ProfileStore>, calculator: GoalCalculator, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            calculator,
            clock,
        }
    }

    /// Recompute goals from the stored profile and latest logged weight
    ///
    /// The latest weight log entry wins over the profile's own weight field.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be read or written, or no weight
    /// is known for the user
    #[instrument(skip(self))]
    pub async fn recompute_goals(&self, user_id: Uuid) -> AppResult<NutritionGoals> {
        let raw = self.store.load_biometrics(user_id).await?;
        let weight_kg = match self.store.latest_weight(user_id).await? {
            Some(entry) => entry.weight_kg,
            None => raw.weight_kg().ok_or_else(|| {
                AppError::new(
                    ErrorCode::MissingRequiredField,
                    "No weight recorded for user",
                )
            })?,
        };

        let goals = self.calculator.compute_from_raw(&raw, weight_kg);
        self.store.merge_goals(user_id, &goals).await?;
        info!(
            calorie_goal = goals.calorie_goal,
            weight_kg, "Recomputed nutrition goals"
        );
        Ok(goals)
    }

    /// Log a new weight and recompute goals with it
    ///
    /// # Errors
    ///
    /// Returns an error if the weight is invalid or the profile cannot be read
    /// or written
    #[instrument(skip(self))]
    pub async fn record_weight(&self, user_id: Uuid, weight_kg: f64) -> AppResult<NutritionGoals> {
        validate_weight(weight_kg)?;

        let entry = WeightEntry {
            weight_kg,
            recorded_at: self.clock.now(),
        };
        self.store.append_weight(user_id, entry).await?;

        let raw = self.store.load_biometrics(user_id).await?;
        let goals = self.calculator.compute_from_raw(&raw, weight_kg);
        self.store.merge_goals(user_id, &goals).await?;
        info!(
            calorie_goal = goals.calorie_goal,
            weight_kg, "Recorded weight and updated nutrition goals"
        );
        Ok(goals)
    }
}
