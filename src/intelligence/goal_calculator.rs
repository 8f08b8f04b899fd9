// ABOUTME: Daily calorie and macro goal calculation from user biometrics
// ABOUTME: Mifflin-St Jeor BMR, activity-scaled TDEE, goal adjustment, and 30/30/40 macro split
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Goal Calculator
//!
//! Derives [`NutritionGoals`] from [`UserBiometrics`]. The pipeline is:
//!
//! 1. BMR = 10 x weight + 6.25 x height - 5 x age + (5 male | -161 female)
//! 2. TDEE = BMR x activity factor
//! 3. calorie goal = round(TDEE x goal factor)
//! 4. grams = round(calorie goal x share / kcal per gram) for each macro
//!
//! None of these steps can fail. Incomplete profiles are completed with
//! [`BiometricDefaults`] by [`resolve_biometrics`] before calculation.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use crate::config::{
    ActivityFactorsConfig, BiometricDefaults, BmrConfig, GoalAdjustmentConfig, GoalConfig,
    MacroSplitConfig,
};
use macro_tracker_core::models::{
    ActivityLevel, Gender, NutritionGoals, RawBiometrics, UserBiometrics, WeightGoal,
};
use serde::{Deserialize, Serialize};

/// Intermediate values of a goal calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GoalBreakdown {
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Activity multiplier applied to BMR
    pub activity_multiplier: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: f64,
    /// Goal factor applied to TDEE
    pub goal_factor: f64,
    /// Final rounded goals
    pub goals: NutritionGoals,
}

/// Calculate Basal Metabolic Rate with the Mifflin-St Jeor equation
///
/// No clamping or range checks are applied; callers pass resolved biometrics.
#[must_use]
pub fn calculate_bmr(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &BmrConfig,
) -> f64 {
    let gender_constant = match gender {
        Gender::Male => config.msj_male_constant,
        Gender::Female => config.msj_female_constant,
    };

    config.msj_weight_coef * weight_kg
        + config.msj_height_coef * height_cm
        + config.msj_age_coef * f64::from(age)
        + gender_constant
}

/// Activity multiplier for a level; an unknown level (`None`) uses the moderate factor
#[must_use]
pub const fn activity_multiplier(
    level: Option<ActivityLevel>,
    config: &ActivityFactorsConfig,
) -> f64 {
    config.factor_for(level)
}

/// Calculate Total Daily Energy Expenditure
#[must_use]
pub fn calculate_tdee(
    bmr: f64,
    level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> f64 {
    bmr * config.factor_for(Some(level))
}

/// Apply the weight goal to TDEE, returning unrounded kcal
#[must_use]
pub fn apply_goal(tdee: f64, goal: WeightGoal, config: &GoalAdjustmentConfig) -> f64 {
    tdee * config.factor_for(goal)
}

/// Split a (rounded) calorie goal into whole grams of protein, fat and carbs
#[must_use]
pub fn split_macros(calorie_goal: i64, config: &MacroSplitConfig) -> NutritionGoals {
    // Calorie goals are a few thousand kcal; no precision is lost
    #[allow(clippy::cast_precision_loss)]
    let kcal = calorie_goal as f64;

    NutritionGoals {
        calorie_goal,
        protein: (kcal * config.protein_share / config.protein_kcal_per_g).round(),
        fats: (kcal * config.fat_share / config.fat_kcal_per_g).round(),
        carbs: (kcal * config.carbs_share / config.carbs_kcal_per_g).round(),
    }
}

/// Run the full pipeline and keep every intermediate value
#[must_use]
pub fn compute_breakdown(biometrics: &UserBiometrics, config: &GoalConfig) -> GoalBreakdown {
    let bmr = calculate_bmr(
        biometrics.weight_kg,
        biometrics.height_cm,
        biometrics.age,
        biometrics.gender,
        &config.bmr,
    );
    let activity_multiplier = config
        .activity_factors
        .factor_for(Some(biometrics.activity_level));
    let tdee = calculate_tdee(bmr, biometrics.activity_level, &config.activity_factors);
    let goal_factor = config.goal_adjustments.factor_for(biometrics.goal);

    // Daily energy fits comfortably in i64
    #[allow(clippy::cast_possible_truncation)]
    let calorie_goal = apply_goal(tdee, biometrics.goal, &config.goal_adjustments).round() as i64;

    GoalBreakdown {
        bmr,
        activity_multiplier,
        tdee,
        goal_factor,
        goals: split_macros(calorie_goal, &config.macro_split),
    }
}

/// Compute daily nutrition goals for fully resolved biometrics
#[must_use]
pub fn compute_goals(biometrics: &UserBiometrics, config: &GoalConfig) -> NutritionGoals {
    compute_breakdown(biometrics, config).goals
}

/// Complete a raw profile with fallbacks
///
/// `weight_kg` is supplied by the caller because the recompute path always
/// carries the weight that triggered it. Every other field falls back to
/// `defaults` when missing or unparseable.
#[must_use]
pub fn resolve_biometrics(
    raw: &RawBiometrics,
    weight_kg: f64,
    defaults: &BiometricDefaults,
) -> UserBiometrics {
    UserBiometrics {
        age: raw.age_years().unwrap_or(defaults.age),
        weight_kg,
        height_cm: raw.height_cm().unwrap_or(defaults.height_cm),
        gender: raw.gender().unwrap_or(defaults.gender),
        activity_level: raw.activity_level().unwrap_or(defaults.activity_level),
        goal: raw.goal().unwrap_or(defaults.goal),
    }
}

/// Goal calculator bound to one formula configuration
#[derive(Debug, Clone, Default)]
pub struct GoalCalculator {
    config: GoalConfig,
}

impl GoalCalculator {
    /// Create a calculator with the given configuration
    #[must_use]
    pub const fn new(config: GoalConfig) -> Self {
        Self { config }
    }

    /// Formula configuration in use
    #[must_use]
    pub const fn config(&self) -> &GoalConfig {
        &self.config
    }

    /// Compute goals for resolved biometrics
    #[must_use]
    pub fn compute_goals(&self, biometrics: &UserBiometrics) -> NutritionGoals {
        compute_goals(biometrics, &self.config)
    }

    /// Compute goals and intermediate values
    #[must_use]
    pub fn compute_breakdown(&self, biometrics: &UserBiometrics) -> GoalBreakdown {
        compute_breakdown(biometrics, &self.config)
    }

    /// Resolve a raw profile with this calculator's defaults, then compute goals
    #[must_use]
    pub fn compute_from_raw(&self, raw: &RawBiometrics, weight_kg: f64) -> NutritionGoals {
        let biometrics = resolve_biometrics(raw, weight_kg, &self.config.defaults);
        self.compute_goals(&biometrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bmr_has_no_floor() {
        let bmr = calculate_bmr(20.0, 100.0, 80, Gender::Female, &BmrConfig::default());
        // 200 + 625 - 400 - 161
        assert!((bmr - 264.0).abs() < 1e-9);
    }

    #[test]
    fn test_resolve_fills_every_missing_field() {
        let resolved = resolve_biometrics(
            &RawBiometrics::default(),
            82.0,
            &BiometricDefaults::default(),
        );
        assert_eq!(resolved.age, 30);
        assert!((resolved.height_cm - 175.0).abs() < f64::EPSILON);
        assert_eq!(resolved.gender, Gender::Male);
        assert_eq!(resolved.activity_level, ActivityLevel::Moderate);
        assert_eq!(resolved.goal, WeightGoal::Maintain);
        assert!((resolved.weight_kg - 82.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resolve_ignores_garbage_labels() {
        let raw: RawBiometrics = serde_json::from_value(json!({
            "gender": "other",
            "activityLevel": "couch potato",
            "goal": "bulk"
        }))
        .unwrap();
        let resolved = resolve_biometrics(&raw, 70.0, &BiometricDefaults::default());
        assert_eq!(resolved.gender, Gender::Male);
        assert_eq!(resolved.activity_level, ActivityLevel::Moderate);
        assert_eq!(resolved.goal, WeightGoal::Maintain);
    }
}
