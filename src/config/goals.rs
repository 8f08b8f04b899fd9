// ABOUTME: Nutrition goal configuration for BMR, TDEE, goal adjustment, and macro split
// ABOUTME: Also carries the fallback biometrics applied to incomplete profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Nutrition Goal Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology

use super::error::ConfigError;
use macro_tracker_core::constants::nutrition::{
    ACTIVITY_ACTIVE, ACTIVITY_LOW_ACTIVE, ACTIVITY_MODERATE, ACTIVITY_SEDENTARY,
    ACTIVITY_VERY_ACTIVE, CARBS_CALORIE_SHARE, DEFAULT_AGE_YEARS, DEFAULT_HEIGHT_CM,
    FAT_CALORIE_SHARE, GOAL_GAIN_FACTOR, GOAL_LOSE_FACTOR, KCAL_PER_G_CARBS, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN, MSJ_AGE_COEF, MSJ_FEMALE_CONSTANT, MSJ_HEIGHT_COEF, MSJ_MALE_CONSTANT,
    MSJ_WEIGHT_COEF, PROTEIN_CALORIE_SHARE,
};
use macro_tracker_core::models::{ActivityLevel, Gender, WeightGoal};
use serde::{Deserialize, Serialize};

/// Tolerance when checking that calorie shares sum to 1.0
const SHARE_SUM_TOLERANCE: f64 = 1e-9;

/// Complete goal calculation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoalConfig {
    /// Basal Metabolic Rate (BMR) formula coefficients
    pub bmr: BmrConfig,
    /// Activity factor multipliers for TDEE calculation
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie adjustment per weight goal
    pub goal_adjustments: GoalAdjustmentConfig,
    /// Calorie share and energy density per macronutrient
    pub macro_split: MacroSplitConfig,
    /// Values substituted for missing profile fields
    pub defaults: BiometricDefaults,
}

/// BMR (Basal Metabolic Rate) Mifflin-St Jeor coefficients
///
/// Formula: BMR = (10 x `weight_kg`) + (6.25 x `height_cm`) - (5 x age) + `gender_constant`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Low-active: 1.375
    pub low_active: f64,
    /// Moderate: 1.55, also used when the level is unknown
    pub moderate: f64,
    /// Active: 1.725
    pub active: f64,
    /// Very active: 1.9
    pub very_active: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level; `None` means unknown and maps to moderate
    #[must_use]
    pub const fn factor_for(&self, level: Option<ActivityLevel>) -> f64 {
        match level {
            Some(ActivityLevel::Sedentary) => self.sedentary,
            Some(ActivityLevel::LowActive) => self.low_active,
            Some(ActivityLevel::Moderate) | None => self.moderate,
            Some(ActivityLevel::Active) => self.active,
            Some(ActivityLevel::VeryActive) => self.very_active,
        }
    }
}

/// Calorie adjustment applied to TDEE per goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalAdjustmentConfig {
    /// Weight loss factor (0.8 = 20% deficit)
    pub lose_factor: f64,
    /// Weight gain factor (1.15 = 15% surplus)
    pub gain_factor: f64,
}

impl GoalAdjustmentConfig {
    /// Factor applied to TDEE for a goal
    #[must_use]
    pub const fn factor_for(&self, goal: WeightGoal) -> f64 {
        match goal {
            WeightGoal::LoseWeight => self.lose_factor,
            WeightGoal::GainWeight => self.gain_factor,
            WeightGoal::Maintain => 1.0,
        }
    }
}

/// Macro split as calorie shares plus energy densities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacroSplitConfig {
    /// Protein share of calories (0.30)
    pub protein_share: f64,
    /// Fat share of calories (0.30)
    pub fat_share: f64,
    /// Carbohydrate share of calories (0.40)
    pub carbs_share: f64,
    /// Protein kcal per gram (4)
    pub protein_kcal_per_g: f64,
    /// Fat kcal per gram (9)
    pub fat_kcal_per_g: f64,
    /// Carbohydrate kcal per gram (4)
    pub carbs_kcal_per_g: f64,
}

/// Fallback biometrics for incomplete profiles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BiometricDefaults {
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age: u32,
    /// Gender
    pub gender: Gender,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Goal
    pub goal: WeightGoal,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: MSJ_WEIGHT_COEF,
            msj_height_coef: MSJ_HEIGHT_COEF,
            msj_age_coef: MSJ_AGE_COEF,
            msj_male_constant: MSJ_MALE_CONSTANT,
            msj_female_constant: MSJ_FEMALE_CONSTANT,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: ACTIVITY_SEDENTARY,
            low_active: ACTIVITY_LOW_ACTIVE,
            moderate: ACTIVITY_MODERATE,
            active: ACTIVITY_ACTIVE,
            very_active: ACTIVITY_VERY_ACTIVE,
        }
    }
}

impl Default for GoalAdjustmentConfig {
    fn default() -> Self {
        Self {
            lose_factor: GOAL_LOSE_FACTOR,
            gain_factor: GOAL_GAIN_FACTOR,
        }
    }
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            protein_share: PROTEIN_CALORIE_SHARE,
            fat_share: FAT_CALORIE_SHARE,
            carbs_share: CARBS_CALORIE_SHARE,
            protein_kcal_per_g: KCAL_PER_G_PROTEIN,
            fat_kcal_per_g: KCAL_PER_G_FAT,
            carbs_kcal_per_g: KCAL_PER_G_CARBS,
        }
    }
}

impl Default for BiometricDefaults {
    fn default() -> Self {
        Self {
            height_cm: DEFAULT_HEIGHT_CM,
            age: DEFAULT_AGE_YEARS,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
            goal: WeightGoal::Maintain,
        }
    }
}

impl GoalConfig {
    /// Validate formula parameters
    ///
    /// # Errors
    ///
    /// Returns an error if a multiplier or energy density is not a positive finite
    /// number, or the macro calorie shares do not sum to 1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let factors = &self.activity_factors;
        let all_factors = [
            factors.sedentary,
            factors.low_active,
            factors.moderate,
            factors.active,
            factors.very_active,
        ];
        if all_factors.iter().any(|f| !f.is_finite() || *f <= 0.0) {
            return Err(ConfigError::InvalidRange(
                "activity factors must be positive",
            ));
        }

        let goals = &self.goal_adjustments;
        if [goals.lose_factor, goals.gain_factor]
            .iter()
            .any(|f| !f.is_finite() || *f <= 0.0)
        {
            return Err(ConfigError::InvalidRange("goal factors must be positive"));
        }

        let split = &self.macro_split;
        if [
            split.protein_kcal_per_g,
            split.fat_kcal_per_g,
            split.carbs_kcal_per_g,
        ]
        .iter()
        .any(|d| !d.is_finite() || *d <= 0.0)
        {
            return Err(ConfigError::InvalidRange(
                "macro energy densities must be positive",
            ));
        }

        if [split.protein_share, split.fat_share, split.carbs_share]
            .iter()
            .any(|s| !s.is_finite() || *s < 0.0)
        {
            return Err(ConfigError::InvalidRange(
                "macro shares must be finite and not negative",
            ));
        }

        let share_sum = split.protein_share + split.fat_share + split.carbs_share;
        if (share_sum - 1.0).abs() > SHARE_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "macro calorie shares must sum to 1.0",
            ));
        }

        if !self.defaults.height_cm.is_finite() || self.defaults.height_cm <= 0.0 {
            return Err(ConfigError::InvalidRange("default height must be positive"));
        }

        Ok(())
    }
}
