// ABOUTME: Nutrition constants for BMR, TDEE, goal adjustment, and macro split
// ABOUTME: Fallback biometrics applied when a profile is incomplete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Mifflin-St Jeor coefficients (Mifflin et al. 1990, DOI: 10.1093/ajcn/51.2.241)
//! and the activity multipliers from `McArdle` et al. (2010).

/// Mifflin-St Jeor weight coefficient
pub const MSJ_WEIGHT_COEF: f64 = 10.0;
/// Mifflin-St Jeor height coefficient
pub const MSJ_HEIGHT_COEF: f64 = 6.25;
/// Mifflin-St Jeor age coefficient
pub const MSJ_AGE_COEF: f64 = -5.0;
/// Mifflin-St Jeor male constant
pub const MSJ_MALE_CONSTANT: f64 = 5.0;
/// Mifflin-St Jeor female constant
pub const MSJ_FEMALE_CONSTANT: f64 = -161.0;

/// Sedentary activity multiplier
pub const ACTIVITY_SEDENTARY: f64 = 1.2;
/// Low-active activity multiplier
pub const ACTIVITY_LOW_ACTIVE: f64 = 1.375;
/// Moderate activity multiplier (also used for unknown levels)
pub const ACTIVITY_MODERATE: f64 = 1.55;
/// Active activity multiplier
pub const ACTIVITY_ACTIVE: f64 = 1.725;
/// Very active activity multiplier
pub const ACTIVITY_VERY_ACTIVE: f64 = 1.9;

/// Calorie factor applied for a weight-loss goal
pub const GOAL_LOSE_FACTOR: f64 = 0.8;
/// Calorie factor applied for a weight-gain goal
pub const GOAL_GAIN_FACTOR: f64 = 1.15;

/// Share of calories from protein
pub const PROTEIN_CALORIE_SHARE: f64 = 0.30;
/// Share of calories from fat
pub const FAT_CALORIE_SHARE: f64 = 0.30;
/// Share of calories from carbohydrates
pub const CARBS_CALORIE_SHARE: f64 = 0.40;

/// Energy density of protein (kcal/g)
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Energy density of fat (kcal/g)
pub const KCAL_PER_G_FAT: f64 = 9.0;
/// Energy density of carbohydrates (kcal/g)
pub const KCAL_PER_G_CARBS: f64 = 4.0;

/// Fallback height when the profile has none (cm)
pub const DEFAULT_HEIGHT_CM: f64 = 175.0;
/// Fallback age when the profile has none (years)
pub const DEFAULT_AGE_YEARS: u32 = 30;

/// Reference mass for generic (per 100 g) nutrition records
pub const GENERIC_BASE_GRAMS: f64 = 100.0;

/// Upper bound accepted for a logged body weight (kg)
pub const MAX_BODY_WEIGHT_KG: f64 = 635.0;
