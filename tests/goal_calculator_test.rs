// ABOUTME: Algorithm tests for daily calorie and macro goal calculation
// ABOUTME: Covers BMR constants, activity table, goal factors, macro split, and profile fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macro_tracker::config::{
    ActivityFactorsConfig, BiometricDefaults, BmrConfig, GoalAdjustmentConfig, GoalConfig,
    MacroSplitConfig,
};
use macro_tracker::intelligence::{
    activity_multiplier, apply_goal, calculate_bmr, calculate_tdee, compute_breakdown,
    compute_goals, resolve_biometrics, split_macros, GoalCalculator,
};
use macro_tracker::models::{
    ActivityLevel, Gender, NutritionGoals, RawBiometrics, UserBiometrics, WeightGoal,
};
use serde_json::json;

mod common;

fn biometrics(
    weight_kg: f64,
    gender: Gender,
    activity_level: ActivityLevel,
    goal: WeightGoal,
) -> UserBiometrics {
    UserBiometrics {
        age: 30,
        weight_kg,
        height_cm: 175.0,
        gender,
        activity_level,
        goal,
    }
}

fn macro_kcal(goals: &NutritionGoals) -> f64 {
    goals.protein * 4.0 + goals.fats * 9.0 + goals.carbs * 4.0
}

// ============================================================================
// BMR - Mifflin-St Jeor
// ============================================================================

#[test]
fn test_bmr_male_constant() {
    let bmr = calculate_bmr(70.0, 175.0, 30, Gender::Male, &BmrConfig::default());
    // 700 + 1093.75 - 150 + 5
    assert!((bmr - 1648.75).abs() < 1e-9);
}

#[test]
fn test_bmr_female_constant() {
    let bmr = calculate_bmr(60.0, 165.0, 25, Gender::Female, &BmrConfig::default());
    // 600 + 1031.25 - 125 - 161
    assert!((bmr - 1345.25).abs() < 1e-9);
}

#[test]
fn test_bmr_gender_gap_is_166() {
    let config = BmrConfig::default();
    for (w, h, a) in [(50.0, 150.0, 20), (70.0, 175.0, 30), (110.0, 195.0, 65)] {
        let male = calculate_bmr(w, h, a, Gender::Male, &config);
        let female = calculate_bmr(w, h, a, Gender::Female, &config);
        assert!((male - female - 166.0).abs() < 1e-9);
    }
}

// ============================================================================
// Activity multipliers and goal factors
// ============================================================================

#[test]
fn test_activity_table_is_exact() {
    let factors = ActivityFactorsConfig::default();
    let table = [
        (ActivityLevel::Sedentary, 1.2),
        (ActivityLevel::LowActive, 1.375),
        (ActivityLevel::Moderate, 1.55),
        (ActivityLevel::Active, 1.725),
        (ActivityLevel::VeryActive, 1.9),
    ];
    for (level, expected) in table {
        assert!((activity_multiplier(Some(level), &factors) - expected).abs() < f64::EPSILON);
        assert!((calculate_tdee(1000.0, level, &factors) - 1000.0 * expected).abs() < 1e-9);
    }
}

#[test]
fn test_unknown_activity_defaults_to_moderate() {
    let factors = ActivityFactorsConfig::default();
    assert!((activity_multiplier(None, &factors) - 1.55).abs() < f64::EPSILON);

    let raw: RawBiometrics = serde_json::from_value(json!({ "activityLevel": "marathoner" })).unwrap();
    let resolved = resolve_biometrics(&raw, 70.0, &BiometricDefaults::default());
    let breakdown = compute_breakdown(&resolved, &GoalConfig::default());
    assert!((breakdown.activity_multiplier - 1.55).abs() < f64::EPSILON);
}

#[test]
fn test_goal_factors() {
    let config = GoalAdjustmentConfig::default();
    assert!((apply_goal(2000.0, WeightGoal::LoseWeight, &config) - 1600.0).abs() < 1e-9);
    assert!((apply_goal(2000.0, WeightGoal::GainWeight, &config) - 2300.0).abs() < 1e-9);
    assert!((apply_goal(2000.0, WeightGoal::Maintain, &config) - 2000.0).abs() < 1e-9);
}

#[test]
fn test_calorie_goal_is_rounded_adjusted_tdee() {
    let config = GoalConfig::default();
    for goal in [WeightGoal::LoseWeight, WeightGoal::Maintain, WeightGoal::GainWeight] {
        for level in [ActivityLevel::Sedentary, ActivityLevel::Active, ActivityLevel::VeryActive] {
            let bio = biometrics(77.3, Gender::Female, level, goal);
            let breakdown = compute_breakdown(&bio, &config);
            let factor = match goal {
                WeightGoal::LoseWeight => 0.8,
                WeightGoal::GainWeight => 1.15,
                WeightGoal::Maintain => 1.0,
            };
            #[allow(clippy::cast_possible_truncation)]
            let expected = (breakdown.tdee * factor).round() as i64;
            assert_eq!(breakdown.goals.calorie_goal, expected);
        }
    }
}

// ============================================================================
// Macro split
// ============================================================================

#[test]
fn test_split_macros_uses_rounded_calories() {
    let goals = split_macros(2000, &MacroSplitConfig::default());
    assert_eq!(goals.calorie_goal, 2000);
    assert!((goals.protein - 150.0).abs() < f64::EPSILON);
    assert!((goals.fats - 67.0).abs() < f64::EPSILON);
    assert!((goals.carbs - 200.0).abs() < f64::EPSILON);
}

#[test]
fn test_macro_calories_track_goal_within_rounding() {
    let config = GoalConfig::default();
    for weight in [45.0, 58.5, 70.0, 72.5, 90.0, 120.0, 150.0] {
        for gender in [Gender::Male, Gender::Female] {
            for goal in [WeightGoal::LoseWeight, WeightGoal::Maintain, WeightGoal::GainWeight] {
                let goals = compute_goals(
                    &biometrics(weight, gender, ActivityLevel::Active, goal),
                    &config,
                );
                #[allow(clippy::cast_precision_loss)]
                let diff = (macro_kcal(&goals) - goals.calorie_goal as f64).abs();
                assert!(diff <= 8.5, "macro kcal off by {diff} for {weight} kg");
            }
        }
    }
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn test_seventy_kg_male_moderate_lose() {
    let breakdown = compute_breakdown(
        &biometrics(70.0, Gender::Male, ActivityLevel::Moderate, WeightGoal::LoseWeight),
        &GoalConfig::default(),
    );
    assert!((breakdown.bmr - 1648.75).abs() < 1e-9);
    assert!((breakdown.tdee - 2555.5625).abs() < 1e-9);
    assert_eq!(
        breakdown.goals,
        NutritionGoals {
            calorie_goal: 2044,
            protein: 153.0,
            fats: 68.0,
            carbs: 204.0,
        }
    );
}

#[test]
fn test_bmr_1673_75_yields_2075_kcal_split() {
    let breakdown = compute_breakdown(
        &biometrics(72.5, Gender::Male, ActivityLevel::Moderate, WeightGoal::LoseWeight),
        &GoalConfig::default(),
    );
    assert!((breakdown.bmr - 1673.75).abs() < 1e-9);
    assert!((breakdown.tdee - 2594.3125).abs() < 1e-9);
    assert_eq!(
        breakdown.goals,
        NutritionGoals {
            calorie_goal: 2075,
            protein: 156.0,
            fats: 69.0,
            carbs: 208.0,
        }
    );
    #[allow(clippy::cast_precision_loss)]
    let diff = (macro_kcal(&breakdown.goals) - 2075.0).abs();
    assert!(diff <= 3.0);
}

#[test]
fn test_female_sedentary_maintain() {
    let bio = UserBiometrics {
        age: 25,
        weight_kg: 60.0,
        height_cm: 165.0,
        gender: Gender::Female,
        activity_level: ActivityLevel::Sedentary,
        goal: WeightGoal::Maintain,
    };
    let goals = compute_goals(&bio, &GoalConfig::default());
    assert_eq!(goals.calorie_goal, 1614);
    assert!((goals.protein - 121.0).abs() < f64::EPSILON);
    assert!((goals.fats - 54.0).abs() < f64::EPSILON);
    assert!((goals.carbs - 161.0).abs() < f64::EPSILON);
}

// ============================================================================
// Raw profiles and fallbacks
// ============================================================================

#[test]
fn test_raw_profile_with_strings_matches_typed() {
    let raw: RawBiometrics = serde_json::from_value(json!({
        "age": "30",
        "height": 175,
        "gender": "Male",
        "activityLevel": "Moderate",
        "goal": "lose weight"
    }))
    .unwrap();

    let calculator = GoalCalculator::default();
    let from_raw = calculator.compute_from_raw(&raw, 72.5);
    assert_eq!(from_raw.calorie_goal, 2075);
}

#[test]
fn test_empty_profile_uses_documented_defaults() {
    let calculator = GoalCalculator::new(GoalConfig::default());
    let from_empty = calculator.compute_from_raw(&RawBiometrics::default(), 70.0);
    let explicit = calculator.compute_goals(&biometrics(
        70.0,
        Gender::Male,
        ActivityLevel::Moderate,
        WeightGoal::Maintain,
    ));
    assert_eq!(from_empty, explicit);
    assert_eq!(from_empty.calorie_goal, 2556);
}

#[test]
fn test_custom_defaults_are_applied() {
    let config = GoalConfig {
        defaults: BiometricDefaults {
            height_cm: 160.0,
            age: 50,
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            goal: WeightGoal::LoseWeight,
        },
        ..GoalConfig::default()
    };
    let resolved = resolve_biometrics(&RawBiometrics::default(), 65.0, &config.defaults);
    assert_eq!(resolved.gender, Gender::Female);
    assert_eq!(resolved.goal, WeightGoal::LoseWeight);

    // 650 + 1000 - 250 - 161 = 1239; x1.2 = 1486.8; x0.8 = 1189.44
    let goals = GoalCalculator::new(config).compute_from_raw(&RawBiometrics::default(), 65.0);
    assert_eq!(goals.calorie_goal, 1189);
}
