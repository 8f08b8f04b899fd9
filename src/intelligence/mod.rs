// ABOUTME: Nutrition intelligence module for goal calculation and serving adjustment
// ABOUTME: Pure, synchronous calculators with no shared state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Intelligence Module
//!
//! Pure nutrition math. Everything here is synchronous and side-effect free,
//! so it can be called from any task without locking.

/// Daily calorie and macro goals from biometrics
pub mod goal_calculator;
/// Serving-size scaling of food macros
pub mod serving_adjuster;

pub use goal_calculator::{
    activity_multiplier, apply_goal, calculate_bmr, calculate_tdee, compute_breakdown,
    compute_goals, resolve_biometrics, split_macros, GoalBreakdown, GoalCalculator,
};
pub use serving_adjuster::{
    adjust, adjust_grams_text, adjust_servings, parse_grams_input, round_one_decimal,
    ServingInput, ServingSession, ServingStepper,
};
