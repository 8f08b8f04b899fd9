// ABOUTME: Core data models for biometrics, nutrition records, goals, and weight entries
// ABOUTME: Shared by the goal calculator, serving adjuster, and profile services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// User biometrics and their loosely-typed profile form
pub mod biometrics;
/// Nutrition records, adjusted macros, and derived goals
pub mod nutrition;
/// Weight log entries
pub mod weight;

pub use biometrics::{ActivityLevel, Gender, RawBiometrics, UserBiometrics, WeightGoal};
pub use nutrition::{AdjustedMacros, NutritionGoals, NutritionRecord, ServingDescriptor};
pub use weight::WeightEntry;
