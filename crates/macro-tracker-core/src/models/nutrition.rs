// ABOUTME: Nutrition record, adjusted macro, and daily goal models
// ABOUTME: NutritionRecord, ServingDescriptor, AdjustedMacros, and NutritionGoals definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};

/// How a nutrition record's base quantity is expressed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServingDescriptor {
    /// Discrete serving unit (branded foods), e.g. 1 bar, 2 cookies
    Unit {
        /// Amount per serving
        quantity: f64,
        /// Unit label (bar, cup, oz, ...)
        unit: String,
    },
    /// Mass reference (generic foods), macros are per `base_grams`
    Grams {
        /// Reference mass, normally 100 g
        base_grams: f64,
    },
}

/// A food's macros per serving, as fetched from an external source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NutritionRecord {
    /// Food name
    pub name: String,
    /// Brand name for branded foods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Calories (kcal) per serving
    pub calories: f64,
    /// Protein (g) per serving
    pub protein: f64,
    /// Fat (g) per serving
    pub fat: f64,
    /// Carbohydrates (g) per serving
    pub carbs: f64,
    /// Serving the macros refer to
    pub serving: ServingDescriptor,
}

impl NutritionRecord {
    /// Whether the record carries a brand identity
    #[must_use]
    pub fn is_branded(&self) -> bool {
        self.brand.as_deref().is_some_and(|b| !b.trim().is_empty())
    }
}

/// Macros after serving adjustment, rounded to one decimal
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AdjustedMacros {
    /// Calories (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Fat (g)
    pub fat: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
}

/// Daily calorie and macro targets derived from biometrics
///
/// Serialized with the profile document's field names so it can be merged
/// directly into the user record.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionGoals {
    /// Daily calorie target (kcal)
    pub calorie_goal: i64,
    /// Protein target (g)
    pub protein: f64,
    /// Fat target (g)
    pub fats: f64,
    /// Carbohydrate target (g)
    pub carbs: f64,
}
