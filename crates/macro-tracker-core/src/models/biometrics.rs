// ABOUTME: User biometrics models with lenient parsing from profile documents
// ABOUTME: Gender, ActivityLevel, WeightGoal, UserBiometrics, and RawBiometrics definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gender for BMR calculations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male (+5 kcal constant)
    #[default]
    Male,
    /// Female (-161 kcal constant)
    Female,
}

impl Gender {
    /// Parse gender from a profile string, `None` when unrecognized
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "man" => Some(Self::Male),
            "female" | "f" | "woman" => Some(Self::Female),
            _ => None,
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LowActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Physical job or twice-daily training
    VeryActive,
}

impl ActivityLevel {
    /// Parse activity level from a profile string, `None` when unrecognized
    ///
    /// Separators are normalized so "Low Active", "low_active" and "low-active"
    /// all resolve to the same level.
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '_' { '-' } else { c })
            .collect();
        match normalized.as_str() {
            "sedentary" => Some(Self::Sedentary),
            "low-active" | "lightly-active" | "light" => Some(Self::LowActive),
            "moderate" | "moderately-active" => Some(Self::Moderate),
            "active" => Some(Self::Active),
            "very-active" | "extra-active" => Some(Self::VeryActive),
            _ => None,
        }
    }
}

/// Weight goal driving the calorie adjustment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeightGoal {
    /// Caloric deficit
    LoseWeight,
    /// Caloric balance
    #[default]
    Maintain,
    /// Caloric surplus
    GainWeight,
}

impl WeightGoal {
    /// Parse a goal from a profile string, `None` when unrecognized
    #[must_use]
    pub fn from_str_lossy(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('_', " ").as_str() {
            "lose weight" | "lose" | "weight loss" => Some(Self::LoseWeight),
            "maintain weight" | "maintain" | "maintenance" => Some(Self::Maintain),
            "gain weight" | "gain" | "weight gain" => Some(Self::GainWeight),
            _ => None,
        }
    }
}

/// Fully resolved biometrics used by the goal calculator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UserBiometrics {
    /// Age in years
    pub age: u32,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Gender for the BMR constant
    pub gender: Gender,
    /// Activity level for the TDEE multiplier
    pub activity_level: ActivityLevel,
    /// Weight goal for the calorie adjustment
    pub goal: WeightGoal,
}

/// Biometrics exactly as stored in a profile document
///
/// Every field is optional and untyped: onboarding screens have written numbers,
/// numeric strings and free-text enum labels over time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawBiometrics {
    /// Age (number or numeric string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<Value>,
    /// Weight in kg (number or numeric string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Value>,
    /// Height in cm (number or numeric string)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Value>,
    /// Gender label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Activity level label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    /// Goal label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl RawBiometrics {
    /// Age as a whole number of years, if present and sane
    #[must_use]
    pub fn age_years(&self) -> Option<u32> {
        let age = self.age.as_ref().and_then(lenient_f64)?;
        (age >= 0.0 && age <= f64::from(u32::MAX)).then(|| age.round() as u32)
    }

    /// Weight in kilograms, if present and positive
    #[must_use]
    pub fn weight_kg(&self) -> Option<f64> {
        self.weight
            .as_ref()
            .and_then(lenient_f64)
            .filter(|w| *w > 0.0)
    }

    /// Height in centimeters, if present and positive
    #[must_use]
    pub fn height_cm(&self) -> Option<f64> {
        self.height
            .as_ref()
            .and_then(lenient_f64)
            .filter(|h| *h > 0.0)
    }

    /// Parsed gender, if recognized
    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        self.gender.as_deref().and_then(Gender::from_str_lossy)
    }

    /// Parsed activity level, if recognized
    #[must_use]
    pub fn activity_level(&self) -> Option<ActivityLevel> {
        self.activity_level
            .as_deref()
            .and_then(ActivityLevel::from_str_lossy)
    }

    /// Parsed goal, if recognized
    #[must_use]
    pub fn goal(&self) -> Option<WeightGoal> {
        self.goal.as_deref().and_then(WeightGoal::from_str_lossy)
    }
}

/// Read a finite number from a JSON number or numeric string
fn lenient_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}
