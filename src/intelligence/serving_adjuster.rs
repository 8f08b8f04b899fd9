// ABOUTME: Serving-size scaling of a food's macros for branded and generic records
// ABOUTME: Branded foods scale by whole servings, generic foods by grams over a 100 g base
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Serving Adjuster
//!
//! A record with a brand is quantified in whole servings (floor of one); a
//! record without one is quantified by mass against its gram base. Every
//! output field is rounded to one decimal independently.
//!
//! [`ServingSession`] keeps the current input for a food being logged and
//! recomputes all four fields on each change.

use macro_tracker_core::constants::nutrition::GENERIC_BASE_GRAMS;
use macro_tracker_core::models::{AdjustedMacros, NutritionRecord, ServingDescriptor};
use serde::{Deserialize, Serialize};

/// Quantity the user picked for a food
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", content = "amount", rename_all = "snake_case")]
pub enum ServingInput {
    /// Whole servings of a branded food; zero is treated as one
    Servings(u32),
    /// Grams of a generic food; negative or non-finite is treated as zero
    Grams(f64),
}

impl ServingInput {
    /// Default input for a record: one serving if branded, 100 g otherwise
    #[must_use]
    pub fn initial_for(record: &NutritionRecord) -> Self {
        if record.is_branded() {
            Self::Servings(1)
        } else {
            Self::Grams(GENERIC_BASE_GRAMS)
        }
    }
}

/// Round to one decimal place
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Parse free-text grams, yielding 0 for anything that is not a non-negative number
#[must_use]
pub fn parse_grams_input(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|g| g.is_finite() && *g >= 0.0)
        .unwrap_or(0.0)
}

/// Reference mass for a generic record
fn base_grams(record: &NutritionRecord) -> f64 {
    match record.serving {
        ServingDescriptor::Grams { base_grams } if base_grams > 0.0 => base_grams,
        _ => GENERIC_BASE_GRAMS,
    }
}

/// Multiplier applied to the base macros
fn scale_factor(record: &NutritionRecord, input: ServingInput) -> f64 {
    match input {
        ServingInput::Servings(count) => f64::from(count.max(1)),
        ServingInput::Grams(grams) => {
            let grams = if grams.is_finite() { grams.max(0.0) } else { 0.0 };
            grams / base_grams(record)
        }
    }
}

/// Scale a record's macros for the given input
#[must_use]
pub fn adjust(base: &NutritionRecord, input: ServingInput) -> AdjustedMacros {
    let factor = scale_factor(base, input);
    AdjustedMacros {
        calories: round_one_decimal(base.calories * factor),
        protein: round_one_decimal(base.protein * factor),
        fat: round_one_decimal(base.fat * factor),
        carbs: round_one_decimal(base.carbs * factor),
    }
}

/// Branded mode: scale by a whole number of servings
#[must_use]
pub fn adjust_servings(base: &NutritionRecord, servings: u32) -> AdjustedMacros {
    adjust(base, ServingInput::Servings(servings))
}

/// Generic mode: scale by grams typed as free text
#[must_use]
pub fn adjust_grams_text(base: &NutritionRecord, grams_text: &str) -> AdjustedMacros {
    adjust(base, ServingInput::Grams(parse_grams_input(grams_text)))
}

/// Serving count with a floor of one, moved in steps of one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServingStepper {
    count: u32,
}

impl Default for ServingStepper {
    fn default() -> Self {
        Self { count: 1 }
    }
}

impl ServingStepper {
    /// Start at `count`, clamped to at least one
    #[must_use]
    pub fn new(count: u32) -> Self {
        Self {
            count: count.max(1),
        }
    }

    /// Current count
    #[must_use]
    pub const fn count(self) -> u32 {
        self.count
    }

    /// Add one serving
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// Remove one serving, never going below one
    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1).max(1);
    }
}

/// Current adjustment state for one food being logged
#[derive(Debug, Clone)]
pub struct ServingSession {
    base: NutritionRecord,
    input: ServingInput,
}

impl ServingSession {
    /// Start a session at the record's initial quantity
    #[must_use]
    pub fn new(base: NutritionRecord) -> Self {
        let input = ServingInput::initial_for(&base);
        Self { base, input }
    }

    /// Unadjusted record
    #[must_use]
    pub const fn base(&self) -> &NutritionRecord {
        &self.base
    }

    /// Current input
    #[must_use]
    pub const fn input(&self) -> ServingInput {
        self.input
    }

    /// Set the serving count (branded records)
    pub fn set_servings(&mut self, stepper: ServingStepper) -> AdjustedMacros {
        self.input = ServingInput::Servings(stepper.count());
        self.adjusted()
    }

    /// Set grams from free text (generic records)
    pub fn set_grams_text(&mut self, text: &str) -> AdjustedMacros {
        self.input = ServingInput::Grams(parse_grams_input(text));
        self.adjusted()
    }

    /// Macros for the current input
    #[must_use]
    pub fn adjusted(&self) -> AdjustedMacros {
        adjust(&self.base, self.input)
    }
}
