// ABOUTME: Tests for goal recomputation on profile changes and weight logging
// ABOUTME: Uses the in-memory profile store and a manual clock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::Duration;
use macro_tracker::clock::ManualClock;
use macro_tracker::errors::ErrorCode;
use macro_tracker::intelligence::GoalCalculator;
use macro_tracker::models::{NutritionGoals, RawBiometrics};
use macro_tracker::services::{validate_weight, GoalService, InMemoryProfileStore};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

mod common;

use common::{init_test_logging, t0};

struct Fixture {
    service: GoalService,
    store: InMemoryProfileStore,
    clock: Arc<ManualClock>,
    user_id: Uuid,
}

async fn fixture(profile: serde_json::Value) -> Fixture {
    init_test_logging();
    let store = InMemoryProfileStore::new();
    let clock = Arc::new(ManualClock::new(t0()));
    let user_id = Uuid::new_v4();

    let raw: RawBiometrics = serde_json::from_value(profile).unwrap();
    store.upsert_biometrics(user_id, raw).await;

    let service = GoalService::new(
        Arc::new(store.clone()),
        GoalCalculator::default(),
        clock.clone(),
    );
    Fixture {
        service,
        store,
        clock,
        user_id,
    }
}

fn male_moderate_lose() -> serde_json::Value {
    json!({
        "age": 30,
        "height": 175,
        "gender": "male",
        "activityLevel": "moderate",
        "goal": "lose weight"
    })
}

#[tokio::test]
async fn test_record_weight_recomputes_and_merges_goals() {
    let f = fixture(male_moderate_lose()).await;

    let goals = f.service.record_weight(f.user_id, 72.5).await.unwrap();
    assert_eq!(
        goals,
        NutritionGoals {
            calorie_goal: 2075,
            protein: 156.0,
            fats: 69.0,
            carbs: 208.0,
        }
    );
    assert_eq!(f.store.goals(f.user_id).await, Some(goals));

    let weights = f.store.weights(f.user_id).await;
    assert_eq!(weights.len(), 1);
    assert_eq!(weights[0].recorded_at, t0());
}

#[tokio::test]
async fn test_latest_weight_wins_on_recompute() {
    let f = fixture(male_moderate_lose()).await;

    f.service.record_weight(f.user_id, 80.0).await.unwrap();
    f.clock.advance(Duration::days(7));
    f.service.record_weight(f.user_id, 70.0).await.unwrap();

    let goals = f.service.recompute_goals(f.user_id).await.unwrap();
    assert_eq!(goals.calorie_goal, 2044);
    assert_eq!(f.store.weights(f.user_id).await.len(), 2);
}

#[tokio::test]
async fn test_recompute_uses_profile_weight_without_log() {
    let mut profile = male_moderate_lose();
    profile["weight"] = json!("72.5");
    let f = fixture(profile).await;

    let goals = f.service.recompute_goals(f.user_id).await.unwrap();
    assert_eq!(goals.calorie_goal, 2075);
    assert_eq!(f.store.goals(f.user_id).await, Some(goals));
}

#[tokio::test]
async fn test_recompute_without_weight_fails() {
    let f = fixture(male_moderate_lose()).await;

    let err = f.service.recompute_goals(f.user_id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert_eq!(f.store.goals(f.user_id).await, None);
}

#[tokio::test]
async fn test_invalid_weights_are_rejected_before_writing() {
    let f = fixture(male_moderate_lose()).await;

    for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = f.service.record_weight(f.user_id, weight).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "weight {weight}");
    }
    let err = f.service.record_weight(f.user_id, 700.0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    assert!(f.store.weights(f.user_id).await.is_empty());
    assert_eq!(f.store.goals(f.user_id).await, None);
}

#[test]
fn test_weight_bounds() {
    assert!(validate_weight(0.1).is_ok());
    assert!(validate_weight(635.0).is_ok());
    assert_eq!(
        validate_weight(635.1).unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let f = fixture(male_moderate_lose()).await;
    let stranger = Uuid::new_v4();

    let err = f.service.record_weight(stranger, 70.0).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    let err = f.service.recompute_goals(stranger).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}
