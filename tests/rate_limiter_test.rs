// ABOUTME: Tests for the serializing LLM rate limiter under paused Tokio time
// ABOUTME: Covers the rolling per-minute cap, FIFO order, inter-request delay, and failure isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use macro_tracker::config::LlmRateLimitConfig;
use macro_tracker::errors::{AppError, AppResult, ErrorCode};
use macro_tracker::rate_limiting::RateLimiter;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

mod common;

use common::{init_test_logging, EventLog};

type StartLog = Arc<EventLog<(usize, Duration)>>;

fn schedule_recorded(
    limiter: &RateLimiter,
    log: &StartLog,
    base: Instant,
    id: usize,
) -> impl std::future::Future<Output = AppResult<usize>> {
    let log = Arc::clone(log);
    limiter.schedule(move || async move {
        log.push((id, base.elapsed()));
        Ok(id)
    })
}

async fn exploding_task() -> AppResult<usize> {
    panic!("task blew up")
}

#[tokio::test(start_paused = true)]
async fn test_twelve_tasks_respect_five_per_minute() {
    init_test_logging();
    let limiter = RateLimiter::default();
    let log: StartLog = Arc::new(EventLog::default());
    let base = Instant::now();

    let pending: Vec<_> = (0..12)
        .map(|id| schedule_recorded(&limiter, &log, base, id))
        .collect();
    for (id, fut) in pending.into_iter().enumerate() {
        assert_eq!(fut.await.unwrap(), id);
    }

    let starts = log.snapshot();
    let ids: Vec<usize> = starts.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, (0..12).collect::<Vec<_>>());

    let secs: Vec<u64> = starts.iter().map(|(_, at)| at.as_secs()).collect();
    assert_eq!(secs, [0, 1, 2, 3, 4, 60, 61, 62, 63, 64, 120, 121]);

    // Any six consecutive starts span at least one full window
    for pair in starts.windows(6) {
        assert!(pair[5].1 - pair[0].1 >= Duration::from_secs(60));
    }
}

#[tokio::test(start_paused = true)]
async fn test_inter_request_delay_spaces_tasks() {
    let limiter = RateLimiter::new(LlmRateLimitConfig {
        max_requests_per_window: 100,
        window: Duration::from_secs(60),
        inter_request_delay: Duration::from_millis(250),
    });
    let log: StartLog = Arc::new(EventLog::default());
    let base = Instant::now();

    let pending: Vec<_> = (0..3)
        .map(|id| schedule_recorded(&limiter, &log, base, id))
        .collect();
    for fut in pending {
        fut.await.unwrap();
    }

    let millis: Vec<u128> = log.snapshot().iter().map(|(_, at)| at.as_millis()).collect();
    assert_eq!(millis, [0, 250, 500]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_task_does_not_stop_queue() {
    init_test_logging();
    let limiter = RateLimiter::default();
    let log: StartLog = Arc::new(EventLog::default());
    let base = Instant::now();

    let first = schedule_recorded(&limiter, &log, base, 0);
    let failing = limiter.schedule(|| async {
        Err::<usize, _>(AppError::external_service("llm", "HTTP 500: upstream"))
    });
    let third = schedule_recorded(&limiter, &log, base, 2);

    assert_eq!(first.await.unwrap(), 0);
    let err = failing.await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert_eq!(third.await.unwrap(), 2);

    let ids: Vec<usize> = log.snapshot().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, [0, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_panicking_task_reports_internal_error() {
    let limiter = RateLimiter::default();
    let log: StartLog = Arc::new(EventLog::default());
    let base = Instant::now();

    let exploding = limiter.schedule(exploding_task);
    let after = schedule_recorded(&limiter, &log, base, 1);

    let err = exploding.await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InternalError);
    assert_eq!(after.await.unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dropped_caller_does_not_cancel_task() {
    let limiter = RateLimiter::default();
    let log: StartLog = Arc::new(EventLog::default());
    let base = Instant::now();

    drop(schedule_recorded(&limiter, &log, base, 0));
    schedule_recorded(&limiter, &log, base, 1).await.unwrap();

    let ids: Vec<usize> = log.snapshot().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, [0, 1]);
}

#[tokio::test(start_paused = true)]
async fn test_drainer_goes_idle_when_queue_empties() {
    let limiter = RateLimiter::default();
    assert!(!limiter.is_processing());

    let pending: Vec<_> = (0..3_usize)
        .map(|i| limiter.schedule(move || async move { Ok(i) }))
        .collect();
    assert!(limiter.is_processing());
    assert_eq!(limiter.pending(), 3);

    for fut in pending {
        fut.await.unwrap();
    }
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert!(!limiter.is_processing());
    assert_eq!(limiter.pending(), 0);

    // A new task after idling starts a fresh drainer
    assert_eq!(
        limiter.schedule(|| async { Ok(7_usize) }).await.unwrap(),
        7
    );
}

#[tokio::test(start_paused = true)]
async fn test_clones_share_one_queue() {
    let limiter = RateLimiter::new(LlmRateLimitConfig {
        max_requests_per_window: 2,
        window: Duration::from_secs(60),
        inter_request_delay: Duration::ZERO,
    });
    let other = limiter.clone();
    let log: StartLog = Arc::new(EventLog::default());
    let base = Instant::now();

    let a = schedule_recorded(&limiter, &log, base, 0);
    let b = schedule_recorded(&other, &log, base, 1);
    let c = schedule_recorded(&limiter, &log, base, 2);
    a.await.unwrap();
    b.await.unwrap();
    c.await.unwrap();

    let secs: Vec<u64> = log.snapshot().iter().map(|(_, at)| at.as_secs()).collect();
    assert_eq!(secs, [0, 0, 60]);
}
