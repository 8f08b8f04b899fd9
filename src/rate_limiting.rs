// ABOUTME: FIFO rate limiter that serializes outbound LLM calls under a rolling per-minute cap
// ABOUTME: Tasks run one at a time with a fixed delay between them; failures never stop the queue
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Rate Limiter
//!
//! A single queue shared by every caller in the process. [`RateLimiter::schedule`]
//! enqueues a task and returns a future for its result. One drain task pops jobs
//! in order and runs them one at a time:
//!
//! - at most `max_requests_per_window` task starts fall inside any rolling window
//! - after every task the drainer sleeps `inter_request_delay`
//! - a failing task is logged and its caller gets the error; the queue continues
//!
//! The drainer exits when the queue is empty and the next `schedule` starts a new
//! one. Scheduled tasks cannot be cancelled.

use crate::config::LlmRateLimitConfig;
use crate::errors::{AppError, AppResult};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, error, warn};

type BoxedRun = Pin<Box<dyn Future<Output = ()> + Send>>;
type Job = Box<dyn FnOnce() -> BoxedRun + Send>;

struct QueueState {
    pending: VecDeque<Job>,
    processing: bool,
    starts: VecDeque<Instant>,
}

struct Shared {
    config: LlmRateLimitConfig,
    state: Mutex<QueueState>,
}

enum NextStep {
    Idle,
    Wait(Duration),
    Run(Job),
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Decide what the drainer does next, recording a start when it runs a job
    fn next_step(&self) -> NextStep {
        let mut state = self.lock();
        let now = Instant::now();
        let window = self.config.window;

        while let Some(&oldest) = state.starts.front() {
            if now.duration_since(oldest) >= window {
                state.starts.pop_front();
            } else {
                break;
            }
        }

        if state.pending.is_empty() {
            state.processing = false;
            return NextStep::Idle;
        }

        if state.starts.len() >= self.config.max_requests_per_window {
            if let Some(&oldest) = state.starts.front() {
                return NextStep::Wait(window.saturating_sub(now.duration_since(oldest)));
            }
        }

        match state.pending.pop_front() {
            Some(job) => {
                state.starts.push_back(now);
                NextStep::Run(job)
            }
            None => {
                state.processing = false;
                NextStep::Idle
            }
        }
    }
}

/// Process-wide serializing rate limiter
///
/// Cheap to clone; clones share one queue.
#[derive(Clone)]
pub struct RateLimiter {
    shared: Arc<Shared>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(LlmRateLimitConfig::default())
    }
}

impl RateLimiter {
    /// Create a limiter with the given cap, window and delay
    #[must_use]
    pub fn new(config: LlmRateLimitConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                config,
                state: Mutex::new(QueueState {
                    pending: VecDeque::new(),
                    processing: false,
                    starts: VecDeque::new(),
                }),
            }),
        }
    }

    /// Limits in force
    #[must_use]
    pub fn config(&self) -> &LlmRateLimitConfig {
        &self.shared.config
    }

    /// Tasks waiting to start
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.lock().pending.len()
    }

    /// Whether a drainer is currently active
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.shared.lock().processing
    }

    /// Enqueue a task and get a future for its result
    ///
    /// The task is queued immediately, before the returned future is polled.
    /// Must be called from within a Tokio runtime, since an idle limiter spawns
    /// its drainer here.
    ///
    /// The future resolves to the task's own result, or to an internal error if
    /// the task panicked.
    pub fn schedule<F, Fut, T>(&self, task: F) -> impl Future<Output = AppResult<T>> + Send
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::new(move || -> BoxedRun {
            Box::pin(async move {
                let result = task().await;
                if let Err(e) = &result {
                    warn!(error = %e, "Rate limited task failed");
                }
                if tx.send(result).is_err() {
                    debug!("Rate limited task finished after its caller went away");
                }
            })
        });

        let start_drain = {
            let mut state = self.shared.lock();
            state.pending.push_back(job);
            let idle = !state.processing;
            state.processing = true;
            idle
        };
        if start_drain {
            tokio::spawn(Self::drain(Arc::clone(&self.shared)));
        }

        async move {
            rx.await
                .map_err(|_| AppError::internal("Rate limited task ended without a result"))?
        }
    }

    async fn drain(shared: Arc<Shared>) {
        debug!("Rate limiter drain started");
        loop {
            match shared.next_step() {
                NextStep::Idle => break,
                NextStep::Wait(delay) => {
                    debug!(wait_ms = delay.as_millis(), "Rate limit reached, waiting for window");
                    tokio::time::sleep(delay).await;
                }
                NextStep::Run(job) => {
                    // Run on its own task so a panic cannot take the drainer down
                    if let Err(e) = tokio::spawn(job()).await {
                        error!(error = %e, "Rate limited task panicked");
                    }
                    tokio::time::sleep(shared.config.inter_request_delay).await;
                }
            }
        }
        debug!("Rate limiter drain idle");
    }
}
