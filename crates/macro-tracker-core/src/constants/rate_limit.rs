// ABOUTME: Throttling defaults for outbound LLM API calls
// ABOUTME: Five starts per rolling minute with a one-second gap between requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

/// Maximum task starts within one rolling window
pub const MAX_REQUESTS_PER_MINUTE: usize = 5;

/// Rolling window length in seconds
pub const RATE_WINDOW_SECS: u64 = 60;

/// Fixed delay after each task completes (milliseconds)
pub const INTER_REQUEST_DELAY_MS: u64 = 1_000;
