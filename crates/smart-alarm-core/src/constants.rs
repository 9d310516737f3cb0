// ABOUTME: Distribution defaults and time constants for sleep-pattern generation
// ABOUTME: Pure data constants shared by the generator, planner, and presentation layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Constants module
//!
//! Constants are grouped by domain rather than collected in a single list.

/// Default shape of the synthetic sleep-stage distribution
pub mod sleep_pattern {
    /// Share of the sequence reserved for the trailing light-sleep block
    pub const LIGHT_TAIL_FRACTION: f64 = 0.15;
    /// Minimum number of trailing light-sleep samples
    pub const MIN_LIGHT_TAIL: usize = 5;
    /// Target share of deep sleep across the sequence
    pub const DEEP_FRACTION: f64 = 0.45;
    /// Share of the sequence covered by the early (deep-biased) phase
    pub const EARLY_PHASE_FRACTION: f64 = 0.6;
    /// Share of the deep target emitted deterministically at the start
    pub const DETERMINISTIC_DEEP_FRACTION: f64 = 0.7;
    /// Probability of deep sleep for randomized early-phase slots
    pub const EARLY_DEEP_PROBABILITY: f64 = 0.6;
    /// Probability of REM sleep for late-phase slots
    pub const LATE_REM_PROBABILITY: f64 = 0.7;
}

/// Sampling resolution constants
pub mod sampling {
    /// Milliseconds per second
    pub const MILLIS_PER_SECOND: i64 = 1_000;
    /// Seconds of elapsed time represented by one sleep-stage sample
    pub const SECONDS_PER_SAMPLE: i64 = 2;
    /// Default cap on samples per plan (24 hours at one sample per two seconds)
    pub const MAX_SEQUENCE_LEN: usize = 43_200;
}

/// Time zone presentation constants
pub mod timezone {
    /// India Standard Time offset from UTC (+05:30) in seconds
    pub const IST_OFFSET_SECONDS: i32 = 5 * 3_600 + 30 * 60;
}
