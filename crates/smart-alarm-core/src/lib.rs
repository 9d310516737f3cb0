// ABOUTME: Core types and algorithms for the smart alarm wake-window planner
// ABOUTME: Foundation crate with error handling, stage models, samplers, and the sleep-pattern generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

#![deny(unsafe_code)]

//! # Smart Alarm Core
//!
//! Foundation crate for the smart alarm server. Given a soft and a hard
//! wake-up bound it picks a random target instant inside the window and
//! synthesizes a sleep-stage series covering the time between the soft bound
//! and that target.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Distribution defaults and sampling constants
//! - **models**: `SleepStage`, `SleepSequence`, `TimeInterval`, `AlarmPlan`
//! - **random**: The `UniformSource` abstraction over random number generators
//! - **sampler**: Uniform target-time selection within an interval
//! - **generator**: Biased-then-shuffled sleep-stage sequence generation
//! - **planner**: Orchestration of sampler and generator into an `AlarmPlan`

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Distribution defaults and sampling constants
pub mod constants;

/// Sleep stage, sequence, interval, and plan value types
pub mod models;

/// Injectable uniform random sources
pub mod random;

/// Uniform wake-target sampling
pub mod sampler;

/// Synthetic sleep-stage sequence generation
pub mod generator;

/// Alarm planning orchestration
pub mod planner;

pub use errors::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use generator::{fisher_yates_shuffle, PhaseLayout, SleepPatternGenerator, SleepPatternProfile};
pub use models::{AlarmPlan, SleepSequence, SleepStage, StageCounts, TimeInterval};
pub use planner::{sequence_length, AlarmPlanner};
pub use random::{ScriptedSource, UniformSource};
pub use sampler::TargetTimeSampler;
