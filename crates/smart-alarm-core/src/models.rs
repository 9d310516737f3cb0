// ABOUTME: Value types for wake windows, sleep stages, stage sequences, and alarm plans
// ABOUTME: SleepStage codes and labels, SleepSequence tail invariant, TimeInterval ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Types of sleep stages emitted by the generator
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SleepStage {
    /// Light sleep - easy to wake from, used for the pre-alarm tail
    Light,
    /// Deep sleep - restorative, dominant early in the night
    Deep,
    /// REM (Rapid Eye Movement) sleep - more frequent later in the night
    Rem,
}

impl SleepStage {
    /// All stages in declaration order
    pub const ALL: [Self; 3] = [Self::Light, Self::Deep, Self::Rem];

    /// Numeric wire code (`0 = light`, `1 = deep`, `2 = rem`)
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Light => 0,
            Self::Deep => 1,
            Self::Rem => 2,
        }
    }

    /// Human-readable display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light Sleep",
            Self::Deep => "Deep Sleep",
            Self::Rem => "REM Sleep",
        }
    }
}

impl fmt::Display for SleepStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-stage tallies of a sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    /// Number of light-sleep samples
    pub light: usize,
    /// Number of deep-sleep samples
    pub deep: usize,
    /// Number of REM samples
    pub rem: usize,
}

impl StageCounts {
    /// Total number of samples counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.light + self.deep + self.rem
    }
}

/// Ordered sleep-stage series ending in a block of light sleep
///
/// Only the generator builds these, so the trailing `light_tail_len`
/// samples are always [`SleepStage::Light`] and no light sample appears
/// before them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SleepSequence {
    stages: Vec<SleepStage>,
    light_tail_len: usize,
}

impl SleepSequence {
    pub(crate) const fn new(stages: Vec<SleepStage>, light_tail_len: usize) -> Self {
        Self {
            stages,
            light_tail_len,
        }
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the sequence holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Samples in order
    #[must_use]
    pub fn stages(&self) -> &[SleepStage] {
        &self.stages
    }

    /// Length of the trailing light-sleep block
    #[must_use]
    pub const fn light_tail_len(&self) -> usize {
        self.light_tail_len
    }

    /// The shuffled deep/REM prefix
    #[must_use]
    pub fn middle(&self) -> &[SleepStage] {
        &self.stages[..self.stages.len() - self.light_tail_len]
    }

    /// The trailing light-sleep block
    #[must_use]
    pub fn tail(&self) -> &[SleepStage] {
        &self.stages[self.stages.len() - self.light_tail_len..]
    }

    /// Wire codes of every sample
    #[must_use]
    pub fn codes(&self) -> Vec<u8> {
        self.stages.iter().map(|stage| stage.code()).collect()
    }

    /// Tally samples per stage
    #[must_use]
    pub fn counts(&self) -> StageCounts {
        self.stages
            .iter()
            .fold(StageCounts::default(), |mut counts, stage| {
                match stage {
                    SleepStage::Light => counts.light += 1,
                    SleepStage::Deep => counts.deep += 1,
                    SleepStage::Rem => counts.rem += 1,
                }
                counts
            })
    }

    /// Consume the sequence, returning its samples
    #[must_use]
    pub fn into_stages(self) -> Vec<SleepStage> {
        self.stages
    }
}

/// Soft/hard wake-up window, `start < end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Build a window from its soft (`start`) and hard (`end`) limits
    ///
    /// # Errors
    ///
    /// Returns an `InvalidInput` error when `start` is not strictly earlier than `end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::invalid_input(format!(
                "Soft limit must be earlier than hard limit (soft: {}, hard: {})",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// Soft limit, the earliest acceptable wake time
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Hard limit, the latest acceptable wake time
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Width of the window
    #[must_use]
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Whether `instant` falls inside `[start, end)`
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// Complete result of planning one alarm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmPlan {
    target: DateTime<Utc>,
    sequence: SleepSequence,
    interval: TimeInterval,
    elapsed_seconds: i64,
}

impl AlarmPlan {
    pub(crate) const fn new(
        target: DateTime<Utc>,
        sequence: SleepSequence,
        interval: TimeInterval,
        elapsed_seconds: i64,
    ) -> Self {
        Self {
            target,
            sequence,
            interval,
            elapsed_seconds,
        }
    }

    /// Instant at which the alarm fires
    #[must_use]
    pub const fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Synthetic sleep-stage series between the soft limit and the target
    #[must_use]
    pub const fn sequence(&self) -> &SleepSequence {
        &self.sequence
    }

    /// The soft/hard window the target was drawn from
    #[must_use]
    pub const fn interval(&self) -> &TimeInterval {
        &self.interval
    }

    /// Whole seconds between the soft limit and the target
    #[must_use]
    pub const fn elapsed_seconds(&self) -> i64 {
        self.elapsed_seconds
    }
}
