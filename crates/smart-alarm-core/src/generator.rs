// ABOUTME: Synthetic sleep-stage sequence generator with a deep-early bias and light tail
// ABOUTME: Builds early/late/tail phases, then Fisher-Yates shuffles everything but the tail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Sleep Pattern Generator
//!
//! A sequence of `n` samples is built in three phases:
//!
//! 1. **Early** (`floor(0.6 n)` slots): the first `0.7 * deepCount` slots are
//!    deep sleep, the rest are deep with probability 0.6 and REM otherwise.
//! 2. **Late** (`n - early - lightCount` slots): REM with probability 0.7,
//!    deep otherwise.
//! 3. **Tail** (`lightCount = max(5, floor(0.15 n))` slots): light sleep.
//!
//! Everything before the tail is then shuffled with Fisher-Yates, so the
//! deep/REM mix is fixed by phases 1-2 while their order is uniform.
//!
//! For small `n` the phase counts do not fit: the tail is capped at `n`, the
//! early phase at what remains before the tail, and the late phase never goes
//! negative. Below five samples the whole sequence is light sleep.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::sleep_pattern;
use crate::errors::{AppError, AppResult};
use crate::models::{SleepSequence, SleepStage};
use crate::random::UniformSource;

/// Tunable shape of the synthetic stage distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepPatternProfile {
    /// Share of samples in the trailing light block
    pub light_tail_fraction: f64,
    /// Lower bound on the trailing light block
    pub min_light_tail: usize,
    /// Target share of deep sleep
    pub deep_fraction: f64,
    /// Share of samples in the early phase
    pub early_phase_fraction: f64,
    /// Share of the deep target emitted deterministically at the start
    pub deterministic_deep_fraction: f64,
    /// Deep probability for the randomized early slots
    pub early_deep_probability: f64,
    /// REM probability for late slots
    pub late_rem_probability: f64,
}

impl Default for SleepPatternProfile {
    fn default() -> Self {
        Self {
            light_tail_fraction: sleep_pattern::LIGHT_TAIL_FRACTION,
            min_light_tail: sleep_pattern::MIN_LIGHT_TAIL,
            deep_fraction: sleep_pattern::DEEP_FRACTION,
            early_phase_fraction: sleep_pattern::EARLY_PHASE_FRACTION,
            deterministic_deep_fraction: sleep_pattern::DETERMINISTIC_DEEP_FRACTION,
            early_deep_probability: sleep_pattern::EARLY_DEEP_PROBABILITY,
            late_rem_probability: sleep_pattern::LATE_REM_PROBABILITY,
        }
    }
}

impl SleepPatternProfile {
    /// Check that every fraction and probability lies in `[0, 1]`
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        let fields = [
            ("light_tail_fraction", self.light_tail_fraction),
            ("deep_fraction", self.deep_fraction),
            ("early_phase_fraction", self.early_phase_fraction),
            ("deterministic_deep_fraction", self.deterministic_deep_fraction),
            ("early_deep_probability", self.early_deep_probability),
            ("late_rem_probability", self.late_rem_probability),
        ];

        for (name, value) in fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::config(format!(
                    "Sleep pattern {name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Derive the phase slot counts for a sequence of `len` samples
    #[must_use]
    pub fn layout(&self, len: usize) -> PhaseLayout {
        let light_count = floor_share(self.light_tail_fraction, len).max(self.min_light_tail);
        let deep_target = floor_share(self.deep_fraction, len);
        let first_half = floor_share(self.early_phase_fraction, len);

        let light_tail = light_count.min(len);
        let prefix = len - light_tail;
        let early_slots = first_half.min(prefix);
        let late_slots = len.saturating_sub(first_half + light_count);
        debug_assert_eq!(early_slots + late_slots, prefix);

        PhaseLayout {
            len,
            light_tail,
            deep_target,
            rem_target: len.saturating_sub(light_count + deep_target),
            first_half,
            early_slots,
            late_slots,
        }
    }
}

/// Slot counts for one generated sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseLayout {
    /// Requested sequence length
    pub len: usize,
    /// Trailing light samples actually emitted (capped at `len`)
    pub light_tail: usize,
    /// `floor(deep_fraction * len)`; drives the deterministic deep run
    pub deep_target: usize,
    /// Informational REM share, never enforced during generation
    pub rem_target: usize,
    /// Unclamped early-phase length, `floor(early_phase_fraction * len)`
    pub first_half: usize,
    /// Early-phase slots actually emitted
    pub early_slots: usize,
    /// Late-phase slots actually emitted
    pub late_slots: usize,
}

impl PhaseLayout {
    /// Number of samples subject to the shuffle
    #[must_use]
    pub const fn middle_len(&self) -> usize {
        self.early_slots + self.late_slots
    }
}

fn floor_share(fraction: f64, len: usize) -> usize {
    (fraction * len as f64).floor() as usize
}

/// Produces synthetic sleep-stage sequences
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPatternGenerator {
    profile: SleepPatternProfile,
}

impl SleepPatternGenerator {
    /// Create a generator for a validated profile
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the profile is out of range
    pub fn new(profile: SleepPatternProfile) -> AppResult<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    /// The distribution profile in use
    #[must_use]
    pub const fn profile(&self) -> &SleepPatternProfile {
        &self.profile
    }

    /// Generate exactly `len` samples ending in the light-sleep tail
    ///
    /// Draw order is fixed: one draw per randomized early slot, one per late
    /// slot, then `middle_len - 1` draws for the shuffle.
    ///
    /// # Errors
    ///
    /// Returns `WindowTooSmall` when `len` is zero
    pub fn generate<S: UniformSource + ?Sized>(
        &self,
        len: usize,
        source: &mut S,
    ) -> AppResult<SleepSequence> {
        if len == 0 {
            return Err(AppError::window_too_small(
                "A sleep sequence needs at least one sample",
            ));
        }

        let layout = self.profile.layout(len);
        trace!(?layout, "Generating sleep pattern");

        let mut stages = Vec::with_capacity(len);
        self.push_early_phase(&layout, source, &mut stages);
        self.push_late_phase(&layout, source, &mut stages);
        stages.resize(len, SleepStage::Light);

        fisher_yates_shuffle(&mut stages[..layout.middle_len()], source);

        Ok(SleepSequence::new(stages, layout.light_tail))
    }

    fn push_early_phase<S: UniformSource + ?Sized>(
        &self,
        layout: &PhaseLayout,
        source: &mut S,
        stages: &mut Vec<SleepStage>,
    ) {
        let deterministic_limit =
            self.profile.deterministic_deep_fraction * layout.deep_target as f64;

        for slot in 0..layout.early_slots {
            let stage = if (slot as f64) < deterministic_limit
                || source.next_unit() < self.profile.early_deep_probability
            {
                SleepStage::Deep
            } else {
                SleepStage::Rem
            };
            stages.push(stage);
        }
    }

    fn push_late_phase<S: UniformSource + ?Sized>(
        &self,
        layout: &PhaseLayout,
        source: &mut S,
        stages: &mut Vec<SleepStage>,
    ) {
        for _ in 0..layout.late_slots {
            let stage = if source.next_unit() < self.profile.late_rem_probability {
                SleepStage::Rem
            } else {
                SleepStage::Deep
            };
            stages.push(stage);
        }
    }
}

/// In-place Fisher-Yates shuffle driven by a uniform source
///
/// Walks `i` from the last index down to 1 and swaps it with
/// `j = floor(u * (i + 1))`. Consumes `items.len() - 1` draws (none for
/// slices shorter than two).
pub fn fisher_yates_shuffle<T, S: UniformSource + ?Sized>(items: &mut [T], source: &mut S) {
    for i in (1..items.len()).rev() {
        let j = ((source.next_unit() * (i + 1) as f64).floor() as usize).min(i);
        items.swap(i, j);
    }
}
