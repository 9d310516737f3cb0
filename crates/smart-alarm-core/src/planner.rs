// ABOUTME: Alarm planning orchestration combining target sampling and pattern generation
// ABOUTME: Derives the sequence length from elapsed seconds and rejects degenerate windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

use tracing::debug;

use crate::constants::sampling::{MAX_SEQUENCE_LEN, MILLIS_PER_SECOND, SECONDS_PER_SAMPLE};
use crate::errors::{AppError, AppResult};
use crate::generator::{SleepPatternGenerator, SleepPatternProfile};
use crate::models::{AlarmPlan, TimeInterval};
use crate::random::UniformSource;
use crate::sampler::TargetTimeSampler;

/// Number of samples covering `elapsed_seconds` (one per two seconds)
#[must_use]
pub fn sequence_length(elapsed_seconds: i64) -> usize {
    usize::try_from(elapsed_seconds / SECONDS_PER_SAMPLE).unwrap_or(0)
}

/// Plans one alarm: sample a target, then synthesize the night leading to it
#[derive(Debug, Clone, Copy)]
pub struct AlarmPlanner {
    sampler: TargetTimeSampler,
    generator: SleepPatternGenerator,
    max_samples: usize,
}

impl Default for AlarmPlanner {
    fn default() -> Self {
        Self {
            sampler: TargetTimeSampler::new(),
            generator: SleepPatternGenerator::default(),
            max_samples: MAX_SEQUENCE_LEN,
        }
    }
}

impl AlarmPlanner {
    /// Create a planner using the given distribution profile
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the profile is out of range
    pub fn new(profile: SleepPatternProfile) -> AppResult<Self> {
        Ok(Self {
            sampler: TargetTimeSampler::new(),
            generator: SleepPatternGenerator::new(profile)?,
            max_samples: MAX_SEQUENCE_LEN,
        })
    }

    /// Cap the number of samples a single plan may generate
    #[must_use]
    pub const fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Largest sequence this planner will generate
    #[must_use]
    pub const fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// The sleep-pattern generator used by this planner
    #[must_use]
    pub const fn generator(&self) -> &SleepPatternGenerator {
        &self.generator
    }

    /// Plan an alarm inside `interval`
    ///
    /// The first draw picks the target; the remaining draws feed the
    /// generator.
    ///
    /// # Errors
    ///
    /// Returns `WindowTooLarge` when the whole window holds more samples than
    /// `max_samples` (checked before any draw), and `WindowTooSmall` when fewer
    /// than two whole seconds separate the soft limit from the sampled target
    pub fn plan<S: UniformSource + ?Sized>(
        &self,
        interval: TimeInterval,
        source: &mut S,
    ) -> AppResult<AlarmPlan> {
        // The target never reaches `end`, so the window bounds the sequence length
        let window_samples = sequence_length(interval.span().num_seconds());
        if window_samples > self.max_samples {
            return Err(AppError::window_too_large(format!(
                "Time window too large: {}s between soft and hard limits allows up to \
                 {window_samples} sleep samples (limit {})",
                interval.span().num_seconds(),
                self.max_samples
            )));
        }

        let target = self.sampler.sample(&interval, source);
        let elapsed_seconds = (target - interval.start()).num_milliseconds() / MILLIS_PER_SECOND;
        let len = sequence_length(elapsed_seconds);

        debug!(
            soft = %interval.start(),
            hard = %interval.end(),
            %target,
            elapsed_seconds,
            array_size = len,
            "Sampled alarm target"
        );

        if len == 0 {
            return Err(AppError::window_too_small(format!(
                "Time difference too small: {elapsed_seconds}s between soft limit and target \
                 yields no sleep samples (need at least {SECONDS_PER_SAMPLE}s)"
            )));
        }

        let sequence = self.generator.generate(len, source)?;
        Ok(AlarmPlan::new(target, sequence, interval, elapsed_seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::models::SleepStage;
    use crate::random::ScriptedSource;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, second).unwrap()
    }

    #[test]
    fn test_sequence_length_halves_elapsed_seconds() {
        assert_eq!(sequence_length(0), 0);
        assert_eq!(sequence_length(1), 0);
        assert_eq!(sequence_length(2), 1);
        assert_eq!(sequence_length(299), 149);
        assert_eq!(sequence_length(-4), 0);
    }

    #[test]
    fn test_plan_uses_first_draw_for_target() {
        let interval = TimeInterval::new(at(6, 0, 0), at(6, 5, 0)).unwrap();
        // 0.5 -> 150 s after soft -> 75 samples
        let mut source = ScriptedSource::constant(0.5);

        let plan = AlarmPlanner::default().plan(interval, &mut source).unwrap();

        assert_eq!(plan.target(), at(6, 2, 30));
        assert_eq!(plan.elapsed_seconds(), 150);
        assert_eq!(plan.sequence().len(), 75);
        assert_eq!(plan.interval(), &interval);
    }

    #[test]
    fn test_end_to_end_five_minute_window() {
        let interval = TimeInterval::new(at(6, 0, 0), at(6, 5, 0)).unwrap();
        let planner = AlarmPlanner::default();
        let mut rng = ChaCha8Rng::seed_from_u64(15);

        for _ in 0..200 {
            match planner.plan(interval, &mut rng) {
                Ok(plan) => {
                    assert!(interval.contains(plan.target()));
                    let elapsed_ms = (plan.target() - interval.start()).num_milliseconds();
                    let expected_len = usize::try_from(elapsed_ms / 1000 / 2).unwrap();
                    assert_eq!(plan.sequence().len(), expected_len);
                    let tail = plan.sequence().light_tail_len();
                    assert!(plan.sequence().stages()[expected_len - tail..]
                        .iter()
                        .all(|s| *s == SleepStage::Light));
                }
                // Targets in the first two seconds legitimately degenerate
                Err(error) => {
                    assert_eq!(error.code, ErrorCode::WindowTooSmall);
                }
            }
        }
    }

    #[test]
    fn test_one_second_window_is_degenerate() {
        let interval = TimeInterval::new(at(6, 0, 0), at(6, 0, 1)).unwrap();
        let planner = AlarmPlanner::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..50 {
            let error = planner.plan(interval, &mut rng).unwrap_err();
            assert_eq!(error.code, ErrorCode::WindowTooSmall);
        }
    }

    #[test]
    fn test_target_just_under_two_seconds_is_degenerate() {
        let interval =
            TimeInterval::new(at(6, 0, 0), at(6, 0, 0) + Duration::milliseconds(2_000)).unwrap();
        // Highest draw lands on 1_999 ms -> 1 elapsed second -> 0 samples
        let error = AlarmPlanner::default()
            .plan(interval, &mut ScriptedSource::constant(1.0))
            .unwrap_err();

        assert_eq!(error.code, ErrorCode::WindowTooSmall);
        assert!(error.message.contains("Time difference too small"));
    }

    #[test]
    fn test_window_spanning_centuries_is_rejected_before_sampling() {
        let interval = TimeInterval::new(
            Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap(),
        )
        .unwrap();
        let mut source = ScriptedSource::constant(0.5);

        let error = AlarmPlanner::default().plan(interval, &mut source).unwrap_err();

        assert_eq!(error.code, ErrorCode::WindowTooLarge);
        assert!(error.message.contains("limit 43200"));
        assert_eq!(source.draws(), 0);
    }

    #[test]
    fn test_sample_limit_is_inclusive() {
        // 200 s window -> at most 100 samples
        let interval = TimeInterval::new(at(6, 0, 0), at(6, 3, 20)).unwrap();

        let planner = AlarmPlanner::default().with_max_samples(100);
        assert_eq!(planner.max_samples(), 100);
        let plan = planner
            .plan(interval, &mut ScriptedSource::constant(0.5))
            .unwrap();
        assert_eq!(plan.sequence().len(), 50);

        let error = AlarmPlanner::default()
            .with_max_samples(99)
            .plan(interval, &mut ScriptedSource::constant(0.5))
            .unwrap_err();
        assert_eq!(error.code, ErrorCode::WindowTooLarge);
    }

    #[test]
    fn test_seeded_planning_is_reproducible() {
        let interval = TimeInterval::new(at(5, 30, 0), at(7, 0, 0)).unwrap();
        let planner = AlarmPlanner::default();

        let first = planner
            .plan(interval, &mut ChaCha8Rng::seed_from_u64(77))
            .unwrap();
        let second = planner
            .plan(interval, &mut ChaCha8Rng::seed_from_u64(77))
            .unwrap();

        assert_eq!(first, second);
    }
}
