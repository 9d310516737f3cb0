// ABOUTME: Uniform wake-target sampler over a soft/hard time window
// ABOUTME: Draws a millisecond offset in [0, span) and adds it to the soft limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

use chrono::{DateTime, Duration, Utc};

use crate::models::TimeInterval;
use crate::random::UniformSource;

/// Picks the alarm target uniformly over millisecond offsets of a window
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetTimeSampler;

impl TargetTimeSampler {
    /// Create a sampler
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draw an instant in `[interval.start(), interval.end())`
    ///
    /// Consumes exactly one draw from `source`. Windows narrower than one
    /// millisecond always yield the start instant.
    pub fn sample<S: UniformSource + ?Sized>(
        &self,
        interval: &TimeInterval,
        source: &mut S,
    ) -> DateTime<Utc> {
        let span_ms = interval.span().num_milliseconds();
        let draw = source.next_unit();
        if span_ms <= 0 {
            return interval.start();
        }

        // Rounding can push the product up to span_ms for very wide windows
        let offset_ms = ((draw * span_ms as f64).floor() as i64).clamp(0, span_ms - 1);
        interval.start() + Duration::milliseconds(offset_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn five_minute_window() -> TimeInterval {
        let soft = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        let hard = Utc.with_ymd_and_hms(2024, 1, 15, 6, 5, 0).unwrap();
        TimeInterval::new(soft, hard).unwrap()
    }

    #[test]
    fn test_offset_is_floor_of_scaled_draw() {
        let interval = five_minute_window();
        let mut source = ScriptedSource::constant(0.5);

        let target = TargetTimeSampler::new().sample(&interval, &mut source);

        assert_eq!(target - interval.start(), Duration::milliseconds(150_000));
        assert_eq!(source.draws(), 1);
    }

    #[test]
    fn test_millisecond_granularity() {
        let interval = five_minute_window();
        // 0.123456 * 300_000 = 37_036.8 -> 37_036 ms
        let mut source = ScriptedSource::constant(0.123_456);

        let target = TargetTimeSampler::new().sample(&interval, &mut source);

        assert_eq!((target - interval.start()).num_milliseconds(), 37_036);
    }

    #[test]
    fn test_extreme_draws_stay_inside_window() {
        let interval = five_minute_window();
        let sampler = TargetTimeSampler::new();

        let lowest = sampler.sample(&interval, &mut ScriptedSource::constant(0.0));
        let highest = sampler.sample(&interval, &mut ScriptedSource::constant(1.0));

        assert_eq!(lowest, interval.start());
        assert_eq!(highest, interval.end() - Duration::milliseconds(1));
    }

    #[test]
    fn test_sub_millisecond_window_returns_start() {
        let soft = Utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        let hard = soft + Duration::microseconds(400);
        let interval = TimeInterval::new(soft, hard).unwrap();

        let target = TargetTimeSampler::new().sample(&interval, &mut ScriptedSource::constant(0.9));

        assert_eq!(target, soft);
        assert!(interval.contains(target));
    }

    #[test]
    fn test_many_trials_respect_bounds() {
        let interval = five_minute_window();
        let sampler = TargetTimeSampler::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..5_000 {
            let target = sampler.sample(&interval, &mut rng);
            assert!(interval.contains(target), "target {target} escaped window");
        }
    }
}
