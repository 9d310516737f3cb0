// ABOUTME: Uniform random source abstraction used by the sampler and the generator
// ABOUTME: Blanket implementation over rand generators plus a scripted replay source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Alarm Server Contributors

//! Every random decision in the planner is a single draw from `[0, 1)`.
//! Routing those draws through [`UniformSource`] lets production code hand in
//! `rand::thread_rng()` or a seeded `ChaCha8Rng`, while tests replay exact
//! values with [`ScriptedSource`] and assert precise offsets and permutations.

use rand::Rng;

/// Largest `f64` strictly below `1.0`
const MAX_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Source of uniformly distributed values in `[0, 1)`
pub trait UniformSource {
    /// Draw the next value; implementations must stay within `[0, 1)`
    fn next_unit(&mut self) -> f64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
///
/// Values are clamped into `[0, 1)` on construction. An empty script always
/// yields `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Create a source replaying `values` in order
    #[must_use]
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|value| {
                    if value.is_nan() {
                        0.0
                    } else {
                        value.clamp(0.0, MAX_BELOW_ONE)
                    }
                })
                .collect(),
            cursor: 0,
        }
    }

    /// Source that always yields `value`
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }

    /// Number of draws served so far
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
