//! Random outcome resolution.
//!
//! Every randomized decision in the simulation consumes exactly one uniform
//! draw from a [`RandomSource`]. Decisions that find nothing eligible
//! consume no draw at all, so a scripted source replays a game exactly.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Largest value a source may return; draws are always below 1.
const MAX_UNIT: f64 = 1.0 - f64::EPSILON;

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    /// Draw one uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Pseudo-random source backed by [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic source for a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed sequence of draws, then repeats a fallback value.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
    fallback: f64,
    consumed: usize,
}

impl ScriptedRandom {
    /// Replay `draws` in order, falling back to `0.0` once exhausted.
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0.0,
            consumed: 0,
        }
    }

    /// Change the value returned once the script runs out.
    #[must_use]
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Queue another draw.
    pub fn push(&mut self, draw: f64) {
        self.draws.push_back(draw);
    }

    /// Draws still queued.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    /// Total draws handed out so far, including fallbacks.
    pub const fn consumed(&self) -> usize {
        self.consumed
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.consumed = self.consumed.saturating_add(1);
        self.draws
            .pop_front()
            .unwrap_or(self.fallback)
            .clamp(0.0, MAX_UNIT)
    }
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

/// Succeeds with the given probability.
pub fn chance(source: &mut dyn RandomSource, probability: f64) -> bool {
    source.next_unit() < probability
}

/// Uniform index into a collection of `len` items.
///
/// Returns `None` without drawing when `len` is zero.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn pick_index(source: &mut dyn RandomSource, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let scaled = (source.next_unit() * len as f64).floor() as usize;
    Some(scaled.min(len.saturating_sub(1)))
}

/// Uniform choice from a slice.
pub fn pick<'a, T>(source: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    pick_index(source, items.len()).and_then(|index| items.get(index))
}

/// Uniform integer in `[min, max]` (bounds may be given in either order).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn uniform_inclusive(source: &mut dyn RandomSource, min: u32, max: u32) -> u32 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let width = high.abs_diff(low);
    let span = f64::from(width) + 1.0;
    let offset = ((source.next_unit() * span).floor() as u32).min(width);
    low.saturating_add(offset)
}

/// Rarity-weighted choice.
///
/// Returns `None` without drawing when every weight is zero.
#[allow(clippy::cast_precision_loss)]
pub fn weighted_choice<T: Copy>(source: &mut dyn RandomSource, table: &[(T, u32)]) -> Option<T> {
    let total = table
        .iter()
        .fold(0_u64, |acc, (_, weight)| acc.saturating_add(u64::from(*weight)));
    if total == 0 {
        return None;
    }
    let mut target = source.next_unit() * total as f64;
    for &(item, weight) in table {
        let weight = f64::from(weight);
        if target < weight {
            return Some(item);
        }
        target -= weight;
    }
    table
        .iter()
        .rev()
        .find(|(_, weight)| *weight > 0)
        .map(|(item, _)| *item)
}
