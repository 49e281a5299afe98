//! Deterministic per-model RNG.
//!
//! # Determinism strategy
//!
//! Every stateful model (transition model, transmission model, visit
//! generator) owns its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (stream_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream ids uniformly across the seed space.
//! This means:
//!
//! - Models never share RNG state (no contention, no ordering dependency).
//! - A model's draws depend only on (global_seed, stream_id, call sequence),
//!   so runs replay identically regardless of how agents are scheduled
//!   across threads.
//!
//! The conventional stream id is the owning agent's uuid, optionally offset
//! per model kind so an agent's models draw from distinct streams.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic RNG owned by a single model instance.
///
/// The type is `!Sync` on purpose: a model that must be shared across
/// threads wraps its `ModelRng` in a `Mutex` rather than sharing it raw.
pub struct ModelRng(SmallRng);

impl ModelRng {
    /// Seed deterministically from the run's global seed and a stream id.
    pub fn new(global_seed: u64, stream_id: u64) -> Self {
        let seed = global_seed ^ stream_id.wrapping_mul(MIXING_CONSTANT);
        ModelRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child stream with a different offset — used when one model
    /// hands sub-components (e.g. per-location samplers) their own streams.
    pub fn fork(&mut self, offset: u64) -> ModelRng {
        let child_seed: u64 = self.0.gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        ModelRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Sample from any `rand` distribution (`Gamma`, `Exp`, …).
    #[inline]
    pub fn sample<T, D>(&mut self, distribution: &D) -> T
    where
        D: rand::distributions::Distribution<T>,
    {
        distribution.sample(&mut self.0)
    }
}
