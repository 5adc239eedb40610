//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! The engine owns one root `SimRng` seeded from `SimulationConfig::seed`.
//! Each `AgentManager` gets its own child derived with [`SimRng::child`],
//! mixing the manager index with the 64-bit fractional part of the golden
//! ratio.  Managers therefore never share RNG state, and the result does not
//! depend on the order in which managers are stepped (sequential or on the
//! Rayon pool).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Simulation RNG wrapper around `SmallRng`.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset — used to give
    /// every manager an independent stream from the root seed.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

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

    /// `+1` or `-1` with equal probability.
    #[inline]
    pub fn unit_step(&mut self) -> i32 {
        if self.0.r#gen::<bool>() { 1 } else { -1 }
    }
}
