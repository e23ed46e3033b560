// Seedable random number service

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source threaded through the simulation.
///
/// With a seed, the same inputs always replay the same battle.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    seed: Option<u64>,
}

impl GameRng {
    /// Create a deterministic RNG
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create an RNG from system entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Uniform integer in `[min, max]` (inclusive)
    pub fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Uniform real in `[0, 1)`
    pub fn rand_real(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform real in `[min, max)`
    pub fn rand_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// True with probability `rate`
    pub fn chance(&mut self, rate: f32) -> bool {
        self.rand_real() <= rate
    }

    /// Vector with both components in `[min, max)`
    pub fn rand_vec2(&mut self, min: f32, max: f32) -> Vec2 {
        Vec2::new(self.rand_range(min, max), self.rand_range(min, max))
    }

    /// Vector with independent ranges per axis
    pub fn rand_vec2_xy(&mut self, min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Vec2 {
        Vec2::new(self.rand_range(min_x, max_x), self.rand_range(min_y, max_y))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
