//! Random jitter sources for the heuristic scorer

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform random source used to jitter heuristic scores
pub trait NoiseSource: Send + Sync {
    /// Sample a value in `[low, high]`
    fn uniform(&self, low: f64, high: f64) -> f64;
}

/// Production source backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngNoise;

impl NoiseSource for ThreadRngNoise {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Reproducible source seeded once at startup
pub struct SeededNoise {
    rng: Mutex<StdRng>,
}

impl SeededNoise {
    /// Create a seeded source
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.rng.lock().gen_range(low..=high)
    }
}

/// Constant source, clamped into the requested range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl FixedNoise {
    /// No jitter at all
    pub fn zero() -> Self {
        Self(0.0)
    }
}

impl NoiseSource for FixedNoise {
    fn uniform(&self, low: f64, high: f64) -> f64 {
        self.0.clamp(low, high)
    }
}
