//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic, fast, no allocation.

use std::f32::consts::TAU;

/// Seedable xorshift64 generator. Every particle attribute is drawn from one of these,
/// so a fixed seed reproduces a field exactly.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound). Returns 0 for an empty bound.
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [min, max). Collapses to `min` when the span is empty.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        let v = min + self.next_f32() * (max - min);
        // Rounding can land exactly on `max` for wide spans.
        if v >= max { min } else { v }
    }

    /// Uniform float in [-half, half).
    pub fn signed(&mut self, half: f32) -> f32 {
        self.range(-half, half)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Random direction in radians, [0, τ).
    pub fn angle(&mut self) -> f32 {
        self.next_f32() * TAU
    }

    /// Derive an independent generator, e.g. one per particle field.
    pub fn fork(&mut self, salt: u64) -> Rng {
        Rng::new(self.next_u64() ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_deterministic() {
        let mut rng1 = Rng::new(42);
        let mut rng2 = Rng::new(42);
        for _ in 0..10 {
            assert_eq!(rng1.next_int(1000), rng2.next_int(1000));
        }
    }

    #[test]
    fn rng_zero_seed_handled() {
        let mut rng = Rng::new(0);
        let _ = rng.next_int(100);
        assert_eq!(rng.next_int(0), 0);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = Rng::new(7);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v), "got {}", v);
        }
    }

    #[test]
    fn range_respects_bounds() {
        let mut rng = Rng::new(99);
        for _ in 0..10_000 {
            let v = rng.range(0.3, 0.7);
            assert!(v >= 0.3 && v < 0.7, "got {}", v);
        }
        assert_eq!(rng.range(2.0, 2.0), 2.0);
        assert_eq!(rng.range(5.0, 1.0), 5.0);
    }

    #[test]
    fn forked_generators_diverge() {
        let mut root = Rng::new(42);
        let mut a = root.fork(1);
        let mut b = root.fork(2);
        let same = (0..16).filter(|_| a.next_int(1 << 20) == b.next_int(1 << 20)).count();
        assert!(same < 16);
    }
}
