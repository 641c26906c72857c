//! Random sources used for item placement.
//!
//! The browser build draws from `crypto.getRandomValues` through `getrandom`;
//! tests and demos can swap in the seeded [`Lcg`] for repeatable boards.

/// Uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)`. Returns `min` when the range is empty.
    fn range(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            return min;
        }
        self.next_f64() * (max - min) + min
    }
}

/// Entropy from the platform (`crypto.getRandomValues` on wasm).
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserRandom;

impl RandomSource for BrowserRandom {
    fn next_f64(&mut self) -> f64 {
        let mut buf = [0u8; 4];
        if let Err(err) = getrandom::getrandom(&mut buf) {
            tracing::warn!(%err, "getrandom failed; placing item at origin");
            return 0.0;
        }
        u32::from_le_bytes(buf) as f64 / 4_294_967_296.0
    }
}

/// 32-bit linear congruential generator (not crypto secure).
#[derive(Debug, Clone, Copy)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state as f64 / 4_294_967_296.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_is_repeatable_and_in_unit_interval() {
        let mut a = Lcg::new(7);
        let mut b = Lcg::new(7);
        for _ in 0..1_000 {
            let v = a.next_f64();
            assert_eq!(v, b.next_f64());
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn range_stays_within_bounds() {
        let mut rng = Lcg::new(42);
        for _ in 0..1_000 {
            let v = rng.range(10.0, 20.0);
            assert!((10.0..20.0).contains(&v), "{v} escaped [10, 20)");
        }
    }

    #[test]
    fn empty_range_returns_min() {
        let mut rng = Lcg::new(1);
        assert_eq!(rng.range(5.0, 5.0), 5.0);
        assert_eq!(rng.range(5.0, -3.0), 5.0);
    }

    #[test]
    fn browser_random_in_unit_interval() {
        let mut rng = BrowserRandom;
        for _ in 0..100 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
