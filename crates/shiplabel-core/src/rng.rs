//! Entropy for tracking numbers and per-render seeds.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Draw a fresh random seed from the OS (or browser) entropy source.
///
/// Falls back to the wall clock mixed with a process-wide counter if the
/// entropy source is unavailable, so callers always get a value.
pub fn random_seed() -> u64 {
    match getrandom::u64() {
        Ok(seed) => seed,
        Err(e) => {
            warn!("Entropy source unavailable ({}), seeding from clock", e);
            let nanos = chrono::Utc::now()
                .timestamp_nanos_opt()
                .unwrap_or_default() as u64;
            let count = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
            SplitMix64::new(nanos ^ count.rotate_left(32)).next_u64()
        }
    }
}

/// SplitMix64 generator.
///
/// Small deterministic stream used to expand one seed into the decorative
/// barcode pattern and tracking number characters.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `[0, bound)`.
    pub fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0);
        self.next_u64() % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = SplitMix64::new(42);
        let mut b = SplitMix64::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_unit_interval() {
        let mut rng = SplitMix64::new(7);
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(random_seed(), random_seed());
    }
}
