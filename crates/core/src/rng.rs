//! RNG module - uniform random piece generation
//!
//! Each draw picks one of the seven kinds with equal probability, independently of
//! previous draws. There is no bag: repeats are possible.
//!
//! Uses a simple LCG so that a seed fully determines a game (useful for tests).

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Draw a piece kind uniformly at random
pub fn random_piece_kind(rng: &mut SimpleRng) -> PieceKind {
    let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    PieceKind::ALL[idx]
}

/// Uniform piece generator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn next_kind(&mut self) -> PieceKind {
        random_piece_kind(&mut self.rng)
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_generator_is_roughly_uniform() {
        let mut generator = PieceGenerator::new(2024);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let kind = generator.next_kind();
            let idx = PieceKind::ALL.iter().position(|&k| k == kind).unwrap();
            counts[idx] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            assert!(
                (800..=1200).contains(&count),
                "kind {:?} drawn {} times",
                PieceKind::ALL[i],
                count
            );
        }
    }

    #[test]
    fn test_generator_allows_repeats() {
        let mut generator = PieceGenerator::new(7);
        let mut prev = generator.next_kind();
        let mut repeated = false;
        for _ in 0..1000 {
            let kind = generator.next_kind();
            if kind == prev {
                repeated = true;
                break;
            }
            prev = kind;
        }
        assert!(repeated, "no back-to-back repeat in 1000 draws");
    }

    #[test]
    fn test_generator_same_seed_same_sequence() {
        let mut a = PieceGenerator::new(5);
        let mut b = PieceGenerator::new(5);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }
}
