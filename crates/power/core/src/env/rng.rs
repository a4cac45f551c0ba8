//! Seedable random source for velocities and animation pacing.
//!
//! # Determinism
//!
//! Every random draw a power makes goes through [`PowerRng`]. Seeding a
//! [`PcgRng`] therefore reproduces an activation, and the tick-by-tick
//! cleanup of its animation, exactly.

/// Sequential random number source.
pub trait PowerRng: Send {
    fn next_u32(&mut self) -> u32;

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.next_u32()) << 32) | u64::from(self.next_u32())
    }

    /// Uniform value in `[0, 1)` with 53 bits of precision.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Fair coin flip.
    fn next_bool(&mut self) -> bool {
        self.next_u32() >> 31 == 1
    }

    /// Uniform value in `[0, bound)`; `0` when `bound` is zero.
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        // Reject the biased tail so every residue is equally likely.
        let zone = u32::MAX - (u32::MAX - bound + 1) % bound;
        loop {
            let value = self.next_u32();
            if value <= zone {
                return value % bound;
            }
        }
    }

    /// Independent child stream, used to hand a scheduled task its own source.
    fn fork(&mut self) -> Box<dyn PowerRng>;
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64 bits of state, 32-bit output.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.state = Self::pcg_step(rng.state);
        rng
    }

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl PowerRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }

    fn fork(&mut self) -> Box<dyn PowerRng> {
        let seed = mix_seed(self.next_u64(), 0x6a09e667f3bcc909);
        Box::new(PcgRng::seeded(seed))
    }
}

/// Mixes a base seed with a context value (SplitMix64 finalizer).
fn mix_seed(seed: u64, context: u64) -> u64 {
    let mut hash = seed ^ context.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = PcgRng::seeded(42);
        let mut b = PcgRng::seeded(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn unit_interval_and_bounds_hold() {
        let mut rng = PcgRng::seeded(7);
        for _ in 0..1_000 {
            let f = rng.next_f64();
            assert!((0.0..1.0).contains(&f));
            assert!(rng.below(5) < 5);
        }
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn coin_is_not_constant() {
        let mut rng = PcgRng::seeded(3);
        let heads = (0..1_000).filter(|_| rng.next_bool()).count();
        assert!((350..650).contains(&heads), "heads = {heads}");
    }

    #[test]
    fn forked_stream_diverges_from_parent() {
        let mut parent = PcgRng::seeded(11);
        let mut child = parent.fork();
        let parent_draws: Vec<u32> = (0..8).map(|_| parent.next_u32()).collect();
        let child_draws: Vec<u32> = (0..8).map(|_| child.next_u32()).collect();
        assert_ne!(parent_draws, child_draws);
    }
}
