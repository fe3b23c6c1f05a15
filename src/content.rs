//! Payload synthesis for new processes.
//!
//! The bytes have no meaning; they only occupy the frames. The simulator
//! takes any [`ContentGenerator`], so tests can use [`FillContent`] while the
//! binary uses [`RandomContent`].

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub trait ContentGenerator {
    /// Produce exactly `size` bytes.
    fn generate(&mut self, size: usize) -> Vec<u8>;
}

/// Pseudo-random bytes from a seedable RNG.
#[derive(Debug)]
pub struct RandomContent {
    rng: StdRng,
}

impl RandomContent {
    pub fn from_entropy() -> Self {
        RandomContent {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomContent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ContentGenerator for RandomContent {
    fn generate(&mut self, size: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; size];
        self.rng.fill_bytes(&mut bytes);
        bytes
    }
}

/// Every byte set to the same value.
#[derive(Debug, Clone, Copy)]
pub struct FillContent(pub u8);

impl ContentGenerator for FillContent {
    fn generate(&mut self, size: usize) -> Vec<u8> {
        vec![self.0; size]
    }
}

impl<F> ContentGenerator for F
where
    F: FnMut(usize) -> Vec<u8>,
{
    fn generate(&mut self, size: usize) -> Vec<u8> {
        self(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_content_length() {
        let mut content = RandomContent::from_entropy();
        assert_eq!(content.generate(0).len(), 0);
        assert_eq!(content.generate(300).len(), 300);
    }

    #[test]
    fn test_seeded_content_is_reproducible() {
        let a = RandomContent::seeded(42).generate(128);
        let b = RandomContent::seeded(42).generate(128);
        let c = RandomContent::seeded(43).generate(128);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fill_content() {
        assert_eq!(FillContent(0x5A).generate(3), vec![0x5A, 0x5A, 0x5A]);
    }

    #[test]
    fn test_closure_content() {
        let mut counter = |size: usize| (0..size).map(|i| i as u8).collect::<Vec<u8>>();
        assert_eq!(counter.generate(4), vec![0, 1, 2, 3]);
    }
}
