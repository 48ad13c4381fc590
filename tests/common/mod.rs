/*
 * Message generators shared by the integration tests.
 */

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Length of the generated messages.
pub const MESSAGE_LENGTH: usize = 20_000;

/// Uniformly random bytes over the whole alphabet.
pub fn uniform_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<u8>()).collect()
}

/// Bytes drawn from a small alphabet with a steep skew, so code lengths vary a lot.
///
/// Squaring a uniform sample in [0, 1) piles the mass onto the low symbols.
pub fn skewed_bytes(seed: u64, len: usize, alphabet: u8) -> Vec<u8> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let x: f64 = rng.gen();
            b'a' + (x * x * alphabet as f64) as u8
        })
        .collect()
}
