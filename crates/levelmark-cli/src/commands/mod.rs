pub mod assess;
pub mod init;
pub mod poster;
pub mod quiz;
pub mod read;
pub mod study;
pub mod validate;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Selection RNG: seeded for reproducible runs, entropy otherwise.
pub(crate) fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}
