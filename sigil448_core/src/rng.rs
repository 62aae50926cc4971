//! Randomness seams.
//!
//! Entropy-consuming operations take an injectable `CryptoRng + RngCore` and
//! offer OS-backed convenience wrappers. Deterministic streams for tests and
//! benches are seeded from the crate's own SHAKE256 into `ChaCha20Rng`, so
//! fixtures stay reproducible without a second hash primitive.

use rand::rngs::OsRng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

use crate::sponge::shake256;

/// OS-backed RNG used for nonces and ephemeral seeds.
pub type SecureRng = OsRng;

/// Mutable secure RNG handle.
pub fn secure_rng() -> SecureRng {
    OsRng
}

/// Deterministic RNG derived from a label, for reproducible tests/benches.
pub fn derive_rng(label: &[u8]) -> ChaCha20Rng {
    let digest = shake256(label, 32);
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    ChaCha20Rng::from_seed(seed)
}
