//! Passphrase-based authenticated encryption.
//!
//! Encrypt: z <- 64 random bytes; (ke || ka) <- KMACXOF256(z || pw, "", 1024,
//! "S"); c <- KMACXOF256(ke, "", 8|m|, "SKE") XOR m; t <- KMACXOF256(ka, m,
//! 512, "SKA"). Decrypt recomputes the keys, recovers the candidate
//! plaintext and accepts iff the recomputed tag matches; nothing is released
//! on mismatch.

use log::debug;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::error::SigilError;
use crate::kmac::{derive_key_halves, keystream, kmac_block64, tags_match};
use crate::rng::secure_rng;

/// Width of the random value z.
pub const NONCE_BYTES: usize = 64;
/// Width of the authentication tag t.
pub const TAG_BYTES: usize = 64;

/// The (z, c, t) record. Persisted as `z || c || t`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymmetricCryptogram {
    pub z: [u8; NONCE_BYTES],
    pub c: Vec<u8>,
    pub t: [u8; TAG_BYTES],
}

impl SymmetricCryptogram {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NONCE_BYTES + self.c.len() + TAG_BYTES);
        out.extend_from_slice(&self.z);
        out.extend_from_slice(&self.c);
        out.extend_from_slice(&self.t);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigilError> {
        let min = NONCE_BYTES + TAG_BYTES;
        if bytes.len() < min {
            return Err(SigilError::CryptogramTooShort {
                min,
                found: bytes.len(),
            });
        }
        let mut z = [0u8; NONCE_BYTES];
        z.copy_from_slice(&bytes[..NONCE_BYTES]);
        let mut t = [0u8; TAG_BYTES];
        t.copy_from_slice(&bytes[bytes.len() - TAG_BYTES..]);
        Ok(SymmetricCryptogram {
            z,
            c: bytes[NONCE_BYTES..bytes.len() - TAG_BYTES].to_vec(),
            t,
        })
    }
}

/// Encrypts with a fresh OS-random z.
pub fn encrypt_symmetric(message: &[u8], passphrase: &[u8]) -> SymmetricCryptogram {
    encrypt_symmetric_with_rng(message, passphrase, &mut secure_rng())
}

/// Encrypts with caller-supplied randomness.
pub fn encrypt_symmetric_with_rng<R: CryptoRng + RngCore>(
    message: &[u8],
    passphrase: &[u8],
    rng: &mut R,
) -> SymmetricCryptogram {
    let mut z = [0u8; NONCE_BYTES];
    rng.fill_bytes(&mut z);
    let (ke, ka) = derive_keys(&z, passphrase);
    let mut c = keystream(ke.as_ref(), message.len(), b"SKE");
    for (cb, mb) in c.iter_mut().zip(message) {
        *cb ^= mb;
    }
    let t = kmac_block64(ka.as_ref(), message, b"SKA");
    debug!("symmetric encrypt: {} message bytes", message.len());
    SymmetricCryptogram { z, c, t }
}

/// Recovers the plaintext iff the recomputed tag matches.
pub fn decrypt_symmetric(
    cryptogram: &SymmetricCryptogram,
    passphrase: &[u8],
) -> Result<Vec<u8>, SigilError> {
    let (ke, ka) = derive_keys(&cryptogram.z, passphrase);
    let mut m = keystream(ke.as_ref(), cryptogram.c.len(), b"SKE");
    for (mb, cb) in m.iter_mut().zip(&cryptogram.c) {
        *mb ^= cb;
    }
    let expected = kmac_block64(ka.as_ref(), &m, b"SKA");
    if !tags_match(&expected, &cryptogram.t) {
        debug!("symmetric decrypt rejected: tag mismatch");
        m.zeroize();
        return Err(SigilError::AuthenticationFailed);
    }
    debug!("symmetric decrypt: {} message bytes", m.len());
    Ok(m)
}

/// (ke || ka) <- KMACXOF256(z || pw, "", 1024, "S"), in that order.
fn derive_keys(
    z: &[u8; NONCE_BYTES],
    passphrase: &[u8],
) -> (Zeroizing<[u8; 64]>, Zeroizing<[u8; 64]>) {
    let mut ikm = Zeroizing::new(Vec::with_capacity(NONCE_BYTES + passphrase.len()));
    ikm.extend_from_slice(z);
    ikm.extend_from_slice(passphrase);
    derive_key_halves(&ikm, b"S")
}
