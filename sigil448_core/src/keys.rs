//! Passphrase-derived key pairs.
//!
//! The private key is the raw 512-bit KMAC output and is persisted as-is;
//! cofactor clamping is re-derived every time the scalar is used.

use log::debug;
use zeroize::Zeroizing;

use crate::curve::{CurvePoint, POINT_BYTES};
use crate::error::SigilError;
use crate::kmac::kmac_block64;
use crate::scalar::Scalar;

/// Encoded public key width: one curve point.
pub const PUBLIC_KEY_BYTES: usize = POINT_BYTES;
/// Raw private seed width.
pub const PRIVATE_SEED_BYTES: usize = 64;

/// A private seed and its public point `clamp(seed) * G`.
#[derive(Clone)]
pub struct KeyPair {
    pub private_seed: [u8; PRIVATE_SEED_BYTES],
    pub public_key: CurvePoint,
}

impl KeyPair {
    /// 58-byte persisted form of the public key.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.public_key.encode()
    }
}

/// Derives a key pair from a passphrase:
/// seed = KMACXOF256(pw, "", 512, "SK"), V = clamp(seed) * G.
pub fn generate_key_pair(passphrase: &[u8]) -> KeyPair {
    let seed = kmac_block64(passphrase, b"", b"SK");
    let s = derive_scalar_from_seed(&seed);
    let public_key = CurvePoint::base().scalar_multiply(&s);
    debug!("generated key pair from passphrase ({} bytes)", passphrase.len());
    KeyPair {
        private_seed: seed,
        public_key,
    }
}

/// Parses and validates a persisted public key.
pub fn parse_public_key(bytes: &[u8]) -> Result<CurvePoint, SigilError> {
    let point = CurvePoint::decode(bytes)?;
    if !point.is_on_curve() {
        return Err(SigilError::PointNotOnCurve);
    }
    Ok(point)
}

/// Re-derives the clamped private scalar from a passphrase.
pub(crate) fn derive_private_scalar(passphrase: &[u8]) -> Scalar {
    let seed = Zeroizing::new(kmac_block64(passphrase, b"", b"SK"));
    derive_scalar_from_seed(seed.as_ref())
}

fn derive_scalar_from_seed(seed: &[u8]) -> Scalar {
    Scalar::clamp(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_pair_is_deterministic_in_the_passphrase() {
        let a = generate_key_pair(b"correct horse");
        let b = generate_key_pair(b"correct horse");
        assert_eq!(a.private_seed, b.private_seed);
        assert_eq!(a.public_key, b.public_key);
        let c = generate_key_pair(b"correct horsf");
        assert_ne!(a.public_key, c.public_key);
    }

    #[test]
    fn public_key_round_trips_through_bytes() {
        let pair = generate_key_pair(b"round trip");
        let parsed = parse_public_key(&pair.public_key_bytes()).unwrap();
        assert_eq!(parsed, pair.public_key);
    }

    #[test]
    fn public_key_parsing_rejects_garbage() {
        assert!(parse_public_key(&[0xFFu8; PUBLIC_KEY_BYTES]).is_err());
        assert!(parse_public_key(&[0u8; 10]).is_err());
    }
}
