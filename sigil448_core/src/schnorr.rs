//! Schnorr signatures with a deterministic, message-and-key-bound nonce.
//!
//! Sign: s = clamp(KMACXOF256(pw, "", 512, "SK")); k = clamp(KMACXOF256(s,
//! m, 512, "N")); U = k*G; h = KMACXOF256(Ux, m, 512, "T") mod r; z = (k -
//! h*s) mod r. Verify reconstructs U as z*G + h*V and recomputes the
//! challenge. Parsing is strict: a signature is exactly 120 bytes, h carries
//! a zero 8-byte prefix and both h and z must be below r, so each group
//! element has a single accepted encoding.

use log::debug;
use zeroize::Zeroizing;

use crate::curve::CurvePoint;
use crate::error::SigilError;
use crate::keys::derive_private_scalar;
use crate::kmac::kmac_block64;
use crate::scalar::Scalar;

/// Width of the stored challenge h.
pub const CHALLENGE_BYTES: usize = 64;
/// Width of the stored response z.
pub const RESPONSE_BYTES: usize = 56;
/// Total signature width: `h || z`.
pub const SIGNATURE_BYTES: usize = CHALLENGE_BYTES + RESPONSE_BYTES;

/// The (h, z) record. Persisted as `h || z`, 120 bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    pub h: [u8; CHALLENGE_BYTES],
    pub z: [u8; RESPONSE_BYTES],
}

impl Signature {
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        let mut out = [0u8; SIGNATURE_BYTES];
        out[..CHALLENGE_BYTES].copy_from_slice(&self.h);
        out[CHALLENGE_BYTES..].copy_from_slice(&self.z);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigilError> {
        if bytes.len() != SIGNATURE_BYTES {
            return Err(SigilError::SignatureLength {
                expected: SIGNATURE_BYTES,
                found: bytes.len(),
            });
        }
        let mut h = [0u8; CHALLENGE_BYTES];
        h.copy_from_slice(&bytes[..CHALLENGE_BYTES]);
        let mut z = [0u8; RESPONSE_BYTES];
        z.copy_from_slice(&bytes[CHALLENGE_BYTES..]);
        Ok(Signature { h, z })
    }
}

/// Deterministically signs a message with the passphrase-derived key.
pub fn sign(message: &[u8], passphrase: &[u8]) -> Signature {
    let s = derive_private_scalar(passphrase);
    let s_bytes = Zeroizing::new(s.to_bytes());
    let nonce_seed = Zeroizing::new(kmac_block64(s_bytes.as_ref(), message, b"N"));
    let k = Scalar::clamp(nonce_seed.as_ref());
    let commitment = CurvePoint::base().scalar_multiply(&k);
    let h = Scalar::reduce_bytes(&kmac_block64(&commitment.x_bytes(), message, b"T"));
    let z = k.sub(&h.mul(&s));
    debug!("signed {} message bytes", message.len());

    let mut h_bytes = [0u8; CHALLENGE_BYTES];
    h_bytes[CHALLENGE_BYTES - RESPONSE_BYTES..].copy_from_slice(&h.to_bytes());
    Signature {
        h: h_bytes,
        z: z.to_bytes(),
    }
}

/// Verifies a signature against a message and public key. Every failure —
/// off-curve key, non-canonical h or z, challenge mismatch — is a plain
/// reject.
pub fn verify(signature: &Signature, message: &[u8], public_key: &CurvePoint) -> bool {
    if !public_key.is_on_curve() {
        return false;
    }
    if signature.h[..CHALLENGE_BYTES - RESPONSE_BYTES]
        .iter()
        .any(|&b| b != 0)
    {
        return false;
    }
    let h_tail: &[u8; RESPONSE_BYTES] = signature.h[CHALLENGE_BYTES - RESPONSE_BYTES..]
        .try_into()
        .expect("56-byte slice");
    let h = match Scalar::from_bytes_checked(h_tail) {
        Some(h) => h,
        None => return false,
    };
    let z = match Scalar::from_bytes_checked(&signature.z) {
        Some(z) => z,
        None => return false,
    };
    // U = z*G + h*V reconstructs k*G: (k - h*s)*G + h*(s*G)
    let commitment = CurvePoint::base()
        .scalar_multiply(&z)
        .add(&public_key.scalar_multiply(&h));
    let check = Scalar::reduce_bytes(&kmac_block64(&commitment.x_bytes(), message, b"T"));
    let accepted = h == check;
    debug!(
        "verified {} message bytes: {}",
        message.len(),
        if accepted { "accept" } else { "reject" }
    );
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_codec_is_exact() {
        let sig = Signature {
            h: [1u8; CHALLENGE_BYTES],
            z: [2u8; RESPONSE_BYTES],
        };
        let bytes = sig.to_bytes();
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), sig);
        assert_eq!(
            Signature::from_bytes(&bytes[..SIGNATURE_BYTES - 1]),
            Err(SigilError::SignatureLength {
                expected: SIGNATURE_BYTES,
                found: SIGNATURE_BYTES - 1
            })
        );
    }

    #[test]
    fn nonzero_h_prefix_is_rejected_without_curve_work() {
        let mut sig = Signature {
            h: [0u8; CHALLENGE_BYTES],
            z: [0u8; RESPONSE_BYTES],
        };
        sig.h[0] = 1;
        let key = crate::keys::generate_key_pair(b"prefix-check").public_key;
        assert!(!verify(&sig, b"m", &key));
    }
}
