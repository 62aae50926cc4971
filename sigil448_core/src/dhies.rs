//! Public-key authenticated encryption in the DHIES style.
//!
//! Encrypt: an ephemeral clamped scalar k yields the shared point W = k*V
//! and the transmitted point Z = k*G; (ka || ke) <- KMACXOF256(Wx, "", 1024,
//! "PK") keys the tag and the keystream. Decrypt recovers W = s*Z — the same
//! Diffie-Hellman point by commutativity of the scalar action — and accepts
//! iff the recomputed tag matches.

use log::debug;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::curve::{CurvePoint, POINT_BYTES};
use crate::error::SigilError;
use crate::keys::derive_private_scalar;
use crate::kmac::{derive_key_halves, keystream, kmac_block64, tags_match};
use crate::rng::secure_rng;
use crate::scalar::Scalar;

/// Width of the encoded ephemeral point Z.
pub const EPHEMERAL_BYTES: usize = POINT_BYTES;
/// Width of the authentication tag t.
pub const TAG_BYTES: usize = 64;
/// Shortest well-formed cryptogram: Z plus t around an empty ciphertext.
pub const MIN_CRYPTOGRAM_BYTES: usize = EPHEMERAL_BYTES + TAG_BYTES;

/// The (Z, c, t) record. Persisted as `encode(Z) || c || t`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AsymmetricCryptogram {
    pub ephemeral: [u8; EPHEMERAL_BYTES],
    pub c: Vec<u8>,
    pub t: [u8; TAG_BYTES],
}

impl AsymmetricCryptogram {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(EPHEMERAL_BYTES + self.c.len() + TAG_BYTES);
        out.extend_from_slice(&self.ephemeral);
        out.extend_from_slice(&self.c);
        out.extend_from_slice(&self.t);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigilError> {
        if bytes.len() < MIN_CRYPTOGRAM_BYTES {
            return Err(SigilError::CryptogramTooShort {
                min: MIN_CRYPTOGRAM_BYTES,
                found: bytes.len(),
            });
        }
        let mut ephemeral = [0u8; EPHEMERAL_BYTES];
        ephemeral.copy_from_slice(&bytes[..EPHEMERAL_BYTES]);
        let mut t = [0u8; TAG_BYTES];
        t.copy_from_slice(&bytes[bytes.len() - TAG_BYTES..]);
        Ok(AsymmetricCryptogram {
            ephemeral,
            c: bytes[EPHEMERAL_BYTES..bytes.len() - TAG_BYTES].to_vec(),
            t,
        })
    }
}

/// Encrypts under a public key with a fresh OS-random ephemeral scalar.
pub fn encrypt_asymmetric(message: &[u8], public_key: &CurvePoint) -> AsymmetricCryptogram {
    encrypt_asymmetric_with_rng(message, public_key, &mut secure_rng())
}

/// Encrypts under a public key with caller-supplied randomness.
pub fn encrypt_asymmetric_with_rng<R: CryptoRng + RngCore>(
    message: &[u8],
    public_key: &CurvePoint,
    rng: &mut R,
) -> AsymmetricCryptogram {
    let mut k_seed = Zeroizing::new([0u8; 64]);
    rng.fill_bytes(k_seed.as_mut());
    let k = Scalar::clamp(k_seed.as_ref());
    let shared = public_key.scalar_multiply(&k);
    let ephemeral = CurvePoint::base().scalar_multiply(&k);
    let (c, t) = seal(message, &shared);
    debug!("asymmetric encrypt: {} message bytes", message.len());
    AsymmetricCryptogram {
        ephemeral: ephemeral.encode(),
        c,
        t,
    }
}

/// Decrypts a serialized cryptogram with the passphrase-derived private
/// scalar. Rejects short inputs, malformed or off-curve points, and any tag
/// mismatch; no plaintext is released on failure.
pub fn decrypt_asymmetric(cryptogram: &[u8], passphrase: &[u8]) -> Result<Vec<u8>, SigilError> {
    let record = AsymmetricCryptogram::from_bytes(cryptogram)?;
    let ephemeral = CurvePoint::decode(&record.ephemeral)?;
    if !ephemeral.is_on_curve() {
        return Err(SigilError::PointNotOnCurve);
    }
    let s = derive_private_scalar(passphrase);
    let shared = ephemeral.scalar_multiply(&s);
    let (ka, ke) = derive_point_keys(&shared);
    let mut m = keystream(ke.as_ref(), record.c.len(), b"PKE");
    for (mb, cb) in m.iter_mut().zip(&record.c) {
        *mb ^= cb;
    }
    let expected = kmac_block64(ka.as_ref(), &m, b"PKA");
    if !tags_match(&expected, &record.t) {
        debug!("asymmetric decrypt rejected: tag mismatch");
        m.zeroize();
        return Err(SigilError::AuthenticationFailed);
    }
    debug!("asymmetric decrypt: {} message bytes", m.len());
    Ok(m)
}

fn seal(message: &[u8], shared: &CurvePoint) -> (Vec<u8>, [u8; TAG_BYTES]) {
    let (ka, ke) = derive_point_keys(shared);
    let mut c = keystream(ke.as_ref(), message.len(), b"PKE");
    for (cb, mb) in c.iter_mut().zip(message) {
        *cb ^= mb;
    }
    let t = kmac_block64(ka.as_ref(), message, b"PKA");
    (c, t)
}

/// (ka || ke) <- KMACXOF256(Wx, "", 1024, "PK"), in that order.
fn derive_point_keys(shared: &CurvePoint) -> (Zeroizing<[u8; 64]>, Zeroizing<[u8; 64]>) {
    let wx = Zeroizing::new(shared.x_bytes());
    derive_key_halves(wx.as_ref(), b"PK")
}
