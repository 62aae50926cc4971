//! From-scratch cryptographic engine built on a single keyed primitive.
//!
//! Implements KMACXOF256 on top of a hand-written Keccak-f[1600] sponge, and
//! an Ed448-Goldilocks cryptosystem — Schnorr signatures and DHIES-style
//! public-key encryption — expressed purely as compositions of KMAC calls
//! and curve operations, plus a KMAC-based symmetric authenticated-
//! encryption scheme.
//!
//! # Crate layout
//!
//! * [`keccak`] -- the Keccak-f[1600] permutation.
//! * [`sponge`] -- sponge/cSHAKE core and the SP 800-185 string encodings.
//! * [`kmac`] -- KMACXOF256 and the digest/tag services derived from it.
//! * [`field`] -- fixed-width arithmetic mod p = 2^448 - 2^224 - 1.
//! * [`scalar`] -- arithmetic mod the prime subgroup order r.
//! * [`curve`] -- complete twisted-Edwards point arithmetic (d = -39081).
//! * [`keys`] -- passphrase-derived key pairs.
//! * [`symmetric`] -- passphrase-based authenticated encryption.
//! * [`dhies`] -- public-key authenticated encryption.
//! * [`schnorr`] -- deterministic Schnorr signatures.
//! * [`error`] -- the terminal failure taxonomy.
//! * [`rng`] -- injectable randomness seams.

pub mod curve;
pub mod dhies;
pub mod error;
pub mod field;
pub mod keccak;
pub mod keys;
pub mod kmac;
pub mod rng;
pub mod scalar;
pub mod schnorr;
pub mod sponge;
pub mod symmetric;

pub use crate::curve::CurvePoint;
pub use crate::dhies::{
    decrypt_asymmetric, encrypt_asymmetric, encrypt_asymmetric_with_rng, AsymmetricCryptogram,
};
pub use crate::error::SigilError;
pub use crate::field::FieldElement;
pub use crate::keys::{generate_key_pair, parse_public_key, KeyPair};
pub use crate::kmac::{authentication_tag, digest, kmac_xof_256};
pub use crate::rng::{derive_rng, secure_rng, SecureRng};
pub use crate::scalar::Scalar;
pub use crate::schnorr::{sign, verify, Signature};
pub use crate::sponge::shake256;
pub use crate::symmetric::{
    decrypt_symmetric, encrypt_symmetric, encrypt_symmetric_with_rng, SymmetricCryptogram,
};
