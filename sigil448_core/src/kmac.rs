//! KMACXOF256 and the digest/tag services derived from it.
//!
//! This is the single keyed, arbitrary-length-output primitive everything
//! else in the crate composes: hashing, MACs, key derivation, keystreams and
//! challenge computation are all differently-labeled calls into
//! [`kmac_xof_256`].

use zeroize::Zeroizing;

use crate::error::SigilError;
use crate::sponge::Sponge;

/// `KMACXOF256(K, X, L, S)` with `L` in bits.
///
/// `output_bits` must be a non-negative multiple of 8; the output is
/// byte-aligned by construction. Deterministic and side-effect-free.
pub fn kmac_xof_256(
    key: &[u8],
    data: &[u8],
    output_bits: usize,
    custom: &[u8],
) -> Result<Vec<u8>, SigilError> {
    if output_bits % 8 != 0 {
        return Err(SigilError::UnalignedOutputLength { bits: output_bits });
    }
    let mut sponge = Sponge::kmac(key, custom);
    sponge.absorb(data);
    sponge.finalize_to_xof();
    Ok(sponge.squeeze(output_bits / 8))
}

/// 512-bit message digest: `KMACXOF256("", m, 512, "D")`.
pub fn digest(data: &[u8]) -> [u8; 64] {
    kmac_block64(b"", data, b"D")
}

/// 512-bit passphrase-keyed authentication tag: `KMACXOF256(pw, m, 512, "T")`.
pub fn authentication_tag(passphrase: &[u8], data: &[u8]) -> [u8; 64] {
    kmac_block64(passphrase, data, b"T")
}

/// Fixed 512-bit KMAC output.
pub(crate) fn kmac_block64(key: &[u8], data: &[u8], custom: &[u8]) -> [u8; 64] {
    let out = kmac_xof_256(key, data, 512, custom).expect("512 bits is byte-aligned");
    let mut block = [0u8; 64];
    block.copy_from_slice(&out);
    block
}

/// `len`-byte keystream: `KMACXOF256(key, "", 8 * len, custom)`.
pub(crate) fn keystream(key: &[u8], len: usize, custom: &[u8]) -> Vec<u8> {
    kmac_xof_256(key, b"", len * 8, custom).expect("whole bytes requested")
}

/// 1024-bit KMAC output split into two 64-byte keys, in output order.
pub(crate) fn derive_key_halves(
    key: &[u8],
    custom: &[u8],
) -> (Zeroizing<[u8; 64]>, Zeroizing<[u8; 64]>) {
    let okm = Zeroizing::new(kmac_xof_256(key, b"", 1024, custom).expect("1024 bits is byte-aligned"));
    let mut first = Zeroizing::new([0u8; 64]);
    let mut second = Zeroizing::new([0u8; 64]);
    first.copy_from_slice(&okm[..64]);
    second.copy_from_slice(&okm[64..]);
    (first, second)
}

/// Branchless full-width comparison for tags and challenges.
pub(crate) fn tags_match(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unaligned_output_length() {
        let err = kmac_xof_256(b"k", b"x", 511, b"S").unwrap_err();
        assert_eq!(err, SigilError::UnalignedOutputLength { bits: 511 });
    }

    #[test]
    fn zero_length_output_is_empty() {
        assert!(kmac_xof_256(b"k", b"x", 0, b"S").unwrap().is_empty());
    }

    #[test]
    fn deterministic_for_identical_arguments() {
        let a = kmac_xof_256(b"key", b"data", 512, b"S").unwrap();
        let b = kmac_xof_256(b"key", b"data", 512, b"S").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn any_argument_change_diverges() {
        let base = kmac_xof_256(b"key", b"data", 256, b"S").unwrap();
        assert_ne!(base, kmac_xof_256(b"yek", b"data", 256, b"S").unwrap());
        assert_ne!(base, kmac_xof_256(b"key", b"atad", 256, b"S").unwrap());
        assert_ne!(base, kmac_xof_256(b"key", b"data", 256, b"T").unwrap());
        // a longer output extends the shorter one, it does not re-randomize it
        let longer = kmac_xof_256(b"key", b"data", 512, b"S").unwrap();
        assert_eq!(base, longer[..32].to_vec());
    }

    #[test]
    fn digest_and_tag_are_distinct_domains() {
        assert_ne!(digest(b"m").to_vec(), authentication_tag(b"", b"m").to_vec());
    }

    #[test]
    fn long_inputs_cross_rate_boundaries() {
        let long_key = vec![0x11u8; 300];
        let long_msg = vec![0x22u8; 1000];
        let a = kmac_xof_256(&long_key, &long_msg, 512, b"S").unwrap();
        let b = kmac_xof_256(&long_key, &long_msg, 512, b"S").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn tags_match_is_exact() {
        assert!(tags_match(b"abc", b"abc"));
        assert!(!tags_match(b"abc", b"abd"));
        assert!(!tags_match(b"abc", b"abcd"));
    }
}
