//! Arithmetic modulo the prime subgroup order r.
//!
//! A [`Scalar`] is always fully reduced; scalar multiplication on the curve
//! therefore never sees an out-of-range multiplier. Cofactor clearing
//! ("clamping") of key-derived seeds lives here too.

use core::cmp::Ordering;

use once_cell::sync::Lazy;

use crate::field::{
    be_limbs_padded, cmp_limbs, limbs_to_be_bytes, Limbs, Modulus, LIMBS,
};

/// r = 2^446 - 13818066809895115352007386748515426880336692474882178609894547503885,
/// little-endian limbs.
const GROUP_ORDER: Limbs = [
    0x2378_C292_AB58_44F3,
    0x216C_C272_8DC5_8F55,
    0xC44E_DB49_AED6_3690,
    0xFFFF_FFFF_7CCA_23E9,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0x3FFF_FFFF_FFFF_FFFF,
];

static ORDER: Lazy<Modulus> = Lazy::new(|| Modulus::new(GROUP_ORDER));

/// An integer mod r, canonical little-endian limbs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scalar(Limbs);

impl Scalar {
    pub fn zero() -> Self {
        Scalar([0u64; LIMBS])
    }

    pub fn one() -> Self {
        let mut limbs = [0u64; LIMBS];
        limbs[0] = 1;
        Scalar(limbs)
    }

    pub fn from_u64(v: u64) -> Self {
        let mut limbs = [0u64; LIMBS];
        limbs[0] = v;
        Scalar(limbs)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u64; LIMBS]
    }

    /// Reduces an unsigned big-endian byte string of any length mod r.
    pub fn reduce_bytes(bytes: &[u8]) -> Self {
        Scalar(ORDER.reduce_bytes(bytes))
    }

    /// Cofactor clearing of a key-derived seed: left-shift by 2 then reduce
    /// mod r, realized as reduce-then-double-twice (congruent for every
    /// input).
    pub fn clamp(seed: &[u8]) -> Self {
        let reduced = Self::reduce_bytes(seed);
        reduced.double().double()
    }

    pub fn add(&self, other: &Self) -> Self {
        Scalar(ORDER.add(&self.0, &other.0))
    }

    pub fn sub(&self, other: &Self) -> Self {
        Scalar(ORDER.sub(&self.0, &other.0))
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }

    pub fn mul(&self, other: &Self) -> Self {
        // one operand lifted to Montgomery form cancels the R^{-1} of the
        // reduction, so the product comes out canonical
        let lifted = ORDER.to_mont(&self.0);
        Scalar(ORDER.mont_mul(&lifted, &other.0))
    }

    /// Fixed-width 56-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 56] {
        limbs_to_be_bytes(&self.0)
    }

    /// Parses a 56-byte big-endian value, rejecting anything at or above r.
    pub fn from_bytes_checked(bytes: &[u8; 56]) -> Option<Self> {
        let limbs = be_limbs_padded(bytes);
        if cmp_limbs(&limbs, &GROUP_ORDER) != Ordering::Less {
            return None;
        }
        Some(Scalar(limbs))
    }

    /// Bit `i` of the canonical value (0 = least significant).
    pub(crate) fn bit(&self, i: usize) -> bool {
        (self.0[i / 64] >> (i % 64)) & 1 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_ring_arithmetic() {
        let three = Scalar::from_u64(3);
        let four = Scalar::from_u64(4);
        assert_eq!(three.mul(&four), Scalar::from_u64(12));
        assert_eq!(three.add(&four), Scalar::from_u64(7));
        assert_eq!(four.sub(&three), Scalar::one());
        assert_eq!(three.double(), Scalar::from_u64(6));
    }

    #[test]
    fn subtraction_wraps_through_order() {
        let r_minus_1 = Scalar::zero().sub(&Scalar::one());
        assert_eq!(r_minus_1.add(&Scalar::one()), Scalar::zero());
        assert!(!r_minus_1.is_zero());
    }

    #[test]
    fn reduce_bytes_folds_the_order_to_zero() {
        let r_minus_1 = Scalar::zero().sub(&Scalar::one());
        let reduced = Scalar::reduce_bytes(&r_minus_1.to_bytes());
        assert_eq!(reduced, r_minus_1);
        assert_eq!(reduced.add(&Scalar::one()), Scalar::zero());
    }

    #[test]
    fn reduce_handles_oversized_input() {
        // 64 bytes of 0xFF is far above r and must still come out reduced
        let big = [0xFFu8; 64];
        let reduced = Scalar::reduce_bytes(&big);
        assert!(Scalar::from_bytes_checked(&reduced.to_bytes()).is_some());
    }

    #[test]
    fn clamp_matches_shift_then_reduce() {
        // for inputs below r the two readings coincide exactly
        let small = Scalar::from_u64(0x1234_5678).to_bytes();
        let clamped = Scalar::clamp(&small);
        assert_eq!(clamped, Scalar::from_u64(0x1234_5678 << 2));
    }

    #[test]
    fn byte_codec_round_trips_and_checks_range() {
        let s = Scalar::from_u64(0xABCD_EF01);
        assert_eq!(Scalar::from_bytes_checked(&s.to_bytes()), Some(s));
        let r_minus_1 = Scalar::zero().sub(&Scalar::one());
        let mut above = r_minus_1.to_bytes();
        // r-1 is ...44F2; +1 gives r itself, which must be rejected
        above[55] += 1;
        assert_eq!(Scalar::from_bytes_checked(&above), None);
    }

    #[test]
    fn distributivity_of_scalar_ring() {
        let a = Scalar::reduce_bytes(b"a-scalar-seed-for-ring-tests");
        let b = Scalar::reduce_bytes(b"b-scalar-seed-for-ring-tests");
        let c = Scalar::reduce_bytes(b"c-scalar-seed-for-ring-tests");
        let left = a.mul(&b.add(&c));
        let right = a.mul(&b).add(&a.mul(&c));
        assert_eq!(left, right);
    }
}
