//! Fixed-width arithmetic modulo the 448-bit field prime.
//!
//! Values are 7 little-endian 64-bit limbs. [`Modulus`] is the shared
//! Montgomery core (R = 2^448) used both here and for the scalar ring in
//! [`crate::scalar`]; every derived constant (R^2, Montgomery one, the
//! negated limb inverse, the Fermat and square-root exponents) is computed
//! from the modulus limbs at first use rather than transcribed by hand.
//! All reductions are explicit: an element is always below its modulus.

use core::cmp::Ordering;

use once_cell::sync::Lazy;

use crate::error::SigilError;

pub(crate) const LIMBS: usize = 7;
const WIDE: usize = 2 * LIMBS;

pub(crate) type Limbs = [u64; LIMBS];

/// p = 2^448 - 2^224 - 1, little-endian limbs.
const FIELD_PRIME: Limbs = [
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFE_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
    0xFFFF_FFFF_FFFF_FFFF,
];

static FIELD: Lazy<Modulus> = Lazy::new(|| Modulus::new(FIELD_PRIME));

/// p - 2, the Fermat inversion exponent.
static FERMAT_EXP: Lazy<Limbs> = Lazy::new(|| {
    let mut two = [0u64; LIMBS];
    two[0] = 2;
    sub_limbs(&FIELD_PRIME, &two).0
});

/// (p + 1) / 4, the square-root exponent (valid because p = 3 mod 4),
/// computed as (p >> 2) + 1.
static SQRT_EXP: Lazy<Limbs> = Lazy::new(|| {
    let mut one = [0u64; LIMBS];
    one[0] = 1;
    add_limbs(&shr2(&FIELD_PRIME), &one).0
});

/// An odd modulus with its derived Montgomery constants.
pub(crate) struct Modulus {
    m: Limbs,
    /// -m^{-1} mod 2^64
    neg_inv: u64,
    /// R^2 mod m
    r2: Limbs,
    /// R mod m, the Montgomery representation of 1
    one: Limbs,
}

impl Modulus {
    pub(crate) fn new(m: Limbs) -> Self {
        debug_assert!(m[0] & 1 == 1, "modulus must be odd");
        // Newton iteration for the inverse of m[0] mod 2^64: the seed is
        // correct to 3 bits and each step doubles the precision.
        let mut inv = m[0];
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(m[0].wrapping_mul(inv)));
        }
        let neg_inv = inv.wrapping_neg();

        // R mod m by doubling 1 for 448 steps, R^2 mod m by 448 more.
        let mut acc = [0u64; LIMBS];
        acc[0] = 1;
        for _ in 0..448 {
            acc = double_mod(&acc, &m);
        }
        let one = acc;
        for _ in 0..448 {
            acc = double_mod(&acc, &m);
        }
        let r2 = acc;

        Modulus { m, neg_inv, r2, one }
    }

    /// Montgomery reduction of a double-width value: returns t * R^{-1} mod m.
    ///
    /// Valid for every 14-limb input; the result is fully reduced.
    pub(crate) fn redc(&self, t: [u64; WIDE]) -> Limbs {
        let mut t = t;
        let mut extra: u64 = 0;
        for i in 0..LIMBS {
            let u = t[i].wrapping_mul(self.neg_inv);
            let mut carry: u128 = 0;
            for j in 0..LIMBS {
                let sum = t[i + j] as u128 + u as u128 * self.m[j] as u128 + carry;
                t[i + j] = sum as u64;
                carry = sum >> 64;
            }
            let mut k = i + LIMBS;
            while carry != 0 {
                if k == WIDE {
                    extra += carry as u64;
                    break;
                }
                let sum = t[k] as u128 + carry;
                t[k] = sum as u64;
                carry = sum >> 64;
                k += 1;
            }
        }
        let mut out = [0u64; LIMBS];
        out.copy_from_slice(&t[LIMBS..]);
        // The value is extra * 2^448 + out with extra <= 1; when the carry
        // bit is set, out < m, so one wrapping subtraction folds it in.
        if extra != 0 {
            out = sub_limbs(&out, &self.m).0;
        }
        while cmp_limbs(&out, &self.m) != Ordering::Less {
            out = sub_limbs(&out, &self.m).0;
        }
        out
    }

    pub(crate) fn mont_mul(&self, a: &Limbs, b: &Limbs) -> Limbs {
        self.redc(mul_wide(a, b))
    }

    pub(crate) fn to_mont(&self, a: &Limbs) -> Limbs {
        self.mont_mul(a, &self.r2)
    }

    pub(crate) fn from_mont(&self, a: &Limbs) -> Limbs {
        let mut t = [0u64; WIDE];
        t[..LIMBS].copy_from_slice(a);
        self.redc(t)
    }

    /// Modular addition of reduced operands; domain-agnostic.
    pub(crate) fn add(&self, a: &Limbs, b: &Limbs) -> Limbs {
        let (sum, carry) = add_limbs(a, b);
        if carry || cmp_limbs(&sum, &self.m) != Ordering::Less {
            sub_limbs(&sum, &self.m).0
        } else {
            sum
        }
    }

    /// Modular subtraction of reduced operands; domain-agnostic.
    pub(crate) fn sub(&self, a: &Limbs, b: &Limbs) -> Limbs {
        let (diff, borrow) = sub_limbs(a, b);
        if borrow {
            add_limbs(&diff, &self.m).0
        } else {
            diff
        }
    }

    /// Montgomery-domain exponentiation, MSB-first square-and-multiply.
    pub(crate) fn pow(&self, base: &Limbs, exp: &Limbs) -> Limbs {
        let mut acc = self.one;
        for i in (0..LIMBS).rev() {
            for bit in (0..64).rev() {
                acc = self.mont_mul(&acc, &acc);
                if (exp[i] >> bit) & 1 == 1 {
                    acc = self.mont_mul(&acc, base);
                }
            }
        }
        acc
    }

    /// Reduces a big-endian byte string of any length mod m, Horner-style in
    /// base 2^448. Returns a canonical (non-Montgomery) value.
    pub(crate) fn reduce_bytes(&self, bytes: &[u8]) -> Limbs {
        const CHUNK: usize = LIMBS * 8;
        let mut acc = [0u64; LIMBS];
        let mut idx = 0;
        let lead = bytes.len() % CHUNK;
        if lead != 0 {
            acc = self.fold_chunk(&acc, &be_limbs_padded(&bytes[..lead]));
            idx = lead;
        }
        while idx < bytes.len() {
            acc = self.fold_chunk(&acc, &be_limbs_padded(&bytes[idx..idx + CHUNK]));
            idx += CHUNK;
        }
        acc
    }

    /// acc * 2^448 + chunk mod m, with acc already reduced.
    fn fold_chunk(&self, acc: &Limbs, chunk: &Limbs) -> Limbs {
        let mut t = [0u64; WIDE];
        t[..LIMBS].copy_from_slice(chunk);
        t[LIMBS..].copy_from_slice(acc);
        self.mont_mul(&self.redc(t), &self.r2)
    }
}

pub(crate) fn cmp_limbs(a: &Limbs, b: &Limbs) -> Ordering {
    for i in (0..LIMBS).rev() {
        if a[i] != b[i] {
            return a[i].cmp(&b[i]);
        }
    }
    Ordering::Equal
}

pub(crate) fn add_limbs(a: &Limbs, b: &Limbs) -> (Limbs, bool) {
    let mut out = [0u64; LIMBS];
    let mut carry = 0u128;
    for i in 0..LIMBS {
        let sum = a[i] as u128 + b[i] as u128 + carry;
        out[i] = sum as u64;
        carry = sum >> 64;
    }
    (out, carry != 0)
}

pub(crate) fn sub_limbs(a: &Limbs, b: &Limbs) -> (Limbs, bool) {
    let mut out = [0u64; LIMBS];
    let mut borrow = 0u64;
    for i in 0..LIMBS {
        let (d1, b1) = a[i].overflowing_sub(b[i]);
        let (d2, b2) = d1.overflowing_sub(borrow);
        out[i] = d2;
        borrow = (b1 | b2) as u64;
    }
    (out, borrow != 0)
}

fn double_mod(a: &Limbs, m: &Limbs) -> Limbs {
    let mut out = [0u64; LIMBS];
    let mut carry = 0u64;
    for i in 0..LIMBS {
        out[i] = (a[i] << 1) | carry;
        carry = a[i] >> 63;
    }
    if carry == 1 || cmp_limbs(&out, m) != Ordering::Less {
        out = sub_limbs(&out, m).0;
    }
    out
}

fn shr2(a: &Limbs) -> Limbs {
    let mut out = [0u64; LIMBS];
    for i in 0..LIMBS {
        out[i] = a[i] >> 2;
        if i + 1 < LIMBS {
            out[i] |= a[i + 1] << 62;
        }
    }
    out
}

fn mul_wide(a: &Limbs, b: &Limbs) -> [u64; WIDE] {
    let mut t = [0u64; WIDE];
    for i in 0..LIMBS {
        let mut carry = 0u128;
        for j in 0..LIMBS {
            let sum = t[i + j] as u128 + a[i] as u128 * b[j] as u128 + carry;
            t[i + j] = sum as u64;
            carry = sum >> 64;
        }
        t[i + LIMBS] = carry as u64;
    }
    t
}

/// Big-endian bytes (at most 56) into little-endian limbs.
pub(crate) fn be_limbs_padded(bytes: &[u8]) -> Limbs {
    debug_assert!(bytes.len() <= LIMBS * 8);
    let mut out = [0u64; LIMBS];
    for (i, &byte) in bytes.iter().rev().enumerate() {
        out[i / 8] |= (byte as u64) << (8 * (i % 8));
    }
    out
}

/// Little-endian limbs into 56 big-endian bytes.
pub(crate) fn limbs_to_be_bytes(a: &Limbs) -> [u8; 56] {
    let mut out = [0u8; 56];
    for i in 0..LIMBS {
        out[56 - 8 * (i + 1)..56 - 8 * i].copy_from_slice(&a[i].to_be_bytes());
    }
    out
}

/// An element of the field mod p = 2^448 - 2^224 - 1, kept in Montgomery
/// form. The representation is canonical, so derived equality is exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement(Limbs);

impl FieldElement {
    pub fn zero() -> Self {
        FieldElement([0u64; LIMBS])
    }

    pub fn one() -> Self {
        FieldElement(FIELD.one)
    }

    pub fn from_u64(v: u64) -> Self {
        let mut limbs = [0u64; LIMBS];
        limbs[0] = v;
        FieldElement(FIELD.to_mont(&limbs))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u64; LIMBS]
    }

    pub fn add(&self, other: &Self) -> Self {
        FieldElement(FIELD.add(&self.0, &other.0))
    }

    pub fn sub(&self, other: &Self) -> Self {
        FieldElement(FIELD.sub(&self.0, &other.0))
    }

    pub fn neg(&self) -> Self {
        FieldElement(FIELD.sub(&[0u64; LIMBS], &self.0))
    }

    pub fn mul(&self, other: &Self) -> Self {
        FieldElement(FIELD.mont_mul(&self.0, &other.0))
    }

    pub fn square(&self) -> Self {
        self.mul(self)
    }

    pub(crate) fn pow(&self, exp: &Limbs) -> Self {
        FieldElement(FIELD.pow(&self.0, exp))
    }

    /// Multiplicative inverse by Fermat's little theorem: a^(p-2) mod p.
    /// Zero maps to zero.
    pub fn invert(&self) -> Self {
        self.pow(&FERMAT_EXP)
    }

    /// Square root with the requested least-significant bit, if one exists.
    ///
    /// The candidate v^((p+1)/4) is parity-corrected by negation and then
    /// verified; a failed verification means v is a non-residue.
    pub fn sqrt(&self, odd: bool) -> Result<Self, SigilError> {
        let mut root = self.pow(&SQRT_EXP);
        if root.is_odd() != odd {
            root = root.neg();
        }
        if root.square() != *self {
            return Err(SigilError::NoSquareRoot);
        }
        Ok(root)
    }

    pub fn is_odd(&self) -> bool {
        FIELD.from_mont(&self.0)[0] & 1 == 1
    }

    /// Fixed-width 57-byte big-endian encoding (leading byte always zero).
    pub fn to_bytes(&self) -> [u8; 57] {
        let canonical = FIELD.from_mont(&self.0);
        let mut out = [0u8; 57];
        out[1..].copy_from_slice(&limbs_to_be_bytes(&canonical));
        out
    }

    /// Parses the 57-byte encoding, rejecting values at or above p and any
    /// nonzero leading byte.
    pub fn from_bytes(bytes: &[u8; 57]) -> Result<Self, SigilError> {
        if bytes[0] != 0 {
            return Err(SigilError::NonCanonicalPoint);
        }
        let limbs = be_limbs_padded(&bytes[1..]);
        if cmp_limbs(&limbs, &FIELD_PRIME) != Ordering::Less {
            return Err(SigilError::NonCanonicalPoint);
        }
        Ok(FieldElement(FIELD.to_mont(&limbs)))
    }
}
