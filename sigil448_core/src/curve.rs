//! Point arithmetic on the twisted Edwards curve
//! x^2 + y^2 = 1 + d*x^2*y^2 over the 448-bit field, with d = -39081 and
//! cofactor 4.
//!
//! The addition law is complete: d is a quadratic non-residue, so both
//! denominators are invertible for every pair of curve points and there is
//! no separate doubling case. The base point G = (8, y) with even y is
//! constructed through the curve's own square root and checked against the
//! curve equation at first use.

use once_cell::sync::Lazy;

use crate::error::SigilError;
use crate::field::FieldElement;
use crate::scalar::Scalar;

/// Length of an encoded point: 57-byte x plus one parity byte.
pub const POINT_BYTES: usize = 58;

static EDWARDS_D: Lazy<FieldElement> = Lazy::new(|| FieldElement::from_u64(39081).neg());

static BASE_POINT: Lazy<CurvePoint> = Lazy::new(|| {
    let g = CurvePoint::from_x(&FieldElement::from_u64(8), false)
        .expect("base point x = 8 lifts to the curve");
    assert!(g.is_on_curve(), "base point fails the curve equation");
    g
});

/// An affine point. The identity element is (0, 1); equality is
/// coordinate-wise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurvePoint {
    x: FieldElement,
    y: FieldElement,
}

impl CurvePoint {
    pub fn identity() -> Self {
        CurvePoint {
            x: FieldElement::zero(),
            y: FieldElement::one(),
        }
    }

    /// The fixed generator of the prime-order subgroup.
    pub fn base() -> Self {
        *BASE_POINT
    }

    pub fn x(&self) -> FieldElement {
        self.x
    }

    pub fn y(&self) -> FieldElement {
        self.y
    }

    /// 57-byte big-endian encoding of the x-coordinate, as fed into KMAC by
    /// the protocol layer.
    pub fn x_bytes(&self) -> [u8; 57] {
        self.x.to_bytes()
    }

    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.y == FieldElement::one()
    }

    /// Evaluates both sides of the curve equation.
    pub fn is_on_curve(&self) -> bool {
        let x2 = self.x.square();
        let y2 = self.y.square();
        let lhs = x2.add(&y2);
        let rhs = FieldElement::one().add(&EDWARDS_D.mul(&x2).mul(&y2));
        lhs == rhs
    }

    pub fn negate(&self) -> Self {
        CurvePoint {
            x: self.x.neg(),
            y: self.y,
        }
    }

    /// Complete Edwards addition.
    pub fn add(&self, other: &Self) -> Self {
        let xx = self.x.mul(&other.x);
        let yy = self.y.mul(&other.y);
        let xy = self.x.mul(&other.y);
        let yx = self.y.mul(&other.x);
        let dxxyy = EDWARDS_D.mul(&xx).mul(&yy);
        let den_x = FieldElement::one().add(&dxxyy);
        let den_y = FieldElement::one().sub(&dxxyy);
        // both denominators are nonzero on this curve, so their product is
        // invertible and one inversion serves both coordinates
        let inv_product = den_x.mul(&den_y).invert();
        let x3 = xy.add(&yx).mul(&inv_product).mul(&den_y);
        let y3 = yy.sub(&xx).mul(&inv_product).mul(&den_x);
        CurvePoint { x: x3, y: y3 }
    }

    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// MSB-first double-and-add. The scalar is already reduced mod r by
    /// construction; a zero scalar yields the identity.
    pub fn scalar_multiply(&self, s: &Scalar) -> Self {
        let mut acc = CurvePoint::identity();
        for i in (0..448).rev() {
            acc = acc.add(&acc);
            if s.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// Lifts an x-coordinate to the point with the requested y parity via
    /// y^2 = (1 - x^2) / (1 - d*x^2).
    pub fn from_x(x: &FieldElement, odd_y: bool) -> Result<Self, SigilError> {
        let x2 = x.square();
        let numerator = FieldElement::one().sub(&x2);
        let denominator = FieldElement::one().sub(&EDWARDS_D.mul(&x2));
        let y2 = numerator.mul(&denominator.invert());
        let y = y2.sqrt(odd_y)?;
        Ok(CurvePoint { x: *x, y })
    }

    /// 58-byte encoding: fixed-width x followed by one byte carrying the
    /// parity of y.
    pub fn encode(&self) -> [u8; POINT_BYTES] {
        let mut out = [0u8; POINT_BYTES];
        out[..57].copy_from_slice(&self.x.to_bytes());
        out[57] = self.y.is_odd() as u8;
        out
    }

    /// Decodes a 58-byte encoding. Every byte is load-bearing: the x must be
    /// canonical, the parity byte must be 0 or 1, and the square root must
    /// exist. Callers consuming untrusted input must still run
    /// [`CurvePoint::is_on_curve`].
    pub fn decode(bytes: &[u8]) -> Result<Self, SigilError> {
        if bytes.len() != POINT_BYTES {
            return Err(SigilError::PointLength {
                expected: POINT_BYTES,
                found: bytes.len(),
            });
        }
        let parity = bytes[57];
        if parity > 1 {
            return Err(SigilError::NonCanonicalPoint);
        }
        let x = FieldElement::from_bytes(bytes[..57].try_into().expect("57-byte slice"))?;
        Self::from_x(&x, parity == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_point_is_on_curve_and_nontrivial() {
        let g = CurvePoint::base();
        assert!(g.is_on_curve());
        assert!(!g.is_identity());
        assert_eq!(g.x(), FieldElement::from_u64(8));
        assert!(!g.y().is_odd());
    }

    #[test]
    fn identity_is_neutral() {
        let g = CurvePoint::base();
        let o = CurvePoint::identity();
        assert!(o.is_on_curve());
        assert_eq!(g.add(&o), g);
        assert_eq!(o.add(&g), g);
        assert_eq!(o.add(&o), o);
    }

    #[test]
    fn opposite_points_cancel() {
        let g = CurvePoint::base();
        assert_eq!(g.add(&g.negate()), CurvePoint::identity());
    }

    #[test]
    fn doubling_matches_addition() {
        let g = CurvePoint::base();
        assert_eq!(g.double(), g.add(&g));
        assert!(g.double().is_on_curve());
    }

    #[test]
    fn small_multiples() {
        let g = CurvePoint::base();
        assert_eq!(g.scalar_multiply(&Scalar::zero()), CurvePoint::identity());
        assert_eq!(g.scalar_multiply(&Scalar::one()), g);
        assert_eq!(g.scalar_multiply(&Scalar::from_u64(2)), g.double());
        let four = g.scalar_multiply(&Scalar::from_u64(4));
        assert_eq!(four, g.double().double());
        assert!(!four.is_identity());
    }

    #[test]
    fn encode_decode_round_trips() {
        let g = CurvePoint::base();
        let restored = CurvePoint::decode(&g.encode()).unwrap();
        assert_eq!(restored, g);
        let g3 = g.scalar_multiply(&Scalar::from_u64(3));
        assert_eq!(CurvePoint::decode(&g3.encode()).unwrap(), g3);
    }

    #[test]
    fn decode_rejects_malformed_encodings() {
        let mut enc = CurvePoint::base().encode();
        enc[57] = 2;
        assert_eq!(
            CurvePoint::decode(&enc),
            Err(SigilError::NonCanonicalPoint)
        );
        let mut high = CurvePoint::base().encode();
        high[0] = 0x80;
        assert_eq!(
            CurvePoint::decode(&high),
            Err(SigilError::NonCanonicalPoint)
        );
        assert_eq!(
            CurvePoint::decode(&[0u8; 57]),
            Err(SigilError::PointLength {
                expected: POINT_BYTES,
                found: 57
            })
        );
    }

    #[test]
    fn decode_honors_the_parity_byte() {
        let g = CurvePoint::base();
        let mut enc = g.encode();
        enc[57] = 1;
        let flipped = CurvePoint::decode(&enc).unwrap();
        assert!(flipped.is_on_curve());
        assert_eq!(flipped.x(), g.x());
        assert_eq!(flipped.y(), g.y().neg());
        assert!(flipped.y().is_odd());
    }
}
