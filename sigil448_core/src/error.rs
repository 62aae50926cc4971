use thiserror::Error;

/// Terminal failures of the engine.
///
/// Every variant is an explicit return-level rejection, never ordinary
/// control flow. A failed decrypt or verify releases no plaintext and no
/// partial acceptance.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SigilError {
    #[error("output length must be a whole number of bytes, got {bits} bits")]
    UnalignedOutputLength { bits: usize },

    #[error("cryptogram too short: need at least {min} bytes, found {found}")]
    CryptogramTooShort { min: usize, found: usize },

    #[error("signature must be exactly {expected} bytes, found {found}")]
    SignatureLength { expected: usize, found: usize },

    #[error("encoded point must be exactly {expected} bytes, found {found}")]
    PointLength { expected: usize, found: usize },

    #[error("encoded point is not canonical")]
    NonCanonicalPoint,

    #[error("x-coordinate does not lift to the curve: square root does not exist")]
    NoSquareRoot,

    #[error("point is not on the curve")]
    PointNotOnCurve,

    #[error("authentication tag mismatch")]
    AuthenticationFailed,
}
