//! Algorithm identifiers for imported keys

use std::fmt;

use thiserror::Error;
use tracing::warn;

pub(crate) const TPM_ALG_RSA: u16 = 0x0001;
pub(crate) const TPM_ALG_AES: u16 = 0x0006;
pub(crate) const TPM_ALG_SHA256: u16 = 0x000B;
pub(crate) const TPM_ALG_NULL: u16 = 0x0010;
pub(crate) const TPM_ALG_ECC: u16 = 0x0023;
pub(crate) const TPM_ALG_CFB: u16 = 0x0043;

/// Asymmetric algorithm of the key being imported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    Rsa,
    Ecc,
}

impl Algorithm {
    /// Select the algorithm from a caller-supplied selector
    ///
    /// A selector starting with `ECC` selects ECC. Anything else selects RSA,
    /// including values that are not recognized at all.
    pub fn from_selector(selector: &str) -> Self {
        if selector.starts_with("ECC") {
            return Self::Ecc;
        }
        if !selector.starts_with("RSA") {
            warn!("Unrecognized algorithm selector {selector:?}, using RSA");
        }
        Self::Rsa
    }

    /// `TPM_ALG_ID` of the algorithm
    pub fn alg_id(self) -> u16 {
        match self {
            Algorithm::Rsa => TPM_ALG_RSA,
            Algorithm::Ecc => TPM_ALG_ECC,
        }
    }

    pub fn from_alg_id(alg_id: u16) -> Result<Self, AlgorithmError> {
        match alg_id {
            TPM_ALG_RSA => Ok(Algorithm::Rsa),
            TPM_ALG_ECC => Ok(Algorithm::Ecc),
            _ => Err(AlgorithmError::Unsupported { alg_id }),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Rsa => f.write_str("RSA"),
            Algorithm::Ecc => f.write_str("ECC"),
        }
    }
}

/// Elliptic curve of ECC key material (`TPM_ECC_CURVE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EccCurve {
    NistP256,
    NistP384,
}

impl EccCurve {
    pub fn curve_id(self) -> u16 {
        match self {
            EccCurve::NistP256 => 0x0003,
            EccCurve::NistP384 => 0x0004,
        }
    }

    pub fn from_curve_id(curve_id: u16) -> Result<Self, AlgorithmError> {
        match curve_id {
            0x0003 => Ok(EccCurve::NistP256),
            0x0004 => Ok(EccCurve::NistP384),
            _ => Err(AlgorithmError::UnsupportedCurve { curve_id }),
        }
    }

    /// Byte length of a coordinate or private scalar
    pub fn coordinate_size(self) -> usize {
        match self {
            EccCurve::NistP256 => 32,
            EccCurve::NistP384 => 48,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("Algorithm not supported: 0x{alg_id:04x}")]
    Unsupported { alg_id: u16 },

    #[error("Curve not supported: 0x{curve_id:04x}")]
    UnsupportedCurve { curve_id: u16 },
}
