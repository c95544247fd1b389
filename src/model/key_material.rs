use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

use super::{Algorithm, EccCurve};

/// Raw RSA private key material: public modulus and exponent plus one prime
#[derive(Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    modulus: Vec<u8>,
    exponent: u32,
    prime: Zeroizing<Vec<u8>>,
}

impl RsaKeyMaterial {
    pub const SUPPORTED_KEY_BITS: [u16; 2] = [1024, 2048];

    /// An exponent of zero selects the default exponent 65537.
    pub fn new(modulus: &[u8], exponent: u32, prime: &[u8]) -> Result<Self, KeyMaterialError> {
        let bits = modulus.len() * 8;
        if !Self::SUPPORTED_KEY_BITS
            .iter()
            .any(|&supported| usize::from(supported) == bits)
        {
            return Err(KeyMaterialError::UnsupportedKeySize { bits });
        }
        if modulus[0] & 0x80 == 0 {
            return Err(KeyMaterialError::InvalidValue {
                component: "modulus",
                reason: "most significant bit is not set".to_string(),
            });
        }
        if prime.len() != modulus.len() / 2 {
            return Err(KeyMaterialError::InvalidLength {
                component: "prime",
                expected: modulus.len() / 2,
                actual: prime.len(),
            });
        }
        if prime.iter().all(|&b| b == 0) {
            return Err(KeyMaterialError::InvalidValue {
                component: "prime",
                reason: "prime is zero".to_string(),
            });
        }
        if exponent != 0 && (exponent < 3 || exponent % 2 == 0) {
            return Err(KeyMaterialError::InvalidExponent { exponent });
        }

        Ok(Self {
            modulus: modulus.to_vec(),
            exponent,
            prime: Zeroizing::new(prime.to_vec()),
        })
    }

    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    pub fn exponent(&self) -> u32 {
        self.exponent
    }

    pub fn prime(&self) -> &[u8] {
        &self.prime
    }

    pub fn key_bits(&self) -> u16 {
        (self.modulus.len() * 8) as u16
    }
}

impl fmt::Debug for RsaKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RsaKeyMaterial {{ bits: {}, exponent: {}, modulus: {}.., prime: [REDACTED] }}",
            self.key_bits(),
            self.exponent,
            hex::encode(&self.modulus[..8])
        )
    }
}

/// Raw ECC private key material: public point and private scalar
#[derive(Clone, PartialEq, Eq)]
pub struct EccKeyMaterial {
    curve: EccCurve,
    x: Vec<u8>,
    y: Vec<u8>,
    d: Zeroizing<Vec<u8>>,
}

impl EccKeyMaterial {
    pub fn new(curve: EccCurve, x: &[u8], y: &[u8], d: &[u8]) -> Result<Self, KeyMaterialError> {
        let size = curve.coordinate_size();
        for (component, value) in [("x", x), ("y", y), ("d", d)] {
            if value.len() != size {
                return Err(KeyMaterialError::InvalidLength {
                    component,
                    expected: size,
                    actual: value.len(),
                });
            }
        }
        if d.iter().all(|&b| b == 0) {
            return Err(KeyMaterialError::InvalidValue {
                component: "d",
                reason: "private scalar is zero".to_string(),
            });
        }

        Ok(Self {
            curve,
            x: x.to_vec(),
            y: y.to_vec(),
            d: Zeroizing::new(d.to_vec()),
        })
    }

    pub fn curve(&self) -> EccCurve {
        self.curve
    }

    pub fn x(&self) -> &[u8] {
        &self.x
    }

    pub fn y(&self) -> &[u8] {
        &self.y
    }

    pub fn d(&self) -> &[u8] {
        &self.d
    }
}

impl fmt::Debug for EccKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EccKeyMaterial {{ curve: {:?}, x: {}.., d: [REDACTED] }}",
            self.curve,
            hex::encode(&self.x[..8])
        )
    }
}

/// Caller-supplied key material to be wrapped by the trust root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    Rsa(RsaKeyMaterial),
    Ecc(EccKeyMaterial),
}

impl KeyMaterial {
    pub fn algorithm(&self) -> Algorithm {
        match self {
            KeyMaterial::Rsa(_) => Algorithm::Rsa,
            KeyMaterial::Ecc(_) => Algorithm::Ecc,
        }
    }

    /// The private component carried into the sensitive area
    pub fn private_component(&self) -> &[u8] {
        match self {
            KeyMaterial::Rsa(rsa) => rsa.prime(),
            KeyMaterial::Ecc(ecc) => ecc.d(),
        }
    }
}

impl From<RsaKeyMaterial> for KeyMaterial {
    fn from(material: RsaKeyMaterial) -> Self {
        KeyMaterial::Rsa(material)
    }
}

impl From<EccKeyMaterial> for KeyMaterial {
    fn from(material: EccKeyMaterial) -> Self {
        KeyMaterial::Ecc(material)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterialError {
    #[error("Invalid {component} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        component: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("RSA key size not supported: {bits} bits")]
    UnsupportedKeySize { bits: usize },

    #[error("Invalid RSA public exponent: {exponent}")]
    InvalidExponent { exponent: u32 },

    #[error("Invalid {component}: {reason}")]
    InvalidValue {
        component: &'static str,
        reason: String,
    },
}
