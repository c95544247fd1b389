//! Public area of a trust-root object (`TPMT_PUBLIC`)
//!
//! The marshaled bytes are kept as-is so a blob round-trips byte for byte.
//! [`PublicDescription`] is the parsed view used to build and inspect them.

use std::fmt;

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::algorithm::{TPM_ALG_AES, TPM_ALG_CFB, TPM_ALG_NULL, TPM_ALG_SHA256};
use super::{Algorithm, AlgorithmError, KeyMaterial, ObjectAttributes};
use crate::logic::marshal::{MarshalError, Marshaler, Unmarshaler};

/// Symmetric algorithm a storage key uses to protect its children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetricDefinition {
    pub algorithm: u16,
    pub key_bits: u16,
    pub mode: u16,
}

impl SymmetricDefinition {
    pub const AES_128_CFB: Self = Self {
        algorithm: TPM_ALG_AES,
        key_bits: 128,
        mode: TPM_ALG_CFB,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicParameters {
    Rsa {
        key_bits: u16,
        exponent: u32,
        modulus: Vec<u8>,
    },
    Ecc {
        curve_id: u16,
        x: Vec<u8>,
        y: Vec<u8>,
    },
}

/// Parsed public area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicDescription {
    pub name_alg: u16,
    pub attributes: ObjectAttributes,
    pub auth_policy: Vec<u8>,
    /// `None` is `TPM_ALG_NULL`: the key wraps nothing
    pub symmetric: Option<SymmetricDefinition>,
    pub parameters: PublicParameters,
}

impl PublicDescription {
    /// Public template for imported material. No symmetric wrapping and no
    /// scheme, so the key stays usable for any RSA/ECC operation.
    pub fn for_import(material: &KeyMaterial) -> Self {
        let parameters = match material {
            KeyMaterial::Rsa(rsa) => PublicParameters::Rsa {
                key_bits: rsa.key_bits(),
                exponent: rsa.exponent(),
                modulus: rsa.modulus().to_vec(),
            },
            KeyMaterial::Ecc(ecc) => PublicParameters::Ecc {
                curve_id: ecc.curve().curve_id(),
                x: ecc.x().to_vec(),
                y: ecc.y().to_vec(),
            },
        };

        Self {
            name_alg: TPM_ALG_SHA256,
            attributes: ObjectAttributes::imported(),
            auth_policy: Vec::new(),
            symmetric: None,
            parameters,
        }
    }

    /// Public template of an RSA 2048 storage key
    pub fn storage_key(modulus: Vec<u8>) -> Self {
        Self {
            name_alg: TPM_ALG_SHA256,
            attributes: ObjectAttributes::storage_key(),
            auth_policy: Vec::new(),
            symmetric: Some(SymmetricDefinition::AES_128_CFB),
            parameters: PublicParameters::Rsa {
                key_bits: (modulus.len() * 8) as u16,
                exponent: 0,
                modulus,
            },
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self.parameters {
            PublicParameters::Rsa { .. } => Algorithm::Rsa,
            PublicParameters::Ecc { .. } => Algorithm::Ecc,
        }
    }

    fn marshal(&self) -> Result<Vec<u8>, MarshalError> {
        let mut m = Marshaler::new();
        m.put_u16(self.algorithm().alg_id())
            .put_u16(self.name_alg)
            .put_u32(self.attributes.bits())
            .put_sized(&self.auth_policy)?;

        match self.symmetric {
            Some(sym) => {
                m.put_u16(sym.algorithm).put_u16(sym.key_bits).put_u16(sym.mode);
            }
            None => {
                m.put_u16(TPM_ALG_NULL);
            }
        }
        m.put_u16(TPM_ALG_NULL);

        match &self.parameters {
            PublicParameters::Rsa {
                key_bits,
                exponent,
                modulus,
            } => {
                m.put_u16(*key_bits).put_u32(*exponent).put_sized(modulus)?;
            }
            PublicParameters::Ecc { curve_id, x, y } => {
                m.put_u16(*curve_id)
                    .put_u16(TPM_ALG_NULL)
                    .put_sized(x)?
                    .put_sized(y)?;
            }
        }

        Ok(m.finish())
    }

    fn unmarshal(bytes: &[u8]) -> Result<Self, AreaError> {
        let mut u = Unmarshaler::new(bytes);
        let algorithm = Algorithm::from_alg_id(u.get_u16()?)?;
        let name_alg = u.get_u16()?;
        let attributes = ObjectAttributes::from_bits(u.get_u32()?);
        let auth_policy = u.get_sized()?.to_vec();

        let symmetric = match u.get_u16()? {
            TPM_ALG_NULL => None,
            sym_alg => Some(SymmetricDefinition {
                algorithm: sym_alg,
                key_bits: u.get_u16()?,
                mode: u.get_u16()?,
            }),
        };
        let scheme = u.get_u16()?;
        if scheme != TPM_ALG_NULL {
            return Err(AreaError::UnsupportedScheme { scheme });
        }

        let parameters = match algorithm {
            Algorithm::Rsa => {
                let key_bits = u.get_u16()?;
                let exponent = u.get_u32()?;
                let modulus = u.get_sized()?.to_vec();
                PublicParameters::Rsa {
                    key_bits,
                    exponent,
                    modulus,
                }
            }
            Algorithm::Ecc => {
                let curve_id = u.get_u16()?;
                let kdf = u.get_u16()?;
                if kdf != TPM_ALG_NULL {
                    return Err(AreaError::UnsupportedScheme { scheme: kdf });
                }
                let x = u.get_sized()?.to_vec();
                let y = u.get_sized()?.to_vec();
                PublicParameters::Ecc { curve_id, x, y }
            }
        };

        if !u.is_empty() {
            return Err(AreaError::TrailingBytes {
                count: u.remaining(),
            });
        }

        Ok(Self {
            name_alg,
            attributes,
            auth_policy,
            symmetric,
            parameters,
        })
    }
}

/// Marshaled public area, at most `u16::MAX` bytes
#[derive(Clone, PartialEq, Eq)]
pub struct PublicArea(Vec<u8>);

impl PublicArea {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AreaError> {
        if bytes.len() > usize::from(u16::MAX) {
            return Err(AreaError::TooLarge { len: bytes.len() });
        }
        Ok(Self(bytes))
    }

    /// Area read from behind a 16-bit size field, so already within bounds
    pub(crate) fn from_prefixed(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= usize::from(u16::MAX));
        Self(bytes.to_vec())
    }

    pub fn from_description(description: &PublicDescription) -> Result<Self, AreaError> {
        Self::from_bytes(description.marshal()?)
    }

    pub fn describe(&self) -> Result<PublicDescription, AreaError> {
        PublicDescription::unmarshal(&self.0)
    }

    /// Object name: the name algorithm followed by the digest of the area
    pub fn name(&self) -> Vec<u8> {
        let mut name = TPM_ALG_SHA256.to_be_bytes().to_vec();
        name.extend_from_slice(&Sha256::digest(&self.0));
        name
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for PublicArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicArea({} bytes)", self.0.len())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AreaError {
    #[error("Area of {len} bytes exceeds the 16-bit size limit")]
    TooLarge { len: usize },

    #[error("Malformed area: {0}")]
    Malformed(#[from] MarshalError),

    #[error("Unsupported area algorithm: {0}")]
    UnsupportedAlgorithm(#[from] AlgorithmError),

    #[error("Unsupported scheme: 0x{scheme:04x}")]
    UnsupportedScheme { scheme: u16 },

    #[error("{count} unexpected bytes after the area")]
    TrailingBytes { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo_keys;

    #[test]
    fn test_rsa_import_area_describes_material() {
        let material = demo_keys::rsa_material().unwrap();
        let area = PublicArea::from_description(&PublicDescription::for_import(&material)).unwrap();
        let description = area.describe().unwrap();

        assert_eq!(description.algorithm(), Algorithm::Rsa);
        assert_eq!(description.symmetric, None);
        assert_eq!(description.attributes, ObjectAttributes::imported());
        match description.parameters {
            PublicParameters::Rsa {
                key_bits, modulus, ..
            } => {
                assert_eq!(key_bits, 2048);
                assert_eq!(modulus, demo_keys::RSA_MODULUS.to_vec());
            }
            other => panic!("expected RSA parameters: {other:?}"),
        }
    }

    #[test]
    fn test_ecc_import_area_describes_material() {
        let material = demo_keys::ecc_material().unwrap();
        let area = PublicArea::from_description(&PublicDescription::for_import(&material)).unwrap();

        match area.describe().unwrap().parameters {
            PublicParameters::Ecc { curve_id, x, y } => {
                assert_eq!(curve_id, 0x0003);
                assert_eq!(x, demo_keys::ECC_P256_X.to_vec());
                assert_eq!(y, demo_keys::ECC_P256_Y.to_vec());
            }
            other => panic!("expected ECC parameters: {other:?}"),
        }
    }

    #[test]
    fn test_storage_key_area() {
        let description = PublicDescription::storage_key(vec![0x80; 256]);
        let area = PublicArea::from_description(&description).unwrap();
        let parsed = area.describe().unwrap();

        assert_eq!(parsed, description);
        assert!(parsed.attributes.is_storage_parent());
        assert_eq!(parsed.symmetric, Some(SymmetricDefinition::AES_128_CFB));
    }

    #[test]
    fn test_describe_rejects_truncated_area() {
        let material = demo_keys::ecc_material().unwrap();
        let area = PublicArea::from_description(&PublicDescription::for_import(&material)).unwrap();
        let truncated = PublicArea::from_bytes(area.as_bytes()[..20].to_vec()).unwrap();

        assert!(matches!(
            truncated.describe(),
            Err(AreaError::Malformed(MarshalError::Truncated { .. }))
        ));
    }

    #[test]
    fn test_describe_rejects_unknown_type() {
        let area = PublicArea::from_bytes(vec![0x00, 0x25, 0x00, 0x0b]).unwrap();
        assert!(matches!(
            area.describe(),
            Err(AreaError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_name_is_sha256_prefixed() {
        let area = PublicArea::from_bytes(vec![1, 2, 3]).unwrap();
        let name = area.name();
        assert_eq!(name.len(), 34);
        assert_eq!(&name[..2], &[0x00, 0x0b]);
    }

    #[test]
    fn test_area_size_limit() {
        assert_eq!(
            PublicArea::from_bytes(vec![0; 65_536]).unwrap_err(),
            AreaError::TooLarge { len: 65_536 }
        );
    }
}
