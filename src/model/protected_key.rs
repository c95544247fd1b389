use std::fmt;

use super::{AreaError, Handle, PublicArea};

/// Wrapped private area (`TPM2B_PRIVATE` contents), opaque outside the
/// trust root that produced it
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateArea(Vec<u8>);

impl PrivateArea {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, AreaError> {
        if bytes.len() > usize::from(u16::MAX) {
            return Err(AreaError::TooLarge { len: bytes.len() });
        }
        Ok(Self(bytes))
    }

    pub(crate) fn from_prefixed(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= usize::from(u16::MAX));
        Self(bytes.to_vec())
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

impl fmt::Debug for PrivateArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateArea({} bytes)", self.0.len())
    }
}

/// Public/private pair produced by wrapping key material under a parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedKey {
    pub public: PublicArea,
    pub private: PrivateArea,
}

impl ProtectedKey {
    pub fn new(public: PublicArea, private: PrivateArea) -> Self {
        Self { public, private }
    }
}

/// A protected key together with the transient handle it is loaded at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedKey {
    pub handle: Handle,
    pub key: ProtectedKey,
}
