use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use zeroize::Zeroizing;

/// Shared authorization value of a key (`TPM2B_AUTH`)
///
/// May be empty, which means no authorization is required.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSecret(Zeroizing<Vec<u8>>);

impl AuthSecret {
    /// Authorization value of the demo storage key
    pub const DEMO_STORAGE_KEY: &'static [u8] = b"ThisIsMyStorageKeyAuth";

    /// Largest digest the trust root accepts as an auth value
    pub const MAX_LENGTH: usize = 64;

    pub fn new(secret: Vec<u8>) -> Result<Self, AuthSecretError> {
        let secret = Zeroizing::new(secret);
        if secret.len() > Self::MAX_LENGTH {
            return Err(AuthSecretError::TooLong {
                max: Self::MAX_LENGTH,
                actual: secret.len(),
            });
        }
        Ok(Self(secret))
    }

    pub fn empty() -> Self {
        Self(Zeroizing::new(Vec::new()))
    }

    pub fn demo_storage_key() -> Self {
        Self(Zeroizing::new(Self::DEMO_STORAGE_KEY.to_vec()))
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

impl FromStr for AuthSecret {
    type Err = AuthSecretError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes().to_vec())
    }
}

impl fmt::Debug for AuthSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthSecret([REDACTED; {}])", self.0.len())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthSecretError {
    #[error("Authorization secret must be at most {max} bytes, got {actual}")]
    TooLong { max: usize, actual: usize },
}
