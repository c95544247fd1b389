//! Error types for tpm-keyimport
//!
//! Every failure of an import or load run ends up as a [`KeyImportError`].
//! Each variant carries the response code that the process exits with.

use std::io;

use thiserror::Error;

use crate::logic::CorruptBlobError;
use crate::model::{AreaError, Handle, KeyMaterialError, ResponseCode};

/// Result type alias for import operations
pub type KeyImportResult<T> = Result<T, KeyImportError>;

/// Top-level error type for import and load runs
#[derive(Error, Debug)]
pub enum KeyImportError {
    /// The trust-root session could not be opened
    #[error("Failed to open trust root session: {rc}")]
    DeviceInit { rc: ResponseCode },

    /// The parent public area could not be read or is not a storage key
    #[error("Parent key {handle} not found: {rc}")]
    ParentNotFound { handle: Handle, rc: ResponseCode },

    /// The trust root rejected the presented secret
    #[error("Authorization for {handle} rejected: {rc}")]
    Authorization { handle: Handle, rc: ResponseCode },

    /// Malformed or algorithm-mismatched key material
    #[error("Unsupported key material: {reason}")]
    UnsupportedMaterial { reason: String, rc: ResponseCode },

    /// A persisted blob violates the framing
    #[error("Corrupt key blob: {0}")]
    CorruptBlob(#[from] CorruptBlobError),

    /// The blob destination or source could not be accessed
    #[error("Key blob storage failed at {location}: {source}")]
    Persistence {
        location: String,
        #[source]
        source: io::Error,
    },

    /// Any other trust-root command failure
    #[error("Trust root {operation} failed: {rc}")]
    Device {
        operation: &'static str,
        rc: ResponseCode,
    },
}

impl KeyImportError {
    /// Response code reported for this failure
    pub fn code(&self) -> ResponseCode {
        match self {
            KeyImportError::DeviceInit { rc }
            | KeyImportError::ParentNotFound { rc, .. }
            | KeyImportError::Authorization { rc, .. }
            | KeyImportError::UnsupportedMaterial { rc, .. }
            | KeyImportError::Device { rc, .. } => *rc,
            KeyImportError::CorruptBlob(CorruptBlobError::TrailingBytes { .. }) => {
                ResponseCode::SIZE
            }
            KeyImportError::CorruptBlob(_) => ResponseCode::INSUFFICIENT,
            KeyImportError::Persistence { .. } => ResponseCode::FAILURE,
        }
    }

    /// Process exit status: the low byte of the response code, or the OS
    /// error number for blob storage failures
    ///
    /// Never zero. Codes whose low byte is zero (`TPM_RC_INITIALIZE` is
    /// 0x100) exit with 1.
    pub fn exit_code(&self) -> i32 {
        let code = match self {
            KeyImportError::Persistence { source, .. } => source.raw_os_error().unwrap_or(1),
            other => other.code().value() as i32,
        };
        match code & 0xff {
            0 => 1,
            low => low,
        }
    }

    pub(crate) fn persistence(location: impl Into<String>, source: io::Error) -> Self {
        KeyImportError::Persistence {
            location: location.into(),
            source,
        }
    }
}

impl From<KeyMaterialError> for KeyImportError {
    fn from(err: KeyMaterialError) -> Self {
        let rc = match err {
            KeyMaterialError::UnsupportedKeySize { .. } => ResponseCode::KEY_SIZE,
            KeyMaterialError::InvalidLength { .. } => ResponseCode::SIZE,
            KeyMaterialError::InvalidExponent { .. } | KeyMaterialError::InvalidValue { .. } => {
                ResponseCode::VALUE
            }
        };
        KeyImportError::UnsupportedMaterial {
            reason: err.to_string(),
            rc,
        }
    }
}

impl From<AreaError> for KeyImportError {
    fn from(err: AreaError) -> Self {
        KeyImportError::UnsupportedMaterial {
            reason: err.to_string(),
            rc: ResponseCode::SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::BlobRegion;

    #[test]
    fn test_error_display() {
        let err = KeyImportError::ParentNotFound {
            handle: Handle::DEMO_STORAGE_KEY,
            rc: ResponseCode::HANDLE.with_handle(1),
        };
        let text = err.to_string();
        assert!(text.contains("0x81000200"));
        assert!(text.contains("TPM_RC_HANDLE"));
    }

    #[test]
    fn test_exit_code_is_low_byte_of_response_code() {
        let err = KeyImportError::Authorization {
            handle: Handle::DEMO_STORAGE_KEY,
            rc: ResponseCode::AUTH_FAIL.with_session(1),
        };
        assert_eq!(err.exit_code(), 0x8E);
    }

    #[test]
    fn test_exit_code_is_never_zero() {
        let err = KeyImportError::DeviceInit {
            rc: ResponseCode::INITIALIZE,
        };
        assert_eq!(err.code().value(), 0x100);
        assert_eq!(err.exit_code(), 1);

        let err = KeyImportError::Device {
            operation: "cleanup",
            rc: ResponseCode::new(0x200),
        };
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_persistence_exit_code_uses_os_error() {
        let err = KeyImportError::persistence("out.bin", io::Error::from_raw_os_error(13));
        assert_eq!(err.exit_code(), 13);

        let err = KeyImportError::persistence("console", io::Error::other("closed"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_corrupt_blob_codes() {
        let trailing = KeyImportError::from(CorruptBlobError::TrailingBytes { count: 1 });
        assert_eq!(trailing.code(), ResponseCode::SIZE);

        let truncated = KeyImportError::from(CorruptBlobError::MissingPrefix {
            region: BlobRegion::Public,
        });
        assert_eq!(truncated.code(), ResponseCode::INSUFFICIENT);
    }

    #[test]
    fn test_key_material_error_conversion() {
        let err = KeyImportError::from(KeyMaterialError::UnsupportedKeySize { bits: 4096 });
        assert!(matches!(
            err,
            KeyImportError::UnsupportedMaterial { rc, .. } if rc == ResponseCode::KEY_SIZE
        ));
    }

    #[test]
    fn test_result_type_alias() {
        let result: KeyImportResult<i32> = Ok(42);
        assert_eq!(result.unwrap(), 42);
    }
}
