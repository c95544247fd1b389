//! BlobSink trait - where a protected key goes once it is wrapped

use crate::error::KeyImportResult;
use crate::model::ProtectedKey;

/// Destination for a protected key
///
/// The file sink writes the encoded blob; the console sink prints the two
/// areas as hex.
pub trait BlobSink {
    /// Persist or report `key`, returning the number of bytes emitted
    ///
    /// # Errors
    ///
    /// Returns `KeyImportError::Persistence` if the destination cannot be
    /// written.
    fn persist(&mut self, key: &ProtectedKey) -> KeyImportResult<usize>;

    /// Human readable destination, used in logs and reports
    fn destination(&self) -> String;
}
