//! Ports (traits) for trust-root operations
//!
//! The import and load flows depend on these abstractions only. A real TPM
//! transport, the in-process simulator and the test fake all plug in here.
//! Device operations fail with the raw [`ResponseCode`]; the use cases decide
//! which [`KeyImportError`](crate::error::KeyImportError) it becomes.

mod blob_sink;
mod device_connector;
mod handle_unloader;
mod key_importer;
mod key_loader;
mod public_reader;
mod session_closer;


pub use blob_sink::BlobSink;
pub use device_connector::DeviceConnector;
pub use handle_unloader::HandleUnloader;
pub use key_importer::KeyImporter;
pub use key_loader::KeyLoader;
pub use public_reader::PublicReader;
pub use session_closer::SessionCloser;

use crate::model::ResponseCode;

/// Result of a single trust-root command
pub type DeviceResult<T> = Result<T, ResponseCode>;

/// Combined trait for all trust-root operations
///
/// An open device session implements this.
pub trait TrustRoot: PublicReader + KeyImporter + KeyLoader + HandleUnloader + SessionCloser {}

impl<T> TrustRoot for T where
    T: PublicReader + KeyImporter + KeyLoader + HandleUnloader + SessionCloser
{
}
