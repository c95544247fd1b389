//! Pure byte-level transforms: TPM marshaling and the persisted blob codec

pub mod blob_codec;
pub(crate) mod marshal;

pub use blob_codec::{decode, encode, BlobRegion, CorruptBlobError};
