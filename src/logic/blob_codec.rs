//! Persisted key blob codec
//!
//! Layout: `[u16 BE size][public area][u16 BE size][private area]`, nothing
//! else. Decoding is strict: both regions must be complete and no byte may
//! follow the private area.

use std::fmt;

use thiserror::Error;

use super::marshal::{Marshaler, Unmarshaler};
use crate::model::{PrivateArea, ProtectedKey, PublicArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobRegion {
    Public,
    Private,
}

impl fmt::Display for BlobRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobRegion::Public => f.write_str("public area"),
            BlobRegion::Private => f.write_str("private area"),
        }
    }
}

/// Framing violation found while decoding a persisted blob
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorruptBlobError {
    #[error("Blob ends before the {region} size prefix")]
    MissingPrefix { region: BlobRegion },

    #[error("{region} declares {declared} bytes but only {available} remain")]
    Truncated {
        region: BlobRegion,
        declared: usize,
        available: usize,
    },

    #[error("{count} trailing bytes after the private area")]
    TrailingBytes { count: usize },
}

/// Serialize a protected key. Areas are bounded to `u16::MAX` bytes at
/// construction, so every key has an encoding.
pub fn encode(key: &ProtectedKey) -> Vec<u8> {
    let mut m = Marshaler::new();
    for region in [key.public.as_bytes(), key.private.as_bytes()] {
        m.put_u16(region.len() as u16).put_bytes(region);
    }
    m.finish()
}

pub fn decode(bytes: &[u8]) -> Result<ProtectedKey, CorruptBlobError> {
    let mut u = Unmarshaler::new(bytes);

    let public = read_region(&mut u, BlobRegion::Public)?;
    let private = read_region(&mut u, BlobRegion::Private)?;

    if !u.is_empty() {
        return Err(CorruptBlobError::TrailingBytes {
            count: u.remaining(),
        });
    }

    // Regions read behind a u16 prefix always fit the area size limit.
    Ok(ProtectedKey::new(
        PublicArea::from_prefixed(public),
        PrivateArea::from_prefixed(private),
    ))
}

fn read_region<'a>(
    u: &mut Unmarshaler<'a>,
    region: BlobRegion,
) -> Result<&'a [u8], CorruptBlobError> {
    let declared = u
        .get_u16()
        .map(usize::from)
        .map_err(|_| CorruptBlobError::MissingPrefix { region })?;
    let available = u.remaining();
    u.take(declared).map_err(|_| CorruptBlobError::Truncated {
        region,
        declared,
        available,
    })
}
