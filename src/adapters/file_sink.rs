use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{KeyImportError, KeyImportResult};
use crate::logic::encode;
use crate::model::ProtectedKey;
use crate::ports::BlobSink;

/// Writes the encoded blob to a file, replacing what was there
///
/// The blob goes to a temporary file in the same directory first and is
/// renamed over the destination once complete. A failed write leaves the
/// previous blob in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl BlobSink for FileSink {
    fn persist(&mut self, key: &ProtectedKey) -> KeyImportResult<usize> {
        let blob = encode(key);
        let failed = |err: io::Error| KeyImportError::persistence(self.destination(), err);

        let mut staged = NamedTempFile::new_in(self.directory()).map_err(failed)?;
        staged.write_all(&blob).map_err(failed)?;
        staged.as_file().sync_all().map_err(failed)?;
        staged
            .persist(&self.path)
            .map_err(|err| failed(err.error))?;
        debug!("Wrote {} bytes to {}", blob.len(), self.path.display());
        Ok(blob.len())
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

/// Read a persisted blob back from `path`
pub fn read_blob(path: &Path) -> KeyImportResult<Vec<u8>> {
    fs::read(path).map_err(|err| KeyImportError::persistence(path.display().to_string(), err))
}
