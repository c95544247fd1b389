use std::io::{self, Write};

use crate::error::{KeyImportError, KeyImportResult};
use crate::model::ProtectedKey;
use crate::ports::BlobSink;

const BYTES_PER_ROW: usize = 16;

/// Prints both areas of the protected key as hex instead of saving them
#[derive(Debug)]
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn dump(&mut self, label: &str, bytes: &[u8]) -> io::Result<()> {
        writeln!(self.out, "{label} {}", bytes.len())?;
        for row in bytes.chunks(BYTES_PER_ROW) {
            let cells: Vec<String> = row.iter().map(|byte| format!("{byte:02x}")).collect();
            writeln!(self.out, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

impl<W: Write> BlobSink for ConsoleSink<W> {
    fn persist(&mut self, key: &ProtectedKey) -> KeyImportResult<usize> {
        let public = key.public.as_bytes();
        let private = key.private.as_bytes();

        self.dump("Key Public Blob", public)
            .and_then(|_| self.dump("Key Private Blob", private))
            .and_then(|_| self.out.flush())
            .map_err(|err| KeyImportError::persistence(self.destination(), err))?;

        Ok(public.len() + private.len())
    }

    fn destination(&self) -> String {
        "console".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PrivateArea, PublicArea};

    #[test]
    fn test_dump_format() {
        let key = ProtectedKey::new(
            PublicArea::from_bytes((0u8..18).collect()).unwrap(),
            PrivateArea::from_bytes(vec![0xab, 0xcd]).unwrap(),
        );
        let mut sink = ConsoleSink::new(Vec::new());

        let reported = sink.persist(&key).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert_eq!(reported, 20);
        assert_eq!(
            text,
            "Key Public Blob 18\n\
             00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f\n\
             10 11\n\
             Key Private Blob 2\n\
             ab cd\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_persistence_error() {
        let key = ProtectedKey::new(
            PublicArea::from_bytes(vec![1]).unwrap(),
            PrivateArea::from_bytes(vec![2]).unwrap(),
        );
        let err = ConsoleSink::new(ClosedPipe).persist(&key).unwrap_err();

        assert!(matches!(err, KeyImportError::Persistence { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
