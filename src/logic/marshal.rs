//! Big-endian marshaling of TPM structures
//!
//! Sized buffers (`TPM2B_*`) are a `u16` byte count followed by that many
//! bytes.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarshalError {
    #[error("Need {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("Buffer of {len} bytes does not fit a 16-bit size field")]
    Oversized { len: usize },
}

#[derive(Debug, Default)]
pub struct Marshaler {
    buf: Vec<u8>,
}

impl Marshaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn put_sized(&mut self, bytes: &[u8]) -> Result<&mut Self, MarshalError> {
        let len = u16::try_from(bytes.len())
            .map_err(|_| MarshalError::Oversized { len: bytes.len() })?;
        self.put_u16(len);
        Ok(self.put_bytes(bytes))
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

#[derive(Debug)]
pub struct Unmarshaler<'a> {
    input: &'a [u8],
}

impl<'a> Unmarshaler<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8], MarshalError> {
        if len > self.input.len() {
            return Err(MarshalError::Truncated {
                needed: len,
                available: self.input.len(),
            });
        }
        let (head, tail) = self.input.split_at(len);
        self.input = tail;
        Ok(head)
    }

    pub fn get_u16(&mut self) -> Result<u16, MarshalError> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn get_u32(&mut self) -> Result<u32, MarshalError> {
        let bytes = self.take(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn get_sized(&mut self) -> Result<&'a [u8], MarshalError> {
        let len = self.get_u16()?;
        self.take(usize::from(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_big_endian() {
        let mut m = Marshaler::new();
        m.put_u16(0x0102).put_u32(0x0304_0506);
        assert_eq!(m.finish(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_sized_buffer() {
        let mut m = Marshaler::new();
        m.put_sized(b"abc").unwrap();
        let bytes = m.finish();
        assert_eq!(bytes, vec![0, 3, b'a', b'b', b'c']);

        let mut u = Unmarshaler::new(&bytes);
        assert_eq!(u.get_sized().unwrap(), b"abc");
        assert!(u.is_empty());
    }

    #[test]
    fn test_oversized_buffer_rejected() {
        let big = vec![0u8; 70_000];
        let mut m = Marshaler::new();
        assert_eq!(
            m.put_sized(&big).unwrap_err(),
            MarshalError::Oversized { len: 70_000 }
        );
    }

    #[test]
    fn test_truncated_read() {
        let mut u = Unmarshaler::new(&[0, 5, 1, 2]);
        assert_eq!(
            u.get_sized().unwrap_err(),
            MarshalError::Truncated {
                needed: 5,
                available: 2
            }
        );
    }
}
