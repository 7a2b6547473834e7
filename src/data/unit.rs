//! The data unit buffer of an HDU.
//!
//! A [`DataUnit`] is the packed, big-endian sample blob that follows a header. It knows
//! nothing about `BITPIX` or `NAXIS`; keeping it consistent with the header is the job of
//! [`crate::hdu::ImageHdu`]. The buffer is exclusively owned and only ever replaced or
//! extended at the end.

use crate::{
    data::io::{decode_be_slice, SampleIO},
    Error::OutOfBounds,
    Result,
};

/// Owned, growable byte sequence holding packed big-endian samples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataUnit {
    bytes: Vec<u8>,
}

impl DataUnit {
    /// Create an empty data unit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty data unit with room for `capacity` bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        DataUnit {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Take ownership of already packed bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        DataUnit { bytes }
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the data unit holds no bytes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The raw packed bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the data unit, returning the packed bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Append already packed bytes to the end of the buffer.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Bytes of the `index`-th block of `block_len` bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the block does not lie fully inside the buffer.
    pub fn block(&self, index: usize, block_len: usize) -> Result<&[u8]> {
        let start = index.checked_mul(block_len).ok_or(OutOfBounds)?;
        let end = start.checked_add(block_len).ok_or(OutOfBounds)?;

        self.bytes.get(start..end).ok_or(OutOfBounds)
    }

    /// Decode the whole buffer as samples of type `T`.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the length is not a multiple of the sample width.
    pub fn decode<T: SampleIO>(&self) -> Result<Vec<T>> {
        decode_be_slice(&self.bytes)
    }
}

impl AsRef<[u8]> for DataUnit {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for DataUnit {
    fn from(bytes: Vec<u8>) -> Self {
        DataUnit::from_bytes(bytes)
    }
}
