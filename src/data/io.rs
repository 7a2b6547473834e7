//! Big-endian sample transcoding for FITS data units.
//!
//! Every sample stored in a data unit is big-endian, regardless of the host byte order.
//! This module provides the [`crate::data::io::SampleIO`] trait, which ties each supported
//! Rust scalar to its `BITPIX` code and fixed-width big-endian representation, together with
//! bounds-checked single-value helpers and whole-slice encode/decode routines.
//!
//! # Key Components
//!
//! - [`crate::data::io::SampleIO`] - Sample type capability: `BITPIX`, width, encode, decode
//! - [`crate::data::io::read_be`] / [`crate::data::io::read_be_at`] - Bounds-checked reads
//! - [`crate::data::io::write_be`] / [`crate::data::io::write_be_at`] - Bounds-checked writes
//! - [`crate::data::io::encode_be_slice`] - Pack a sample slice, optionally in parallel
//! - [`crate::data::io::decode_be_slice`] - Unpack a byte buffer into samples
//!
//! # Supported Types
//!
//! | Rust type      | `BITPIX` | Width |
//! |----------------|----------|-------|
//! | `u8`, `i8`     | 8        | 1     |
//! | `u16`, `i16`   | 16       | 2     |
//! | `u32`, `i32`   | 32       | 4     |
//! | `u64`, `i64`   | 64       | 8     |
//! | `f32`          | -32      | 4     |
//! | `f64`          | -64      | 8     |
//!
//! Signed and unsigned integers of the same width share a code. The bytes are the plain
//! big-endian image of the Rust value; no `BZERO` offset is applied.
//!
//! # Examples
//!
//! ```rust
//! use fitshdu::data::io::{decode_be_slice, encode_be_slice};
//!
//! let bytes = encode_be_slice(&[1i16, 2, 3, 4], 0);
//! assert_eq!(bytes, [0, 1, 0, 2, 0, 3, 0, 4]);
//!
//! let samples: Vec<i16> = decode_be_slice(&bytes)?;
//! assert_eq!(samples, [1, 2, 3, 4]);
//! # Ok::<(), fitshdu::Error>(())
//! ```

use rayon::prelude::*;

use crate::{data::bitpix::Bitpix, Error::OutOfBounds, Result};

/// Trait for scalar sample types that can live in a data unit.
///
/// The set of implementors is closed and fixed by the FITS standard; it is not meant to be
/// implemented outside this crate.
///
/// # Unsigned and signed samples
///
/// `BITPIX` 16, 32 and 64 are signed in FITS and `BITPIX` 8 is unsigned. `u16`, `u32` and
/// `u64` share the code of their signed counterpart, and `i8` shares code 8 with `u8`. The
/// bytes written are the plain big-endian image of the Rust value and no `BZERO` offset is
/// written, so a `u16` of 65535 reads back as 65535 through this crate but as -1 in any
/// other FITS reader (likewise an `i8` of -1 reads as 255). The same sharing lets a `u16`
/// plane be appended to an image built from `i16`. Callers storing unsigned 16/32/64-bit or
/// signed 8-bit data for exchange must convert the samples and write `BZERO` themselves.
pub trait SampleIO: Copy + Send + Sync + 'static {
    /// `BITPIX` code declared for data units holding this type.
    const BITPIX: Bitpix;

    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in big-endian
    fn to_be_bytes(self) -> Self::Bytes;

    /// Number of bytes one sample occupies in the data unit.
    #[must_use]
    fn byte_width() -> usize {
        Self::BITPIX.byte_width()
    }
}

macro_rules! impl_sample_io {
    ($($ty:ty => $bitpix:expr),* $(,)?) => {
        $(
            impl SampleIO for $ty {
                const BITPIX: Bitpix = $bitpix;
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )*
    };
}

impl_sample_io! {
    u8 => Bitpix::Int8,
    i8 => Bitpix::Int8,
    u16 => Bitpix::Int16,
    i16 => Bitpix::Int16,
    u32 => Bitpix::Int32,
    i32 => Bitpix::Int32,
    u64 => Bitpix::Int64,
    i64 => Bitpix::Int64,
    f32 => Bitpix::Float32,
    f64 => Bitpix::Float64,
}

/// Safely reads a sample of type `T` in big-endian byte order from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be<T: SampleIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_be_at(data, &mut offset)
}

/// Safely reads a sample of type `T` in big-endian byte order at `offset`.
///
/// The offset is advanced by the width of `T` on success and left untouched on failure.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_be_at<T: SampleIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = T::byte_width();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_be_bytes(read))
}

/// Safely writes a sample in big-endian byte order to the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too small.
pub fn write_be<T: SampleIO>(data: &mut [u8], value: T) -> Result<()> {
    let mut offset = 0_usize;
    write_be_at(data, &mut offset, value)
}

/// Safely writes a sample in big-endian byte order at `offset`, advancing it.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is too small.
pub fn write_be_at<T: SampleIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let type_len = T::byte_width();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds);
    };
    if end > data.len() {
        return Err(OutOfBounds);
    }

    data[*offset..end].copy_from_slice(value.to_be_bytes().as_ref());
    *offset = end;

    Ok(())
}

/// Packs `samples` into a contiguous big-endian byte buffer.
///
/// Slices with at least `parallel_threshold` samples are encoded with rayon; a threshold of
/// `0` always takes the serial path. Both paths produce identical output.
#[must_use]
pub fn encode_be_slice<T: SampleIO>(samples: &[T], parallel_threshold: usize) -> Vec<u8> {
    let width = T::byte_width();
    let mut out = vec![0u8; samples.len() * width];

    if parallel_threshold != 0 && samples.len() >= parallel_threshold {
        log::trace!(
            "encoding {} samples of BITPIX {} in parallel",
            samples.len(),
            T::BITPIX
        );
        out.par_chunks_exact_mut(width)
            .zip(samples.par_iter())
            .for_each(|(dst, sample)| dst.copy_from_slice(sample.to_be_bytes().as_ref()));
    } else {
        for (dst, sample) in out.chunks_exact_mut(width).zip(samples) {
            dst.copy_from_slice(sample.to_be_bytes().as_ref());
        }
    }

    out
}

/// Unpacks a big-endian byte buffer into samples of type `T`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` is not a whole number of samples.
pub fn decode_be_slice<T: SampleIO>(data: &[u8]) -> Result<Vec<T>> {
    let width = T::byte_width();
    if data.len() % width != 0 {
        return Err(OutOfBounds);
    }

    data.chunks_exact(width).map(read_be::<T>).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_BUFFER: [u8; 8] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];

    #[test]
    fn read_be_integers() {
        assert_eq!(read_be::<u8>(&TEST_BUFFER).unwrap(), 0x1);
        assert_eq!(read_be::<i8>(&TEST_BUFFER).unwrap(), 0x1);
        assert_eq!(read_be::<u16>(&TEST_BUFFER).unwrap(), 0x102);
        assert_eq!(read_be::<i16>(&TEST_BUFFER).unwrap(), 0x102);
        assert_eq!(read_be::<u32>(&TEST_BUFFER).unwrap(), 0x1020304);
        assert_eq!(read_be::<i32>(&TEST_BUFFER).unwrap(), 0x1020304);
        assert_eq!(read_be::<u64>(&TEST_BUFFER).unwrap(), 0x102030405060708);
        assert_eq!(read_be::<i64>(&TEST_BUFFER).unwrap(), 0x102030405060708);
    }

    #[test]
    fn read_be_f32() {
        let result = read_be::<f32>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 2.3879393e-38);
    }

    #[test]
    fn read_be_f64() {
        let result = read_be::<f64>(&TEST_BUFFER).unwrap();
        assert_eq!(result, 8.20788039913184e-304);
    }

    #[test]
    fn read_be_from() {
        let mut offset = 2_usize;
        let result = read_be_at::<u16>(&TEST_BUFFER, &mut offset).unwrap();
        assert_eq!(result, 0x304);
        assert_eq!(offset, 4);
    }

    #[test]
    fn read_be_out_of_bounds() {
        let mut offset = 6_usize;
        assert!(read_be_at::<u32>(&TEST_BUFFER, &mut offset).is_err());
        assert_eq!(offset, 6);

        let mut offset = usize::MAX;
        assert!(read_be_at::<u8>(&TEST_BUFFER, &mut offset).is_err());
    }

    #[test]
    fn write_be_values() {
        let mut buffer = [0u8; 2];
        write_be(&mut buffer, 0x1234u16).unwrap();
        assert_eq!(buffer, [0x12, 0x34]);

        let mut buffer = [0u8; 4];
        write_be(&mut buffer, -1i32).unwrap();
        assert_eq!(buffer, [0xFF, 0xFF, 0xFF, 0xFF]);

        let mut buffer = [0u8; 4];
        write_be(&mut buffer, 1.0f32).unwrap();
        // IEEE 754 big-endian representation of 1.0f32
        assert_eq!(buffer, [0x3F, 0x80, 0x00, 0x00]);

        let mut buffer = [0u8; 8];
        write_be(&mut buffer, 1.0f64).unwrap();
        assert_eq!(buffer, [0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn write_be_sequential() {
        let mut buffer = [0u8; 6];
        let mut offset = 0;
        write_be_at(&mut buffer, &mut offset, 1u16).unwrap();
        write_be_at(&mut buffer, &mut offset, 2u32).unwrap();
        assert_eq!(offset, 6);
        assert_eq!(buffer, [0x00, 0x01, 0x00, 0x00, 0x00, 0x02]);

        assert!(write_be_at(&mut buffer, &mut offset, 3u8).is_err());
    }

    #[test]
    fn bitpix_per_type() {
        assert_eq!(u8::BITPIX, Bitpix::Int8);
        assert_eq!(i16::BITPIX, Bitpix::Int16);
        assert_eq!(u32::BITPIX, Bitpix::Int32);
        assert_eq!(i64::BITPIX, Bitpix::Int64);
        assert_eq!(f32::BITPIX, Bitpix::Float32);
        assert_eq!(f64::BITPIX, Bitpix::Float64);
        assert_eq!(f64::byte_width(), 8);
    }

    #[test]
    fn encode_serial_and_parallel_agree() {
        let samples: Vec<i32> = (-500..500).collect();
        let serial = encode_be_slice(&samples, 0);
        let parallel = encode_be_slice(&samples, 1);

        assert_eq!(serial, parallel);
        assert_eq!(serial.len(), samples.len() * 4);
        assert_eq!(&serial[..4], &(-500i32).to_be_bytes());
    }

    #[test]
    fn decode_slice() {
        let samples: Vec<u16> = decode_be_slice(&TEST_BUFFER).unwrap();
        assert_eq!(samples, [0x0102, 0x0304, 0x0506, 0x0708]);

        assert!(decode_be_slice::<u32>(&TEST_BUFFER[..6]).is_err());
        assert!(decode_be_slice::<f64>(&[]).unwrap().is_empty());
    }

    #[test]
    fn float_special_values_survive() {
        let samples = [f32::INFINITY, f32::NEG_INFINITY, -0.0, f32::MIN_POSITIVE];
        let decoded: Vec<f32> = decode_be_slice(&encode_be_slice(&samples, 0)).unwrap();
        for (a, b) in samples.iter().zip(&decoded) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }
}
