//! `BITPIX` sample type codes.
//!
//! The FITS standard fixes the sample representation of a data unit through the `BITPIX`
//! keyword. Positive values denote two's-complement integers of that many bits, negative
//! values denote IEEE 754 floating point of the absolute bit count. The set is closed.
//!
//! # Reference
//! - FITS Standard 4.0, Section 4.4.1.1, Table 8

use strum::{EnumCount, EnumIter};

use crate::{Error, Result};

/// The closed set of sample types a data unit can hold.
///
/// Each variant is explicitly assigned its `BITPIX` code, so `Bitpix::Int16 as i64 == 16`.
/// Unsigned Rust types share the code of their width; see [`crate::data::io::SampleIO`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, EnumIter, EnumCount)]
pub enum Bitpix {
    /// 8-bit integer samples (`BITPIX = 8`)
    Int8 = 8,
    /// 16-bit integer samples (`BITPIX = 16`)
    Int16 = 16,
    /// 32-bit integer samples (`BITPIX = 32`)
    Int32 = 32,
    /// 64-bit integer samples (`BITPIX = 64`)
    Int64 = 64,
    /// IEEE single precision samples (`BITPIX = -32`)
    Float32 = -32,
    /// IEEE double precision samples (`BITPIX = -64`)
    Float64 = -64,
}

impl Bitpix {
    /// Resolve a raw `BITPIX` header value.
    ///
    /// # Errors
    /// Returns [`Error::UnsupportedBitpix`] for any value outside the standard set.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            8 => Ok(Bitpix::Int8),
            16 => Ok(Bitpix::Int16),
            32 => Ok(Bitpix::Int32),
            64 => Ok(Bitpix::Int64),
            -32 => Ok(Bitpix::Float32),
            -64 => Ok(Bitpix::Float64),
            _ => Err(Error::UnsupportedBitpix(code)),
        }
    }

    /// The value written to the `BITPIX` keyword.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Number of bytes occupied by one sample.
    #[must_use]
    pub const fn byte_width(self) -> usize {
        match self {
            Bitpix::Int8 => 1,
            Bitpix::Int16 => 2,
            Bitpix::Int32 | Bitpix::Float32 => 4,
            Bitpix::Int64 | Bitpix::Float64 => 8,
        }
    }

    /// `true` for the IEEE floating point codes.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Bitpix::Float32 | Bitpix::Float64)
    }

    /// Header comment used when the engine writes this code.
    #[must_use]
    pub fn comment(self) -> String {
        if self.is_float() {
            format!("{} Bit floating point", self.byte_width() * 8)
        } else {
            format!("{} Bit", self.code())
        }
    }
}

impl TryFrom<i64> for Bitpix {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        Bitpix::from_code(code)
    }
}

impl std::fmt::Display for Bitpix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_roundtrip() {
        for bitpix in Bitpix::iter() {
            assert_eq!(Bitpix::from_code(bitpix.code()).unwrap(), bitpix);
        }
        assert_eq!(Bitpix::COUNT, 6);
    }

    #[test]
    fn width_matches_code() {
        for bitpix in Bitpix::iter() {
            assert_eq!(bitpix.byte_width() as i64 * 8, bitpix.code().abs());
        }
    }

    #[test]
    fn unsupported() {
        assert!(matches!(
            Bitpix::from_code(12),
            Err(Error::UnsupportedBitpix(12))
        ));
        assert!(Bitpix::try_from(-16).is_err());
    }

    #[test]
    fn comments() {
        assert_eq!(Bitpix::Int16.comment(), "16 Bit");
        assert_eq!(Bitpix::Float64.comment(), "64 Bit floating point");
        assert_eq!(Bitpix::Float32.to_string(), "-32");
    }
}
