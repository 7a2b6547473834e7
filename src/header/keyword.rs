//! Header keywords.
//!
//! FITS keywords are fixed-form identifiers of at most eight characters drawn from
//! `A-Z`, `0-9`, `-` and `_`. Indexed keywords such as `NAXIS3` append a decimal axis
//! number to a root. [`Keyword`] validates that syntax once at construction, and
//! [`StandardKeyword`] names the mandatory keywords the image layout engine touches.
//!
//! # Reference
//! - FITS Standard 4.0, Section 4.1.2.1 and Section 4.4.1

use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Mandatory and reserved keywords that govern the layout of an image HDU.
///
/// The layout engine itself only writes [`StandardKeyword::Bitpix`] and
/// [`StandardKeyword::Naxis`]; the remaining variants are vocabulary for callers that
/// assemble the rest of a primary or extension header in the same store.
#[derive(
    Clone, Copy, PartialEq, Eq, Debug, Hash, EnumIter, EnumCount, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum StandardKeyword {
    /// `SIMPLE` - conformance flag of a primary HDU
    Simple,
    /// `XTENSION` - extension type of a non-primary HDU
    Xtension,
    /// `BITPIX` - sample type code
    Bitpix,
    /// `NAXIS` - number of axes
    Naxis,
    /// `EXTEND` - extensions may follow
    Extend,
    /// `BZERO` - physical value offset
    Bzero,
    /// `BSCALE` - physical value scale
    Bscale,
    /// `END` - end of header marker
    End,
}

impl StandardKeyword {
    /// The keyword text as it appears in a header card.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for StandardKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A validated header keyword.
#[derive(Clone, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Keyword(String);

impl Keyword {
    /// Longest keyword the card format can hold.
    pub const MAX_LEN: usize = 8;

    /// Highest axis number the standard allows.
    pub const MAX_AXIS: usize = 999;

    /// Validate `name` and wrap it as a keyword.
    ///
    /// # Errors
    /// Returns [`Error::InvalidKeyword`] if `name` is empty, longer than
    /// [`Keyword::MAX_LEN`], or contains characters outside `A-Z0-9_-`.
    pub fn new(name: &str) -> Result<Self> {
        let valid = !name.is_empty()
            && name.len() <= Self::MAX_LEN
            && name
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-' || b == b'_');

        if !valid {
            return Err(Error::InvalidKeyword(name.to_string()));
        }

        Ok(Keyword(name.to_string()))
    }

    /// The `NAXISn` keyword for axis `n` (1-based).
    ///
    /// # Errors
    /// Returns [`Error::InvalidKeyword`] if `n` is 0 or above [`Keyword::MAX_AXIS`].
    pub fn axis(n: usize) -> Result<Self> {
        if n == 0 || n > Self::MAX_AXIS {
            return Err(Error::InvalidKeyword(format!("NAXIS{n}")));
        }

        Ok(Keyword(format!("NAXIS{n}")))
    }

    /// The axis number if this is an indexed `NAXISn` keyword.
    #[must_use]
    pub fn axis_index(&self) -> Option<usize> {
        let digits = self.0.strip_prefix(StandardKeyword::Naxis.as_str())?;
        if digits.is_empty() || digits.starts_with('0') {
            return None;
        }

        digits.parse().ok()
    }

    /// The keyword text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<StandardKeyword> for Keyword {
    fn from(keyword: StandardKeyword) -> Self {
        Keyword(keyword.as_str().to_string())
    }
}

impl std::str::FromStr for Keyword {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Keyword::new(s)
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<StandardKeyword> for Keyword {
    fn eq(&self, other: &StandardKeyword) -> bool {
        self.0 == other.as_str()
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}
