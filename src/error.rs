use thiserror::Error;

macro_rules! validation_error {
    // Single string version
    ($kind:expr, $msg:expr) => {
        crate::Error::ValidationFailed {
            kind: $kind,
            reason: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($kind:expr, $fmt:expr, $($arg:tt)*) => {
        crate::Error::ValidationFailed {
            kind: $kind,
            reason: format!($fmt, $($arg)*),
        }
    };
}

/// The category of a rejected mutation.
///
/// Every [`Error::ValidationFailed`] carries one of these so callers can react to the
/// failure class without parsing the human-readable reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// The sample type of the supplied data does not match the declared `BITPIX`.
    IncompatibleFormat,
    /// The number of supplied samples does not match the declared extents.
    IncompatibleSize,
    /// An axis extent is outside the range accepted by the active configuration.
    InvalidExtent,
    /// A data buffer disagrees with the declared extents and sample width.
    LengthMismatch,
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::IncompatibleFormat => "incompatible format",
            Self::IncompatibleSize => "incompatible size",
            Self::InvalidExtent => "invalid extent",
            Self::LengthMismatch => "length mismatch",
        };
        f.write_str(name)
    }
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// # Error Categories
///
/// ## Layout Errors
/// - [`Error::ValidationFailed`] - A mutation was rejected before touching the HDU
///
/// ## Decoding Errors
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of a buffer
/// - [`Error::UnsupportedBitpix`] - A `BITPIX` value outside the closed set of sample types
///
/// ## Header Errors
/// - [`Error::InvalidKeyword`] - A keyword that does not follow the fixed-form syntax
/// - [`Error::InvalidValue`] - A header value with the wrong type or range for its keyword
///
/// # Examples
///
/// ```rust
/// use fitshdu::{Error, ImageHdu, ValidationKind};
///
/// let mut hdu = ImageHdu::from_channels(2, 2, &[&[1i16, 2, 3, 4][..]])?;
/// match hdu.append_channel(&[1i16, 2]) {
///     Err(Error::ValidationFailed { kind: ValidationKind::IncompatibleSize, reason }) => {
///         eprintln!("rejected: {reason}");
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
/// # Ok::<(), fitshdu::Error>(())
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A mutating call was rejected; the HDU is unchanged.
    ///
    /// # Fields
    ///
    /// * `kind` - The failure class
    /// * `reason` - Human-readable description of what did not match
    #[error("Validation failed ({kind}): {reason}")]
    ValidationFailed {
        /// The failure class
        kind: ValidationKind,
        /// The human-readable reason
        reason: String,
    },

    /// An out of bound access was attempted while decoding a buffer.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The `BITPIX` value is not one of 8, 16, 32, 64, -32 or -64.
    #[error("Unsupported BITPIX value - {0}")]
    UnsupportedBitpix(i64),

    /// The keyword is longer than 8 characters or uses characters outside `A-Z0-9_-`.
    #[error("Invalid keyword - '{0}'")]
    InvalidKeyword(String),

    /// A header record holds a value that cannot be interpreted for its keyword.
    #[error("Invalid value for {keyword}: {message}")]
    InvalidValue {
        /// The keyword whose value was rejected
        keyword: String,
        /// What was wrong with the value
        message: String,
    },
}

impl Error {
    /// Returns the validation category if this is a [`Error::ValidationFailed`].
    #[must_use]
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            Error::ValidationFailed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_macro_formats_reason() {
        let err = validation_error!(
            ValidationKind::IncompatibleSize,
            "Vector size {} incompatible with {} samples per channel",
            2,
            4
        );

        assert_eq!(err.validation_kind(), Some(ValidationKind::IncompatibleSize));
        assert_eq!(
            err.to_string(),
            "Validation failed (incompatible size): Vector size 2 incompatible with 4 samples per channel"
        );
    }

    #[test]
    fn non_validation_errors_have_no_kind() {
        assert_eq!(Error::OutOfBounds.validation_kind(), None);
        assert_eq!(Error::UnsupportedBitpix(12).validation_kind(), None);
    }
}
