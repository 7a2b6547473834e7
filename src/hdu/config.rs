//! Layout configuration for image HDUs
//!
//! This module controls how strictly [`crate::hdu::ImageHdu`] checks caller input before
//! mutating an HDU, and when sample encoding switches to the parallel path.

/// Configuration for image layout validation and transcoding
///
/// Independent of this configuration, every mutation always checks:
/// - `BITPIX` compatibility on channel append
/// - Sample counts against the declared width/height on initialize, replace and append
///
/// The switches below govern the checks whose strictness is a policy choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Reject a raw replacement whose byte length differs from
    /// `product(dimensions) * byte_width(bitpix)`.
    /// When disabled the mismatch is accepted and logged as a warning.
    pub verify_raw_length: bool,

    /// Reject zero extents (width, height, raw dimensions) on every mutation path.
    /// The channel axis of a layout declared with [`crate::hdu::ImageHdu::declare_layout`]
    /// may still be zero until the first channel is appended.
    pub reject_empty_extents: bool,

    /// Sample count from which vectors are encoded in parallel (0 disables parallel encoding)
    pub parallel_threshold: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl LayoutConfig {
    /// Default sample count from which encoding runs on the rayon pool.
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 18;

    /// Creates a strict configuration: all checks enabled
    #[must_use]
    pub fn strict() -> Self {
        Self {
            verify_raw_length: true,
            reject_empty_extents: true,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Creates a configuration matching the historical permissive behavior
    ///
    /// Raw replacements are trusted verbatim and zero extents are accepted.
    /// **Warning**: Use only when the caller guarantees consistent input; the layout
    /// invariant can be violated by a raw replacement.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            verify_raw_length: false,
            reject_empty_extents: false,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Creates a strict configuration that never encodes in parallel
    #[must_use]
    pub fn serial() -> Self {
        Self {
            parallel_threshold: 0,
            ..Self::strict()
        }
    }

    /// Returns this configuration with a different parallel threshold
    #[must_use]
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}
