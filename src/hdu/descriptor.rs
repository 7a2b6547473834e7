//! Derived image layout.
//!
//! An [`ImageDescriptor`] is recomputed from the header on demand and never stored; it is
//! the view the layout engine validates incoming data against.

use crate::{
    data::Bitpix,
    header::{HeaderStore, HeaderStoreExt, CHANNEL_AXIS},
    Error, Result,
};

/// Sample type and axis extents declared by a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    bitpix: Bitpix,
    extents: Vec<usize>,
}

impl ImageDescriptor {
    /// Create a descriptor from its parts.
    ///
    /// # Errors
    /// Returns [`Error::InvalidValue`] if the total byte length overflows `usize`.
    pub fn new(bitpix: Bitpix, extents: Vec<usize>) -> Result<Self> {
        let overflow = extents
            .iter()
            .try_fold(bitpix.byte_width(), |acc, extent| acc.checked_mul(*extent))
            .is_none();
        if overflow {
            return Err(Error::InvalidValue {
                keyword: "NAXIS".to_string(),
                message: format!("extents {extents:?} overflow the addressable data size"),
            });
        }

        Ok(ImageDescriptor { bitpix, extents })
    }

    /// Read the layout declared in `header`.
    ///
    /// Returns `Ok(None)` if no `BITPIX` is declared. A missing `NAXIS` counts as zero axes.
    ///
    /// # Errors
    /// Returns an error if a layout keyword holds an invalid value, or if an axis up to
    /// `NAXIS` has no extent.
    pub fn from_header<S: HeaderStore + ?Sized>(header: &S) -> Result<Option<Self>> {
        let Some(bitpix) = header.bitpix()? else {
            return Ok(None);
        };

        let naxis = header.naxis()?.unwrap_or(0);
        let mut extents = Vec::with_capacity(naxis);
        for axis in 1..=naxis {
            let extent = header.axis_extent(axis)?.ok_or_else(|| Error::InvalidValue {
                keyword: format!("NAXIS{axis}"),
                message: format!("missing although NAXIS = {naxis}"),
            })?;
            extents.push(extent);
        }

        ImageDescriptor::new(bitpix, extents).map(Some)
    }

    /// Declared sample type
    #[must_use]
    pub fn bitpix(&self) -> Bitpix {
        self.bitpix
    }

    /// Number of axes (`NAXIS`)
    #[must_use]
    pub fn axis_count(&self) -> usize {
        self.extents.len()
    }

    /// All extents, axis 1 first
    #[must_use]
    pub fn extents(&self) -> &[usize] {
        &self.extents
    }

    /// Extent of axis `n` (1-based)
    #[must_use]
    pub fn extent(&self, n: usize) -> Option<usize> {
        n.checked_sub(1).and_then(|index| self.extents.get(index).copied())
    }

    /// Total number of samples; zero when no axes are declared.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        if self.extents.is_empty() {
            return 0;
        }
        self.extents.iter().product()
    }

    /// Expected data unit length in bytes
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.sample_count() * self.bitpix.byte_width()
    }

    /// Number of channel planes; images with fewer than three axes hold one plane.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        match self.extent(CHANNEL_AXIS) {
            Some(channels) => channels,
            None if self.extents.is_empty() => 0,
            None => 1,
        }
    }

    /// Samples per channel plane. Only a contiguous block of the data unit for
    /// [`ImageDescriptor::axis_count`] up to 3.
    #[must_use]
    pub fn per_channel_count(&self) -> usize {
        if self.extents.is_empty() {
            return 0;
        }
        self.extents
            .iter()
            .enumerate()
            .filter(|(index, _)| index + 1 != CHANNEL_AXIS)
            .map(|(_, extent)| *extent)
            .product()
    }
}

impl std::fmt::Display for ImageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let extents: Vec<String> = self.extents.iter().map(ToString::to_string).collect();
        write!(f, "BITPIX {} [{}]", self.bitpix, extents.join(" x "))
    }
}
