//! The image layout engine.
//!
//! [`ImageHdu`] pairs a header store with an optional [`DataUnit`] and offers the only
//! operations that mutate either: [`ImageHdu::initialize_as_image`],
//! [`ImageHdu::replace_image`], [`ImageHdu::replace_raw`] and
//! [`ImageHdu::append_channel`]. Each call validates its input, plans every header write,
//! encodes the samples, and only then touches the HDU, so a failed call leaves header and
//! data exactly as they were.
//!
//! # Layout
//!
//! Channel vectors are stored one after another in the order supplied. Axis 1 is the
//! width, axis 2 the height and axis 3 the channel count:
//!
//! ```text
//! | channel 0: width*height samples | channel 1: width*height samples | ...
//! ```
//!
//! # Examples
//!
//! ```rust
//! use fitshdu::{Bitpix, ImageHdu};
//!
//! let mut hdu = ImageHdu::from_channels(2, 2, &[[1i16, 2, 3, 4]])?;
//! hdu.append_channel(&[5i16, 6, 7, 8])?;
//!
//! let descriptor = hdu.descriptor()?.expect("BITPIX is declared");
//! assert_eq!(descriptor.bitpix(), Bitpix::Int16);
//! assert_eq!(descriptor.extents(), &[2, 2, 2]);
//! assert_eq!(hdu.channel::<i16>(1)?, [5, 6, 7, 8]);
//! # Ok::<(), fitshdu::Error>(())
//! ```

use crate::{
    data::{io::encode_be_slice, Bitpix, DataUnit, SampleIO},
    error::ValidationKind,
    hdu::{config::LayoutConfig, descriptor::ImageDescriptor},
    header::{
        HeaderRecord, HeaderStore, HeaderStoreExt, HeaderUnit, HeaderValue, Keyword,
        StandardKeyword, CHANNEL_AXIS,
    },
    Error, Result,
};

/// Header writes planned by a mutation, applied only once all validation passed.
#[derive(Default)]
struct HeaderUpdate {
    sets: Vec<HeaderRecord>,
    removals: Vec<Keyword>,
}

impl HeaderUpdate {
    fn bitpix(&mut self, bitpix: Bitpix) {
        self.sets.push(HeaderRecord::new(
            StandardKeyword::Bitpix.into(),
            HeaderValue::Integer(bitpix.code()),
            Some(bitpix.comment()),
        ));
    }

    fn naxis(&mut self, naxis: usize, comment: &str) -> Result<()> {
        self.sets.push(HeaderRecord::new(
            StandardKeyword::Naxis.into(),
            HeaderValue::Integer(to_header_int(naxis, "NAXIS")?),
            Some(comment.to_string()),
        ));
        Ok(())
    }

    fn axis(&mut self, axis: usize, extent: usize, comment: String) -> Result<()> {
        let keyword = Keyword::axis(axis)?;
        let value = to_header_int(extent, keyword.as_str())?;
        self.sets.push(HeaderRecord::new(
            keyword,
            HeaderValue::Integer(value),
            Some(comment),
        ));
        Ok(())
    }

    /// Drop `NAXISn` keywords above `naxis` that an earlier layout may have left behind.
    fn clear_axes_above(&mut self, naxis: usize, previous_naxis: usize) -> Result<()> {
        let last = previous_naxis.max(CHANNEL_AXIS).min(Keyword::MAX_AXIS);
        for axis in (naxis + 1)..=last {
            self.removals.push(Keyword::axis(axis)?);
        }
        Ok(())
    }

    fn apply<S: HeaderStore + ?Sized>(self, header: &mut S) {
        for keyword in &self.removals {
            header.remove(keyword);
        }
        for record in self.sets {
            header.set(record.keyword, record.value, record.comment);
        }
    }
}

fn to_header_int(value: usize, keyword: &str) -> Result<i64> {
    i64::try_from(value).map_err(|_| {
        validation_error!(
            ValidationKind::InvalidExtent,
            "{} = {} does not fit a header integer",
            keyword,
            value
        )
    })
}

/// Channel planes are contiguous only while axis 3 is the slowest-varying axis.
fn check_channel_axes(naxis: usize) -> Result<()> {
    if naxis > CHANNEL_AXIS {
        return Err(validation_error!(
            ValidationKind::InvalidExtent,
            "NAXIS = {} interleaves channel planes, at most {} axes supported",
            naxis,
            CHANNEL_AXIS
        ));
    }

    Ok(())
}

fn axis_comment(axis: usize) -> String {
    match axis {
        1 => "Width".to_string(),
        2 => "Height".to_string(),
        CHANNEL_AXIS => "Channels".to_string(),
        n => format!("Length of axis {n}"),
    }
}

/// An image header-data unit.
///
/// Generic over the header store so the engine works with any keyword storage; the
/// default is the in-memory [`HeaderUnit`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHdu<S: HeaderStore = HeaderUnit> {
    header: S,
    data_unit: Option<DataUnit>,
    config: LayoutConfig,
}

impl Default for ImageHdu<HeaderUnit> {
    fn default() -> Self {
        ImageHdu::with_header(HeaderUnit::new())
    }
}

impl ImageHdu<HeaderUnit> {
    /// Create an HDU with an empty header and no data unit
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an HDU holding `channels` as a `width x height` image.
    ///
    /// See [`ImageHdu::initialize_as_image`].
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] if no channel is supplied, a channel does not
    /// hold `width * height` samples, or an extent is rejected by the default configuration.
    pub fn from_channels<T, V>(width: usize, height: usize, channels: &[V]) -> Result<Self>
    where
        T: SampleIO,
        V: AsRef<[T]>,
    {
        let mut hdu = Self::new();
        hdu.initialize_as_image(width, height, channels)?;
        Ok(hdu)
    }

    /// Create an HDU declaring an empty `width x height` channel stack of type `T`.
    ///
    /// See [`ImageHdu::declare_layout`].
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] if an extent is rejected by the default configuration.
    pub fn empty<T: SampleIO>(width: usize, height: usize) -> Result<Self> {
        let mut hdu = Self::new();
        hdu.declare_layout::<T>(width, height)?;
        Ok(hdu)
    }
}

impl<S: HeaderStore> ImageHdu<S> {
    /// Wrap an existing header store, with no data unit
    pub fn with_header(header: S) -> Self {
        ImageHdu {
            header,
            data_unit: None,
            config: LayoutConfig::default(),
        }
    }

    /// Assemble an HDU from a header and data unit produced elsewhere, e.g. by a reader.
    ///
    /// The pair is taken as-is; call [`ImageHdu::check_layout`] to verify it.
    pub fn from_parts(header: S, data_unit: Option<DataUnit>) -> Self {
        ImageHdu {
            header,
            data_unit,
            config: LayoutConfig::default(),
        }
    }

    /// Replace the layout configuration
    #[must_use]
    pub fn with_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// The active layout configuration
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Read access to the header store
    pub fn header(&self) -> &S {
        &self.header
    }

    /// Read access to the data unit, `None` if no data has been set
    pub fn data_unit(&self) -> Option<&DataUnit> {
        self.data_unit.as_ref()
    }

    /// Hand header and data unit back to the caller
    pub fn into_parts(self) -> (S, Option<DataUnit>) {
        (self.header, self.data_unit)
    }

    /// The layout currently declared by the header, `None` without `BITPIX`.
    ///
    /// # Errors
    /// Returns an error if a layout keyword holds an invalid value.
    pub fn descriptor(&self) -> Result<Option<ImageDescriptor>> {
        ImageDescriptor::from_header(&self.header)
    }

    /// Verify that the data unit length matches the declared layout.
    ///
    /// Holds after every successful mutation unless a raw replacement was accepted with
    /// [`LayoutConfig::verify_raw_length`] disabled, or the parts came from
    /// [`ImageHdu::from_parts`].
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] with [`ValidationKind::LengthMismatch`] if the
    /// lengths disagree, or a header error if the layout cannot be read.
    pub fn check_layout(&self) -> Result<()> {
        let actual = self.data_unit.as_ref().map_or(0, DataUnit::len);
        let expected = self.descriptor()?.map_or(0, |d| d.byte_len());

        if actual != expected {
            return Err(validation_error!(
                ValidationKind::LengthMismatch,
                "Data unit holds {} bytes, header declares {}",
                actual,
                expected
            ));
        }

        Ok(())
    }

    /// Set the HDU to a `width x height` image made of `channels`.
    ///
    /// Writes `BITPIX` from `T`, `NAXIS = 2` for a single channel and `NAXIS = 3` otherwise,
    /// `NAXIS1 = width`, `NAXIS2 = height` and, for more than one channel, `NAXIS3` as the
    /// channel count. The data unit is replaced by the big-endian encoding of all channels
    /// in the order supplied.
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] if no channel is supplied, a channel does not
    /// hold `width * height` samples, or an extent is rejected by the configuration.
    pub fn initialize_as_image<T, V>(
        &mut self,
        width: usize,
        height: usize,
        channels: &[V],
    ) -> Result<()>
    where
        T: SampleIO,
        V: AsRef<[T]>,
    {
        let naxis = if channels.len() == 1 { 2 } else { 3 };
        self.set_channels(width, height, channels, naxis, "initialize_as_image")
    }

    /// Replace the HDU content with a `width x height` image made of `channels`.
    ///
    /// Same as [`ImageHdu::initialize_as_image`] except that `NAXIS` is always 3 and
    /// `NAXIS3` is always written, even for a single channel.
    ///
    /// # Errors
    /// Same conditions as [`ImageHdu::initialize_as_image`].
    pub fn replace_image<T, V>(&mut self, width: usize, height: usize, channels: &[V]) -> Result<()>
    where
        T: SampleIO,
        V: AsRef<[T]>,
    {
        // NAXIS stays 3 for a single channel here, unlike initialize_as_image
        self.set_channels(width, height, channels, 3, "replace_image")
    }

    /// Replace the HDU content with pre-encoded big-endian bytes.
    ///
    /// Writes `BITPIX`, `NAXIS = dimensions.len()` and `NAXISi = dimensions[i - 1]`, and
    /// stores `raw` verbatim. No transcoding takes place.
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] if an extent is rejected by the configuration,
    /// or, when [`LayoutConfig::verify_raw_length`] is set, if `raw` does not hold exactly
    /// `product(dimensions) * bitpix.byte_width()` bytes.
    pub fn replace_raw(&mut self, dimensions: &[usize], bitpix: Bitpix, raw: Vec<u8>) -> Result<()> {
        self.check_extents(dimensions)?;
        let descriptor = ImageDescriptor::new(bitpix, dimensions.to_vec())?;

        if raw.len() != descriptor.byte_len() {
            if self.config.verify_raw_length {
                return Err(validation_error!(
                    ValidationKind::LengthMismatch,
                    "Raw data of {} bytes incompatible with {} ({} bytes)",
                    raw.len(),
                    descriptor,
                    descriptor.byte_len()
                ));
            }
            log::warn!(
                "replace_raw: accepting {} bytes for {} which declares {} bytes",
                raw.len(),
                descriptor,
                descriptor.byte_len()
            );
        }

        let mut update = HeaderUpdate::default();
        update.bitpix(bitpix);
        update.naxis(dimensions.len(), "Number of axes")?;
        for (index, extent) in dimensions.iter().enumerate() {
            update.axis(index + 1, *extent, axis_comment(index + 1))?;
        }
        update.clear_axes_above(dimensions.len(), self.previous_naxis())?;

        update.apply(&mut self.header);
        self.data_unit = Some(DataUnit::from_bytes(raw));

        log::debug!(
            "replace_raw: {} -> {} bytes",
            descriptor,
            self.data_unit.as_ref().map_or(0, DataUnit::len)
        );
        Ok(())
    }

    /// Append one channel plane to the image.
    ///
    /// `vector` must match the declared `BITPIX` and hold exactly as many samples as one
    /// plane (the product of all extents except axis 3). On success `NAXIS3` grows by one,
    /// `NAXIS` is raised to 3 if it was lower, and the encoded samples are appended to the
    /// data unit (which is created if absent).
    ///
    /// Without an `NAXIS3` keyword the current channel count is taken from the existing
    /// data unit: a planar image counts as one channel, an HDU without data as zero.
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] with
    /// - [`ValidationKind::IncompatibleFormat`] if `T` does not match `BITPIX`
    /// - [`ValidationKind::IncompatibleSize`] if `vector` is not one plane long
    /// - [`ValidationKind::InvalidExtent`] if the declared plane holds no samples, or the
    ///   header declares more than three axes
    ///
    /// The HDU is unchanged on any error.
    pub fn append_channel<T: SampleIO>(&mut self, vector: &[T]) -> Result<()> {
        match self.header.bitpix()? {
            Some(declared) if declared == T::BITPIX => {}
            Some(declared) => {
                return Err(validation_error!(
                    ValidationKind::IncompatibleFormat,
                    "BITPIX {} incompatible with {}",
                    T::BITPIX,
                    declared
                ));
            }
            None => {
                return Err(validation_error!(
                    ValidationKind::IncompatibleFormat,
                    "BITPIX {} incompatible with an HDU that declares no BITPIX",
                    T::BITPIX
                ));
            }
        }

        check_channel_axes(self.header.naxis()?.unwrap_or(0))?;

        let per_channel = self.header.per_channel_sample_count()?;
        if vector.len() != per_channel {
            return Err(validation_error!(
                ValidationKind::IncompatibleSize,
                "Vector size {} incompatible with image dimensions ({} samples per channel)",
                vector.len(),
                per_channel
            ));
        }
        if per_channel == 0 {
            return Err(validation_error!(
                ValidationKind::InvalidExtent,
                "Image dimensions declare an empty channel plane"
            ));
        }

        let channels = match self.header.axis_extent(CHANNEL_AXIS)? {
            Some(channels) => channels,
            None => {
                let plane_len = per_channel * T::byte_width();
                self.data_unit.as_ref().map_or(0, |unit| unit.len() / plane_len)
            }
        };
        let channels = channels.checked_add(1).ok_or_else(|| {
            validation_error!(ValidationKind::InvalidExtent, "Channel count overflows")
        })?;

        let mut update = HeaderUpdate::default();
        if self.header.naxis()?.unwrap_or(0) < CHANNEL_AXIS {
            update.naxis(CHANNEL_AXIS, "Number of axes")?;
        }
        update.axis(CHANNEL_AXIS, channels, axis_comment(CHANNEL_AXIS))?;

        let bytes = encode_be_slice(vector, self.config.parallel_threshold);

        update.apply(&mut self.header);
        match &mut self.data_unit {
            Some(unit) => unit.extend_from_slice(&bytes),
            None => self.data_unit = Some(DataUnit::from_bytes(bytes)),
        }

        log::debug!(
            "append_channel: BITPIX {} channel {} -> {} bytes",
            T::BITPIX,
            channels,
            self.data_unit.as_ref().map_or(0, DataUnit::len)
        );
        Ok(())
    }

    /// Declare an empty `width x height` channel stack of type `T`.
    ///
    /// Writes `BITPIX`, `NAXIS = 3`, `NAXIS1`, `NAXIS2` and `NAXIS3 = 0`, and drops the
    /// data unit. Channels are then added with [`ImageHdu::append_channel`].
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] if an extent is rejected by the configuration.
    pub fn declare_layout<T: SampleIO>(&mut self, width: usize, height: usize) -> Result<()> {
        self.check_extents(&[width, height])?;
        ImageDescriptor::new(T::BITPIX, vec![width, height])?;

        let mut update = HeaderUpdate::default();
        update.bitpix(T::BITPIX);
        update.naxis(CHANNEL_AXIS, "Number of axes")?;
        update.axis(1, width, axis_comment(1))?;
        update.axis(2, height, axis_comment(2))?;
        update.axis(CHANNEL_AXIS, 0, axis_comment(CHANNEL_AXIS))?;
        update.clear_axes_above(CHANNEL_AXIS, self.previous_naxis())?;

        update.apply(&mut self.header);
        self.data_unit = None;

        log::debug!(
            "declare_layout: BITPIX {} [{} x {} x 0]",
            T::BITPIX,
            width,
            height
        );
        Ok(())
    }

    /// Decode the whole data unit as samples of type `T`.
    ///
    /// An HDU without a data unit yields an empty vector.
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] with [`ValidationKind::IncompatibleFormat`] if
    /// `T` does not match `BITPIX`, or [`Error::OutOfBounds`] if the data unit is not a
    /// whole number of samples.
    pub fn samples<T: SampleIO>(&self) -> Result<Vec<T>> {
        self.check_read_format::<T>()?;

        match &self.data_unit {
            Some(unit) => unit.decode(),
            None => Ok(Vec::new()),
        }
    }

    /// Decode channel plane `index` (0-based) as samples of type `T`.
    ///
    /// # Errors
    /// Returns [`Error::ValidationFailed`] with [`ValidationKind::IncompatibleFormat`] if
    /// `T` does not match `BITPIX`, with [`ValidationKind::InvalidExtent`] if the header
    /// declares more than three axes, or [`Error::OutOfBounds`] if the channel does not exist.
    pub fn channel<T: SampleIO>(&self, index: usize) -> Result<Vec<T>> {
        let descriptor = self.check_read_format::<T>()?;
        check_channel_axes(descriptor.axis_count())?;
        if index >= descriptor.channel_count() {
            return Err(Error::OutOfBounds);
        }

        let plane_len = descriptor.per_channel_count() * T::byte_width();
        let unit = self.data_unit.as_ref().ok_or(Error::OutOfBounds)?;

        crate::data::io::decode_be_slice(unit.block(index, plane_len)?)
    }

    fn check_read_format<T: SampleIO>(&self) -> Result<ImageDescriptor> {
        let Some(descriptor) = self.descriptor()? else {
            return Err(validation_error!(
                ValidationKind::IncompatibleFormat,
                "HDU declares no BITPIX"
            ));
        };

        if descriptor.bitpix() != T::BITPIX {
            return Err(validation_error!(
                ValidationKind::IncompatibleFormat,
                "BITPIX {} incompatible with {}",
                T::BITPIX,
                descriptor.bitpix()
            ));
        }

        Ok(descriptor)
    }

    fn set_channels<T, V>(
        &mut self,
        width: usize,
        height: usize,
        channels: &[V],
        naxis: usize,
        operation: &str,
    ) -> Result<()>
    where
        T: SampleIO,
        V: AsRef<[T]>,
    {
        if channels.is_empty() {
            return Err(validation_error!(
                ValidationKind::IncompatibleSize,
                "At least one channel vector is required"
            ));
        }
        self.check_extents(&[width, height, channels.len()])?;

        let descriptor = ImageDescriptor::new(T::BITPIX, vec![width, height, channels.len()])?;
        let plane = width * height;
        for (index, channel) in channels.iter().enumerate() {
            let len = channel.as_ref().len();
            if len != plane {
                return Err(validation_error!(
                    ValidationKind::IncompatibleSize,
                    "Channel {} holds {} samples, {} x {} image needs {}",
                    index,
                    len,
                    width,
                    height,
                    plane
                ));
            }
        }

        let mut update = HeaderUpdate::default();
        update.bitpix(T::BITPIX);
        update.naxis(naxis, "Number of axes")?;
        update.axis(1, width, axis_comment(1))?;
        update.axis(2, height, axis_comment(2))?;
        if naxis == CHANNEL_AXIS {
            update.axis(CHANNEL_AXIS, channels.len(), axis_comment(CHANNEL_AXIS))?;
        }
        update.clear_axes_above(naxis, self.previous_naxis())?;

        let mut unit = DataUnit::with_capacity(descriptor.byte_len());
        for channel in channels {
            unit.extend_from_slice(&encode_be_slice(
                channel.as_ref(),
                self.config.parallel_threshold,
            ));
        }

        update.apply(&mut self.header);
        self.data_unit = Some(unit);

        log::debug!(
            "{}: {} with NAXIS {} -> {} bytes",
            operation,
            descriptor,
            naxis,
            descriptor.byte_len()
        );
        Ok(())
    }

    fn check_extents(&self, extents: &[usize]) -> Result<()> {
        if extents.len() > Keyword::MAX_AXIS {
            return Err(validation_error!(
                ValidationKind::InvalidExtent,
                "{} axes exceed the maximum of {}",
                extents.len(),
                Keyword::MAX_AXIS
            ));
        }

        if self.config.reject_empty_extents {
            if let Some(index) = extents.iter().position(|extent| *extent == 0) {
                return Err(validation_error!(
                    ValidationKind::InvalidExtent,
                    "NAXIS{} must be positive",
                    index + 1
                ));
            }
        }

        Ok(())
    }

    fn previous_naxis(&self) -> usize {
        // a malformed NAXIS is overwritten anyway
        self.header.naxis().ok().flatten().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(hdu: &ImageHdu, keyword: &str) -> Option<i64> {
        hdu.header()
            .integer(&Keyword::new(keyword).unwrap())
            .unwrap()
    }

    #[test]
    fn initialize_single_channel() {
        let hdu = ImageHdu::from_channels(2, 2, &[[1i16, 2, 3, 4]]).unwrap();

        assert_eq!(int(&hdu, "BITPIX"), Some(16));
        assert_eq!(int(&hdu, "NAXIS"), Some(2));
        assert_eq!(int(&hdu, "NAXIS1"), Some(2));
        assert_eq!(int(&hdu, "NAXIS2"), Some(2));
        assert_eq!(int(&hdu, "NAXIS3"), None);
        assert_eq!(
            hdu.data_unit().unwrap().as_bytes(),
            &[0x00, 0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x04]
        );
        hdu.check_layout().unwrap();
    }

    #[test]
    fn initialize_multi_channel() {
        let hdu = ImageHdu::from_channels(2, 2, &[[1i16, 2, 3, 4], [5, 6, 7, 8]]).unwrap();

        assert_eq!(int(&hdu, "NAXIS"), Some(3));
        assert_eq!(int(&hdu, "NAXIS3"), Some(2));

        let bytes = hdu.data_unit().unwrap().as_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &[0, 1, 0, 2, 0, 3, 0, 4]);
        assert_eq!(&bytes[8..], &[0, 5, 0, 6, 0, 7, 0, 8]);
        hdu.check_layout().unwrap();
    }

    #[test]
    fn initialize_rejects_bad_input() {
        let mut hdu = ImageHdu::new();

        let err = hdu
            .initialize_as_image::<u8, [u8; 0]>(2, 2, &[])
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::IncompatibleSize));

        let err = hdu
            .initialize_as_image(2, 2, &[vec![1u8, 2, 3, 4], vec![1, 2, 3]])
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::IncompatibleSize));

        let err = hdu
            .initialize_as_image::<u8, Vec<u8>>(0, 2, &[Vec::new()])
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidExtent));

        assert!(hdu.header().is_empty());
        assert!(hdu.data_unit().is_none());
    }

    #[test]
    fn legacy_accepts_empty_extents() {
        let mut hdu = ImageHdu::new().with_config(LayoutConfig::legacy());
        hdu.initialize_as_image::<f32, Vec<f32>>(0, 3, &[Vec::new()])
            .unwrap();

        assert_eq!(int(&hdu, "NAXIS1"), Some(0));
        assert!(hdu.data_unit().unwrap().is_empty());
        hdu.check_layout().unwrap();
    }

    #[test]
    fn replace_image_always_three_axes() {
        let mut hdu = ImageHdu::new();
        hdu.replace_image(3, 1, &[[1.5f64, -2.0, 0.25]]).unwrap();

        assert_eq!(int(&hdu, "BITPIX"), Some(-64));
        assert_eq!(int(&hdu, "NAXIS"), Some(3));
        assert_eq!(int(&hdu, "NAXIS3"), Some(1));
        assert_eq!(hdu.data_unit().unwrap().len(), 24);
        assert_eq!(hdu.samples::<f64>().unwrap(), [1.5, -2.0, 0.25]);
        hdu.check_layout().unwrap();
    }

    #[test]
    fn initialize_after_stack_drops_channel_axis() {
        let mut hdu = ImageHdu::from_channels(1, 2, &[[1u32, 2], [3, 4]]).unwrap();
        hdu.initialize_as_image(2, 1, &[[9u32, 8]]).unwrap();

        assert_eq!(int(&hdu, "NAXIS"), Some(2));
        assert_eq!(int(&hdu, "NAXIS3"), None);
        hdu.check_layout().unwrap();
    }

    #[test]
    fn replace_raw_writes_dimensions() {
        let mut hdu = ImageHdu::from_channels(2, 2, &[[1i8, 2, 3, 4], [5, 6, 7, 8]]).unwrap();
        let raw = vec![0x3F, 0x80, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00];
        hdu.replace_raw(&[2], Bitpix::Float32, raw.clone()).unwrap();

        assert_eq!(int(&hdu, "BITPIX"), Some(-32));
        assert_eq!(int(&hdu, "NAXIS"), Some(1));
        assert_eq!(int(&hdu, "NAXIS1"), Some(2));
        assert_eq!(int(&hdu, "NAXIS2"), None);
        assert_eq!(int(&hdu, "NAXIS3"), None);
        assert_eq!(hdu.data_unit().unwrap().as_bytes(), raw.as_slice());
        assert_eq!(hdu.samples::<f32>().unwrap(), [1.0, 2.0]);
    }

    #[test]
    fn replace_raw_length_policy() {
        let mut strict = ImageHdu::new();
        let err = strict
            .replace_raw(&[2, 2], Bitpix::Int16, vec![0; 6])
            .unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::LengthMismatch));
        assert!(strict.header().is_empty());

        let mut legacy = ImageHdu::new().with_config(LayoutConfig::legacy());
        legacy
            .replace_raw(&[2, 2], Bitpix::Int16, vec![0; 6])
            .unwrap();
        assert_eq!(legacy.data_unit().unwrap().len(), 6);
        assert!(legacy.check_layout().is_err());
    }

    #[test]
    fn append_creates_and_extends() {
        let mut hdu = ImageHdu::empty::<i16>(2, 2).unwrap();
        assert!(hdu.data_unit().is_none());
        hdu.check_layout().unwrap();

        hdu.append_channel(&[1i16, 2, 3, 4]).unwrap();
        assert_eq!(int(&hdu, "NAXIS3"), Some(1));
        assert_eq!(hdu.data_unit().unwrap().len(), 8);

        hdu.append_channel(&[5i16, 6, 7, 8]).unwrap();
        assert_eq!(int(&hdu, "NAXIS3"), Some(2));
        assert_eq!(hdu.data_unit().unwrap().len(), 16);
        assert_eq!(hdu.channel::<i16>(1).unwrap(), [5, 6, 7, 8]);
        hdu.check_layout().unwrap();
    }

    #[test]
    fn append_to_planar_image() {
        let mut hdu = ImageHdu::from_channels(2, 1, &[[1u16, 2]]).unwrap();
        hdu.append_channel(&[3u16, 4]).unwrap();

        assert_eq!(int(&hdu, "NAXIS"), Some(3));
        assert_eq!(int(&hdu, "NAXIS3"), Some(2));
        assert_eq!(hdu.samples::<u16>().unwrap(), [1, 2, 3, 4]);
        hdu.check_layout().unwrap();
    }

    #[test]
    fn append_rejects_format_and_size() {
        let mut hdu = ImageHdu::from_channels(2, 2, &[[1i16, 2, 3, 4]]).unwrap();
        let before = hdu.clone();

        let err = hdu.append_channel(&[1i16, 2]).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::IncompatibleSize));
        assert_eq!(hdu, before);

        let err = hdu.append_channel(&[1.0f32, 2.0, 3.0, 4.0]).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::IncompatibleFormat));
        assert_eq!(hdu, before);

        let err = ImageHdu::new().append_channel(&[1u8]).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::IncompatibleFormat));
    }

    #[test]
    fn append_rejects_empty_plane() {
        let mut hdu = ImageHdu::new().with_config(LayoutConfig::legacy());
        hdu.declare_layout::<u8>(0, 4).unwrap();

        let err = hdu.append_channel::<u8>(&[]).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidExtent));
        assert_eq!(int(&hdu, "NAXIS3"), Some(0));
    }

    #[test]
    fn channels_need_at_most_three_axes() {
        let mut hdu = ImageHdu::new();
        hdu.replace_raw(&[1, 1, 2, 2], Bitpix::Int8, vec![1, 2, 3, 4])
            .unwrap();
        let before = hdu.clone();

        let err = hdu.channel::<u8>(1).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidExtent));

        let err = hdu.append_channel(&[9u8, 10]).unwrap_err();
        assert_eq!(err.validation_kind(), Some(ValidationKind::InvalidExtent));
        assert_eq!(hdu, before);
        assert_eq!(hdu.samples::<u8>().unwrap(), [1, 2, 3, 4]);
    }

    #[test]
    fn read_back_errors() {
        let hdu = ImageHdu::from_channels(1, 1, &[[7i64]]).unwrap();
        assert_eq!(hdu.channel::<i64>(0).unwrap(), [7]);
        assert!(matches!(hdu.channel::<i64>(1), Err(Error::OutOfBounds)));
        assert_eq!(
            hdu.samples::<u32>().unwrap_err().validation_kind(),
            Some(ValidationKind::IncompatibleFormat)
        );
        assert!(ImageHdu::new().samples::<u8>().is_err());
    }

    #[test]
    fn parallel_encoding_matches_serial() {
        let plane: Vec<f32> = (0..64).map(|v| v as f32 * 0.5).collect();

        let mut serial = ImageHdu::new().with_config(LayoutConfig::serial());
        let mut parallel =
            ImageHdu::new().with_config(LayoutConfig::strict().with_parallel_threshold(1));

        serial.initialize_as_image(8, 8, &[&plane]).unwrap();
        parallel.initialize_as_image(8, 8, &[&plane]).unwrap();

        assert_eq!(serial.data_unit(), parallel.data_unit());
    }

    #[test]
    fn into_parts_roundtrip() {
        let hdu = ImageHdu::from_channels(2, 1, &[[1u8, 2]]).unwrap();
        let (header, data) = hdu.into_parts();

        let rebuilt = ImageHdu::from_parts(header, data);
        rebuilt.check_layout().unwrap();
        assert_eq!(rebuilt.samples::<u8>().unwrap(), [1, 2]);
    }
}
