//! Header keyword storage.
//!
//! The image layout engine never owns header records itself; it reads and writes them
//! through the [`HeaderStore`] capability. [`HeaderStoreExt`] layers the typed layout
//! lookups (`BITPIX`, `NAXIS`, `NAXISn`) on top of any store, and [`HeaderUnit`] is the
//! in-memory, insertion-ordered store used by default.

use crate::{
    data::Bitpix,
    header::{
        keyword::{Keyword, StandardKeyword},
        record::HeaderRecord,
        value::HeaderValue,
    },
    Error, Result,
};

/// The axis that stacks channel planes.
pub const CHANNEL_AXIS: usize = 3;

/// Ordered keyword to (value, comment) storage.
pub trait HeaderStore {
    /// Look up the record for `keyword`.
    fn get(&self, keyword: &Keyword) -> Option<&HeaderRecord>;

    /// Create or overwrite the record for `keyword`.
    ///
    /// Overwriting keeps the record's position. A `None` comment keeps the existing comment.
    fn set(&mut self, keyword: Keyword, value: HeaderValue, comment: Option<String>);

    /// Remove the record for `keyword`, returning it if it existed.
    fn remove(&mut self, keyword: &Keyword) -> Option<HeaderRecord>;
}

/// Typed layout lookups available on every [`HeaderStore`].
pub trait HeaderStoreExt: HeaderStore {
    /// The integer value of `keyword`, if present.
    ///
    /// # Errors
    /// Returns [`Error::InvalidValue`] if the record holds a non-integer value.
    fn integer(&self, keyword: &Keyword) -> Result<Option<i64>> {
        let Some(record) = self.get(keyword) else {
            return Ok(None);
        };

        match record.value.as_integer() {
            Some(value) => Ok(Some(value)),
            None => Err(Error::InvalidValue {
                keyword: keyword.to_string(),
                message: format!("expected an integer, found {}", record.value),
            }),
        }
    }

    /// The declared sample type.
    ///
    /// # Errors
    /// Returns an error if `BITPIX` is not an integer or not a supported code.
    fn bitpix(&self) -> Result<Option<Bitpix>> {
        self.integer(&StandardKeyword::Bitpix.into())?
            .map(Bitpix::from_code)
            .transpose()
    }

    /// The declared number of axes.
    ///
    /// # Errors
    /// Returns [`Error::InvalidValue`] if `NAXIS` is not a non-negative integer.
    fn naxis(&self) -> Result<Option<usize>> {
        non_negative(self, &StandardKeyword::Naxis.into())
    }

    /// The declared extent of axis `n` (1-based).
    ///
    /// # Errors
    /// Returns an error if `n` is not a valid axis number or the value is not a
    /// non-negative integer.
    fn axis_extent(&self, n: usize) -> Result<Option<usize>> {
        non_negative(self, &Keyword::axis(n)?)
    }

    /// Samples per channel plane: the product of the extents of all axes except
    /// [`CHANNEL_AXIS`].
    ///
    /// Axes 1 and 2 are always taken into account, even if `NAXIS` is lower or absent;
    /// a missing extent counts as 0. Planes are only contiguous in the data unit while
    /// `NAXIS` is at most 3; [`crate::hdu::ImageHdu`] rejects channel access beyond that.
    ///
    /// # Errors
    /// Returns an error if any layout keyword holds an invalid value.
    fn per_channel_sample_count(&self) -> Result<usize> {
        let axes = self.naxis()?.unwrap_or(0).max(2);

        let mut count = 1_usize;
        for axis in (1..=axes).filter(|axis| *axis != CHANNEL_AXIS) {
            let extent = self.axis_extent(axis)?.unwrap_or(0);
            count = count.checked_mul(extent).ok_or_else(|| Error::InvalidValue {
                keyword: format!("NAXIS{axis}"),
                message: "sample count overflows".to_string(),
            })?;
        }

        Ok(count)
    }
}

impl<S: HeaderStore + ?Sized> HeaderStoreExt for S {}

fn non_negative<S: HeaderStore + ?Sized>(store: &S, keyword: &Keyword) -> Result<Option<usize>> {
    let Some(value) = store.integer(keyword)? else {
        return Ok(None);
    };

    usize::try_from(value)
        .map(Some)
        .map_err(|_| Error::InvalidValue {
            keyword: keyword.to_string(),
            message: format!("expected a non-negative integer, found {value}"),
        })
}

/// In-memory header keeping records in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderUnit {
    records: Vec<HeaderRecord>,
}

impl HeaderUnit {
    /// Create an empty header
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the header has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the records in header order
    pub fn iter(&self) -> std::slice::Iter<'_, HeaderRecord> {
        self.records.iter()
    }
}

impl HeaderStore for HeaderUnit {
    fn get(&self, keyword: &Keyword) -> Option<&HeaderRecord> {
        self.records.iter().find(|record| record.keyword == *keyword)
    }

    fn set(&mut self, keyword: Keyword, value: HeaderValue, comment: Option<String>) {
        if let Some(record) = self
            .records
            .iter_mut()
            .find(|record| record.keyword == keyword)
        {
            record.value = value;
            if comment.is_some() {
                record.comment = comment;
            }
            return;
        }

        self.records.push(HeaderRecord::new(keyword, value, comment));
    }

    fn remove(&mut self, keyword: &Keyword) -> Option<HeaderRecord> {
        let position = self
            .records
            .iter()
            .position(|record| record.keyword == *keyword)?;

        Some(self.records.remove(position))
    }
}

impl<'a> IntoIterator for &'a HeaderUnit {
    type Item = &'a HeaderRecord;
    type IntoIter = std::slice::Iter<'a, HeaderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<HeaderRecord> for HeaderUnit {
    fn from_iter<I: IntoIterator<Item = HeaderRecord>>(iter: I) -> Self {
        let mut header = HeaderUnit::new();
        for record in iter {
            header.set(record.keyword, record.value, record.comment);
        }
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(keyword: &str, value: i64) -> HeaderRecord {
        HeaderRecord::new(Keyword::new(keyword).unwrap(), value.into(), None)
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut header = HeaderUnit::new();
        header.set(
            StandardKeyword::Bitpix.into(),
            16i64.into(),
            Some("16 Bit".to_string()),
        );
        header.set(StandardKeyword::Naxis.into(), 2i64.into(), None);
        header.set(StandardKeyword::Bitpix.into(), (-32i64).into(), None);

        assert_eq!(header.len(), 2);
        let first = header.iter().next().unwrap();
        assert_eq!(first.keyword, StandardKeyword::Bitpix);
        assert_eq!(first.value, HeaderValue::Integer(-32));
        assert_eq!(first.comment.as_deref(), Some("16 Bit"));
    }

    #[test]
    fn remove() {
        let mut header: HeaderUnit = [int("NAXIS", 3), int("NAXIS3", 2)].into_iter().collect();
        let naxis3 = Keyword::axis(3).unwrap();

        assert!(header.remove(&naxis3).is_some());
        assert!(header.remove(&naxis3).is_none());
        assert_eq!(header.len(), 1);
    }

    #[test]
    fn typed_lookups() {
        let header: HeaderUnit = [int("BITPIX", -64), int("NAXIS", 2), int("NAXIS1", 5)]
            .into_iter()
            .collect();

        assert_eq!(header.bitpix().unwrap(), Some(Bitpix::Float64));
        assert_eq!(header.naxis().unwrap(), Some(2));
        assert_eq!(header.axis_extent(1).unwrap(), Some(5));
        assert_eq!(header.axis_extent(2).unwrap(), None);
        assert!(header.axis_extent(0).is_err());
        assert!(HeaderUnit::new().bitpix().unwrap().is_none());
    }

    #[test]
    fn invalid_values() {
        let mut header: HeaderUnit = [int("BITPIX", 12), int("NAXIS1", -4)].into_iter().collect();
        assert!(matches!(header.bitpix(), Err(Error::UnsupportedBitpix(12))));
        assert!(matches!(
            header.axis_extent(1),
            Err(Error::InvalidValue { .. })
        ));

        header.set(StandardKeyword::Naxis.into(), "two".into(), None);
        assert!(matches!(header.naxis(), Err(Error::InvalidValue { .. })));
    }

    #[test]
    fn per_channel_count_skips_channel_axis() {
        let header: HeaderUnit = [
            int("NAXIS", 4),
            int("NAXIS1", 3),
            int("NAXIS2", 2),
            int("NAXIS3", 7),
            int("NAXIS4", 5),
        ]
        .into_iter()
        .collect();
        assert_eq!(header.per_channel_sample_count().unwrap(), 30);

        let planar: HeaderUnit = [int("NAXIS1", 4), int("NAXIS2", 4)].into_iter().collect();
        assert_eq!(planar.per_channel_sample_count().unwrap(), 16);

        assert_eq!(HeaderUnit::new().per_channel_sample_count().unwrap(), 0);
    }
}
