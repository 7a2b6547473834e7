// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # fitshdu
//!
//! Layout core for FITS image header-data units (HDUs).
//!
//! An image HDU pairs a keyword header with a packed big-endian data unit. The header
//! declares the sample type (`BITPIX`) and the axis extents (`NAXIS`, `NAXIS1`, ...), the
//! data unit holds the samples. `fitshdu` owns the operations that write both halves and
//! guarantees that after every successful call the data unit is exactly
//! `product(extents) * byte_width(BITPIX)` bytes long.
//!
//! ## Features
//!
//! - **Typed samples** - `u8`/`i8`, `u16`/`i16`, `u32`/`i32`, `u64`/`i64`, `f32` and `f64`
//!   map to their `BITPIX` code at compile time
//! - **Channel stacks** - Planes of equal size stacked along axis 3, appended one at a time
//! - **Raw replacement** - Pre-encoded big-endian bytes for arbitrary dimensionality
//! - **All-or-nothing mutations** - A rejected call leaves header and data untouched
//! - **Pluggable header storage** - The engine only needs [`header::HeaderStore`]
//!
//! ## Quick Start
//!
//! ```rust
//! use fitshdu::prelude::*;
//!
//! let red = [10u8, 20, 30, 40];
//! let green = [11u8, 21, 31, 41];
//!
//! let mut hdu = ImageHdu::from_channels(2, 2, &[red, green])?;
//! hdu.append_channel(&[12u8, 22, 32, 42])?;
//!
//! assert_eq!(hdu.header().naxis()?, Some(3));
//! assert_eq!(hdu.header().axis_extent(3)?, Some(3));
//! assert_eq!(hdu.data_unit().map(DataUnit::len), Some(12));
//! # Ok::<(), fitshdu::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`data`] - `BITPIX` codes, big-endian sample transcoding and the [`DataUnit`] buffer
//! - [`header`] - Keywords, values, records and the [`header::HeaderStore`] capability
//! - [`hdu`] - The [`ImageHdu`] layout engine and its [`LayoutConfig`]
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//!
//! ## Standards Compliance
//!
//! Keyword syntax, `BITPIX` codes and the big-endian sample encoding follow the FITS
//! Standard 4.0. Header card serialization and block padding are left to the caller.
//!
//! ### References
//!
//! - [FITS Standard 4.0](https://fits.gsfc.nasa.gov/standard40/fits_standard40aa-le.pdf)
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Rejected mutations carry a
//! [`ValidationKind`]:
//!
//! ```rust
//! use fitshdu::{Error, ImageHdu, ValidationKind};
//!
//! let mut hdu = ImageHdu::from_channels(2, 1, &[[1.0f32, 2.0]])?;
//! match hdu.append_channel(&[1i32, 2]) {
//!     Err(Error::ValidationFailed { kind: ValidationKind::IncompatibleFormat, .. }) => {}
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! # Ok::<(), fitshdu::Error>(())
//! ```
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run image_hdu --release
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench --bench transcode
//! ```
#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use fitshdu::prelude::*;
///
/// let hdu = ImageHdu::empty::<f64>(16, 16)?;
/// assert_eq!(hdu.header().bitpix()?, Some(Bitpix::Float64));
/// # Ok::<(), fitshdu::Error>(())
/// ```
pub mod prelude;

/// Sample types and the big-endian data unit
///
/// # Key Types
///
/// - [`data::Bitpix`] - `BITPIX` codes and their byte widths
/// - [`data::SampleIO`] - Scalars with a fixed `BITPIX` and big-endian byte form
/// - [`data::DataUnit`] - Packed sample bytes of one HDU
///
/// # Examples
///
/// ```rust
/// use fitshdu::data::io::{encode_be_slice, read_be};
///
/// let bytes = encode_be_slice(&[0x0102u16, 0x0304], 0);
/// assert_eq!(bytes, [0x01, 0x02, 0x03, 0x04]);
/// assert_eq!(read_be::<u16>(&bytes[2..])?, 0x0304);
/// # Ok::<(), fitshdu::Error>(())
/// ```
pub mod data;

/// Header keywords, values and keyword stores
///
/// The layout engine touches headers only through [`header::HeaderStore`], so callers can
/// back an [`ImageHdu`] by their own card storage. [`header::HeaderUnit`] is the in-memory
/// store used by default.
pub mod header;

/// The image layout engine
pub mod hdu;

/// `fitshdu` Result type
///
/// A type alias for `std::result::Result<T, Error>` where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `fitshdu` Error type
///
/// The main error type for all operations in this crate. See [`Error`] for the variants.
pub use error::{Error, ValidationKind};

pub use data::{Bitpix, DataUnit, SampleIO};
pub use hdu::{ImageDescriptor, ImageHdu, LayoutConfig};
pub use header::{HeaderStore, HeaderUnit};
