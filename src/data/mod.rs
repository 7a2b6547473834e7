//! Sample types, big-endian transcoding, and the data unit buffer.
//!
//! # Key Components
//!
//! - [`crate::data::Bitpix`] - The closed set of `BITPIX` sample type codes
//! - [`crate::data::io::SampleIO`] - Rust scalars that can be stored in a data unit
//! - [`crate::data::DataUnit`] - The packed big-endian sample buffer

pub(crate) mod bitpix;
pub mod io;
pub(crate) mod unit;

pub use bitpix::Bitpix;
pub use io::SampleIO;
pub use unit::DataUnit;
