//! Header records and the keyword store capability.
//!
//! # Key Components
//!
//! - [`crate::header::Keyword`] / [`crate::header::StandardKeyword`] - Keyword syntax and vocabulary
//! - [`crate::header::HeaderValue`] - Typed record values
//! - [`crate::header::HeaderRecord`] - keyword, value, comment
//! - [`crate::header::HeaderStore`] - The get/set capability the layout engine consumes
//! - [`crate::header::HeaderUnit`] - Ordered in-memory implementation of [`crate::header::HeaderStore`]

pub(crate) mod keyword;
pub(crate) mod record;
pub(crate) mod store;
pub(crate) mod value;

pub use keyword::{Keyword, StandardKeyword};
pub use record::HeaderRecord;
pub use store::{HeaderStore, HeaderStoreExt, HeaderUnit, CHANNEL_AXIS};
pub use value::HeaderValue;
