//! Image HDU layout engine.
//!
//! # Key Components
//!
//! - [`crate::hdu::ImageHdu`] - Header plus data unit, and the operations that keep them consistent
//! - [`crate::hdu::ImageDescriptor`] - The layout a header declares, derived on demand
//! - [`crate::hdu::LayoutConfig`] - Validation policy and parallel encoding threshold

pub(crate) mod config;
pub(crate) mod descriptor;
pub(crate) mod image;

pub use config::LayoutConfig;
pub use descriptor::ImageDescriptor;
pub use image::ImageHdu;
