//! # fitshdu Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the fitshdu library. Import this module to get quick access to the essential
//! types for building and inspecting image HDUs.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all fitshdu operations
pub use crate::Error;

/// The category carried by a rejected mutation
pub use crate::ValidationKind;

/// The result type used throughout fitshdu
pub use crate::Result;

/// Validation policy for layout mutations
pub use crate::LayoutConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The image layout engine
pub use crate::ImageHdu;

/// Layout derived from a header
pub use crate::ImageDescriptor;

// ================================================================================================
// Data Unit
// ================================================================================================

/// Sample type codes, sample trait and the data buffer
pub use crate::data::{Bitpix, DataUnit, SampleIO};

// ================================================================================================
// Header
// ================================================================================================

/// Keyword vocabulary and records
pub use crate::header::{HeaderRecord, HeaderValue, Keyword, StandardKeyword};

/// Keyword storage and its typed accessors
pub use crate::header::{HeaderStore, HeaderStoreExt, HeaderUnit, CHANNEL_AXIS};
