#![deny(missing_docs)]
//! Raster and pixel value types for image filtering

/// Error types for the raster module.
pub mod error;

/// raster representation for filtering purposes.
pub mod image;

/// 8-bit RGB pixel value type.
pub mod pixel;

pub use crate::error::RasterError;
pub use crate::image::{ImageSize, Raster};
pub use crate::pixel::Rgb8;
