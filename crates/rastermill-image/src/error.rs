/// An error type for the raster module.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RasterError {
    /// Error when the pixel buffer length does not match the raster size.
    #[error("pixel data length ({0}) does not match the raster size ({1})")]
    InvalidDataLength(usize, usize),
}
