use crate::error::RasterError;
use crate::pixel::Rgb8;

/// Image size in pixels
///
/// A struct to represent the size of a raster in pixels.
///
/// # Examples
///
/// ```
/// use rastermill_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Total number of pixels.
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A width x height grid of [`Rgb8`] pixels in row-major order.
///
/// A raster is read-only once constructed; filter runs allocate a fresh
/// raster for their output rather than writing into their source.
///
/// # Examples
///
/// ```
/// use rastermill_image::{Raster, Rgb8};
///
/// let raster = Raster::new(
///     [2, 2].into(),
///     vec![Rgb8::new(255, 0, 0); 4],
/// ).unwrap();
///
/// assert_eq!(raster.width(), 2);
/// assert_eq!(raster.height(), 2);
/// assert_eq!(raster.pixel(1, 1), Rgb8::new(255, 0, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    size: ImageSize,
    data: Vec<Rgb8>,
}

impl Raster {
    /// Create a raster from pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the raster size, an
    /// error is returned.
    pub fn new(size: ImageSize, data: Vec<Rgb8>) -> Result<Self, RasterError> {
        if data.len() != size.num_pixels() {
            return Err(RasterError::InvalidDataLength(
                data.len(),
                size.num_pixels(),
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a raster filled with a single color.
    pub fn from_size_val(size: ImageSize, val: Rgb8) -> Self {
        Self {
            size,
            data: vec![val; size.num_pixels()],
        }
    }

    /// Get the size of the raster in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the raster in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the raster in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// Coordinates must satisfy `x < width` and `y < height`; violating
    /// this is a programming error and panics.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb8 {
        self.data[y * self.size.width + x]
    }

    /// Checked pixel read, `None` when `(x, y)` is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&Rgb8> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.data.get(y * self.size.width + x)
    }

    /// The pixel data in row-major order.
    pub fn as_slice(&self) -> &[Rgb8] {
        &self.data
    }

    /// Mutable access to the pixel data in row-major order.
    ///
    /// Exclusive access guarantees no reader observes the writes; filter
    /// runs use this to fill a freshly allocated output raster.
    pub fn as_slice_mut(&mut self) -> &mut [Rgb8] {
        &mut self.data
    }
}
