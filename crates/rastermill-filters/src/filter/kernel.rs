use thiserror::Error;

/// Errors that can occur during kernel construction.
#[derive(Error, Debug, PartialEq)]
pub enum KernelError {
    /// Kernel dimensions must be odd and non-zero so a center cell exists.
    #[error("kernel dimensions must be odd and non-zero, got {0}x{1}")]
    InvalidKernelShape(usize, usize),

    /// The weight buffer length does not match the kernel dimensions.
    #[error("weight length ({0}) does not match the kernel size ({1})")]
    InvalidDataLength(usize, usize),

    /// The gaussian sigma must be positive.
    #[error("sigma must be > 0, got {0}")]
    InvalidSigma(f32),
}

/// A 2D grid of convolution weights addressed by signed offsets from its
/// center.
///
/// Width and height are always odd, so the center cell is unique and the
/// per-axis radius is `(dimension - 1) / 2`. Weights are immutable after
/// construction; normalization is up to the generator that produced them.
///
/// # Examples
///
/// ```
/// use rastermill_filters::filter::Kernel;
///
/// let kernel = Kernel::from_rows([
///     [0.0, 1.0, 0.0],
///     [1.0, 2.0, 1.0],
///     [0.0, 1.0, 0.0],
/// ]).unwrap();
///
/// assert_eq!(kernel.radius_x(), 1);
/// assert_eq!(kernel.weight(0, 0), 2.0);
/// assert_eq!(kernel.weight(-1, 0), 1.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    width: usize,
    height: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidKernelShape`] when either dimension is
    /// even or zero, and [`KernelError::InvalidDataLength`] when the weight
    /// buffer does not hold `width * height` values.
    pub fn new(width: usize, height: usize, weights: Vec<f32>) -> Result<Self, KernelError> {
        if width == 0 || height == 0 || width % 2 == 0 || height % 2 == 0 {
            return Err(KernelError::InvalidKernelShape(width, height));
        }

        if weights.len() != width * height {
            return Err(KernelError::InvalidDataLength(weights.len(), width * height));
        }

        Ok(Self {
            width,
            height,
            weights,
        })
    }

    /// Create a kernel from literal rows.
    pub fn from_rows<const W: usize, const H: usize>(
        rows: [[f32; W]; H],
    ) -> Result<Self, KernelError> {
        Self::new(W, H, rows.into_iter().flatten().collect())
    }

    /// Kernel width, always odd.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Kernel height, always odd.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Horizontal radius: the largest `dx` offset from the center.
    pub fn radius_x(&self) -> usize {
        (self.width - 1) / 2
    }

    /// Vertical radius: the largest `dy` offset from the center.
    pub fn radius_y(&self) -> usize {
        (self.height - 1) / 2
    }

    /// Weight at offset `(dx, dy)` from the center cell.
    ///
    /// Offsets must satisfy `|dx| <= radius_x` and `|dy| <= radius_y`;
    /// violating this is a programming error and panics.
    pub fn weight(&self, dx: isize, dy: isize) -> f32 {
        let col = (dx + self.radius_x() as isize) as usize;
        let row = (dy + self.radius_y() as isize) as usize;
        self.weights[row * self.width + col]
    }

    /// Sum of all weights.
    ///
    /// 1.0 for normalized smoothing kernels, 0.0 for pure gradient
    /// operators.
    pub fn mass(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// The weights in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }
}
