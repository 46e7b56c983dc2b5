//! Filter variants and convolution kernels.
//!
//! A [`Filter`] computes one output pixel at a time from a read-only source
//! raster. Point filters ([`Invert`], [`Grayscale`], [`Sepia`],
//! [`Brighten`]) read a single pixel; [`Convolution`] samples a
//! neighborhood window through an odd-sized [`Kernel`]. [`FilterKind`] is
//! the tag-based construction surface that callers select variants
//! through.

mod kernel;
pub use kernel::{Kernel, KernelError};

/// Kernel generators for the built-in convolution filters.
pub mod kernels;

mod ops;
pub use ops::{Brighten, Convolution, Filter, Grayscale, Invert, Sepia};

/// Filter selection tag with construction parameters.
///
/// Kernel shape problems surface here, at construction, never during
/// traversal.
///
/// # Examples
///
/// ```
/// use rastermill_filters::filter::FilterKind;
///
/// let blur = FilterKind::GaussianBlur { radius: 3, sigma: 2.0 }.build();
/// assert!(blur.is_ok());
///
/// let bad = FilterKind::BoxBlur { size: 4 }.build();
/// assert!(bad.is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterKind {
    /// Channel inversion.
    Invert,
    /// Luma desaturation.
    Grayscale,
    /// Warm-shifted luma toning.
    Sepia,
    /// Fixed-offset brightening.
    Brighten,
    /// Unweighted local average over a `size x size` window.
    BoxBlur {
        /// Side length of the kernel, odd.
        size: usize,
    },
    /// Gaussian-weighted blur.
    GaussianBlur {
        /// Kernel radius; the side length is `2 * radius + 1`.
        radius: usize,
        /// Spread of the gaussian, positive.
        sigma: f32,
    },
    /// Horizontal-gradient Sobel operator.
    SobelX,
    /// Vertical-gradient Sobel operator.
    SobelY,
    /// Laplacian-style sharpening.
    Sharpen,
    /// Directional relief with a mid-gray bias.
    Emboss,
    /// Diagonal directional blur over a `size x size` window.
    MotionBlur {
        /// Side length of the kernel, odd.
        size: usize,
    },
}

impl FilterKind {
    /// A box blur over the default 3x3 window.
    pub fn box_blur() -> Self {
        FilterKind::BoxBlur {
            size: kernels::DEFAULT_BOX_BLUR_SIZE,
        }
    }

    /// A gaussian blur with the default radius and sigma.
    pub fn gaussian_blur() -> Self {
        FilterKind::GaussianBlur {
            radius: kernels::DEFAULT_GAUSSIAN_RADIUS,
            sigma: kernels::DEFAULT_GAUSSIAN_SIGMA,
        }
    }

    /// A motion blur over the default 5x5 window.
    pub fn motion_blur() -> Self {
        FilterKind::MotionBlur {
            size: kernels::DEFAULT_MOTION_BLUR_SIZE,
        }
    }

    /// Construct the filter this tag selects.
    ///
    /// # Errors
    ///
    /// Returns a [`KernelError`] when the requested kernel parameters are
    /// invalid (even or zero size, non-positive sigma).
    pub fn build(self) -> Result<Box<dyn Filter>, KernelError> {
        Ok(match self {
            FilterKind::Invert => Box::new(Invert),
            FilterKind::Grayscale => Box::new(Grayscale),
            FilterKind::Sepia => Box::new(Sepia),
            FilterKind::Brighten => Box::new(Brighten),
            FilterKind::BoxBlur { size } => {
                Box::new(Convolution::new(kernels::box_blur_kernel(size)?))
            }
            FilterKind::GaussianBlur { radius, sigma } => {
                Box::new(Convolution::new(kernels::gaussian_kernel(radius, sigma)?))
            }
            FilterKind::SobelX => Box::new(Convolution::new(kernels::sobel_kernel_x()?)),
            FilterKind::SobelY => Box::new(Convolution::new(kernels::sobel_kernel_y()?)),
            FilterKind::Sharpen => Box::new(Convolution::new(kernels::sharpen_kernel()?)),
            FilterKind::Emboss => Box::new(Convolution::with_bias(
                kernels::emboss_kernel()?,
                kernels::EMBOSS_BIAS,
            )),
            FilterKind::MotionBlur { size } => {
                Box::new(Convolution::new(kernels::motion_blur_kernel(size)?))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_all_default_variants() -> Result<(), KernelError> {
        let kinds = [
            FilterKind::Invert,
            FilterKind::Grayscale,
            FilterKind::Sepia,
            FilterKind::Brighten,
            FilterKind::box_blur(),
            FilterKind::gaussian_blur(),
            FilterKind::SobelX,
            FilterKind::SobelY,
            FilterKind::Sharpen,
            FilterKind::Emboss,
            FilterKind::motion_blur(),
        ];

        for kind in kinds {
            kind.build()?;
        }
        Ok(())
    }

    #[test]
    fn build_rejects_bad_parameters() {
        assert_eq!(
            FilterKind::BoxBlur { size: 4 }.build().err(),
            Some(KernelError::InvalidKernelShape(4, 4))
        );
        assert_eq!(
            FilterKind::MotionBlur { size: 0 }.build().err(),
            Some(KernelError::InvalidKernelShape(0, 0))
        );
        assert_eq!(
            FilterKind::GaussianBlur {
                radius: 3,
                sigma: -0.5
            }
            .build()
            .err(),
            Some(KernelError::InvalidSigma(-0.5))
        );
    }
}
