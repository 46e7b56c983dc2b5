use rastermill_image::{Raster, Rgb8};

use super::kernel::Kernel;
use crate::core::clamp;

/// Weights for the luma computation shared by [`Grayscale`] and [`Sepia`].
const LUMA_R: f64 = 0.36;
const LUMA_G: f64 = 0.53;
const LUMA_B: f64 = 0.11;

/// Channel shift applied by [`Sepia`].
const SEPIA_SHIFT: i32 = 20;

/// Channel offset applied by [`Brighten`].
const BRIGHTEN_SHIFT: i32 = 40;

/// A per-pixel image transformation.
///
/// The single operation computes the output color at `(x, y)` from the full
/// source raster; neighborhood filters may sample a window around the
/// coordinate, clamped to the raster bounds. Implementations are pure: no
/// side effects, no mutation of the source.
pub trait Filter: Send + Sync {
    /// Compute the output color at `(x, y)`.
    ///
    /// Coordinates must satisfy `x < src.width()` and `y < src.height()`.
    fn color_at(&self, src: &Raster, x: usize, y: usize) -> Rgb8;
}

/// Per-term truncated luma: `trunc(0.36 R) + trunc(0.53 G) + trunc(0.11 B)`.
///
/// Terms are evaluated in f64 so that products landing on an integer, like
/// `0.53 * 200`, truncate to that integer and not one below it.
fn luma(px: Rgb8) -> i32 {
    (LUMA_R * px.r as f64) as i32 + (LUMA_G * px.g as f64) as i32 + (LUMA_B * px.b as f64) as i32
}

/// Channel inversion: every channel becomes `255 - c`.
///
/// # Examples
///
/// ```
/// use rastermill_filters::filter::{Filter, Invert};
/// use rastermill_image::{Raster, Rgb8};
///
/// let src = Raster::from_size_val([1, 1].into(), Rgb8::new(255, 0, 10));
/// assert_eq!(Invert.color_at(&src, 0, 0), Rgb8::new(0, 255, 245));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Invert;

impl Filter for Invert {
    fn color_at(&self, src: &Raster, x: usize, y: usize) -> Rgb8 {
        let px = src.pixel(x, y);
        Rgb8::new(255 - px.r, 255 - px.g, 255 - px.b)
    }
}

/// Luma-based desaturation; all three output channels carry the same
/// intensity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Grayscale;

impl Filter for Grayscale {
    fn color_at(&self, src: &Raster, x: usize, y: usize) -> Rgb8 {
        let intensity = clamp(luma(src.pixel(x, y)), 0, 255) as u8;
        Rgb8::new(intensity, intensity, intensity)
    }
}

/// Sepia toning: the grayscale luma shifted warm per channel.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sepia;

impl Filter for Sepia {
    fn color_at(&self, src: &Raster, x: usize, y: usize) -> Rgb8 {
        let intensity = luma(src.pixel(x, y));
        Rgb8::new(
            clamp(intensity + 2 * SEPIA_SHIFT, 0, 255) as u8,
            clamp(intensity + SEPIA_SHIFT / 2, 0, 255) as u8,
            clamp(intensity - SEPIA_SHIFT, 0, 255) as u8,
        )
    }
}

/// Fixed-offset brightening with saturation at the channel ceiling.
#[derive(Clone, Copy, Debug, Default)]
pub struct Brighten;

impl Filter for Brighten {
    fn color_at(&self, src: &Raster, x: usize, y: usize) -> Rgb8 {
        let px = src.pixel(x, y);
        Rgb8::new(
            clamp(px.r as i32 + BRIGHTEN_SHIFT, 0, 255) as u8,
            clamp(px.g as i32 + BRIGHTEN_SHIFT, 0, 255) as u8,
            clamp(px.b as i32 + BRIGHTEN_SHIFT, 0, 255) as u8,
        )
    }
}

/// Neighborhood convolution against an odd-sized [`Kernel`].
///
/// Out-of-bounds neighbor coordinates are clamped to the nearest edge pixel
/// (clamp-to-edge border policy). Channel sums accumulate in `f32`; the
/// optional per-channel bias is added after accumulation, and truncation to
/// 8 bits happens only at the final saturating clamp.
#[derive(Clone, Debug)]
pub struct Convolution {
    kernel: Kernel,
    bias: f32,
}

impl Convolution {
    /// Convolve with `kernel` and no output bias.
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel, bias: 0.0 }
    }

    /// Convolve with `kernel`, adding `bias` to each channel sum before
    /// clamping. Used by the emboss filter.
    pub fn with_bias(kernel: Kernel, bias: f32) -> Self {
        Self { kernel, bias }
    }

    /// The kernel this filter convolves with.
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}

impl Filter for Convolution {
    fn color_at(&self, src: &Raster, x: usize, y: usize) -> Rgb8 {
        let radius_x = self.kernel.radius_x() as isize;
        let radius_y = self.kernel.radius_y() as isize;
        let max_x = src.width() as isize - 1;
        let max_y = src.height() as isize - 1;

        let mut sum_r = 0.0f32;
        let mut sum_g = 0.0f32;
        let mut sum_b = 0.0f32;

        for dy in -radius_y..=radius_y {
            for dx in -radius_x..=radius_x {
                let sx = clamp(x as isize + dx, 0, max_x) as usize;
                let sy = clamp(y as isize + dy, 0, max_y) as usize;
                let weight = self.kernel.weight(dx, dy);
                let px = src.pixel(sx, sy);
                sum_r += weight * px.r as f32;
                sum_g += weight * px.g as f32;
                sum_b += weight * px.b as f32;
            }
        }

        Rgb8::from_f32(sum_r + self.bias, sum_g + self.bias, sum_b + self.bias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels;
    use rastermill_image::{ImageSize, RasterError};

    fn checker() -> Result<Raster, RasterError> {
        Raster::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![
                Rgb8::new(255, 0, 0),
                Rgb8::new(0, 255, 0),
                Rgb8::new(0, 0, 255),
                Rgb8::new(255, 255, 255),
            ],
        )
    }

    #[test]
    fn invert_is_an_involution() -> Result<(), RasterError> {
        let src = checker()?;
        for y in 0..2 {
            for x in 0..2 {
                let once = Invert.color_at(&src, x, y);
                let tmp = Raster::from_size_val([1, 1].into(), once);
                assert_eq!(Invert.color_at(&tmp, 0, 0), src.pixel(x, y));
            }
        }
        Ok(())
    }

    #[test]
    fn grayscale_channels_are_equal() -> Result<(), RasterError> {
        let src = checker()?;
        for y in 0..2 {
            for x in 0..2 {
                let px = Grayscale.color_at(&src, x, y);
                assert_eq!(px.r, px.g);
                assert_eq!(px.g, px.b);
            }
        }
        Ok(())
    }

    #[test]
    fn grayscale_truncates_per_term() {
        // 0.36 * 255 = 91.8, 0.53 * 255 = 135.15, 0.11 * 255 = 28.05
        // truncated per term: 91 + 135 + 28 = 254
        let src = Raster::from_size_val([1, 1].into(), Rgb8::new(255, 255, 255));
        assert_eq!(Grayscale.color_at(&src, 0, 0), Rgb8::new(254, 254, 254));
    }

    #[test]
    fn sepia_reference_pixel() {
        // luma(200, 200, 200) = 200, then (+40, +10, -20)
        let src = Raster::from_size_val([1, 1].into(), Rgb8::new(200, 200, 200));
        assert_eq!(Sepia.color_at(&src, 0, 0), Rgb8::new(240, 210, 180));
    }

    #[test]
    fn sepia_clamps_the_red_shift() {
        let src = Raster::from_size_val([1, 1].into(), Rgb8::new(255, 255, 255));
        let px = Sepia.color_at(&src, 0, 0);
        // luma 254: red and green saturate at 255, blue stays in range
        assert_eq!(px, Rgb8::new(255, 255, 234));
    }

    #[test]
    fn brighten_saturates_at_ceiling() {
        let src = Raster::from_size_val([1, 1].into(), Rgb8::new(230, 215, 100));
        let once = Brighten.color_at(&src, 0, 0);
        assert_eq!(once, Rgb8::new(255, 255, 140));

        // once c + 80 >= 255, a second application stays pinned at 255
        let tmp = Raster::from_size_val([1, 1].into(), once);
        let twice = Brighten.color_at(&tmp, 0, 0);
        assert_eq!(twice, Rgb8::new(255, 255, 180));
    }

    /// Channel-wise distance, for flat-image checks where the final
    /// truncation may drop one unit below the exact value.
    fn max_channel_diff(a: Rgb8, b: Rgb8) -> i32 {
        a.channels()
            .iter()
            .zip(b.channels().iter())
            .map(|(&x, &y)| (x as i32 - y as i32).abs())
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn unit_mass_kernels_preserve_flat_images() -> Result<(), Box<dyn std::error::Error>> {
        let color = Rgb8::new(90, 120, 33);
        let flat = Raster::from_size_val([4, 3].into(), color);

        let filters = [
            Convolution::new(kernels::box_blur_kernel(3)?),
            Convolution::new(kernels::gaussian_kernel(3, 2.0)?),
            Convolution::new(kernels::sharpen_kernel()?),
            Convolution::new(kernels::motion_blur_kernel(5)?),
        ];

        for filter in &filters {
            for y in 0..3 {
                for x in 0..4 {
                    let out = filter.color_at(&flat, x, y);
                    assert!(
                        max_channel_diff(out, color) <= 1,
                        "flat color drifted: {out:?}"
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn emboss_maps_flat_to_bias_gray() -> Result<(), Box<dyn std::error::Error>> {
        let flat = Raster::from_size_val([3, 3].into(), Rgb8::new(17, 200, 90));
        let emboss = Convolution::with_bias(kernels::emboss_kernel()?, kernels::EMBOSS_BIAS);
        // the relief kernel has mass 0, so only the bias remains
        assert_eq!(emboss.color_at(&flat, 1, 1), Rgb8::new(100, 100, 100));
        Ok(())
    }

    #[test]
    fn border_collapses_to_single_pixel() -> Result<(), Box<dyn std::error::Error>> {
        // on a 1x1 image every clamped neighbor offset reads (0, 0)
        let color = Rgb8::new(10, 20, 30);
        let tiny = Raster::from_size_val([1, 1].into(), color);

        let unit_mass = [
            Convolution::new(kernels::box_blur_kernel(3)?),
            Convolution::new(kernels::gaussian_kernel(3, 2.0)?),
            Convolution::new(kernels::sharpen_kernel()?),
            Convolution::new(kernels::motion_blur_kernel(5)?),
        ];
        for filter in &unit_mass {
            let out = filter.color_at(&tiny, 0, 0);
            assert!(max_channel_diff(out, color) <= 1, "1x1 drifted: {out:?}");
        }

        // gradient kernels see a uniform window and cancel to zero
        let sobel = Convolution::new(kernels::sobel_kernel_x()?);
        assert_eq!(sobel.color_at(&tiny, 0, 0), Rgb8::new(0, 0, 0));
        Ok(())
    }

    #[test]
    fn sobel_detects_a_vertical_edge() -> Result<(), Box<dyn std::error::Error>> {
        // left half dark, right half bright
        let src = Raster::new(
            ImageSize {
                width: 4,
                height: 3,
            },
            (0..12)
                .map(|i| {
                    if i % 4 < 2 {
                        Rgb8::new(0, 0, 0)
                    } else {
                        Rgb8::new(200, 200, 200)
                    }
                })
                .collect(),
        )?;

        let sobel_x = Convolution::new(kernels::sobel_kernel_x()?);
        let sobel_y = Convolution::new(kernels::sobel_kernel_y()?);

        // the column left of the edge sees the full positive gradient
        let on_edge = sobel_x.color_at(&src, 1, 1);
        assert_eq!(on_edge, Rgb8::new(255, 255, 255));

        // no horizontal edge anywhere, rows are identical
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(sobel_y.color_at(&src, x, y), Rgb8::new(0, 0, 0));
            }
        }
        Ok(())
    }
}
