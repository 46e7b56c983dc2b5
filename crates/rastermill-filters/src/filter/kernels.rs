use super::kernel::{Kernel, KernelError};

/// Default side length for the box blur kernel.
pub const DEFAULT_BOX_BLUR_SIZE: usize = 3;

/// Default radius for the gaussian kernel.
pub const DEFAULT_GAUSSIAN_RADIUS: usize = 3;

/// Default sigma for the gaussian kernel.
pub const DEFAULT_GAUSSIAN_SIGMA: f32 = 2.0;

/// Default side length for the motion blur kernel.
pub const DEFAULT_MOTION_BLUR_SIZE: usize = 5;

/// Per-channel offset the emboss filter adds after convolution, before
/// clamping.
pub const EMBOSS_BIAS: f32 = 100.0;

/// Create a box blur kernel.
///
/// Every weight is `1 / size^2`, so the kernel computes an unweighted
/// local average and its mass is 1.
///
/// # Arguments
///
/// * `size` - The side length of the kernel, odd.
pub fn box_blur_kernel(size: usize) -> Result<Kernel, KernelError> {
    let weight = 1.0 / (size * size) as f32;
    Kernel::new(size, size, vec![weight; size * size])
}

/// Create a gaussian blur kernel.
///
/// The weight at offset `(i, j)` is `exp(-(i^2 + j^2) / sigma^2)`; the
/// kernel is then normalized so the weights sum to 1.
///
/// # Arguments
///
/// * `radius` - The kernel radius; the side length is `2 * radius + 1`.
/// * `sigma` - The spread of the gaussian, must be positive.
pub fn gaussian_kernel(radius: usize, sigma: f32) -> Result<Kernel, KernelError> {
    if sigma <= 0.0 {
        return Err(KernelError::InvalidSigma(sigma));
    }

    let size = 2 * radius + 1;
    let sigma_sq = sigma * sigma;
    let mut weights = Vec::with_capacity(size * size);

    // compute the kernel
    for j in -(radius as isize)..=(radius as isize) {
        for i in -(radius as isize)..=(radius as isize) {
            let dist_sq = (i * i + j * j) as f32;
            weights.push((-dist_sq / sigma_sq).exp());
        }
    }

    // normalize the kernel
    let norm = weights.iter().sum::<f32>();
    weights.iter_mut().for_each(|w| *w /= norm);

    Kernel::new(size, size, weights)
}

/// The fixed 3x3 Sobel operator for horizontal gradients.
///
/// Unnormalized; its mass is 0.
pub fn sobel_kernel_x() -> Result<Kernel, KernelError> {
    Kernel::from_rows([
        [-1.0, 0.0, 1.0],
        [-2.0, 0.0, 2.0],
        [-1.0, 0.0, 1.0],
    ])
}

/// The fixed 3x3 Sobel operator for vertical gradients.
///
/// Unnormalized; its mass is 0.
pub fn sobel_kernel_y() -> Result<Kernel, KernelError> {
    Kernel::from_rows([
        [-1.0, -2.0, -1.0],
        [0.0, 0.0, 0.0],
        [1.0, 2.0, 1.0],
    ])
}

/// The fixed 3x3 Laplacian-style sharpening kernel.
///
/// Center weight 5, orthogonal neighbors -1, corners 0; mass 1, so flat
/// regions pass through unchanged.
pub fn sharpen_kernel() -> Result<Kernel, KernelError> {
    Kernel::from_rows([
        [0.0, -1.0, 0.0],
        [-1.0, 5.0, -1.0],
        [0.0, -1.0, 0.0],
    ])
}

/// The fixed 3x3 relief kernel used by the emboss filter.
///
/// Mass 0; the emboss filter adds [`EMBOSS_BIAS`] per channel after
/// convolution so flat regions land on mid-gray.
pub fn emboss_kernel() -> Result<Kernel, KernelError> {
    Kernel::from_rows([
        [0.0, 1.0, 0.0],
        [1.0, 0.0, -1.0],
        [0.0, -1.0, 0.0],
    ])
}

/// Create a motion blur kernel.
///
/// `1 / size` on the main diagonal and 0 elsewhere, approximating a
/// diagonal directional blur; mass 1.
///
/// # Arguments
///
/// * `size` - The side length of the kernel, odd.
pub fn motion_blur_kernel(size: usize) -> Result<Kernel, KernelError> {
    let mut weights = vec![0.0; size * size];
    let weight = 1.0 / size as f32;
    for i in 0..size {
        weights[i * size + i] = weight;
    }
    Kernel::new(size, size, weights)
}
