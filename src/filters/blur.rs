//! Gaussian blur for RGBA images.
//!
//! Separable two-pass convolution (vertical, then horizontal) in f32. All four
//! channels are blurred, alpha included. Samples beyond the border clamp to
//! the nearest edge pixel.
//!
//! The radius follows the classic intrinsic blur: `(0, 25]`, with
//! `sigma = 0.4 * radius + 0.6` and a kernel reaching `ceil(radius)` pixels to
//! each side.

use ndarray::{Array3, ArrayView3};

use super::kernel::{ensure_rgba, for_each_row, ExecutionStrategy};
use crate::error::FilterError;

/// Largest supported blur radius.
pub const MAX_BLUR_RADIUS: f32 = 25.0;

#[derive(Debug, Clone, Copy)]
pub struct BlurFilter {
    radius: f32,
}

impl Default for BlurFilter {
    fn default() -> Self {
        Self {
            radius: MAX_BLUR_RADIUS,
        }
    }
}

impl BlurFilter {
    pub fn new(radius: f32) -> Result<Self, FilterError> {
        if !(radius > 0.0 && radius <= MAX_BLUR_RADIUS) {
            return Err(FilterError::InvalidBlurRadius(radius));
        }
        Ok(Self { radius })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn sigma(&self) -> f32 {
        0.4 * self.radius + 0.6
    }

    /// Number of pixels the kernel reaches to each side of the center.
    pub fn reach(&self) -> usize {
        self.radius.ceil() as usize
    }

    /// Normalized 1D Gaussian weights, `2 * reach + 1` entries.
    pub fn weights(&self) -> Vec<f32> {
        let sigma = self.sigma();
        let reach = self.reach() as isize;

        let mut kernel: Vec<f32> = (-reach..=reach)
            .map(|d| {
                let d = d as f32;
                (-d * d / (2.0 * sigma * sigma)).exp()
            })
            .collect();

        // Normalize
        let sum: f32 = kernel.iter().sum();
        for v in kernel.iter_mut() {
            *v /= sum;
        }

        kernel
    }

    /// Blur `input` into a new image.
    ///
    /// # Arguments
    /// * `input` - RGBA image (height, width, 4) as u8
    /// * `strategy` - How rows are scheduled in both passes
    pub fn apply(
        &self,
        input: ArrayView3<u8>,
        strategy: ExecutionStrategy,
    ) -> Result<Array3<u8>, FilterError> {
        ensure_rgba(input.dim())?;
        let (height, width, channels) = input.dim();
        log::debug!(
            "Processing image with dimensions {width}x{height} for blur, radius {}",
            self.radius
        );

        let kernel = self.weights();
        let half = (kernel.len() / 2) as isize;

        // Vertical pass
        let mut temp = Array3::<f32>::zeros((height, width, channels));
        for_each_row(temp.view_mut(), strategy, |y, mut row| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sy = (y as isize + ki as isize - half)
                            .clamp(0, height as isize - 1) as usize;
                        sum += input[[sy, x, c]] as f32 * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        })?;

        // Horizontal pass
        let temp = temp.view();
        let mut output = Array3::<u8>::zeros((height, width, channels));
        for_each_row(output.view_mut(), strategy, |y, mut row| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sx = (x as isize + ki as isize - half)
                            .clamp(0, width as isize - 1) as usize;
                        sum += temp[[y, sx, c]] * kv;
                    }
                    row[[x, c]] = sum.round().clamp(0.0, 255.0) as u8;
                }
            }
        })?;

        Ok(output)
    }
}

/// Blur an RGBA u8 image with the given radius.
pub fn blur_rgba_u8(input: ArrayView3<u8>, radius: f32) -> Result<Array3<u8>, FilterError> {
    BlurFilter::new(radius)?.apply(input, ExecutionStrategy::default())
}
