//! Grayscale conversion filter.
//!
//! Each output pixel depends only on the input pixel at the same coordinate:
//! `gray = floor((r + g + b) / 3)` written to all three color channels, alpha
//! copied unchanged. Plain integer averaging, no luminosity weights.

use ndarray::{Array3, ArrayView3};

use super::kernel::{apply_filter, ExecutionStrategy, PixelKernel};
use super::pixel::Rgba;
use crate::error::FilterError;

/// Elementwise RGB-average grayscale kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrayscaleFilter;

impl PixelKernel for GrayscaleFilter {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    #[inline]
    fn compute(&self, input: &ArrayView3<'_, u8>, x: usize, y: usize) -> Rgba {
        Rgba::at(input, x, y).gray()
    }
}

/// Convert an RGBA u8 image to grayscale.
///
/// Output is RGBA with R=G=B=intensity, A preserved.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4) with RGBA u8 values (0-255)
///
/// # Returns
/// New array with grayscale values in RGB channels, alpha preserved
pub fn grayscale_rgba_u8(input: ArrayView3<u8>) -> Result<Array3<u8>, FilterError> {
    apply_filter(&GrayscaleFilter, input, ExecutionStrategy::default())
}
