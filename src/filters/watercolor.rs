//! Water color effect: windowed mode-intensity smoothing.
//!
//! For every output pixel a square window around it is scanned twice. The
//! first pass builds an intensity histogram and picks the most frequent
//! intensity. The second pass averages the RGB values of the window pixels
//! that have exactly that intensity. Alpha is copied from the center pixel.
//!
//! ## Window
//!
//! Offsets run from `-(window_size / 2)` to `window_size / 2` with truncating
//! division, `[-7, 7]` for the default size of 15. Offsets falling outside the
//! image are skipped, so the window shrinks near the borders instead of
//! wrapping or padding.
//!
//! ## Tie-break
//!
//! Samples are visited with the column offset in the outer loop and the row
//! offset in the inner loop. The mode only changes when a count strictly
//! exceeds the best so far, so among intensities with the same final count
//! the one that reached it first in scan order wins.

use ndarray::{Array3, ArrayView3};

use super::kernel::{apply_filter, ExecutionStrategy, PixelKernel};
use super::pixel::{IntensityHistogram, Rgba};
use crate::error::FilterError;

/// Default window side length.
pub const DEFAULT_WINDOW_SIZE: usize = 15;

/// Mode-intensity smoothing kernel.
#[derive(Debug, Clone, Copy)]
pub struct WaterColorFilter {
    window_size: usize,
}

impl Default for WaterColorFilter {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl WaterColorFilter {
    /// Create a filter with a `window_size` x `window_size` neighborhood.
    ///
    /// An even size spans `window_size + 1` pixels per axis, since the
    /// offsets are symmetric around the center.
    pub fn new(window_size: usize) -> Result<Self, FilterError> {
        if window_size == 0 {
            return Err(FilterError::InvalidWindowSize(window_size));
        }
        Ok(Self { window_size })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Largest offset from the center along either axis.
    #[inline]
    pub fn reach(&self) -> isize {
        (self.window_size / 2) as isize
    }

    /// In-bounds window coordinates around `(x, y)` in scan order.
    ///
    /// Outer loop over the column offset, inner loop over the row offset.
    pub fn window(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (usize, usize)> {
        let reach = self.reach();
        let (x, y) = (x as isize, y as isize);
        let (width, height) = (width as isize, height as isize);

        (-reach..=reach).flat_map(move |dx| {
            (-reach..=reach).filter_map(move |dy| {
                let calc_x = x + dx;
                let calc_y = y + dy;
                let inside = (0..width).contains(&calc_x) && (0..height).contains(&calc_y);
                inside.then_some((calc_x as usize, calc_y as usize))
            })
        })
    }

    /// Histogram of the window around `(x, y)`.
    pub fn histogram(&self, input: &ArrayView3<'_, u8>, x: usize, y: usize) -> IntensityHistogram {
        let (height, width, _) = input.dim();
        let mut histogram = IntensityHistogram::new();
        for (sx, sy) in self.window(x, y, width, height) {
            histogram.record(Rgba::at(input, sx, sy).intensity());
        }
        histogram
    }
}

impl PixelKernel for WaterColorFilter {
    fn name(&self) -> &'static str {
        "water color effect"
    }

    fn compute(&self, input: &ArrayView3<'_, u8>, x: usize, y: usize) -> Rgba {
        let (height, width, _) = input.dim();
        let (mode, mode_count) = self.histogram(input, x, y).mode();

        let mut totals = [0u32; 3];
        for (sx, sy) in self.window(x, y, width, height) {
            let px = Rgba::at(input, sx, sy);
            if px.intensity() == mode {
                totals[0] += px.r as u32;
                totals[1] += px.g as u32;
                totals[2] += px.b as u32;
            }
        }

        // the center pixel is always sampled, so mode_count >= 1
        Rgba::new(
            (totals[0] / mode_count) as u8,
            (totals[1] / mode_count) as u8,
            (totals[2] / mode_count) as u8,
            input[[y, x, 3]],
        )
    }
}

/// Apply the water color effect to an RGBA u8 image.
///
/// # Arguments
/// * `input` - Image of shape (height, width, 4)
/// * `window_size` - Side length of the smoothing window (15 in the classic effect)
///
/// # Returns
/// Smoothed image with the same dimensions, alpha preserved
pub fn water_color_rgba_u8(
    input: ArrayView3<u8>,
    window_size: usize,
) -> Result<Array3<u8>, FilterError> {
    let filter = WaterColorFilter::new(window_size)?;
    apply_filter(&filter, input, ExecutionStrategy::default())
}
