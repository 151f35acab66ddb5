//! Pixel and intensity primitives shared by the kernels.
//!
//! Images are `(height, width, 4)` RGBA u8 arrays. Coordinates are given as
//! `(x, y)` where `x` is the column and `y` the row, so a pixel lives at
//! `image[[y, x, c]]`.

use ndarray::{ArrayView3, ArrayViewMut1};

/// Number of distinct intensity values for 8-bit channels.
pub const INTENSITY_LEVELS: usize = 256;

/// A single RGBA pixel with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Read the pixel at column `x`, row `y`.
    ///
    /// The caller guarantees the coordinate is in bounds and the image has
    /// at least 4 channels.
    #[inline]
    pub fn at(image: &ArrayView3<'_, u8>, x: usize, y: usize) -> Self {
        Self {
            r: image[[y, x, 0]],
            g: image[[y, x, 1]],
            b: image[[y, x, 2]],
            a: image[[y, x, 3]],
        }
    }

    /// Truncated average of the color channels, `floor((r + g + b) / 3)`.
    #[inline]
    pub fn intensity(&self) -> u8 {
        // max sum is 765, so the quotient always fits in u8
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }

    /// `(i, i, i, a)` where `i` is the intensity.
    #[inline]
    pub fn gray(&self) -> Self {
        let i = self.intensity();
        Self::new(i, i, i, self.a)
    }

    #[inline]
    pub(crate) fn store(self, mut dst: ArrayViewMut1<'_, u8>) {
        dst[0] = self.r;
        dst[1] = self.g;
        dst[2] = self.b;
        dst[3] = self.a;
    }
}

/// Dense per-intensity counter with a running mode.
///
/// The mode only moves when a bucket count strictly exceeds the current
/// maximum, so among equally frequent intensities the one that reached that
/// count first wins.
#[derive(Debug, Clone)]
pub struct IntensityHistogram {
    counts: [u32; INTENSITY_LEVELS],
    mode: u8,
    mode_count: u32,
}

impl Default for IntensityHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl IntensityHistogram {
    pub fn new() -> Self {
        Self {
            counts: [0; INTENSITY_LEVELS],
            mode: 0,
            mode_count: 0,
        }
    }

    /// Count one more sample of `intensity`.
    #[inline]
    pub fn record(&mut self, intensity: u8) {
        let count = &mut self.counts[intensity as usize];
        *count += 1;
        if self.mode_count < *count {
            self.mode_count = *count;
            self.mode = intensity;
        }
    }

    /// Number of samples recorded for `intensity`.
    pub fn count(&self, intensity: u8) -> u32 {
        self.counts[intensity as usize]
    }

    /// The current mode as `(intensity, count)`. The count is 0 while empty.
    pub fn mode(&self) -> (u8, u32) {
        (self.mode, self.mode_count)
    }

    /// Total number of recorded samples.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_intensity_truncates() {
        assert_eq!(Rgba::new(1, 1, 2, 0).intensity(), 1);
        assert_eq!(Rgba::new(2, 2, 1, 0).intensity(), 1);
        assert_eq!(Rgba::new(255, 255, 255, 0).intensity(), 255);
        assert_eq!(Rgba::new(255, 255, 254, 0).intensity(), 254);
        assert_eq!(Rgba::new(0, 0, 0, 0).intensity(), 0);
    }

    #[test]
    fn test_gray_keeps_alpha() {
        let px = Rgba::new(200, 100, 50, 77).gray();
        assert_eq!(px, Rgba::new(116, 116, 116, 77));
    }

    #[test]
    fn test_at_reads_column_then_row() {
        let mut img = Array3::<u8>::zeros((2, 3, 4));
        img[[1, 2, 0]] = 9;
        img[[1, 2, 3]] = 255;

        let px = Rgba::at(&img.view(), 2, 1);
        assert_eq!(px, Rgba::new(9, 0, 0, 255));
    }

    #[test]
    fn test_histogram_empty() {
        let hist = IntensityHistogram::new();
        assert_eq!(hist.mode().1, 0);
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_histogram_tie_keeps_first() {
        let mut hist = IntensityHistogram::new();
        hist.record(10);
        hist.record(20);
        assert_eq!(hist.mode(), (10, 1));

        hist.record(20);
        assert_eq!(hist.mode(), (20, 2));

        // 10 catches up but does not overtake
        hist.record(10);
        assert_eq!(hist.mode(), (20, 2));
        assert_eq!(hist.count(10), 2);
        assert_eq!(hist.total(), 4);
    }
}
