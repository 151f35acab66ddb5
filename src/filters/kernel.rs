//! Elementwise kernel execution.
//!
//! A [`PixelKernel`] computes one output pixel from the immutable input image
//! and a coordinate. [`run_filter`] is the host side: it checks the buffers and
//! maps the kernel over every output coordinate with the chosen
//! [`ExecutionStrategy`]. Output rows are disjoint, so any strategy yields the
//! same image.

use ndarray::{Array3, ArrayView3, ArrayViewMut2, ArrayViewMut3, Axis};
use rayon::prelude::*;

use super::pixel::Rgba;
use crate::error::FilterError;

/// Per-pixel transform invoked once for every output coordinate.
pub trait PixelKernel: Sync {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Compute the output pixel at column `x`, row `y`.
    ///
    /// `input` is an RGBA image and `(x, y)` is always in bounds.
    fn compute(&self, input: &ArrayView3<'_, u8>, x: usize, y: usize) -> Rgba;
}

/// Controls how a filter is mapped over the output image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool, one task per output row.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images and debugging.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call.
    Fixed(usize),
}

/// Check that `shape` describes an RGBA image.
pub(crate) fn ensure_rgba(shape: (usize, usize, usize)) -> Result<(), FilterError> {
    match shape.2 {
        4 => Ok(()),
        channels => Err(FilterError::UnsupportedChannels(channels)),
    }
}

/// Check that `input` is RGBA and `output` has the same dimensions.
pub(crate) fn ensure_same_shape(
    input: (usize, usize, usize),
    output: (usize, usize, usize),
) -> Result<(), FilterError> {
    ensure_rgba(input)?;
    if input != output {
        return Err(FilterError::DimensionMismatch { input, output });
    }
    Ok(())
}

/// Call `f(y, row)` for every row of `output` following `strategy`.
pub(crate) fn for_each_row<T, F>(
    output: ArrayViewMut3<'_, T>,
    strategy: ExecutionStrategy,
    f: F,
) -> Result<(), FilterError>
where
    T: Send + Sync,
    F: Fn(usize, ArrayViewMut2<'_, T>) + Send + Sync,
{
    match strategy {
        ExecutionStrategy::Serial => {
            let mut output = output;
            for (y, row) in output.axis_iter_mut(Axis(0)).enumerate() {
                f(y, row);
            }
        }
        ExecutionStrategy::ParallelRows => par_rows(output, &f),
        ExecutionStrategy::Fixed(0) => return Err(FilterError::InvalidThreadCount(0)),
        ExecutionStrategy::Fixed(num_threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| FilterError::ThreadPool(e.to_string()))?;
            pool.install(|| par_rows(output, &f));
        }
    }

    Ok(())
}

fn par_rows<T, F>(mut output: ArrayViewMut3<'_, T>, f: &F)
where
    T: Send + Sync,
    F: Fn(usize, ArrayViewMut2<'_, T>) + Sync,
{
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Apply `kernel` to every coordinate of `output`.
///
/// Returns only after all pixels are written. `input` must be an RGBA image
/// and `output` a distinct buffer with the same dimensions.
///
/// # Arguments
/// * `kernel` - The per-pixel transform
/// * `input` - Source image of shape (height, width, 4)
/// * `output` - Destination image of the same shape
/// * `strategy` - How rows are scheduled
pub fn run_filter<K>(
    kernel: &K,
    input: ArrayView3<'_, u8>,
    output: ArrayViewMut3<'_, u8>,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError>
where
    K: PixelKernel + ?Sized,
{
    ensure_same_shape(input.dim(), output.dim())?;

    let (height, width, _) = input.dim();
    log::debug!(
        "Processing image with dimensions {width}x{height} for {}",
        kernel.name()
    );

    for_each_row(output, strategy, |y, mut row| {
        for x in 0..width {
            kernel.compute(&input, x, y).store(row.row_mut(x));
        }
    })
}

/// Allocate an output buffer and run `kernel` over it.
pub fn apply_filter<K>(
    kernel: &K,
    input: ArrayView3<'_, u8>,
    strategy: ExecutionStrategy,
) -> Result<Array3<u8>, FilterError>
where
    K: PixelKernel + ?Sized,
{
    ensure_rgba(input.dim())?;
    let mut output = Array3::<u8>::zeros(input.dim());
    run_filter(kernel, input, output.view_mut(), strategy)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes the coordinate into the pixel so placement can be checked.
    struct CoordKernel;

    impl PixelKernel for CoordKernel {
        fn name(&self) -> &'static str {
            "coord"
        }

        fn compute(&self, input: &ArrayView3<'_, u8>, x: usize, y: usize) -> Rgba {
            let a = input[[y, x, 3]];
            Rgba::new(x as u8, y as u8, 7, a)
        }
    }

    fn strategies() -> [ExecutionStrategy; 3] {
        [
            ExecutionStrategy::Serial,
            ExecutionStrategy::ParallelRows,
            ExecutionStrategy::Fixed(2),
        ]
    }

    #[test]
    fn test_every_coordinate_written() {
        let mut input = Array3::<u8>::zeros((5, 9, 4));
        input[[4, 8, 3]] = 42;

        for strategy in strategies() {
            let out = apply_filter(&CoordKernel, input.view(), strategy).unwrap();
            for y in 0..5 {
                for x in 0..9 {
                    assert_eq!(out[[y, x, 0]], x as u8);
                    assert_eq!(out[[y, x, 1]], y as u8);
                    assert_eq!(out[[y, x, 2]], 7);
                }
            }
            assert_eq!(out[[4, 8, 3]], 42);
        }
    }

    #[test]
    fn test_rejects_non_rgba() {
        let input = Array3::<u8>::zeros((2, 2, 3));
        let err = apply_filter(&CoordKernel, input.view(), ExecutionStrategy::Serial);
        assert!(matches!(err, Err(FilterError::UnsupportedChannels(3))));
    }

    #[test]
    fn test_rejects_mismatched_output() {
        let input = Array3::<u8>::zeros((2, 3, 4));
        let mut output = Array3::<u8>::zeros((3, 2, 4));
        let err = run_filter(
            &CoordKernel,
            input.view(),
            output.view_mut(),
            ExecutionStrategy::Serial,
        );
        assert!(matches!(
            err,
            Err(FilterError::DimensionMismatch {
                input: (2, 3, 4),
                output: (3, 2, 4)
            })
        ));
    }

    #[test]
    fn test_zero_threads_rejected() {
        let input = Array3::<u8>::zeros((1, 1, 4));
        let err = apply_filter(&CoordKernel, input.view(), ExecutionStrategy::Fixed(0));
        assert!(matches!(err, Err(FilterError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_empty_image() {
        let input = Array3::<u8>::zeros((0, 0, 4));
        let out = apply_filter(&CoordKernel, input.view(), ExecutionStrategy::default()).unwrap();
        assert_eq!(out.dim(), (0, 0, 4));
    }
}
