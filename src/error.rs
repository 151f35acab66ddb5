//! Error type shared by every filter entry point.
//!
//! Kernels never fail on their own. Errors come from the host-side checks
//! done before a filter runs: buffer shapes, filter parameters and thread
//! pool setup.

/// An error type for the filter module.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    /// The image does not have the 4 RGBA channels the kernels expect.
    #[error("expected an RGBA image with 4 channels, got {0}")]
    UnsupportedChannels(usize),

    /// Input and output buffers do not have identical dimensions.
    #[error("output shape {output:?} does not match input shape {input:?}")]
    DimensionMismatch {
        /// Shape of the input image as (height, width, channels).
        input: (usize, usize, usize),
        /// Shape of the output image as (height, width, channels).
        output: (usize, usize, usize),
    },

    /// A flat buffer could not be reshaped into an image.
    #[error("Invalid shape")]
    InvalidShape(#[from] ndarray::ShapeError),

    /// The water color window must cover at least the center pixel.
    #[error("window size must be > 0, got {0}")]
    InvalidWindowSize(usize),

    /// Blur radius outside of (0, 25].
    #[error("blur radius must be in (0, 25], got {0}")]
    InvalidBlurRadius(f32),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The local thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),

    /// A filter name that does not match any known filter.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}
