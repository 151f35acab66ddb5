//! Deterministic per-pixel image filters.
//!
//! Grayscale, water color (windowed mode-intensity smoothing) and Gaussian
//! blur over RGBA u8 images, with optional Python bindings via PyO3 and WASM
//! bindings for JavaScript.
//!
//! ## Image Format
//! Images are `(height, width, 4)` RGBA arrays of `u8`. Coordinates are
//! `(x, y)` with `x` the column and `y` the row.
//!
//! ## Example
//! ```
//! use ndarray::Array3;
//! use pixelkernels::filters::watercolor::water_color_rgba_u8;
//!
//! let image = Array3::<u8>::from_elem((8, 8, 4), 200);
//! let smoothed = water_color_rgba_u8(image.view(), 15).unwrap();
//! assert_eq!(smoothed, image);
//! ```

pub mod config;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::FilterConfig;
pub use error::FilterError;
pub use filters::chain::{FilterChain, FilterKind};
pub use filters::kernel::{apply_filter, run_filter, ExecutionStrategy, PixelKernel};
pub use filters::pixel::{IntensityHistogram, Rgba};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::FilterConfig;
    use crate::error::FilterError;
    use crate::filters::blur::blur_rgba_u8;
    use crate::filters::chain::FilterChain;
    use crate::filters::grayscale::grayscale_rgba_u8;
    use crate::filters::watercolor::water_color_rgba_u8;

    fn to_py_err(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Per-pixel Filters
    // ========================================================================

    /// Convert an RGBA u8 image to grayscale, (r + g + b) / 3 per pixel.
    ///
    /// Output is RGBA with R=G=B=intensity, alpha preserved.
    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = grayscale_rgba_u8(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Apply the water color effect to an RGBA u8 image.
    ///
    /// # Arguments
    /// * `image` - Input image (height, width, 4)
    /// * `window_size` - Side length of the smoothing window (default: 15)
    #[pyfunction]
    #[pyo3(signature = (image, window_size=15))]
    pub fn water_color<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        window_size: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = water_color_rgba_u8(image.as_array(), window_size).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Gaussian blur of all four channels, radius in (0, 25].
    #[pyfunction]
    #[pyo3(signature = (image, radius=25.0))]
    pub fn blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = blur_rgba_u8(image.as_array(), radius).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Chained Filters
    // ========================================================================

    /// Run the selected filters in order: water color, grayscale, blur.
    #[pyfunction]
    #[pyo3(signature = (image, water_color=false, grayscale=false, blur=false, window_size=15, blur_radius=25.0))]
    pub fn apply_filters<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        water_color: bool,
        grayscale: bool,
        blur: bool,
        window_size: usize,
        blur_radius: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let config = FilterConfig::default()
            .with_water_color(water_color)
            .with_grayscale(grayscale)
            .with_blur(blur)
            .with_window_size(window_size)
            .with_blur_radius(blur_radius);
        let chain = FilterChain::from_config(&config).map_err(to_py_err)?;
        let result = chain.run(image.as_array()).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// pixelkernels extension module
    #[pymodule]
    pub fn pixelkernels(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(water_color, m)?)?;
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(apply_filters, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::pixelkernels;
