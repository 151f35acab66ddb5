//! WebAssembly exports for the filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Every function
//! takes a flat RGBA byte buffer (length = width * height * 4) and returns a
//! new buffer of the same length.

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::error::FilterError;
use crate::filters::blur::blur_rgba_u8;
use crate::filters::grayscale::grayscale_rgba_u8;
use crate::filters::watercolor::water_color_rgba_u8;

fn to_js_err(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_image(data: &[u8], width: usize, height: usize) -> Result<Array3<u8>, JsValue> {
    Array3::from_shape_vec((height, width, 4), data.to_vec())
        .map_err(|e| to_js_err(FilterError::from(e)))
}

// ============================================================================
// Grayscale Filter
// ============================================================================

/// Convert RGBA u8 image to grayscale, (r + g + b) / 3 per pixel.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
#[wasm_bindgen]
pub fn grayscale_rgba_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = to_image(data, width, height)?;
    let result = grayscale_rgba_u8(input.view()).map_err(to_js_err)?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Water Color Effect
// ============================================================================

/// Apply the water color effect.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `window_size` - Side length of the smoothing window (15 for the classic effect)
#[wasm_bindgen]
pub fn water_color_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    window_size: usize,
) -> Result<Vec<u8>, JsValue> {
    let input = to_image(data, width, height)?;
    let result = water_color_rgba_u8(input.view(), window_size).map_err(to_js_err)?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Blur
// ============================================================================

/// Gaussian blur of all four channels, radius in (0, 25].
#[wasm_bindgen]
pub fn blur_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    radius: f32,
) -> Result<Vec<u8>, JsValue> {
    let input = to_image(data, width, height)?;
    let result = blur_rgba_u8(input.view(), radius).map_err(to_js_err)?;
    Ok(result.into_raw_vec_and_offset().0)
}
