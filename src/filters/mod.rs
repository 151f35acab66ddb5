//! Filter modules.
//!
//! ## Supported Format
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | RGBA8 | (H, W, 4) | u8 | Red, green, blue, alpha, 0-255 |
//!
//! ## Architecture
//!
//! - **Per-pixel kernels** - [`grayscale`] and [`watercolor`] implement
//!   [`kernel::PixelKernel`], a pure function of the input image and a
//!   coordinate
//! - **Host mapping** - [`kernel::run_filter`] maps a kernel over every output
//!   coordinate, serially or with rayon
//! - **Distinct buffers** - filters never write into their input
//! - **Alpha preservation** - grayscale and water color copy alpha from the
//!   center pixel; blur smooths it along with RGB

pub mod pixel;
pub mod kernel;
pub mod grayscale;
pub mod watercolor;
pub mod blur;
pub mod chain;
