//! Image processing helpers for the raster tools
//!
//! - Binarization (Otsu's method)

pub mod binarization;
