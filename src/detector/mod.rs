//! QR code structure detection
//!
//! Finder pattern search on an already rectified module grid. Locating a
//! symbol in a photograph is out of scope; the raster tools only handle
//! clean, axis-aligned renders.

/// Finder pattern detection by 7x7 template matching
pub mod finder;
