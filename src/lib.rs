//! rust_qr_codec - QR code symbol encoder and decoder
//!
//! Encodes short text into QR Code Model 2 symbols (versions 1-3, error
//! correction level M) and decodes rectified module grids back to text.
//!
//! ```
//! let code = rust_qr_codec::encode("HELLO WORLD").unwrap();
//! let decoded = rust_qr_codec::decode(&code.modules).unwrap();
//! assert_eq!(decoded.content, "HELLO WORLD");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Symbolic codec (GF(256), Reed-Solomon, layout, masking, data modes, format info)
#[allow(missing_docs)]
pub mod codec;
/// Encoder and renderer settings
#[allow(missing_docs)]
pub mod config;
/// Finder pattern checks on module grids
#[allow(missing_docs)]
pub mod detector;
/// Error types
#[allow(missing_docs)]
pub mod error;
/// Core data structures (QRCode, Matrix, Version, etc.)
pub mod models;
/// Image rendering and sampling
pub mod tools;
/// Image processing helpers
#[allow(missing_docs)]
pub mod utils;

pub use codec::Codec;
pub use config::{EncodeOptions, RenderOptions};
pub use error::{QrError, QrResult};
pub use models::{DataMode, ECLevel, MaskPattern, Matrix, Module, QRCode, Version};

/// Encode `text` with automatic mode, version and mask selection
pub fn encode(text: &str) -> QrResult<QRCode> {
    Codec::shared().encoder().encode(text)
}

/// Encode `text` honouring any forced version, mode or mask
pub fn encode_with(text: &str, options: EncodeOptions) -> QrResult<QRCode> {
    Codec::shared().encoder_with(options).encode(text)
}

/// Decode a rectified module matrix
pub fn decode(matrix: &Matrix) -> QrResult<QRCode> {
    Codec::shared().decoder().decode(matrix)
}

/// Decode a sampled grid where `true` is a light module
pub fn decode_light_grid(grid: &[Vec<bool>]) -> QrResult<QRCode> {
    Codec::shared().decoder().decode_light_grid(grid)
}

/// Whether the matrix has finder patterns at exactly the three expected corners
pub fn is_qr_code(matrix: &Matrix) -> bool {
    detector::finder::is_qr_code(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_round_trip() {
        let code = encode("0123456789").unwrap();
        assert_eq!(code.mode, DataMode::Numeric);
        assert!(is_qr_code(&code.modules));
        assert_eq!(decode(&code.modules).unwrap().content, "0123456789");
    }

    #[test]
    fn test_encode_with_options() {
        let options = EncodeOptions::new().with_mask(MaskPattern::Pattern0);
        let code = encode_with("masked", options).unwrap();
        assert_eq!(code.mask_pattern, MaskPattern::Pattern0);
        let grid = code.modules.to_light_grid().unwrap();
        assert_eq!(decode_light_grid(&grid).unwrap().content, "masked");
    }
}
