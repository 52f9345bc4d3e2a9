//! Symbolic QR codec for versions 1-3 at error-correction level M
//!
//! Encode: data segment -> Reed-Solomon -> zig-zag placement -> best mask
//! and format information. Decode runs the same stages in reverse on an
//! already rectified module grid.

/// Bit stream placement and extraction along the zig-zag path
pub mod bitstream;
/// Format information (mask id and EC level) with BCH error tolerance
pub mod format;
/// Reserved-cell map and function pattern drawing
pub mod function_mask;
/// GF(256) arithmetic
pub mod gf256;
/// Data masking and penalty scoring
pub mod mask;
/// Data mode encoders and decoders (numeric, alphanumeric, byte)
pub mod modes;
/// Decoding pipeline
pub mod qr_decoder;
/// Encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Fixed capacities and alignment positions
pub mod tables;

use crate::config::EncodeOptions;
use crate::models::Version;
use function_mask::ReservedMap;
use gf256::Gf256;
use qr_decoder::QrDecoder;
use qr_encoder::QrEncoder;
use std::sync::OnceLock;

/// Read-only tables shared by every encode and decode call
pub struct Codec {
    field: Gf256,
    reserved: [ReservedMap; 3],
}

static SHARED: OnceLock<Codec> = OnceLock::new();

impl Codec {
    /// Build the field tables and the reserved map of every version
    pub fn new() -> Self {
        Self {
            field: Gf256::new(),
            reserved: Version::ALL.map(ReservedMap::new),
        }
    }

    /// Process-wide instance, built on first use
    pub fn shared() -> &'static Codec {
        SHARED.get_or_init(Codec::new)
    }

    pub fn field(&self) -> &Gf256 {
        &self.field
    }

    pub fn reserved(&self, version: Version) -> &ReservedMap {
        &self.reserved[version.index()]
    }

    pub fn encoder(&self) -> QrEncoder<'_> {
        QrEncoder::new(self)
    }

    pub fn encoder_with(&self, options: EncodeOptions) -> QrEncoder<'_> {
        QrEncoder::with_options(self, options)
    }

    pub fn decoder(&self) -> QrDecoder<'_> {
        QrDecoder::new(self)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}
