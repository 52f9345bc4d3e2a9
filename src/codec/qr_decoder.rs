/// Rectified module grid back to text
use super::Codec;
use super::bitstream::{bits_to_codewords, codewords_to_bits, extract_bits};
use super::format::FormatInfo;
use super::mask::apply_mask;
use super::modes::decode_data;
use super::reed_solomon::ReedSolomon;
use super::tables::{EC_LEVEL, capacity};
use crate::detector::finder::is_qr_code;
use crate::error::{QrError, QrResult};
use crate::models::{Matrix, QRCode, Version};

/// Decoder bound to a codec's shared tables
pub struct QrDecoder<'a> {
    codec: &'a Codec,
}

impl<'a> QrDecoder<'a> {
    pub fn new(codec: &'a Codec) -> Self {
        Self { codec }
    }

    /// Decode an axis-aligned module matrix.
    ///
    /// Each failing stage reports its own error: size ([`QrError::VersionNotDetected`]),
    /// finder check ([`QrError::NotAQrCode`]), format information, ECC, payload.
    pub fn decode(&self, matrix: &Matrix) -> QrResult<QRCode> {
        let size = matrix.size();
        let version = Version::from_size(size).ok_or(QrError::VersionNotDetected)?;
        matrix.ensure_complete()?;
        if !is_qr_code(matrix) {
            return Err(QrError::NotAQrCode { size });
        }

        let format = FormatInfo::extract(matrix)?;
        if format.ec_level != EC_LEVEL {
            tracing::warn!(
                level = ?format.ec_level,
                "format reports an unsupported EC level, decoding as level M"
            );
        }
        tracing::debug!(
            version = version.number(),
            mask = format.mask_pattern.id(),
            "format information read"
        );

        let reserved = self.codec.reserved(version);
        let mut unmasked = matrix.clone();
        apply_mask(&mut unmasked, reserved, format.mask_pattern)?;
        let bits = extract_bits(&unmasked, reserved)?;

        let cap = capacity(version);
        let mut block = bits_to_codewords(&bits[..cap.total_codewords * 8]);
        let rs = ReedSolomon::new(self.codec.field(), cap.ecc_codewords)?;
        let corrected = rs.correct(&mut block)?;
        if corrected > 0 {
            tracing::debug!(corrected, "repaired codewords");
        }

        let data_bits = codewords_to_bits(&block[..cap.data_codewords()]);
        let payload = decode_data(&data_bits)?;

        Ok(QRCode {
            data: payload.data,
            content: payload.content,
            version,
            error_correction: format.ec_level,
            mask_pattern: format.mask_pattern,
            mode: payload.mode,
            penalty: None,
            modules: matrix.clone(),
        })
    }

    /// Decode a renderer grid where `true` is a light module
    pub fn decode_light_grid(&self, grid: &[Vec<bool>]) -> QrResult<QRCode> {
        let matrix = Matrix::from_light_grid(grid)?;
        self.decode(&matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::qr_encoder::QrEncoder;
    use crate::models::{DataMode, Module};

    #[test]
    fn test_round_trip_each_version() {
        let codec = Codec::new();
        let encoder = QrEncoder::new(&codec);
        let decoder = QrDecoder::new(&codec);
        for text in ["Hi", "hello, world!!!", "The quick brown fox jumps over it"] {
            let code = encoder.encode(text).unwrap();
            let decoded = decoder.decode(&code.modules).unwrap();
            assert_eq!(decoded.content, text);
            assert_eq!(decoded.version, code.version);
            assert_eq!(decoded.mask_pattern, code.mask_pattern);
            assert_eq!(decoded.mode, DataMode::Byte);
        }
    }

    #[test]
    fn test_data_damage_is_corrected() {
        let codec = Codec::new();
        let code = QrEncoder::new(&codec).encode("0123456789").unwrap();
        let reserved = codec.reserved(code.version);
        let mut damaged = code.modules.clone();
        // The first 8 data modules carry codeword 0
        for &(row, col) in reserved.data_cells().iter().take(8) {
            damaged.toggle(row, col);
        }
        let decoded = QrDecoder::new(&codec).decode(&damaged).unwrap();
        assert_eq!(decoded.content, "0123456789");
    }

    #[test]
    fn test_wrong_size() {
        let codec = Codec::new();
        let matrix = Matrix::new(22);
        assert!(matches!(
            QrDecoder::new(&codec).decode(&matrix),
            Err(QrError::VersionNotDetected)
        ));
    }

    #[test]
    fn test_missing_finder() {
        let codec = Codec::new();
        let code = QrEncoder::new(&codec).encode("finder").unwrap();
        let mut matrix = code.modules.clone();
        matrix.set(3, 3, Module::White);
        assert!(matches!(
            QrDecoder::new(&codec).decode(&matrix),
            Err(QrError::NotAQrCode { size: 21 })
        ));
    }

    #[test]
    fn test_light_grid_entry_point() {
        let codec = Codec::new();
        let code = QrEncoder::new(&codec).encode("GRID").unwrap();
        let grid = code.modules.to_light_grid().unwrap();
        let decoded = QrDecoder::new(&codec).decode_light_grid(&grid).unwrap();
        assert_eq!(decoded.content, "GRID");
        assert_eq!(decoded.penalty, None);
    }
}
