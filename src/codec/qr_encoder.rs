/// Text to finished symbol: segment, Reed-Solomon, placement, masking
use super::Codec;
use super::bitstream::{bits_to_codewords, codewords_to_bits, place_bits};
use super::mask::{apply_with_format, penalty, select_best};
use super::modes::{choose_mode, encode_segment, finish_segment};
use super::reed_solomon::ReedSolomon;
use super::tables::{EC_LEVEL, capacity};
use crate::config::EncodeOptions;
use crate::error::{QrError, QrResult};
use crate::models::{QRCode, Version};

/// Encoder bound to a codec's shared tables
pub struct QrEncoder<'a> {
    codec: &'a Codec,
    options: EncodeOptions,
}

impl<'a> QrEncoder<'a> {
    pub fn new(codec: &'a Codec) -> Self {
        Self::with_options(codec, EncodeOptions::default())
    }

    pub fn with_options(codec: &'a Codec, options: EncodeOptions) -> Self {
        Self { codec, options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    /// Encode `text` into a masked matrix with format information written
    pub fn encode(&self, text: &str) -> QrResult<QRCode> {
        let mode = self.options.mode.unwrap_or_else(|| choose_mode(text));
        let segment = encode_segment(text, mode)?;
        let version = self.select_version(segment.len())?;
        tracing::debug!(
            mode = mode.name(),
            version = version.number(),
            segment_bits = segment.len(),
            "encoding segment"
        );

        let data_bits = finish_segment(segment, version)?;
        let data = bits_to_codewords(&data_bits);

        let cap = capacity(version);
        let rs = ReedSolomon::new(self.codec.field(), cap.ecc_codewords)?;
        let ecc = rs.encode(&data);

        let mut stream = codewords_to_bits(&data);
        stream.extend(codewords_to_bits(&ecc));
        stream.resize(cap.total_bits(), false);

        let reserved = self.codec.reserved(version);
        let mut matrix = reserved.function_matrix();
        place_bits(&mut matrix, reserved, &stream)?;

        let (mask_pattern, score) = match self.options.mask {
            Some(mask) => {
                apply_with_format(&mut matrix, reserved, mask)?;
                (mask, penalty(&matrix))
            }
            None => {
                let best = select_best(&mut matrix, reserved)?;
                (best.mask, best.penalty)
            }
        };
        matrix.ensure_complete()?;
        tracing::debug!(mask = mask_pattern.id(), penalty = score, "symbol finished");

        Ok(QRCode {
            data: text.as_bytes().to_vec(),
            content: text.to_owned(),
            version,
            error_correction: EC_LEVEL,
            mask_pattern,
            mode,
            penalty: Some(score),
            modules: matrix,
        })
    }

    /// Forced version, or the smallest one whose data budget holds the segment
    fn select_version(&self, segment_bits: usize) -> QrResult<Version> {
        if let Some(version) = self.options.version {
            return Ok(version);
        }
        Version::ALL
            .into_iter()
            .find(|&v| segment_bits <= capacity(v).data_bits())
            .ok_or(QrError::MessageTooLong {
                required: segment_bits,
                capacity: capacity(Version::V3).data_bits(),
                version: Version::V3.number(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::format::FormatInfo;
    use crate::detector::finder::is_qr_code;
    use crate::models::{DataMode, MaskPattern};

    #[test]
    fn test_smallest_version_is_chosen() {
        let codec = Codec::new();
        let encoder = QrEncoder::new(&codec);

        let small = encoder.encode("Hi").unwrap();
        assert_eq!(small.version, Version::V1);
        assert_eq!(small.mode, DataMode::Byte);

        // 15 bytes overflow version 1 (128 data bits)
        let medium = encoder.encode("hello, world!!!").unwrap();
        assert_eq!(medium.version, Version::V2);

        let large = encoder.encode(&"x".repeat(42)).unwrap();
        assert_eq!(large.version, Version::V3);
        assert!(encoder.encode(&"x".repeat(43)).is_err());
    }

    #[test]
    fn test_output_is_complete_symbol() {
        let codec = Codec::new();
        let code = QrEncoder::new(&codec).encode("HELLO WORLD").unwrap();
        assert_eq!(code.mode, DataMode::Alphanumeric);
        assert_eq!(code.error_correction, EC_LEVEL);
        assert!(code.modules.ensure_complete().is_ok());
        assert!(is_qr_code(&code.modules));
        assert_eq!(
            FormatInfo::extract(&code.modules).unwrap().mask_pattern,
            code.mask_pattern
        );
        assert_eq!(code.penalty, Some(penalty(&code.modules)));
    }

    #[test]
    fn test_forced_options() {
        let codec = Codec::new();
        let options = EncodeOptions::new()
            .with_version(Version::V3)
            .with_mode(DataMode::Byte)
            .with_mask(MaskPattern::Pattern6);
        let code = QrEncoder::with_options(&codec, options).encode("12345").unwrap();
        assert_eq!(code.version, Version::V3);
        assert_eq!(code.mode, DataMode::Byte);
        assert_eq!(code.mask_pattern, MaskPattern::Pattern6);
        assert_eq!(code.modules.size(), 29);
    }

    #[test]
    fn test_forced_version_too_small() {
        let codec = Codec::new();
        let options = EncodeOptions::new().with_version(Version::V1);
        let err = QrEncoder::with_options(&codec, options)
            .encode(&"y".repeat(20))
            .unwrap_err();
        assert!(matches!(
            err,
            QrError::MessageTooLong {
                required: 172,
                capacity: 128,
                version: 1
            }
        ));
    }

    #[test]
    fn test_forced_mode_rejects_characters() {
        let codec = Codec::new();
        let options = EncodeOptions::new().with_mode(DataMode::Numeric);
        assert!(matches!(
            QrEncoder::with_options(&codec, options).encode("12A"),
            Err(QrError::InvalidCharacter { ch: 'A', .. })
        ));
    }
}
