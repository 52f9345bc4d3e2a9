/// Numeric mode (Mode 0001)
/// Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits
use super::{BitReader, BitWriter};
use crate::error::{QrError, QrResult};

const MODE_NAME: &str = "numeric";

pub struct NumericCodec;

impl NumericCodec {
    pub fn is_encodable(text: &str) -> bool {
        text.bytes().all(|b| b.is_ascii_digit())
    }

    /// Bits taken by `count` digits
    pub fn payload_bits(count: usize) -> usize {
        10 * (count / 3) + [0, 4, 7][count % 3]
    }

    pub fn encode(text: &str, writer: &mut BitWriter) -> QrResult<()> {
        if let Some(ch) = text.chars().find(|c| !c.is_ascii_digit()) {
            return Err(QrError::InvalidCharacter {
                ch,
                mode: MODE_NAME,
            });
        }

        for group in text.as_bytes().chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &b| acc * 10 + (b - b'0') as u32);
            writer.push(value, group_bits(group.len()));
        }
        Ok(())
    }

    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> QrResult<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let value = reader.read(group_bits(group_size))?;
            if value >= 10u32.pow(group_size as u32) {
                return Err(QrError::CorruptPayload {
                    mode: MODE_NAME,
                    value,
                });
            }

            result.push_str(&format!("{:0width$}", value, width = group_size));
            chars_remaining -= group_size;
        }

        Ok(result)
    }
}

fn group_bits(group_size: usize) -> usize {
    match group_size {
        3 => 10,
        2 => 7,
        _ => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> Vec<bool> {
        let mut writer = BitWriter::new();
        NumericCodec::encode(text, &mut writer).unwrap();
        writer.into_bits()
    }

    #[test]
    fn test_numeric_decode() {
        // 1017 does not fit three digits; 0b1111111001 = 1017
        let bits = vec![true, true, true, true, true, true, true, false, false, true];
        let mut reader = BitReader::new(&bits);
        assert!(matches!(
            NumericCodec::decode(&mut reader, 3),
            Err(QrError::CorruptPayload { value: 1017, .. })
        ));

        // 0b0001111011 = 123
        let bits = vec![false, false, false, true, true, true, true, false, true, true];
        let mut reader = BitReader::new(&bits);
        assert_eq!(NumericCodec::decode(&mut reader, 3).unwrap(), "123");
        assert_eq!(reader.position(), 10);
    }

    #[test]
    fn test_numeric_group_widths() {
        assert_eq!(encode("012").len(), 10);
        assert_eq!(encode("0123").len(), 14);
        assert_eq!(encode("01234").len(), 17);
        assert_eq!(NumericCodec::payload_bits(5), 17);
        assert_eq!(NumericCodec::payload_bits(0), 0);
    }

    #[test]
    fn test_leading_zeros_survive() {
        let bits = encode("00700");
        let mut reader = BitReader::new(&bits);
        assert_eq!(NumericCodec::decode(&mut reader, 5).unwrap(), "00700");
    }

    #[test]
    fn test_rejects_non_digits() {
        let mut writer = BitWriter::new();
        assert!(matches!(
            NumericCodec::encode("12a4", &mut writer),
            Err(QrError::InvalidCharacter { ch: 'a', .. })
        ));
        assert!(!NumericCodec::is_encodable("12 4"));
    }

    #[test]
    fn test_truncated_stream() {
        let bits = vec![false; 9];
        let mut reader = BitReader::new(&bits);
        assert!(matches!(
            NumericCodec::decode(&mut reader, 3),
            Err(QrError::TruncatedPayload {
                needed: 10,
                available: 9
            })
        ));
    }
}
