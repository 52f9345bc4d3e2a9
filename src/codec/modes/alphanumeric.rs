/// Alphanumeric mode (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use super::{BitReader, BitWriter};
use crate::error::{QrError, QrResult};

const ALPHANUMERIC_TABLE: [char; 45] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', ' ', '$',
    '%', '*', '+', '-', '.', '/', ':',
];

const MODE_NAME: &str = "alphanumeric";

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericCodec;

impl AlphanumericCodec {
    pub fn index_of(ch: char) -> Option<u32> {
        ALPHANUMERIC_TABLE
            .iter()
            .position(|&c| c == ch)
            .map(|i| i as u32)
    }

    pub fn is_encodable(text: &str) -> bool {
        text.chars().all(|c| Self::index_of(c).is_some())
    }

    pub fn payload_bits(count: usize) -> usize {
        11 * (count / 2) + 6 * (count % 2)
    }

    pub fn encode(text: &str, writer: &mut BitWriter) -> QrResult<()> {
        let values = text
            .chars()
            .map(|ch| {
                Self::index_of(ch).ok_or(QrError::InvalidCharacter {
                    ch,
                    mode: MODE_NAME,
                })
            })
            .collect::<QrResult<Vec<u32>>>()?;

        for pair in values.chunks(2) {
            match *pair {
                [first, second] => writer.push(first * 45 + second, 11),
                [single] => writer.push(single, 6),
                _ => {}
            }
        }
        Ok(())
    }

    pub fn decode(reader: &mut BitReader<'_>, character_count: usize) -> QrResult<String> {
        let mut result = String::with_capacity(character_count);
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            if chars_remaining >= 2 {
                let value = reader.read(11)?;
                let (first, second) = (value / 45, value % 45);
                if first >= 45 {
                    return Err(QrError::CorruptPayload {
                        mode: MODE_NAME,
                        value,
                    });
                }
                result.push(ALPHANUMERIC_TABLE[first as usize]);
                result.push(ALPHANUMERIC_TABLE[second as usize]);
                chars_remaining -= 2;
            } else {
                let value = reader.read(6)?;
                let ch = ALPHANUMERIC_TABLE
                    .get(value as usize)
                    .ok_or(QrError::CorruptPayload {
                        mode: MODE_NAME,
                        value,
                    })?;
                result.push(*ch);
                chars_remaining -= 1;
            }
        }

        Ok(result)
    }
}
