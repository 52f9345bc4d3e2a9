//! QR code data modes
//!
//! Single-segment payloads in one of three modes:
//! - Numeric: Efficient encoding for digits (0-9)
//! - Alphanumeric: Letters, numbers, and symbols
//! - Byte: 8-bit data (UTF-8, with a Latin-1 fallback on decode)
//!
//! A segment is a 4-bit mode indicator, a character-count field and the
//! packed payload. [`encode_data`] terminates and pads it to the data-bit
//! budget of a version.

pub mod alphanumeric;
pub mod byte;
pub mod numeric;

use crate::codec::tables::capacity;
use crate::error::{QrError, QrResult};
use crate::models::{DataMode, Version};
use alphanumeric::AlphanumericCodec;
use byte::ByteCodec;
use numeric::NumericCodec;

/// Alternating pad codewords, 11101100 then 00010001
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

const TERMINATOR_BITS: usize = 4;

/// Append-only MSB-first bit buffer
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn push(&mut self, value: u32, count: usize) {
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }
}

/// Cursor over a bit slice
pub struct BitReader<'a> {
    bits: &'a [bool],
    idx: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(bits: &'a [bool]) -> Self {
        Self { bits, idx: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.idx)
    }

    pub fn position(&self) -> usize {
        self.idx
    }

    pub fn read(&mut self, n: usize) -> QrResult<u32> {
        if n > self.remaining() {
            return Err(QrError::TruncatedPayload {
                needed: n,
                available: self.remaining(),
            });
        }
        let mut val = 0u32;
        for _ in 0..n {
            val = (val << 1) | (self.bits[self.idx] as u32);
            self.idx += 1;
        }
        Ok(val)
    }
}

/// Decoded single-segment payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub mode: DataMode,
    pub content: String,
    pub data: Vec<u8>,
}

/// Most compact mode able to carry `text`
pub fn choose_mode(text: &str) -> DataMode {
    if NumericCodec::is_encodable(text) {
        DataMode::Numeric
    } else if AlphanumericCodec::is_encodable(text) {
        DataMode::Alphanumeric
    } else {
        DataMode::Byte
    }
}

/// Characters counted by the count field: bytes in byte mode, chars otherwise
fn character_count(text: &str, mode: DataMode) -> usize {
    match mode {
        DataMode::Byte => text.len(),
        _ => text.chars().count(),
    }
}

/// Header plus payload length in bits, without building the stream
pub fn segment_bits(text: &str, mode: DataMode) -> usize {
    let count = character_count(text, mode);
    let payload = match mode {
        DataMode::Numeric => NumericCodec::payload_bits(count),
        DataMode::Alphanumeric => AlphanumericCodec::payload_bits(count),
        DataMode::Byte => ByteCodec::payload_bits(count),
    };
    4 + mode.count_bits() + payload
}

/// Mode indicator, character count and payload, unpadded
pub fn encode_segment(text: &str, mode: DataMode) -> QrResult<Vec<bool>> {
    let count = character_count(text, mode);
    if count >> mode.count_bits() != 0 {
        let largest = capacity(Version::V3);
        return Err(QrError::MessageTooLong {
            required: segment_bits(text, mode),
            capacity: largest.data_bits(),
            version: Version::V3.number(),
        });
    }

    let mut writer = BitWriter::new();
    writer.push(mode.indicator() as u32, 4);
    writer.push(count as u32, mode.count_bits());
    match mode {
        DataMode::Numeric => NumericCodec::encode(text, &mut writer)?,
        DataMode::Alphanumeric => AlphanumericCodec::encode(text, &mut writer)?,
        DataMode::Byte => ByteCodec::encode(text, &mut writer),
    }
    Ok(writer.into_bits())
}

/// Full data bit stream for `version`: segment, terminator, byte alignment
/// and pad codewords, exactly `data_bits` long
pub fn encode_data(text: &str, mode: DataMode, version: Version) -> QrResult<Vec<bool>> {
    finish_segment(encode_segment(text, mode)?, version)
}

/// Terminate and pad an already encoded segment for `version`
pub fn finish_segment(segment: Vec<bool>, version: Version) -> QrResult<Vec<bool>> {
    let budget = capacity(version).data_bits();
    if segment.len() > budget {
        return Err(QrError::MessageTooLong {
            required: segment.len(),
            capacity: budget,
            version: version.number(),
        });
    }
    Ok(pad_to_capacity(segment, budget))
}

/// Terminator (up to 4 zero bits), zero fill to a byte boundary, then
/// alternating pad bytes until `budget` bits
pub fn pad_to_capacity(mut bits: Vec<bool>, budget: usize) -> Vec<bool> {
    let terminator = TERMINATOR_BITS.min(budget.saturating_sub(bits.len()));
    bits.resize(bits.len() + terminator, false);

    let aligned = bits.len().div_ceil(8) * 8;
    bits.resize(aligned.min(budget).max(bits.len()), false);

    let mut writer = BitWriter { bits };
    for pad in PAD_BYTES.iter().cycle() {
        if writer.len() + 8 > budget {
            break;
        }
        writer.push(*pad as u32, 8);
    }
    writer.into_bits()
}

/// Read one segment back: mode, count, then exactly that many characters
pub fn decode_data(bits: &[bool]) -> QrResult<Payload> {
    let mut reader = BitReader::new(bits);
    let mode = DataMode::from_indicator(reader.read(4)? as u8)?;
    let count = reader.read(mode.count_bits())? as usize;

    let (data, content) = match mode {
        DataMode::Numeric => {
            let text = NumericCodec::decode(&mut reader, count)?;
            (text.as_bytes().to_vec(), text)
        }
        DataMode::Alphanumeric => {
            let text = AlphanumericCodec::decode(&mut reader, count)?;
            (text.as_bytes().to_vec(), text)
        }
        DataMode::Byte => ByteCodec::decode(&mut reader, count)?,
    };

    tracing::trace!(
        mode = mode.name(),
        count,
        bits_used = reader.position(),
        "decoded segment"
    );
    Ok(Payload {
        mode,
        content,
        data,
    })
}
