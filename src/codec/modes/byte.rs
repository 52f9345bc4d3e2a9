/// Byte mode (Mode 0100) for 8-bit data
use super::{BitReader, BitWriter};
use crate::error::QrResult;

pub struct ByteCodec;

impl ByteCodec {
    pub fn payload_bits(count: usize) -> usize {
        8 * count
    }

    /// Write the UTF-8 bytes of `text`
    pub fn encode(text: &str, writer: &mut BitWriter) {
        for &byte in text.as_bytes() {
            writer.push(byte as u32, 8);
        }
    }

    /// Read `character_count` bytes, returning the raw bytes and their text.
    ///
    /// Bytes that are not valid UTF-8 are read as Latin-1.
    pub fn decode(
        reader: &mut BitReader<'_>,
        character_count: usize,
    ) -> QrResult<(Vec<u8>, String)> {
        let bytes = (0..character_count)
            .map(|_| reader.read(8).map(|b| b as u8))
            .collect::<QrResult<Vec<u8>>>()?;

        let text = match std::str::from_utf8(&bytes) {
            Ok(s) => s.to_owned(),
            Err(_) => bytes.iter().map(|&b| b as char).collect(),
        };
        Ok((bytes, text))
    }
}
