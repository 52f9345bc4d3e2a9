use super::Matrix;
use crate::error::{QrError, QrResult};
use std::fmt;

/// QR Code version (only the three smallest Model 2 sizes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Version {
    /// 21x21 modules
    V1,
    /// 25x25 modules
    V2,
    /// 29x29 modules
    V3,
}

impl Version {
    /// All supported versions, smallest first
    pub const ALL: [Version; 3] = [Version::V1, Version::V2, Version::V3];

    /// Get version from its number (1-3)
    pub fn from_number(number: u8) -> QrResult<Self> {
        match number {
            1 => Ok(Version::V1),
            2 => Ok(Version::V2),
            3 => Ok(Version::V3),
            other => Err(QrError::InvalidVersion(other)),
        }
    }

    /// Get version from a side length in modules
    pub fn from_size(size: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.size() == size)
    }

    /// Get the version number (1-3)
    pub fn number(&self) -> u8 {
        match self {
            Version::V1 => 1,
            Version::V2 => 2,
            Version::V3 => 3,
        }
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * (self.number() as usize) + 17
    }

    /// Index into per-version tables
    pub(crate) fn index(&self) -> usize {
        self.number() as usize - 1
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L,
    /// Medium (~15% recovery capacity)
    M,
    /// Quartile (~25% recovery capacity)
    Q,
    /// High (~30% recovery capacity)
    H,
}

impl ECLevel {
    /// Get error correction level from format bits (01=L, 00=M, 11=Q, 10=H)
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b01 => Some(ECLevel::L),
            0b00 => Some(ECLevel::M),
            0b11 => Some(ECLevel::Q),
            0b10 => Some(ECLevel::H),
            _ => None,
        }
    }

    /// Same as [`ECLevel::from_bits`], falling back to `L` for anything unrecognized.
    ///
    /// Kept for compatibility with symbols whose level field was read from
    /// more than two bits.
    pub fn from_bits_or_low(bits: u8) -> Self {
        Self::from_bits(bits).unwrap_or(ECLevel::L)
    }

    /// Two-bit field as stored in the format descriptor
    pub fn bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in id order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from bits
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get((bits & 0x07) as usize).copied()
    }

    /// Get mask pattern from a mask id, rejecting ids above 7
    pub fn from_id(id: u8) -> QrResult<Self> {
        if id > 7 {
            return Err(QrError::InvalidMask(id));
        }
        Self::from_bits(id).ok_or(QrError::InvalidMask(id))
    }

    /// Mask id (0-7)
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Check if module at row `i`, column `j` should be flipped
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// Data encoding mode of a single-segment message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Digits 0-9 (mode 0001)
    Numeric,
    /// 45-symbol alphanumeric table (mode 0010)
    Alphanumeric,
    /// 8-bit bytes (mode 0100)
    Byte,
}

impl DataMode {
    /// 4-bit mode indicator
    pub fn indicator(&self) -> u8 {
        match self {
            DataMode::Numeric => 0b0001,
            DataMode::Alphanumeric => 0b0010,
            DataMode::Byte => 0b0100,
        }
    }

    /// Get mode from its 4-bit indicator
    pub fn from_indicator(indicator: u8) -> QrResult<Self> {
        match indicator {
            0b0001 => Ok(DataMode::Numeric),
            0b0010 => Ok(DataMode::Alphanumeric),
            0b0100 => Ok(DataMode::Byte),
            other => Err(QrError::UnsupportedDataMode(other)),
        }
    }

    /// Width of the character-count field (versions 1-9)
    pub fn count_bits(&self) -> usize {
        match self {
            DataMode::Numeric => 10,
            DataMode::Alphanumeric => 9,
            DataMode::Byte => 8,
        }
    }

    /// Lowercase mode name, used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            DataMode::Numeric => "numeric",
            DataMode::Alphanumeric => "alphanumeric",
            DataMode::Byte => "byte",
        }
    }
}

/// Encoded or decoded QR code
#[derive(Debug, Clone)]
pub struct QRCode {
    /// Raw payload bytes (byte mode) or the text's bytes (other modes)
    pub data: Vec<u8>,
    /// Payload as text
    pub content: String,
    /// QR code version
    pub version: Version,
    /// Error correction level
    pub error_correction: ECLevel,
    /// Mask pattern used
    pub mask_pattern: MaskPattern,
    /// Data mode of the single segment
    pub mode: DataMode,
    /// Mask penalty score (only known when the symbol was encoded here)
    pub penalty: Option<u32>,
    /// Module matrix, masked, with format information written
    pub modules: Matrix,
}
