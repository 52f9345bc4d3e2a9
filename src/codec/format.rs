/// Format information: 15 bits (2 EC level + 3 mask + 10 BCH), stored twice
use crate::error::{QrError, QrResult};
use crate::models::{ECLevel, MaskPattern, Matrix, Module};

/// XOR pattern applied to every format word
pub const FORMAT_MASK: u16 = 0x5412;

/// BCH(15,5) generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const GENERATOR: u16 = 0x537;

/// Canonical level-M descriptors, index = mask id
pub const FORMAT_STRINGS: [&str; 8] = [
    "101010000010010",
    "101000100100101",
    "101111001111100",
    "101101101001011",
    "100010111111001",
    "100000011001110",
    "100111110010111",
    "100101010100000",
];

/// Most bit errors a format copy may carry and still be trusted
const MAX_CORRECTABLE_BITS: u32 = 3;

/// Mask pattern and EC level recovered from the format area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Descriptor string for `mask` at the fixed EC level
    pub fn encode(mask: MaskPattern) -> &'static str {
        FORMAT_STRINGS[mask.id() as usize]
    }

    /// Write both copies of the descriptor for `mask`
    pub fn write(matrix: &mut Matrix, mask: MaskPattern) -> QrResult<()> {
        write_format_string(matrix, Self::encode(mask))
    }

    /// Read the format area; the first copy that is within 3 bit errors of a
    /// valid word wins
    pub fn extract(matrix: &Matrix) -> QrResult<Self> {
        let primary = read_bits(matrix, &primary_coords())?;
        let mirrored = read_bits(matrix, &mirrored_coords(matrix.size()))?;

        for (copy, bits) in [("primary", primary), ("mirrored", mirrored)] {
            if let Some((info, distance)) = Self::decode(bits) {
                if distance > 0 {
                    tracing::debug!(copy, distance, "corrected format information");
                }
                return Ok(info);
            }
        }

        Err(QrError::FormatInfoUnreadable { primary, mirrored })
    }

    /// Decode a raw 15-bit read, returning the info and the bit distance corrected
    fn decode(bits: u16) -> Option<(Self, u32)> {
        let (word, distance) = (0u16..32)
            .map(|data| bch_encode(data) ^ FORMAT_MASK)
            .map(|word| (word, (word ^ bits).count_ones()))
            .min_by_key(|&(word, distance)| (distance, word))?;
        if distance > MAX_CORRECTABLE_BITS {
            return None;
        }

        let unmasked = word ^ FORMAT_MASK;
        let mask_pattern = MaskPattern::from_bits(((unmasked >> 10) & 0x07) as u8)?;
        let ec_level = ECLevel::from_bits_or_low(((unmasked >> 13) & 0x03) as u8);
        Some((
            Self {
                ec_level,
                mask_pattern,
            },
            distance,
        ))
    }
}

/// Write a 15-character descriptor into both format strips ('1' = dark)
pub fn write_format_string(matrix: &mut Matrix, descriptor: &str) -> QrResult<()> {
    let bits: Vec<bool> = descriptor
        .chars()
        .map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect::<Option<_>>()
        .ok_or(QrError::InvalidFormatString {
            len: descriptor.len(),
        })?;
    if bits.len() != 15 {
        return Err(QrError::InvalidFormatString { len: bits.len() });
    }

    let size = matrix.size();
    for coords in [primary_coords(), mirrored_coords(size)] {
        for (&(row, col), &bit) in coords.iter().zip(&bits) {
            matrix.set(row, col, Module::from_bit(bit));
        }
    }
    Ok(())
}

/// Around the top-left finder, most significant bit first
fn primary_coords() -> [(usize, usize); 15] {
    [
        (8, 0),
        (8, 1),
        (8, 2),
        (8, 3),
        (8, 4),
        (8, 5),
        (8, 7),
        (8, 8),
        (7, 8),
        (5, 8),
        (4, 8),
        (3, 8),
        (2, 8),
        (1, 8),
        (0, 8),
    ]
}

/// Up the bottom-left strip, then along the top-right strip
fn mirrored_coords(size: usize) -> [(usize, usize); 15] {
    let mut coords = [(0usize, 0usize); 15];
    for (i, slot) in coords.iter_mut().take(7).enumerate() {
        *slot = (size - 1 - i, 8);
    }
    for (i, slot) in coords.iter_mut().skip(7).enumerate() {
        *slot = (8, size - 8 + i);
    }
    coords
}

fn read_bits(matrix: &Matrix, coords: &[(usize, usize)]) -> QrResult<u16> {
    coords.iter().try_fold(0u16, |acc, &(row, col)| {
        Ok((acc << 1) | matrix.is_dark(row, col)? as u16)
    })
}

/// Append the 10 BCH check bits to 5 data bits
fn bch_encode(data: u16) -> u16 {
    let mut remainder = data << 10;
    for shift in (0..5).rev() {
        if remainder & (1 << (shift + 10)) != 0 {
            remainder ^= GENERATOR << shift;
        }
    }
    (data << 10) | remainder
}
