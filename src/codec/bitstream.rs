/// Writing and reading the data bit stream along the zig-zag path
use crate::codec::function_mask::ReservedMap;
use crate::error::{QrError, QrResult};
use crate::models::{Matrix, Module};

/// Write `bits` into the unreserved cells in zig-zag order (1 = dark).
///
/// Fails before touching the matrix if the stream is longer than the
/// data area. A shorter stream leaves the remaining cells unassigned.
pub fn place_bits(matrix: &mut Matrix, reserved: &ReservedMap, bits: &[bool]) -> QrResult<usize> {
    check_size(matrix, reserved)?;
    let capacity = reserved.data_modules_count();
    if bits.len() > capacity {
        return Err(QrError::LayoutCapacityExceeded {
            bits: bits.len(),
            capacity,
        });
    }

    for (&(row, col), &bit) in reserved.data_cells().iter().zip(bits) {
        matrix.set(row, col, Module::from_bit(bit));
    }
    Ok(bits.len())
}

/// Read every unreserved cell in the order [`place_bits`] writes them (dark = 1)
pub fn extract_bits(matrix: &Matrix, reserved: &ReservedMap) -> QrResult<Vec<bool>> {
    check_size(matrix, reserved)?;
    reserved
        .data_cells()
        .iter()
        .map(|&(row, col)| matrix.is_dark(row, col))
        .collect()
}

/// Pack bits MSB-first into bytes, dropping a trailing partial byte
pub fn bits_to_codewords(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &b| (byte << 1) | b as u8))
        .collect()
}

/// Unpack bytes MSB-first
pub fn codewords_to_bits(codewords: &[u8]) -> Vec<bool> {
    codewords
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1 == 1))
        .collect()
}

fn check_size(matrix: &Matrix, reserved: &ReservedMap) -> QrResult<()> {
    if matrix.size() != reserved.size() {
        return Err(QrError::DimensionMismatch {
            expected: reserved.size(),
            actual: matrix.size(),
        });
    }
    Ok(())
}
