use crate::models::{ECLevel, Version};

/// Error-correction level every symbol uses
pub const EC_LEVEL: ECLevel = ECLevel::M;

/// Fixed codeword layout of one version at level M (single RS block)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub total_codewords: usize,
    pub ecc_codewords: usize,
    /// Zero bits filling the cells left after the last codeword
    pub remainder_bits: usize,
}

impl Capacity {
    pub fn data_codewords(&self) -> usize {
        self.total_codewords - self.ecc_codewords
    }

    pub fn data_bits(&self) -> usize {
        self.data_codewords() * 8
    }

    /// Every unreserved module of the matrix
    pub fn total_bits(&self) -> usize {
        self.total_codewords * 8 + self.remainder_bits
    }
}

// Index: version - 1. Values from the QR Code Model 2 tables, level M.
const CAPACITIES: [Capacity; 3] = [
    Capacity {
        total_codewords: 26,
        ecc_codewords: 10,
        remainder_bits: 0,
    },
    Capacity {
        total_codewords: 44,
        ecc_codewords: 16,
        remainder_bits: 7,
    },
    Capacity {
        total_codewords: 70,
        ecc_codewords: 26,
        remainder_bits: 7,
    },
];

/// Alignment pattern center (row = col) for versions 2+
const ALIGNMENT_CENTERS: [Option<usize>; 3] = [None, Some(18), Some(22)];

pub fn capacity(version: Version) -> Capacity {
    CAPACITIES[version.index()]
}

pub fn alignment_center(version: Version) -> Option<usize> {
    ALIGNMENT_CENTERS[version.index()]
}
