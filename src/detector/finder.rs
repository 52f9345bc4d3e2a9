/// Finder pattern location on a rectified module grid by 7x7 template matching
use crate::codec::function_mask::finder_is_dark;
use crate::models::{Matrix, Module};

const FINDER_SIZE: usize = 7;

/// Center of a 7x7 window that matches the finder template exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinderPattern {
    pub row: usize,
    pub col: usize,
}

impl FinderPattern {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

pub struct FinderDetector;

impl FinderDetector {
    /// Every window position whose modules equal the template, row-major
    pub fn detect(matrix: &Matrix) -> Vec<FinderPattern> {
        let size = matrix.size();
        if size < FINDER_SIZE {
            return Vec::new();
        }

        let mut found = Vec::new();
        for top in 0..=size - FINDER_SIZE {
            for left in 0..=size - FINDER_SIZE {
                if Self::matches_at(matrix, top, left) {
                    found.push(FinderPattern::new(top + 3, left + 3));
                }
            }
        }
        found
    }

    /// Whether the window with top-left corner (top, left) is a finder pattern
    pub fn matches_at(matrix: &Matrix, top: usize, left: usize) -> bool {
        (0..FINDER_SIZE).all(|r| {
            (0..FINDER_SIZE).all(|c| {
                let expected = Module::from_bit(finder_is_dark(r, c));
                matrix.get(top + r, left + c) == expected
            })
        })
    }

    /// Top-left, top-right and bottom-left finder centers for a grid of `size`
    pub fn expected_centers(size: usize) -> [FinderPattern; 3] {
        let far = size.saturating_sub(4);
        [
            FinderPattern::new(3, 3),
            FinderPattern::new(3, far),
            FinderPattern::new(far, 3),
        ]
    }
}

/// Structural check: finders at the three expected corners and none at the fourth
pub fn is_qr_code(matrix: &Matrix) -> bool {
    let size = matrix.size();
    if size < 2 * FINDER_SIZE {
        return false;
    }

    let found = FinderDetector::detect(matrix);
    let far = size - 4;
    let corners_present = FinderDetector::expected_centers(size)
        .iter()
        .all(|expected| found.contains(expected));
    let fourth_absent = !found.contains(&FinderPattern::new(far, far));

    tracing::trace!(size, matches = found.len(), corners_present, fourth_absent, "finder search");
    corners_present && fourth_absent
}
