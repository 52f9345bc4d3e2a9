use super::tables::alignment_center;
use crate::models::{BitMatrix, Matrix, Module, Version};

/// Finder pattern, 0 = dark, 1 = light, row-major
pub const FINDER_TEMPLATE: [&str; 7] = [
    "0000000", "0111110", "0100010", "0100010", "0100010", "0111110", "0000000",
];

/// Whether cell (r, c) of the 7x7 finder template is dark
pub fn finder_is_dark(r: usize, c: usize) -> bool {
    FINDER_TEMPLATE[r].as_bytes()[c] == b'0'
}

/// Reserved-cell map for a specific QR version.
/// true = function module (not data), false = data module.
///
/// Also holds the zig-zag order of the data modules, so placement and
/// extraction walk the exact same cells.
#[derive(Debug, Clone)]
pub struct ReservedMap {
    mask: BitMatrix,
    version: Version,
    data_cells: Vec<(usize, usize)>,
}

impl ReservedMap {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut mask = BitMatrix::new(size, size);

        // Finder patterns + separators (8x8 each)
        Self::mark_finder_area(&mut mask, 0, 0);
        Self::mark_finder_area(&mut mask, size - 7, 0);
        Self::mark_finder_area(&mut mask, 0, size - 7);

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        if let Some(center) = alignment_center(version) {
            for y in center - 2..=center + 2 {
                for x in center - 2..=center + 2 {
                    mask.set(x, y, true);
                }
            }
        }

        // Format info areas; the bottom-left strip includes the dark module
        for i in 0..9 {
            if i != 6 {
                mask.set(8, i, true);
                mask.set(i, 8, true);
            }
        }
        for i in 0..8 {
            mask.set(size - 1 - i, 8, true);
            mask.set(8, size - 1 - i, true);
        }

        let data_cells = Self::zigzag_order(&mask, size);
        Self {
            mask,
            version,
            data_cells,
        }
    }

    pub fn size(&self) -> usize {
        self.mask.width()
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn is_reserved(&self, row: usize, col: usize) -> bool {
        self.mask.get(col, row)
    }

    /// Unreserved cells in placement order: (row, col)
    pub fn data_cells(&self) -> &[(usize, usize)] {
        &self.data_cells
    }

    pub fn data_modules_count(&self) -> usize {
        self.data_cells.len()
    }

    /// Fresh matrix with every function pattern drawn and data cells unassigned.
    ///
    /// Format cells hold light placeholders until the mask is chosen.
    pub fn function_matrix(&self) -> Matrix {
        let size = self.size();
        let mut matrix = Matrix::new(size);

        for row in 0..size {
            for col in 0..size {
                if self.is_reserved(row, col) {
                    matrix.set(row, col, Module::White);
                }
            }
        }

        for (top, left) in [(0, 0), (0, size - 7), (size - 7, 0)] {
            for r in 0..7 {
                for c in 0..7 {
                    matrix.set(top + r, left + c, Module::from_bit(finder_is_dark(r, c)));
                }
            }
        }

        for i in 8..size - 8 {
            let module = Module::from_bit(i % 2 == 0);
            matrix.set(6, i, module);
            matrix.set(i, 6, module);
        }

        if let Some(center) = alignment_center(self.version) {
            for row in center - 2..=center + 2 {
                for col in center - 2..=center + 2 {
                    let ring = row.abs_diff(center).max(col.abs_diff(center));
                    matrix.set(row, col, Module::from_bit(ring != 1));
                }
            }
        }

        matrix.set(size - 8, 8, Module::Black);
        matrix
    }

    fn mark_finder_area(mask: &mut BitMatrix, x: usize, y: usize) {
        let size = mask.width();
        let start_x = x.saturating_sub(1);
        let start_y = y.saturating_sub(1);
        let end_x = (x + 7 + 1).min(size);
        let end_y = (y + 7 + 1).min(size);
        for yy in start_y..end_y {
            for xx in start_x..end_x {
                mask.set(xx, yy, true);
            }
        }
    }

    /// Two-column zig-zag from the bottom-right corner, right column first,
    /// direction flipping after each pair; column 6 is skipped entirely.
    fn zigzag_order(mask: &BitMatrix, size: usize) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(size * size);
        let mut upward = true;
        let mut col = size as i32 - 1;

        while col > 0 {
            if col == 6 {
                col -= 1;
                continue;
            }

            let mut visit = |row: usize| {
                for c in [col, col - 1] {
                    let c = c as usize;
                    if !mask.get(c, row) {
                        cells.push((row, c));
                    }
                }
            };

            if upward {
                (0..size).rev().for_each(&mut visit);
            } else {
                (0..size).for_each(&mut visit);
            }

            upward = !upward;
            col -= 2;
        }

        cells
    }
}
