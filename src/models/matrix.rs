use crate::error::{QrError, QrResult};

/// Compact bit matrix for storing binary data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    /// Create a new bit matrix with given dimensions
    pub fn new(width: usize, height: usize) -> Self {
        let bytes_needed = (width * height).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; bytes_needed],
        }
    }

    /// Get matrix width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get matrix height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get bit at (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y * self.width + x;
        (self.data[index / 8] >> (index % 8)) & 1 == 1
    }

    /// Set bit at (x, y)
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y * self.width + x;
        if value {
            self.data[index / 8] |= 1 << (index % 8);
        } else {
            self.data[index / 8] &= !(1 << (index % 8));
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl Default for BitMatrix {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

/// State of one cell of the symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    /// Dark module, carries bit 1
    Black,
    /// Light module, carries bit 0
    White,
    /// Reserved for data but not written yet (construction only)
    Unassigned,
}

impl Module {
    /// Raster code of a dark module
    pub const BLACK_CODE: u8 = 0;
    /// Raster code of a light module
    pub const WHITE_CODE: u8 = 1;
    /// Raster code of an unwritten cell; never valid in finished output
    pub const UNASSIGNED_CODE: u8 = 2;

    /// Module carrying `bit` (1 = dark)
    pub fn from_bit(bit: bool) -> Self {
        if bit { Module::Black } else { Module::White }
    }

    /// Bit carried by the module, `None` while unassigned
    pub fn bit(self) -> Option<bool> {
        match self {
            Module::Black => Some(true),
            Module::White => Some(false),
            Module::Unassigned => None,
        }
    }

    /// Black and White swap; Unassigned stays
    pub fn toggled(self) -> Self {
        match self {
            Module::Black => Module::White,
            Module::White => Module::Black,
            Module::Unassigned => Module::Unassigned,
        }
    }

    /// Small integer code handed to renderers (0 = black, 1 = white)
    pub fn code(self) -> u8 {
        match self {
            Module::Black => Self::BLACK_CODE,
            Module::White => Self::WHITE_CODE,
            Module::Unassigned => Self::UNASSIGNED_CODE,
        }
    }
}

/// Square grid of modules, indexed by (row, col)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    size: usize,
    modules: Vec<Module>,
}

impl Matrix {
    /// Create a `size` x `size` matrix with every cell unassigned
    pub fn new(size: usize) -> Self {
        Self {
            size,
            modules: vec![Module::Unassigned; size * size],
        }
    }

    /// Build a matrix from a renderer grid where `true` is a light module
    pub fn from_light_grid(grid: &[Vec<bool>]) -> QrResult<Self> {
        let size = grid.len();
        let mut matrix = Self::new(size);
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != size {
                return Err(QrError::DimensionMismatch {
                    expected: size,
                    actual: cells.len(),
                });
            }
            for (col, &light) in cells.iter().enumerate() {
                matrix.set(row, col, Module::from_bit(!light));
            }
        }
        Ok(matrix)
    }

    /// Side length in modules
    pub fn size(&self) -> usize {
        self.size
    }

    /// Module at (row, col). Cells outside the grid read as quiet zone.
    pub fn get(&self, row: usize, col: usize) -> Module {
        if row >= self.size || col >= self.size {
            return Module::White;
        }
        self.modules[row * self.size + col]
    }

    /// Set module at (row, col)
    pub fn set(&mut self, row: usize, col: usize, module: Module) {
        if row >= self.size || col >= self.size {
            return;
        }
        self.modules[row * self.size + col] = module;
    }

    /// Flip a written module between Black and White
    pub fn toggle(&mut self, row: usize, col: usize) {
        let module = self.get(row, col);
        self.set(row, col, module.toggled());
    }

    /// Whether (row, col) is dark; reading an unassigned cell is an error
    pub fn is_dark(&self, row: usize, col: usize) -> QrResult<bool> {
        self.get(row, col)
            .bit()
            .ok_or(QrError::UnassignedModule { row, col })
    }

    /// Fail on the first unassigned cell, in row-major order
    pub fn ensure_complete(&self) -> QrResult<()> {
        match self.modules.iter().position(|&m| m == Module::Unassigned) {
            Some(index) => Err(QrError::UnassignedModule {
                row: index / self.size,
                col: index % self.size,
            }),
            None => Ok(()),
        }
    }

    /// Count of dark modules
    pub fn count_dark(&self) -> usize {
        self.modules.iter().filter(|&&m| m == Module::Black).count()
    }

    /// Raster codes (0 = black, 1 = white), row-major
    pub fn to_codes(&self) -> QrResult<Vec<Vec<u8>>> {
        self.ensure_complete()?;
        Ok(self
            .modules
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|m| m.code()).collect())
            .collect())
    }

    /// Renderer grid where `true` is a light module
    pub fn to_light_grid(&self) -> QrResult<Vec<Vec<bool>>> {
        self.ensure_complete()?;
        Ok(self
            .modules
            .chunks(self.size.max(1))
            .map(|row| row.iter().map(|&m| m == Module::White).collect())
            .collect())
    }

    /// Draw the symbol with block characters, surrounded by a light border
    pub fn to_terminal(&self, quiet_zone: usize) -> String {
        let total = self.size + 2 * quiet_zone;
        let mut out = String::with_capacity(total * (total * 2 * 3 + 1));
        for y in 0..total {
            for x in 0..total {
                let dark = y >= quiet_zone
                    && x >= quiet_zone
                    && self.get(y - quiet_zone, x - quiet_zone) == Module::Black;
                out.push_str(if dark { "██" } else { "  " });
            }
            if y + 1 < total {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_matrix() {
        let mut matrix = BitMatrix::new(8, 8);
        assert_eq!(matrix.width(), 8);
        assert_eq!(matrix.height(), 8);

        matrix.set(3, 4, true);
        assert!(matrix.get(3, 4));
        assert!(!matrix.get(3, 3));
        assert_eq!(matrix.count_ones(), 1);

        matrix.set(3, 4, false);
        assert!(!matrix.get(3, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut matrix = BitMatrix::new(8, 8);
        matrix.set(10, 10, true); // Should not panic
        assert!(!matrix.get(10, 10));

        let mut modules = Matrix::new(4);
        modules.set(9, 9, Module::Black);
        assert_eq!(modules.get(9, 9), Module::White);
    }

    #[test]
    fn test_unassigned_read_is_rejected() {
        let mut matrix = Matrix::new(3);
        assert!(matches!(
            matrix.is_dark(1, 2),
            Err(QrError::UnassignedModule { row: 1, col: 2 })
        ));
        assert!(matrix.to_codes().is_err());

        for row in 0..3 {
            for col in 0..3 {
                matrix.set(row, col, Module::from_bit((row + col) % 2 == 0));
            }
        }
        assert!(matrix.ensure_complete().is_ok());
        assert!(matrix.is_dark(0, 0).unwrap());
        assert_eq!(matrix.to_codes().unwrap()[0], vec![0, 1, 0]);
    }

    #[test]
    fn test_toggle_and_light_grid() {
        let grid = vec![vec![true, false], vec![false, true]];
        let mut matrix = Matrix::from_light_grid(&grid).unwrap();
        assert_eq!(matrix.get(0, 1), Module::Black);
        assert_eq!(matrix.count_dark(), 2);

        matrix.toggle(0, 1);
        assert_eq!(matrix.get(0, 1), Module::White);
        assert_eq!(
            matrix.to_light_grid().unwrap(),
            vec![vec![true, true], vec![false, true]]
        );

        let ragged = vec![vec![true, false], vec![false]];
        assert!(Matrix::from_light_grid(&ragged).is_err());
    }

    #[test]
    fn test_terminal_rendering() {
        let mut matrix = Matrix::new(1);
        matrix.set(0, 0, Module::Black);
        assert_eq!(matrix.to_terminal(1), "      \n  ██  \n      ");
    }
}
