/// Data masking: XOR patterns, penalty scoring and best-mask selection
use crate::codec::format::FormatInfo;
use crate::codec::function_mask::ReservedMap;
use crate::error::{QrError, QrResult};
use crate::models::{MaskPattern, Matrix, Module};
use rayon::prelude::*;

/// Finder-like 1:1:3:1:1 run followed by four light modules (dark = true)
const FINDER_LIKE: [bool; 11] = [
    true, false, true, true, true, false, true, false, false, false, false,
];

const RUN_PENALTY: u32 = 3;
const BLOCK_PENALTY: u32 = 3;
const FINDER_LIKE_PENALTY: u32 = 40;
const BALANCE_PENALTY: u32 = 10;

/// One scored mask from the best-mask search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskCandidate {
    pub mask: MaskPattern,
    pub penalty: u32,
}

/// Penalty split into the four scoring rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PenaltyBreakdown {
    /// Runs of five or more same-colored modules
    pub runs: u32,
    /// Same-colored 2x2 blocks
    pub blocks: u32,
    /// Finder-like 1x11 windows
    pub finder_like: u32,
    /// Deviation of the dark ratio from 50%
    pub balance: u32,
}

impl PenaltyBreakdown {
    pub fn total(&self) -> u32 {
        self.runs + self.blocks + self.finder_like + self.balance
    }
}

/// Flip every data module the pattern selects. Applying twice restores the matrix.
pub fn apply_mask(matrix: &mut Matrix, reserved: &ReservedMap, mask: MaskPattern) -> QrResult<()> {
    if matrix.size() != reserved.size() {
        return Err(QrError::DimensionMismatch {
            expected: reserved.size(),
            actual: matrix.size(),
        });
    }
    for &(row, col) in reserved.data_cells() {
        if mask.is_masked(row, col) {
            matrix.toggle(row, col);
        }
    }
    Ok(())
}

/// Apply `mask` and write its format descriptor
pub fn apply_with_format(
    matrix: &mut Matrix,
    reserved: &ReservedMap,
    mask: MaskPattern,
) -> QrResult<()> {
    apply_mask(matrix, reserved, mask)?;
    FormatInfo::write(matrix, mask)
}

pub fn penalty(matrix: &Matrix) -> u32 {
    penalty_breakdown(matrix).total()
}

pub fn penalty_breakdown(matrix: &Matrix) -> PenaltyBreakdown {
    let size = matrix.size();
    let dark = |row: usize, col: usize| matrix.get(row, col) == Module::Black;

    let mut breakdown = PenaltyBreakdown::default();
    for i in 0..size {
        breakdown.runs += line_run_penalty((0..size).map(|j| dark(i, j)));
        breakdown.runs += line_run_penalty((0..size).map(|j| dark(j, i)));

        let row: Vec<bool> = (0..size).map(|j| dark(i, j)).collect();
        let col: Vec<bool> = (0..size).map(|j| dark(j, i)).collect();
        breakdown.finder_like += finder_like_penalty(&row) + finder_like_penalty(&col);
    }

    for row in 0..size.saturating_sub(1) {
        for col in 0..size.saturating_sub(1) {
            let c = dark(row, col);
            if c == dark(row, col + 1) && c == dark(row + 1, col) && c == dark(row + 1, col + 1) {
                breakdown.blocks += BLOCK_PENALTY;
            }
        }
    }

    breakdown.balance = balance_penalty(matrix.count_dark(), size * size);
    breakdown
}

/// Score all eight masks, each on its own copy of the unmasked matrix
pub fn score_masks(matrix: &Matrix, reserved: &ReservedMap) -> QrResult<Vec<MaskCandidate>> {
    matrix.ensure_complete()?;
    MaskPattern::ALL
        .par_iter()
        .map(|&mask| {
            let mut trial = matrix.clone();
            apply_with_format(&mut trial, reserved, mask)?;
            Ok(MaskCandidate {
                mask,
                penalty: penalty(&trial),
            })
        })
        .collect()
}

/// Pick the lowest-penalty mask (lowest id on ties), apply it and write its format
pub fn select_best(matrix: &mut Matrix, reserved: &ReservedMap) -> QrResult<MaskCandidate> {
    let candidates = score_masks(matrix, reserved)?;
    for candidate in &candidates {
        tracing::trace!(
            mask = candidate.mask.id(),
            penalty = candidate.penalty,
            "scored mask"
        );
    }

    let best = candidates
        .into_iter()
        .min_by_key(|c| (c.penalty, c.mask.id()))
        .ok_or(QrError::InvalidMask(0))?;
    apply_with_format(matrix, reserved, best.mask)?;
    Ok(best)
}

/// (run - 5) + 3 for every run of five or more
fn line_run_penalty(line: impl Iterator<Item = bool>) -> u32 {
    let mut penalty = 0;
    let mut previous = None;
    let mut run = 0u32;
    for value in line {
        if Some(value) == previous {
            run += 1;
        } else {
            if run >= 5 {
                penalty += run - 5 + RUN_PENALTY;
            }
            previous = Some(value);
            run = 1;
        }
    }
    if run >= 5 {
        penalty += run - 5 + RUN_PENALTY;
    }
    penalty
}

fn finder_like_penalty(line: &[bool]) -> u32 {
    line.windows(FINDER_LIKE.len())
        .filter(|w| w.iter().eq(FINDER_LIKE.iter()) || w.iter().eq(FINDER_LIKE.iter().rev()))
        .count() as u32
        * FINDER_LIKE_PENALTY
}

/// 10 points per full 5% step away from a 50% dark ratio
fn balance_penalty(dark: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let percent = dark * 100 / total;
    let lower = percent - percent % 5;
    let upper = lower + 5;
    let steps = (lower.abs_diff(50) / 5).min(upper.abs_diff(50) / 5);
    steps as u32 * BALANCE_PENALTY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::bitstream::place_bits;
    use crate::models::Version;

    fn filled(version: Version, seed: usize) -> (Matrix, ReservedMap) {
        let map = ReservedMap::new(version);
        let mut matrix = map.function_matrix();
        let bits: Vec<bool> = (0..map.data_modules_count())
            .map(|i| (i * 31 + seed) % 7 < 3)
            .collect();
        place_bits(&mut matrix, &map, &bits).unwrap();
        (matrix, map)
    }

    #[test]
    fn test_apply_twice_is_identity() {
        let (matrix, map) = filled(Version::V2, 3);
        for mask in MaskPattern::ALL {
            let mut twice = matrix.clone();
            apply_mask(&mut twice, &map, mask).unwrap();
            assert_ne!(twice, matrix);
            apply_mask(&mut twice, &map, mask).unwrap();
            assert_eq!(twice, matrix);
        }
    }

    #[test]
    fn test_mask_leaves_reserved_cells_alone() {
        let (matrix, map) = filled(Version::V1, 0);
        let mut masked = matrix.clone();
        apply_mask(&mut masked, &map, MaskPattern::Pattern1).unwrap();
        for row in 0..21 {
            for col in 0..21 {
                if map.is_reserved(row, col) {
                    assert_eq!(masked.get(row, col), matrix.get(row, col));
                }
            }
        }
        // Pattern 1 flips even rows only
        assert_ne!(masked.get(10, 9), matrix.get(10, 9));
        assert_eq!(masked.get(9, 9), matrix.get(9, 9));
    }

    #[test]
    fn test_run_penalty() {
        assert_eq!(line_run_penalty([true; 4].into_iter()), 0);
        assert_eq!(line_run_penalty([true; 5].into_iter()), 3);
        assert_eq!(line_run_penalty([false; 7].into_iter()), 5);
        let mixed = [true, true, true, true, true, false, false, false, false, false, false];
        assert_eq!(line_run_penalty(mixed.into_iter()), 3 + 4);
    }

    #[test]
    fn test_finder_like_penalty() {
        let mut line = vec![false; 3];
        line.extend_from_slice(&FINDER_LIKE);
        assert_eq!(finder_like_penalty(&line), 40);
        let reversed: Vec<bool> = FINDER_LIKE.iter().rev().copied().collect();
        assert_eq!(finder_like_penalty(&reversed), 40);
        assert_eq!(finder_like_penalty(&FINDER_LIKE[..10]), 0);
    }

    #[test]
    fn test_balance_penalty() {
        assert_eq!(balance_penalty(50, 100), 0);
        assert_eq!(balance_penalty(47, 100), 0);
        assert_eq!(balance_penalty(43, 100), 10);
        assert_eq!(balance_penalty(62, 100), 20);
        assert_eq!(balance_penalty(0, 100), 90);
    }

    #[test]
    fn test_block_penalty_on_uniform_matrix() {
        let mut matrix = Matrix::new(3);
        for row in 0..3 {
            for col in 0..3 {
                matrix.set(row, col, Module::White);
            }
        }
        let breakdown = penalty_breakdown(&matrix);
        assert_eq!(breakdown.blocks, 4 * BLOCK_PENALTY);
        assert_eq!(breakdown.runs, 0);
        assert_eq!(breakdown.balance, 90);
    }

    #[test]
    fn test_select_best_is_deterministic_and_minimal() {
        let (matrix, map) = filled(Version::V2, 5);
        let scores = score_masks(&matrix, &map).unwrap();
        let lowest = scores.iter().map(|c| c.penalty).min().unwrap();

        let mut first = matrix.clone();
        let mut second = matrix.clone();
        let a = select_best(&mut first, &map).unwrap();
        let b = select_best(&mut second, &map).unwrap();
        assert_eq!(a, b);
        assert_eq!(first, second);
        assert_eq!(a.penalty, lowest);
        assert_eq!(penalty(&first), a.penalty);
        assert!(scores.iter().all(|c| c.penalty > lowest || c.mask >= a.mask));
        assert_eq!(FormatInfo::extract(&first).unwrap().mask_pattern, a.mask);
    }

    #[test]
    fn test_select_best_rejects_unfinished_matrix() {
        let map = ReservedMap::new(Version::V1);
        let mut matrix = map.function_matrix();
        assert!(matches!(
            select_best(&mut matrix, &map),
            Err(QrError::UnassignedModule { .. })
        ));
    }
}
