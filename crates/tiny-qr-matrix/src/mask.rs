//! Data masking and mask selection by penalty score

use alloc::vec::Vec;

use tiny_qr_core::{Color, ErrorCorrectionLevel, MaskPattern};
use tracing::debug;

use crate::grid::Grid;
use crate::matrix::{Matrix, Module};

const RUN_THRESHOLD: usize = 5;
const BLOCK_PENALTY: usize = 3;
const FINDER_LIKE_PENALTY: usize = 40;
const BALANCE_PENALTY: usize = 10;

/// Finder-like window, dark = true, in both orientations
const FINDER_LIKE: [[bool; 11]; 2] = [
    [
        true, false, true, true, true, false, true, false, false, false, false,
    ],
    [
        false, false, false, false, true, false, true, true, true, false, true,
    ],
];

/// Invert every data module where `mask` applies
///
/// Function modules are left alone, so applying the same mask twice
/// restores the original matrix.
pub fn apply(matrix: &mut Matrix, mask: MaskPattern) {
    for (pos, module) in matrix.modules_mut().iter_mut() {
        if !mask.is_inverted(pos.row, pos.col) {
            continue;
        }
        if let Module::Data(color) = *module {
            *module = Module::Data(color.inverse());
        }
    }
}

/// Copy of `matrix` with `mask` applied and the matching format written
#[must_use]
pub fn masked(matrix: &Matrix, level: ErrorCorrectionLevel, mask: MaskPattern) -> Matrix {
    let mut masked = matrix.clone();
    apply(&mut masked, mask);
    masked.place_format(level, mask);
    masked
}

/// Try all eight masks and keep the one with the lowest penalty
///
/// Ties go to the lowest mask reference.
#[must_use]
pub fn best(matrix: &Matrix, level: ErrorCorrectionLevel) -> (MaskPattern, Matrix) {
    let mut best: Option<(usize, MaskPattern, Matrix)> = None;
    for pattern in MaskPattern::ALL {
        let candidate = masked(matrix, level, pattern);
        let score = penalty(&candidate.colors());
        debug!(mask = pattern.reference(), score, "scored mask");
        if best.as_ref().is_none_or(|(lowest, _, _)| score < *lowest) {
            best = Some((score, pattern, candidate));
        }
    }

    match best {
        Some((_, pattern, matrix)) => (pattern, matrix),
        None => unreachable!("MaskPattern::ALL is not empty"),
    }
}

/// Total penalty of a finished symbol
#[must_use]
pub fn penalty(colors: &Grid<Color>) -> usize {
    let rows = colors
        .rows()
        .map(|row| row.iter().map(|color| color.is_dark()).collect::<Vec<bool>>());
    let columns = colors
        .columns()
        .map(|column| column.map(Color::is_dark).collect::<Vec<bool>>());
    let lines: Vec<Vec<bool>> = rows.chain(columns).collect();

    let runs: usize = lines.iter().map(|line| run_penalty(line)).sum();
    let finder_like: usize = lines.iter().map(|line| finder_like_count(line)).sum();

    runs + block_penalty(colors) + finder_like * FINDER_LIKE_PENALTY + balance_penalty(colors)
}

fn run_penalty(line: &[bool]) -> usize {
    line.chunk_by(|a, b| a == b)
        .map(<[bool]>::len)
        .filter(|&run| run >= RUN_THRESHOLD)
        .map(|run| run - 2)
        .sum()
}

fn block_penalty(colors: &Grid<Color>) -> usize {
    let size = colors.size();
    let mut total = 0;
    for row in 0..size - 1 {
        for col in 0..size - 1 {
            let color = colors[(row, col)];
            if colors[(row, col + 1)] == color
                && colors[(row + 1, col)] == color
                && colors[(row + 1, col + 1)] == color
            {
                total += BLOCK_PENALTY;
            }
        }
    }
    total
}

fn finder_like_count(line: &[bool]) -> usize {
    line.windows(11)
        .filter(|window| FINDER_LIKE.iter().any(|pattern| pattern.as_slice() == *window))
        .count()
}

fn balance_penalty(colors: &Grid<Color>) -> usize {
    let total = colors.size() * colors.size();
    let dark = colors.rows().flatten().filter(|color| color.is_dark()).count();
    let percent = dark * 100 / total;
    percent.abs_diff(50) / 5 * BALANCE_PENALTY
}
