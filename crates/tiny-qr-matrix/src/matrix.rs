//! Module placement: function patterns, data codewords and format information

use alloc::vec::Vec;
use core::fmt::{self, Write};

use tiny_qr_core::{Color, ErrorCorrectionLevel, MaskPattern, QrError, Version};

use crate::format::{format_bits, version_bits};
use crate::grid::{Coordinate, Grid};

/// State of a single module while the symbol is being assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Module {
    /// Data or ECC bit, subject to masking
    Data(Color),
    /// Not yet assigned
    #[default]
    Empty,
    /// Finder, separator, timing, alignment, format or version module
    Function(Color),
    /// Set aside for format information that is not written yet
    Reserved,
}

impl Module {
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Data(color) | Self::Function(color) => color,
            Self::Empty | Self::Reserved => Color::White,
        }
    }

    #[must_use]
    pub const fn is_function(self) -> bool {
        matches!(self, Self::Function(_) | Self::Reserved)
    }
}

impl From<Module> for Color {
    fn from(module: Module) -> Self {
        module.color()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Matrix {
    version: Version,
    modules: Grid<Module>,
}

impl Matrix {
    /// A blank symbol with every function pattern of `version` drawn
    #[must_use]
    pub fn new(version: Version) -> Self {
        let mut matrix = Self::empty(version);
        matrix.draw_timing_patterns();
        matrix.draw_finder_patterns();
        matrix.draw_alignment_patterns();
        matrix.reserve_format_areas();
        matrix.draw_version_information();
        matrix
    }

    fn empty(version: Version) -> Self {
        Self {
            version,
            modules: Grid::new(version.size(), Module::Empty),
        }
    }

    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.modules.size()
    }

    #[must_use]
    pub const fn modules(&self) -> &Grid<Module> {
        &self.modules
    }

    pub(crate) fn modules_mut(&mut self) -> &mut Grid<Module> {
        &mut self.modules
    }

    /// Final colors, with unassigned modules read as light
    #[must_use]
    pub fn colors(&self) -> Grid<Color> {
        self.modules.map(Module::color)
    }

    fn set_function(&mut self, row: usize, col: usize, dark: bool) {
        self.modules[(row, col)] = Module::Function(Color::from_dark(dark));
    }

    fn draw_timing_patterns(&mut self) {
        for i in 0..self.size() {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }
    }

    fn draw_finder_patterns(&mut self) {
        let far = self.size() - 4;
        for (row, col) in [(3, 3), (3, far), (far, 3)] {
            self.draw_square_pattern(row, col, 4, |distance| distance != 2 && distance != 4);
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let positions = self.version.alignment_pattern_positions();
        let last = positions.len().saturating_sub(1);
        for (i, &row) in positions.iter().enumerate() {
            for (j, &col) in positions.iter().enumerate() {
                // These centres fall on the finder patterns
                if (i, j) == (0, 0) || (i, j) == (0, last) || (i, j) == (last, 0) {
                    continue;
                }
                self.draw_square_pattern(row, col, 2, |distance| distance != 1);
            }
        }
    }

    /// Concentric squares around a centre, dark where `dark(distance)` holds
    ///
    /// `distance` is the Chebyshev distance from the centre; modules that
    /// fall outside the symbol are skipped.
    fn draw_square_pattern(
        &mut self,
        row: usize,
        col: usize,
        radius: usize,
        dark: impl Fn(usize) -> bool,
    ) {
        let size = self.size();
        for r in row.saturating_sub(radius)..=(row + radius).min(size - 1) {
            for c in col.saturating_sub(radius)..=(col + radius).min(size - 1) {
                let distance = r.abs_diff(row).max(c.abs_diff(col));
                self.set_function(r, c, dark(distance));
            }
        }
    }

    fn reserve_format_areas(&mut self) {
        let size = self.size();
        for i in (0..=8).filter(|&i| i != 6) {
            self.modules[(i, 8)] = Module::Reserved;
            self.modules[(8, i)] = Module::Reserved;
        }
        for i in 0..8 {
            self.modules[(8, size - 1 - i)] = Module::Reserved;
            self.modules[(size - 1 - i, 8)] = Module::Reserved;
        }
    }

    fn draw_version_information(&mut self) {
        if self.version.number() < 7 {
            return;
        }
        let bits = version_bits(self.version);
        let size = self.size();
        for i in 0..18 {
            let dark = (bits >> i) & 1 != 0;
            let (near, far) = (i / 3, size - 11 + i % 3);
            self.set_function(near, far, dark);
            self.set_function(far, near, dark);
        }
    }

    /// Fill the non-function modules with `codewords`, most significant bit
    /// first, along the two-column zigzag from the bottom-right corner
    ///
    /// Modules left over once the codewords run out become light data
    /// modules, so they are still masked.
    ///
    /// # Errors
    ///
    /// Returns `QrError::CodewordCount` unless `codewords` holds exactly the
    /// total codeword count of the version
    pub fn place_codewords(&mut self, codewords: &[u8]) -> Result<(), QrError> {
        let expected = self.version.total_codewords();
        if codewords.len() != expected {
            return Err(QrError::CodewordCount {
                expected,
                actual: codewords.len(),
            });
        }

        let mut bits = codewords
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |index| (byte >> index) & 1 != 0));

        for pos in zigzag(self.size()) {
            let module = &mut self.modules[pos];
            if *module == Module::Empty {
                let dark = bits.next().unwrap_or(false);
                *module = Module::Data(Color::from_dark(dark));
            }
        }
        Ok(())
    }

    /// Write both copies of the format information and the dark module
    pub fn place_format(&mut self, level: ErrorCorrectionLevel, mask: MaskPattern) {
        let bits = format_bits(level, mask);
        let size = self.size();
        for i in 0..15 {
            let dark = (bits >> i) & 1 != 0;
            let (row, col) = match i {
                0..=5 => (i, 8),
                6 => (7, 8),
                7 => (8, 8),
                8 => (8, 7),
                _ => (8, 14 - i),
            };
            self.set_function(row, col, dark);

            let (row, col) = if i < 8 {
                (8, size - 1 - i)
            } else {
                (size - 15 + i, 8)
            };
            self.set_function(row, col, dark);
        }
        self.set_function(size - 8, 8, true);
    }
}

/// Data module visiting order: two-column strips from the right edge,
/// alternating upward and downward, skipping the vertical timing column
fn zigzag(size: usize) -> impl Iterator<Item = Coordinate> {
    let mut strips = Vec::with_capacity(size / 2);
    let mut right = size - 1;
    loop {
        if right == 6 {
            right = 5;
        }
        strips.push(right);
        if right < 2 {
            break;
        }
        right -= 2;
    }

    strips.into_iter().flat_map(move |right| {
        let upward = (right + 1) & 2 == 0;
        (0..size).flat_map(move |vert| {
            let row = if upward { size - 1 - vert } else { vert };
            [Coordinate::new(row, right), Coordinate::new(row, right - 1)]
        })
    })
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.modules.rows() {
            for module in row {
                f.write_char(match module {
                    Module::Data(Color::Black) => '\u{2588}',
                    Module::Data(Color::White) => '_',
                    Module::Function(Color::Black) => '\u{2593}',
                    Module::Function(Color::White) => '\u{2591}',
                    Module::Reserved => '\u{2592}',
                    Module::Empty => '\u{FFFD}',
                })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
