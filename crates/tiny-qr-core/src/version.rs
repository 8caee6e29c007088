//! Symbol versions and the capacity tables that hang off them
//!
//! All figures follow ISO/IEC 18004:2015 tables 7 and 9.

use alloc::vec::Vec;
use core::fmt;

use crate::{EncodingMode, ErrorCorrectionLevel, QrError};

/// Error correction codewords per block, indexed by `[level][version]`.
const ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    // Low
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    // Medium
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    // Quartile
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    // High
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

/// Number of error correction blocks, indexed by `[level][version]`.
const ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    // Low
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    // Medium
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    // Quartile
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    // High
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

/// A QR code symbol version, 1 through 40
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(40);

    /// Create a version from its number
    ///
    /// # Errors
    ///
    /// Returns `QrError::InvalidVersion` if `number` is outside `1..=40`
    pub fn new(number: u8) -> Result<Self, QrError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&number) {
            Ok(Self(number))
        } else {
            Err(QrError::InvalidVersion { version: number })
        }
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Width and height of the symbol in modules
    #[must_use]
    pub const fn size(self) -> usize {
        self.0 as usize * 4 + 17
    }

    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        if self.0 > Self::MIN.0 {
            Some(Self(self.0 - 1))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn next(self) -> Option<Self> {
        if self.0 < Self::MAX.0 {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }

    /// Every version from 1 to 40 in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN.0..=Self::MAX.0).map(Self)
    }

    /// Length of the character count indicator for `mode`
    #[must_use]
    pub const fn character_count_bits(self, mode: EncodingMode) -> usize {
        let band = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            EncodingMode::Numeric => [10, 12, 14][band],
            EncodingMode::Alphanumeric => [9, 11, 13][band],
            EncodingMode::Byte => [8, 16, 16][band],
            EncodingMode::Eci => 0,
        }
    }

    /// Modules left for codewords once every function pattern is drawn,
    /// remainder bits included
    #[must_use]
    pub const fn raw_data_modules(self) -> usize {
        let version = self.0 as usize;
        let mut modules = (16 * version + 128) * version + 64;
        if version >= 2 {
            let alignments = version / 7 + 2;
            modules -= (25 * alignments - 10) * alignments - 55;
            if version >= 7 {
                modules -= 36;
            }
        }
        modules
    }

    #[must_use]
    pub const fn total_codewords(self) -> usize {
        self.raw_data_modules() / 8
    }

    #[must_use]
    pub const fn ecc_codewords_per_block(self, level: ErrorCorrectionLevel) -> usize {
        ECC_CODEWORDS_PER_BLOCK[level.index()][self.0 as usize] as usize
    }

    #[must_use]
    pub const fn block_count(self, level: ErrorCorrectionLevel) -> usize {
        ERROR_CORRECTION_BLOCKS[level.index()][self.0 as usize] as usize
    }

    #[must_use]
    pub const fn ecc_codewords(self, level: ErrorCorrectionLevel) -> usize {
        self.ecc_codewords_per_block(level) * self.block_count(level)
    }

    #[must_use]
    pub const fn data_codewords(self, level: ErrorCorrectionLevel) -> usize {
        self.total_codewords() - self.ecc_codewords(level)
    }

    #[must_use]
    pub const fn data_bit_capacity(self, level: ErrorCorrectionLevel) -> usize {
        self.data_codewords(level) * 8
    }

    /// Row/column centres of the alignment patterns, ascending
    ///
    /// Version 1 has none. The first centre is always 6 and the last sits
    /// seven modules from the far edge; the ones in between are evenly
    /// spaced, counting down from the last.
    #[must_use]
    pub fn alignment_pattern_positions(self) -> Vec<usize> {
        let version = self.0 as usize;
        if version == 1 {
            return Vec::new();
        }
        let count = version / 7 + 2;
        let step = (version * 8 + count * 3 + 5) / (count * 4 - 4) * 2;
        let last = self.size() - 7;
        let mut positions = Vec::with_capacity(count);
        positions.push(6);
        positions.extend((1..count).map(|i| last - (count - 1 - i) * step));
        positions
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Version {
    type Error = QrError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}
