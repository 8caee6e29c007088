//! Shared vocabulary for the tiny-qr encoder
//!
//! Versions, error correction levels, mask patterns and the error type used
//! by every other crate in the workspace.
//!
//! The library crates are `no_std` and only need `alloc`.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

mod version;

pub use version::Version;

/// QR codes use Reed–Solomon error correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCorrectionLevel {
    /// Allows recovery of 7% of missing data
    Low,
    /// Allows recovery of 15% of missing data
    Medium,
    /// Allows recovery of 25% of missing data
    Quartile,
    /// Allows recovery of 30% of missing data
    High,
}

impl ErrorCorrectionLevel {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::Quartile, Self::High];

    /// The next stronger level, if any
    #[must_use]
    pub const fn higher(self) -> Option<Self> {
        match self {
            Self::Low => Some(Self::Medium),
            Self::Medium => Some(Self::Quartile),
            Self::Quartile => Some(Self::High),
            Self::High => None,
        }
    }

    /// The two bits this level contributes to the format information
    #[must_use]
    pub const fn format_bits(self) -> u16 {
        match self {
            Self::Low => 0b01,
            Self::Medium => 0b00,
            Self::Quartile => 0b11,
            Self::High => 0b10,
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::Quartile => 2,
            Self::High => 3,
        }
    }
}

impl fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Self::Low => "L",
            Self::Medium => "M",
            Self::Quartile => "Q",
            Self::High => "H",
        };
        f.write_str(letter)
    }
}

impl FromStr for ErrorCorrectionLevel {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Self::Low),
            "m" | "medium" => Ok(Self::Medium),
            "q" | "quartile" => Ok(Self::Quartile),
            "h" | "high" => Ok(Self::High),
            _ => Err(QrError::InvalidErrorCorrectionLevel {
                level: s.to_string(),
            }),
        }
    }
}

/// Segment modes this encoder can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EncodingMode {
    Numeric,
    Alphanumeric,
    Byte,
    /// Extended Channel Interpretation header
    Eci,
}

impl EncodingMode {
    /// 4-bit mode indicator written before every segment
    #[must_use]
    pub const fn indicator(self) -> u32 {
        match self {
            Self::Numeric => 0b0001,
            Self::Alphanumeric => 0b0010,
            Self::Byte => 0b0100,
            Self::Eci => 0b0111,
        }
    }
}

/// Color of a single module
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Black)
    }

    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark { Self::Black } else { Self::White }
    }
}

/// One of the eight data mask patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub const ALL: [Self; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(4),
        Self(5),
        Self(6),
        Self(7),
    ];

    /// Create a mask pattern from its reference number
    ///
    /// # Errors
    ///
    /// Returns `QrError::InvalidMask` if `reference` is greater than 7
    pub fn new(reference: u8) -> Result<Self, QrError> {
        if reference < 8 {
            Ok(Self(reference))
        } else {
            Err(QrError::InvalidMask { mask: reference })
        }
    }

    #[must_use]
    pub const fn reference(self) -> u8 {
        self.0
    }

    /// Whether the module at `(row, col)` flips under this mask
    #[must_use]
    pub const fn is_inverted(self, row: usize, col: usize) -> bool {
        let (i, j) = (row, col);
        match self.0 {
            0 => (i + j) % 2 == 0,
            1 => i % 2 == 0,
            2 => j % 3 == 0,
            3 => (i + j) % 3 == 0,
            4 => (i / 2 + j / 3) % 2 == 0,
            5 => (i * j) % 2 + (i * j) % 3 == 0,
            6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
            _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
        }
    }
}

impl fmt::Display for MaskPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error types for symbol generation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("tiny-qr: ERR_VERSION: version {version} is outside 1..=40")]
    InvalidVersion { version: u8 },

    #[error("tiny-qr: ERR_MASK: mask pattern {mask} is outside 0..=7")]
    InvalidMask { mask: u8 },

    #[error("tiny-qr: ERR_EC_LEVEL: unknown error correction level '{level}'")]
    InvalidErrorCorrectionLevel { level: String },

    #[error("tiny-qr: ERR_NO_DATA: no text or bytes were supplied")]
    NoData,

    #[error("tiny-qr: ERR_CODEWORD_COUNT: expected {expected} codewords, got {actual}")]
    CodewordCount { expected: usize, actual: usize },

    #[error(
        "tiny-qr: ERR_DATA_TOO_LONG: {bits} bits do not fit version {version}-{level} ({capacity} bits available)"
    )]
    DataTooLong {
        bits: usize,
        capacity: usize,
        version: Version,
        level: ErrorCorrectionLevel,
    },
}
