//! Character set detection and segment bit streams
//!
//! A payload is always written as a single segment in the most compact
//! character set that covers every character.

use alloc::vec::Vec;

use tiny_qr_core::{EncodingMode, Version};

use crate::buffer::BitBuffer;

/// ECI assignment number for UTF-8
const ECI_UTF8: u32 = 26;

const ALPHANUMERIC_CHARSET: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CharacterSet {
    /// Decimal digits only
    Numeric,
    /// `0-9`, `A-Z`, space and `$%*+-./:`
    Alphanumeric,
    /// Text whose characters all fit in Latin-1, one byte each
    Iso8859_1,
    /// Any other text, as UTF-8 bytes behind an ECI header
    Utf8,
    /// Raw bytes with no text interpretation
    Binary,
}

impl CharacterSet {
    /// Pick the most compact character set for `text`
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.chars().all(|c| c.is_ascii_digit()) {
            Self::Numeric
        } else if text.chars().all(is_alphanumeric) {
            Self::Alphanumeric
        } else if text.chars().all(|c| u32::from(c) <= 0xFF) {
            Self::Iso8859_1
        } else {
            Self::Utf8
        }
    }

    #[must_use]
    pub const fn encoding_mode(self) -> EncodingMode {
        match self {
            Self::Numeric => EncodingMode::Numeric,
            Self::Alphanumeric => EncodingMode::Alphanumeric,
            Self::Iso8859_1 | Self::Utf8 | Self::Binary => EncodingMode::Byte,
        }
    }
}

fn is_alphanumeric(c: char) -> bool {
    u8::try_from(c).ok().and_then(alphanumeric_value).is_some()
}

/// Index of `byte` in the 45-character alphanumeric table
fn alphanumeric_value(byte: u8) -> Option<u8> {
    ALPHANUMERIC_CHARSET
        .iter()
        .position(|&b| b == byte)
        .and_then(|index| u8::try_from(index).ok())
}

/// A payload ready to be written into the data stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    character_set: CharacterSet,
    /// ASCII digits, alphanumeric table indices, Latin-1 bytes or raw bytes
    bytes: Vec<u8>,
    char_count: usize,
}

impl Segment {
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let character_set = CharacterSet::detect(text);
        let bytes: Vec<u8> = match character_set {
            // Every char is <= 0xFF, so the truncation is exact
            CharacterSet::Iso8859_1 => text.chars().map(|c| u32::from(c) as u8).collect(),
            CharacterSet::Alphanumeric => text.bytes().filter_map(alphanumeric_value).collect(),
            _ => text.as_bytes().to_vec(),
        };
        let char_count = match character_set {
            CharacterSet::Utf8 | CharacterSet::Binary => bytes.len(),
            _ => text.chars().count(),
        };
        Self {
            character_set,
            bytes,
            char_count,
        }
    }

    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            character_set: CharacterSet::Binary,
            bytes: bytes.to_vec(),
            char_count: bytes.len(),
        }
    }

    #[must_use]
    pub const fn character_set(&self) -> CharacterSet {
        self.character_set
    }

    /// Value written into the character count indicator
    #[must_use]
    pub const fn char_count(&self) -> usize {
        self.char_count
    }

    /// Whether the character count fits the indicator width of `version`
    #[must_use]
    pub const fn count_fits(&self, version: Version) -> bool {
        let bits = version.character_count_bits(self.character_set.encoding_mode());
        self.char_count < (1 << bits)
    }

    /// Exact number of bits this segment occupies in `version`
    #[must_use]
    pub const fn bit_len(&self, version: Version) -> usize {
        let mode = self.character_set.encoding_mode();
        let header = 4 + version.character_count_bits(mode);
        let n = self.char_count;
        let payload = match self.character_set {
            CharacterSet::Numeric => 10 * (n / 3) + [0, 4, 7][n % 3],
            CharacterSet::Alphanumeric => 11 * (n / 2) + 6 * (n % 2),
            CharacterSet::Iso8859_1 | CharacterSet::Binary => 8 * n,
            CharacterSet::Utf8 => 12 + 8 * n,
        };
        header + payload
    }

    /// Append mode indicator, character count and payload for `version`
    pub fn write(&self, version: Version, buffer: &mut BitBuffer) {
        if self.character_set == CharacterSet::Utf8 {
            buffer.append_number(EncodingMode::Eci.indicator(), 4);
            buffer.append_number(ECI_UTF8, 8);
        }

        let mode = self.character_set.encoding_mode();
        buffer.append_number(mode.indicator(), 4);
        buffer.append_number(
            self.char_count as u32,
            version.character_count_bits(mode),
        );

        match self.character_set {
            CharacterSet::Numeric => self.write_numeric(buffer),
            CharacterSet::Alphanumeric => self.write_alphanumeric(buffer),
            CharacterSet::Iso8859_1 | CharacterSet::Utf8 | CharacterSet::Binary => {
                buffer.append_bytes(&self.bytes);
            }
        }
    }

    fn write_numeric(&self, buffer: &mut BitBuffer) {
        for group in self.bytes.chunks(3) {
            let value = group
                .iter()
                .fold(0, |acc, &digit| acc * 10 + u32::from(digit - b'0'));
            buffer.append_number(value, group.len() * 3 + 1);
        }
    }

    fn write_alphanumeric(&self, buffer: &mut BitBuffer) {
        let mut pairs = self.bytes.chunks_exact(2);
        for pair in &mut pairs {
            let value = 45 * u32::from(pair[0]) + u32::from(pair[1]);
            buffer.append_number(value, 11);
        }
        if let [single] = pairs.remainder() {
            buffer.append_number(u32::from(*single), 6);
        }
    }
}
