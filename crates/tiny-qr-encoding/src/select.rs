//! Version and error correction selection, then data codeword assembly

use alloc::vec::Vec;

use tiny_qr_core::{ErrorCorrectionLevel, QrError, Version};
use tracing::debug;

use crate::buffer::BitBuffer;
use crate::segment::Segment;

const PAD_BYTES: [u8; 2] = [0b1110_1100, 0b0001_0001];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRestriction {
    /// Use the smallest version up to this one that fits
    Max(Version),
    /// Use exactly this version
    Specific(Version),
}

impl VersionRestriction {
    #[must_use]
    pub const fn version(self) -> Version {
        match self {
            Self::Max(version) | Self::Specific(version) => version,
        }
    }
}

impl Default for VersionRestriction {
    fn default() -> Self {
        Self::Max(Version::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCorrectionRestriction {
    /// Use the strongest level from this one up that still fits
    Min(ErrorCorrectionLevel),
    /// Use exactly this level
    Specific(ErrorCorrectionLevel),
}

impl ErrorCorrectionRestriction {
    #[must_use]
    pub const fn level(self) -> ErrorCorrectionLevel {
        match self {
            Self::Min(level) | Self::Specific(level) => level,
        }
    }
}

impl Default for ErrorCorrectionRestriction {
    fn default() -> Self {
        Self::Min(ErrorCorrectionLevel::Medium)
    }
}

/// Data codewords for a chosen version and level, before error correction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedData {
    pub version: Version,
    pub error_correction: ErrorCorrectionLevel,
    pub codewords: Vec<u8>,
}

fn fits(segment: &Segment, version: Version, level: ErrorCorrectionLevel) -> bool {
    segment.count_fits(version) && segment.bit_len(version) <= version.data_bit_capacity(level)
}

/// Choose a version and level for `segment` and build its data codewords
///
/// The level is raised first, as far as the restriction's version allows;
/// the version is then lowered as far as the chosen level allows.
///
/// # Errors
///
/// Returns `QrError::DataTooLong` if the segment does not fit the
/// restriction's version at the restriction's level
pub fn encode_segment(
    version_restriction: VersionRestriction,
    error_correction_restriction: ErrorCorrectionRestriction,
    segment: &Segment,
) -> Result<EncodedData, QrError> {
    let max_version = version_restriction.version();
    let min_level = error_correction_restriction.level();

    if !fits(segment, max_version, min_level) {
        return Err(QrError::DataTooLong {
            bits: segment.bit_len(max_version),
            capacity: max_version.data_bit_capacity(min_level),
            version: max_version,
            level: min_level,
        });
    }

    let mut level = min_level;
    if let ErrorCorrectionRestriction::Min(_) = error_correction_restriction {
        while let Some(higher) = level.higher() {
            if !fits(segment, max_version, higher) {
                break;
            }
            level = higher;
        }
    }

    let mut version = max_version;
    if let VersionRestriction::Max(_) = version_restriction {
        while let Some(smaller) = version.previous() {
            if !fits(segment, smaller, level) {
                break;
            }
            version = smaller;
        }
    }

    debug!(
        version = version.number(),
        level = %level,
        character_set = ?segment.character_set(),
        bits = segment.bit_len(version),
        capacity = version.data_bit_capacity(level),
        "selected symbol parameters"
    );

    Ok(EncodedData {
        version,
        error_correction: level,
        codewords: build_codewords(segment, version, level),
    })
}

/// Encode `text` in its most compact character set
///
/// # Errors
///
/// Returns `QrError::DataTooLong` if the text does not fit
pub fn encode_text(
    version_restriction: VersionRestriction,
    error_correction_restriction: ErrorCorrectionRestriction,
    text: &str,
) -> Result<EncodedData, QrError> {
    encode_segment(
        version_restriction,
        error_correction_restriction,
        &Segment::from_text(text),
    )
}

/// Encode raw bytes in byte mode
///
/// # Errors
///
/// Returns `QrError::DataTooLong` if the bytes do not fit
pub fn encode_bytes(
    version_restriction: VersionRestriction,
    error_correction_restriction: ErrorCorrectionRestriction,
    bytes: &[u8],
) -> Result<EncodedData, QrError> {
    encode_segment(
        version_restriction,
        error_correction_restriction,
        &Segment::from_bytes(bytes),
    )
}

fn build_codewords(segment: &Segment, version: Version, level: ErrorCorrectionLevel) -> Vec<u8> {
    let capacity = version.data_bit_capacity(level);
    let mut buffer = BitBuffer::with_capacity(capacity / 8);
    segment.write(version, &mut buffer);

    // Terminator, cut short when the symbol is nearly full
    let terminator = (capacity - buffer.bit_len()).min(4);
    buffer.append_number(0, terminator);

    let (_, partial_bits) = buffer.byte_bit_len();
    if partial_bits != 0 {
        buffer.append_number(0, 8 - partial_bits);
    }

    for &pad in PAD_BYTES.iter().cycle() {
        if buffer.bit_len() >= capacity {
            break;
        }
        buffer.append_byte(pad);
    }

    buffer.into_bytes()
}
