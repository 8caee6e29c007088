//! BCH-protected format and version information

use tiny_qr_core::{ErrorCorrectionLevel, MaskPattern, Version};

const FORMAT_GENERATOR: u32 = 0x537;
const FORMAT_MASK: u32 = 0x5412;
const VERSION_GENERATOR: u32 = 0x1F25;

/// Remainder of `data << degree` divided by `generator` over GF(2)
const fn bch_remainder(data: u32, generator: u32, degree: u32) -> u32 {
    let mut rem = data;
    let mut step = 0;
    while step < degree {
        rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
        step += 1;
    }
    rem & ((1 << degree) - 1)
}

/// 15-bit format information: level and mask, BCH(15, 5), XOR-masked
#[must_use]
pub const fn format_bits(level: ErrorCorrectionLevel, mask: MaskPattern) -> u16 {
    let data = ((level.format_bits() as u32) << 3) | mask.reference() as u32;
    let bits = ((data << 10) | bch_remainder(data, FORMAT_GENERATOR, 10)) ^ FORMAT_MASK;
    bits as u16
}

/// 18-bit version information, BCH(18, 6); only drawn from version 7 up
#[must_use]
pub const fn version_bits(version: Version) -> u32 {
    let data = version.number() as u32;
    (data << 12) | bch_remainder(data, VERSION_GENERATOR, 12)
}
