//! Error correction block layout and codeword interleaving

use alloc::vec::Vec;
use tiny_qr_core::{ErrorCorrectionLevel, Version};

/// Position and size of one error correction block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub index: usize,
    pub data_offset: usize,
    pub data_len: usize,
    pub ecc_len: usize,
}

/// How the data codewords of a version/level split into blocks
///
/// Short blocks come first; the remaining blocks carry one extra data
/// codeword. Every block has the same number of ECC codewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    block_count: usize,
    short_blocks: usize,
    short_data_len: usize,
    ecc_len: usize,
}

impl BlockLayout {
    #[must_use]
    pub const fn new(version: Version, level: ErrorCorrectionLevel) -> Self {
        let block_count = version.block_count(level);
        let data_len = version.data_codewords(level);
        Self {
            block_count,
            short_blocks: block_count - data_len % block_count,
            short_data_len: data_len / block_count,
            ecc_len: version.ecc_codewords_per_block(level),
        }
    }

    #[must_use]
    pub const fn block_count(&self) -> usize {
        self.block_count
    }

    #[must_use]
    pub const fn ecc_len(&self) -> usize {
        self.ecc_len
    }

    /// Blocks in stream order
    pub fn blocks(&self) -> impl Iterator<Item = BlockSpec> + '_ {
        (0..self.block_count).map(move |index| {
            let long_before = index.saturating_sub(self.short_blocks);
            let data_len = if index < self.short_blocks {
                self.short_data_len
            } else {
                self.short_data_len + 1
            };
            BlockSpec {
                index,
                data_offset: index * self.short_data_len + long_before,
                data_len,
                ecc_len: self.ecc_len,
            }
        })
    }

    /// Interleave per-block data then per-block ECC, column by column
    ///
    /// `data` is the contiguous data codeword stream; `ecc` holds one ECC
    /// vector per block in block order.
    #[must_use]
    pub fn interleave(&self, data: &[u8], ecc: &[Vec<u8>]) -> Vec<u8> {
        let specs: Vec<BlockSpec> = self.blocks().collect();
        let mut out = Vec::with_capacity(data.len() + self.block_count * self.ecc_len);

        for column in 0..=self.short_data_len {
            for spec in specs.iter().filter(|spec| column < spec.data_len) {
                out.push(data[spec.data_offset + column]);
            }
        }
        for column in 0..self.ecc_len {
            for block in ecc {
                out.push(block[column]);
            }
        }
        out
    }
}
