//! Data encoding for tiny-qr
//!
//! Turns text or bytes into the final codeword sequence of a symbol:
//! character set detection, version and level selection, padding,
//! Reed–Solomon error correction and block interleaving.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod blocks;
mod buffer;
mod error_correction;
mod segment;
mod select;

pub use blocks::{BlockLayout, BlockSpec};
pub use buffer::BitBuffer;
pub use error_correction::{ErrorCorrectedData, add_error_correction};
pub use segment::{CharacterSet, Segment};
pub use select::{
    EncodedData, ErrorCorrectionRestriction, VersionRestriction, encode_bytes, encode_segment,
    encode_text,
};
