//! Symbol construction for tiny-qr
//!
//! Places error-corrected codewords into the module grid, draws the
//! function patterns, selects a mask and renders the finished symbol.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod format;
mod grid;
mod mask;
mod matrix;
mod qrcode;
mod render;

pub use format::{format_bits, version_bits};
pub use grid::{Coordinate, Grid};
pub use mask::{apply as apply_mask, best as best_mask, penalty};
pub use matrix::{Matrix, Module};
pub use qrcode::{QrCode, QrCodeGenerator};
pub use render::{CoordinatedColor, DrawIterator, MAX_QUIET_ZONE, render_text};
