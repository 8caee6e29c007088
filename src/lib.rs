//! tiny-qr: a QR code encoder
//!
//! Re-exports the workspace crates behind one import path.
//!
//! ```
//! use tiny_qr::{ErrorCorrectionLevel, QrCode};
//!
//! let code = QrCode::generator()
//!     .with_text("HELLO WORLD")
//!     .with_min_error_correction_level(ErrorCorrectionLevel::Quartile)
//!     .build()
//!     .unwrap();
//! // The level is raised to H first, which needs version 2
//! assert_eq!(code.error_correction_level(), ErrorCorrectionLevel::High);
//! assert_eq!(code.version().number(), 2);
//! println!("{code}");
//! ```

#![no_std]

pub use tiny_qr_core::{
    Color, EncodingMode, ErrorCorrectionLevel, MaskPattern, QrError, Version,
};
pub use tiny_qr_encoding::{
    BitBuffer, CharacterSet, EncodedData, ErrorCorrectedData, ErrorCorrectionRestriction,
    Segment, VersionRestriction, add_error_correction, encode_bytes, encode_text,
};
pub use tiny_qr_matrix::{
    CoordinatedColor, DrawIterator, Grid, Matrix, Module, QrCode, QrCodeGenerator, render_text,
};
