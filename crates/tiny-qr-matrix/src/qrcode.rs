//! Finished symbols and the builder that produces them

use core::fmt::{self, Write};

use tiny_qr_core::{Color, ErrorCorrectionLevel, MaskPattern, QrError, Version};
use tiny_qr_encoding::{
    ErrorCorrectedData, ErrorCorrectionRestriction, VersionRestriction, add_error_correction,
    encode_bytes, encode_text,
};
use tracing::debug;

use crate::grid::Grid;
use crate::mask;
use crate::matrix::Matrix;
use crate::render::DrawIterator;

/// A complete, masked QR code symbol
#[derive(Clone, PartialEq, Eq)]
pub struct QrCode {
    version: Version,
    error_correction: ErrorCorrectionLevel,
    mask: MaskPattern,
    modules: Grid<Color>,
}

impl QrCode {
    /// Start configuring a new symbol
    ///
    /// # Example
    ///```
    /// use tiny_qr_core::ErrorCorrectionLevel;
    /// use tiny_qr_matrix::QrCode;
    ///
    /// let code = QrCode::generator()
    ///     .with_text("HELLO WORLD")
    ///     .with_max_version(1)
    ///     .with_min_error_correction_level(ErrorCorrectionLevel::Quartile)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(code.size(), 21);
    /// assert_eq!(code.error_correction_level(), ErrorCorrectionLevel::Quartile);
    ///```
    #[must_use]
    pub fn generator<'a>() -> QrCodeGenerator<'a> {
        QrCodeGenerator::default()
    }

    /// Encode `text` with the default settings
    ///
    /// # Errors
    ///
    /// Returns `QrError::DataTooLong` if the text does not fit version 40
    pub fn encode_text(text: &str) -> Result<Self, QrError> {
        Self::generator().with_text(text).build()
    }

    /// Lay out error-corrected codewords and mask them
    ///
    /// With no `mask` the pattern with the lowest penalty is used.
    ///
    /// # Errors
    ///
    /// Returns `QrError::CodewordCount` if `data` does not hold exactly the
    /// total codewords of its version
    pub fn from_data(
        data: &ErrorCorrectedData,
        mask: Option<MaskPattern>,
    ) -> Result<Self, QrError> {
        let mut matrix = Matrix::new(data.version);
        matrix.place_codewords(&data.codewords)?;

        let (mask, matrix) = match mask {
            Some(pattern) => (pattern, mask::masked(&matrix, data.error_correction, pattern)),
            None => mask::best(&matrix, data.error_correction),
        };
        debug!(
            version = data.version.number(),
            level = %data.error_correction,
            mask = mask.reference(),
            "symbol assembled"
        );

        Ok(Self {
            version: data.version,
            error_correction: data.error_correction,
            mask,
            modules: matrix.colors(),
        })
    }

    /// Width and height in modules
    #[must_use]
    pub const fn size(&self) -> usize {
        self.modules.size()
    }

    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    #[must_use]
    pub const fn error_correction_level(&self) -> ErrorCorrectionLevel {
        self.error_correction
    }

    #[must_use]
    pub const fn mask_pattern(&self) -> MaskPattern {
        self.mask
    }

    /// Color at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the symbol
    #[must_use]
    pub fn color(&self, row: usize, col: usize) -> Color {
        self.modules[(row, col)]
    }

    #[must_use]
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.modules
            .get(row, col)
            .is_some_and(Color::is_dark)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Color]> + '_ {
        self.modules.rows()
    }

    #[must_use]
    pub const fn modules(&self) -> &Grid<Color> {
        &self.modules
    }

    /// Pixels of the symbol plus a quiet zone, for image output
    #[must_use]
    pub const fn draw_iter(&self) -> DrawIterator<'_> {
        DrawIterator::new(self)
    }
}

impl fmt::Debug for QrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for color in row {
                f.write_char(if color.is_dark() { '\u{2588}' } else { '_' })?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestedVersion {
    Max(u8),
    Specific(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Payload<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

/// Builder for [`QrCode`]
///
/// Numbers are validated in [`QrCodeGenerator::build`], so every setter can
/// be chained without intermediate error handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeGenerator<'a> {
    version: RequestedVersion,
    error_correction: ErrorCorrectionRestriction,
    mask_reference: Option<u8>,
    payload: Option<Payload<'a>>,
}

impl Default for QrCodeGenerator<'_> {
    fn default() -> Self {
        Self {
            version: RequestedVersion::Max(Version::MAX.number()),
            error_correction: ErrorCorrectionRestriction::default(),
            mask_reference: None,
            payload: None,
        }
    }
}

impl<'a> QrCodeGenerator<'a> {
    /// Use the smallest version up to `max_version` that fits
    #[must_use]
    pub const fn with_max_version(mut self, max_version: u8) -> Self {
        self.version = RequestedVersion::Max(max_version);
        self
    }

    /// Always use `version`, even when a smaller one would fit
    #[must_use]
    pub const fn with_specific_version(mut self, version: u8) -> Self {
        self.version = RequestedVersion::Specific(version);
        self
    }

    /// Use at least `level`, raised as far as the data still fits
    #[must_use]
    pub const fn with_min_error_correction_level(mut self, level: ErrorCorrectionLevel) -> Self {
        self.error_correction = ErrorCorrectionRestriction::Min(level);
        self
    }

    #[must_use]
    pub const fn with_specific_error_correction_level(
        mut self,
        level: ErrorCorrectionLevel,
    ) -> Self {
        self.error_correction = ErrorCorrectionRestriction::Specific(level);
        self
    }

    /// Force a mask pattern instead of picking the lowest penalty
    #[must_use]
    pub const fn with_mask_reference(mut self, mask_reference: u8) -> Self {
        self.mask_reference = Some(mask_reference);
        self
    }

    #[must_use]
    pub const fn with_text(mut self, text: &'a str) -> Self {
        self.payload = Some(Payload::Text(text));
        self
    }

    #[must_use]
    pub const fn with_bytes(mut self, bytes: &'a [u8]) -> Self {
        self.payload = Some(Payload::Bytes(bytes));
        self
    }

    /// Encode, lay out and mask the symbol
    ///
    /// # Errors
    ///
    /// Returns `QrError::InvalidVersion` or `QrError::InvalidMask` for out of
    /// range settings, `QrError::NoData` if neither text nor bytes were set,
    /// and `QrError::DataTooLong` if the payload does not fit
    pub fn build(self) -> Result<QrCode, QrError> {
        let version_restriction = match self.version {
            RequestedVersion::Max(number) => VersionRestriction::Max(Version::new(number)?),
            RequestedVersion::Specific(number) => {
                VersionRestriction::Specific(Version::new(number)?)
            }
        };
        let mask = self.mask_reference.map(MaskPattern::new).transpose()?;

        let encoded = match self.payload.ok_or(QrError::NoData)? {
            Payload::Text(text) => encode_text(version_restriction, self.error_correction, text)?,
            Payload::Bytes(bytes) => {
                encode_bytes(version_restriction, self.error_correction, bytes)?
            }
        };
        let corrected = add_error_correction(encoded)?;
        QrCode::from_data(&corrected, mask)
    }
}
