//! Pixel and terminal output for finished symbols

use alloc::string::String;
use core::fmt;

use tiny_qr_core::Color;

use crate::qrcode::QrCode;

/// Light modules required around the symbol by the standard
const QUIET_ZONE: usize = 4;

/// Widest quiet zone `render_text` draws
pub const MAX_QUIET_ZONE: usize = 64;

/// One pixel of a symbol drawing; `x` is the column, `y` the row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatedColor {
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

/// Row-major walk over a symbol surrounded by a light quiet zone
#[derive(Debug, Clone)]
pub struct DrawIterator<'a> {
    code: &'a QrCode,
    x: usize,
    y: usize,
}

impl<'a> DrawIterator<'a> {
    pub(crate) const fn new(code: &'a QrCode) -> Self {
        Self { code, x: 0, y: 0 }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.code.size() + 2 * QUIET_ZONE
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.code.size() + 2 * QUIET_ZONE
    }

    fn color_at(&self, x: usize, y: usize) -> Color {
        let size = self.code.size();
        let inside = (QUIET_ZONE..QUIET_ZONE + size).contains(&x)
            && (QUIET_ZONE..QUIET_ZONE + size).contains(&y);
        if inside {
            self.code.color(y - QUIET_ZONE, x - QUIET_ZONE)
        } else {
            Color::White
        }
    }
}

impl Iterator for DrawIterator<'_> {
    type Item = CoordinatedColor;

    fn next(&mut self) -> Option<Self::Item> {
        if self.y >= self.height() {
            return None;
        }
        let item = CoordinatedColor {
            x: self.x,
            y: self.y,
            color: self.color_at(self.x, self.y),
        };
        self.x += 1;
        if self.x >= self.width() {
            self.x = 0;
            self.y += 1;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.height() - self.y) * self.width() - self.x;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DrawIterator<'_> {}

/// Half-block text art, two module rows per line
///
/// `quiet_zone` light modules surround the symbol, capped at
/// [`MAX_QUIET_ZONE`]. With `invert` dark modules are drawn as blanks,
/// which suits light-on-dark terminals.
#[must_use]
pub fn render_text(code: &QrCode, quiet_zone: usize, invert: bool) -> String {
    let quiet_zone = quiet_zone.min(MAX_QUIET_ZONE);
    let size = code.size();
    let span = size + 2 * quiet_zone;
    let dark = |row: usize, col: usize| -> bool {
        let inside = (quiet_zone..quiet_zone + size).contains(&row)
            && (quiet_zone..quiet_zone + size).contains(&col);
        let module = inside && code.is_dark(row - quiet_zone, col - quiet_zone);
        module != invert
    };

    let mut out = String::with_capacity((span + 1) * span.div_ceil(2) * 3);
    for upper in (0..span).step_by(2) {
        for col in 0..span {
            let top = dark(upper, col);
            let bottom = upper + 1 < span && dark(upper + 1, col);
            out.push(match (top, bottom) {
                (true, true) => '\u{2588}',
                (true, false) => '\u{2580}',
                (false, true) => '\u{2584}',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }
    out
}

impl fmt::Display for QrCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_text(self, 0, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> QrCode {
        QrCode::generator()
            .with_text("HELLO WORLD")
            .with_max_version(1)
            .with_min_error_correction_level(tiny_qr_core::ErrorCorrectionLevel::Quartile)
            .with_mask_reference(6)
            .build()
            .unwrap()
    }

    #[test]
    fn test_draw_iterator_dimensions() {
        let code = code();
        let iter = code.draw_iter();
        assert_eq!(iter.width(), 29);
        assert_eq!(iter.height(), 29);
        assert_eq!(iter.len(), 29 * 29);

        let pixels: Vec<CoordinatedColor> = code.draw_iter().collect();
        assert_eq!(pixels.len(), 29 * 29);
        assert_eq!((pixels[0].x, pixels[0].y), (0, 0));
        assert_eq!(pixels[0].color, Color::White);
        assert_eq!(pixels[30].x, 1);
        assert_eq!(pixels[30].y, 1);
    }

    #[test]
    fn test_draw_iterator_matches_symbol() {
        let code = code();
        for pixel in code.draw_iter() {
            let expected = if (4..25).contains(&pixel.x) && (4..25).contains(&pixel.y) {
                code.color(pixel.y - 4, pixel.x - 4)
            } else {
                Color::White
            };
            assert_eq!(pixel.color, expected, "({}, {})", pixel.x, pixel.y);
        }
    }

    #[test]
    fn test_display_half_blocks() {
        let text = code().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines.iter().all(|line| line.chars().count() == 21));
        // Finder edge over the finder's light ring
        assert!(lines[0].starts_with("█▀▀▀▀▀█"));
        // The odd last row only fills upper halves
        assert!(lines[10].chars().all(|c| c == '\u{2580}' || c == ' '));
    }

    #[test]
    fn test_render_text_quiet_zone_and_invert() {
        let code = code();
        let text = render_text(&code, 2, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], " ".repeat(25));

        let inverted = render_text(&code, 2, true);
        assert_eq!(inverted.lines().next(), Some("\u{2588}".repeat(25).as_str()));
        assert_ne!(text, inverted);
    }

    #[test]
    fn test_render_text_caps_quiet_zone() {
        let code = code();
        let span = 21 + 2 * MAX_QUIET_ZONE;
        let text = render_text(&code, usize::MAX, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), span.div_ceil(2));
        assert!(lines.iter().all(|line| line.chars().count() == span));
        assert_eq!(text, render_text(&code, MAX_QUIET_ZONE, false));
    }
}
