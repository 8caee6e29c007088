//! Decode finished symbols with an independent reader
//! Pins multi-block interleaving, alignment grids and version information

use tiny_qr::{ErrorCorrectionLevel, QrCode};

const PIXELS_PER_MODULE: usize = 4;

/// Rasterise `code` with its quiet zone and read it back
fn decode(code: &QrCode) -> (usize, u16, String) {
    let modules = code.draw_iter();
    let width = modules.width();
    let dark: Vec<bool> = modules.map(|pixel| pixel.color.is_dark()).collect();

    let side = width * PIXELS_PER_MODULE;
    let mut image = rqrr::PreparedImage::prepare_from_greyscale(side, side, |x, y| {
        let index = (y / PIXELS_PER_MODULE) * width + x / PIXELS_PER_MODULE;
        if dark[index] { 0 } else { 255 }
    });
    let grids = image.detect_grids();
    assert_eq!(grids.len(), 1, "one symbol in the image");

    let (meta, content) = grids[0].decode().expect("symbol decodes");
    (meta.version.0, meta.mask, content)
}

fn build(text: &str, version: u8, level: ErrorCorrectionLevel, mask: Option<u8>) -> QrCode {
    let generator = QrCode::generator()
        .with_text(text)
        .with_specific_version(version)
        .with_specific_error_correction_level(level);
    match mask {
        Some(mask) => generator.with_mask_reference(mask).build(),
        None => generator.build(),
    }
    .unwrap()
}

#[test]
fn test_decode_interleaved_5q() {
    let text = "HELLO WORLD, THIS IS A VERSION 5 SYMBOL";
    let code = build(text, 5, ErrorCorrectionLevel::Quartile, None);

    let (version, mask, content) = decode(&code);
    assert_eq!(version, 5);
    assert_eq!(mask, u16::from(code.mask_pattern().reference()));
    assert_eq!(content, text);
}

#[test]
fn test_decode_version_information() {
    let text = "https://example.com/a/longer/path?with=query";
    for number in [7, 14, 21] {
        let code = build(text, number, ErrorCorrectionLevel::Medium, None);

        let (version, _, content) = decode(&code);
        assert_eq!(version, usize::from(number));
        assert_eq!(content, text);
    }
}

#[test]
fn test_decode_every_mask() {
    let text = "01234567890123456789";
    for reference in 0..8 {
        let code = build(text, 8, ErrorCorrectionLevel::High, Some(reference));

        let (version, mask, content) = decode(&code);
        assert_eq!(version, 8);
        assert_eq!(mask, u16::from(reference));
        assert_eq!(content, text);
    }
}

#[test]
fn test_decode_largest_symbol() {
    let text = "tiny-qr ".repeat(200);
    let code = build(&text, 40, ErrorCorrectionLevel::Low, None);

    let (version, _, content) = decode(&code);
    assert_eq!(version, 40);
    assert_eq!(content, text);
}

#[test]
fn test_decode_default_selection() {
    let text = "The quick brown fox jumps over the lazy dog";
    let code = QrCode::encode_text(text).unwrap();

    let (version, _, content) = decode(&code);
    assert_eq!(version, usize::from(code.version().number()));
    assert_eq!(content, text);
}
