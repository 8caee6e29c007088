//! Integration tests for the encoding + matrix pipeline
//! Tests finished symbols built through the facade crate

use proptest::prelude::*;
use tiny_qr::{Color, ErrorCorrectionLevel, MaskPattern, QrCode, QrError, Version};

fn dark_modules(code: &QrCode) -> usize {
    code.rows().flatten().filter(|color| color.is_dark()).count()
}

#[test]
fn test_default_symbol() {
    let code = QrCode::encode_text("HTTPS://EXAMPLE.COM").unwrap();

    assert_eq!(code.version(), Version::new(2).unwrap());
    assert_eq!(code.error_correction_level(), ErrorCorrectionLevel::High);
    assert_eq!(code.size(), 25);
    // Alignment pattern centre of version 2
    assert_eq!(code.color(18, 18), Color::Black);
    assert_eq!(code.color(17, 18), Color::White);
}

#[test]
fn test_forced_masks_differ() {
    let build = |mask| {
        QrCode::generator()
            .with_text("MASKS")
            .with_mask_reference(mask)
            .build()
            .unwrap()
    };
    let codes: Vec<QrCode> = (0..8).map(build).collect();
    for (reference, code) in codes.iter().enumerate() {
        assert_eq!(
            code.mask_pattern(),
            MaskPattern::new(u8::try_from(reference).unwrap()).unwrap()
        );
    }
    for pair in codes.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn test_large_symbol_has_version_information() {
    let text = "A".repeat(400);
    let code = QrCode::generator()
        .with_text(&text)
        .with_specific_error_correction_level(ErrorCorrectionLevel::Low)
        .build()
        .unwrap();

    assert!(code.version().number() >= 7);
    let size = code.size();
    for i in 0..18 {
        assert_eq!(
            code.color(i / 3, size - 11 + i % 3),
            code.color(size - 11 + i % 3, i / 3)
        );
    }
}

#[test]
fn test_balance_is_reasonable() {
    let code = QrCode::encode_text("The quick brown fox jumps over the lazy dog").unwrap();
    let total = code.size() * code.size();
    let percent = dark_modules(&code) * 100 / total;
    assert!((30..=70).contains(&percent), "{percent}% dark");
}

#[test]
fn test_display_and_draw_iter_agree() {
    let code = QrCode::encode_text("01234567").unwrap();
    let drawn = code.draw_iter().filter(|pixel| pixel.color.is_dark()).count();
    assert_eq!(drawn, dark_modules(&code));
    assert_eq!(code.to_string().lines().count(), code.size().div_ceil(2));
}

#[test]
fn test_errors_surface_through_builder() {
    assert_eq!(
        QrCode::generator().with_text("x").with_max_version(0).build(),
        Err(QrError::InvalidVersion { version: 0 })
    );
    let error = QrCode::generator()
        .with_bytes(&[0; 20])
        .with_specific_version(1)
        .with_specific_error_correction_level(ErrorCorrectionLevel::Low)
        .build()
        .unwrap_err();
    assert!(error.to_string().starts_with("tiny-qr: ERR_DATA_TOO_LONG"));
}

proptest! {
    #[test]
    fn test_forced_settings_are_honoured(
        bytes in proptest::collection::vec(any::<u8>(), 0..40),
        level in 0usize..4,
        mask in 0u8..8,
    ) {
        let level = ErrorCorrectionLevel::ALL[level];
        let code = QrCode::generator()
            .with_bytes(&bytes)
            .with_specific_error_correction_level(level)
            .with_mask_reference(mask)
            .build()
            .unwrap();
        prop_assert_eq!(code.error_correction_level(), level);
        prop_assert_eq!(code.mask_pattern().reference(), mask);
        prop_assert!(code.version().number() <= 6);
    }
}
