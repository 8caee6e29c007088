//! Integration tests for the encoding + error correction pipeline
//! Tests codeword streams as they leave the encoding crate

use tiny_qr_core::{ErrorCorrectionLevel, QrError, Version};
use tiny_qr_encoding::{
    BlockLayout, CharacterSet, ErrorCorrectionRestriction, Segment, VersionRestriction,
    add_error_correction, encode_bytes, encode_text,
};

fn version(number: u8) -> Version {
    Version::new(number).unwrap()
}

#[test]
fn test_hello_world_codewords() {
    let encoded = encode_text(
        VersionRestriction::Specific(version(1)),
        ErrorCorrectionRestriction::Specific(ErrorCorrectionLevel::Quartile),
        "HELLO WORLD",
    )
    .unwrap();
    let corrected = add_error_correction(encoded).unwrap();

    assert_eq!(
        corrected.codewords,
        [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 168, 72, 22, 82, 217, 54,
            156, 0, 46, 15, 180, 122, 16
        ]
    );
}

#[test]
fn test_codeword_count_matches_every_version() {
    let text = "tiny-qr";
    for number in 1..=40 {
        for level in ErrorCorrectionLevel::ALL {
            let encoded = encode_text(
                VersionRestriction::Specific(version(number)),
                ErrorCorrectionRestriction::Specific(level),
                text,
            )
            .unwrap();
            let corrected = add_error_correction(encoded).unwrap();
            assert_eq!(
                corrected.codewords.len(),
                version(number).total_codewords(),
                "version {number}-{level}"
            );
        }
    }
}

#[test]
fn test_interleaved_data_comes_first() {
    // 5-Q: two blocks of 15 and two of 16 data codewords
    let bytes: Vec<u8> = (0..58).collect();
    let encoded = encode_bytes(
        VersionRestriction::Specific(version(5)),
        ErrorCorrectionRestriction::Specific(ErrorCorrectionLevel::Quartile),
        &bytes,
    )
    .unwrap();
    let data = encoded.codewords.clone();
    let corrected = add_error_correction(encoded).unwrap();

    let layout = BlockLayout::new(version(5), ErrorCorrectionLevel::Quartile);
    let starts: Vec<usize> = layout.blocks().map(|block| block.data_offset).collect();
    assert_eq!(starts, [0, 15, 30, 46]);
    let first_column: Vec<u8> = starts.iter().map(|&start| data[start]).collect();
    assert_eq!(&corrected.codewords[..4], first_column.as_slice());
    // The extra codeword of the long blocks follows the shared columns
    assert_eq!(corrected.codewords[60], data[45]);
    assert_eq!(corrected.codewords[61], data[61]);
}

#[test]
fn test_character_sets_pick_smallest_symbol() {
    let cases = [
        ("12345678901234567890", CharacterSet::Numeric),
        ("HTTPS://EXAMPLE.COM", CharacterSet::Alphanumeric),
        ("https://example.com", CharacterSet::Iso8859_1),
        ("naïve café", CharacterSet::Iso8859_1),
        ("snow ☃", CharacterSet::Utf8),
    ];
    for (text, expected) in cases {
        assert_eq!(Segment::from_text(text).character_set(), expected, "{text}");
        let encoded = encode_text(
            VersionRestriction::default(),
            ErrorCorrectionRestriction::Min(ErrorCorrectionLevel::Low),
            text,
        )
        .unwrap();
        assert!(encoded.version.number() <= 3, "{text}");
    }
}

#[test]
fn test_data_too_long_reports_limits() {
    let error = encode_bytes(
        VersionRestriction::default(),
        ErrorCorrectionRestriction::Min(ErrorCorrectionLevel::High),
        &vec![0; 1274],
    )
    .unwrap_err();

    assert_eq!(
        error,
        QrError::DataTooLong {
            bits: 4 + 16 + 1274 * 8,
            capacity: 1276 * 8,
            version: Version::MAX,
            level: ErrorCorrectionLevel::High,
        }
    );
}
