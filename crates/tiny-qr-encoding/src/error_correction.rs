//! Reed–Solomon error correction over the data codewords

use alloc::vec::Vec;

use reed_solomon::Encoder;
use tiny_qr_core::{ErrorCorrectionLevel, QrError, Version};

use crate::blocks::BlockLayout;
use crate::select::EncodedData;

/// Final codeword sequence: interleaved data followed by interleaved ECC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCorrectedData {
    pub version: Version,
    pub error_correction: ErrorCorrectionLevel,
    pub codewords: Vec<u8>,
}

/// Compute ECC for every block and interleave the result
///
/// # Errors
///
/// Returns `QrError::CodewordCount` if `data` does not hold exactly the
/// data codewords of its version and level
pub fn add_error_correction(data: EncodedData) -> Result<ErrorCorrectedData, QrError> {
    let expected = data.version.data_codewords(data.error_correction);
    if data.codewords.len() != expected {
        return Err(QrError::CodewordCount {
            expected,
            actual: data.codewords.len(),
        });
    }

    let layout = BlockLayout::new(data.version, data.error_correction);

    let encoder = Encoder::new(layout.ecc_len());
    let ecc: Vec<Vec<u8>> = layout
        .blocks()
        .map(|spec| {
            let block = &data.codewords[spec.data_offset..spec.data_offset + spec.data_len];
            encoder.encode(block).ecc().to_vec()
        })
        .collect();

    Ok(ErrorCorrectedData {
        version: data.version,
        error_correction: data.error_correction,
        codewords: layout.interleave(&data.codewords, &ecc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(number: u8, level: ErrorCorrectionLevel, codewords: &[u8]) -> EncodedData {
        EncodedData {
            version: Version::new(number).unwrap(),
            error_correction: level,
            codewords: codewords.to_vec(),
        }
    }

    #[test]
    fn test_error_correction_1m() {
        // "01234567" as version 1-M
        let data = encoded(
            1,
            ErrorCorrectionLevel::Medium,
            &[
                0b0001_0000, 0b0010_0000, 0b0000_1100, 0b0101_0110, 0b0110_0001, 0b1000_0000,
                0b1110_1100, 0b0001_0001, 0b1110_1100, 0b0001_0001, 0b1110_1100, 0b0001_0001,
                0b1110_1100, 0b0001_0001, 0b1110_1100, 0b0001_0001,
            ],
        );

        let corrected = add_error_correction(data).unwrap();
        assert_eq!(corrected.codewords.len(), 26);
        assert_eq!(
            &corrected.codewords[16..],
            [
                0b1010_0101, 0b0010_0100, 0b1101_0100, 0b1100_0001, 0b1110_1101, 0b0011_0110,
                0b1100_0111, 0b1000_0111, 0b0010_1100, 0b0101_0101
            ]
        );
    }

    #[test]
    fn test_error_correction_1q() {
        // "HELLO WORLD" as version 1-Q
        let data = encoded(
            1,
            ErrorCorrectionLevel::Quartile,
            &[32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236],
        );

        let corrected = add_error_correction(data).unwrap();
        assert_eq!(
            corrected.codewords,
            [
                32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 168, 72, 22, 82, 217,
                54, 156, 0, 46, 15, 180, 122, 16
            ]
        );
    }

    #[test]
    fn test_error_correction_5q_interleaved() {
        let data = encoded(
            5,
            ErrorCorrectionLevel::Quartile,
            &[
                67, 85, 70, 134, 87, 38, 85, 194, 119, 50, 6, 18, 6, 103, 38, 246, 246, 66, 7,
                118, 134, 242, 7, 38, 86, 22, 198, 199, 146, 6, 182, 230, 247, 119, 50, 7, 118,
                134, 87, 38, 82, 6, 134, 151, 50, 7, 70, 247, 118, 86, 194, 6, 151, 50, 16, 236,
                17, 236, 17, 236, 17, 236,
            ],
        );

        let corrected = add_error_correction(data).unwrap();
        assert_eq!(corrected.codewords.len(), 134);
        assert_eq!(
            corrected.codewords,
            [
                67, 246, 182, 70, 85, 246, 230, 247, 70, 66, 247, 118, 134, 7, 119, 86, 87, 118,
                50, 194, 38, 134, 7, 6, 85, 242, 118, 151, 194, 7, 134, 50, 119, 38, 87, 16, 50,
                86, 38, 236, 6, 22, 82, 17, 18, 198, 6, 236, 6, 199, 134, 17, 103, 146, 151, 236,
                38, 6, 50, 17, 7, 236, 213, 87, 148, 235, 199, 204, 116, 159, 11, 96, 177, 5, 45,
                60, 212, 173, 115, 202, 76, 24, 247, 182, 133, 147, 241, 124, 75, 59, 223, 157,
                242, 33, 229, 200, 238, 106, 248, 134, 76, 40, 154, 27, 195, 255, 117, 129, 230,
                172, 154, 209, 189, 82, 111, 17, 10, 2, 86, 163, 108, 131, 161, 163, 240, 32, 111,
                120, 192, 178, 39, 133, 141, 236,
            ]
        );
    }

    #[test]
    fn test_wrong_codeword_count() {
        let short = encoded(1, ErrorCorrectionLevel::Medium, &[0x10, 0x20]);
        assert_eq!(
            add_error_correction(short),
            Err(QrError::CodewordCount {
                expected: 16,
                actual: 2,
            })
        );

        let long = encoded(1, ErrorCorrectionLevel::High, &[0; 10]);
        assert_eq!(
            add_error_correction(long),
            Err(QrError::CodewordCount {
                expected: 9,
                actual: 10,
            })
        );
    }
}
