//! Character encoding detection for HTML report files.
//!
//! Reports exported by legacy tooling arrive in a mix of UTF-8, UTF-16 and
//! Windows code pages. Detection priority:
//!
//! 1. BOM (most reliable)
//! 2. UTF-8 validation
//! 3. chardetng statistical detection for legacy encodings

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

/// Detected character encoding of a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedEncoding {
    /// UTF-8, with or without BOM.
    Utf8 {
        /// Whether a BOM was present.
        bom: bool,
    },
    /// UTF-16 Little Endian.
    Utf16Le,
    /// UTF-16 Big Endian.
    Utf16Be,
    /// Legacy encoding guessed by chardetng (e.g. Windows-1252).
    Legacy(&'static Encoding),
}

impl std::fmt::Display for DetectedEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utf8 { bom: false } => write!(f, "UTF-8"),
            Self::Utf8 { bom: true } => write!(f, "UTF-8 with BOM"),
            Self::Utf16Le => write!(f, "UTF-16 LE"),
            Self::Utf16Be => write!(f, "UTF-16 BE"),
            Self::Legacy(enc) => write!(f, "{}", enc.name()),
        }
    }
}

/// UTF-8 BOM: EF BB BF
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
/// UTF-16 LE BOM: FF FE
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
/// UTF-16 BE BOM: FE FF
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Detect the character encoding of a byte buffer.
#[must_use]
pub fn detect_encoding(buffer: &[u8]) -> DetectedEncoding {
    if buffer.starts_with(UTF8_BOM) {
        return DetectedEncoding::Utf8 { bom: true };
    }
    if buffer.starts_with(UTF16_LE_BOM) {
        return DetectedEncoding::Utf16Le;
    }
    if buffer.starts_with(UTF16_BE_BOM) {
        return DetectedEncoding::Utf16Be;
    }

    if std::str::from_utf8(buffer).is_ok() {
        return DetectedEncoding::Utf8 { bom: false };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(buffer, true);
    let encoding = detector.guess(None, true);
    DetectedEncoding::Legacy(encoding)
}

/// Decode a byte buffer to a UTF-8 string, detecting the encoding first.
///
/// Invalid sequences become U+FFFD replacement characters; decoding never
/// fails outright.
#[must_use]
pub fn decode_to_utf8(buffer: &[u8]) -> (String, DetectedEncoding) {
    let encoding = detect_encoding(buffer);
    let text = match &encoding {
        DetectedEncoding::Utf8 { bom: false } => String::from_utf8_lossy(buffer).into_owned(),
        DetectedEncoding::Utf8 { bom: true } => {
            String::from_utf8_lossy(&buffer[UTF8_BOM.len()..]).into_owned()
        }
        DetectedEncoding::Utf16Le => {
            let (cow, _, _) = UTF_16LE.decode(&buffer[UTF16_LE_BOM.len()..]);
            cow.into_owned()
        }
        DetectedEncoding::Utf16Be => {
            let (cow, _, _) = UTF_16BE.decode(&buffer[UTF16_BE_BOM.len()..]);
            cow.into_owned()
        }
        DetectedEncoding::Legacy(enc) => {
            let (cow, _, _) = enc.decode(buffer);
            cow.into_owned()
        }
    };
    (text, encoding)
}
