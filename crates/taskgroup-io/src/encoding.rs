//! Encoding detection and decoding for input files.

use encoding_rs::SHIFT_JIS;
use taskgroup_core::config::TextEncoding;
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Guess the encoding of raw file contents: a UTF-8 BOM wins, then strict
/// UTF-8, then Shift_JIS. Anything else is reported as UTF-8 and will fail
/// to decode.
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    let detected = if bytes.starts_with(UTF8_BOM) {
        TextEncoding::Utf8Bom
    } else if std::str::from_utf8(bytes).is_ok() {
        TextEncoding::Utf8
    } else if SHIFT_JIS
        .decode_without_bom_handling_and_without_replacement(bytes)
        .is_some()
    {
        TextEncoding::ShiftJis
    } else {
        TextEncoding::Utf8
    };
    debug!(encoding = detected.label(), "encoding detected");
    detected
}

/// Decode without replacement characters. A leading UTF-8 BOM is dropped for
/// both UTF-8 variants. Returns `None` on malformed input.
pub fn decode(bytes: &[u8], encoding: TextEncoding) -> Option<String> {
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            std::str::from_utf8(body).ok().map(str::to_owned)
        }
        TextEncoding::ShiftJis => SHIFT_JIS
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned()),
    }
}
