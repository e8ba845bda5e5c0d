//! PDF text-string decoding and encoding.
//!
//! Field names, values and labels are PDF text strings: either UTF-16BE with
//! a byte-order mark, or single-byte PDFDocEncoding. Decoding is best-effort
//! and never fails; bytes that cannot be decoded are dropped.

const UTF16BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// PDFDocEncoding code points for bytes `0x80..=0x9F`, where it departs from
/// Latin-1. `0x9F` is undefined.
const PDFDOC_HIGH: [Option<char>; 32] = [
    Some('\u{2022}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{2026}'),
    Some('\u{2014}'),
    Some('\u{2013}'),
    Some('\u{0192}'),
    Some('\u{2044}'),
    Some('\u{2039}'),
    Some('\u{203A}'),
    Some('\u{2212}'),
    Some('\u{2030}'),
    Some('\u{201E}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201A}'),
    Some('\u{2122}'),
    Some('\u{FB01}'),
    Some('\u{FB02}'),
    Some('\u{0141}'),
    Some('\u{0152}'),
    Some('\u{0160}'),
    Some('\u{0178}'),
    Some('\u{017D}'),
    Some('\u{0131}'),
    Some('\u{0142}'),
    Some('\u{0153}'),
    Some('\u{0161}'),
    Some('\u{017E}'),
    None,
];

/// PDFDocEncoding code points for bytes `0x18..=0x1F` (spacing diacritics).
const PDFDOC_DIACRITICS: [char; 8] = [
    '\u{02D8}', '\u{02C7}', '\u{02C6}', '\u{02D9}', '\u{02DD}', '\u{02DB}', '\u{02DA}', '\u{02DC}',
];

/// Map one PDFDocEncoding byte; undefined bytes yield `None`.
fn pdfdoc_char(byte: u8) -> Option<char> {
    match byte {
        0x18..=0x1F => Some(PDFDOC_DIACRITICS[usize::from(byte - 0x18)]),
        0x7F | 0xAD => None,
        0x80..=0x9F => PDFDOC_HIGH[usize::from(byte - 0x80)],
        0xA0 => Some('\u{20AC}'),
        _ => Some(char::from(byte)),
    }
}

/// Decode a PDF string, handling UTF-16 BE BOM, UTF-8 and PDFDocEncoding.
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16BE_BOM) {
        let units = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]));
        // Unpaired surrogates and a dangling odd byte are dropped.
        return char::decode_utf16(units).filter_map(Result::ok).collect();
    }
    if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        return String::from_utf8_lossy(rest).replace('\u{FFFD}', "");
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().copied().filter_map(pdfdoc_char).collect(),
    }
}

/// Decode a PDF name's bytes; a leading `/` is stripped if present.
pub fn decode_pdf_name(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"/").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).replace('\u{FFFD}', "")
}

/// Encode text for storage in a PDF string.
///
/// ASCII text is stored as-is; anything else is stored as UTF-16BE with a
/// byte-order mark so every viewer decodes it the same way.
pub fn encode_pdf_text(text: &str) -> Vec<u8> {
    if text.is_ascii() {
        return text.as_bytes().to_vec();
    }
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend_from_slice(&UTF16BE_BOM);
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_ascii() {
        assert_eq!(decode_pdf_string(b"John Doe"), "John Doe");
    }

    #[test]
    fn decode_utf16be_with_bom() {
        // "张三"
        let bytes = [0xFE, 0xFF, 0x5F, 0x20, 0x4E, 0x09];
        assert_eq!(decode_pdf_string(&bytes), "张三");
    }

    #[test]
    fn decode_utf16be_drops_unpaired_surrogate_and_odd_byte() {
        let bytes = [0xFE, 0xFF, 0x00, 0x41, 0xD8, 0x00, 0x00, 0x42, 0x43];
        assert_eq!(decode_pdf_string(&bytes), "AB");
    }

    #[test]
    fn decode_utf8_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("café".as_bytes());
        assert_eq!(decode_pdf_string(&bytes), "café");
    }

    #[test]
    fn decode_pdfdoc_fallback() {
        assert_eq!(decode_pdf_string(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }

    #[test]
    fn decode_pdfdoc_high_range() {
        assert_eq!(
            decode_pdf_string(&[0x93, 0x8D, 0x41, 0x8E]),
            "\u{FB01}\u{201C}A\u{201D}"
        );
        assert_eq!(decode_pdf_string(&[0x80, 0x92, 0x9F, 0xA0]), "\u{2022}\u{2122}\u{20AC}");
        assert_eq!(decode_pdf_string(&[0x61, 0x18, 0xFF]), "a\u{02D8}\u{FF}");
    }

    #[test]
    fn decode_name_strips_slash() {
        assert_eq!(decode_pdf_name(b"/Yes"), "Yes");
        assert_eq!(decode_pdf_name(b"Off"), "Off");
    }

    #[test]
    fn encode_ascii_is_literal() {
        assert_eq!(encode_pdf_text("New York"), b"New York".to_vec());
    }

    #[test]
    fn encode_non_ascii_uses_utf16be() {
        let encoded = encode_pdf_text("张三");
        assert_eq!(encoded, vec![0xFE, 0xFF, 0x5F, 0x20, 0x4E, 0x09]);
        assert_eq!(decode_pdf_string(&encoded), "张三");
    }

    #[test]
    fn encode_supplementary_plane() {
        let encoded = encode_pdf_text("a😀");
        assert_eq!(decode_pdf_string(&encoded), "a😀");
        assert_eq!(encoded.len(), 2 + 2 + 4);
    }
}
