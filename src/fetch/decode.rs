use std::borrow::Cow;

use encoding_rs::EUC_KR;

/// Decode a page body served in the site's legacy Korean encoding.
///
/// Bytes that are not valid EUC-KR are read as UTF-8 with invalid sequences
/// replaced.
pub fn decode_body(bytes: &[u8]) -> Cow<'_, str> {
    match EUC_KR.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => String::from_utf8_lossy(bytes),
    }
}
