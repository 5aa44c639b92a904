//! Text decoding with legacy-encoding fallback
//!
//! Peak tables exported by instrument software are occasionally written in
//! a legacy Chinese codepage instead of UTF-8. Decoding tries strict UTF-8
//! first, then GB18030 (a superset of GBK), then lossy UTF-8 so a stray
//! byte never aborts a whole run.

use encoding_rs::GB18030;

/// Decode raw file bytes into text, returning the encoding label used
///
/// Never fails; the final lossy step substitutes replacement characters.
/// Fallbacks are logged informationally, not treated as errors.
pub fn decode_text(bytes: &[u8], source: &str) -> (String, &'static str) {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return (text.to_string(), "utf-8");
    }

    let (text, had_errors) = GB18030.decode_without_bom_handling(bytes);
    if !had_errors {
        log::info!("decoded '{}' as gb18030", source);
        return (text.into_owned(), "gb18030");
    }

    log::info!("decoded '{}' as lossy utf-8", source);
    (String::from_utf8_lossy(bytes).into_owned(), "utf-8-lossy")
}
