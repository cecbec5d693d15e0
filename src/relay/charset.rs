//! Charset transcoding of upstream bodies.
//!
//! Labels are resolved with the WHATWG encoding registry (`encoding_rs`),
//! so aliases such as `latin1`, `utf8` or `sjis` are accepted.
//!
//! Fallback policy: an absent or unrecognized label is not an error. The
//! body is returned as `Content::Bytes`, byte for byte. Labels that only
//! resolve to the WHATWG replacement encoding count as unrecognized.

use encoding_rs::Encoding;

use crate::relay::content::Content;

fn lookup(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label_no_replacement(label.trim().as_bytes())
}

/// Whether `label` names an encoding the relay can transcode from.
pub fn is_supported(label: &str) -> bool {
    lookup(label).is_some()
}

/// Transcode `body` from the encoding named by `charset` into UTF-8 text.
///
/// A byte order mark belonging to the selected encoding is stripped.
/// Malformed sequences become U+FFFD.
pub fn decode(body: Vec<u8>, charset: Option<&str>) -> Content {
    let Some(encoding) = charset.and_then(lookup) else {
        return Content::Bytes(body);
    };

    let (text, _had_errors) = encoding.decode_with_bom_removal(&body);
    Content::Text(text.into_owned())
}
