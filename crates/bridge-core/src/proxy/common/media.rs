//! Inline image extraction from `data:` URLs.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Image payload ready for an `inlineData` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

/// Parse `data:image/<fmt>;base64,<data>`. Other URL shapes (remote
/// `http(s)` links, non-image media, non-base64 encodings) yield `None`.
pub fn parse_image_data_url(url: &str) -> Option<InlineImage> {
    let rest = url.strip_prefix("data:image/")?;
    let (format, data) = rest.split_once(";base64,")?;
    if format.is_empty() || data.is_empty() {
        return None;
    }
    let declared = format!("image/{}", format);
    Some(InlineImage { mime_type: sniff_image_mime(data, &declared), data: data.to_string() })
}

/// MIME type implied by the payload's magic bytes, or `declared` when the
/// prefix is unrecognised or not valid base64.
pub fn sniff_image_mime(base64_data: &str, declared: &str) -> String {
    let data = base64_data.trim();
    let mut prefix_len = data.len().min(24);
    prefix_len -= prefix_len % 4;
    let Some(prefix) = data.get(..prefix_len).filter(|p| !p.is_empty()) else {
        return declared.to_string();
    };
    let Ok(bytes) = STANDARD.decode(prefix) else {
        return declared.to_string();
    };

    let detected = magic_mime(&bytes).unwrap_or(declared);
    if detected != declared {
        tracing::debug!(declared, detected, "[Media] Overriding declared image MIME type");
    }
    detected.to_string()
}

fn magic_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
