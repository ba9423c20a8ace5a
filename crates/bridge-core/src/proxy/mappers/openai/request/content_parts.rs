use antigravity_bridge_types::protocol::{BackendPart, ChatContent, ContentPart};
use serde_json::Value;

use crate::proxy::common::media::parse_image_data_url;

/// Parts of a user turn: the concatenated text first, then inline images.
///
/// The text part is emitted when it is non-empty or when there is nothing
/// else to send, so a user turn never ends up without parts.
pub fn user_parts(content: Option<&ChatContent>) -> Vec<BackendPart> {
    let Some(content) = content else {
        return vec![BackendPart::text("")];
    };

    let text = content.text();
    let images: Vec<BackendPart> = match content {
        ChatContent::Parts(parts) => parts.iter().filter_map(image_part).collect(),
        ChatContent::Json(Value::Array(items)) => {
            items.iter().cloned().map(ContentPart::from).filter_map(|p| image_part(&p)).collect()
        },
        ChatContent::Text(_) | ChatContent::Json(_) => Vec::new(),
    };

    let mut out = Vec::with_capacity(images.len() + 1);
    if !text.is_empty() || images.is_empty() {
        out.push(BackendPart::text(text));
    }
    out.extend(images);
    out
}

fn image_part(part: &ContentPart) -> Option<BackendPart> {
    let ContentPart::ImageUrl { image_url } = part else {
        return None;
    };
    match parse_image_data_url(&image_url.url) {
        Some(image) => Some(BackendPart::inline_image(image.mime_type, image.data)),
        None => {
            tracing::debug!("[OpenAI-Request] Skipping image that is not a base64 data URL");
            None
        },
    }
}
