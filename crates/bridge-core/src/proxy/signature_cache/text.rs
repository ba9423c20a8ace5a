//! Lookup keys for assistant text.
//!
//! Clients re-send assistant output with small differences (trailing
//! whitespace, stripped markdown images, reasoning blocks, CRLF line endings).
//! The normalized key absorbs those so the signature is still found. The
//! normalized form is a cache key only and is never sent upstream.

use regex::Regex;
use std::sync::OnceLock;

static MARKDOWN_IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
static THINK_BLOCK_REGEX: OnceLock<Regex> = OnceLock::new();

fn markdown_image_regex() -> &'static Regex {
    MARKDOWN_IMAGE_REGEX
        .get_or_init(|| Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("Markdown image regex is valid"))
}

fn think_block_regex() -> &'static Regex {
    THINK_BLOCK_REGEX
        .get_or_init(|| Regex::new(r"<think>[\s\S]*?</think>").expect("Think block regex is valid"))
}

fn normalize_once(text: &str) -> String {
    let without_images = markdown_image_regex().replace_all(text, "");
    let without_think = think_block_regex().replace_all(&without_images, "");
    without_think.replace("\r\n", "\n").trim().to_string()
}

/// Strip markdown images and `<think>` blocks, normalize CRLF, trim.
///
/// Repeated until stable, so `normalize_for_lookup(normalize_for_lookup(x))`
/// equals `normalize_for_lookup(x)` even when removing one construct exposes
/// another.
pub fn normalize_for_lookup(text: &str) -> String {
    let mut current = normalize_once(text);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Raw, trimmed and normalized keys for `text`, in lookup order, without
/// empty or repeated entries.
pub fn lookup_keys(text: &str) -> Vec<String> {
    let candidates = [text.to_string(), text.trim().to_string(), normalize_for_lookup(text)];
    let mut keys: Vec<String> = Vec::with_capacity(candidates.len());
    for key in candidates {
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
