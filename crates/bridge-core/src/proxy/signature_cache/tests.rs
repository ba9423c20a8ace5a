use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_tool_signature_roundtrip() {
    let cache = SignatureCache::new();
    cache.put("call_1", "sig-a");

    assert_eq!(cache.get("call_1"), Some("sig-a".to_string()));
    assert_eq!(cache.get("call_2"), None);
}

#[test]
fn test_empty_arguments_are_ignored() {
    let cache = SignatureCache::new();
    cache.put("", "sig");
    cache.put("call_1", "");
    cache.put_for_text("", "sig");
    cache.put_for_text("text", "");

    assert!(cache.is_empty());
    assert_eq!(cache.get(""), None);
}

#[test]
fn test_text_lookup_is_fuzzy() {
    let cache = SignatureCache::new();
    cache.put_for_text("Hello ", "sig-hello");

    assert_eq!(cache.get_for_text("Hello ").map(|e| e.signature), Some("sig-hello".into()));
    assert_eq!(cache.get_for_text("Hello").map(|e| e.signature), Some("sig-hello".into()));
    assert_eq!(
        cache.get_for_text(" Hello \r\n ").map(|e| e.signature),
        Some("sig-hello".into())
    );
    assert_eq!(cache.get_for_text(""), None);
    assert_eq!(cache.get_for_text("   \n"), None);
}

#[test]
fn test_text_entry_keeps_original_text() {
    let cache = SignatureCache::new();
    cache.put_for_text("  answer\r\n", "sig");

    let entry = cache.get_for_text("answer").unwrap();
    assert_eq!(entry.text, "  answer\r\n");
}

#[test]
fn test_normalized_key_ignores_images_and_think_blocks() {
    let cache = SignatureCache::new();
    cache.put_for_text("<think>plan</think>Result ![chart](data:image/png;base64,AAAA)", "sig");

    assert_eq!(cache.get_for_text("Result").map(|e| e.signature), Some("sig".into()));
}

#[test]
fn test_duplicate_keys_are_stored_once() {
    let cache = SignatureCache::new();
    cache.put_for_text("plain", "sig");
    assert_eq!(cache.text_len(), 1);

    cache.put_for_text(" padded ", "sig2");
    assert_eq!(cache.text_len(), 3);
}

#[test]
fn test_normalization_is_idempotent() {
    let samples = [
        "plain",
        "  padded\r\n",
        "![a<think>x</think>](b) tail",
        "<thi![](x)nk>hidden</think>shown",
        "line one\r\nline two",
    ];
    for sample in samples {
        let once = normalize_for_lookup(sample);
        assert_eq!(normalize_for_lookup(&once), once, "sample: {sample:?}");
    }
}

#[test]
fn test_lookup_keys_order() {
    assert_eq!(lookup_keys(" a "), vec![" a ".to_string(), "a".to_string()]);
    assert_eq!(lookup_keys("a"), vec!["a".to_string()]);
    assert!(lookup_keys("   ").iter().all(|k| k == "   "));
}

#[test]
fn test_capacity_bounds_entries() {
    let cache = SignatureCache::with_capacity(2, 2);
    cache.put("a", "1");
    cache.put("b", "2");
    cache.put("c", "3");

    assert_eq!(cache.tool_len(), 2);
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.get("c"), Some("3".to_string()));
}

#[test]
fn test_zero_capacity_still_holds_one_entry() {
    let cache = SignatureCache::with_capacity(0, 0);
    cache.put("a", "1");
    assert_eq!(cache.get("a"), Some("1".to_string()));
}

#[test]
fn test_clear() {
    let cache = SignatureCache::new();
    cache.put("call_1", "sig");
    cache.put_for_text("text", "sig");
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_global_is_shared() {
    let a = SignatureCache::global() as *const SignatureCache;
    let b = SignatureCache::global() as *const SignatureCache;
    assert_eq!(a, b);
}
