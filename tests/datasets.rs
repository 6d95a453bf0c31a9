// Invariants of the hand-authored content: captions, messages, manifest paths.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use valentine_card::carousel::{CACHE_BUST, CAPTIONS, MEMORIES_BASE, photos};
use valentine_card::hearts::CELEBRATION_GLYPHS;
use valentine_card::page::{NO_MESSAGES, PREVIEW_PLACEHOLDER, previews};

#[test]
fn gallery_manifest_is_complete_and_unique() {
    let all = photos();
    assert_eq!(all.len(), CAPTIONS.len());
    let mut seen = HashSet::new();
    for (i, p) in all.iter().enumerate() {
        assert!(seen.insert(p.src.clone()), "duplicate path '{}' at slot {}", p.src, i + 1);
        assert!(p.src.starts_with(MEMORIES_BASE), "'{}' outside {}", p.src, MEMORIES_BASE);
        assert!(p.src.ends_with(CACHE_BUST), "'{}' lacks cache bust", p.src);
        assert_eq!(p.caption, CAPTIONS[i]);
    }
    let pngs = all.iter().filter(|p| p.src.contains(".png")).count();
    assert_eq!(pngs, 1, "exactly one slot uses a different format");
}

#[test]
fn no_messages_are_distinct_and_start_with_no() {
    assert_eq!(NO_MESSAGES.len(), 8);
    let unique: HashSet<_> = NO_MESSAGES.iter().collect();
    assert_eq!(unique.len(), NO_MESSAGES.len());
    assert!(NO_MESSAGES[0].starts_with("No"));
}

#[test]
fn celebration_has_eight_glyphs() {
    assert_eq!(CELEBRATION_GLYPHS.len(), 8);
    assert!(CELEBRATION_GLYPHS.iter().all(|g| !g.is_empty()));
}

#[test]
fn placeholders_are_inline_svg() {
    assert!(PREVIEW_PLACEHOLDER.starts_with("data:image/svg+xml,"));
    assert!(valentine_card::carousel::GALLERY_PLACEHOLDER.starts_with("data:image/svg+xml,"));
    for p in previews() {
        assert!(!p.src.starts_with("data:"));
    }
}
