// Catalog invariants. Native-friendly, no wasm/browser APIs.

use std::collections::HashSet;

use tap_fruits::FRUIT_KINDS;

#[test]
fn catalog_has_five_unique_kinds() {
    assert_eq!(FRUIT_KINDS.len(), 5);
    let mut ids = HashSet::new();
    let mut glyphs = HashSet::new();
    for k in FRUIT_KINDS {
        assert!(ids.insert(k.id), "duplicate fruit id '{}'", k.id);
        assert!(glyphs.insert(k.glyph), "duplicate glyph for '{}'", k.id);
        assert!(!k.glyph.is_empty(), "empty glyph for '{}'", k.id);
        assert!(k.points > 0, "fruit '{}' is worth nothing", k.id);
    }
}

#[test]
fn catalog_point_values() {
    let points: Vec<(&str, u32)> = FRUIT_KINDS.iter().map(|k| (k.id, k.points)).collect();
    assert_eq!(
        points,
        vec![("apple", 10), ("banana", 8), ("strawberry", 12), ("orange", 9), ("grape", 11)]
    );
}

#[test]
fn lookup_by_id() {
    assert_eq!(tap_fruits::fruit::kind("strawberry").map(|k| k.points), Some(12));
    assert!(tap_fruits::fruit::kind("durian").is_none());
}
