// Pagination contract tests

use loka_backend_core::models::pagination::{Page, PageMeta, DEFAULT_LIMIT, MAX_LIMIT};

#[test]
fn test_defaults_and_coercion() {
    let page = Page::new(1, 10);
    assert_eq!(page.offset(), 0);

    // Non-positive limit falls back to the default
    assert_eq!(Page::new(1, 0).limit, DEFAULT_LIMIT);
    assert_eq!(Page::new(1, -3).limit, DEFAULT_LIMIT);

    // Page floor is 1
    assert_eq!(Page::new(-2, 10).page, 1);

    // Oversized limits are capped
    assert_eq!(Page::new(1, 100_000).limit, MAX_LIMIT);
}

#[test]
fn test_offset_matches_one_based_pages() {
    assert_eq!(Page::new(1, 25).offset(), 0);
    assert_eq!(Page::new(2, 25).offset(), 25);
    assert_eq!(Page::new(5, 10).offset(), 40);
}

#[test]
fn test_total_pages_is_ceiling_of_items_over_limit() {
    for (total, limit, expected) in [
        (0_i64, 10_i64, 0_i64),
        (1, 10, 1),
        (9, 10, 1),
        (10, 10, 1),
        (11, 10, 2),
        (101, 25, 5),
    ] {
        let meta = PageMeta::new(1, limit, total);
        assert_eq!(
            meta.total_pages, expected,
            "total={} limit={}",
            total, limit
        );
    }
}

#[test]
fn test_meta_serializes_camel_case() {
    let meta = Page::new(3, 20).meta(61);
    let value = serde_json::to_value(meta).expect("serialize");

    assert_eq!(value["page"], 3);
    assert_eq!(value["limit"], 20);
    assert_eq!(value["totalItems"], 61);
    assert_eq!(value["totalPages"], 4);
}
