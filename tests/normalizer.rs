//! Normalizer Integration Tests
//!
//! Recognition predicates and fallback chains over realistic API payloads.

use arena_shelf::core::{normalize, sort_newest_first};
use arena_shelf::domain::{ItemKind, Payload, RawBlock, TextBody};
use serde_json::json;

fn blocks(values: Vec<serde_json::Value>) -> Vec<RawBlock> {
    values.into_iter().map(RawBlock::from_value).collect()
}

#[test]
fn test_display_only_image_resolves() {
    let items = normalize(&blocks(vec![json!({
        "class": "Image",
        "title": "",
        "image": {
            "original": null,
            "display": { "url": "http://x/display.jpg" }
        },
        "created_at": "2024-01-01T00:00:00Z"
    })]));

    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0].payload,
        Payload::Image {
            url: "http://x/display.jpg".to_string(),
            title: "Image from Are.na".to_string(),
        }
    );
}

#[test]
fn test_link_titles() {
    let items = normalize(&blocks(vec![
        json!({
            "class": "Link",
            "title": null,
            "source": { "url": "https://a.example", "title": "Source A" },
            "created_at": "2024-01-02T00:00:00Z"
        }),
        json!({
            "class": "Link",
            "source": { "url": "https://b.example" },
            "created_at": "2024-01-01T00:00:00Z"
        }),
    ]));

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].title(), Some("Source A"));
    assert_eq!(items[1].title(), Some("https://b.example"));
}

#[test]
fn test_mp4_attachment_is_video() {
    let items = normalize(&blocks(vec![json!({
        "class": "Attachment",
        "title": "Clip",
        "attachment": {
            "url": "https://d2w9rnfcy7mm78.cloudfront.net/clip.mp4",
            "extension": "mp4",
            "content_type": "video/mp4"
        },
        "created_at": "2024-01-01T00:00:00Z"
    })]));

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind(), ItemKind::Video);
    assert_eq!(items[0].title(), Some("Clip"));
}

#[test]
fn test_output_never_longer_and_order_preserved() {
    let input = blocks(vec![
        json!({ "class": "Text", "content": "first", "created_at": "2024-01-05T00:00:00Z" }),
        json!({ "class": "Channel", "title": "nested channel", "created_at": "2024-01-04T00:00:00Z" }),
        json!({ "class": "Link", "source": { "url": "https://c.example" }, "created_at": "2024-01-03T00:00:00Z" }),
        json!("not even an object"),
        json!({ "class": "Image", "image": {}, "created_at": "2024-01-02T00:00:00Z" }),
        json!({ "class": "Media", "embed": { "type": "rich" }, "created_at": "2024-01-01T00:00:00Z" }),
    ]);

    let items = normalize(&input);
    assert!(items.len() <= input.len());
    let kinds: Vec<_> = items.iter().map(|i| i.kind()).collect();
    assert_eq!(kinds, vec![ItemKind::Text, ItemKind::Link]);
}

#[test]
fn test_sorted_blocks_normalize_strictly_descending() {
    let mut input = blocks(vec![
        json!({ "class": "Text", "content": "b", "created_at": "2024-02-01T08:00:00Z" }),
        json!({ "class": "Text", "content": "d", "created_at": "2024-04-01T08:00:00+02:00" }),
        json!({ "class": "Text", "content": "a", "created_at": "2024-01-01T08:00:00Z" }),
        json!({ "class": "Text", "content": "c", "created_at": "2024-03-01T08:00:00Z" }),
    ]);

    sort_newest_first(&mut input);
    let items = normalize(&input);

    assert_eq!(items.len(), 4);
    for pair in items.windows(2) {
        assert!(pair[0].created_at > pair[1].created_at);
    }
    assert!(matches!(items[0].payload, Payload::Text { body: TextBody::Plain(ref text), .. } if text == "d"));
}
