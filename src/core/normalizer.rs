//! Block normalization.
//!
//! Predicates are tried in a fixed order (text, image, video, link) and the
//! first match produces the item. Blocks matching none are dropped without
//! a diagnostic: uncurated channels routinely hold kinds the shelf does not
//! paint.

use std::cmp::Reverse;

use crate::domain::{Payload, RawBlock, RenderableItem, TextBody};

pub const DEFAULT_IMAGE_TITLE: &str = "Image from Are.na";
pub const DEFAULT_VIDEO_TITLE: &str = "Video from Are.na";

/// Attachment extensions treated as playable video
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "m4v", "ogv"];

/// Normalize an ordered block sequence, preserving order
pub fn normalize(blocks: &[RawBlock]) -> Vec<RenderableItem> {
    blocks.iter().filter_map(normalize_block).collect()
}

/// Normalize a single block, or `None` if it is not renderable
pub fn normalize_block(block: &RawBlock) -> Option<RenderableItem> {
    present(&block.class)?;
    let created_at = block.created_at()?;

    let payload = text_payload(block)
        .or_else(|| image_payload(block))
        .or_else(|| video_payload(block))
        .or_else(|| link_payload(block))?;

    Some(RenderableItem::new(payload, created_at))
}

/// Treat empty strings as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn is_class(block: &RawBlock, class: &str) -> bool {
    block.class.as_deref() == Some(class)
}

fn text_payload(block: &RawBlock) -> Option<Payload> {
    if !is_class(block, "Text") {
        return None;
    }
    let content = present(&block.content);
    let description = present(&block.description);
    if content.is_none() && description.is_none() {
        return None;
    }

    let body = match (present(&block.content_html), description, content) {
        (Some(html), _, _) => TextBody::Html(html.to_string()),
        (None, Some(description), _) => TextBody::Html(description.to_string()),
        (None, None, Some(plain)) => TextBody::Plain(plain.to_string()),
        (None, None, None) => return None,
    };

    Some(Payload::Text {
        body,
        title: present(&block.title).map(str::to_string),
        source_url: block
            .source
            .as_ref()
            .and_then(|s| present(&s.url))
            .map(str::to_string),
    })
}

fn image_payload(block: &RawBlock) -> Option<Payload> {
    if !is_class(block, "Image") {
        return None;
    }
    let image = block.image.as_ref()?;
    let url = [&image.original, &image.large, &image.display]
        .into_iter()
        .find_map(|variant| variant.as_ref().and_then(|v| present(&v.url)))?;

    Some(Payload::Image {
        url: url.to_string(),
        title: media_title(block, DEFAULT_IMAGE_TITLE),
    })
}

fn is_video_attachment(block: &RawBlock) -> bool {
    let Some(attachment) = &block.attachment else {
        return false;
    };
    let by_extension = present(&attachment.extension).is_some_and(|ext| {
        VIDEO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known))
    });
    let by_content_type = present(&attachment.content_type)
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("video/"));
    by_extension || by_content_type
}

fn is_video_embed(block: &RawBlock) -> bool {
    block
        .embed
        .as_ref()
        .is_some_and(|e| e.kind.as_deref() == Some("video"))
}

fn video_payload(block: &RawBlock) -> Option<Payload> {
    if !is_video_attachment(block) && !is_video_embed(block) {
        return None;
    }
    let url = block
        .attachment
        .as_ref()
        .and_then(|a| present(&a.url))
        .or_else(|| block.embed.as_ref().and_then(|e| present(&e.source_url)))
        .or_else(|| block.source.as_ref().and_then(|s| present(&s.url)))?;

    Some(Payload::Video {
        url: url.to_string(),
        title: media_title(block, DEFAULT_VIDEO_TITLE),
    })
}

fn link_payload(block: &RawBlock) -> Option<Payload> {
    if !is_class(block, "Link") {
        return None;
    }
    let source = block.source.as_ref()?;
    let url = present(&source.url)?;
    let title = present(&block.title)
        .or_else(|| present(&source.title))
        .unwrap_or(url);

    Some(Payload::Link {
        url: url.to_string(),
        title: title.to_string(),
    })
}

fn media_title(block: &RawBlock, fallback: &str) -> String {
    present(&block.title)
        .or_else(|| present(&block.description))
        .unwrap_or(fallback)
        .to_string()
}

/// Order blocks newest first; undated blocks sink to the end
pub fn sort_newest_first(blocks: &mut [RawBlock]) {
    blocks.sort_by_cached_key(|b| Reverse(b.created_at()));
}
