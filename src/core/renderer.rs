//! Shelf rendering.
//!
//! Each item becomes one `div.shelf-item` holding the kind's element and a
//! `<time>` stamp. The renderer keeps the order it is given.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::markup::{self, Element};
use super::surface::HtmlDocument;
use crate::config::{LayoutHints, RenderOptions, TextHtml, TextWrap};
use crate::domain::{ItemKind, Payload, RenderableItem, TextBody};

pub const ITEM_CLASS: &str = "shelf-item";

/// Visual sizing of a block in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutHint {
    /// 2x2
    Large,
    /// 2x1
    Wide,
    /// 1x1
    Standard,
}

impl LayoutHint {
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            LayoutHint::Large => Some("bento-large"),
            LayoutHint::Wide => Some("bento-wide"),
            LayoutHint::Standard => None,
        }
    }
}

/// Hint for the item at `index` under the configured scheme
pub fn layout_hint(index: usize, kind: ItemKind, hints: LayoutHints) -> LayoutHint {
    match hints {
        LayoutHints::None => LayoutHint::Standard,
        LayoutHints::Bento if index == 0 => LayoutHint::Large,
        LayoutHints::Bento if kind == ItemKind::Image => LayoutHint::Wide,
        LayoutHints::Bento => LayoutHint::Standard,
    }
}

/// Human-readable stamp, e.g. "May 1, 2024 at 03:07 PM"
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y at %I:%M %p").to_string()
}

fn content_element(item: &RenderableItem, options: &RenderOptions) -> Element {
    match &item.payload {
        Payload::Image { url, title } => Element::new("img").attr("src", url).attr("alt", title),
        Payload::Video { url, .. } => Element::new("video")
            .attr("src", url)
            .flag("controls")
            .attr("style", "width: 100%; height: auto;"),
        Payload::Text { body, .. } => {
            let body = match (body, options.text_html) {
                (TextBody::Html(html), TextHtml::Trusted) => html.clone(),
                (TextBody::Html(text), TextHtml::Escaped) | (TextBody::Plain(text), _) => {
                    markup::escape(text)
                }
            };
            let container = Element::new("div").class("shelf-text");
            match options.text_wrap {
                TextWrap::Paragraph => container.child(Element::new("p").raw_html(body)),
                TextWrap::Verbatim => container.raw_html(body),
            }
        }
        Payload::Link { url, title } => Element::new("a")
            .attr("href", url)
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
            .text(title),
    }
}

/// Build the block for one item
pub fn render_item(item: &RenderableItem, index: usize, options: &RenderOptions) -> Element {
    let mut wrapper = Element::new("div").class(ITEM_CLASS);
    if let Some(class) = layout_hint(index, item.kind(), options.layout_hints).css_class() {
        wrapper = wrapper.class(class);
    }

    let time = Element::new("time")
        .attr("datetime", item.created_at.to_rfc3339())
        .text(format_timestamp(&item.created_at));

    wrapper.child(content_element(item, options)).child(time)
}

/// Build the blocks for a sequence, in input order
pub fn render_items(items: &[RenderableItem], options: &RenderOptions) -> Vec<Element> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| render_item(item, index, options))
        .collect()
}

/// Replace the target element's content with the rendered shelf.
///
/// Returns `false` without touching the document when the target is absent.
pub fn render_shelf(
    document: &mut HtmlDocument,
    target_id: &str,
    items: &[RenderableItem],
    options: &RenderOptions,
) -> bool {
    if !document.has_element(target_id) {
        debug!(target_id, "Render target not present, skipping");
        return false;
    }

    let html = markup::to_html(&render_items(items, options));
    document.replace_inner_html(target_id, &html)
}
