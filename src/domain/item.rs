//! Normalized, renderable shelf items.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The four kinds the shelf knows how to paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Text,
    Image,
    Video,
    Link,
}

/// Body of a text item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBody {
    /// Producer markup, assumed pre-sanitized
    Html(String),
    /// Plain text; always escaped on output
    Plain(String),
}

/// Kind-dependent content of an item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    Text {
        body: TextBody,
        title: Option<String>,
        source_url: Option<String>,
    },
    Image { url: String, title: String },
    Video { url: String, title: String },
    Link { url: String, title: String },
}

/// A block that passed exactly one recognition predicate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableItem {
    pub payload: Payload,
    pub created_at: DateTime<Utc>,
}

impl RenderableItem {
    pub fn new(payload: Payload, created_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            created_at,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self.payload {
            Payload::Text { .. } => ItemKind::Text,
            Payload::Image { .. } => ItemKind::Image,
            Payload::Video { .. } => ItemKind::Video,
            Payload::Link { .. } => ItemKind::Link,
        }
    }

    /// Title used for alt text and link labels
    pub fn title(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text { title, .. } => title.as_deref(),
            Payload::Image { title, .. }
            | Payload::Video { title, .. }
            | Payload::Link { title, .. } => Some(title.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_payload() {
        let item = RenderableItem::new(
            Payload::Link {
                url: "https://example.com".to_string(),
                title: "Example".to_string(),
            },
            Utc::now(),
        );
        assert_eq!(item.kind(), ItemKind::Link);
        assert_eq!(item.title(), Some("Example"));
    }

    #[test]
    fn test_payload_serialization_tag() {
        let payload = Payload::Image {
            url: "http://x/y.png".to_string(),
            title: "Y".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["url"], "http://x/y.png");
    }
}
