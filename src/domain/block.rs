//! Wire shapes returned by the Are.na API.
//!
//! Everything here is producer-defined and partially present, so every
//! field is optional and unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single block from a channel's `contents` array
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBlock {
    /// Block identifier
    #[serde(default)]
    pub id: Option<u64>,

    /// Discriminating kind tag ("Text", "Image", "Link", "Media", "Attachment", ...)
    #[serde(default)]
    pub class: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Plain text content (Text blocks)
    #[serde(default)]
    pub content: Option<String>,

    /// Pre-formatted HTML content (Text blocks)
    #[serde(default)]
    pub content_html: Option<String>,

    #[serde(default)]
    pub image: Option<ImageVariants>,

    #[serde(default)]
    pub attachment: Option<Attachment>,

    #[serde(default)]
    pub embed: Option<Embed>,

    #[serde(default)]
    pub source: Option<Source>,

    /// Creation timestamp as sent by the API (RFC 3339)
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Image resolutions attached to a block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageVariants {
    #[serde(default)]
    pub original: Option<ImageVersion>,
    #[serde(default)]
    pub large: Option<ImageVersion>,
    #[serde(default)]
    pub display: Option<ImageVersion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageVersion {
    #[serde(default)]
    pub url: Option<String>,
}

/// Uploaded file metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Embedded media descriptor (oEmbed style)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
}

/// Where a block was saved from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RawBlock {
    /// Decode one element of a `contents` array.
    ///
    /// Elements whose shape does not decode become an empty block, which no
    /// recognition predicate accepts.
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Parsed creation time, if present and well formed
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Descriptive fields returned by the channel accessibility check
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelInfo {
    #[serde(default)]
    pub title: Option<String>,
    /// "public", "closed" or "private"
    #[serde(default)]
    pub status: Option<String>,
    /// Number of blocks in the channel
    #[serde(default)]
    pub length: Option<u64>,
}

/// One page of channel contents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentsPage {
    /// Missing or null means the page carried no data
    #[serde(default)]
    pub contents: Option<Vec<serde_json::Value>>,
}

impl ContentsPage {
    /// Decode the page's blocks, or `None` when the page carried no data
    pub fn into_blocks(self) -> Option<Vec<RawBlock>> {
        self.contents
            .map(|values| values.into_iter().map(RawBlock::from_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_partial_block() {
        let block = RawBlock::from_value(serde_json::json!({
            "class": "Image",
            "image": { "display": { "url": "http://x/d.png" } },
            "created_at": "2024-03-01T10:00:00.000Z",
            "unknown_field": [1, 2, 3]
        }));

        assert_eq!(block.class.as_deref(), Some("Image"));
        let image = block.image.as_ref().unwrap();
        assert!(image.original.is_none());
        assert_eq!(
            image.display.as_ref().unwrap().url.as_deref(),
            Some("http://x/d.png")
        );
        assert!(block.created_at().is_some());
    }

    #[test]
    fn test_mistyped_block_becomes_empty() {
        let block = RawBlock::from_value(serde_json::json!({
            "class": 42,
            "title": "ignored"
        }));
        assert_eq!(block, RawBlock::default());
    }

    #[test]
    fn test_bad_timestamp() {
        let block = RawBlock {
            created_at: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(block.created_at().is_none());
    }

    #[test]
    fn test_contents_page_without_data() {
        let page: ContentsPage = serde_json::from_str(r#"{"length": 0}"#).unwrap();
        assert!(page.into_blocks().is_none());

        let page: ContentsPage = serde_json::from_str(r#"{"contents": [{}, {"class": "Text"}]}"#).unwrap();
        assert_eq!(page.into_blocks().unwrap().len(), 2);
    }
}
