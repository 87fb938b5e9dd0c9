//! Domain types for the shelf.
//!
//! - Block: raw, untrusted records as the API sends them
//! - Item: the normalized form the renderer consumes

pub mod block;
pub mod item;

// Re-export commonly used types
pub use block::{Attachment, ChannelInfo, ContentsPage, Embed, ImageVariants, ImageVersion, RawBlock, Source};
pub use item::{ItemKind, Payload, RenderableItem, TextBody};
