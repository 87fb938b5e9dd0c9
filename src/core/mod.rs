//! Core shelf logic.
//!
//! This module contains:
//! - Fetcher: Accessibility check and sequential pagination
//! - Normalizer: Raw blocks to renderable items
//! - Renderer: Items to HTML blocks on a surface
//! - Pipeline: The full cycle, re-invocable

pub mod fetcher;
pub mod markup;
pub mod normalizer;
pub mod pipeline;
pub mod renderer;
pub mod surface;

// Re-export commonly used types
pub use markup::{Element, Node};
pub use normalizer::{normalize, normalize_block, sort_newest_first};
pub use pipeline::{RunOutcome, ShelfPipeline};
pub use renderer::{format_timestamp, layout_hint, render_items, render_shelf, LayoutHint};
pub use surface::HtmlDocument;
