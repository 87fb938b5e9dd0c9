//! arena-shelf - paint an Are.na channel into an HTML page
//!
//! Fetches every block of a channel, normalizes the heterogeneous block
//! kinds into four renderable ones, and writes them into a target element
//! of a page, newest first.
//!
//! # Architecture
//!
//! One cycle runs in strict sequence:
//! - Fetch: accessibility check, then sequential pages until a short one
//! - Sort: newest `created_at` first
//! - Normalize: text, image, video, link; everything else is dropped
//! - Render: replace the target element's children, one block per item
//!
//! # Modules
//!
//! - `adapters`: Are.na API seam and HTTP client
//! - `core`: Fetcher, Normalizer, Renderer, Pipeline, HTML surface
//! - `domain`: Data structures (RawBlock, RenderableItem)
//! - `config`: Layered configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Write a starter page, then paint a channel into it
//! shelf init --page index.html
//! shelf render --channel heura-murgui --page index.html
//!
//! # Inspect the normalized items
//! shelf fetch --channel heura-murgui
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use adapters::{ArenaApi, ArenaClient, ChannelAccessError};
pub use config::{LayoutHints, RenderOptions, ShelfConfig, TextHtml, TextWrap};
pub use self::core::{HtmlDocument, RunOutcome, ShelfPipeline};
pub use domain::{ItemKind, Payload, RawBlock, RenderableItem};
