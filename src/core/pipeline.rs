//! The fetch → sort → normalize → render cycle.
//!
//! A [`ShelfPipeline`] owns its configuration and API client; `run` can be
//! called any number of times and always redoes the full cycle. Failures
//! end the cycle with a diagnostic and leave the page untouched.

use tracing::{info, instrument};

use super::{fetcher, normalizer, renderer};
use super::surface::HtmlDocument;
use crate::adapters::{ArenaApi, ArenaClient};
use crate::config::ShelfConfig;
use crate::domain::RenderableItem;

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The target element now holds `items` blocks
    Rendered { items: usize },
    /// The accessibility check failed; nothing was fetched
    ChannelUnavailable,
    /// The channel returned no blocks
    NoBlocks,
    /// The page has no target element; nothing was painted
    NoSurface,
}

/// Configured shelf pipeline
pub struct ShelfPipeline {
    config: ShelfConfig,
    api: Box<dyn ArenaApi>,
}

impl ShelfPipeline {
    /// Create a pipeline talking to the configured Are.na API
    pub fn new(config: ShelfConfig) -> anyhow::Result<Self> {
        let api = ArenaClient::from_config(&config)?;
        Ok(Self::with_api(config, api))
    }

    /// Create a pipeline with a custom API implementation
    pub fn with_api(config: ShelfConfig, api: impl ArenaApi + 'static) -> Self {
        Self {
            config,
            api: Box::new(api),
        }
    }

    pub fn config(&self) -> &ShelfConfig {
        &self.config
    }

    /// Fetch and normalize without rendering.
    ///
    /// `Err` carries the early-exit outcome (already logged).
    #[instrument(skip(self), fields(channel = %self.config.channel))]
    pub async fn collect(&self) -> Result<Vec<RenderableItem>, RunOutcome> {
        let slug = self.config.channel.as_str();
        info!("Fetching blocks from Are.na channel");

        if fetcher::check_channel(self.api.as_ref(), slug).await.is_err() {
            return Err(RunOutcome::ChannelUnavailable);
        }

        let mut blocks = fetcher::fetch_all(self.api.as_ref(), slug, self.config.per_page).await;
        if blocks.is_empty() {
            info!("No blocks found or error occurred");
            return Err(RunOutcome::NoBlocks);
        }

        normalizer::sort_newest_first(&mut blocks);
        let items = normalizer::normalize(&blocks);
        info!(blocks = blocks.len(), items = items.len(), "Normalized blocks");
        Ok(items)
    }

    /// Run the full cycle against a page
    #[instrument(skip(self, document), fields(channel = %self.config.channel))]
    pub async fn run(&self, document: &mut HtmlDocument) -> RunOutcome {
        let items = match self.collect().await {
            Ok(items) => items,
            Err(outcome) => return outcome,
        };

        let rendered = renderer::render_shelf(
            document,
            &self.config.target_id,
            &items,
            &self.config.render,
        );
        if !rendered {
            return RunOutcome::NoSurface;
        }

        info!(items = items.len(), target_id = %self.config.target_id, "Shelf rendered");
        RunOutcome::Rendered { items: items.len() }
    }
}
