//! Are.na REST client.
//!
//! Endpoints:
//! - GET /channels/{slug}            channel metadata (accessibility check)
//! - GET /channels/{slug}/contents   paginated blocks
//!
//! Every request carries `Cache-Control: no-cache` so it reaches the origin.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL};

use super::{ArenaApi, ChannelAccessError};
use crate::config::ShelfConfig;
use crate::domain::{ChannelInfo, ContentsPage};

/// HTTP client for the Are.na API
#[derive(Clone)]
pub struct ArenaClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArenaClient {
    /// Create a client for the given API base (e.g. https://api.are.na/v2)
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(default_headers())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from resolved config
    pub fn from_config(config: &ShelfConfig) -> Result<Self> {
        Self::new(&config.api_base)
    }

    fn channel_url(&self, slug: &str) -> String {
        format!("{}/channels/{}", self.base_url, slug)
    }

    fn contents_url(&self, slug: &str) -> String {
        format!("{}/channels/{}/contents", self.base_url, slug)
    }
}

/// Headers sent with every request
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers
}

#[async_trait]
impl ArenaApi for ArenaClient {
    async fn channel(&self, slug: &str) -> Result<ChannelInfo, ChannelAccessError> {
        let response = self
            .client
            .get(self.channel_url(slug))
            .send()
            .await
            .map_err(|e| ChannelAccessError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelAccessError::from_status(status.as_u16()));
        }

        response
            .json::<ChannelInfo>()
            .await
            .map_err(|e| ChannelAccessError::Transport(format!("invalid channel JSON: {}", e)))
    }

    async fn contents_page(&self, slug: &str, page: u32, per: u32) -> Result<ContentsPage> {
        let url = self.contents_url(slug);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("page", page.to_string()),
                ("per", per.to_string()),
                ("direction", "desc".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to fetch page {} of '{}'", page, slug))?;

        response
            .json::<ContentsPage>()
            .await
            .with_context(|| format!("Failed to parse page {} of '{}'", page, slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = ArenaClient::new("https://api.are.na/v2/").unwrap();
        assert_eq!(
            client.channel_url("heura-murgui"),
            "https://api.are.na/v2/channels/heura-murgui"
        );
        assert_eq!(
            client.contents_url("heura-murgui"),
            "https://api.are.na/v2/channels/heura-murgui/contents"
        );
    }

    #[test]
    fn test_requests_bypass_cache() {
        let headers = default_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-cache");
    }

    #[test]
    fn test_from_config_uses_api_base() {
        let mut config = ShelfConfig::for_channel("c");
        config.api_base = "http://localhost:9999".to_string();
        let client = ArenaClient::from_config(&config).unwrap();
        assert_eq!(client.channel_url("c"), "http://localhost:9999/channels/c");
    }
}
