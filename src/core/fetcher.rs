//! Channel fetching.
//!
//! Pages are requested one at a time until a short page, an empty page,
//! or a failed page. A failed page ends pagination; blocks already
//! collected are kept.

use tracing::{debug, error, info, warn};

use crate::adapters::{ArenaApi, ChannelAccessError};
use crate::domain::{ChannelInfo, RawBlock};

/// Run the accessibility check, logging the reason on failure
pub async fn check_channel(
    api: &dyn ArenaApi,
    slug: &str,
) -> Result<ChannelInfo, ChannelAccessError> {
    match api.channel(slug).await {
        Ok(info) => {
            info!(
                channel = slug,
                title = info.title.as_deref().unwrap_or(""),
                status = info.status.as_deref().unwrap_or(""),
                length = info.length.unwrap_or(0),
                "Channel info"
            );
            Ok(info)
        }
        Err(e) => {
            match &e {
                ChannelAccessError::AccessDenied { .. } => {
                    error!(channel = slug, "Channel is private. Make sure the channel is set to \"open\" or \"closed\".")
                }
                ChannelAccessError::NotFound => {
                    error!(channel = slug, "Channel not found. Check the channel slug.")
                }
                ChannelAccessError::Status { .. } | ChannelAccessError::Transport(_) => {}
            }
            error!(channel = slug, error = %e, "Channel access failed");
            Err(e)
        }
    }
}

/// Fetch every block in the channel, in API order
pub async fn fetch_all(api: &dyn ArenaApi, slug: &str, per: u32) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut page = 1;

    loop {
        let fetched = match api.contents_page(slug, page, per).await {
            Ok(contents) => contents.into_blocks(),
            Err(e) => {
                warn!(channel = slug, page, error = %e, "Error fetching page");
                None
            }
        };

        let Some(fetched) = fetched else {
            break;
        };

        let count = fetched.len();
        debug!(page, count, "Fetched page");
        blocks.extend(fetched);

        if count < per as usize {
            break;
        }
        page += 1;
    }

    info!(channel = slug, count = blocks.len(), "Fetched blocks from Are.na");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::domain::ContentsPage;

    /// Serves `total` numbered blocks and records requested pages
    struct Numbered {
        total: usize,
        requested: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl ArenaApi for Numbered {
        async fn channel(&self, _slug: &str) -> Result<ChannelInfo, ChannelAccessError> {
            Ok(ChannelInfo::default())
        }

        async fn contents_page(&self, _slug: &str, page: u32, per: u32) -> Result<ContentsPage> {
            self.requested.lock().unwrap().push(page);
            let start = (page as usize - 1) * per as usize;
            let end = (start + per as usize).min(self.total);
            let contents = (start..end.max(start))
                .map(|i| serde_json::json!({ "id": i }))
                .collect();
            Ok(ContentsPage {
                contents: Some(contents),
            })
        }
    }

    /// Channel lookup answers with a fixed HTTP status
    struct Status(u16);

    #[async_trait]
    impl ArenaApi for Status {
        async fn channel(&self, _slug: &str) -> Result<ChannelInfo, ChannelAccessError> {
            Err(ChannelAccessError::from_status(self.0))
        }

        async fn contents_page(&self, _slug: &str, _page: u32, _per: u32) -> Result<ContentsPage> {
            anyhow::bail!("contents must not be requested")
        }
    }

    #[tokio::test]
    async fn test_check_channel_classifies_status() {
        assert!(matches!(
            check_channel(&Status(404), "c").await,
            Err(ChannelAccessError::NotFound)
        ));
        assert!(matches!(
            check_channel(&Status(403), "c").await,
            Err(ChannelAccessError::AccessDenied { status: 403 })
        ));
        assert!(matches!(
            check_channel(&Status(500), "c").await,
            Err(ChannelAccessError::Status { status: 500 })
        ));
    }

    #[tokio::test]
    async fn test_exact_multiple_needs_trailing_empty_page() {
        let api = Numbered {
            total: 4,
            requested: Mutex::new(Vec::new()),
        };
        let blocks = fetch_all(&api, "c", 2).await;
        assert_eq!(blocks.len(), 4);
        assert_eq!(*api.requested.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_short_page_stops() {
        let api = Numbered {
            total: 5,
            requested: Mutex::new(Vec::new()),
        };
        let blocks = fetch_all(&api, "c", 2).await;
        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[4].id, Some(4));
        assert_eq!(*api.requested.lock().unwrap(), vec![1, 2, 3]);
    }
}
