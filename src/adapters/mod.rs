//! Adapter interfaces for external systems.
//!
//! The pipeline only talks to Are.na through [`ArenaApi`], so tests can
//! substitute a scripted implementation for the HTTP client.

pub mod arena;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{ChannelInfo, ContentsPage};

// Re-export the Are.na client
pub use arena::ArenaClient;

/// Why a channel could not be opened
#[derive(Debug, Error)]
pub enum ChannelAccessError {
    /// 401/403: the channel is private
    #[error("channel is private (HTTP {status}); set it to \"open\" or \"closed\"")]
    AccessDenied { status: u16 },

    /// 404: no channel with this slug
    #[error("channel not found; check the channel slug")]
    NotFound,

    /// Any other non-success status
    #[error("channel request failed with HTTP {status}")]
    Status { status: u16 },

    /// Network, TLS or decode failure
    #[error("channel request failed: {0}")]
    Transport(String),
}

impl ChannelAccessError {
    /// Classify a non-success HTTP status
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::AccessDenied { status },
            404 => Self::NotFound,
            _ => Self::Status { status },
        }
    }
}

/// Read-only access to the Are.na channel endpoints
#[async_trait]
pub trait ArenaApi: Send + Sync {
    /// Fetch channel metadata; doubles as the accessibility check
    async fn channel(&self, slug: &str) -> Result<ChannelInfo, ChannelAccessError>;

    /// Fetch one page (1-based) of channel contents, newest first
    async fn contents_page(&self, slug: &str, page: u32, per: u32) -> Result<ContentsPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            ChannelAccessError::from_status(401),
            ChannelAccessError::AccessDenied { status: 401 }
        ));
        assert!(matches!(
            ChannelAccessError::from_status(403),
            ChannelAccessError::AccessDenied { status: 403 }
        ));
        assert!(matches!(
            ChannelAccessError::from_status(404),
            ChannelAccessError::NotFound
        ));
        assert!(matches!(
            ChannelAccessError::from_status(500),
            ChannelAccessError::Status { status: 500 }
        ));
    }
}
