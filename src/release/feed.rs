//! Feed client trait for fetching the GoReleaser release feed

#[cfg(test)]
use mockall::automock;

use crate::release::error::FetchError;
use crate::release::types::Distribution;

/// Raw response of a feed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub status: u16,
    pub body: String,
}

impl FeedResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Statuses from 400 upwards are treated as failures
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }
}

/// Trait for fetching documents from the release feed
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait FeedClient: Send + Sync {
    /// Issues a single GET request
    ///
    /// # Returns
    /// * `Ok(FeedResponse)` - Status code and body text, whatever the status
    /// * `Err(FetchError)` - If the request could not be performed
    async fn get(&self, url: &str) -> Result<FeedResponse, FetchError>;
}

/// Builds the feed URL for a distribution, e.g. `https://goreleaser.com/static/releases-pro.json`
pub fn feed_url(base_url: &str, distribution: &Distribution) -> String {
    format!(
        "{}/static/releases{}.json",
        base_url.trim_end_matches('/'),
        distribution.suffix()
    )
}
