//! reqwest-backed feed client

use tracing::debug;

use crate::config::DEFAULT_USER_AGENT;
use crate::release::error::FetchError;
use crate::release::feed::{FeedClient, FeedResponse};

/// Feed client performing plain HTTP GET requests
pub struct HttpFeedClient {
    client: reqwest::Client,
}

impl HttpFeedClient {
    /// Creates a new HttpFeedClient sending the given user agent
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    pub fn with_default_user_agent() -> Result<Self, FetchError> {
        Self::new(DEFAULT_USER_AGENT)
    }
}

#[async_trait::async_trait]
impl FeedClient for HttpFeedClient {
    async fn get(&self, url: &str) -> Result<FeedResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("GET {} returned status {}", url, status);

        Ok(FeedResponse { status, body })
    }
}
