//! Tag index loader
//!
//! Fetches every release tag published for a distribution and exposes them
//! alongside their cleaned form used for version matching.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::release::error::{FetchError, ResolveError};
use crate::release::feed::{FeedClient, FeedResponse};
use crate::release::semver::clean_tag;
use crate::release::types::Distribution;

#[derive(Debug, Deserialize)]
struct FeedTag {
    tag_name: String,
}

/// Raw tags of a distribution as published by the feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagIndex {
    tags: Vec<String>,
}

impl TagIndex {
    pub fn new(tags: Vec<String>) -> Self {
        Self { tags }
    }

    pub fn raw(&self) -> &[String] {
        &self.tags
    }

    /// Tags with the cosmetic suffix removed, in feed order
    pub fn cleaned(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| clean_tag(tag))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Interpret a tag index response
///
/// A 404 or a body that holds no JSON array means "nothing published" and
/// yields an empty list; other error statuses and malformed entries fail.
pub fn parse_tag_index(response: &FeedResponse) -> Result<Vec<String>, FetchError> {
    if response.status == 404 {
        return Ok(Vec::new());
    }
    if response.is_error() {
        return Err(FetchError::Status {
            status: response.status,
            body: response.body.clone(),
        });
    }
    if response.body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(&response.body)?;
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let tags: Vec<FeedTag> = serde_json::from_value(value)?;

    Ok(tags.into_iter().map(|t| t.tag_name).collect())
}

/// Load the tag index of a distribution from its feed URL
///
/// Any failure, and an empty index, surface as "Cannot download <distribution> tags".
pub async fn load_tags(
    client: &dyn FeedClient,
    distribution: &Distribution,
    url: &str,
) -> Result<TagIndex, ResolveError> {
    debug!("Downloading {}", url);

    let tags = client
        .get(url)
        .await
        .and_then(|response| parse_tag_index(&response))
        .map_err(|source| {
            warn!("Failed to load {} tags from {}: {}", distribution, url, source);
            ResolveError::TagIndex {
                distribution: distribution.to_string(),
                source,
            }
        })?;

    if tags.is_empty() {
        return Err(ResolveError::NoTags {
            distribution: distribution.to_string(),
        });
    }
    debug!("Found {} tags in total", tags.len());

    Ok(TagIndex::new(tags))
}
