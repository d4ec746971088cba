//! Version resolver
//!
//! Turns a version specifier into a concrete release tag and verifies the tag is
//! published in the distribution's feed.
//!
//! Resolution steps:
//! 1. `latest` is locked to [`LATEST_VERSION_RANGE`] (with a warning)
//! 2. `nightly` is returned as-is, without any request
//! 3. anything else is matched against the tag index: valid versions and ranges
//!    pick the highest satisfying tag, other strings are used literally
//! 4. the resulting tag must exist in the release list of the feed

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{LATEST, LATEST_VERSION_RANGE, NIGHTLY, ResolverConfig};
use crate::release::error::{FetchError, ResolveError};
use crate::release::feed::{FeedClient, feed_url};
use crate::release::feeds::HttpFeedClient;
use crate::release::range::VersionSpec;
use crate::release::semver::{clean_tag, needs_legacy_suffix};
use crate::release::tags::{TagIndex, load_tags};
use crate::release::types::{Distribution, Release};

/// Classification of a caller-supplied version specifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specifier<'a> {
    /// Newest stable major line
    Latest,
    /// Literal `nightly` tag, never looked up
    Nightly,
    /// Exact tag, range, or opaque string
    Other(&'a str),
}

impl<'a> Specifier<'a> {
    pub fn classify(version: &'a str) -> Self {
        match version {
            LATEST => Specifier::Latest,
            NIGHTLY => Specifier::Nightly,
            other => Specifier::Other(other),
        }
    }
}

/// Pick the tag to verify for a specifier
///
/// Strings that are neither a version nor a range are returned unchanged.
/// Matches below the legacy cutoff get the distribution suffix back.
pub fn match_tag(
    index: &TagIndex,
    distribution: &Distribution,
    version: &str,
) -> Result<String, ResolveError> {
    // An exact version is also a valid range
    let Some(spec) = VersionSpec::parse(clean_tag(version)) else {
        return Ok(version.to_string());
    };

    let matched = spec.max_satisfying(index.cleaned()).ok_or_else(|| {
        ResolveError::NoSatisfyingVersion {
            version: version.to_string(),
            distribution: distribution.to_string(),
        }
    })?;

    if needs_legacy_suffix(matched) {
        Ok(format!("{}{}", matched, distribution.suffix()))
    } else {
        Ok(matched.to_string())
    }
}

/// Resolves version specifiers against the release feed
pub struct ReleaseResolver {
    client: Arc<dyn FeedClient>,
    feed_base_url: String,
}

impl ReleaseResolver {
    /// Create a new ReleaseResolver with the given feed client
    pub fn new(client: Arc<dyn FeedClient>, feed_base_url: impl Into<String>) -> Self {
        Self {
            client,
            feed_base_url: feed_base_url.into(),
        }
    }

    /// Create a ReleaseResolver talking HTTP to the configured feed
    pub fn from_config(config: &ResolverConfig) -> Result<Self, FetchError> {
        let client = HttpFeedClient::new(&config.user_agent)?;
        Ok(Self::new(Arc::new(client), config.feed_base_url.clone()))
    }

    pub fn feed_url(&self, distribution: &Distribution) -> String {
        feed_url(&self.feed_base_url, distribution)
    }

    /// Resolve a version specifier to a published release
    ///
    /// `latest` is rewritten to [`LATEST_VERSION_RANGE`] before delegating to
    /// [`ReleaseResolver::get_release_tag`].
    pub async fn get_release(
        &self,
        distribution: &Distribution,
        version: &str,
    ) -> Result<Release, ResolveError> {
        let version = match Specifier::classify(version) {
            Specifier::Latest => {
                warn!(
                    "You are using '{}' as default version. Will lock to '{}'.",
                    LATEST, LATEST_VERSION_RANGE
                );
                LATEST_VERSION_RANGE
            }
            Specifier::Nightly | Specifier::Other(_) => version,
        };

        self.get_release_tag(distribution, version).await
    }

    /// Resolve a version specifier without the `latest` rewrite
    ///
    /// `nightly` is returned without any request. Every other specifier costs
    /// two requests: the tag index, then the release list for verification.
    pub async fn get_release_tag(
        &self,
        distribution: &Distribution,
        version: &str,
    ) -> Result<Release, ResolveError> {
        if Specifier::classify(version) == Specifier::Nightly {
            return Ok(Release::new(NIGHTLY));
        }

        let url = self.feed_url(distribution);
        let tag = self.resolve_version(distribution, version, &url).await?;
        debug!("Resolved {} {} to tag {}", distribution, version, tag);

        self.find_release(version, &tag, &url).await
    }

    async fn resolve_version(
        &self,
        distribution: &Distribution,
        version: &str,
        url: &str,
    ) -> Result<String, ResolveError> {
        let index = load_tags(self.client.as_ref(), distribution, url).await?;
        match_tag(&index, distribution, version)
    }

    /// Look up the release record for `tag`; errors echo the original specifier
    async fn find_release(
        &self,
        version: &str,
        tag: &str,
        url: &str,
    ) -> Result<Release, ResolveError> {
        let response = self
            .client
            .get(url)
            .await
            .map_err(|source| ResolveError::ReleaseFetch {
                version: version.to_string(),
                url: url.to_string(),
                source,
            })?;

        if response.is_error() {
            warn!("Release feed returned status {}: {}", response.status, url);
            return Err(ResolveError::ReleaseStatus {
                version: version.to_string(),
                url: url.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        let releases: Vec<Release> =
            serde_json::from_str(&response.body).map_err(|e| ResolveError::ReleaseFetch {
                version: version.to_string(),
                url: url.to_string(),
                source: FetchError::InvalidJson(e),
            })?;

        releases
            .into_iter()
            .find(|release| release.tag_name == tag)
            .ok_or_else(|| ResolveError::ReleaseNotFound {
                version: version.to_string(),
                url: url.to_string(),
            })
    }
}
