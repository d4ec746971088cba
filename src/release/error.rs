use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Cannot download {distribution} tags")]
    TagIndex {
        distribution: String,
        #[source]
        source: FetchError,
    },

    #[error("Cannot download {distribution} tags")]
    NoTags { distribution: String },

    #[error("No {distribution} release satisfies {version}")]
    NoSatisfyingVersion {
        version: String,
        distribution: String,
    },

    #[error(
        "Failed to get GoReleaser release {version} from {url} with status code {status}: {body}"
    )]
    ReleaseStatus {
        version: String,
        url: String,
        status: u16,
        body: String,
    },

    #[error("Failed to get GoReleaser release {version} from {url}")]
    ReleaseFetch {
        version: String,
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Cannot find GoReleaser release {version} in {url}")]
    ReleaseNotFound { version: String, url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_index_errors_name_the_distribution() {
        let err = ResolveError::NoTags {
            distribution: "goreleaser-pro".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot download goreleaser-pro tags");

        let err = ResolveError::TagIndex {
            distribution: "goreleaser".to_string(),
            source: FetchError::Status {
                status: 500,
                body: "boom".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Cannot download goreleaser tags");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn release_status_error_includes_version_url_status_and_body() {
        let err = ResolveError::ReleaseStatus {
            version: "~> v2".to_string(),
            url: "https://goreleaser.com/static/releases.json".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Failed to get GoReleaser release ~> v2 from https://goreleaser.com/static/releases.json with status code 503: unavailable"
        );
    }
}
