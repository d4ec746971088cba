use std::path::{Path, PathBuf};

use anyhow::Context;
use semver::Version;
use serde::Deserialize;

// =============================================================================
// Release feed constants
// =============================================================================

/// Host serving the GoReleaser release feeds
pub const DEFAULT_FEED_BASE_URL: &str = "https://goreleaser.com";

/// User agent sent with every feed request
pub const DEFAULT_USER_AGENT: &str = "goreleaser-action";

/// Distribution resolved when none is given
pub const DEFAULT_DISTRIBUTION: &str = "goreleaser";

/// Version specifier resolved when none is given
pub const DEFAULT_VERSION: &str = "~> v2";

/// Sentinel for the newest stable major line
pub const LATEST: &str = "latest";

/// Range `latest` is locked to
pub const LATEST_VERSION_RANGE: &str = "~> v2";

/// Sentinel tag that is returned without any lookup
pub const NIGHTLY: &str = "nightly";

/// Matched versions below this one get the distribution suffix re-attached
pub const LEGACY_SUFFIX_CUTOFF: Version = Version::new(2, 7, 0);

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Base URL the `/static/releases*.json` feeds are served from
    pub feed_base_url: String,
    /// User agent for feed requests
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            feed_base_url: DEFAULT_FEED_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Reads a JSON configuration file; missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Returns the path to the data directory for goreleaser-resolve.
/// Uses $XDG_DATA_HOME/goreleaser-resolve if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/goreleaser-resolve,
/// or ./goreleaser-resolve if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("goreleaser-resolve")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn resolver_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<ResolverConfig>(json!({
            "feedBaseUrl": "http://localhost:8080"
        }))
        .unwrap();

        assert_eq!(result.feed_base_url, "http://localhost:8080");
        assert_eq!(result.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn resolver_config_from_empty_object_is_default() {
        let result = serde_json::from_value::<ResolverConfig>(json!({})).unwrap();

        assert_eq!(result, ResolverConfig::default());
    }

    #[test]
    fn from_file_reads_json_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"feedBaseUrl": "https://mirror.example.com", "userAgent": "ci"}}"#
        )
        .unwrap();

        let result = ResolverConfig::from_file(file.path()).unwrap();

        assert_eq!(
            result,
            ResolverConfig {
                feed_base_url: "https://mirror.example.com".to_string(),
                user_agent: "ci".to_string(),
            }
        );
    }

    #[test]
    fn from_file_reports_the_path_on_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ResolverConfig::from_file(file.path()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/custom/data".to_string()),
            Some(PathBuf::from("/home/user")),
        );
        assert_eq!(path, PathBuf::from("/custom/data/goreleaser-resolve"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));
        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/goreleaser-resolve")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./goreleaser-resolve"));
    }
}
