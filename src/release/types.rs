use std::fmt;

use serde::{Deserialize, Serialize};

/// Distribution whose releases carry the `-pro` marker in the feed
const PRO_DISTRIBUTION: &str = "goreleaser-pro";

/// Suffix appended to the feed file name and to legacy tags of the pro distribution
const PRO_SUFFIX: &str = "-pro";

/// Release record as published by the release feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
}

impl Release {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
        }
    }
}

/// GoReleaser distribution selecting which release feed variant to query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Distribution(String);

impl Distribution {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn is_pro(&self) -> bool {
        self.0 == PRO_DISTRIBUTION
    }

    /// Suffix used both in the feed file name and for pre-2.7.0 pro tags
    pub fn suffix(&self) -> &'static str {
        if self.is_pro() { PRO_SUFFIX } else { "" }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
