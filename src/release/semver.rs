use std::cmp::Ordering;

use semver::Version;

use crate::config::LEGACY_SUFFIX_CUTOFF;

/// Cosmetic marker carried by some published tags; not part of the version
pub const COSMETIC_SUFFIX: &str = "-pro";

/// Parse a version string into a semver::Version, allowing a leading 'v'.
///
/// Examples:
/// - "v2.7.2" -> Version(2, 7, 2)
/// - "2.0.0-rc.1" -> Version(2, 0, 0, pre: rc.1)
/// - "2.7" -> None (partial versions are ranges, not versions)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let plain = version.strip_prefix('v').unwrap_or(version);
    Version::parse(plain).ok()
}

/// Strip the cosmetic suffix from a tag: "v2.5.0-pro" -> "v2.5.0"
pub fn clean_tag(tag: &str) -> &str {
    tag.strip_suffix(COSMETIC_SUFFIX).unwrap_or(tag)
}

/// Compare two versions by semver precedence, ignoring build metadata
pub fn precedence(a: &Version, b: &Version) -> Ordering {
    a.major
        .cmp(&b.major)
        .then(a.minor.cmp(&b.minor))
        .then(a.patch.cmp(&b.patch))
        .then_with(|| a.pre.cmp(&b.pre))
}

/// Whether a matched tag predates the cutoff and therefore needs the
/// distribution suffix re-attached
pub fn needs_legacy_suffix(tag: &str) -> bool {
    parse_version(tag)
        .map(|v| precedence(&v, &LEGACY_SUFFIX_CUTOFF) == Ordering::Less)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2.7.2", Some(Version::new(2, 7, 2)))]
    #[case("v2.7.2", Some(Version::new(2, 7, 2)))]
    #[case(" v1.0.0 ", Some(Version::new(1, 0, 0)))]
    #[case("2.7", None)]
    #[case("V2.7.2", None)]
    #[case("01.2.3", None)]
    #[case("nightly", None)]
    #[case("", None)]
    fn test_parse_version(#[case] input: &str, #[case] expected: Option<Version>) {
        assert_eq!(parse_version(input), expected);
    }

    #[test]
    fn parse_version_keeps_prerelease() {
        let version = parse_version("v2.0.0-rc.1").unwrap();
        assert_eq!(version.pre.as_str(), "rc.1");
    }

    #[rstest]
    #[case("v2.5.0-pro", "v2.5.0")]
    #[case("v2.8.0", "v2.8.0")]
    #[case("v1.0.0-pro-pro", "v1.0.0-pro")]
    #[case("v1.0.0-professional", "v1.0.0-professional")]
    #[case("nightly", "nightly")]
    fn test_clean_tag(#[case] tag: &str, #[case] expected: &str) {
        assert_eq!(clean_tag(tag), expected);
    }

    #[rstest]
    #[case("1.0.0", "1.0.0", Ordering::Equal)]
    #[case("1.0.0+build.1", "1.0.0+build.2", Ordering::Equal)]
    #[case("1.0.0-alpha", "1.0.0", Ordering::Less)]
    #[case("1.0.0-alpha.2", "1.0.0-alpha.10", Ordering::Less)]
    #[case("2.0.0", "1.9.9", Ordering::Greater)]
    fn test_precedence(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        let a = Version::parse(a).unwrap();
        let b = Version::parse(b).unwrap();
        assert_eq!(precedence(&a, &b), expected);
    }

    #[rstest]
    #[case("v2.5.0", true)]
    #[case("v2.6.99", true)]
    #[case("v2.7.0-rc.1", true)]
    #[case("v2.7.0", false)]
    #[case("v2.8.0", false)]
    #[case("v10.0.0", false)]
    fn test_needs_legacy_suffix(#[case] tag: &str, #[case] expected: bool) {
        assert_eq!(needs_legacy_suffix(tag), expected);
    }
}
