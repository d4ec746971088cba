//! npm-style version range grammar
//!
//! Supports the range specifications accepted for release lookups:
//! - `1.2.3`, `v1.2.3`, `=1.2.3` - exact match
//! - `^1.2.3` - compatible with version (>=1.2.3 <2.0.0)
//! - `~1.2.3`, `~> v1.2.3` - approximately equivalent (>=1.2.3 <1.3.0)
//! - `>=1.2.3`, `>1.2.3`, `<=1.2.3`, `<1.2.3` - comparison operators
//! - `1`, `1.2`, `1.2.x`, `1.x`, `*`, empty - partial versions and wildcards
//! - `1.0.0 - 2.0.0` - hyphen range
//! - `>=1.0.0 <2.0.0` - AND of comparators, `^1.0.0 || ^2.0.0` - OR of sets
//!
//! Every form is expanded into plain comparators. Exclusive upper bounds use the
//! lowest pre-release (`<2.0.0-0`) so that pre-releases of the next line never match.

use std::cmp::Ordering;

use semver::{BuildMetadata, Prerelease, Version};

use crate::release::semver::{parse_version, precedence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        let ord = precedence(version, &self.version);
        match self.op {
            Op::Eq => ord == Ordering::Equal,
            Op::Gt => ord == Ordering::Greater,
            Op::Gte => ord != Ordering::Less,
            Op::Lt => ord == Ordering::Less,
            Op::Lte => ord != Ordering::Greater,
        }
    }
}

fn gte(version: Version) -> Comparator {
    Comparator::new(Op::Gte, version)
}

/// `<major.minor.patch-0`
fn below(major: u64, minor: u64, patch: u64) -> Comparator {
    let mut version = Version::new(major, minor, patch);
    version.pre = Prerelease::new("0").unwrap_or(Prerelease::EMPTY);
    Comparator::new(Op::Lt, version)
}

/// Version whose trailing components may be missing or wildcards: "2", "2.7", "2.7.x", "*"
#[derive(Debug, Clone, PartialEq, Eq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn parse(input: &str) -> Option<Self> {
        let input = input.strip_prefix('v').unwrap_or(input);

        let (input, build) = match input.split_once('+') {
            Some((version, build)) => (version, Some(build)),
            None => (input, None),
        };
        let (core, pre) = match input.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (input, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() > 3 {
            return None;
        }

        // Anything after the first wildcard is a wildcard too: "1.x.3" == "1.x"
        let mut numbers = [None; 3];
        let mut wildcard = false;
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if is_wildcard(part) {
                wildcard = true;
                continue;
            }
            let number = parse_number(part)?;
            if !wildcard {
                *slot = Some(number);
            }
        }
        let [major, minor, patch] = numbers;

        let pre = match pre {
            Some(pre) if patch.is_some() && !pre.is_empty() => Prerelease::new(pre).ok()?,
            Some(_) => return None,
            None => Prerelease::EMPTY,
        };
        if let Some(build) = build {
            if patch.is_none() || build.is_empty() {
                return None;
            }
            BuildMetadata::new(build).ok()?;
        }

        Some(Self {
            major,
            minor,
            patch,
            pre,
        })
    }

    /// Missing components filled with zeros
    fn floor(&self) -> Version {
        let mut version = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        version.pre = self.pre.clone();
        version
    }
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Numeric identifier without leading zeros
fn parse_number(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok()
}

/// `1.2.x` / `1` / `1.2.3` without operator
fn expand_xrange(partial: &Partial) -> Vec<Comparator> {
    match (partial.major, partial.minor, partial.patch) {
        (None, _, _) => vec![],
        (Some(major), None, _) => vec![
            gte(Version::new(major, 0, 0)),
            below(major.saturating_add(1), 0, 0),
        ],
        (Some(major), Some(minor), None) => vec![
            gte(Version::new(major, minor, 0)),
            below(major, minor.saturating_add(1), 0),
        ],
        (Some(_), Some(_), Some(_)) => vec![Comparator::new(Op::Eq, partial.floor())],
    }
}

/// `~1.2.3` / `~> 1.2`: patch-level changes, or minor-level when only the major is given
fn expand_tilde(partial: &Partial) -> Vec<Comparator> {
    match (partial.major, partial.minor) {
        (None, _) => vec![],
        (Some(major), None) => vec![
            gte(Version::new(major, 0, 0)),
            below(major.saturating_add(1), 0, 0),
        ],
        (Some(major), Some(minor)) => vec![
            gte(partial.floor()),
            below(major, minor.saturating_add(1), 0),
        ],
    }
}

/// `^1.2.3`: changes that do not modify the left-most non-zero component
fn expand_caret(partial: &Partial) -> Vec<Comparator> {
    let upper = match (partial.major, partial.minor, partial.patch) {
        (None, _, _) => return vec![],
        (Some(major), None, _) => below(major.saturating_add(1), 0, 0),
        (Some(0), Some(minor), None) => below(0, minor.saturating_add(1), 0),
        (Some(major), Some(_), None) => below(major.saturating_add(1), 0, 0),
        (Some(0), Some(0), Some(patch)) => below(0, 0, patch.saturating_add(1)),
        (Some(0), Some(minor), Some(_)) => below(0, minor.saturating_add(1), 0),
        (Some(major), Some(_), Some(_)) => below(major.saturating_add(1), 0, 0),
    };
    vec![gte(partial.floor()), upper]
}

/// `>1.2`, `<=1`, `=1.x` etc.
fn expand_primitive(op: Op, partial: &Partial) -> Vec<Comparator> {
    let (major, minor) = match (partial.major, partial.minor, partial.patch) {
        (Some(_), Some(_), Some(_)) => return vec![Comparator::new(op, partial.floor())],
        // `>*` and `<*` can never match
        (None, _, _) if matches!(op, Op::Gt | Op::Lt) => return vec![below(0, 0, 0)],
        (None, _, _) => return vec![],
        (Some(major), minor, _) => (major, minor),
    };

    match (op, minor) {
        (Op::Eq, _) => expand_xrange(partial),
        (Op::Gte, minor) => vec![gte(Version::new(major, minor.unwrap_or(0), 0))],
        (Op::Gt, None) => vec![gte(Version::new(major.saturating_add(1), 0, 0))],
        (Op::Gt, Some(minor)) => vec![gte(Version::new(major, minor.saturating_add(1), 0))],
        (Op::Lt, minor) => vec![below(major, minor.unwrap_or(0), 0)],
        (Op::Lte, None) => vec![below(major.saturating_add(1), 0, 0)],
        (Op::Lte, Some(minor)) => vec![below(major, minor.saturating_add(1), 0)],
    }
}

/// `1.2 - 2.3.4`: inclusive on both ends, partial ends cover their whole line
fn expand_hyphen(from: &Partial, to: &Partial) -> Vec<Comparator> {
    let mut set = Vec::new();
    if from.major.is_some() {
        set.push(gte(from.floor()));
    }
    match (to.major, to.minor, to.patch) {
        (None, _, _) => {}
        (Some(major), None, _) => set.push(below(major.saturating_add(1), 0, 0)),
        (Some(major), Some(minor), None) => set.push(below(major, minor.saturating_add(1), 0)),
        (Some(_), Some(_), Some(_)) => set.push(Comparator::new(Op::Lte, to.floor())),
    }
    set
}

const OPERATORS: [&str; 8] = ["~>", "~", "^", ">=", "<=", ">", "<", "="];

/// Parse a single comparator token such as `^1.2`, `~>v2` or `1.x`
fn parse_comparator(token: &str) -> Option<Vec<Comparator>> {
    if let Some(rest) = token.strip_prefix("~>").or_else(|| token.strip_prefix('~')) {
        return Partial::parse(rest).map(|p| expand_tilde(&p));
    }
    if let Some(rest) = token.strip_prefix('^') {
        return Partial::parse(rest).map(|p| expand_caret(&p));
    }

    let primitives = [
        (">=", Op::Gte),
        ("<=", Op::Lte),
        (">", Op::Gt),
        ("<", Op::Lt),
        ("=", Op::Eq),
    ];
    for (prefix, op) in primitives {
        if let Some(rest) = token.strip_prefix(prefix) {
            return Partial::parse(rest).map(|p| expand_primitive(op, &p));
        }
    }

    Partial::parse(token).map(|p| expand_xrange(&p))
}

/// Parse one `||`-separated comparator set
fn parse_set(input: &str) -> Option<Vec<Comparator>> {
    let input = input.trim();

    if let Some((from, to)) = input.split_once(" - ") {
        let from = Partial::parse(from.trim())?;
        let to = Partial::parse(to.trim())?;
        return Some(expand_hyphen(&from, &to));
    }

    // Operators may be separated from their version: "~> v2", ">= 1.0.0"
    let mut comparators = Vec::new();
    let mut pending_op: Option<&str> = None;
    for word in input.split_whitespace() {
        if OPERATORS.contains(&word) {
            if pending_op.replace(word).is_some() {
                return None;
            }
            continue;
        }
        let parsed = match pending_op.take() {
            Some(op) => parse_comparator(&format!("{op}{word}"))?,
            None => parse_comparator(word)?,
        };
        comparators.extend(parsed);
    }

    if pending_op.is_some() {
        return None;
    }
    Some(comparators)
}

/// Parsed range specification: any of the comparator sets must be satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSpec {
    sets: Vec<Vec<Comparator>>,
}

impl VersionSpec {
    /// Parse a range specification, returning None when it is not a valid range
    pub fn parse(spec: &str) -> Option<Self> {
        let sets = spec
            .split("||")
            .map(parse_set)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { sets })
    }

    /// Check if a version satisfies this spec
    ///
    /// A pre-release version only matches a set that mentions a pre-release
    /// of the same `major.minor.patch`.
    pub fn satisfies(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| {
            if !set.iter().all(|c| c.matches(version)) {
                return false;
            }
            if version.pre.is_empty() {
                return true;
            }
            set.iter().any(|c| {
                !c.version.pre.is_empty()
                    && c.version.major == version.major
                    && c.version.minor == version.minor
                    && c.version.patch == version.patch
            })
        })
    }

    /// Highest candidate satisfying this spec, returned as given
    ///
    /// Candidates that are not versions are skipped; on equal precedence the
    /// first occurrence wins.
    pub fn max_satisfying<'a, I>(&self, candidates: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(&'a str, Version)> = None;
        for candidate in candidates {
            let Some(version) = parse_version(candidate) else {
                continue;
            };
            if !self.satisfies(&version) {
                continue;
            }
            let is_higher = best
                .as_ref()
                .is_none_or(|(_, max)| precedence(max, &version) == Ordering::Less);
            if is_higher {
                best = Some((candidate, version));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}
