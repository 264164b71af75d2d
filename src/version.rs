use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use semver::{BuildMetadata, Prerelease, Version};
use thiserror::Error;

/// A published release identifier.
///
/// Accepts what the upstream catalogs actually publish: an optional leading
/// `v`, two or three numeric components (leading zeros allowed, as in
/// `2023.03.0`), and an optional `-pre` and/or `+build` suffix. Ordering is
/// numeric per component; a pre-release sorts below its release and build
/// metadata breaks remaining ties.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseVersion {
    raw: String,
    parsed: Version,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version format: {0}")]
pub struct InvalidVersion(pub String);

impl ReleaseVersion {
    pub fn parse(input: &str) -> Result<Self, InvalidVersion> {
        let invalid = || InvalidVersion(input.to_string());

        let trimmed = input.trim();
        let raw = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let (core, suffix) = match raw.find(|c: char| c == '-' || c == '+') {
            Some(idx) => raw.split_at(idx),
            None => (raw, ""),
        };

        let numbers = core
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                part.parse::<u64>().ok()
            })
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;

        let mut parsed = match numbers.as_slice() {
            [major, minor] => Version::new(*major, *minor, 0),
            [major, minor, patch] => Version::new(*major, *minor, *patch),
            _ => return Err(invalid()),
        };

        let (pre, build) = match suffix.strip_prefix('-') {
            Some(rest) => match rest.split_once('+') {
                Some((pre, build)) => (Some(pre), Some(build)),
                None => (Some(rest), None),
            },
            None => (None, suffix.strip_prefix('+')),
        };

        // A dangling separator is not an identifier.
        if pre == Some("") || build == Some("") {
            return Err(invalid());
        }
        let pre = pre.unwrap_or("");
        let build = build.unwrap_or("");

        if !pre.is_empty() {
            parsed.pre = Prerelease::new(pre).map_err(|_| invalid())?;
        }
        if !build.is_empty() {
            parsed.build = BuildMetadata::new(build).map_err(|_| invalid())?;
        }

        Ok(Self {
            raw: raw.to_string(),
            parsed,
        })
    }

    /// The identifier as published, without a leading `v`.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn semver(&self) -> &Version {
        &self.parsed
    }

    /// True when both identifiers denote the same release, e.g. `4.2` and `4.2.0`.
    pub fn same_release(&self, other: &ReleaseVersion) -> bool {
        self.parsed == other.parsed
    }

    /// True when `self` is a build of `requested`: the same release, or the
    /// same major.minor.patch and pre-release when `requested` names no build.
    pub fn is_build_of(&self, requested: &ReleaseVersion) -> bool {
        let (mine, wanted) = (&self.parsed, &requested.parsed);
        self.same_release(requested)
            || (wanted.build.is_empty()
                && mine.major == wanted.major
                && mine.minor == wanted.minor
                && mine.patch == wanted.patch
                && mine.pre == wanted.pre)
    }
}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed
            .cmp(&other.parsed)
            .then_with(|| self.raw.cmp(&other.raw))
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for ReleaseVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReleaseVersion::parse(s)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// What a caller asked for: a concrete release or whatever is newest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    Latest,
    Exact(ReleaseVersion),
}

impl FromStr for VersionRequest {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("latest") {
            Ok(VersionRequest::Latest)
        } else {
            ReleaseVersion::parse(s).map(VersionRequest::Exact)
        }
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionRequest::Latest => f.write_str("latest"),
            VersionRequest::Exact(version) => version.fmt(f),
        }
    }
}
