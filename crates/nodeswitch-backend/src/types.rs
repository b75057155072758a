use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static SEMVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("semantic version pattern is valid")
});

/// Trim surrounding whitespace and a leading `v` that precedes a digit.
///
/// The `v` is kept when anything else follows it, so the result never starts
/// with something a second call would strip.
#[must_use]
pub fn strip_version_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix('v')
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_digit()))
        .unwrap_or(trimmed)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("Expected X.Y.Z format, got: {input}")]
    InvalidFormat { input: String },
}

/// A `major.minor.patch` Node.js version, always stored without the `v`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemanticVersion(String);

impl SemanticVersion {
    /// Parse `input` after stripping whitespace and an optional leading `v`.
    ///
    /// # Errors
    /// Returns [`VersionParseError::InvalidFormat`] unless the stripped input
    /// is exactly three dot-separated numeric components.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let stripped = strip_version_prefix(input);
        if SEMVER_PATTERN.is_match(stripped) {
            Ok(Self(stripped.to_string()))
        } else {
            Err(VersionParseError::InvalidFormat {
                input: stripped.to_string(),
            })
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SemanticVersion {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SemanticVersion> for String {
    fn from(version: SemanticVersion) -> Self {
        version.0
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for SemanticVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SemanticVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Active runtime version, or a sentinel when it cannot be determined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CurrentVersion {
    Active(SemanticVersion),
    #[default]
    Unavailable,
}

impl CurrentVersion {
    #[must_use]
    pub fn as_version(&self) -> Option<&SemanticVersion> {
        match self {
            Self::Active(version) => Some(version),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for CurrentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active(version) => write!(f, "{version}"),
            Self::Unavailable => write!(f, "Not Available"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_v_prefix_and_whitespace() {
        let version = SemanticVersion::parse("  v18.19.0 \n").unwrap();
        assert_eq!(version.as_str(), "18.19.0");
        assert_eq!(version.to_string(), "18.19.0");
    }

    #[test]
    fn parse_accepts_bare_version() {
        let version: SemanticVersion = "20.11.0".parse().unwrap();
        assert_eq!(version, "20.11.0");
    }

    #[test]
    fn parse_rejects_partial_versions() {
        assert!(SemanticVersion::parse("20").is_err());
        assert!(SemanticVersion::parse("v20.11").is_err());
        assert!(SemanticVersion::parse("lts/iron").is_err());
        assert!(SemanticVersion::parse("").is_err());
    }

    #[test]
    fn parse_rejects_extra_components_and_suffixes() {
        assert!(SemanticVersion::parse("20.11.0.1").is_err());
        assert!(SemanticVersion::parse("21.0.0-nightly").is_err());
        assert!(SemanticVersion::parse("20.11.0; rm -rf ~").is_err());
    }

    #[test]
    fn parse_strips_only_one_prefix() {
        let error = SemanticVersion::parse("vv20.11.0").unwrap_err();
        assert_eq!(
            error,
            VersionParseError::InvalidFormat {
                input: "vv20.11.0".to_string()
            }
        );
    }

    #[test]
    fn strip_keeps_v_not_followed_by_digit() {
        assert_eq!(strip_version_prefix("vv1.2.3"), "vv1.2.3");
        assert_eq!(strip_version_prefix("v 20.11.0"), "v 20.11.0");
        assert_eq!(strip_version_prefix(" v20.11.0\n"), "20.11.0");
        assert!(SemanticVersion::parse("v 20.11.0").is_err());
    }

    #[test]
    fn parse_rejects_non_ascii_digits() {
        assert!(SemanticVersion::parse("٢٠.١.٠").is_err());
    }

    #[test]
    fn strip_version_prefix_is_idempotent() {
        for input in [
            "v20.11.0",
            "20.11.0",
            "  v18.0.0  ",
            "vv1.2.3",
            "v 20.11.0",
            "v v1.0.0",
            "v",
            "",
            "lts",
        ] {
            let once = strip_version_prefix(input);
            assert_eq!(strip_version_prefix(once), once, "input: {input:?}");
        }
    }

    #[test]
    fn revalidating_a_stripped_version_is_stable() {
        let first = SemanticVersion::parse("v21.5.0").unwrap();
        let second = SemanticVersion::parse(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn serde_uses_plain_string_and_validates() {
        let version = SemanticVersion::parse("v20.11.0").unwrap();
        assert_eq!(serde_json::to_string(&version).unwrap(), "\"20.11.0\"");

        let parsed: SemanticVersion = serde_json::from_str("\"v18.19.0\"").unwrap();
        assert_eq!(parsed, "18.19.0");

        assert!(serde_json::from_str::<SemanticVersion>("\"latest\"").is_err());
    }

    #[test]
    fn current_version_sentinel_displays_not_available() {
        assert_eq!(CurrentVersion::Unavailable.to_string(), "Not Available");
        assert!(CurrentVersion::Unavailable.as_version().is_none());
        assert_eq!(CurrentVersion::default(), CurrentVersion::Unavailable);
    }

    #[test]
    fn active_current_version_exposes_inner_version() {
        let current = CurrentVersion::Active(SemanticVersion::parse("20.11.0").unwrap());
        assert_eq!(current.to_string(), "20.11.0");
        assert_eq!(current.as_version().map(SemanticVersion::as_str), Some("20.11.0"));
    }
}
