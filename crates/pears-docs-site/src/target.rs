//! Link targets and sidebar section paths.
//!
//! Every `target` in the descriptor is either an absolute URL or a path
//! rooted at the site (`/guide/installation`). Both are checked when the
//! descriptor is deserialized, so a loaded [`SiteConfig`](crate::SiteConfig)
//! never carries a malformed link.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Where a navigation entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LinkTarget {
    /// Absolute URL with scheme and host
    External(String),

    /// Path inside the site, always starting with `/`
    Site(String),
}

/// Errors produced when a link target or section path is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("Link target must not be empty")]
    Empty,

    #[error("Link target contains whitespace: {0:?}")]
    Whitespace(String),

    #[error("Protocol-relative link is not allowed: {0:?}")]
    ProtocolRelative(String),

    #[error("Link target must be an absolute URL or start with '/': {0:?}")]
    Unrooted(String),
}

fn absolute_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^/?#]+").expect("absolute URL pattern")
    })
}

/// Checks shared by link targets and section paths.
fn check_rooted(raw: &str) -> Result<(), TargetError> {
    if raw.is_empty() {
        return Err(TargetError::Empty);
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(TargetError::Whitespace(raw.to_string()));
    }
    if raw.starts_with("//") {
        return Err(TargetError::ProtocolRelative(raw.to_string()));
    }
    Ok(())
}

impl LinkTarget {
    /// Parse a raw target string.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        check_rooted(raw)?;

        if raw.starts_with('/') {
            Ok(Self::Site(raw.to_string()))
        } else if absolute_url().is_match(raw) {
            Ok(Self::External(raw.to_string()))
        } else {
            Err(TargetError::Unrooted(raw.to_string()))
        }
    }

    /// The target as written in the descriptor.
    pub fn as_str(&self) -> &str {
        match self {
            Self::External(url) => url,
            Self::Site(path) => path,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }
}

impl TryFrom<String> for LinkTarget {
    type Error = TargetError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<LinkTarget> for String {
    fn from(target: LinkTarget) -> Self {
        match target {
            LinkTarget::External(url) => url,
            LinkTarget::Site(path) => path,
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route prefix a sidebar applies to (e.g. `/guide/`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SectionPath(String);

impl SectionPath {
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        check_rooted(raw)?;
        if !raw.starts_with('/') {
            return Err(TargetError::Unrooted(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SectionPath {
    type Error = TargetError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<SectionPath> for String {
    fn from(path: SectionPath) -> Self {
        path.0
    }
}

impl fmt::Display for SectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
