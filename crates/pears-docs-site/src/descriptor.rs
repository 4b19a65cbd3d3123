//! The site descriptor: identity, navigation and theme links.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::target::{LinkTarget, SectionPath};

/// Declarative description of the documentation site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title
    pub title: String,

    /// Site description for SEO
    pub description: String,

    /// Theme logo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LinkTarget>,

    /// Top navigation bar, in display order
    #[serde(default, alias = "navigation")]
    pub nav: Vec<Link>,

    /// Sidebar groups keyed by the route prefix they apply to
    #[serde(default, alias = "sidebar_groups", alias = "sidebarGroups")]
    pub sidebar: BTreeMap<SectionPath, Vec<SidebarGroup>>,

    /// Social icons shown in the navigation bar
    #[serde(default, alias = "socialLinks")]
    pub social_links: Vec<SocialLink>,
}

/// A labelled link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub target: LinkTarget,
}

/// A titled group of sidebar links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarGroup {
    pub title: String,
    #[serde(default)]
    pub items: Vec<Link>,
}

/// A social icon link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub platform: SocialPlatform,
    pub target: LinkTarget,
}

/// Social icon of a [`SocialLink`].
///
/// Icons the theme ships are named variants; any other lowercase slug is
/// kept as [`SocialPlatform::Other`] and passed through to the theme as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SocialPlatform {
    Bluesky,
    Discord,
    Facebook,
    Github,
    Gitlab,
    Instagram,
    Linkedin,
    Mastodon,
    Npm,
    Slack,
    Twitter,
    X,
    Youtube,
    Other(String),
}

/// Why a platform name was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("Social platform must not be empty")]
    Empty,

    #[error("Social platform '{0}' must be a lowercase icon name like 'github' or 'npm'")]
    Invalid(String),
}

fn icon_slug() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("icon slug pattern"))
}

impl SocialPlatform {
    /// Parse an icon name.
    pub fn parse(raw: &str) -> Result<Self, PlatformError> {
        let platform = match raw {
            "" => return Err(PlatformError::Empty),
            "bluesky" => Self::Bluesky,
            "discord" => Self::Discord,
            "facebook" => Self::Facebook,
            "github" => Self::Github,
            "gitlab" => Self::Gitlab,
            "instagram" => Self::Instagram,
            "linkedin" => Self::Linkedin,
            "mastodon" => Self::Mastodon,
            "npm" => Self::Npm,
            "slack" => Self::Slack,
            "twitter" => Self::Twitter,
            "x" => Self::X,
            "youtube" => Self::Youtube,
            other if icon_slug().is_match(other) => Self::Other(other.to_string()),
            other => return Err(PlatformError::Invalid(other.to_string())),
        };
        Ok(platform)
    }

    /// Icon name understood by the generator theme.
    pub fn icon(&self) -> &str {
        match self {
            Self::Bluesky => "bluesky",
            Self::Discord => "discord",
            Self::Facebook => "facebook",
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Instagram => "instagram",
            Self::Linkedin => "linkedin",
            Self::Mastodon => "mastodon",
            Self::Npm => "npm",
            Self::Slack => "slack",
            Self::Twitter => "twitter",
            Self::X => "x",
            Self::Youtube => "youtube",
            Self::Other(icon) => icon,
        }
    }
}

impl TryFrom<String> for SocialPlatform {
    type Error = PlatformError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<SocialPlatform> for String {
    fn from(platform: SocialPlatform) -> Self {
        platform.icon().to_string()
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.icon())
    }
}

/// Errors that can occur when loading a site descriptor.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("Failed to parse site descriptor: {0}")]
    Parse(String),

    #[error("Site title must not be empty")]
    EmptyTitle,

    #[error("Empty label at {0}")]
    EmptyLabel(String),

    #[error("Empty group title at {0}")]
    EmptyGroupTitle(String),

    #[error("Social link for {platform} must be an absolute URL, got {target}")]
    SocialLinkNotExternal { platform: String, target: String },
}

impl SiteConfig {
    /// Parse and validate a descriptor from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, SiteError> {
        let site: SiteConfig =
            toml::from_str(source).map_err(|e| SiteError::Parse(e.to_string()))?;
        site.validate()?;
        Ok(site)
    }

    /// Read, parse and validate a descriptor file.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let source = fs::read_to_string(path).map_err(|e| SiteError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Check the invariants that deserialization alone cannot express.
    ///
    /// Link targets and section paths are already checked by their types;
    /// this covers empty labels and titles and social links that point
    /// inside the site. Whether a sidebar section has matching pages is not
    /// checked here.
    pub fn validate(&self) -> Result<(), SiteError> {
        if self.title.trim().is_empty() {
            return Err(SiteError::EmptyTitle);
        }

        check_links(&self.nav, "nav")?;

        for (section, groups) in &self.sidebar {
            for (i, group) in groups.iter().enumerate() {
                let location = format!("sidebar.\"{section}\"[{i}]");
                if group.title.trim().is_empty() {
                    return Err(SiteError::EmptyGroupTitle(location));
                }
                check_links(&group.items, &format!("{location}.items"))?;
            }
        }

        for social in &self.social_links {
            if !social.target.is_external() {
                return Err(SiteError::SocialLinkNotExternal {
                    platform: social.platform.to_string(),
                    target: social.target.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Total number of links in all sidebar groups.
    pub fn sidebar_link_count(&self) -> usize {
        self.sidebar
            .values()
            .flatten()
            .map(|group| group.items.len())
            .sum()
    }
}

fn check_links(links: &[Link], location: &str) -> Result<(), SiteError> {
    for (i, link) in links.iter().enumerate() {
        if link.label.trim().is_empty() {
            return Err(SiteError::EmptyLabel(format!("{location}[{i}]")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const MINIMAL: &str = r#"
title = "Pears"
description = "Package manager"

[[nav]]
label = "Guide"
target = "/guide/"

[[sidebar."/guide/"]]
title = "Getting Started"
items = [
    { label = "Introduction", target = "/guide/" },
    { label = "Installation", target = "/guide/installation" },
]

[[social_links]]
platform = "github"
target = "https://github.com/dunnoconz/pears"
"#;

    #[test]
    fn loads_valid_descriptor() {
        let site = SiteConfig::from_toml_str(MINIMAL).unwrap();

        assert_eq!(site.title, "Pears");
        assert_eq!(
            site.nav,
            vec![Link {
                label: "Guide".to_string(),
                target: LinkTarget::Site("/guide/".to_string()),
            }]
        );

        let guide = &site.sidebar[&SectionPath::parse("/guide/").unwrap()];
        assert_eq!(guide.len(), 1);
        assert_eq!(guide[0].items[1].target.as_str(), "/guide/installation");
        assert_eq!(site.sidebar_link_count(), 2);
        assert_eq!(site.social_links[0].platform, SocialPlatform::Github);
        assert!(site.logo.is_none());
    }

    #[test]
    fn rejects_unrooted_nav_target() {
        let source = r#"
title = "Pears"
description = "d"
nav = [{ label = "Guide", target = "guide/" }]
"#;
        let err = SiteConfig::from_toml_str(source).unwrap_err();

        assert!(matches!(err, SiteError::Parse(_)));
        assert!(err.to_string().contains("must be an absolute URL or start with '/'"));
    }

    #[test]
    fn rejects_unrooted_section_path() {
        let source = r#"
title = "Pears"
description = "d"

[[sidebar."guide"]]
title = "Guide"
"#;
        assert!(matches!(
            SiteConfig::from_toml_str(source),
            Err(SiteError::Parse(_))
        ));
    }

    #[test]
    fn accepts_any_icon_slug() {
        let source = r#"
title = "Pears"
description = "d"
social_links = [
    { platform = "npm", target = "https://www.npmjs.com/package/pears" },
    { platform = "codeberg", target = "https://codeberg.org/pears" },
]
"#;
        let site = SiteConfig::from_toml_str(source).unwrap();

        assert_eq!(site.social_links[0].platform, SocialPlatform::Npm);
        assert_eq!(
            site.social_links[1].platform,
            SocialPlatform::Other("codeberg".to_string())
        );
        assert_eq!(site.social_links[1].platform.icon(), "codeberg");
    }

    #[test]
    fn rejects_malformed_platform() {
        assert_eq!(SocialPlatform::parse(""), Err(PlatformError::Empty));
        assert_eq!(
            SocialPlatform::parse("My Space"),
            Err(PlatformError::Invalid("My Space".to_string()))
        );
        assert!(SocialPlatform::parse("GitHub").is_err());

        let source = r#"
title = "Pears"
description = "d"
social_links = [{ platform = "My Space", target = "https://myspace.com/pears" }]
"#;
        let err = SiteConfig::from_toml_str(source).unwrap_err();
        assert!(err.to_string().contains("lowercase icon name"));
    }

    #[test]
    fn accepts_data_model_field_names() {
        let source = r#"
title = "Pears"
description = "d"
navigation = [{ label = "Guide", target = "/guide/" }]
socialLinks = [{ platform = "github", target = "https://github.com/dunnoconz/pears" }]

[[sidebarGroups."/guide/"]]
title = "Guide"
items = [{ label = "Introduction", target = "/guide/" }]
"#;
        let site = SiteConfig::from_toml_str(source).unwrap();

        assert_eq!(site.nav.len(), 1);
        assert_eq!(site.sidebar_link_count(), 1);
        assert_eq!(site.social_links[0].platform, SocialPlatform::Github);
    }

    #[test]
    fn rejects_unknown_fields() {
        let source = r#"
title = "Pears"
description = "d"
theme = "dark"
"#;
        assert!(SiteConfig::from_toml_str(source).is_err());
    }

    #[test]
    fn rejects_empty_labels() {
        let source = r#"
title = "Pears"
description = "d"

[[sidebar."/reference/"]]
title = "API Reference"
items = [{ label = "  ", target = "/reference/commands" }]
"#;
        let err = SiteConfig::from_toml_str(source).unwrap_err();

        match err {
            SiteError::EmptyLabel(location) => {
                assert_eq!(location, "sidebar.\"/reference/\"[0].items[0]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_empty_title() {
        let source = "title = \"\"\ndescription = \"d\"\n";

        assert!(matches!(
            SiteConfig::from_toml_str(source),
            Err(SiteError::EmptyTitle)
        ));
    }

    #[test]
    fn rejects_site_relative_social_link() {
        let source = r#"
title = "Pears"
description = "d"
social_links = [{ platform = "github", target = "/github" }]
"#;
        assert!(matches!(
            SiteConfig::from_toml_str(source),
            Err(SiteError::SocialLinkNotExternal { .. })
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let site = SiteConfig::load(file.path()).unwrap();

        assert_eq!(site.description, "Package manager");
    }

    #[test]
    fn reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let err = SiteConfig::load(&dir.path().join("missing.toml")).unwrap_err();

        assert!(matches!(err, SiteError::Read { .. }));
    }
}
