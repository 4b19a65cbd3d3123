//! docs.toml loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use pears_docs_deploy::{DEFAULT_BUILD_OUTPUT, OUTPUT_PLACEHOLDER};
use pears_docs_site::SiteConfig;
use serde::{Deserialize, Serialize};

/// Configuration file structure (docs.toml).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<SiteConfig>,
    #[serde(default)]
    pub deploy: DeploySettings,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeploySettings {
    /// Generator output, relative to the project directory
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Publish command; `{output}` is replaced with the build output path
    #[serde(default = "default_publish_command")]
    pub publish_command: Vec<String>,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            publish_command: default_publish_command(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_BUILD_OUTPUT)
}

fn default_publish_command() -> Vec<String> {
    vec![
        "npx".to_string(),
        "gh-pages".to_string(),
        "-d".to_string(),
        OUTPUT_PLACEHOLDER.to_string(),
    ]
}

/// A loaded config and the directory it lives in.
#[derive(Debug)]
pub struct Project {
    /// Directory containing the config file
    pub root: PathBuf,
    /// Config file path as given
    pub path: PathBuf,
    pub config: ConfigFile,
}

impl Project {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the config file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let root = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: ConfigFile = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            if let Some(site) = &config.site {
                site.validate()
                    .with_context(|| format!("Invalid [site] in {}", path.display()))?;
            }
            tracing::debug!("Loaded config from {}", path.display());
            config
        } else {
            tracing::debug!("{} not found, using defaults", path.display());
            ConfigFile::default()
        };

        Ok(Self {
            root,
            path: path.to_path_buf(),
            config,
        })
    }

    /// Generator output directory.
    pub fn build_output(&self) -> PathBuf {
        self.root.join(&self.config.deploy.output)
    }

    /// The site descriptor, which `check` and `export` require.
    pub fn site(&self) -> Result<&SiteConfig> {
        match &self.config.site {
            Some(site) => Ok(site),
            None => bail!(
                "No [site] section in {}. Run 'pears-docs init' to create one.",
                self.path.display()
            ),
        }
    }
}
