//! Export the site descriptor for the generator.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pears_docs_site::generator_config;

use crate::config::Project;

/// Default export location, relative to the project directory.
const DEFAULT_EXPORT: &str = ".vitepress/site.json";

/// Run the export command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let project = Project::load(config_path)?;
    let site = project.site()?;

    let output = output.unwrap_or_else(|| project.root.join(DEFAULT_EXPORT));
    let json = serde_json::to_string_pretty(&generator_config(site))?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(&output, json).with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!("Wrote {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_generator_json() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("docs.toml");
        crate::commands::init::run(&config, false).await.unwrap();

        run(&config, None).await.unwrap();

        let json = fs::read_to_string(temp.path().join(".vitepress/site.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "Pears");
        assert_eq!(value["themeConfig"]["sidebar"]["/guide/"][0]["text"], "Getting Started");
    }

    #[tokio::test]
    async fn requires_site_section() {
        let temp = tempdir().unwrap();

        let err = run(&temp.path().join("docs.toml"), None).await.unwrap_err();

        assert!(err.to_string().contains("No [site] section"));
    }
}
