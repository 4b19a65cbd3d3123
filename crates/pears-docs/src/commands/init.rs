//! Create a starter docs.toml.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pears_docs_site::defaults;

use crate::config::{ConfigFile, DeploySettings};

const HEADER: &str = "# Pears documentation site\n\
# `pears-docs check` validates this file, `pears-docs` deploys the build.\n\n";

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    let config = ConfigFile {
        site: Some(defaults::pears()),
        deploy: DeploySettings::default(),
    };
    let body = toml::to_string_pretty(&config).context("Failed to serialize config")?;

    fs::write(config_path, format!("{HEADER}{body}"))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Project;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_loadable_config() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docs.toml");

        run(&path, false).await.unwrap();

        let project = Project::load(&path).unwrap();
        assert_eq!(project.site().unwrap(), &defaults::pears());
        assert_eq!(project.config.deploy.publish_command[0], "npx");
    }

    #[tokio::test]
    async fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("docs.toml");
        fs::write(&path, "[deploy]\n").unwrap();

        run(&path, false).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[deploy]\n");

        run(&path, true).await.unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with(HEADER));
    }
}
