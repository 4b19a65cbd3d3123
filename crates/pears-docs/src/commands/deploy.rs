//! Deploy the built site.

use std::path::Path;

use anyhow::{Context, Result};
use pears_docs_deploy::{CommandPublisher, DeployContext, DeployError, Deployer};

use crate::config::Project;

/// Run the deploy command.
pub async fn run(config_path: &Path) -> Result<()> {
    let project = Project::load(config_path)?;

    let ctx = DeployContext::from_env(&project.build_output(), |key| std::env::var(key).ok());
    let publisher = CommandPublisher::new(project.config.deploy.publish_command.clone())
        .working_dir(&project.root);

    tracing::info!("Deploying documentation...");

    // Copying and the publish command block, keep them off the runtime threads.
    let result = tokio::task::spawn_blocking(move || Deployer::new(publisher).deploy(&ctx))
        .await
        .context("Deploy task panicked")?;

    let report = match result {
        Ok(report) => report,
        Err(e @ DeployError::BuildMissing(_)) => return Err(e.into()),
        Err(e) => return Err(anyhow::Error::new(e).context("Deployment failed")),
    };

    tracing::debug!("Stages: {:?}", report.stages);
    if report.copied.is_some() {
        tracing::info!("Site available at {}", report.destination.display());
    }
    if report.published() {
        tracing::info!("Published to hosting provider");
    }
    tracing::info!("Documentation deployed successfully!");

    Ok(())
}
