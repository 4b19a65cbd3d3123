//! Validate the site descriptor.

use std::path::Path;

use anyhow::Result;

use crate::config::Project;

/// Run the check command.
pub async fn run(config_path: &Path) -> Result<()> {
    let project = Project::load(config_path)?;
    let site = project.site()?;

    tracing::info!(
        "{}: {} nav links, {} sidebar sections ({} links), {} social links",
        site.title,
        site.nav.len(),
        site.sidebar.len(),
        site.sidebar_link_count(),
        site.social_links.len()
    );
    tracing::info!("{} is valid", project.path.display());

    Ok(())
}
