//! Deploy orchestration: check, copy, publish.

use std::path::PathBuf;

use crate::context::DeployContext;
use crate::copy::{copy_tree, placement, CopyError, CopyStats, Placement};
use crate::publish::{PublishError, Publisher};

/// Stages a deploy passes through.
///
/// `Idle -> Checked -> (Copied)? -> (Published)? -> Succeeded`, with any
/// stage able to end in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStage {
    Idle,
    Checked,
    Copied,
    Published,
    Succeeded,
    Failed,
}

/// Errors that end a deploy.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error(
        "Build directory does not exist: {}. Run the docs build first.",
        .0.display()
    )]
    BuildMissing(PathBuf),

    #[error("Copy failed: {0}")]
    CopyFailed(#[from] CopyError),

    #[error("Publish failed: {0}")]
    PublishFailed(#[from] PublishError),
}

/// Outcome of a successful deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    /// Stages visited, starting at `Idle` and ending at `Succeeded`
    pub stages: Vec<DeployStage>,

    /// Copy counts, when a copy ran
    pub copied: Option<CopyStats>,

    /// Final destination
    pub destination: PathBuf,
}

impl DeployReport {
    pub fn published(&self) -> bool {
        self.stages.contains(&DeployStage::Published)
    }
}

/// Runs deploys against a publisher.
pub struct Deployer<P> {
    publisher: P,
}

impl<P: Publisher> Deployer<P> {
    pub fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// Run one deploy.
    ///
    /// Stops at the first failure. A copy that completed before a failed
    /// publish is left in place.
    pub fn deploy(&self, ctx: &DeployContext) -> Result<DeployReport, DeployError> {
        let mut run = Run::default();

        let result = self.run_stages(ctx, &mut run);
        if let Err(e) = &result {
            run.advance(DeployStage::Failed);
            tracing::debug!("Deploy failed after {:?}: {}", run.stages, e);
        }
        result
    }

    fn run_stages(&self, ctx: &DeployContext, run: &mut Run) -> Result<DeployReport, DeployError> {
        if !ctx.build_output.is_dir() {
            return Err(DeployError::BuildMissing(ctx.build_output.clone()));
        }
        run.advance(DeployStage::Checked);

        let mut copied = None;
        if ctx.copy_required() {
            if placement(&ctx.build_output, &ctx.destination)? == Placement::Same {
                tracing::info!(
                    "{} resolves to the build output, nothing to copy",
                    ctx.destination.display()
                );
            } else {
                tracing::info!("Copying files to {}...", ctx.destination.display());
                let stats = copy_tree(&ctx.build_output, &ctx.destination)?;
                tracing::info!(
                    "Copied {} files ({} bytes) in {} directories",
                    stats.files,
                    stats.bytes,
                    stats.directories
                );
                copied = Some(stats);
                run.advance(DeployStage::Copied);
            }
        }

        if ctx.publish {
            tracing::info!("Publishing with `{}`...", self.publisher.name());
            self.publisher.publish(&ctx.build_output)?;
            run.advance(DeployStage::Published);
        }

        run.advance(DeployStage::Succeeded);

        Ok(DeployReport {
            stages: run.stages.clone(),
            copied,
            destination: ctx.destination.clone(),
        })
    }
}

/// Stage trace for one deploy.
#[derive(Debug)]
struct Run {
    stages: Vec<DeployStage>,
}

impl Default for Run {
    fn default() -> Self {
        Self {
            stages: vec![DeployStage::Idle],
        }
    }
}

impl Run {
    fn advance(&mut self, next: DeployStage) {
        tracing::debug!("Deploy stage: {:?}", next);
        self.stages.push(next);
    }
}
