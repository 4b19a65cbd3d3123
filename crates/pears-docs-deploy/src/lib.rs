//! Post-build deployment for the Pears documentation site.
//!
//! Checks that the generator has produced its output, copies it to an
//! alternate destination when one is configured and optionally hands it to a
//! hosting provider publish command.

pub mod context;
pub mod copy;
pub mod orchestrator;
pub mod publish;

pub use context::{DeployContext, DEFAULT_BUILD_OUTPUT, DEPLOY_DIR_VAR, DEPLOY_TO_GITHUB_VAR};
pub use copy::{copy_tree, placement, CopyError, CopyStats, Placement};
pub use orchestrator::{DeployError, DeployReport, DeployStage, Deployer};
pub use publish::{CommandPublisher, PublishError, Publisher, OUTPUT_PLACEHOLDER};
