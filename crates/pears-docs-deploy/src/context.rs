//! Per-invocation deploy settings resolved from the environment.

use std::path::{Path, PathBuf};

/// Overrides the copy destination.
pub const DEPLOY_DIR_VAR: &str = "DEPLOY_DIR";

/// Requests the hosting provider publish step when exactly `"true"`.
pub const DEPLOY_TO_GITHUB_VAR: &str = "DEPLOY_TO_GITHUB";

/// Where the generator writes the site, relative to the docs project.
pub const DEFAULT_BUILD_OUTPUT: &str = ".vitepress/dist";

/// Everything a single deploy needs, read once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployContext {
    /// Generator output directory
    pub build_output: PathBuf,

    /// Copy destination (equal to `build_output` when not overridden)
    pub destination: PathBuf,

    /// Run the publish step after copying
    pub publish: bool,
}

impl DeployContext {
    /// Build a context from an environment lookup.
    ///
    /// `lookup` is `std::env::var` in the binary and a fake in tests. An empty
    /// `DEPLOY_DIR` counts as unset. Relative paths resolve against the
    /// current directory.
    pub fn from_env<F>(build_output: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let build_output = absolute(build_output);

        let destination = lookup(DEPLOY_DIR_VAR)
            .filter(|dir| !dir.is_empty())
            .map(|dir| absolute(Path::new(&dir)))
            .unwrap_or_else(|| build_output.clone());

        let publish = lookup(DEPLOY_TO_GITHUB_VAR).as_deref() == Some("true");

        Self {
            build_output,
            destination,
            publish,
        }
    }

    /// Whether the destination is spelled differently from the build output.
    ///
    /// Aliases through `..` or symlinks are caught later by
    /// [`placement`](crate::copy::placement), once the build is known to exist.
    pub fn copy_required(&self) -> bool {
        self.destination != self.build_output
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
