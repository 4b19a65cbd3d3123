//! Hosting provider publish step.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Placeholder replaced with the build output path in command arguments.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Errors that can occur while publishing.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Publish command is empty")]
    EmptyCommand,

    #[error("Failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    #[error("{program} exited with {status}{}", stderr_suffix(.stderr))]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}

/// Something that uploads a built site.
pub trait Publisher {
    /// Short description for log lines.
    fn name(&self) -> String;

    /// Publish the contents of `build_output`.
    fn publish(&self, build_output: &Path) -> Result<(), PublishError>;
}

/// Publishes by running an external command and checking its exit status.
///
/// The command is only checked when it runs, so an unusable command does not
/// affect deploys that never publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPublisher {
    argv: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl CommandPublisher {
    /// Build from a `[program, args...]` list.
    pub fn new(argv: Vec<String>) -> Self {
        Self {
            argv,
            working_dir: None,
        }
    }

    /// `npx gh-pages -d {output}`
    pub fn gh_pages() -> Self {
        Self::new(vec![
            "npx".to_string(),
            "gh-pages".to_string(),
            "-d".to_string(),
            OUTPUT_PLACEHOLDER.to_string(),
        ])
    }

    /// Run the command from `dir` instead of the current directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn program(&self) -> Result<(&str, &[String]), PublishError> {
        match self.argv.split_first() {
            Some((program, args)) if !program.trim().is_empty() => Ok((program, args)),
            _ => Err(PublishError::EmptyCommand),
        }
    }

    fn command(&self, program: &str, args: &[String], build_output: &Path) -> Command {
        let output = build_output.to_string_lossy();
        let mut command = Command::new(program);
        command.args(args.iter().map(|arg| arg.replace(OUTPUT_PLACEHOLDER, &output)));
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl Publisher for CommandPublisher {
    fn name(&self) -> String {
        self.argv.join(" ")
    }

    fn publish(&self, build_output: &Path) -> Result<(), PublishError> {
        let (program, args) = self.program()?;
        let output = self
            .command(program, args, build_output)
            .output()
            .map_err(|e| PublishError::Spawn {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
            tracing::info!("{}", line);
        }

        if !output.status.success() {
            return Err(PublishError::Exit {
                program: program.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
