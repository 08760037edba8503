//! Publishing the link store to a contributor branch.
//!
//! The publish step is an ordered sequence of git invocations: create a
//! branch named after the contributor, stage the store file, commit with
//! an attributed message, and push the branch upstream. Each invocation
//! is reduced to pass/fail; the first failure aborts the remaining steps
//! with no rollback and no retry. Stderr from the failing command is
//! surfaced verbatim.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

use crate::config::PublishSettings;

/// Errors raised by an external command invocation
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code}: {stderr}")]
    Failed {
        command: String,
        code: i32,
        stderr: String,
    },
}

/// Runs one external command and reports pass/fail
#[async_trait]
pub trait CommandRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<(), PublishError>;
}

/// Real runner invoking git as a subprocess
pub struct GitRunner;

#[async_trait]
impl CommandRunner for GitRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<(), PublishError> {
        let command = format!("{} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| PublishError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(PublishError::Failed {
                command,
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        tracing::debug!(%command, "Command succeeded");
        Ok(())
    }
}

/// Executes the branch/stage/commit/push sequence
pub struct Publisher<R> {
    runner: R,
    remote: String,
    branch_suffix: String,
}

impl<R: CommandRunner> Publisher<R> {
    /// Create a publisher with the configured remote and branch suffix
    pub fn new(runner: R, settings: &PublishSettings) -> Self {
        Self {
            runner,
            remote: settings.remote.clone(),
            branch_suffix: settings.branch_suffix.clone(),
        }
    }

    /// Branch name derived from the contributor identifier
    pub fn branch_name(&self, contributor: &str) -> String {
        format!("{}-{}", contributor, self.branch_suffix)
    }

    /// Publish the saved store on a new contributor branch.
    ///
    /// Completed steps are left as-is when a later step fails (a
    /// created-but-unpushed branch is not deleted).
    pub async fn publish(&self, contributor: &str, store_path: &Path) -> Result<(), PublishError> {
        let branch = self.branch_name(contributor);
        let store = store_path.display().to_string();
        let message = format!("Add links from {}", contributor);

        self.runner.run("git", &["checkout", "-b", &branch]).await?;
        self.runner.run("git", &["add", &store]).await?;
        self.runner.run("git", &["commit", "-m", &message]).await?;
        self.runner
            .run("git", &["push", "--set-upstream", &self.remote, &branch])
            .await?;

        tracing::info!(%branch, remote = %self.remote, "Pushed link store");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_name_joins_contributor_and_suffix() {
        let publisher = Publisher::new(GitRunner, &PublishSettings::default());
        assert_eq!(publisher.branch_name("sherry"), "sherry-contrib");
    }

    #[test]
    fn test_failed_error_includes_command_and_stderr() {
        let err = PublishError::Failed {
            command: "git commit -m msg".to_string(),
            code: 1,
            stderr: "nothing to commit".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("git commit"));
        assert!(message.contains("nothing to commit"));
    }
}
