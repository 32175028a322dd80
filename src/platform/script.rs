//! Platform backed by the Moltbook skill's API script.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use super::client::{Platform, PlatformError, Result};
use super::types::{CommentResponse, FeedPost, FeedResponse, Identity, StatusResponse};
use crate::config::Settings;

pub struct ScriptPlatform {
    script: PathBuf,
    working_dir: PathBuf,
    timeout: Duration,
}

impl ScriptPlatform {
    pub fn new(script: impl Into<PathBuf>, working_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            script: script.into(),
            working_dir: working_dir.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.script_path(), settings.skill_dir(), settings.timeout())
    }

    pub fn script(&self) -> &Path {
        &self.script
    }

    /// Run `script <args...>` from the skill directory, bounded by the timeout.
    async fn run(&self, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::new(&self.script);
        cmd.args(args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!("Running {} {}", self.script.display(), args.first().unwrap_or(&""));

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(output) => Ok(output?),
            Err(_) => {
                tracing::warn!(
                    "Platform command '{}' exceeded {}s",
                    args.first().unwrap_or(&""),
                    self.timeout.as_secs()
                );
                Err(PlatformError::Timeout(self.timeout.as_secs()))
            }
        }
    }

    /// Run a subcommand that must exit cleanly, then parse its stdout.
    async fn run_json<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T> {
        let output = self.run(args).await?;
        if !output.status.success() {
            return Err(exit_error(&output));
        }
        parse_stdout(&output)
    }
}

/// Best available explanation of a failed invocation: stderr, else stdout.
fn diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn exit_error(output: &Output) -> PlatformError {
    PlatformError::Exit {
        status: output.status.to_string(),
        diagnostic: diagnostic(output),
    }
}

fn parse_stdout<T: DeserializeOwned>(output: &Output) -> Result<T> {
    serde_json::from_slice(&output.stdout)
        .map_err(|e| PlatformError::Parse(format!("{}: {}", e, diagnostic(output))))
}

/// Interpret a `comment` invocation. Success needs a clean exit and a truthy `success`.
fn comment_outcome(output: &Output) -> Result<()> {
    if !output.status.success() {
        return Err(exit_error(output));
    }

    let response: CommentResponse = parse_stdout(output)?;
    if response.succeeded() {
        return Ok(());
    }

    Err(PlatformError::Rejected(diagnostic(output)))
}

#[async_trait]
impl Platform for ScriptPlatform {
    async fn status(&self) -> Result<Identity> {
        let response: StatusResponse = self.run_json(&["status"]).await?;
        match response.agent {
            Some(agent) if !agent.name.is_empty() => Ok(Identity::new(agent.name)),
            _ => Err(PlatformError::MissingIdentity),
        }
    }

    async fn feed(&self) -> Result<Vec<FeedPost>> {
        let response: FeedResponse = self.run_json(&["feed"]).await?;
        Ok(response.posts)
    }

    async fn comment(&self, post_id: &str, text: &str) -> Result<()> {
        let output = self.run(&["comment", post_id, text]).await?;
        comment_outcome(&output)
    }
}
