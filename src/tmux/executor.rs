//! Runner adapter
//!
//! The model never starts processes itself. It hands argument vectors to a
//! [`CommandRunner`], which is injected at construction time:
//! - `TmuxExecutor` - spawns the real tmux binary
//! - `RecordingRunner` - records invocations for tests

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, instrument};

use super::command::{KillSession, ListSessions, TmuxCommand};
use crate::error::{Error, Result, TmuxError};

/// Diagnostics tmux prints when there is no server (and so no session) to query
pub const ABSENT_DIAGNOSTICS: &[&str] = &[
    "no server running",
    "no such file or directory",
    "error connecting to",
    "no sessions",
];

/// Whether combined tmux output says "nothing is running" rather than a real failure
pub fn is_absent_diagnostic(output: &str) -> bool {
    let output = output.to_lowercase();
    ABSENT_DIAGNOSTICS.iter().any(|needle| output.contains(needle))
}

/// Executes tmux argument vectors
///
/// Implementations must not retry or log failures; every error is returned
/// to the caller.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion, returning combined stdout and stderr
    async fn run(&self, args: &[String]) -> Result<String>;

    /// Start the command without waiting for it to finish
    async fn spawn(&self, args: &[String]) -> Result<()>;

    /// Names of all live sessions
    async fn list_sessions(&self) -> Result<Vec<String>> {
        let output = self.run(&ListSessions.to_args()).await?;
        Ok(output.lines().map(String::from).collect())
    }

    /// Check whether a session is live
    ///
    /// Matches by substring against the raw listing. A listing that fails
    /// because no server is running reports `Ok(false)`. An empty name never
    /// exists, since it would match every listing.
    async fn session_exists(&self, name: &str) -> Result<bool> {
        if name.is_empty() {
            return Ok(false);
        }

        match self.run(&ListSessions.to_args()).await {
            Ok(output) => Ok(output.contains(name)),
            Err(Error::Tmux(TmuxError::CommandFailed { output, .. }))
                if is_absent_diagnostic(&output) =>
            {
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Kill a session; succeeds without doing anything if it does not exist
    async fn kill_session(&self, name: &str) -> Result<()> {
        if !self.session_exists(name).await? {
            return Ok(());
        }

        let cmd = KillSession {
            target_session: name.to_string(),
        };
        self.run(&cmd.to_args()).await?;
        Ok(())
    }
}

/// Process-backed runner for the tmux binary
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    /// Binary to invoke
    binary: PathBuf,
    /// Socket name passed as `-L` ahead of every subcommand
    socket_name: Option<String>,
    /// Server configuration file passed as `-f`
    config_file: Option<PathBuf>,
    /// Optional limit on `run`; unset means wait as long as tmux takes
    timeout: Option<Duration>,
}

impl TmuxExecutor {
    /// Create an executor for `tmux` on the PATH
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("tmux"),
            socket_name: None,
            config_file: None,
            timeout: None,
        }
    }

    /// Use a different binary
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Talk to the server on a named socket
    pub fn with_socket_name(mut self, socket_name: impl Into<String>) -> Self {
        self.socket_name = Some(socket_name.into());
        self
    }

    /// Start the server with this configuration file instead of `~/.tmux.conf`
    pub fn with_config_file(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }

    /// Set the command timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full argument list including global flags
    fn full_args(&self, args: &[String]) -> Vec<String> {
        let mut full = Vec::with_capacity(args.len() + 4);
        if let Some(socket) = &self.socket_name {
            full.push("-L".to_string());
            full.push(socket.clone());
        }
        if let Some(config_file) = &self.config_file {
            full.push("-f".to_string());
            full.push(config_file.to_string_lossy().into_owned());
        }
        full.extend(args.iter().cloned());
        full
    }

    fn describe(&self, args: &[String]) -> String {
        let mut parts = vec![self.binary.to_string_lossy().into_owned()];
        parts.extend(self.full_args(args));
        parts.join(" ")
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.full_args(args)).stdin(Stdio::null());
        cmd
    }

    fn start_error(&self, args: &[String], e: std::io::Error) -> Error {
        if e.kind() == std::io::ErrorKind::NotFound {
            TmuxError::NotInstalled.into()
        } else {
            TmuxError::SpawnFailed {
                command: self.describe(args),
                source: e,
            }
            .into()
        }
    }

    /// Check if tmux is installed and accessible
    pub async fn check_installed(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("-V")
            .output()
            .await
            .map_err(|_| TmuxError::NotInstalled)?;

        if output.status.success() {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            debug!("tmux version: {}", version);
            Ok(version)
        } else {
            Err(TmuxError::NotInstalled.into())
        }
    }
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for TmuxExecutor {
    #[instrument(skip(self), fields(args = ?args))]
    async fn run(&self, args: &[String]) -> Result<String> {
        let mut cmd = self.command(args);
        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => timeout(limit, cmd.output())
                .await
                .map_err(|_| TmuxError::Timeout(limit))?,
            None => cmd.output().await,
        }
        .map_err(|e| self.start_error(args, e))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            Err(TmuxError::CommandFailed {
                command: self.describe(args),
                status: output.status.code(),
                output: combined,
            }
            .into())
        }
    }

    #[instrument(skip(self), fields(args = ?args))]
    async fn spawn(&self, args: &[String]) -> Result<()> {
        let mut cmd = self.command(args);
        cmd.stdout(Stdio::null()).stderr(Stdio::null());

        // The child is detached; tokio reaps it in the background.
        cmd.spawn().map_err(|e| self.start_error(args, e))?;
        Ok(())
    }
}
