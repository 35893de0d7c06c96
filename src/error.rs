//! Error types for tmux-composer
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for tmux-composer
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tmux error: {0}")]
    Tmux(#[from] TmuxError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Borrow the tmux error, if this is one
    pub fn as_tmux(&self) -> Option<&TmuxError> {
        match self {
            Self::Tmux(e) => Some(e),
            _ => None,
        }
    }
}

/// Tmux integration errors
#[derive(Error, Debug)]
pub enum TmuxError {
    #[error("Tmux is not installed or not in PATH")]
    NotInstalled,

    #[error("Failed to start `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Tmux command failed: {command} (exit status {status:?}) - {output}")]
    CommandFailed {
        command: String,
        status: Option<i32>,
        output: String,
    },

    #[error("Tmux command timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Failed to set up session '{session}' during {step}: {source}")]
    SessionCreation {
        session: String,
        step: &'static str,
        #[source]
        source: Box<TmuxError>,
    },

    #[error("Session name must not be empty")]
    EmptySessionName,

    #[error("Empty tmux command line")]
    EmptyCommand,

    #[error("Window {0} not found in session")]
    WindowNotFound(usize),

    #[error("Pane index {index} not found in window {window}")]
    PaneNotFound { window: String, index: usize },
}

impl TmuxError {
    /// Whether this is a plain invocation failure (process did not start,
    /// exited non-zero, or timed out) as opposed to a setup-phase failure.
    pub fn is_invocation(&self) -> bool {
        matches!(
            self,
            Self::NotInstalled
                | Self::SpawnFailed { .. }
                | Self::CommandFailed { .. }
                | Self::Timeout(_)
        )
    }

    /// Combined process output carried by a failed command, if any
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { output, .. } => Some(output),
            Self::SessionCreation { source, .. } => source.output(),
            _ => None,
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// Layout file errors
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Failed to read layout {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Unsupported layout format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Layout must declare at least one window")]
    NoWindows,

    #[error("Layout selects window {0}, which it never creates")]
    UnknownSelection(usize),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Wrap any error raised while a session is being set up
pub(crate) fn session_creation(session: &str, step: &'static str, err: Error) -> Error {
    match err {
        Error::Tmux(source) => Error::Tmux(TmuxError::SessionCreation {
            session: session.to_string(),
            step,
            source: Box::new(source),
        }),
        other => other,
    }
}
