//! Construction attributes and mutation policy

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the in-process model reacts when tmux rejects a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPolicy {
    /// Link new windows/panes into the model even if the invocation failed.
    /// The error is still returned; ignoring it lets the model drift from tmux.
    #[default]
    Optimistic,
    /// Only keep a window/pane if tmux accepted it. Window numbers that were
    /// attempted stay consumed.
    Strict,
}

impl MutationPolicy {
    /// Whether a failed invocation undoes the matching model change
    pub fn rolls_back(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Attributes for a new session
#[derive(Debug, Clone, Default)]
pub struct SessionAttr {
    pub name: String,
    /// Default working directory for windows and panes
    pub directory: Option<PathBuf>,
    pub policy: MutationPolicy,
}

impl SessionAttr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn policy(mut self, policy: MutationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Attributes for a new window
#[derive(Debug, Clone, Default)]
pub struct WindowAttr {
    pub name: String,
    pub directory: Option<PathBuf>,
}

impl WindowAttr {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: None,
        }
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

/// Attributes for a split
#[derive(Debug, Clone, Default)]
pub struct SplitAttr {
    /// Overrides the window and session directories
    pub directory: Option<PathBuf>,
}

impl SplitAttr {
    pub fn directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }
}

/// First non-empty directory in precedence order
pub(crate) fn first_directory<'a>(
    candidates: impl IntoIterator<Item = Option<&'a PathBuf>>,
) -> Option<PathBuf> {
    candidates
        .into_iter()
        .flatten()
        .find(|dir| !dir.as_os_str().is_empty())
        .cloned()
}
