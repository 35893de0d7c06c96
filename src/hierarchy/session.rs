//! Sessions
//!
//! A `Session` is an optimistic local cache of one tmux session. It is
//! authoritative only for the window numbers it hands out itself.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use super::attr::{MutationPolicy, SessionAttr, WindowAttr};
use super::window::{SessionInfo, Window};
use crate::error::{Result, TmuxError, session_creation};
use crate::tmux::command::NewSession;
use crate::tmux::{CommandRunner, TmuxCommand};

/// Name given to the initial window until window 0 is added and renamed
pub const PLACEHOLDER_WINDOW_NAME: &str = "tmp";

/// A tmux session and the windows this process created in it
pub struct Session {
    name: String,
    directory: Option<PathBuf>,
    windows: Vec<Window>,
    next_window_number: usize,
    runner: Arc<dyn CommandRunner>,
    policy: MutationPolicy,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("directory", &self.directory)
            .field("windows", &self.windows)
            .field("next_window_number", &self.next_window_number)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a fresh detached session, killing any existing one of the same name
    pub async fn create(runner: Arc<dyn CommandRunner>, name: impl Into<String>) -> Result<Self> {
        Self::create_with(runner, SessionAttr::new(name)).await
    }

    /// Create a fresh detached session from attributes
    ///
    /// The session starts with no windows in the model; the first
    /// `add_window` claims tmux's initial window as window 0. A blank name is
    /// rejected before tmux is invoked.
    #[instrument(skip(runner, attr), fields(session = %attr.name))]
    pub async fn create_with(runner: Arc<dyn CommandRunner>, attr: SessionAttr) -> Result<Self> {
        if attr.name.trim().is_empty() {
            return Err(TmuxError::EmptySessionName.into());
        }

        runner
            .kill_session(&attr.name)
            .await
            .map_err(|e| session_creation(&attr.name, "kill-session", e))?;

        let cmd = NewSession {
            detached: true,
            session_name: attr.name.clone(),
            window_name: PLACEHOLDER_WINDOW_NAME.to_string(),
            working_dir: attr.directory.clone(),
        };
        runner
            .run(&cmd.to_args())
            .await
            .map_err(|e| session_creation(&attr.name, "new-session", e))?;

        info!("Created tmux session '{}'", attr.name);

        Ok(Self {
            name: attr.name,
            directory: attr.directory,
            windows: Vec::new(),
            next_window_number: 0,
            runner,
            policy: attr.policy,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn policy(&self) -> MutationPolicy {
        self.policy
    }

    /// Number the next `add_window` will use
    pub fn next_window_number(&self) -> usize {
        self.next_window_number
    }

    /// Windows in creation order
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Window by number
    pub fn window(&self, number: usize) -> Option<&Window> {
        self.windows.iter().find(|w| w.number() == number)
    }

    pub fn window_mut(&mut self, number: usize) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.number() == number)
    }

    /// Add a window with the given name
    pub async fn add_window(&mut self, name: impl Into<String>) -> Result<&mut Window> {
        self.add_window_with(WindowAttr::new(name)).await
    }

    /// Add a window with attributes
    ///
    /// Under the optimistic policy the window is linked in even when tmux
    /// rejects it; the error is still returned and the window can be reached
    /// through [`Session::window_mut`]. Either way the number is consumed.
    #[instrument(skip(self, attr), fields(session = %self.name, window = %attr.name))]
    pub async fn add_window_with(&mut self, attr: WindowAttr) -> Result<&mut Window> {
        let number = self.next_window_number;
        let info = SessionInfo {
            name: self.name.clone(),
            directory: self.directory.clone(),
        };

        let (window, outcome) =
            Window::create(number, attr, info, Arc::clone(&self.runner), self.policy).await;
        self.next_window_number += 1;

        match outcome {
            Err(e) if self.policy.rolls_back() => Err(e),
            outcome => {
                let index = self.windows.len();
                self.windows.push(window);
                outcome?;
                Ok(&mut self.windows[index])
            }
        }
    }

    /// Make window `number` active
    ///
    /// Only windows present in the model can be selected.
    pub async fn select_window(&self, number: usize) -> Result<()> {
        self.window(number)
            .ok_or(TmuxError::WindowNotFound(number))?
            .select()
            .await
    }

    /// Drop a window from the model only; tmux is not touched
    pub fn remove_window(&mut self, number: usize) -> Option<Window> {
        let index = self.windows.iter().position(|w| w.number() == number)?;
        Some(self.windows.remove(index))
    }

    /// Kill the tmux session
    #[instrument(skip(self), fields(session = %self.name))]
    pub async fn kill(self) -> Result<()> {
        self.runner.kill_session(&self.name).await
    }
}
