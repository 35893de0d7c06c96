//! Windows

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};

use super::attr::{MutationPolicy, SplitAttr, WindowAttr, first_directory};
use super::pane::{Pane, PaneMut};
use crate::error::{Result, TmuxError};
use crate::tmux::command::{KillPane, NewWindow, Raw, RenameWindow, SelectWindow};
use crate::tmux::{CommandRunner, TmuxCommand, WindowTarget};

/// Identity of the owning session, held by value instead of a back-pointer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub name: String,
    pub directory: Option<PathBuf>,
}

/// A numbered window inside a session
pub struct Window {
    number: usize,
    name: String,
    directory: Option<PathBuf>,
    session: SessionInfo,
    pub(crate) panes: Vec<Pane>,
    pub(crate) runner: Arc<dyn CommandRunner>,
    pub(crate) policy: MutationPolicy,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("number", &self.number)
            .field("name", &self.name)
            .field("directory", &self.directory)
            .field("session", &self.session.name)
            .field("panes", &self.panes)
            .finish_non_exhaustive()
    }
}

impl Window {
    /// Build the window and bring tmux in line with it
    ///
    /// The window always comes back, with pane 0 attached. Window 0 already
    /// exists as the session's initial window, so it is only renamed. If
    /// `new-window` fails the rename is skipped.
    pub(crate) async fn create(
        number: usize,
        attr: WindowAttr,
        session: SessionInfo,
        runner: Arc<dyn CommandRunner>,
        policy: MutationPolicy,
    ) -> (Self, Result<()>) {
        let mut window = Self {
            number,
            name: attr.name,
            directory: attr.directory,
            session,
            panes: Vec::new(),
            runner,
            policy,
        };
        window.add_pane(0);

        let outcome = window.announce().await;
        (window, outcome)
    }

    async fn announce(&self) -> Result<()> {
        if self.number != 0 {
            let cmd = NewWindow {
                target: Some(self.target()),
                window_name: self.name.clone(),
                working_dir: self.directory.clone(),
            };
            self.runner.run(&cmd.to_args()).await?;
        }

        let cmd = RenameWindow {
            target: Some(self.target()),
            window_name: self.name.clone(),
        };
        self.runner.run(&cmd.to_args()).await?;
        Ok(())
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn session_name(&self) -> &str {
        &self.session.name
    }

    /// `session:window`
    pub fn target(&self) -> WindowTarget {
        WindowTarget::new(self.session.name.clone(), self.number)
    }

    /// Panes in insertion order
    pub fn panes(&self) -> &[Pane] {
        &self.panes
    }

    /// Pane by insertion index
    pub fn pane(&self, index: usize) -> Option<&Pane> {
        self.panes.get(index)
    }

    pub fn pane_mut(&mut self, index: usize) -> Option<PaneMut<'_>> {
        if index < self.panes.len() {
            Some(PaneMut::new(self, index))
        } else {
            None
        }
    }

    /// Most recently added pane
    pub fn last_pane_mut(&mut self) -> Option<PaneMut<'_>> {
        let last = self.panes.len().checked_sub(1)?;
        self.pane_mut(last)
    }

    /// Record a pane without touching tmux
    ///
    /// The caller is responsible for keeping numbers unique.
    pub fn add_pane(&mut self, number: usize) -> PaneMut<'_> {
        let index = self.push_pane(number);
        PaneMut::new(self, index)
    }

    pub(crate) fn push_pane(&mut self, number: usize) -> usize {
        self.panes.push(Pane::new(number, self.target()));
        self.panes.len() - 1
    }

    /// Directory for a split: attribute, then window, then session
    pub(crate) fn split_directory(&self, attr: &SplitAttr) -> Option<PathBuf> {
        first_directory([
            attr.directory.as_ref(),
            self.directory.as_ref(),
            self.session.directory.as_ref(),
        ])
    }

    /// Make this the active window
    #[instrument(skip(self), fields(target = %self.target()))]
    pub async fn select(&self) -> Result<()> {
        let cmd = SelectWindow {
            target: self.target(),
        };
        self.runner.run(&cmd.to_args()).await?;
        Ok(())
    }

    /// Kill the pane at `index` and drop it from the model
    #[instrument(skip(self), fields(target = %self.target()))]
    pub async fn kill_pane(&mut self, index: usize) -> Result<()> {
        let pane = self.panes.get(index).ok_or_else(|| TmuxError::PaneNotFound {
            window: self.target().to_string(),
            index,
        })?;
        let cmd = KillPane {
            target: pane.target(),
        };

        let outcome = self.runner.run(&cmd.to_args()).await;
        match outcome {
            Err(e) if self.policy.rolls_back() => Err(e),
            outcome => {
                self.panes.remove(index);
                outcome.map(|_| ())
            }
        }
    }

    /// Run a raw tmux command line (split on whitespace)
    ///
    /// A blank line is refused; bare `tmux` would start an attached session.
    pub async fn exec(&self, command: &str) -> Result<String> {
        let args = Raw(command.to_string()).to_args();
        if args.is_empty() {
            return Err(TmuxError::EmptyCommand.into());
        }
        debug!(?args, "raw tmux command");
        self.runner.run(&args).await
    }

    /// Alias of [`Window::exec`] for option and hook commands
    pub async fn set_config(&self, command: &str) -> Result<String> {
        self.exec(command).await
    }
}
