//! Panes and the `PaneMut` handle
//!
//! A `Pane` only knows its own number and the address of its window. Anything
//! that appends sibling panes goes through `PaneMut`, which borrows the owning
//! window.

use tracing::{debug, instrument};

use super::attr::SplitAttr;
use super::window::Window;
use crate::error::Result;
use crate::tmux::command::{ResizeDirection, ResizePane, SelectPane, SendKeys, SplitWindow};
use crate::tmux::{PaneTarget, SplitDirection, TmuxCommand, WindowTarget};

/// A pane inside a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    number: usize,
    window: WindowTarget,
    /// Text sent through `exec`, kept for inspection only
    commands: Vec<String>,
}

impl Pane {
    pub(crate) fn new(number: usize, window: WindowTarget) -> Self {
        Self {
            number,
            window,
            commands: Vec::new(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    /// `session:window.pane`
    pub fn target(&self) -> PaneTarget {
        self.window.pane(self.number)
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

/// Whether a layout-changing call waits for tmux to exit
#[derive(Debug, Clone, Copy)]
enum Completion {
    Started,
    Finished,
}

/// Mutable access to one pane together with its window
pub struct PaneMut<'w> {
    window: &'w mut Window,
    index: usize,
}

impl<'w> PaneMut<'w> {
    pub(crate) fn new(window: &'w mut Window, index: usize) -> Self {
        Self { window, index }
    }

    pub fn pane(&self) -> &Pane {
        &self.window.panes[self.index]
    }

    /// Position of this pane in the window's insertion order
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn target(&self) -> PaneTarget {
        self.pane().target()
    }

    /// Split below this pane (`split-window -v`)
    pub async fn split(self) -> Result<PaneMut<'w>> {
        self.split_with(SplitAttr::default()).await
    }

    /// Split below this pane with attributes
    pub async fn split_with(self, attr: SplitAttr) -> Result<PaneMut<'w>> {
        self.split_towards(SplitDirection::Vertical, attr).await
    }

    /// Split beside this pane (`split-window -h`)
    pub async fn vsplit(self) -> Result<PaneMut<'w>> {
        self.vsplit_with(SplitAttr::default()).await
    }

    /// Split beside this pane with attributes
    pub async fn vsplit_with(self, attr: SplitAttr) -> Result<PaneMut<'w>> {
        self.split_towards(SplitDirection::Horizontal, attr).await
    }

    /// Issue the split and record the new pane as `this number + 1`
    ///
    /// tmux is only started, not waited on, so the new pane may not exist yet
    /// when this returns. The new number is not confirmed with tmux; it is
    /// only right while splits are made from the highest-numbered pane.
    pub async fn split_towards(
        self,
        direction: SplitDirection,
        attr: SplitAttr,
    ) -> Result<PaneMut<'w>> {
        self.split_inner(direction, attr, Completion::Started).await
    }

    /// Like [`PaneMut::split_towards`], but waits until tmux has made the pane
    ///
    /// Use this when the next call targets the new pane.
    pub async fn split_towards_and_wait(
        self,
        direction: SplitDirection,
        attr: SplitAttr,
    ) -> Result<PaneMut<'w>> {
        self.split_inner(direction, attr, Completion::Finished).await
    }

    #[instrument(skip(self, attr), fields(target = %self.target()))]
    async fn split_inner(
        self,
        direction: SplitDirection,
        attr: SplitAttr,
        completion: Completion,
    ) -> Result<PaneMut<'w>> {
        let cmd = SplitWindow {
            direction: Some(direction),
            target: Some(self.target()),
            working_dir: self.window.split_directory(&attr),
        };
        let number = self.pane().number + 1;
        let args = cmd.to_args();
        debug!(?args, ?completion, "splitting pane");

        let outcome = self.dispatch(&args, completion).await;
        match outcome {
            Err(e) if self.window.policy.rolls_back() => Err(e),
            outcome => {
                let index = self.window.push_pane(number);
                outcome?;
                Ok(PaneMut::new(self.window, index))
            }
        }
    }

    async fn dispatch(&self, args: &[String], completion: Completion) -> Result<()> {
        match completion {
            Completion::Started => self.window.runner.spawn(args).await,
            Completion::Finished => self.window.runner.run(args).await.map(|_| ()),
        }
    }

    pub async fn resize_right(&self, amount: u32) -> Result<()> {
        self.resize(ResizeDirection::Right, amount).await
    }

    pub async fn resize_left(&self, amount: u32) -> Result<()> {
        self.resize(ResizeDirection::Left, amount).await
    }

    pub async fn resize_up(&self, amount: u32) -> Result<()> {
        self.resize(ResizeDirection::Up, amount).await
    }

    pub async fn resize_down(&self, amount: u32) -> Result<()> {
        self.resize(ResizeDirection::Down, amount).await
    }

    /// Start a resize without waiting for tmux to finish
    pub async fn resize(&self, direction: ResizeDirection, amount: u32) -> Result<()> {
        self.resize_inner(direction, amount, Completion::Started).await
    }

    /// Resize and wait for tmux, surfacing its exit status
    pub async fn resize_and_wait(&self, direction: ResizeDirection, amount: u32) -> Result<()> {
        self.resize_inner(direction, amount, Completion::Finished).await
    }

    async fn resize_inner(
        &self,
        direction: ResizeDirection,
        amount: u32,
        completion: Completion,
    ) -> Result<()> {
        let cmd = ResizePane {
            target: self.target(),
            direction,
            amount,
        };
        self.dispatch(&cmd.to_args(), completion).await
    }

    /// Type a command into the pane and press Enter
    pub async fn exec(&mut self, command: &str) -> Result<()> {
        let cmd = SendKeys {
            target: self.target(),
            keys: command.to_string(),
            enter: true,
        };
        self.window.panes[self.index]
            .commands
            .push(command.to_string());
        self.window.runner.run(&cmd.to_args()).await?;
        Ok(())
    }

    /// Set the pane title (`select-pane -T`)
    pub async fn set_title(&self, title: &str) -> Result<()> {
        let cmd = SelectPane {
            target: self.target(),
            title: title.to_string(),
        };
        self.window.runner.run(&cmd.to_args()).await?;
        Ok(())
    }

    /// Give up the handle, keeping the window borrow
    pub fn into_window(self) -> &'w mut Window {
        self.window
    }
}
