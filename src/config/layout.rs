//! Declarative session layouts
//!
//! A layout file (TOML or JSON) describes a session, its windows and the
//! splits inside each window. Applying it drives the hierarchy model.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{LayoutError, Result, TmuxError};
use crate::hierarchy::{MutationPolicy, Session, SessionAttr, SplitAttr, WindowAttr};
use crate::tmux::command::ResizeDirection;
use crate::tmux::{CommandRunner, SplitDirection};

/// A whole session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Session name
    pub name: String,

    /// Default directory for every window and pane
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Window number to make active once everything is built
    #[serde(default)]
    pub select: Option<usize>,

    #[serde(default)]
    pub windows: Vec<WindowLayout>,
}

/// One window; its first pane is implicit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowLayout {
    pub name: String,

    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Command typed into pane 0
    #[serde(default)]
    pub command: Option<String>,

    /// Splits, each made from the most recent pane
    #[serde(default)]
    pub panes: Vec<PaneLayout>,
}

/// One split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneLayout {
    #[serde(default = "default_direction")]
    pub direction: SplitDirection,

    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Command typed into the new pane
    #[serde(default)]
    pub command: Option<String>,

    /// Grow the new pane by this many cells, rightwards for horizontal
    /// splits and downwards for vertical ones
    #[serde(default)]
    pub size: Option<u32>,
}

fn default_direction() -> SplitDirection {
    SplitDirection::Vertical
}

impl Layout {
    /// Load a layout, choosing the format from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LayoutError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let parse_failed = |reason: String| LayoutError::ReadFailed {
            path: path.to_path_buf(),
            reason,
        };

        let layout: Layout = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| parse_failed(e.to_string()))?,
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| parse_failed(e.to_string()))?
            }
            _ => return Err(LayoutError::UnsupportedFormat(path.to_path_buf()).into()),
        };

        layout.validate()?;
        Ok(layout)
    }

    /// Reject layouts that cannot be applied
    pub fn validate(&self) -> Result<()> {
        if self.windows.is_empty() {
            return Err(LayoutError::NoWindows.into());
        }
        if let Some(number) = self.select {
            if number >= self.windows.len() {
                return Err(LayoutError::UnknownSelection(number).into());
            }
        }
        Ok(())
    }

    /// Build the session in tmux
    ///
    /// Stops at the first failure; the partially built session has already
    /// been created in tmux by then.
    #[instrument(skip(self, runner), fields(session = %self.name))]
    pub async fn apply(
        &self,
        runner: Arc<dyn CommandRunner>,
        policy: MutationPolicy,
    ) -> Result<Session> {
        self.validate()?;

        let mut attr = SessionAttr::new(self.name.clone()).policy(policy);
        attr.directory = self.directory.clone();
        let mut session = Session::create_with(runner, attr).await?;

        for window_layout in &self.windows {
            let window = session
                .add_window_with(WindowAttr {
                    name: window_layout.name.clone(),
                    directory: window_layout.directory.clone(),
                })
                .await?;

            let window_target = window.target().to_string();
            let mut pane = window.pane_mut(0).ok_or(TmuxError::PaneNotFound {
                window: window_target,
                index: 0,
            })?;
            if let Some(command) = &window_layout.command {
                pane.exec(command).await?;
            }

            for split in &window_layout.panes {
                let attr = SplitAttr {
                    directory: split.directory.clone(),
                };
                // The resize and command below address the new pane
                pane = pane.split_towards_and_wait(split.direction, attr).await?;

                if let Some(size) = split.size {
                    let towards = match split.direction {
                        SplitDirection::Horizontal => ResizeDirection::Right,
                        SplitDirection::Vertical => ResizeDirection::Down,
                    };
                    pane.resize_and_wait(towards, size).await?;
                }
                if let Some(command) = &split.command {
                    pane.exec(command).await?;
                }
            }
        }

        if let Some(number) = self.select {
            session.select_window(number).await?;
        }

        info!(
            "Applied layout '{}' with {} windows",
            self.name,
            session.windows().len()
        );
        Ok(session)
    }
}
