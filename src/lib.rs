//! tmux-composer - typed tmux sessions, windows and panes
//!
//! Models a tmux session → window → pane hierarchy as in-process objects and
//! compiles intents ("split this pane", "rename that window") into the exact
//! argument vectors tmux expects.
//!
//! # Modules
//!
//! - [`tmux`] - Command builders, target addressing and the runner boundary
//! - [`hierarchy`] - Session/window/pane model with numbering rules
//! - [`config`] - Layered configuration and declarative layouts
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tmux_composer::{Session, TmuxExecutor};
//!
//! # async fn run() -> tmux_composer::Result<()> {
//! let mut session = Session::create(Arc::new(TmuxExecutor::new()), "dev").await?;
//! let window = session.add_window("editor").await?;
//! if let Some(pane) = window.pane_mut(0) {
//!     pane.vsplit().await?.resize_right(10).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod tmux;

pub use config::{Config, Layout};
pub use error::{Error, Result};
pub use hierarchy::{MutationPolicy, Pane, PaneMut, Session, SessionAttr, SplitAttr, Window, WindowAttr};
pub use tmux::{CommandRunner, PaneTarget, RecordingRunner, TmuxExecutor, WindowTarget};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
