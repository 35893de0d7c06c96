//! Session → window → pane model
//!
//! Owns numbering and the order of tmux invocations:
//! - `Session` - creation (kill-then-create), window numbering
//! - `Window` - new/rename/select, raw commands, pane bookkeeping
//! - `Pane` / `PaneMut` - splits, resizes, keys, titles

mod attr;
mod pane;
mod session;
mod window;

pub use attr::{MutationPolicy, SessionAttr, SplitAttr, WindowAttr};
pub use pane::{Pane, PaneMut};
pub use session::{PLACEHOLDER_WINDOW_NAME, Session};
pub use window::{SessionInfo, Window};
