//! tmux protocol layer
//!
//! Provides:
//! - `command` - Typed intents rendered to tmux argument vectors
//! - `target` - `session:window.pane` addressing
//! - `CommandRunner` - The injected invocation boundary
//! - `TmuxExecutor` / `RecordingRunner` - Real and recording runners

pub mod command;
mod executor;
mod recording;
mod target;

pub use command::{SplitDirection, TmuxCommand};
pub use executor::*;
pub use recording::*;
pub use target::*;
