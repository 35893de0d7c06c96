//! Typed tmux intents and their argument vectors
//!
//! Every intent renders to the exact argument list handed to the tmux binary
//! (the binary itself and global flags such as `-L` are added by the runner).
//! Output is deterministic, and optional fields that are unset or empty are
//! omitted entirely rather than emitted as empty flag values.

use std::path::PathBuf;

use super::target::{PaneTarget, WindowTarget};

/// Anything that can be rendered into a tmux argument vector
pub trait TmuxCommand {
    /// Ordered arguments, subcommand first
    fn to_args(&self) -> Vec<String>;
}

fn push_flag(args: &mut Vec<String>, flag: &str, value: &str) {
    if !value.is_empty() {
        args.push(flag.to_string());
        args.push(value.to_string());
    }
}

fn push_dir(args: &mut Vec<String>, dir: Option<&PathBuf>) {
    if let Some(dir) = dir {
        push_flag(args, "-c", &dir.to_string_lossy());
    }
}

/// `kill-session -t <session>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillSession {
    pub target_session: String,
}

impl TmuxCommand for KillSession {
    fn to_args(&self) -> Vec<String> {
        vec![
            "kill-session".to_string(),
            "-t".to_string(),
            self.target_session.clone(),
        ]
    }
}

/// `new-session [-d] [-s name] [-n window] [-c dir]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSession {
    /// Do not attach the new session to the current terminal
    pub detached: bool,
    pub session_name: String,
    pub window_name: String,
    pub working_dir: Option<PathBuf>,
}

impl TmuxCommand for NewSession {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec!["new-session".to_string()];
        if self.detached {
            args.push("-d".to_string());
        }
        push_flag(&mut args, "-s", &self.session_name);
        push_flag(&mut args, "-n", &self.window_name);
        push_dir(&mut args, self.working_dir.as_ref());
        args
    }
}

/// `new-window [-t session:window] [-n name] [-c dir]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWindow {
    pub target: Option<WindowTarget>,
    pub window_name: String,
    pub working_dir: Option<PathBuf>,
}

impl TmuxCommand for NewWindow {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec!["new-window".to_string()];
        if let Some(target) = &self.target {
            args.extend(target.to_args());
        }
        push_flag(&mut args, "-n", &self.window_name);
        push_dir(&mut args, self.working_dir.as_ref());
        args
    }
}

/// `rename-window [-t session:window] [new-name]`
///
/// The new name is positional, not a flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameWindow {
    pub target: Option<WindowTarget>,
    pub window_name: String,
}

impl TmuxCommand for RenameWindow {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec!["rename-window".to_string()];
        if let Some(target) = &self.target {
            args.extend(target.to_args());
        }
        if !self.window_name.is_empty() {
            args.push(self.window_name.clone());
        }
        args
    }
}

/// `select-window -t session:window`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectWindow {
    pub target: WindowTarget,
}

impl TmuxCommand for SelectWindow {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec!["select-window".to_string()];
        args.extend(self.target.to_args());
        args
    }
}

/// Orientation of a split
///
/// `Horizontal` places the new pane beside the source (`-h`), `Vertical`
/// places it below (`-v`). A single value makes "both at once" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDirection {
    Horizontal,
    Vertical,
}

impl SplitDirection {
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Horizontal => "-h",
            Self::Vertical => "-v",
        }
    }
}

/// `split-window [-h|-v] [-t target-pane] [-c dir]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitWindow {
    pub direction: Option<SplitDirection>,
    pub target: Option<PaneTarget>,
    pub working_dir: Option<PathBuf>,
}

impl TmuxCommand for SplitWindow {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec!["split-window".to_string()];
        if let Some(direction) = self.direction {
            args.push(direction.flag().to_string());
        }
        if let Some(target) = &self.target {
            push_flag(&mut args, "-t", &target.to_string());
        }
        push_dir(&mut args, self.working_dir.as_ref());
        args
    }
}

/// Edge a pane is resized towards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    Right,
    Left,
    Up,
    Down,
}

impl ResizeDirection {
    /// Single-letter tmux code
    pub fn code(&self) -> char {
        match self {
            Self::Right => 'R',
            Self::Left => 'L',
            Self::Up => 'U',
            Self::Down => 'D',
        }
    }
}

/// `resize-pane -t target -<R|L|U|D> amount`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizePane {
    pub target: PaneTarget,
    pub direction: ResizeDirection,
    pub amount: u32,
}

impl TmuxCommand for ResizePane {
    fn to_args(&self) -> Vec<String> {
        vec![
            "resize-pane".to_string(),
            "-t".to_string(),
            self.target.to_string(),
            format!("-{}", self.direction.code()),
            self.amount.to_string(),
        ]
    }
}

/// `send-keys -t target <keys> [C-m]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendKeys {
    pub target: PaneTarget,
    pub keys: String,
    /// Follow the keys with Enter
    pub enter: bool,
}

impl TmuxCommand for SendKeys {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "send-keys".to_string(),
            "-t".to_string(),
            self.target.to_string(),
        ];
        if !self.keys.is_empty() {
            args.push(self.keys.clone());
        }
        if self.enter {
            args.push("C-m".to_string());
        }
        args
    }
}

/// `kill-pane -t session:window.pane`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillPane {
    pub target: PaneTarget,
}

impl TmuxCommand for KillPane {
    fn to_args(&self) -> Vec<String> {
        vec![
            "kill-pane".to_string(),
            "-t".to_string(),
            self.target.to_string(),
        ]
    }
}

/// `select-pane -t target [-T title]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectPane {
    pub target: PaneTarget,
    pub title: String,
}

impl TmuxCommand for SelectPane {
    fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "select-pane".to_string(),
            "-t".to_string(),
            self.target.to_string(),
        ];
        push_flag(&mut args, "-T", &self.title);
        args
    }
}

/// `list-sessions -F #{session_name}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListSessions;

impl TmuxCommand for ListSessions {
    fn to_args(&self) -> Vec<String> {
        vec![
            "list-sessions".to_string(),
            "-F".to_string(),
            "#{session_name}".to_string(),
        ]
    }
}

/// A free-form command line, split on whitespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(pub String);

impl TmuxCommand for Raw {
    fn to_args(&self) -> Vec<String> {
        self.0.split_whitespace().map(String::from).collect()
    }
}
