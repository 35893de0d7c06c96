//! Recording runner for tests
//!
//! Stands in for the tmux binary: every argument vector is recorded, and
//! responses can be scripted per subcommand.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::executor::CommandRunner;
use crate::error::{Result, TmuxError};

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Awaited to completion
    Run(Vec<String>),
    /// Started only
    Spawn(Vec<String>),
}

impl Invocation {
    pub fn args(&self) -> &[String] {
        match self {
            Self::Run(args) | Self::Spawn(args) => args,
        }
    }

    pub fn subcommand(&self) -> &str {
        self.args().first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Output(String),
    Fail(String),
}

/// In-memory [`CommandRunner`] that never starts a process
///
/// Unscripted subcommands succeed with empty output, so by default no
/// session is reported as existing.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    scripted: Mutex<HashMap<String, Scripted>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed `subcommand` with the given combined output
    pub fn respond(self, subcommand: &str, output: impl Into<String>) -> Self {
        lock(&self.scripted).insert(subcommand.to_string(), Scripted::Output(output.into()));
        self
    }

    /// Fail `subcommand` with a non-zero exit and the given combined output
    pub fn fail(self, subcommand: &str, output: impl Into<String>) -> Self {
        lock(&self.scripted).insert(subcommand.to_string(), Scripted::Fail(output.into()));
        self
    }

    /// Pretend these sessions are live
    pub fn with_sessions(self, names: &[&str]) -> Self {
        let listing: String = names.iter().map(|name| format!("{name}\n")).collect();
        self.respond("list-sessions", listing)
    }

    /// Replace or add a script after construction
    pub fn script_failure(&self, subcommand: &str, output: impl Into<String>) {
        lock(&self.scripted).insert(subcommand.to_string(), Scripted::Fail(output.into()));
    }

    /// Remove any script for `subcommand`
    pub fn clear_script(&self, subcommand: &str) {
        lock(&self.scripted).remove(subcommand);
    }

    /// Everything recorded so far, in order
    pub fn calls(&self) -> Vec<Invocation> {
        lock(&self.calls).clone()
    }

    /// Recorded argument vectors, in order
    pub fn arg_vectors(&self) -> Vec<Vec<String>> {
        self.calls().iter().map(|c| c.args().to_vec()).collect()
    }

    /// Recorded subcommands, in order
    pub fn subcommands(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|c| c.subcommand().to_string())
            .collect()
    }

    pub fn clear(&self) {
        lock(&self.calls).clear();
    }

    fn reply(&self, args: &[String]) -> Result<String> {
        let subcommand = args.first().map(String::as_str).unwrap_or_default();
        match lock(&self.scripted).get(subcommand) {
            None => Ok(String::new()),
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::Fail(output)) => Err(TmuxError::CommandFailed {
                command: format!("tmux {}", args.join(" ")),
                status: Some(1),
                output: output.clone(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, args: &[String]) -> Result<String> {
        lock(&self.calls).push(Invocation::Run(args.to_vec()));
        self.reply(args)
    }

    async fn spawn(&self, args: &[String]) -> Result<()> {
        lock(&self.calls).push(Invocation::Spawn(args.to_vec()));
        self.reply(args).map(|_| ())
    }
}
