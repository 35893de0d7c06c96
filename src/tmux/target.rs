//! Target addressing
//!
//! tmux only understands `-t` targets of the form `session:window` and
//! `session:window.pane`. These types are the only way the model produces them.

use std::fmt;

/// Address of a window: `<session>:<window>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WindowTarget {
    /// Session name
    pub session: String,
    /// Window number within the session
    pub window: usize,
}

impl WindowTarget {
    pub fn new(session: impl Into<String>, window: usize) -> Self {
        Self {
            session: session.into(),
            window,
        }
    }

    /// Address of a pane inside this window
    pub fn pane(&self, pane: usize) -> PaneTarget {
        PaneTarget {
            window: self.clone(),
            pane,
        }
    }

    /// The `-t <target>` argument pair
    pub fn to_args(&self) -> [String; 2] {
        ["-t".to_string(), self.to_string()]
    }
}

impl fmt::Display for WindowTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.session, self.window)
    }
}

/// Address of a pane: `<session>:<window>.<pane>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaneTarget {
    pub window: WindowTarget,
    /// Pane number within the window
    pub pane: usize,
}

impl PaneTarget {
    pub fn new(session: impl Into<String>, window: usize, pane: usize) -> Self {
        WindowTarget::new(session, window).pane(pane)
    }

    pub fn session(&self) -> &str {
        &self.window.session
    }
}

impl fmt::Display for PaneTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.window, self.pane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pane_target() {
        assert_eq!(PaneTarget::new("s", 2, 1).to_string(), "s:2.1");
        assert_eq!(PaneTarget::new("work", 10, 12).to_string(), "work:10.12");
    }

    #[test]
    fn test_window_target() {
        assert_eq!(WindowTarget::new("s", 0).to_string(), "s:0");
        assert_eq!(
            WindowTarget::new("s", 3).to_args(),
            ["-t".to_string(), "s:3".to_string()]
        );
    }

    #[test]
    fn test_pane_from_window() {
        let window = WindowTarget::new("dev", 4);
        let pane = window.pane(0);
        assert_eq!(pane.session(), "dev");
        assert_eq!(pane.window, window);
        assert_eq!(pane.to_string(), "dev:4.0");
    }
}
