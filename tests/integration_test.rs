//! Integration tests for tmux-composer
//!
//! Most tests drive the public API against `RecordingRunner`. The tests at
//! the bottom need tmux installed and use a private socket so they never touch
//! the user's server.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tmux_composer::tmux::Invocation;
use tmux_composer::{
    CommandRunner, Layout, MutationPolicy, RecordingRunner, Session, SessionAttr, SplitAttr,
    TmuxExecutor, WindowAttr,
};

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Helper to write a layout file into a temp dir
fn write_layout(dir: &TempDir, file_name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Helper to check if tmux is available
async fn tmux_available() -> bool {
    tokio::process::Command::new("tmux")
        .arg("-V")
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Executor bound to a socket private to this test process
fn isolated_executor(tag: &str) -> TmuxExecutor {
    TmuxExecutor::new()
        .with_socket_name(format!("tmux-composer-test-{}-{}", std::process::id(), tag))
        .with_config_file("/dev/null")
        .with_timeout(Duration::from_secs(10))
}

#[tokio::test]
async fn test_full_session_build() {
    let runner = Arc::new(RecordingRunner::new());
    let mut session = Session::create_with(
        runner.clone(),
        SessionAttr::new("dev").directory("/home/dev/project"),
    )
    .await
    .unwrap();

    let editor = session.add_window("editor").await.unwrap();
    let pane = editor.pane_mut(0).unwrap();
    let pane = pane.vsplit().await.unwrap();
    pane.resize_right(30).await.unwrap();

    let logs = session
        .add_window_with(WindowAttr::new("logs").directory("/var/log"))
        .await
        .unwrap();
    let pane = logs
        .pane_mut(0)
        .unwrap()
        .split_with(SplitAttr::directory("/tmp"))
        .await
        .unwrap();
    pane.into_window().select().await.unwrap();

    assert_eq!(
        runner.calls(),
        vec![
            Invocation::Run(argv(&["list-sessions", "-F", "#{session_name}"])),
            Invocation::Run(argv(&[
                "new-session",
                "-d",
                "-s",
                "dev",
                "-n",
                "tmp",
                "-c",
                "/home/dev/project",
            ])),
            Invocation::Run(argv(&["rename-window", "-t", "dev:0", "editor"])),
            Invocation::Spawn(argv(&[
                "split-window",
                "-h",
                "-t",
                "dev:0.0",
                "-c",
                "/home/dev/project",
            ])),
            Invocation::Spawn(argv(&["resize-pane", "-t", "dev:0.1", "-R", "30"])),
            Invocation::Run(argv(&[
                "new-window",
                "-t",
                "dev:1",
                "-n",
                "logs",
                "-c",
                "/var/log",
            ])),
            Invocation::Run(argv(&["rename-window", "-t", "dev:1", "logs"])),
            Invocation::Spawn(argv(&["split-window", "-v", "-t", "dev:1.0", "-c", "/tmp"])),
            Invocation::Run(argv(&["select-window", "-t", "dev:1"])),
        ]
    );

    let numbers: Vec<Vec<usize>> = session
        .windows()
        .iter()
        .map(|w| w.panes().iter().map(|p| p.number()).collect())
        .collect();
    assert_eq!(numbers, vec![vec![0, 1], vec![0, 1]]);
}

#[tokio::test]
async fn test_apply_layout_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_layout(
        &temp_dir,
        "dev.toml",
        r#"
            name = "dev"
            select = 0

            [[windows]]
            name = "code"
            command = "nvim ."

            [[windows.panes]]
            direction = "horizontal"
            size = 20
            command = "cargo watch"

            [[windows.panes]]
            direction = "vertical"
            directory = "/tmp"

            [[windows]]
            name = "shell"
        "#,
    );

    let layout = Layout::load(&path).unwrap();
    let runner = Arc::new(RecordingRunner::new());
    let session = layout
        .apply(runner.clone(), MutationPolicy::Optimistic)
        .await
        .unwrap();

    assert_eq!(session.windows().len(), 2);
    let code = session.window(0).unwrap();
    let numbers: Vec<usize> = code.panes().iter().map(|p| p.number()).collect();
    assert_eq!(numbers, [0, 1, 2]);
    assert_eq!(code.panes()[0].commands(), ["nvim ."]);
    assert_eq!(code.panes()[1].commands(), ["cargo watch"]);

    assert_eq!(
        runner.subcommands(),
        [
            "list-sessions",
            "new-session",
            "rename-window",
            "send-keys",
            "split-window",
            "resize-pane",
            "send-keys",
            "split-window",
            "new-window",
            "rename-window",
            "select-window",
        ]
    );
    // Splits and resizes are awaited so the following commands find the pane
    let calls = runner.calls();
    assert!(calls.contains(&Invocation::Run(argv(&[
        "split-window",
        "-v",
        "-t",
        "dev:0.1",
        "-c",
        "/tmp"
    ]))));
    assert!(calls.contains(&Invocation::Run(argv(&[
        "resize-pane",
        "-t",
        "dev:0.1",
        "-R",
        "20"
    ]))));
    assert!(!calls.iter().any(|c| matches!(c, Invocation::Spawn(_))));
}

#[tokio::test]
async fn test_apply_layout_strict_stops_on_failure() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_layout(
        &temp_dir,
        "dev.json",
        r#"{"name": "dev", "windows": [{"name": "a"}, {"name": "b"}]}"#,
    );
    let layout = Layout::load(&path).unwrap();
    let runner = Arc::new(RecordingRunner::new().fail("new-window", "create window failed"));

    let result = layout.apply(runner.clone(), MutationPolicy::Strict).await;
    assert!(result.is_err());
    assert_eq!(
        runner.subcommands(),
        ["list-sessions", "new-session", "rename-window", "new-window"]
    );
}

#[tokio::test]
async fn test_recreate_kills_previous_session() {
    let runner = Arc::new(RecordingRunner::new().with_sessions(&["dev"]));
    Session::create(runner.clone(), "dev").await.unwrap();

    assert_eq!(
        runner.subcommands(),
        ["list-sessions", "kill-session", "new-session"]
    );
}

#[tokio::test]
async fn test_real_tmux_session_lifecycle() {
    if !tmux_available().await {
        eprintln!("Skipping test: tmux not available");
        return;
    }

    let executor = isolated_executor("lifecycle");
    let runner: Arc<dyn CommandRunner> = Arc::new(executor.clone());

    let mut session = Session::create(runner.clone(), "composer-it").await.unwrap();
    session.add_window("first").await.unwrap();
    session.add_window("second").await.unwrap();

    assert!(executor.session_exists("composer-it").await.unwrap());
    let windows = executor
        .run(&argv(&[
            "list-windows",
            "-t",
            "composer-it",
            "-F",
            "#{window_index}:#{window_name}",
        ]))
        .await
        .unwrap();
    assert!(windows.contains("0:first"), "windows: {windows}");
    assert!(windows.contains("1:second"), "windows: {windows}");

    session.kill().await.unwrap();
    // The server may still be shutting down; any answer but "exists" is fine
    assert!(!executor.session_exists("composer-it").await.unwrap_or(false));
}

#[tokio::test]
async fn test_blank_session_name_never_reaches_tmux() {
    let runner = Arc::new(RecordingRunner::new().with_sessions(&["work"]));
    assert!(Session::create(runner.clone(), "").await.is_err());
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_real_tmux_layout_with_split_commands() {
    if !tmux_available().await {
        eprintln!("Skipping test: tmux not available");
        return;
    }

    let temp_dir = TempDir::new().unwrap();
    let path = write_layout(
        &temp_dir,
        "split.toml",
        r#"
            name = "composer-split"
            select = 0

            [[windows]]
            name = "main"
            command = "echo main"

            [[windows.panes]]
            direction = "horizontal"
            size = 5
            command = "echo right"

            [[windows.panes]]
            direction = "vertical"
            command = "echo below"
        "#,
    );
    let layout = Layout::load(&path).unwrap();
    let executor = isolated_executor("split");
    // Keeps the server up while the layout's session is replaced
    executor
        .run(&argv(&["new-session", "-d", "-s", "keepalive"]))
        .await
        .unwrap();

    // Repeat so a pane that is targeted before tmux made it would show up
    for _ in 0..5 {
        let session = layout
            .apply(Arc::new(executor.clone()), MutationPolicy::Optimistic)
            .await
            .unwrap();
        assert_eq!(session.window(0).unwrap().panes().len(), 3);

        let panes = executor
            .run(&argv(&[
                "list-panes",
                "-t",
                "composer-split:0",
                "-F",
                "#{pane_index}",
            ]))
            .await
            .unwrap();
        assert_eq!(panes.lines().collect::<Vec<_>>(), ["0", "1", "2"]);
    }

    executor.kill_session("composer-split").await.unwrap();
    executor.kill_session("keepalive").await.unwrap();
}

#[tokio::test]
async fn test_real_tmux_absent_server() {
    if !tmux_available().await {
        eprintln!("Skipping test: tmux not available");
        return;
    }

    let executor = isolated_executor("absent");
    assert!(!executor.session_exists("nothing-here").await.unwrap());
    executor.kill_session("nothing-here").await.unwrap();
}
