//! tmux-composer - build tmux sessions from layout files
//!
//! Run with `tmux-composer` or `tmux-composer --help` for usage.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, bail};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use tmux_composer::error::TmuxError;
use tmux_composer::tmux::is_absent_diagnostic;
use tmux_composer::{APP_NAME, CommandRunner, Config, Layout, MutationPolicy, VERSION};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(version = VERSION)]
#[command(about = "Build tmux sessions, windows and panes from declarative layouts")]
#[command(long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a session from a layout file, replacing any session of the same name
    Up {
        /// Layout file (.toml or .json)
        layout: PathBuf,

        /// Roll back model changes tmux rejects
        #[arg(long)]
        strict: bool,
    },

    /// Check whether a session exists
    Exists {
        /// Session name
        name: String,
    },

    /// Kill a session (no-op if it does not exist)
    Kill {
        /// Session name
        name: String,
    },

    /// List live sessions
    List,

    /// Check that tmux is installed
    Check,

    /// Show configuration
    Config {
        /// Initialize config file with defaults
        #[arg(long)]
        init: bool,
    },
}

fn setup_logging(debug: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info").add_directive("tokio=warn".parse()?)
    };

    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(file).with_target(false))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .with(filter)
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks
    color_eyre::install()?;

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = loaded.unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        Config::default()
    });

    setup_logging(cli.debug || config.debug, config.log_file.as_ref())?;

    let executor = config.executor();

    match cli.command {
        Commands::Up { layout, strict } => {
            let layout = Layout::load(&layout)?;
            let policy = if strict {
                MutationPolicy::Strict
            } else {
                config.policy()
            };

            executor.check_installed().await?;
            let session = layout.apply(Arc::new(executor), policy).await?;

            println!(
                "Session '{}' ready with {} windows",
                session.name(),
                session.windows().len()
            );
            println!("Attach with: tmux attach-session -t {}", session.name());
        }

        Commands::Exists { name } => {
            if executor.session_exists(&name).await? {
                println!("{} exists", name);
            } else {
                println!("{} does not exist", name);
                std::process::exit(1);
            }
        }

        Commands::Kill { name } => {
            executor.kill_session(&name).await?;
            info!("Killed session '{}'", name);
        }

        Commands::List => match executor.list_sessions().await {
            Ok(sessions) => {
                for session in sessions {
                    println!("{}", session);
                }
            }
            Err(e)
                if e.as_tmux()
                    .and_then(TmuxError::output)
                    .is_some_and(is_absent_diagnostic) =>
            {
                println!("No sessions");
            }
            Err(e) => return Err(e.into()),
        },

        Commands::Check => match executor.check_installed().await {
            Ok(version) => println!("{}", version),
            Err(e) => bail!("{}", e),
        },

        Commands::Config { init } => {
            if init {
                let path = match &cli.config {
                    Some(path) => {
                        config.save_to(path)?;
                        path.clone()
                    }
                    None => config.save()?,
                };
                println!("Configuration initialized at {:?}", path);
            } else {
                println!("Configuration:");
                println!("{}", toml::to_string_pretty(&config)?);
                println!("\nConfig file: {:?}", Config::config_file_path()?);
            }
        }
    }

    Ok(())
}
