//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment variables

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::hierarchy::MutationPolicy;
use crate::tmux::TmuxExecutor;

/// Prefix for environment overrides (`TMUXC_TMUX_BINARY`, `TMUXC_STRICT`, ...)
pub const ENV_PREFIX: &str = "TMUXC_";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// tmux binary to invoke
    pub tmux_binary: PathBuf,

    /// Socket name passed to tmux as `-L` (default server if unset)
    pub socket_name: Option<String>,

    /// tmux server configuration file passed as `-f` (`~/.tmux.conf` if unset)
    pub tmux_config: Option<PathBuf>,

    /// Timeout for awaited tmux commands in milliseconds (none if unset)
    pub timeout_ms: Option<u64>,

    /// Roll back model changes when tmux rejects them
    pub strict: bool,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path (if set, logs to file instead of stderr)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmux_binary: PathBuf::from("tmux"),
            socket_name: None,
            tmux_config: None,
            timeout_ms: None,
            strict: false,
            debug: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration using a specific config file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(config_path))
            // Layer environment variables
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Save current configuration to the default file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save current configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(config_path, toml).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    /// Build the process-backed runner described by this configuration
    pub fn executor(&self) -> TmuxExecutor {
        let mut executor = TmuxExecutor::new().with_binary(&self.tmux_binary);
        if let Some(socket) = self.socket_name.as_deref().filter(|s| !s.is_empty()) {
            executor = executor.with_socket_name(socket);
        }
        if let Some(config_file) = &self.tmux_config {
            executor = executor.with_config_file(config_file);
        }
        if let Some(ms) = self.timeout_ms {
            executor = executor.with_timeout(Duration::from_millis(ms));
        }
        executor
    }

    pub fn policy(&self) -> MutationPolicy {
        if self.strict {
            MutationPolicy::Strict
        } else {
            MutationPolicy::Optimistic
        }
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "tmux-composer", "tmux-composer").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tmux_binary, PathBuf::from("tmux"));
        assert_eq!(config.socket_name, None);
        assert_eq!(config.timeout_ms, None);
        assert_eq!(config.policy(), MutationPolicy::Optimistic);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("tmux_binary"));
        assert!(toml.contains("strict = false"));
    }

    #[test]
    fn test_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                    tmux_binary = "/opt/tmux/bin/tmux"
                    socket_name = "composer"
                    timeout_ms = 2000
                "#,
            )?;
            jail.set_env("TMUXC_STRICT", "true");
            jail.set_env("TMUXC_SOCKET_NAME", "override");

            let config = Config::load_from(Path::new("config.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config.tmux_binary, PathBuf::from("/opt/tmux/bin/tmux"));
            assert_eq!(config.socket_name.as_deref(), Some("override"));
            assert_eq!(config.timeout_ms, Some(2000));
            assert!(config.strict);
            assert_eq!(config.policy(), MutationPolicy::Strict);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config =
                Config::load_from(Path::new("does-not-exist.toml")).map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            socket_name: Some("work".to_string()),
            strict: true,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("socket_name = \"work\""));
    }
}
