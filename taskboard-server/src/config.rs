//! Configuration for the `Taskboard` development API server.
//!
//! Priority (highest first): CLI flag, environment variable (via clap `env`),
//! TOML file (`~/.config/taskboard-server/config.toml`), compiled default.

use std::path::{Path, PathBuf};

/// Errors that can occur when loading server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// On-disk layout; every key optional.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerConfigFile {
    server: ServerSection,
}

/// `[server]` table.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerSection {
    bind_addr: Option<String>,
}

/// CLI arguments for the API server.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Taskboard development API server")]
pub struct ServerCliArgs {
    /// Address to listen on.
    #[arg(short, long, env = "TASKBOARD_SERVER_ADDR")]
    pub bind: Option<String>,

    /// Path to config file (default: `~/.config/taskboard-server/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKBOARD_SERVER_LOG")]
    pub log_level: String,
}

/// Resolved server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address, e.g. `127.0.0.1:3000`.
    pub bind_addr: String,
    /// Log filter directive.
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads the config file (explicit or default location) and merges it
    /// under the CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit `--config` file is missing or
    /// any config file fails to parse.
    pub fn load(cli: &ServerCliArgs) -> Result<Self, ConfigError> {
        let file = read_config_file(cli.config.as_deref())?;
        Ok(Self::merge(cli, &file))
    }

    fn merge(cli: &ServerCliArgs, file: &ServerConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: cli
                .bind
                .clone()
                .or_else(|| file.server.bind_addr.clone())
                .unwrap_or(defaults.bind_addr),
            log_level: cli.log_level.clone(),
        }
    }
}

fn read_config_file(explicit: Option<&Path>) -> Result<ServerConfigFile, ConfigError> {
    if let Some(p) = explicit {
        let text = std::fs::read_to_string(p).map_err(|source| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source,
        })?;
        return Ok(toml::from_str(&text)?);
    }

    let Some(dir) = dirs::config_dir() else {
        return Ok(ServerConfigFile::default());
    };
    let path = dir.join("taskboard-server").join("config.toml");
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok(toml::from_str(&text)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServerConfigFile::default()),
        Err(source) => Err(ConfigError::ReadFile { path, source }),
    }
}
