//! Configuration system for the taskboard client.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/taskboard/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::PathBuf;
use std::time::Duration;

use taskboard_proto::task::BoardId;
use url::Url;

use crate::net::SyncConfig;

/// API served by a local `taskboard-server`.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";

/// Board shown when nothing else is configured.
pub const DEFAULT_BOARD_ID: &str = "32c69b32-b687-491b-80f4-43ce74dd0449";

/// Errors that can occur when loading configuration.
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

    /// The API base URL is not an absolute URL.
    #[error("invalid api url {url:?}: {source}")]
    InvalidUrl {
        /// The rejected value.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
}

const DEFAULT_BOARD_NAME: &str = "Main Board";
const DEFAULT_CHANNEL_CAPACITY: usize = 64;
const DEFAULT_POLL_TIMEOUT_MS: u64 = 50;

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    api: ApiFileConfig,
    ui: UiFileConfig,
}

/// `[api]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ApiFileConfig {
    base_url: Option<String>,
    board_id: Option<String>,
    channel_capacity: Option<usize>,
}

/// `[ui]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct UiFileConfig {
    board_name: Option<String>,
    poll_timeout_ms: Option<u64>,
}

// ---------------------------------------------------------------------------
// Resolved configuration (concrete types, all fields populated)
// ---------------------------------------------------------------------------

/// Fully resolved client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    // -- API --
    /// Base URL of the task API.
    pub api_url: Url,
    /// Board to mirror.
    pub board_id: BoardId,
    /// Channel capacity for command/event mpsc channels.
    pub channel_capacity: usize,

    // -- UI --
    /// Name shown in the header.
    pub board_name: String,
    /// Poll timeout for the TUI event loop.
    pub poll_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the explicit config file cannot be read
    /// or parsed, or if the resolved API URL is invalid.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Self::resolve(cli, &file)
    }

    /// Configuration with every setting at its compiled default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] only if [`DEFAULT_API_URL`] were malformed.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::resolve(&CliArgs::default(), &ConfigFile::default())
    }

    /// Resolve a `ClientConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default. Separated from `load()` so it can be
    /// tested without CLI parsing.
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Result<Self, ConfigError> {
        let raw_url = cli
            .api_url
            .as_deref()
            .or(file.api.base_url.as_deref())
            .unwrap_or(DEFAULT_API_URL);
        let api_url = Url::parse(raw_url).map_err(|source| ConfigError::InvalidUrl {
            url: raw_url.to_string(),
            source,
        })?;

        Ok(Self {
            api_url,
            board_id: BoardId::new(
                cli.board_id
                    .as_deref()
                    .or(file.api.board_id.as_deref())
                    .unwrap_or(DEFAULT_BOARD_ID),
            ),
            channel_capacity: file
                .api
                .channel_capacity
                .unwrap_or(DEFAULT_CHANNEL_CAPACITY),
            board_name: cli
                .board_name
                .as_deref()
                .or(file.ui.board_name.as_deref())
                .unwrap_or(DEFAULT_BOARD_NAME)
                .to_string(),
            poll_timeout: Duration::from_millis(
                file.ui.poll_timeout_ms.unwrap_or(DEFAULT_POLL_TIMEOUT_MS),
            ),
        })
    }

    /// Build the [`SyncConfig`] for the background sync tasks.
    #[must_use]
    pub fn to_sync_config(&self) -> SyncConfig {
        SyncConfig {
            api_url: self.api_url.clone(),
            board_id: self.board_id.clone(),
            channel_capacity: self.channel_capacity,
        }
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Terminal kanban board client")]
pub struct CliArgs {
    /// Base URL of the task API.
    #[arg(long, env = "TASKBOARD_API_URL")]
    pub api_url: Option<String>,

    /// Board to display.
    #[arg(long, env = "TASKBOARD_BOARD_ID")]
    pub board_id: Option<String>,

    /// Name shown in the header.
    #[arg(long)]
    pub board_name: Option<String>,

    /// Path to config file (default: `~/.config/taskboard/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "TASKBOARD_LOG")]
    pub log_level: String,

    /// Path to log file (default: `$TMPDIR/taskboard.log`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and a missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&std::path::Path>) -> Result<ConfigFile, ConfigError> {
    if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ConfigFile::default());
    };
    let path = config_dir.join("taskboard").join("config.toml");

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
