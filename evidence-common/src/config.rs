//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration comes from, in priority order:
//! 1. Command-line arguments
//! 2. Environment variables (`EVIDENCE_ROOT_FOLDER`, ...)
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing TOML file is not an error: the service starts on defaults.

use crate::store::EvidenceStore;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable naming the data root folder
pub const ROOT_FOLDER_ENV: &str = "EVIDENCE_ROOT_FOLDER";

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    /// Folder the data paths below are resolved against
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub host: Option<String>,

    /// Tag list file, relative to the root folder
    #[serde(default = "default_tags_file")]
    pub tags_file: PathBuf,

    /// Directory of `{tag_id}_detections.json` / `{tag_id}_summary.txt` files
    #[serde(default = "default_detections_dir")]
    pub detections_dir: PathBuf,

    /// Directory served under `/data`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            port: None,
            host: None,
            tags_file: default_tags_file(),
            detections_dir: default_detections_dir(),
            static_dir: default_static_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_tags_file() -> PathBuf {
    PathBuf::from("data/tags.json")
}

fn default_detections_dir() -> PathBuf {
    PathBuf::from("data/evidence_detections")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::parse(&content)?;
                info!("Loaded TOML configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Load the explicitly given file, else the platform default location if present
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Platform config file location (`~/.config/evidence-review/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("evidence-review").join("config.toml"))
}

/// Root folder resolution: CLI, then environment, then TOML, then the working directory
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml.root_folder {
        return path.clone();
    }

    PathBuf::from(".")
}

/// Command-line configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub host: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub paths: DataPaths,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Config {
    pub fn resolve(toml: TomlConfig, overrides: ConfigOverrides) -> Self {
        let root = resolve_root_folder(overrides.root_folder.as_deref(), &toml);
        let paths = DataPaths::resolve(&root, &toml);

        Self {
            host: overrides
                .host
                .or(toml.host)
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            paths,
            request_timeout: Duration::from_secs(toml.request_timeout_secs),
            log_level: toml.logging.level,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Absolute locations of the evidence data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub root_folder: PathBuf,
    pub tags_file: PathBuf,
    pub detections_dir: PathBuf,
    pub static_dir: PathBuf,
}

impl DataPaths {
    /// Resolve the configured relative paths against `root`
    pub fn resolve(root: &Path, toml: &TomlConfig) -> Self {
        Self {
            root_folder: root.to_path_buf(),
            tags_file: root.join(&toml.tags_file),
            detections_dir: root.join(&toml.detections_dir),
            static_dir: root.join(&toml.static_dir),
        }
    }

    pub fn store(&self) -> EvidenceStore {
        EvidenceStore::new(&self.tags_file, &self.detections_dir)
    }
}
