//! Configuration loading for careerpath.
//! Reads careerpath.toml from the current directory or the path in the
//! CAREERPATH_CONFIG env var; a handful of env vars override single keys.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "CAREERPATH_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "careerpath.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// The single origin allowed by CORS
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host()        -> IpAddr { IpAddr::from([127, 0, 0, 1]) }
fn default_port()        -> u16    { 8000 }
fn default_cors_origin() -> String { "http://localhost:3000".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
}

fn default_model_path()  -> PathBuf { PathBuf::from("career_predictor.json") }
fn default_scaler_path() -> PathBuf { PathBuf::from("scaler.json") }

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// Reject scores outside 0..=100 and negative study hours instead of
    /// only logging them.
    #[serde(default)]
    pub enforce_score_range: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// Reads `.env` if present, then the file named by CAREERPATH_CONFIG
    /// (which must exist) or `careerpath.toml` (optional; built-in defaults
    /// apply when absent), then applies env overrides.
    pub fn load() -> Result<Self> {
        if dotenvy::dotenv().is_ok() {
            tracing::debug!("Loaded .env");
        }

        let mut config = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            Err(_) => {
                tracing::info!("No {} found; using built-in defaults", DEFAULT_CONFIG_PATH);
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply single-key overrides. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CAREERPATH_HOST") {
            self.server.host = v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CAREERPATH_HOST".to_string(),
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("CAREERPATH_PORT") {
            self.server.port = v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CAREERPATH_PORT".to_string(),
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("CAREERPATH_MODEL_PATH") {
            self.artifacts.model_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("CAREERPATH_SCALER_PATH") {
            self.artifacts.scaler_path = PathBuf::from(v);
        }
        Ok(())
    }
}
