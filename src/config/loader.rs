//! Configuration structures and loading logic.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Title shown on the upload page.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            title: default_title(),
        }
    }
}

/// Staging storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base data directory; staging directories live under `archive_subdir`.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    /// Site output directory. Reported by the health endpoint only.
    #[serde(default = "default_site_root")]
    pub site_root: PathBuf,

    /// Name of the archive directory under `data_root`.
    #[serde(default = "default_archive_subdir")]
    pub archive_subdir: String,

    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,

    /// File extensions accepted for staging.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            site_root: default_site_root(),
            archive_subdir: default_archive_subdir(),
            max_upload_bytes: default_max_upload_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Basic authentication credentials.
///
/// An empty password disables the authentication gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: String::new(),
        }
    }
}

impl AuthConfig {
    /// Whether requests must carry credentials.
    pub fn is_enabled(&self) -> bool {
        !self.password.is_empty()
    }
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_title() -> String {
    "Drake Hooks Uploader".to_string()
}

fn default_data_root() -> PathBuf {
    PathBuf::from("/data")
}

fn default_site_root() -> PathBuf {
    PathBuf::from("/site")
}

fn default_archive_subdir() -> String {
    "archive".to_string()
}

fn default_max_upload_bytes() -> u64 {
    2 * 1024 * 1024 * 1024
}

/// Extensions staged by default.
pub fn default_allowed_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "avif", "gif", "webp", "heic", "mov", "mp4"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

fn default_username() -> String {
    "drake".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Directory holding all staging directories.
    pub fn archive_root(&self) -> PathBuf {
        self.storage.data_root.join(&self.storage.archive_subdir)
    }
}

/// Strip trailing separators from a configured root, keeping `/` itself.
pub fn trim_root(path: PathBuf) -> PathBuf {
    let raw = path.to_string_lossy();
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.len() == raw.len() {
        path
    } else {
        PathBuf::from(trimmed)
    }
}
