//! Configuration module for the staging uploader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Configuration validation

pub mod loader;
pub mod validation;

pub use loader::{default_allowed_extensions, AuthConfig, Config, ServerConfig, StorageConfig};
pub use validation::validate_config;
