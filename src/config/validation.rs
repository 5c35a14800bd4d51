//! Configuration validation logic.

use std::net::SocketAddr;
use std::sync::LazyLock;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Extension entries: optional leading dot, then alphanumerics.
static EXTENSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.?[A-Za-z0-9]+$").unwrap());

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_bind(&config.server.bind)?;
    validate_max_upload_bytes(config.storage.max_upload_bytes)?;
    validate_archive_subdir(&config.storage.archive_subdir)?;
    validate_extensions(&config.storage.allowed_extensions)?;
    validate_credentials(&config.auth.username, &config.auth.password)?;

    Ok(())
}

/// Validate the listen address.
pub fn validate_bind(bind: &str) -> Result<SocketAddr> {
    bind.parse::<SocketAddr>().map_err(|e| Error::ConfigValidation {
        field: "server.bind".to_string(),
        message: format!("'{}' is not a socket address: {}", bind, e),
    })
}

/// Validate the request size limit.
pub fn validate_max_upload_bytes(max: u64) -> Result<()> {
    if max == 0 {
        return Err(Error::ConfigValidation {
            field: "storage.max_upload_bytes".to_string(),
            message: "Upload limit must be greater than zero".to_string(),
        });
    }

    if usize::try_from(max).is_err() {
        return Err(Error::ConfigValidation {
            field: "storage.max_upload_bytes".to_string(),
            message: format!("Upload limit {} does not fit this platform", max),
        });
    }

    Ok(())
}

/// The archive directory must be a single plain path segment.
pub fn validate_archive_subdir(subdir: &str) -> Result<()> {
    let invalid = subdir.is_empty()
        || subdir == "."
        || subdir == ".."
        || subdir.contains('/')
        || subdir.contains('\\')
        || subdir.contains('\0');

    if invalid {
        return Err(Error::ConfigValidation {
            field: "storage.archive_subdir".to_string(),
            message: format!("'{}' must be a single directory name", subdir),
        });
    }

    Ok(())
}

/// Validate the extension allow-list.
pub fn validate_extensions<S: AsRef<str>>(extensions: &[S]) -> Result<()> {
    if extensions.is_empty() {
        return Err(Error::MissingConfig(
            "storage.allowed_extensions (at least one extension required)".to_string(),
        ));
    }

    for ext in extensions {
        let ext = ext.as_ref();
        if !EXTENSION_PATTERN.is_match(ext) {
            return Err(Error::ConfigValidation {
                field: "storage.allowed_extensions".to_string(),
                message: format!(
                    "Extension '{}' must contain only letters and digits",
                    ext
                ),
            });
        }
    }

    Ok(())
}

/// A password without a username can never be satisfied.
pub fn validate_credentials(username: &str, password: &str) -> Result<()> {
    if !password.is_empty() && username.trim().is_empty() {
        return Err(Error::MissingConfig(
            "auth.username (required when a password is set)".to_string(),
        ));
    }

    Ok(())
}
