//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::loader::trim_root;
use crate::config::Config;

/// Staging uploader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "staging-uploader",
    version,
    about = "Accept authenticated uploads and stage them for the site build",
    long_about = "Serves an upload form and a multipart upload endpoint. Each upload is \
                  written into a date/slug named directory under the archive root, \
                  where the static-site build picks it up."
)]
pub struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Address to listen on.
    #[arg(short, long, env = "BIND_ADDR")]
    pub bind: Option<String>,

    /// Base data directory; uploads are staged under its archive folder.
    #[arg(short = 'd', long = "data-root", env = "DATA_ROOT")]
    pub data_root: Option<PathBuf>,

    /// Site output directory, reported by the health endpoint.
    #[arg(long = "site-root", env = "SITE_ROOT")]
    pub site_root: Option<PathBuf>,

    /// Basic auth username.
    #[arg(short, long, env = "ARCHIVE_USER")]
    pub user: Option<String>,

    /// Basic auth password. Leave unset to disable authentication.
    #[arg(short, long, env = "ARCHIVE_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// Maximum accepted request body size in bytes.
    #[arg(long = "max-upload-bytes", env = "MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<u64>,

    /// Print the staging directories and exit instead of serving.
    #[arg(long)]
    pub list: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }

        if let Some(data_root) = self.data_root {
            config.storage.data_root = data_root;
        }

        if let Some(site_root) = self.site_root {
            config.storage.site_root = site_root;
        }

        if let Some(user) = self.user {
            config.auth.username = user;
        }

        if let Some(password) = self.password {
            config.auth.password = password;
        }

        if let Some(max) = self.max_upload_bytes {
            config.storage.max_upload_bytes = max;
        }

        config.storage.data_root = trim_root(std::mem::take(&mut config.storage.data_root));
        config.storage.site_root = trim_root(std::mem::take(&mut config.storage.site_root));
    }
}
