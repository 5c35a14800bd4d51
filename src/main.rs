//! Staging Uploader - server entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use staging_uploader::{
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    fs::list_staging,
    output::{
        print_banner, print_config_summary, print_error, print_info, print_staging_listing,
        print_warning,
    },
    server,
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            match e {
                Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::TomlParse(_) => ExitCode::from(exit_codes::CONFIG_ERROR as u8),
                Error::Io(_) | Error::ArchiveNotFound(_) => {
                    ExitCode::from(exit_codes::SERVER_ERROR as u8)
                }
                _ => ExitCode::from(exit_codes::UNEXPECTED_ERROR as u8),
            }
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Load configuration
    let config_path = args.config.clone();
    let mut config = if config_path.exists() {
        Config::load(&config_path)?
    } else {
        tracing::debug!("No configuration file at {}", config_path.display());
        Config::default()
    };

    // Merge CLI arguments into config
    let list_only = args.list;
    args.merge_into_config(&mut config);

    // Validate configuration
    validate_config(&config)?;

    let archive_root = config.archive_root();

    if list_only {
        let entries = list_staging(&archive_root)?;
        print_staging_listing(&archive_root.display().to_string(), &entries);
        return Ok(());
    }

    print_banner();
    print_config_summary(
        &config.server.bind,
        &archive_root.display().to_string(),
        config.auth.is_enabled(),
        config.storage.max_upload_bytes,
    );

    if !config.auth.is_enabled() {
        print_warning("ARCHIVE_PASS is not set; uploads are accepted without authentication");
    }

    print_info("Starting server...");
    server::serve(config).await
}
