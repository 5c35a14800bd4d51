//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     Staging Uploader                                  ║
║     Uploads in, staged folders out                    ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(bind: &str, archive_root: &str, auth_enabled: bool, max_bytes: u64) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Listen:       {}", bind);
    println!("  Archive root: {}", archive_root);
    println!("  Max upload:   {} MiB", max_bytes / 1024 / 1024);
    if auth_enabled {
        println!("  Auth:         basic");
    } else {
        println!("  Auth:         {}", style("disabled (no password set)").yellow());
    }
    println!();
}
