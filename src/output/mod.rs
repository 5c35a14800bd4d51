//! Output module for console output.
//!
//! Provides:
//! - Colored console output
//! - Staging tree reporting

pub mod console;
pub mod listing;

pub use self::console::{print_banner, print_config_summary, print_error, print_info, print_warning};
pub use listing::print_staging_listing;
