//! Staging tree report.

use console::style;

use crate::fs::StagingEntry;

/// Print every staging directory with its files.
pub fn print_staging_listing(archive_root: &str, entries: &[StagingEntry]) {
    println!();
    println!("{}", style(format!("Staging under {}:", archive_root)).bold());

    if entries.is_empty() {
        println!("  {}", style("(empty)").dim());
    }

    for entry in entries {
        println!(
            "  {} {}",
            style(&entry.slug).green(),
            style(format!("({} files)", entry.files.len())).dim()
        );
        for file in &entry.files {
            println!("    {}", file);
        }
    }

    println!();
    println!("  Total: {} directories", entries.len());
}
