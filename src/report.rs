//! Console summary and JSON audit output for batch results.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::batch::BatchResult;
use crate::error::Result;

/// Print a per-bucket summary of the batch to stdout.
///
/// Every entry's outcome is listed individually so the console output
/// alone accounts for the whole batch.
pub fn print_summary(result: &BatchResult) {
    println!();
    println!("Processing summary ({} entries):", result.total());
    println!("  created: {}", result.created.len());
    println!("  failed:  {}", result.failed.len());
    println!("  skipped: {}", result.skipped.len());

    if !result.created.is_empty() {
        println!();
        println!("Created issues:");
        for item in &result.created {
            println!("  {} (entry {}): {}", item.issue_key, item.entry, item.summary);
        }
    }

    if !result.failed.is_empty() {
        println!();
        println!("Failed entries:");
        for item in &result.failed {
            println!("  entry {} ({}): {}", item.entry, item.summary, item.error);
        }
    }

    if !result.skipped.is_empty() {
        println!();
        println!("Skipped entries:");
        for item in &result.skipped {
            println!("  entry {}: {}", item.entry, item.reason);
        }
    }
}

/// Persist the full batch result as pretty-printed JSON.
pub fn write_audit(result: &BatchResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)?;

    info!(path = %path.display(), "wrote batch audit file");
    Ok(())
}

/// Default audit path: `<stem>.results.json` next to the input file.
pub fn default_audit_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("batch");
    input.with_file_name(format!("{}.results.json", stem))
}
