//! Image info command.
//!
//! Reports the decoded layout of each file and whether the loader would
//! take it as a watermark.

use crate::InfoArgs;
use anyhow::{Context, Result};
use std::io::Write;
use wmark_cli::report;

/// Runs the info command.
pub fn run(args: InfoArgs) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (i, path) in args.input.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let info = wmark_io::inspect(path).with_context(|| format!("Failed to read: {}", path.display()))?;
        report::write_info(&mut out, path, &info)?;
    }
    Ok(())
}
