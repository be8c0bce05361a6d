//! Non-interactive watermarking.

use crate::ApplyArgs;
use anyhow::Result;
use tracing::debug;
use wmark_cli::apply::{self, ApplyRequest};
use wmark_io::WriteOptions;

/// Runs the apply command.
pub fn run(args: ApplyArgs) -> Result<()> {
    // `--grid` conflicts with `--at`, so it only restates the default.
    debug!(grid = args.grid, at = ?args.at, "Placement flags");
    let request = ApplyRequest {
        base: args.base,
        watermark: args.watermark,
        output: args.output,
        weight: args.weight,
        at: args.at,
        alpha: args.alpha,
        key: args.key,
        write_options: WriteOptions {
            jpeg_quality: args.quality,
        },
    };
    let outcome = apply::run(&request)?;
    println!("The watermarked image {} has been created.", outcome.output);
    Ok(())
}
