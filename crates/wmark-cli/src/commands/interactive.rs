//! Interactive prompt flow on the terminal.

use crate::InteractiveArgs;
use anyhow::Result;
use std::io;
use wmark_cli::session::Session;
use wmark_io::WriteOptions;

/// Runs the prompt session over stdin and stdout.
pub fn run(args: InteractiveArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(stdin.lock(), stdout.lock()).with_write_options(WriteOptions {
        jpeg_quality: args.quality,
    });
    session.run()?;
    Ok(())
}
