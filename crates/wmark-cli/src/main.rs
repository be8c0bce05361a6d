//! wmark - blend a watermark image into a base image
//!
//! Runs the interactive prompt flow by default.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use wmark_io::DEFAULT_JPEG_QUALITY;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "wmark")]
#[command(author, version, about = "Blend a watermark image into a base image")]
#[command(long_about = "
Blends a watermark into a base image with a fixed percentage weight, either
once at a chosen position or tiled across the whole image.

Examples:
  wmark                                   # Interactive prompts
  wmark info photo.png logo.png           # Check inputs
  wmark apply photo.png logo.png -o out.jpg -w 30 --grid
  wmark apply photo.png logo.png -o out.png -w 50 --at 10,20 --alpha
  wmark apply photo.png logo.png -o out.png --key 255,255,255
")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer prompts for every parameter (default)
    #[command(visible_alias = "int")]
    Interactive(InteractiveArgs),

    /// Watermark an image with parameters given as flags
    #[command(visible_alias = "a")]
    Apply(ApplyArgs),

    /// Show image layout and whether it is accepted
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct InteractiveArgs {
    /// JPEG quality for .jpg output (1-100)
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

#[derive(Args)]
struct ApplyArgs {
    /// Base image
    base: PathBuf,

    /// Watermark image
    watermark: PathBuf,

    /// Output image (.jpg or .png)
    #[arg(short, long)]
    output: String,

    /// Watermark weight in percent (0-100)
    #[arg(short, long, default_value = "50")]
    weight: String,

    /// Tile the watermark over the whole image (default)
    #[arg(long, conflicts_with = "at")]
    grid: bool,

    /// Place one watermark with its top-left corner at X,Y
    #[arg(long, value_name = "X,Y")]
    at: Option<String>,

    /// Skip watermark pixels whose alpha is 0
    #[arg(long, conflicts_with = "key")]
    alpha: bool,

    /// Skip watermark pixels of exactly this color
    #[arg(long, value_name = "R,G,B")]
    key: Option<String>,

    /// JPEG quality for .jpg output (1-100)
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: u8,
}

#[derive(Args)]
struct InfoArgs {
    /// Input image(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        None => commands::interactive::run(InteractiveArgs::default()),
        Some(Commands::Interactive(args)) => commands::interactive::run(args),
        Some(Commands::Apply(args)) => commands::apply::run(args),
        Some(Commands::Info(args)) => commands::info::run(args),
    }
}

impl Default for InteractiveArgs {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match wmark_cli::user_message(&err) {
                Some(message) => println!("{message}"),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
