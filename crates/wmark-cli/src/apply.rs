//! Flag-driven watermarking.
//!
//! Values are resolved with the same rules and messages as the prompt flow.
//! Coordinates and colors may be separated by commas instead of spaces.

use crate::resolve;
use crate::session::{SessionOutcome, SessionResult};
use std::path::PathBuf;
use tracing::info;
use wmark_io::{ImageRole, WriteOptions};
use wmark_ops::{CompositeOptions, PlacementMode, TransparencyPolicy};

/// Parameters of one non-interactive run, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyRequest {
    /// Base image path.
    pub base: PathBuf,
    /// Watermark image path.
    pub watermark: PathBuf,
    /// Output file name; its extension picks the format.
    pub output: String,
    /// Weight in percent, unparsed.
    pub weight: String,
    /// `X,Y` of a single placement. `None` tiles the watermark.
    pub at: Option<String>,
    /// Gate on the watermark's alpha channel.
    pub alpha: bool,
    /// `R,G,B` color to key out.
    pub key: Option<String>,
    /// Encoder settings.
    pub write_options: WriteOptions,
}

impl ApplyRequest {
    /// A grid run at 50% with no transparency.
    pub fn new(base: impl Into<PathBuf>, watermark: impl Into<PathBuf>, output: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            watermark: watermark.into(),
            output: output.into(),
            weight: "50".into(),
            at: None,
            alpha: false,
            key: None,
            write_options: WriteOptions::default(),
        }
    }

    fn policy(&self) -> SessionResult<TransparencyPolicy> {
        if self.alpha {
            return Ok(TransparencyPolicy::UseWatermarkAlpha);
        }
        match &self.key {
            Some(key) => Ok(TransparencyPolicy::color_key(resolve::parse_color(&key.replace(',', " "))?)),
            None => Ok(TransparencyPolicy::None),
        }
    }
}

/// Loads both images, composites them and writes the output.
///
/// Fails on the first unusable input, in the order the prompt flow would
/// meet it. `--alpha` on a watermark without alpha fails the compositor's
/// precondition check.
pub fn run(request: &ApplyRequest) -> SessionResult<SessionOutcome> {
    let base = wmark_io::load(&request.base, ImageRole::Image)?;
    let watermark = wmark_io::load(&request.watermark, ImageRole::Watermark)?;
    wmark_io::check_sizes(&base, &watermark)?;

    let policy = request.policy()?;
    let weight = resolve::parse_percentage(&request.weight)?;
    let mode = match &request.at {
        Some(at) => {
            // check_sizes already ran, so neither subtraction underflows.
            let max_x = base.width() - watermark.width();
            let max_y = base.height() - watermark.height();
            resolve::parse_position(&at.replace(',', " "), max_x, max_y)?
        }
        None => PlacementMode::Grid,
    };

    let options = CompositeOptions::new(weight, mode, policy);
    info!(%weight, %mode, %policy, "Applying watermark");
    let composed = options.try_apply_par(&base, &watermark)?;

    let format = wmark_io::write(&request.output, &composed, &request.write_options)?;
    Ok(SessionOutcome {
        output: request.output.clone(),
        format,
        options,
    })
}
