//! The question-and-answer watermarking flow.
//!
//! [`Session`] asks for the base image, the watermark, the transparency
//! policy, the blend percentage, the placement and the output name, one line
//! at a time, then writes the result. It is generic over its streams so it
//! can run against a terminal or a scripted buffer.
//!
//! The first unusable answer ends the session with an error whose `Display`
//! is the message meant for the user.

use crate::resolve::{self, PositionMethod, ResolveError};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};
use wmark_core::PixelGrid;
use wmark_io::{Format, ImageRole, IoError, WriteOptions};
use wmark_ops::{CompositeOptions, OpsError, PlacementMode, TransparencyPolicy};

/// Why a session stopped early.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An input file could not be used, or the output could not be written.
    #[error(transparent)]
    Image(#[from] IoError),

    /// An answer could not be turned into a parameter.
    #[error(transparent)]
    Answer(#[from] ResolveError),

    /// The compositor refused the parameters.
    #[error(transparent)]
    Composite(#[from] OpsError),

    /// Reading from or writing to the terminal failed.
    #[error("terminal I/O failed: {0}")]
    Terminal(#[source] io::Error),

    /// The input stream closed before a question was answered.
    #[error("input ended while waiting for the {0}")]
    EndOfInput(&'static str),
}

impl SessionError {
    /// `true` when the error is a rejected answer or input file.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::Image(e) => e.is_user_error(),
            Self::Answer(_) | Self::Composite(_) => true,
            Self::Terminal(_) | Self::EndOfInput(_) => false,
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// What a finished session produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Output file name as typed.
    pub output: String,
    /// Format written.
    pub format: Format,
    /// Parameters the composite ran with.
    pub options: CompositeOptions,
}

/// One interactive watermarking run over an input and an output stream.
pub struct Session<R, W> {
    input: R,
    output: W,
    write_options: WriteOptions,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            write_options: WriteOptions::default(),
        }
    }

    pub fn with_write_options(mut self, write_options: WriteOptions) -> Self {
        self.write_options = write_options;
        self
    }

    /// Gives back the output stream, e.g. to inspect a transcript.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs the whole flow and writes the watermarked file.
    pub fn run(&mut self) -> SessionResult<SessionOutcome> {
        let base_name = self.ask("Input the image filename: ", "image filename")?;
        let base = wmark_io::load(&base_name, ImageRole::Image)?;

        let mark_name = self.ask("Input the watermark image filename: ", "watermark filename")?;
        let watermark = wmark_io::load(&mark_name, ImageRole::Watermark)?;
        wmark_io::check_sizes(&base, &watermark)?;

        let policy = self.ask_policy(&watermark)?;
        let answer = self.ask(
            "Input the watermark transparency percentage (Integer 0-100):",
            "transparency percentage",
        )?;
        let weight = resolve::parse_percentage(&answer)?;
        let mode = self.ask_placement(&base, &watermark)?;

        let options = CompositeOptions::new(weight, mode, policy);
        debug!(%weight, %mode, %policy, "Composing");
        let composed = options.try_apply_par(&base, &watermark)?;

        let output = self.ask(
            "Input the output image filename (jpg or png extension):",
            "output filename",
        )?;
        let format = wmark_io::write(&output, &composed, &self.write_options)?;
        self.say(&format!("The watermarked image {output} has been created."))?;
        info!(output = %output, "Session finished");

        Ok(SessionOutcome {
            output,
            format,
            options,
        })
    }

    fn ask_policy(&mut self, watermark: &PixelGrid) -> SessionResult<TransparencyPolicy> {
        if watermark.has_alpha() {
            let answer = self.ask("Do you want to use the watermark's Alpha channel?", "alpha answer")?;
            return Ok(resolve::alpha_policy(&answer));
        }

        let answer = self.ask("Do you want to set a transparency color?", "transparency answer")?;
        if !resolve::is_yes(&answer) {
            return Ok(TransparencyPolicy::None);
        }
        let color = self.ask(
            "Input a transparency color ([Red] [Green] [Blue]):",
            "transparency color",
        )?;
        Ok(TransparencyPolicy::color_key(resolve::parse_color(&color)?))
    }

    fn ask_placement(&mut self, base: &PixelGrid, watermark: &PixelGrid) -> SessionResult<PlacementMode> {
        let method = self.ask("Choose the position method (single, grid):", "position method")?;
        match resolve::parse_position_method(&method)? {
            PositionMethod::Grid => Ok(PlacementMode::Grid),
            PositionMethod::Single => {
                // check_sizes already ran, so neither subtraction underflows.
                let max_x = base.width() - watermark.width();
                let max_y = base.height() - watermark.height();
                let answer = self.ask(
                    &format!("Input the watermark position ([x 0-{max_x}] [y 0-{max_y}]):"),
                    "watermark position",
                )?;
                Ok(resolve::parse_position(&answer, max_x, max_y)?)
            }
        }
    }

    fn say(&mut self, line: &str) -> SessionResult<()> {
        writeln!(self.output, "{line}").map_err(SessionError::Terminal)?;
        self.output.flush().map_err(SessionError::Terminal)
    }

    /// Prints a prompt, then reads one line without its terminator.
    fn ask(&mut self, prompt: &str, what: &'static str) -> SessionResult<String> {
        self.say(prompt)?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(SessionError::Terminal)?;
        if read == 0 {
            return Err(SessionError::EndOfInput(what));
        }
        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(answer.to_string())
    }
}
