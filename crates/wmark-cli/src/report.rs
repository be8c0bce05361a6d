//! Text report for `wmark info`.

use std::io::{self, Write};
use std::path::Path;
use wmark_io::{ImageInfo, ImageRole};

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Writes one file's layout and whether the loader accepts it as a watermark.
pub fn write_info<W: Write>(out: &mut W, path: &Path, info: &ImageInfo) -> io::Result<()> {
    writeln!(out, "{}", path.display())?;
    writeln!(out, "  Format:      {}", info.format.mime_type())?;
    writeln!(out, "  Resolution:  {}x{}", info.width, info.height)?;
    writeln!(out, "  Components:  {}", info.color_components())?;
    writeln!(out, "  Bits/pixel:  {}", info.bits_per_pixel())?;
    writeln!(out, "  Alpha:       {}", yes_no(info.has_alpha()))?;
    match info.validate(ImageRole::Watermark) {
        Ok(()) => writeln!(out, "  Accepted:    yes"),
        Err(reason) => writeln!(out, "  Accepted:    no ({reason})"),
    }
}
