//! Text produced by the info report.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wmark_cli::report::write_info;

fn write_png(dir: &Path, name: &str, w: u32, h: u32, color: png::ColorType, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), w, h);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(data).unwrap();
    writer.finish().unwrap();
    path
}

fn report(path: &Path) -> String {
    let info = wmark_io::inspect(path).unwrap();
    let mut out = Vec::new();
    write_info(&mut out, path, &info).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn accepted_rgba_file() {
    let dir = TempDir::new().unwrap();
    let path = write_png(dir.path(), "logo.png", 3, 2, png::ColorType::Rgba, &[7u8; 24]);

    let expected = format!(
        "{}\n\
         \x20 Format:      image/png\n\
         \x20 Resolution:  3x2\n\
         \x20 Components:  3\n\
         \x20 Bits/pixel:  32\n\
         \x20 Alpha:       yes\n\
         \x20 Accepted:    yes\n",
        path.display()
    );
    assert_eq!(report(&path), expected);
}

#[test]
fn rejected_file_gives_the_reason() {
    let dir = TempDir::new().unwrap();
    let path = write_png(dir.path(), "gray.png", 2, 1, png::ColorType::Grayscale, &[0, 255]);

    let text = report(&path);
    assert!(text.contains("  Components:  1\n"));
    assert!(text.contains("  Alpha:       no\n"));
    assert!(text.ends_with("  Accepted:    no (The number of watermark color components isn't 3.)\n"));
}
