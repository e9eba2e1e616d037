//! Rendering a frame to a PNG file.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat};

use morphtype_core::config::CanvasConfig;
use morphtype_core::{Canvas, FrameReport, Session, Surface};

/// Render the session's current state onto a fresh canvas.
pub fn render_frame(session: &mut Session, canvas: &CanvasConfig) -> (Canvas, FrameReport) {
    let mut surface = Canvas::new(canvas.width, canvas.height);
    let report = session.render(&mut surface);
    (surface, report)
}

/// Write `canvas` as an 8-bit grayscale PNG.
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let image = GrayImage::from_raw(
        canvas.width() as u32,
        canvas.height() as u32,
        canvas.pixels().to_vec(),
    )
    .context("canvas buffer does not match its dimensions")?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("output: wrote {}", path.display());
    Ok(())
}

/// One-line description of a rendered frame.
pub fn summary(report: &FrameReport, path: &Path) -> String {
    let mut line = format!(
        "{}: {} glyphs, {} drawn, {} pixels, pen at {:.2}px",
        path.display(),
        report.glyph_count,
        report.composite.placements.len(),
        report.composite.pixels_written,
        report.composite.pen.0
    );
    if let Some(e) = &report.axis_error {
        let _ = write!(line, " (default instance: {e})");
    }
    if let Some(e) = &report.shaping_error {
        let _ = write!(line, " (not shaped: {e})");
    }
    line
}
