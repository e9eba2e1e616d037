//! Pixel surfaces and the bitmap-to-surface blit.
//!
//! The rasterizer owns a glyph's buffer; `blit()` only borrows it for the
//! duration of the copy. Surfaces receive coverage values and decide how to
//! show them.

use crate::raster::{GlyphBitmap, GRAY_RAMP};

/// A destination for glyph coverage.
pub trait Surface {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Record `coverage` (0–255) at an in-bounds pixel.
    fn put_coverage(&mut self, x: usize, y: usize, coverage: u8);
}

/// Copy a glyph's ink onto `surface` with its top-left corner at `(x, y)`.
///
/// Pixels outside the surface are clipped, and zero-coverage pixels are not
/// written. Returns the number of pixels written.
pub fn blit<S: Surface + ?Sized>(surface: &mut S, bitmap: &GlyphBitmap, x: i32, y: i32) -> usize {
    let (w, h) = (surface.width() as i64, surface.height() as i64);
    let mut written = 0;
    for row in 0..bitmap.height {
        let sy = y as i64 + row as i64;
        if !(0..h).contains(&sy) {
            continue;
        }
        let Some(line) = bitmap.row(row) else {
            break;
        };
        for (col, &coverage) in line.iter().enumerate() {
            let sx = x as i64 + col as i64;
            if coverage == 0 || !(0..w).contains(&sx) {
                continue;
            }
            surface.put_coverage(sx as usize, sy as usize, coverage);
            written += 1;
        }
    }
    written
}

/// In-memory 8-bit luminance surface on a white background.
///
/// Coverage is mapped through `GRAY_RAMP` and the darker of old and new wins,
/// so overlapping glyphs keep each other's ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![GRAY_RAMP[0]; width * height],
        }
    }

    /// Luminance rows, top to bottom.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Reset every pixel to the background.
    pub fn clear(&mut self) {
        self.pixels.fill(GRAY_RAMP[0]);
    }

    /// Number of pixels that are not background.
    pub fn inked_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&p| p != GRAY_RAMP[0]).count()
    }

    /// Leftmost inked column, if any.
    pub fn first_inked_column(&self) -> Option<usize> {
        (0..self.width).find(|&x| (0..self.height).any(|y| self.pixel(x, y) != Some(GRAY_RAMP[0])))
    }
}

impl Surface for Canvas {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn put_coverage(&mut self, x: usize, y: usize, coverage: u8) {
        let i = y * self.width + x;
        if let Some(p) = self.pixels.get_mut(i) {
            *p = (*p).min(GRAY_RAMP[coverage as usize]);
        }
    }
}
