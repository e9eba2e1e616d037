//! Compositor: walks a shaping plan with a running pen and blits each glyph.
//!
//! The pen lives in font space (y up) starting at (0, 0). A glyph's top-left
//! corner on the surface is
//!
//! ```text
//! x = origin.x + pen.x + x_offset + left
//! y = origin.y + line_height - (pen.y + y_offset) - top
//! ```
//!
//! A glyph that fails to rasterize is skipped, never the rest of the line.

use crate::error::{Error, Result};
use crate::fixed::to_pixels;
use crate::raster::{Advance, GlyphBitmap};
use crate::shaping::ShapedGlyph;
use crate::surface::{Surface, blit};

/// Which advances move the pen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdvancePolicy {
    /// Advances from the shaper (kerning, marks, contextual spacing).
    #[default]
    Shaped,
    /// Raw design advances of each glyph, for comparison against shaping.
    Unshaped,
}

/// Supplies glyph bitmaps and design advances to the compositor.
pub trait GlyphSource {
    fn rasterize(&mut self, glyph_id: u32) -> Result<GlyphBitmap>;

    fn unshaped_advance(&mut self, glyph_id: u32) -> Result<Advance>;
}

/// Where a glyph of the plan was drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index into the shaping plan.
    pub index: usize,
    pub glyph_id: u32,
    /// Pen x (pixels, relative to the origin) when the glyph was drawn.
    pub pen_x: f32,
    /// Top-left corner of the bitmap on the surface.
    pub x: i32,
    pub y: i32,
    pub pixels_written: usize,
}

/// A glyph of the plan that was not drawn.
#[derive(Debug)]
pub struct SkippedGlyph {
    pub index: usize,
    pub glyph_id: u32,
    pub error: Error,
}

/// Outcome of one composite pass.
#[derive(Debug, Default)]
pub struct CompositeReport {
    pub placements: Vec<Placement>,
    pub skipped: Vec<SkippedGlyph>,
    /// Final pen position in pixels.
    pub pen: (f32, f32),
    pub pixels_written: usize,
}

/// Lays out one line of shaped glyphs onto a surface.
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    policy: AdvancePolicy,
    /// Distance from the top of the line to the baseline, in pixels.
    line_height: f32,
    origin: (i32, i32),
}

impl Compositor {
    pub fn new(policy: AdvancePolicy, line_height: f32) -> Self {
        Self {
            policy,
            line_height,
            origin: (0, 0),
        }
    }

    /// Offset every glyph by `(x, y)` surface pixels (e.g. a margin).
    #[must_use]
    pub fn with_origin(mut self, x: i32, y: i32) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    /// Draw `plan` onto `surface`, pulling bitmaps from `glyphs`.
    ///
    /// All bitmaps of one pass must share an instance generation; the first
    /// bitmap fixes it and later mismatches are skipped as stale.
    pub fn composite<G, S>(&self, plan: &[ShapedGlyph], glyphs: &mut G, surface: &mut S) -> CompositeReport
    where
        G: GlyphSource + ?Sized,
        S: Surface + ?Sized,
    {
        let mut report = CompositeReport::default();
        let (mut pen_x, mut pen_y) = (0.0f32, 0.0f32);
        let mut frame_generation = None;

        for (index, glyph) in plan.iter().enumerate() {
            let bitmap = glyphs.rasterize(glyph.glyph_id).and_then(|bitmap| {
                match frame_generation {
                    Some(expected) if expected != bitmap.generation => Err(Error::StaleBitmap {
                        glyph_id: glyph.glyph_id,
                        expected,
                        found: bitmap.generation,
                    }),
                    _ => {
                        frame_generation = Some(bitmap.generation);
                        Ok(bitmap)
                    }
                }
            });

            let unshaped = match bitmap {
                Ok(bitmap) => {
                    let x = self.origin.0 + (pen_x + to_pixels(glyph.x_offset)).round() as i32 + bitmap.left;
                    let y = self.origin.1
                        + (self.line_height - (pen_y + to_pixels(glyph.y_offset))).round() as i32
                        - bitmap.top;
                    let written = blit(surface, &bitmap, x, y);
                    report.pixels_written += written;
                    report.placements.push(Placement {
                        index,
                        glyph_id: glyph.glyph_id,
                        pen_x,
                        x,
                        y,
                        pixels_written: written,
                    });
                    Some(bitmap.advance)
                }
                Err(error) => {
                    log::warn!("compositor: skipping glyph {} at {index}: {error}", glyph.glyph_id);
                    report.skipped.push(SkippedGlyph {
                        index,
                        glyph_id: glyph.glyph_id,
                        error,
                    });
                    match self.policy {
                        AdvancePolicy::Shaped => None,
                        AdvancePolicy::Unshaped => glyphs.unshaped_advance(glyph.glyph_id).ok(),
                    }
                }
            };

            let (dx, dy) = self.advance(glyph, unshaped);
            pen_x += dx;
            pen_y += dy;
        }

        report.pen = (pen_x, pen_y);
        report
    }

    /// Pen movement for one glyph under the active policy, in pixels.
    fn advance(&self, glyph: &ShapedGlyph, unshaped: Option<Advance>) -> (f32, f32) {
        match self.policy {
            AdvancePolicy::Shaped => (to_pixels(glyph.x_advance), to_pixels(glyph.y_advance)),
            AdvancePolicy::Unshaped => {
                unshaped.map_or((0.0, 0.0), |a| (to_pixels(a.x), to_pixels(a.y)))
            }
        }
    }
}
