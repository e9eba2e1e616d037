//! Glyph rasterization via swash.
//!
//! Outlines are loaded at the handle's active coordinates and rendered to an
//! 8-bit coverage bitmap. Nothing is cached here: a variable outline is only
//! valid for the instance it was rendered at, and each bitmap carries that
//! instance's generation so the compositor can reject stale ones.

use swash::scale::image::{Content, Image};
use swash::scale::{Render, Source, StrikeWith};
use swash::zeno::Format;

use crate::compositor::GlyphSource;
use crate::error::{Error, Result};
use crate::fixed::to_fixed;
use crate::font::{FontHandle, FontLibrary};

/// Display palette for coverage bitmaps: coverage `i` is shown at luminance
/// `255 - i` (0 = white paper, 255 = black ink).
pub const GRAY_RAMP: [u8; 256] = gray_ramp();

const fn gray_ramp() -> [u8; 256] {
    let mut ramp = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        ramp[i] = 255 - i as u8;
        i += 1;
    }
    ramp
}

/// A pen advance in 26.6 pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Advance {
    pub x: i32,
    pub y: i32,
}

/// A rendered glyph in 8-bit grayscale coverage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub glyph_id: u32,
    pub width: usize,
    pub height: usize,
    /// Bytes per row of `pixels`.
    pub pitch: usize,
    /// Coverage, row-major (0 = none, 255 = full).
    pub pixels: Vec<u8>,
    /// X bearing (positive = right of origin).
    pub left: i32,
    /// Y bearing (positive = above baseline, matching FreeType/swash convention).
    pub top: i32,
    /// Unshaped design advance at the instance this bitmap was rendered for.
    pub advance: Advance,
    /// Instance generation of the handle at render time.
    pub generation: u64,
}

impl GlyphBitmap {
    /// Sum of all coverage values (total ink).
    pub fn ink(&self) -> u64 {
        self.pixels.iter().map(|&b| b as u64).sum()
    }

    /// Coverage row `y`, or `None` past the bottom edge.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        let start = y.checked_mul(self.pitch)?;
        self.pixels.get(start..start + self.width)
    }
}

/// Rasterize a glyph at the handle's active coordinates.
///
/// Embedded bitmaps are used only when the glyph has no outline.
pub fn rasterize(
    font: &mut FontHandle,
    library: &mut FontLibrary,
    glyph_id: u32,
) -> Result<GlyphBitmap> {
    font.prepare_load();
    let gid = font.check_glyph(glyph_id)?;
    let size = font.size();
    let advance = advance_of(font, gid);

    let mut scaler = library.scaler(font.font_ref(), size, font.normalized_coordinates());
    let image = Render::new(&[Source::Outline, Source::Bitmap(StrikeWith::BestFit)])
        .format(Format::Alpha)
        .render(&mut scaler, gid)
        .ok_or_else(|| Error::GlyphLoad {
            glyph_id,
            reason: "no outline or bitmap at this size".to_owned(),
        })?;

    let width = image.placement.width as usize;
    let height = image.placement.height as usize;
    let (left, top) = (image.placement.left, image.placement.top);
    let pixels = to_gray8(glyph_id, image)?;

    Ok(GlyphBitmap {
        glyph_id,
        width,
        height,
        pitch: width,
        pixels,
        left,
        top,
        advance,
        generation: font.generation(),
    })
}

/// Raw design advance of a glyph at the handle's active coordinates.
pub fn unshaped_advance(font: &mut FontHandle, glyph_id: u32) -> Result<Advance> {
    font.prepare_load();
    let gid = font.check_glyph(glyph_id)?;
    Ok(advance_of(font, gid))
}

fn advance_of(font: &FontHandle, gid: u16) -> Advance {
    let px = font
        .font_ref()
        .glyph_metrics(font.normalized_coordinates())
        .scale(font.size())
        .advance_width(gid);
    Advance {
        x: to_fixed(px),
        y: 0,
    }
}

/// Normalize swash image content to one coverage byte per pixel.
fn to_gray8(glyph_id: u32, image: Image) -> Result<Vec<u8>> {
    let pixels = image.placement.width as usize * image.placement.height as usize;
    let (bytes_per_pixel, kind) = match image.content {
        Content::Mask => (1, "mask"),
        Content::SubpixelMask => (4, "subpixel mask"),
        Content::Color => (4, "color"),
    };
    if image.data.len() != pixels * bytes_per_pixel {
        return Err(Error::RasterConvert {
            glyph_id,
            reason: format!(
                "{kind} image has {} bytes for {pixels} pixels",
                image.data.len()
            ),
        });
    }
    Ok(match image.content {
        Content::Mask => image.data,
        Content::SubpixelMask => image
            .data
            .chunks_exact(4)
            .map(|px| ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8)
            .collect(),
        Content::Color => image.data.chunks_exact(4).map(|px| px[3]).collect(),
    })
}

/// `GlyphSource` backed by a font handle and its library.
pub struct FontGlyphSource<'a> {
    font: &'a mut FontHandle,
    library: &'a mut FontLibrary,
}

impl<'a> FontGlyphSource<'a> {
    pub fn new(font: &'a mut FontHandle, library: &'a mut FontLibrary) -> Self {
        Self { font, library }
    }
}

impl GlyphSource for FontGlyphSource<'_> {
    fn rasterize(&mut self, glyph_id: u32) -> Result<GlyphBitmap> {
        rasterize(self.font, self.library, glyph_id)
    }

    fn unshaped_advance(&mut self, glyph_id: u32) -> Result<Advance> {
        unshaped_advance(self.font, glyph_id)
    }
}
