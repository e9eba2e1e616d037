//! Text shaping via `rustybuzz`.
//!
//! Every call builds a transient face at the handle's current coordinates and
//! shapes the whole string as one run. Variable-font advances depend on the
//! coordinates, so plans are never cached.

use crate::error::{Error, Result};
use crate::fixed::to_fixed;
use crate::font::FontHandle;

/// One entry of the shaping plan, in shaper output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph ID within the font (not a Unicode codepoint).
    pub glyph_id: u32,
    /// Byte offset into the source text of the cluster this glyph belongs to.
    pub cluster: u32,
    /// Pen advance in 26.6 pixels.
    pub x_advance: i32,
    pub y_advance: i32,
    /// Offset from the pen position in 26.6 pixels (y up).
    pub x_offset: i32,
    pub y_offset: i32,
}

/// Parse feature strings into rustybuzz features.
///
/// Each string is a 4-char OpenType tag, optionally prefixed with `-` to
/// disable. Examples: `"kern"` (enable), `"-liga"` (disable).
pub fn parse_features(strings: &[String]) -> Vec<rustybuzz::Feature> {
    strings
        .iter()
        .filter_map(|s| {
            let (tag_str, value) = match s.strip_prefix('-') {
                Some(rest) => (rest, 0),
                None => (s.as_str(), 1),
            };
            let Ok(bytes) = <[u8; 4]>::try_from(tag_str.as_bytes()) else {
                log::warn!("shaping: ignoring invalid feature tag: {s}");
                return None;
            };
            let tag = rustybuzz::ttf_parser::Tag::from_bytes(&bytes);
            Some(rustybuzz::Feature::new(tag, value, ..))
        })
        .collect()
}

/// Shape `text` with the handle's current coordinates.
///
/// Script, direction, and language are guessed from the text; an explicit
/// language set on the handle takes precedence over the guess.
pub fn shape(
    font: &mut FontHandle,
    text: &str,
    features: &[rustybuzz::Feature],
) -> Result<Vec<ShapedGlyph>> {
    font.prepare_load();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let face = font.shaping_face().ok_or(Error::ShapingUnavailable)?;

    let mut buffer = rustybuzz::UnicodeBuffer::new();
    buffer.push_str(text);
    if let Some(language) = font.language() {
        buffer.set_language(language.clone());
    }
    buffer.guess_segment_properties();

    let glyph_buffer = rustybuzz::shape(&face, features, buffer);
    let scale = font.size() / face.units_per_em() as f32;
    let fixed = |units: i32| to_fixed(units as f32 * scale);

    let plan = glyph_buffer
        .glyph_infos()
        .iter()
        .zip(glyph_buffer.glyph_positions())
        .map(|(info, pos)| ShapedGlyph {
            glyph_id: info.glyph_id,
            cluster: info.cluster,
            x_advance: fixed(pos.x_advance),
            y_advance: fixed(pos.y_advance),
            x_offset: fixed(pos.x_offset),
            y_offset: fixed(pos.y_offset),
        })
        .collect();
    Ok(plan)
}

/// The slice of `text` that glyph `index` of `plan` was shaped from.
///
/// A cluster runs to the next larger cluster value in the plan, which holds
/// for both left-to-right and right-to-left output order.
pub fn cluster_text<'t>(text: &'t str, plan: &[ShapedGlyph], index: usize) -> &'t str {
    let Some(glyph) = plan.get(index) else {
        return "";
    };
    let start = glyph.cluster as usize;
    let end = plan
        .iter()
        .map(|g| g.cluster as usize)
        .filter(|&c| c > start)
        .min()
        .unwrap_or(text.len());
    text.get(start..end).unwrap_or("")
}

/// Glyph names for every entry of `plan`, for diagnostics.
///
/// Fonts without a `post` name table yield `None` entries.
pub fn glyph_names(font: &FontHandle, plan: &[ShapedGlyph]) -> Vec<Option<String>> {
    let Some(face) = font.shaping_face() else {
        return vec![None; plan.len()];
    };
    plan.iter()
        .map(|g| {
            let gid = u16::try_from(g.glyph_id).ok()?;
            face.glyph_name(rustybuzz::ttf_parser::GlyphId(gid))
                .map(str::to_owned)
        })
        .collect()
}
