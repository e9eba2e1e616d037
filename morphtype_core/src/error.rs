use std::path::PathBuf;
use std::result;

/// Errors raised by the shaping and rasterization pipeline.
///
/// Only `FontOpen` is fatal, and only during startup. Everything else is
/// per-frame or per-glyph and degrades the render instead of aborting it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open font {}: {reason}", path.display())]
    FontOpen { path: PathBuf, reason: String },

    #[error("cannot set axis coordinates: {0}")]
    AxisSet(String),

    #[error("shaping font could not be created for the current coordinates")]
    ShapingUnavailable,

    #[error("failed to load glyph {glyph_id}: {reason}")]
    GlyphLoad { glyph_id: u32, reason: String },

    #[error("failed to convert bitmap of glyph {glyph_id}: {reason}")]
    RasterConvert { glyph_id: u32, reason: String },

    #[error("glyph {glyph_id} was rasterized for instance {found}, frame uses instance {expected}")]
    StaleBitmap { glyph_id: u32, expected: u64, found: u64 },

    #[error("invalid language tag {0:?}")]
    InvalidLanguage(String),

    #[error("config error in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

pub type Result<T> = result::Result<T, Error>;
