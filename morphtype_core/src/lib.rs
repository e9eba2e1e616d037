//! Variable-font shaping and rasterization pipeline.
//!
//! Text flows through: `FontHandle` (axis coordinates applied) → rustybuzz
//! shaping → swash rasterization → `Compositor` → `Surface`. The crate holds
//! no GUI code; a front end drives it through `Session` and feeds redraws in
//! through `RedrawQueue`.

#![deny(unsafe_code)]

pub mod compositor;
pub mod config;
pub mod error;
pub mod fixed;
pub mod font;
pub mod raster;
pub mod redraw;
pub mod session;
pub mod shaping;
pub mod surface;
pub mod variations;

#[cfg(test)]
mod test_fonts;

pub use compositor::{AdvancePolicy, CompositeReport, Compositor, GlyphSource, Placement};
pub use config::Config;
pub use error::{Error, Result};
pub use font::{AxisInfo, CoordinateState, FontHandle, FontLibrary};
pub use raster::{GlyphBitmap, GRAY_RAMP};
pub use redraw::RedrawQueue;
pub use session::{FrameReport, RenderRequest, Session};
pub use shaping::ShapedGlyph;
pub use surface::{Canvas, Surface};
pub use variations::{AxisVariations, VariationUnit};
