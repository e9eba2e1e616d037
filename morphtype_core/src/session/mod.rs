//! Render session, the interface a front end drives.
//!
//! The front end owns all widget state and pushes it in through the setters;
//! `render()` then runs the whole pipeline synchronously: apply axes → shape
//! → rasterize each glyph → composite. Per-frame failures degrade the frame
//! (default coordinates, an empty line, a missing glyph) and are reported in
//! the returned `FrameReport`, never raised.

use std::path::Path;

use crate::compositor::{AdvancePolicy, CompositeReport, Compositor};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::font::{FontHandle, FontLibrary};
use crate::raster::FontGlyphSource;
use crate::shaping::{self, ShapedGlyph};
use crate::surface::Surface;
use crate::variations::{AxisVariations, VariationUnit};

/// Everything one redraw needs from the front end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderRequest {
    pub text: String,
    pub variations: AxisVariations,
    pub advance_policy: AdvancePolicy,
}

/// What happened during one `render()`.
#[derive(Debug, Default)]
pub struct FrameReport {
    /// Axis application failed; the frame used the default instance.
    pub axis_error: Option<Error>,
    /// Shaping could not run; nothing was drawn.
    pub shaping_error: Option<Error>,
    /// Length of the shaping plan.
    pub glyph_count: usize,
    pub composite: CompositeReport,
}

/// Font, text, and axis state for an interactive view.
#[derive(Debug)]
pub struct Session {
    library: FontLibrary,
    font: FontHandle,
    text: String,
    variations: AxisVariations,
    policy: AdvancePolicy,
    unit: VariationUnit,
    features: Vec<rustybuzz::Feature>,
    margin: i32,
}

impl Session {
    pub fn new(library: FontLibrary, font: FontHandle, config: &Config) -> Self {
        Self {
            library,
            font,
            text: String::new(),
            variations: AxisVariations::new(),
            policy: AdvancePolicy::default(),
            unit: config.variations.unit,
            features: shaping::parse_features(&config.font.features),
            margin: config.canvas.margin,
        }
    }

    /// Create the font library and open `path` with the configured size.
    ///
    /// This is the only fatal failure of a session: without a font there is
    /// nothing to explore.
    pub fn open(config: &Config, path: &Path) -> Result<Self> {
        let mut library = FontLibrary::new(config.font.hinting);
        let mut font = FontHandle::open(&mut library, path, config.font.size)?;
        if let Some(tag) = config.font.language.as_deref() {
            font.set_language(tag)?;
        }
        Ok(Self::new(library, font, config))
    }

    /// Replace the font, keeping size and language. The old font stays on failure.
    pub fn set_font_path(&mut self, path: &Path) -> Result<()> {
        let mut font = FontHandle::open(&mut self.library, path, self.font.size())?;
        if let Some(language) = self.font.language() {
            font.set_language(language.as_str())?;
        }
        font.request_variations(self.variations.clone(), self.unit);
        self.font = font;
        Ok(())
    }

    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
    }

    pub fn set_variations(&mut self, variations: AxisVariations) {
        self.font.request_variations(variations.clone(), self.unit);
        self.variations = variations;
    }

    pub fn set_advance_policy(&mut self, policy: AdvancePolicy) {
        self.policy = policy;
    }

    /// Pin the shaping language (BCP-47). An empty tag returns to guessing.
    pub fn set_language(&mut self, tag: &str) -> Result<()> {
        self.font.set_language(tag)
    }

    /// Apply all fields of a redraw request.
    pub fn apply_request(&mut self, request: RenderRequest) {
        self.set_text(&request.text);
        self.set_variations(request.variations);
        self.set_advance_policy(request.advance_policy);
    }

    pub fn font(&self) -> &FontHandle {
        &self.font
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        self.policy
    }

    /// Shape the current text at the current coordinates.
    pub fn shape(&mut self) -> Result<Vec<ShapedGlyph>> {
        shaping::shape(&mut self.font, &self.text, &self.features)
    }

    /// Run the full pipeline onto `surface`.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> FrameReport {
        let mut report = FrameReport {
            axis_error: self.font.ensure_applied().err(),
            ..FrameReport::default()
        };

        let plan = match self.shape() {
            Ok(plan) => plan,
            Err(e) => {
                log::warn!("session: {e}; rendering nothing this frame");
                report.shaping_error = Some(e);
                return report;
            }
        };
        report.glyph_count = plan.len();

        let compositor = Compositor::new(self.policy, self.font.size())
            .with_origin(self.margin, self.margin);
        let mut glyphs = FontGlyphSource::new(&mut self.font, &mut self.library);
        report.composite = compositor.composite(&plan, &mut glyphs, surface);

        if log::log_enabled!(log::Level::Debug) {
            self.log_plan(&plan, &report.composite);
        }
        report
    }

    /// Per-glyph trace: name, source text, and where it landed.
    fn log_plan(&self, plan: &[ShapedGlyph], composite: &CompositeReport) {
        let names = shaping::glyph_names(&self.font, plan);
        for placement in &composite.placements {
            let i = placement.index;
            log::debug!(
                "glyph={:?} cluster={} text={:?} position={}, {}",
                names.get(i).cloned().flatten().unwrap_or_default(),
                plan[i].cluster,
                shaping::cluster_text(&self.text, plan, i),
                placement.x,
                placement.y
            );
        }
    }
}

#[cfg(test)]
mod tests;
