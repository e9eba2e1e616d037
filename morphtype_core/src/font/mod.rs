//! Font handle and engine context.
//!
//! `FontLibrary` replaces a process-wide font engine: it is created once and
//! passed into every `FontHandle` constructor and raster call. A `FontHandle`
//! owns the raw font bytes at a fixed pixel size and tracks which point in
//! design space its outlines currently come from.
//!
//! Axis changes go through a two-state machine. `request_variations()` only
//! records the new values and marks the handle `Stale`; the first glyph load
//! afterwards (shape, rasterize, advance) applies them. This keeps the
//! "re-apply before render" rule out of call ordering.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use swash::scale::{ScaleContext, Scaler};
use swash::{CacheKey, FontRef, NormalizedCoord};

use crate::error::{Error, Result};
use crate::variations::{self, AxisVariations, VariationUnit};

/// Smallest pixel size a handle accepts.
pub const MIN_FONT_SIZE: f32 = 4.0;
/// Largest pixel size a handle accepts.
pub const MAX_FONT_SIZE: f32 = 512.0;

/// Font engine context shared by all handles of a session.
pub struct FontLibrary {
    /// Reusable scale context for swash rasterization.
    scale_context: ScaleContext,
    /// Whether outlines are hinted when rasterized.
    hinting: bool,
    /// Number of handles opened through this library (used as handle id).
    opened: u64,
}

impl FontLibrary {
    pub fn new(hinting: bool) -> Self {
        Self {
            scale_context: ScaleContext::new(),
            hinting,
            opened: 0,
        }
    }

    pub fn hinting(&self) -> bool {
        self.hinting
    }

    /// Number of font handles opened so far.
    pub fn opened(&self) -> u64 {
        self.opened
    }

    /// Build a scaler for `font` at `size` pixels with the given coordinates.
    pub(crate) fn scaler<'a>(
        &'a mut self,
        font: FontRef<'a>,
        size: f32,
        coords: &[NormalizedCoord],
    ) -> Scaler<'a> {
        let hint = self.hinting;
        self.scale_context
            .builder(font)
            .size(size)
            .hint(hint)
            .normalized_coords(coords)
            .build()
    }

    fn register(&mut self) -> u64 {
        self.opened += 1;
        self.opened
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Debug for FontLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontLibrary")
            .field("hinting", &self.hinting)
            .field("opened", &self.opened)
            .finish_non_exhaustive()
    }
}

/// One variation axis as declared by the font's `fvar` table.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisInfo {
    /// Four-byte OpenType axis tag (e.g. `wght`).
    pub tag: [u8; 4],
    pub min: f32,
    pub default: f32,
    pub max: f32,
}

impl AxisInfo {
    /// The axis tag as a string (`"????"` for non-UTF-8 tags).
    pub fn name(&self) -> &str {
        std::str::from_utf8(&self.tag).unwrap_or("????")
    }
}

/// Whether the handle's outlines reflect the last requested variations.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordinateState {
    /// New variations were requested and have not been applied yet.
    Stale {
        pending: AxisVariations,
        unit: VariationUnit,
    },
    /// Coordinates are in effect; glyph loads can proceed.
    Applied,
}

/// A parsed outline font at a fixed pixel size.
pub struct FontHandle {
    /// Handle id assigned by the library (for diagnostics).
    id: u64,
    /// Source file, if the handle was opened from disk.
    path: Option<PathBuf>,
    /// Raw font file bytes (borrowed by swash `FontRef` and rustybuzz `Face`).
    bytes: Arc<Vec<u8>>,
    /// Index within a .ttc collection file (0 for single-font files).
    face_index: u32,
    /// Byte offset to the font table directory (from `FontRef::from_index`).
    offset: u32,
    /// Unique cache key for `ScaleContext` reuse.
    cache_key: CacheKey,
    /// Pixels per em.
    size: f32,
    /// Declared variation axes in `fvar` order.
    axes: Vec<AxisInfo>,
    /// Active design coordinates, parallel to `axes`.
    design_coords: Vec<f32>,
    /// Active normalized coordinates, parallel to `axes`.
    normalized_coords: Vec<NormalizedCoord>,
    state: CoordinateState,
    /// Last variations handed to `request_variations`, applied or not.
    requested: Option<(AxisVariations, VariationUnit)>,
    /// Bumped on every coordinate change; stamps rasterized bitmaps.
    generation: u64,
    /// Explicit shaping language, reused across calls.
    language: Option<rustybuzz::Language>,
}

impl FontHandle {
    /// Open the first face of a font file at `size` pixels per em.
    pub fn open(library: &mut FontLibrary, path: impl AsRef<Path>, size: f32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| Error::FontOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let handle = Self::load(library, bytes, 0, size, Some(path.to_path_buf()))?;
        log::info!(
            "font: opened {} as handle {} ({} axes, {:.1}px)",
            path.display(),
            handle.id,
            handle.axes.len(),
            handle.size
        );
        Ok(handle)
    }

    /// Build a handle from in-memory font data.
    pub fn from_bytes(library: &mut FontLibrary, bytes: Vec<u8>, size: f32) -> Result<Self> {
        Self::load(library, bytes, 0, size, None)
    }

    fn load(
        library: &mut FontLibrary,
        bytes: Vec<u8>,
        face_index: u32,
        size: f32,
        path: Option<PathBuf>,
    ) -> Result<Self> {
        let open_error = |reason: &str| Error::FontOpen {
            path: path.clone().unwrap_or_else(|| PathBuf::from("<memory>")),
            reason: reason.to_owned(),
        };
        let font = FontRef::from_index(&bytes, face_index as usize)
            .ok_or_else(|| open_error("unsupported or corrupt font data"))?;
        if font.metrics(&[]).glyph_count == 0 {
            return Err(open_error("font has no glyphs"));
        }
        let (offset, cache_key) = (font.offset, font.key);
        let axes: Vec<AxisInfo> = font
            .variations()
            .map(|v| AxisInfo {
                tag: v.tag().to_be_bytes(),
                min: v.min_value(),
                default: v.default_value(),
                max: v.max_value(),
            })
            .collect();
        let design_coords = axes.iter().map(|a| a.default).collect();
        let normalized_coords = vec![0; axes.len()];

        Ok(Self {
            id: library.register(),
            path,
            bytes: Arc::new(bytes),
            face_index,
            offset,
            cache_key,
            size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            axes,
            design_coords,
            normalized_coords,
            state: CoordinateState::Applied,
            requested: None,
            generation: 0,
            language: None,
        })
    }

    /// Create a transient swash `FontRef` over the stored bytes.
    pub(crate) fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.bytes,
            offset: self.offset,
            key: self.cache_key,
        }
    }

    /// Create a transient rustybuzz face at the current design coordinates.
    pub(crate) fn shaping_face(&self) -> Option<rustybuzz::Face<'_>> {
        let mut face = rustybuzz::Face::from_slice(&self.bytes, self.face_index)?;
        if !self.axes.is_empty() {
            let variations: Vec<rustybuzz::Variation> = self
                .axes
                .iter()
                .zip(&self.design_coords)
                .map(|(axis, &value)| rustybuzz::Variation {
                    tag: rustybuzz::ttf_parser::Tag::from_bytes(&axis.tag),
                    value,
                })
                .collect();
            face.set_variations(&variations);
        }
        Some(face)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Variation axes in `fvar` order (empty for static fonts).
    pub fn axes(&self) -> &[AxisInfo] {
        &self.axes
    }

    pub fn is_variable(&self) -> bool {
        !self.axes.is_empty()
    }

    pub fn design_coordinates(&self) -> &[f32] {
        &self.design_coords
    }

    pub fn normalized_coordinates(&self) -> &[NormalizedCoord] {
        &self.normalized_coords
    }

    pub fn state(&self) -> &CoordinateState {
        &self.state
    }

    /// Identifies the instance currently in effect.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of glyphs in the font.
    pub fn glyph_count(&self) -> u16 {
        self.font_ref().metrics(&[]).glyph_count
    }

    /// Set the shaping language from a BCP-47 tag. An empty tag clears it.
    pub fn set_language(&mut self, tag: &str) -> Result<()> {
        if tag.is_empty() {
            self.language = None;
            return Ok(());
        }
        let language = tag
            .parse::<rustybuzz::Language>()
            .map_err(|_| Error::InvalidLanguage(tag.to_owned()))?;
        self.language = Some(language);
        Ok(())
    }

    pub fn language(&self) -> Option<&rustybuzz::Language> {
        self.language.as_ref()
    }

    /// Record new axis values; they take effect on the next glyph load.
    ///
    /// Requesting the values that are already in effect is a no-op.
    pub fn request_variations(&mut self, variations: AxisVariations, unit: VariationUnit) {
        let unchanged = self.state == CoordinateState::Applied
            && self
                .requested
                .as_ref()
                .is_some_and(|(vars, u)| *vars == variations && *u == unit);
        if unchanged {
            return;
        }
        log::trace!("font {}: coordinates stale", self.id);
        self.requested = Some((variations.clone(), unit));
        self.state = CoordinateState::Stale {
            pending: variations,
            unit,
        };
    }

    /// Apply pending variations if the handle is stale.
    ///
    /// On failure the handle falls back to the font's default instance and is
    /// marked applied, so later loads don't retry a request that can't work.
    pub fn ensure_applied(&mut self) -> Result<()> {
        let CoordinateState::Stale { pending, unit } =
            std::mem::replace(&mut self.state, CoordinateState::Applied)
        else {
            return Ok(());
        };
        match variations::apply_variations(self, &pending, unit) {
            Ok(()) => {
                log::debug!(
                    "font {}: applied {pending} -> {:?} (instance {})",
                    self.id,
                    self.design_coords,
                    self.generation
                );
                Ok(())
            }
            Err(e) => {
                log::warn!("font {}: {e}; using default instance", self.id);
                self.reset_coordinates();
                Err(e)
            }
        }
    }

    /// Bring coordinates up to date before loading glyph data.
    ///
    /// Apply failures were already logged and the handle fell back to its
    /// default instance, which is what the load should see.
    pub(crate) fn prepare_load(&mut self) {
        let _ = self.ensure_applied();
    }

    /// Set design coordinates directly, one value per declared axis.
    pub fn set_design_coordinates(&mut self, coords: &[f32]) -> Result<()> {
        if self.axes.is_empty() {
            return Err(Error::AxisSet("font has no variation axes".to_owned()));
        }
        if coords.len() != self.axes.len() {
            return Err(Error::AxisSet(format!(
                "got {} coordinates for {} axes",
                coords.len(),
                self.axes.len()
            )));
        }
        let normalized: Vec<NormalizedCoord> = self
            .font_ref()
            .variations()
            .zip(coords)
            .map(|(axis, &value)| axis.normalize(value))
            .collect();
        self.design_coords = coords.to_vec();
        self.normalized_coords = normalized;
        self.generation += 1;
        Ok(())
    }

    /// Return to the font's default instance.
    fn reset_coordinates(&mut self) {
        self.design_coords = self.axes.iter().map(|a| a.default).collect();
        self.normalized_coords = vec![0; self.axes.len()];
        self.generation += 1;
    }

    /// Validate a glyph id against the font and narrow it to swash's 16-bit id.
    pub(crate) fn check_glyph(&self, glyph_id: u32) -> Result<u16> {
        let count = self.glyph_count();
        match u16::try_from(glyph_id) {
            Ok(gid) if gid < count => Ok(gid),
            _ => Err(Error::GlyphLoad {
                glyph_id,
                reason: format!("glyph id out of range (font has {count} glyphs)"),
            }),
        }
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontHandle")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("size", &self.size)
            .field("axes", &self.axes)
            .field("design_coords", &self.design_coords)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
