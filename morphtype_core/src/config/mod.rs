//! Configuration structures and loading logic.

mod io;

pub use io::{config_dir, config_path};

use serde::{Deserialize, Serialize};

use crate::variations::VariationUnit;

/// Default pixel size; also the line height the compositor flips glyphs against.
pub const FONT_SIZE: f32 = 80.0;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font: FontConfig,
    pub canvas: CanvasConfig,
    pub variations: VariationConfig,
    pub sliders: SliderConfig,
}

/// Font configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Pixels per em.
    pub size: f32,
    pub hinting: bool,
    /// BCP-47 shaping language. Guessed from the text when unset.
    pub language: Option<String>,
    /// OpenType features to enable/disable during text shaping.
    ///
    /// Each string is a 4-character feature tag, optionally prefixed with `-`
    /// to disable. Examples: `"kern"`, `"liga"`, `"-dlig"`.
    pub features: Vec<String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: FONT_SIZE,
            hinting: true,
            language: None,
            features: Vec::new(),
        }
    }
}

/// Output surface configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
    /// Pixels between the surface edge and the pen origin.
    pub margin: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 200,
            margin: 10,
        }
    }
}

/// How slider-derived axis values are interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationConfig {
    pub unit: VariationUnit,
}

/// Range and starting position of one slider, in slider steps (1/100 of an axis value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: i32,
    pub max: i32,
    pub value: i32,
}

/// Slider ranges for the weight and width axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub weight: SliderRange,
    pub width: SliderRange,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            weight: SliderRange {
                min: 48,
                max: 320,
                value: 100,
            },
            width: SliderRange {
                min: 62,
                max: 129,
                value: 100,
            },
        }
    }
}
