//! Variation coordinator: named axis values → per-axis design coordinates.
//!
//! The font's `fvar` table fixes the coordinate order; the input map is only
//! consulted by tag. An axis the map doesn't mention gets 0.0, not the axis
//! default, so callers must name every axis they care about.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::font::{AxisInfo, FontHandle};

/// Axis tag → value, as produced by the front end's sliders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisVariations(HashMap<String, f32>);

impl AxisVariations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, tag: &str, value: f32) -> Self {
        self.set(tag, value);
        self
    }

    pub fn set(&mut self, tag: &str, value: f32) {
        self.0.insert(tag.to_owned(), value);
    }

    pub fn get(&self, tag: &str) -> Option<f32> {
        self.0.get(tag).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f32)> for AxisVariations {
    fn from_iter<I: IntoIterator<Item = (&'a str, f32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(tag, v)| (tag.to_owned(), v)).collect())
    }
}

impl fmt::Display for AxisVariations {
    /// Tags in sorted order, e.g. `{wdth: 0.9, wght: 1.6}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        write!(f, "{{")?;
        for (i, (tag, value)) in entries.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{tag}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// How `AxisVariations` values map onto design coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationUnit {
    /// Multiple of the axis default: 1.0 is the font's default instance.
    #[default]
    Relative,
    /// Raw design-space value (e.g. 700 for bold on a 100–900 `wght` axis).
    Design,
}

impl VariationUnit {
    fn to_design(self, value: f32, axis: &AxisInfo) -> f32 {
        match self {
            Self::Relative => value * axis.default,
            Self::Design => value,
        }
    }
}

/// Design coordinates for `axes`, in axis order.
///
/// Missing tags become 0.0 before unit conversion; tags the font doesn't
/// declare are ignored.
pub fn design_coordinates(
    axes: &[AxisInfo],
    variations: &AxisVariations,
    unit: VariationUnit,
) -> Vec<f32> {
    axes.iter()
        .map(|axis| {
            let value = variations.get(axis.name()).unwrap_or(0.0);
            unit.to_design(value, axis)
        })
        .collect()
}

/// Apply `variations` to the handle's active instance.
///
/// Fails with `AxisSet` when the font has no variation axes. Values outside
/// an axis range are clamped during normalization.
pub fn apply_variations(
    font: &mut FontHandle,
    variations: &AxisVariations,
    unit: VariationUnit,
) -> Result<()> {
    let coords = design_coordinates(font.axes(), variations, unit);
    font.set_design_coordinates(&coords)
}
