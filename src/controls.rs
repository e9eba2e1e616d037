//! Slider and checkbox model behind the front end.
//!
//! Sliders hold integer positions; an axis value is the position divided by
//! 100 (relative unit) or the position itself (design unit).

use std::str::FromStr;

use morphtype_core::config::{SliderConfig, SliderRange};
use morphtype_core::{AdvancePolicy, AxisVariations, RenderRequest, VariationUnit};

/// An integer slider that clamps to its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    min: i32,
    max: i32,
    value: i32,
}

impl Slider {
    pub fn new(range: SliderRange) -> Self {
        let (min, max) = if range.min <= range.max {
            (range.min, range.max)
        } else {
            (range.max, range.min)
        };
        Self {
            min,
            max,
            value: range.value.clamp(min, max),
        }
    }

    /// Move to `value`, clamped to the range.
    pub fn set(&mut self, value: i32) {
        self.value = value.clamp(self.min, self.max);
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    fn axis_value(&self, unit: VariationUnit) -> f32 {
        match unit {
            VariationUnit::Relative => self.value as f32 / 100.0,
            VariationUnit::Design => self.value as f32,
        }
    }
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Weight(i32),
    Width(i32),
    Shaping(bool),
    Text(String),
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let slider = |rest: &str| {
            rest.trim()
                .parse::<i32>()
                .map_err(|e| format!("{word}: {e} in {:?}", rest.trim()))
        };
        match word {
            "weight" => slider(rest).map(Self::Weight),
            "width" => slider(rest).map(Self::Width),
            "shaping" => match rest.trim() {
                "on" => Ok(Self::Shaping(true)),
                "off" => Ok(Self::Shaping(false)),
                other => Err(format!("shaping: expected on or off, got {other:?}")),
            },
            "text" => Ok(Self::Text(rest.to_owned())),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err("empty command".to_owned()),
            other => Err(format!("unknown command {other:?}")),
        }
    }
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        line.parse()
    }
}

/// Front-end state: two sliders, the shaping checkbox, and the text field.
#[derive(Debug, Clone)]
pub struct Controls {
    weight: Slider,
    width: Slider,
    shaping: bool,
    text: String,
    unit: VariationUnit,
}

impl Controls {
    pub fn new(sliders: &SliderConfig, unit: VariationUnit) -> Self {
        Self {
            weight: Slider::new(sliders.weight),
            width: Slider::new(sliders.width),
            shaping: false,
            text: String::new(),
            unit,
        }
    }

    /// Update state from a command. `Quit` changes nothing.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Weight(v) => {
                self.weight.set(v);
                if self.weight.value() != v {
                    log::warn!("weight {v} out of range, using {}", self.weight.value());
                }
            }
            Command::Width(v) => {
                self.width.set(v);
                if self.width.value() != v {
                    log::warn!("width {v} out of range, using {}", self.width.value());
                }
            }
            Command::Shaping(on) => self.shaping = on,
            Command::Text(text) => self.text = text,
            Command::Quit => {}
        }
    }

    /// The redraw this state asks for.
    pub fn request(&self) -> RenderRequest {
        let variations = AxisVariations::new()
            .with("wght", self.weight.axis_value(self.unit))
            .with("wdth", self.width.axis_value(self.unit));
        RenderRequest {
            text: self.text.clone(),
            variations,
            advance_policy: if self.shaping {
                AdvancePolicy::Shaped
            } else {
                AdvancePolicy::Unshaped
            },
        }
    }
}

#[cfg(test)]
mod tests;
