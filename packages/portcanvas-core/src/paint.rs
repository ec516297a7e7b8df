//! Per-call pen state for the draw primitives.
//!
//! Every primitive receives the complete set of pen settings it depends on,
//! so nothing configured for one element can bleed into the next.

use crate::scene::{FontWeight, Point, Shadow, Size, TextElement};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shadow color applied when a call carries no shadow.
pub const NO_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0)";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    #[default]
    Top,
    Hanging,
    Middle,
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Hanging => "hanging",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Ideographic => "ideographic",
            TextBaseline::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeParams<'a> {
    pub color: &'a str,
    pub width: f64,
    pub shadow: Option<&'a Shadow>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillParams<'a> {
    pub color: &'a str,
    pub shadow: Option<&'a Shadow>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextParams<'a> {
    pub font: &'a str,
    pub color: &'a str,
    pub baseline: TextBaseline,
    pub shadow: Option<&'a Shadow>,
}

/// The font used for text elements that omit some or all font fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontSpec {
    pub weight: FontWeight,
    pub size: f64,
    pub family: String,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            weight: FontWeight::default(),
            size: 16.0,
            family: "sans-serif".to_string(),
        }
    }
}

impl FontSpec {
    /// Fills the gaps in `text`'s font fields from `self`.
    pub fn resolve(&self, text: &TextElement) -> FontSpec {
        FontSpec {
            weight: text
                .font_weight
                .clone()
                .unwrap_or_else(|| self.weight.clone()),
            size: text.font_size.unwrap_or(self.size),
            family: text
                .font_family
                .clone()
                .unwrap_or_else(|| self.family.clone()),
        }
    }

    /// CSS font shorthand, e.g. `bold 14px monospace`.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}px {}", self.weight, self.size, self.family)
    }
}
