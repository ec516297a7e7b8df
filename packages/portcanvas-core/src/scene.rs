//! Scene messages as the producer sends them.
//!
//! The wire format is JSON with camelCase keys; elements carry a `type`
//! tag of `"element"` or `"text"`.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One frame's worth of drawing for a single canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub canvas_id: String,
    pub elements: Vec<Element>,
}

impl Scene {
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element.into());
        self
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self, Error> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decodes every scene in `input`.
    ///
    /// Accepts a JSON array of scenes, or one or more scene objects separated
    /// by whitespace (which covers newline-delimited files).
    pub fn decode_all(input: &str) -> Result<Vec<Self>, Error> {
        let trimmed = input.trim_start();
        let scenes = if trimmed.starts_with('[') {
            serde_json::from_str::<Vec<Scene>>(trimmed)?
        } else {
            serde_json::Deserializer::from_str(trimmed)
                .into_iter::<Scene>()
                .collect::<Result<Vec<_>, _>>()?
        };

        if scenes.is_empty() {
            return Err(Error::EmptyInput);
        }
        Ok(scenes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Element {
    #[serde(rename = "element")]
    Rect(RectElement),
    #[serde(rename = "text")]
    Text(TextElement),
    /// Any tag this renderer does not know. Skipped when painting.
    #[serde(other)]
    Unsupported,
}

impl From<RectElement> for Element {
    fn from(rect: RectElement) -> Self {
        Element::Rect(rect)
    }
}

impl From<TextElement> for Element {
    fn from(text: TextElement) -> Self {
        Element::Text(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub blur: f64,
    pub color: String,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// A filled rectangle, optionally bordered and shadowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectElement {
    pub position: Point,
    pub size: Size,
    pub background_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

impl RectElement {
    pub fn new(position: Point, size: Size, background_color: impl Into<String>) -> Self {
        Self {
            position,
            size,
            background_color: background_color.into(),
            border: None,
            shadow: None,
        }
    }

    pub fn with_border(mut self, color: impl Into<String>, width: f64) -> Self {
        self.border = Some(Border {
            color: color.into(),
            width,
        });
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// A single line of text drawn with its top edge at `position`.
///
/// Font fields left out fall back to the renderer's default font one by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub position: Point,
    pub content: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl TextElement {
    pub fn new(position: Point, content: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            color: color.into(),
            font_weight: None,
            font_size: None,
            font_family: None,
        }
    }

    pub fn with_font(
        mut self,
        weight: impl Into<FontWeight>,
        size: f64,
        family: impl Into<String>,
    ) -> Self {
        self.font_weight = Some(weight.into());
        self.font_size = Some(size);
        self.font_family = Some(family.into());
        self
    }
}

/// CSS font weight, sent either as a keyword (`"bold"`) or a number (`700`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    Numeric(u16),
    Keyword(String),
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::Keyword("normal".to_string())
    }
}

impl From<u16> for FontWeight {
    fn from(weight: u16) -> Self {
        FontWeight::Numeric(weight)
    }
}

impl From<&str> for FontWeight {
    fn from(weight: &str) -> Self {
        FontWeight::Keyword(weight.to_string())
    }
}

impl From<String> for FontWeight {
    fn from(weight: String) -> Self {
        FontWeight::Keyword(weight)
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Numeric(weight) => write!(f, "{weight}"),
            FontWeight::Keyword(weight) => f.write_str(weight),
        }
    }
}
