use crate::error::Error;
use crate::paint::FontSpec;
use serde::{Deserialize, Serialize};

/// Bridge configuration.
///
/// Deserializes from a partial camelCase object, e.g. `{"clear": false}`;
/// missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BridgeOptions {
    /// Clear the canvas before painting each scene. With `false`, scenes
    /// accumulate on top of whatever is already drawn.
    pub clear: bool,
    /// Attach mouse listeners and publish their events to the input port.
    pub forward_input: bool,
    pub default_font: FontSpec,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            clear: true,
            forward_input: true,
            default_font: FontSpec::default(),
        }
    }
}

impl BridgeOptions {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    pub fn with_forward_input(mut self, forward_input: bool) -> Self {
        self.forward_input = forward_input;
        self
    }

    pub fn with_default_font(mut self, font: FontSpec) -> Self {
        self.default_font = font;
        self
    }
}
