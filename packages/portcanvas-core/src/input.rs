use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The mouse events the bridge forwards from a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseEventKind {
    MouseDown,
    MouseUp,
    Click,
    DblClick,
}

impl MouseEventKind {
    pub const ALL: [MouseEventKind; 4] = [
        MouseEventKind::MouseDown,
        MouseEventKind::MouseUp,
        MouseEventKind::Click,
        MouseEventKind::DblClick,
    ];

    /// DOM event name.
    pub fn as_str(self) -> &'static str {
        match self {
            MouseEventKind::MouseDown => "mousedown",
            MouseEventKind::MouseUp => "mouseup",
            MouseEventKind::Click => "click",
            MouseEventKind::DblClick => "dblclick",
        }
    }
}

impl fmt::Display for MouseEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MouseEventKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MouseEventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownEventKind(s.to_string()))
    }
}

/// A platform event published to the producer, payload passed through
/// untouched. Serializes as `{"type_": "click", "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputEvent<E> {
    #[serde(rename = "type_")]
    pub kind: MouseEventKind,
    pub data: E,
}

impl<E> InputEvent<E> {
    pub fn new(kind: MouseEventKind, data: E) -> Self {
        Self { kind, data }
    }
}
