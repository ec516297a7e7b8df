pub mod bridge;
pub mod error;
pub mod host;
pub mod input;
pub mod options;
pub mod paint;
pub mod render;
pub mod scene;
pub mod surface;

pub use bridge::{Bridge, BridgeHandle, Presented};
pub use error::Error;
pub use host::{CanvasHost, HostError, MemoryHost, MouseSample};
pub use input::{InputEvent, MouseEventKind};
pub use options::BridgeOptions;
pub use paint::{FillParams, FontSpec, Rect, StrokeParams, TextBaseline, TextParams};
pub use render::SceneRenderer;
pub use scene::{Border, Element, FontWeight, Point, RectElement, Scene, Shadow, Size, TextElement};
pub use surface::{DrawCall, DrawSurface, RecordingSurface};
