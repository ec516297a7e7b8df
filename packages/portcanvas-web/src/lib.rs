//! Browser backend for portcanvas.
//!
//! Rust callers build a [`Bridge`](portcanvas_core::Bridge) over a
//! [`DomHost`]; JavaScript callers use the exported `init` and
//! `renderScene` functions with their own port objects.

pub mod error;
pub mod host;
pub mod js;
pub mod surface;

pub use error::WebError;
pub use host::DomHost;
pub use js::{init, render_scene};
pub use surface::CanvasSurface;
