use crate::input::{InputEvent, MouseEventKind};
use crate::surface::{DrawSurface, RecordingSurface};
use portcanvas_ports::InputPort;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// The platform side of the bridge: finds canvases by id and wires their
/// mouse events into the input port.
pub trait CanvasHost {
    type Surface: DrawSurface;
    /// Platform event payload forwarded verbatim to the producer.
    type RawEvent: 'static;

    /// `Ok(None)` when no canvas with this id exists right now.
    fn resolve(
        &mut self,
        canvas_id: &str,
    ) -> Result<Option<Self::Surface>, <Self::Surface as DrawSurface>::Error>;

    /// Attaches the four mouse listeners to the canvas behind `surface`.
    ///
    /// Called on every presented scene. Implementations attach once per
    /// canvas element, and attach again only when the element behind the id
    /// has been replaced, so each platform event is published exactly once.
    fn listen(
        &mut self,
        canvas_id: &str,
        surface: &Self::Surface,
        sink: &InputPort<InputEvent<Self::RawEvent>>,
    ) -> Result<(), <Self::Surface as DrawSurface>::Error>;
}

pub type HostError<H> = <<H as CanvasHost>::Surface as DrawSurface>::Error;

/// Pointer payload used by [`MemoryHost`] in place of a DOM `MouseEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseSample {
    pub offset_x: f64,
    pub offset_y: f64,
    pub button: i16,
}

impl MouseSample {
    pub fn at(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            button: 0,
        }
    }
}

struct Wiring {
    surface: RecordingSurface,
    sink: InputPort<InputEvent<MouseSample>>,
    attachments: usize,
}

#[derive(Default)]
struct MemoryState {
    canvases: FxHashMap<String, RecordingSurface>,
    wiring: FxHashMap<String, Wiring>,
}

/// In-memory host backed by [`RecordingSurface`]s.
///
/// Clones share state, so a caller can keep one handle to add canvases and
/// dispatch events while a bridge owns another.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Rc<RefCell<MemoryState>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the canvas registered under `canvas_id` and returns
    /// a handle onto its call log.
    pub fn add_canvas(&self, canvas_id: impl Into<String>, width: f64, height: f64) -> RecordingSurface {
        let surface = RecordingSurface::new(width, height);
        self.state
            .borrow_mut()
            .canvases
            .insert(canvas_id.into(), surface.clone());
        surface
    }

    pub fn remove_canvas(&self, canvas_id: &str) -> Option<RecordingSurface> {
        self.state.borrow_mut().canvases.remove(canvas_id)
    }

    pub fn canvas(&self, canvas_id: &str) -> Option<RecordingSurface> {
        self.state.borrow().canvases.get(canvas_id).cloned()
    }

    /// How many times listeners have been attached to `canvas_id`.
    pub fn attachments(&self, canvas_id: &str) -> usize {
        self.state
            .borrow()
            .wiring
            .get(canvas_id)
            .map_or(0, |wiring| wiring.attachments)
    }

    /// Simulates a mouse event on a canvas. Returns `false` if the canvas is
    /// gone or no listeners are attached to the current element.
    pub fn dispatch(&self, canvas_id: &str, kind: MouseEventKind, sample: MouseSample) -> bool {
        let sink = {
            let state = self.state.borrow();
            let (Some(canvas), Some(wiring)) =
                (state.canvases.get(canvas_id), state.wiring.get(canvas_id))
            else {
                return false;
            };
            if !wiring.surface.shares_log_with(canvas) {
                return false;
            }
            wiring.sink.clone()
        };

        sink.send(InputEvent::new(kind, sample));
        true
    }
}

impl std::fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryHost")
            .field("canvases", &state.canvases.len())
            .field("wired", &state.wiring.len())
            .finish()
    }
}

impl CanvasHost for MemoryHost {
    type Surface = RecordingSurface;
    type RawEvent = MouseSample;

    fn resolve(
        &mut self,
        canvas_id: &str,
    ) -> Result<Option<Self::Surface>, <Self::Surface as DrawSurface>::Error> {
        Ok(self.canvas(canvas_id))
    }

    fn listen(
        &mut self,
        canvas_id: &str,
        surface: &Self::Surface,
        sink: &InputPort<InputEvent<Self::RawEvent>>,
    ) -> Result<(), <Self::Surface as DrawSurface>::Error> {
        let mut state = self.state.borrow_mut();
        match state.wiring.get_mut(canvas_id) {
            Some(wiring) if wiring.surface.shares_log_with(surface) => {}
            Some(wiring) => {
                wiring.surface = surface.clone();
                wiring.sink = sink.clone();
                wiring.attachments += 1;
            }
            None => {
                state.wiring.insert(
                    canvas_id.to_string(),
                    Wiring {
                        surface: surface.clone(),
                        sink: sink.clone(),
                        attachments: 1,
                    },
                );
            }
        }
        Ok(())
    }
}
