use crate::error::WebError;
use crate::surface::CanvasSurface;
use portcanvas_core::{CanvasHost, InputEvent, MouseEventKind};
use portcanvas_ports::InputPort;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, HtmlCanvasElement, MouseEvent};

type MouseCallback = Closure<dyn FnMut(MouseEvent)>;

/// Mouse listeners attached to one canvas element. Dropping the set removes
/// the listeners from the element.
struct CanvasListeners {
    canvas: HtmlCanvasElement,
    callbacks: SmallVec<[(MouseEventKind, MouseCallback); 4]>,
}

impl CanvasListeners {
    fn attach(
        canvas: &HtmlCanvasElement,
        sink: &InputPort<InputEvent<MouseEvent>>,
    ) -> Result<Self, WebError> {
        let mut listeners = CanvasListeners {
            canvas: canvas.clone(),
            callbacks: SmallVec::new(),
        };

        for kind in MouseEventKind::ALL {
            let sink = sink.clone();
            let callback = MouseCallback::new(move |event: MouseEvent| {
                sink.send(InputEvent::new(kind, event));
            });
            canvas.add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())?;
            listeners.callbacks.push((kind, callback));
        }

        Ok(listeners)
    }

    fn is_on(&self, canvas: &HtmlCanvasElement) -> bool {
        js_sys::Object::is(&self.canvas, canvas)
    }
}

impl Drop for CanvasListeners {
    fn drop(&mut self) {
        for (kind, callback) in &self.callbacks {
            let _ = self
                .canvas
                .remove_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref());
        }
    }
}

/// [`CanvasHost`] backed by the page's DOM.
pub struct DomHost {
    document: Document,
    listeners: FxHashMap<String, CanvasListeners>,
}

impl DomHost {
    pub fn new() -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        Ok(Self::with_document(document))
    }

    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            listeners: FxHashMap::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Removes the listeners attached to `canvas_id`, if any.
    pub fn unlisten(&mut self, canvas_id: &str) -> bool {
        self.listeners.remove(canvas_id).is_some()
    }

    pub fn is_listening(&self, canvas_id: &str) -> bool {
        self.listeners.contains_key(canvas_id)
    }
}

impl CanvasHost for DomHost {
    type Surface = CanvasSurface;
    type RawEvent = MouseEvent;

    fn resolve(&mut self, canvas_id: &str) -> Result<Option<CanvasSurface>, WebError> {
        let Some(element) = self.document.get_element_by_id(canvas_id) else {
            // The element is gone; release its listeners with it.
            if self.listeners.remove(canvas_id).is_some() {
                tracing::debug!(canvas_id, "canvas removed, detaching mouse listeners");
            }
            return Ok(None);
        };
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| WebError::NotCanvas {
                canvas_id: canvas_id.to_string(),
            })?;
        CanvasSurface::from_canvas(&canvas).map(Some)
    }

    fn listen(
        &mut self,
        canvas_id: &str,
        surface: &CanvasSurface,
        sink: &InputPort<InputEvent<MouseEvent>>,
    ) -> Result<(), WebError> {
        if self
            .listeners
            .get(canvas_id)
            .is_some_and(|listeners| listeners.is_on(surface.canvas()))
        {
            return Ok(());
        }

        tracing::debug!(canvas_id, "attaching mouse listeners");
        let listeners = CanvasListeners::attach(surface.canvas(), sink)?;
        // Replacing the entry drops the listeners of a previous element.
        self.listeners.insert(canvas_id.to_string(), listeners);
        Ok(())
    }
}
