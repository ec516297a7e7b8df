use crate::host::{CanvasHost, HostError};
use crate::input::InputEvent;
use crate::options::BridgeOptions;
use crate::render::SceneRenderer;
use crate::scene::Scene;
use portcanvas_ports::{InputPort, OutputPort, Subscription};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// What happened to one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presented {
    Drawn { elements: usize },
    /// No canvas with the scene's id; nothing was drawn.
    CanvasMissing,
}

/// Connects a scene stream to canvases provided by a [`CanvasHost`].
///
/// Each scene is handled on its own: nothing is carried over from the
/// previous frame except the listeners already attached to a canvas.
pub struct Bridge<H: CanvasHost> {
    host: H,
    renderer: SceneRenderer,
    forward_input: bool,
    presented: u64,
}

impl<H: CanvasHost> Bridge<H> {
    pub fn new(host: H, options: BridgeOptions) -> Self {
        Self {
            host,
            renderer: SceneRenderer::from_options(&options),
            forward_input: options.forward_input,
            presented: 0,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    pub fn forwards_input(&self) -> bool {
        self.forward_input
    }

    /// Scenes drawn so far, not counting ones whose canvas was missing.
    pub fn presented(&self) -> u64 {
        self.presented
    }

    /// Draws `scene` on its canvas, wiring the canvas's mouse events into
    /// `input` first when input forwarding is on.
    pub fn present(
        &mut self,
        scene: &Scene,
        input: &InputPort<InputEvent<H::RawEvent>>,
    ) -> Result<Presented, HostError<H>> {
        let Some(mut surface) = self.host.resolve(&scene.canvas_id)? else {
            tracing::debug!(canvas_id = %scene.canvas_id, "canvas not found, skipping scene");
            return Ok(Presented::CanvasMissing);
        };

        if self.forward_input {
            self.host.listen(&scene.canvas_id, &surface, input)?;
        }

        let elements = self.renderer.render(scene, &mut surface)?;
        self.presented += 1;
        Ok(Presented::Drawn { elements })
    }
}

impl<H> Bridge<H>
where
    H: CanvasHost + 'static,
    HostError<H>: fmt::Display,
{
    /// Subscribes the bridge to `output`; every scene sent there is
    /// presented, and mouse events are published to `input`.
    ///
    /// Failures cannot reach the producer from inside the subscription, so
    /// they are logged and the scene is dropped.
    pub fn init(
        self,
        input: InputPort<InputEvent<H::RawEvent>>,
        output: &OutputPort<Scene>,
    ) -> BridgeHandle<H> {
        let bridge = Rc::new(RefCell::new(self));

        let subscription = {
            let bridge = bridge.clone();
            output.subscribe(move |scene: &Scene| {
                let Ok(mut bridge) = bridge.try_borrow_mut() else {
                    tracing::warn!(
                        canvas_id = %scene.canvas_id,
                        "scene sent while another scene was being presented, dropping it"
                    );
                    return;
                };
                if let Err(err) = bridge.present(scene, &input) {
                    tracing::warn!(canvas_id = %scene.canvas_id, "failed to present scene: {}", err);
                }
            })
        };

        tracing::info!("canvas bridge initialised");
        BridgeHandle {
            bridge,
            subscription,
        }
    }
}

/// A bridge that has been attached to an output port.
pub struct BridgeHandle<H: CanvasHost> {
    bridge: Rc<RefCell<Bridge<H>>>,
    subscription: Subscription<Scene>,
}

impl<H: CanvasHost> BridgeHandle<H> {
    pub fn with_bridge<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Bridge<H>) -> R,
    {
        f(&mut self.bridge.borrow_mut())
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }

    /// Stops listening for scenes. Listeners already attached to canvases
    /// stay in place.
    pub fn detach(self) -> bool {
        self.subscription.unsubscribe()
    }
}
