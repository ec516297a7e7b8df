//! Glue for JavaScript port objects.
//!
//! The producer exposes its streams the way Elm ports do: an output object
//! with `subscribe(callback)` and an input object with `send(value)`.

use crate::error::WebError;
use crate::host::DomHost;
use portcanvas_core::{Bridge, BridgeOptions, InputEvent, Presented, Scene};
use portcanvas_ports::{port, InputPort, OutputPort};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

fn port_method(
    target: &JsValue,
    name: &'static str,
    method: &'static str,
) -> Result<js_sys::Function, WebError> {
    js_sys::Reflect::get(target, &JsValue::from_str(method))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| WebError::NotAPort { name, method })
}

fn to_json(value: &JsValue) -> Result<String, WebError> {
    js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| WebError::Js("value has no JSON representation".to_string()))
}

/// Decodes a scene handed over as a plain JS object.
pub fn scene_from_js(value: &JsValue) -> Result<Scene, WebError> {
    Ok(Scene::from_json(&to_json(value)?)?)
}

/// `undefined` and `null` mean "all defaults".
pub fn options_from_js(value: &JsValue) -> Result<BridgeOptions, WebError> {
    if value.is_undefined() || value.is_null() {
        return Ok(BridgeOptions::default());
    }
    Ok(BridgeOptions::from_json(&to_json(value)?)?)
}

/// Builds the `{type_, data}` record the producer receives.
pub fn event_to_js(event: &InputEvent<MouseEvent>) -> Result<JsValue, WebError> {
    let record = js_sys::Object::new();
    js_sys::Reflect::set(
        &record,
        &JsValue::from_str("type_"),
        &JsValue::from_str(event.kind.as_str()),
    )?;
    js_sys::Reflect::set(&record, &JsValue::from_str("data"), &event.data)?;
    Ok(record.into())
}

/// Wires a producer's ports to the page's canvases.
///
/// Every scene delivered through `output.subscribe` is drawn on the canvas
/// named by its `canvasId`; mouse events on those canvases are sent back
/// through `input.send`. The wiring lives for the rest of the page.
#[wasm_bindgen]
pub fn init(input: JsValue, output: JsValue, options: JsValue) -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let send = port_method(&input, "input", "send")?;
    let subscribe = port_method(&output, "output", "subscribe")?;
    let options = options_from_js(&options)?;

    let scenes: OutputPort<Scene> = port();
    let events: InputPort<InputEvent<MouseEvent>> = port();

    events.subscribe(move |event: &InputEvent<MouseEvent>| {
        let delivered = event_to_js(event)
            .and_then(|record| send.call1(&input, &record).map_err(WebError::from));
        if let Err(err) = delivered {
            tracing::warn!(kind = %event.kind, "failed to forward input event: {}", err);
        }
    });

    let _handle = Bridge::new(DomHost::new()?, options).init(events, &scenes);

    let on_scene = Closure::<dyn FnMut(JsValue)>::new(move |value: JsValue| {
        match scene_from_js(&value) {
            Ok(scene) => scenes.send(scene),
            Err(err) => tracing::warn!("dropping malformed scene: {}", err),
        }
    });
    subscribe.call1(&output, on_scene.as_ref())?;
    on_scene.forget();

    Ok(())
}

/// Draws one scene without any port wiring. Returns `false` when the canvas
/// does not exist.
#[wasm_bindgen(js_name = renderScene)]
pub fn render_scene(scene: JsValue, options: JsValue) -> Result<bool, JsValue> {
    let scene = scene_from_js(&scene)?;
    let options = options_from_js(&options)?.with_forward_input(false);

    let mut bridge = Bridge::new(DomHost::new()?, options);
    let outcome = bridge.present(&scene, &port())?;
    Ok(matches!(outcome, Presented::Drawn { .. }))
}
