use js_sys::{Function, Object, Reflect};
use portcanvas_core::{
    Bridge, BridgeOptions, InputEvent, MouseEventKind, Point, Presented, RectElement, Scene,
    Shadow, Size, TextElement,
};
use portcanvas_ports::{port, InputPort, OutputPort};
use portcanvas_web::DomHost;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

wasm_bindgen_test_configure!(run_in_browser);

fn mount_canvas(id: &str) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    canvas.set_width(40);
    canvas.set_height(40);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn context(canvas: &HtmlCanvasElement) -> CanvasRenderingContext2d {
    canvas
        .get_context("2d")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn pixel(canvas: &HtmlCanvasElement, x: f64, y: f64) -> Vec<u8> {
    context(canvas).get_image_data(x, y, 1.0, 1.0).unwrap().data().0
}

fn square(color: &str) -> RectElement {
    RectElement::new(Point::new(0.0, 0.0), Size::new(20.0, 20.0), color)
}

#[wasm_bindgen_test]
fn test_missing_canvas_is_noop() {
    let mut bridge = Bridge::new(DomHost::new().unwrap(), BridgeOptions::default());
    let outcome = bridge
        .present(&Scene::new("no-such-canvas").with_element(square("red")), &port())
        .unwrap();
    assert_eq!(outcome, Presented::CanvasMissing);
}

#[wasm_bindgen_test]
fn test_later_element_wins() {
    let canvas = mount_canvas("later-wins");
    let mut bridge = Bridge::new(DomHost::new().unwrap(), BridgeOptions::default());

    let scene = Scene::new("later-wins")
        .with_element(square("rgb(255, 0, 0)"))
        .with_element(square("rgb(0, 0, 255)"));
    bridge.present(&scene, &port()).unwrap();

    assert_eq!(pixel(&canvas, 5.0, 5.0), vec![0, 0, 255, 255]);
    // Outside every element the canvas was cleared.
    assert_eq!(pixel(&canvas, 30.0, 30.0), vec![0, 0, 0, 0]);
}

#[wasm_bindgen_test]
fn test_clear_is_configurable() {
    let canvas = mount_canvas("overlay");
    let mut bridge = Bridge::new(
        DomHost::new().unwrap(),
        BridgeOptions::default().with_clear(false),
    );

    let first = Scene::new("overlay").with_element(RectElement::new(
        Point::new(25.0, 25.0),
        Size::new(10.0, 10.0),
        "rgb(0, 255, 0)",
    ));
    bridge.present(&first, &port()).unwrap();
    bridge
        .present(&Scene::new("overlay").with_element(square("rgb(255, 0, 0)")), &port())
        .unwrap();

    assert_eq!(pixel(&canvas, 30.0, 30.0), vec![0, 255, 0, 255]);
}

#[wasm_bindgen_test]
fn test_shadow_reset_after_shadowed_element() {
    let canvas = mount_canvas("shadow-reset");
    let mut bridge = Bridge::new(DomHost::new().unwrap(), BridgeOptions::default());

    let scene = Scene::new("shadow-reset")
        .with_element(square("red").with_shadow(Shadow {
            blur: 6.0,
            color: "black".to_string(),
            offset_x: 3.0,
            offset_y: 3.0,
        }))
        .with_element(square("blue"));
    bridge.present(&scene, &port()).unwrap();

    let ctx = context(&canvas);
    assert_eq!(ctx.shadow_blur(), 0.0);
    assert_eq!(ctx.shadow_offset_x(), 0.0);
    assert_eq!(ctx.shadow_offset_y(), 0.0);
}

#[wasm_bindgen_test]
fn test_text_sets_top_baseline_and_font() {
    let canvas = mount_canvas("text-state");
    let mut bridge = Bridge::new(DomHost::new().unwrap(), BridgeOptions::default());

    let scene = Scene::new("text-state").with_element(
        TextElement::new(Point::new(5.0, 5.0), "hi", "blue").with_font("bold", 12.0, "monospace"),
    );
    bridge.present(&scene, &port()).unwrap();

    let ctx = context(&canvas);
    assert_eq!(ctx.text_baseline(), "top");
    assert!(ctx.font().contains("12px"));
}

#[wasm_bindgen_test]
fn test_click_forwarded_once_per_click() {
    let canvas = mount_canvas("clicks");
    let input: InputPort<InputEvent<MouseEvent>> = port();
    let output: OutputPort<Scene> = port();

    let kinds = Rc::new(RefCell::new(Vec::new()));
    {
        let kinds = kinds.clone();
        input.subscribe(move |event: &InputEvent<MouseEvent>| kinds.borrow_mut().push(event.kind));
    }

    let _handle =
        Bridge::new(DomHost::new().unwrap(), BridgeOptions::default()).init(input, &output);
    for _ in 0..3 {
        output.send(Scene::new("clicks").with_element(square("red")));
    }

    let click = MouseEvent::new("click").unwrap();
    canvas.dispatch_event(&click).unwrap();

    assert_eq!(*kinds.borrow(), vec![MouseEventKind::Click]);
}

#[wasm_bindgen_test]
fn test_removed_canvas_releases_listeners() {
    let canvas = mount_canvas("goes-away");
    let mut bridge = Bridge::new(DomHost::new().unwrap(), BridgeOptions::default());
    let scene = Scene::new("goes-away").with_element(square("red"));

    bridge.present(&scene, &port()).unwrap();
    assert!(bridge.host().is_listening("goes-away"));

    canvas.remove();
    let outcome = bridge.present(&scene, &port()).unwrap();
    assert_eq!(outcome, Presented::CanvasMissing);
    assert!(!bridge.host().is_listening("goes-away"));
}

#[wasm_bindgen_test]
fn test_js_ports_round_trip() {
    let canvas = mount_canvas("js-ports");

    let input = Object::new();
    Reflect::set(&input, &"sent".into(), &js_sys::Array::new()).unwrap();
    Reflect::set(
        &input,
        &"send".into(),
        &Function::new_with_args("value", "this.sent.push(value)"),
    )
    .unwrap();

    let output = Object::new();
    Reflect::set(
        &output,
        &"subscribe".into(),
        &Function::new_with_args("callback", "this.callback = callback"),
    )
    .unwrap();

    portcanvas_web::init(input.clone().into(), output.clone().into(), JsValue::UNDEFINED).unwrap();

    let scene = js_sys::JSON::parse(
        r#"{"canvasId": "js-ports", "elements": [
            {"type": "element", "position": {"x": 0, "y": 0},
             "size": {"width": 10, "height": 10}, "backgroundColor": "rgb(255, 0, 0)"}
        ]}"#,
    )
    .unwrap();
    let callback: Function = Reflect::get(&output, &"callback".into())
        .unwrap()
        .dyn_into()
        .unwrap();
    callback.call1(&JsValue::NULL, &scene).unwrap();

    assert_eq!(pixel(&canvas, 2.0, 2.0), vec![255, 0, 0, 255]);

    let dblclick = MouseEvent::new("dblclick").unwrap();
    canvas.dispatch_event(&dblclick).unwrap();

    let sent: js_sys::Array = Reflect::get(&input, &"sent".into())
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(sent.length(), 1);
    let record = sent.get(0);
    assert_eq!(
        Reflect::get(&record, &"type_".into()).unwrap().as_string(),
        Some("dblclick".to_string())
    );
    let data = Reflect::get(&record, &"data".into()).unwrap();
    assert!(Object::is(&data, &dblclick));
}

#[wasm_bindgen_test]
fn test_init_rejects_non_port() {
    let not_a_port = Object::new();
    let result = portcanvas_web::init(
        not_a_port.clone().into(),
        not_a_port.into(),
        JsValue::UNDEFINED,
    );
    assert!(result.is_err());
}
