use portcanvas_core::{
    Bridge, BridgeOptions, InputEvent, MouseEventKind, Point, RectElement, Scene, Shadow, Size,
    TextElement,
};
use portcanvas_ports::{port, InputPort, OutputPort};
use portcanvas_web::DomHost;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

const CANVAS_ID: &str = "board";

#[derive(Default)]
struct Board {
    clicks: u32,
    last: Option<(f64, f64)>,
    pressed: bool,
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let input: InputPort<InputEvent<MouseEvent>> = port();
    let output: OutputPort<Scene> = port();

    let handle = Bridge::new(DomHost::new()?, BridgeOptions::default()).init(input.clone(), &output);

    let board = Rc::new(RefCell::new(Board::default()));
    {
        let output = output.clone();
        let board = board.clone();
        input.subscribe(move |event: &InputEvent<MouseEvent>| {
            let scene = {
                let mut board = board.borrow_mut();
                match event.kind {
                    MouseEventKind::MouseDown => board.pressed = true,
                    MouseEventKind::MouseUp => board.pressed = false,
                    MouseEventKind::Click => {
                        board.clicks += 1;
                        board.last = Some((
                            f64::from(event.data.offset_x()),
                            f64::from(event.data.offset_y()),
                        ));
                    }
                    MouseEventKind::DblClick => *board = Board::default(),
                }
                frame(&board)
            };
            output.send(scene);
        });
    }

    output.send(frame(&board.borrow()));

    // The page owns the bridge from here on.
    std::mem::forget(handle);
    Ok(())
}

fn frame(board: &Board) -> Scene {
    let panel = if board.pressed { "#dde6ff" } else { "#f4f4f8" };
    let mut scene = Scene::new(CANVAS_ID)
        .with_element(
            RectElement::new(Point::new(10.0, 10.0), Size::new(380.0, 60.0), panel)
                .with_border("#445", 2.0)
                .with_shadow(Shadow {
                    blur: 8.0,
                    color: "rgba(0, 0, 0, 0.3)".to_string(),
                    offset_x: 2.0,
                    offset_y: 3.0,
                }),
        )
        .with_element(
            TextElement::new(
                Point::new(24.0, 28.0),
                format!("Clicks: {}", board.clicks),
                "#223",
            )
            .with_font("bold", 20.0, "sans-serif"),
        )
        .with_element(TextElement::new(
            Point::new(24.0, 90.0),
            "Click anywhere. Double-click to reset.",
            "#667",
        ));

    if let Some((x, y)) = board.last {
        scene = scene.with_element(RectElement::new(
            Point::new(x - 4.0, y - 4.0),
            Size::new(8.0, 8.0),
            "crimson",
        ));
    }
    scene
}
