use portcanvas_core::{
    BridgeOptions, Element, Error, FontWeight, InputEvent, MouseEventKind, MouseSample, Scene,
};
use serde_json::json;

const FULL_SCENE: &str = r##"{
    "canvasId": "board",
    "elements": [
        {
            "type": "element",
            "position": {"x": 1.5, "y": 2},
            "size": {"width": 30, "height": 40},
            "backgroundColor": "#ff0000",
            "border": {"color": "black", "width": 2},
            "shadow": {"blur": 5, "color": "gray", "offsetX": 1, "offsetY": -1}
        },
        {
            "type": "text",
            "position": {"x": 0, "y": 0},
            "content": "Score: 10",
            "color": "white",
            "fontWeight": 700,
            "fontSize": 18,
            "fontFamily": "Arial"
        }
    ]
}"##;

#[test]
fn test_decode_full_scene() {
    let scene = Scene::from_json(FULL_SCENE).unwrap();

    assert_eq!(scene.canvas_id, "board");
    assert_eq!(scene.elements.len(), 2);

    let Element::Rect(rect) = &scene.elements[0] else {
        panic!("expected rect, got {:?}", scene.elements[0]);
    };
    assert_eq!(rect.position.x, 1.5);
    assert_eq!(rect.background_color, "#ff0000");
    assert_eq!(rect.border.as_ref().map(|b| b.width), Some(2.0));
    assert_eq!(rect.shadow.as_ref().map(|s| s.offset_y), Some(-1.0));

    let Element::Text(text) = &scene.elements[1] else {
        panic!("expected text, got {:?}", scene.elements[1]);
    };
    assert_eq!(text.font_weight, Some(FontWeight::Numeric(700)));
    assert_eq!(text.font_size, Some(18.0));
}

#[test]
fn test_null_optionals_decode_as_absent() {
    let scene = Scene::from_json_value(json!({
        "canvasId": "c",
        "elements": [{
            "type": "element",
            "position": {"x": 0, "y": 0},
            "size": {"width": 1, "height": 1},
            "backgroundColor": "red",
            "border": null,
            "shadow": null
        }]
    }))
    .unwrap();

    let Element::Rect(rect) = &scene.elements[0] else {
        panic!("expected rect");
    };
    assert!(rect.border.is_none());
    assert!(rect.shadow.is_none());
}

#[test]
fn test_keyword_font_weight() {
    let scene = Scene::from_json_value(json!({
        "canvasId": "c",
        "elements": [{
            "type": "text",
            "position": {"x": 0, "y": 0},
            "content": "x",
            "color": "black",
            "fontWeight": "bold"
        }]
    }))
    .unwrap();

    let Element::Text(text) = &scene.elements[0] else {
        panic!("expected text");
    };
    assert_eq!(text.font_weight, Some(FontWeight::Keyword("bold".to_string())));
}

#[test]
fn test_missing_required_field_rejects_scene() {
    let err = Scene::from_json_value(json!({
        "canvasId": "c",
        "elements": [{"type": "element", "position": {"x": 0, "y": 0}}]
    }))
    .unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_decode_all_formats() {
    let single = Scene::decode_all(FULL_SCENE).unwrap();
    assert_eq!(single.len(), 1);

    let array = Scene::decode_all(&format!("[{FULL_SCENE}, {FULL_SCENE}]")).unwrap();
    assert_eq!(array.len(), 2);

    let lines = concat!(
        r#"{"canvasId": "a", "elements": []}"#,
        "\n",
        r#"{"canvasId": "b", "elements": []}"#,
        "\n"
    );
    let ids: Vec<_> = Scene::decode_all(lines)
        .unwrap()
        .into_iter()
        .map(|scene| scene.canvas_id)
        .collect();
    assert_eq!(ids, vec!["a", "b"]);

    assert!(matches!(Scene::decode_all("  \n"), Err(Error::EmptyInput)));
}

#[test]
fn test_input_event_wire_shape() {
    let event = InputEvent::new(MouseEventKind::DblClick, MouseSample::at(1.0, 2.0));

    assert_eq!(
        serde_json::to_value(&event).unwrap(),
        json!({"type_": "dblclick", "data": {"offsetX": 1.0, "offsetY": 2.0, "button": 0}})
    );
}

#[test]
fn test_event_kind_names() {
    for kind in MouseEventKind::ALL {
        assert_eq!(kind.as_str().parse::<MouseEventKind>().unwrap(), kind);
    }
    assert!(matches!(
        "contextmenu".parse::<MouseEventKind>(),
        Err(Error::UnknownEventKind(name)) if name == "contextmenu"
    ));
}

#[test]
fn test_partial_options() {
    let options = BridgeOptions::from_json(r#"{"clear": false}"#).unwrap();
    assert!(!options.clear);
    assert!(options.forward_input);
    assert_eq!(options.default_font.css(), "normal 16px sans-serif");

    let options =
        BridgeOptions::from_json(r#"{"defaultFont": {"family": "monospace", "size": 10}}"#)
            .unwrap();
    assert_eq!(options.default_font.css(), "normal 10px monospace");
}
