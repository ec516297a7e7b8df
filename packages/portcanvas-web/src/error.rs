use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum WebError {
    #[error("no global `window` exists")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("element `{canvas_id}` is not a canvas")]
    NotCanvas { canvas_id: String },

    #[error("canvas `{canvas_id}` has no 2d context")]
    NoContext { canvas_id: String },

    #[error("`{name}` is not a port object: missing `{method}` function")]
    NotAPort { name: &'static str, method: &'static str },

    #[error(transparent)]
    Core(#[from] portcanvas_core::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        let message = value
            .as_string()
            .or_else(|| {
                value
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{value:?}"));
        WebError::Js(message)
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
