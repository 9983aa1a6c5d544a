use wasm_bindgen::JsValue;

use crate::dom::js_error_message;

#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<JsValue> for WebStorageError {
    fn from(value: JsValue) -> Self {
        Self::Storage(js_error_message(&value))
    }
}
