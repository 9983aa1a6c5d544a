//! `window.__docnavTest`: automation hooks installed only with `?test=1`.
use std::rc::Weak;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom;
use crate::events::EventRegistry;

pub const BRIDGE_GLOBAL: &str = "__docnavTest";

pub struct BridgeBindings {
    state: Closure<dyn FnMut() -> JsValue>,
    dispatch: Closure<dyn FnMut(JsValue) -> JsValue>,
}

#[must_use]
pub fn test_mode_enabled() -> bool {
    dom::window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| search.contains("test=1"))
}

fn build_bridge(registry: &Weak<EventRegistry>) -> BridgeBindings {
    let state_registry = registry.clone();
    let state = Closure::wrap(Box::new(move || {
        let Some(registry) = state_registry.upgrade() else {
            return JsValue::NULL;
        };
        let snapshot = registry.controller().borrow().snapshot();
        match snapshot {
            Ok(snapshot) => serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL),
            Err(err) => JsValue::from_str(&err.to_string()),
        }
    }) as Box<dyn FnMut() -> JsValue>);

    let dispatch_registry = registry.clone();
    let dispatch = Closure::wrap(Box::new(move |value: JsValue| {
        let (Some(registry), Some(name)) = (dispatch_registry.upgrade(), value.as_string()) else {
            return JsValue::FALSE;
        };
        let result = registry.controller().borrow_mut().dispatch_named(&name);
        match result {
            Ok(new_bindings) => JsValue::from_bool(registry.install(&new_bindings).is_ok()),
            Err(err) => {
                log::warn!("bridge dispatch failed: {err}");
                JsValue::FALSE
            }
        }
    }) as Box<dyn FnMut(JsValue) -> JsValue>);

    BridgeBindings {
        state,
        dispatch,
    }
}

fn attach_bridge(bindings: &BridgeBindings) {
    let Some(window) = dom::window() else {
        return;
    };
    let bridge = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("state"),
        bindings.state.as_ref().unchecked_ref(),
    );
    let _ = js_sys::Reflect::set(
        &bridge,
        &JsValue::from_str("dispatch"),
        bindings.dispatch.as_ref().unchecked_ref(),
    );
    let _ = js_sys::Reflect::set(&window, &JsValue::from_str(BRIDGE_GLOBAL), &bridge);
}

/// Install the bridge when the page was opened in test mode.
#[must_use]
pub fn install(registry: &Weak<EventRegistry>) -> Option<BridgeBindings> {
    if !test_mode_enabled() {
        return None;
    }
    let bindings = build_bridge(registry);
    attach_bridge(&bindings);
    log::debug!("test bridge installed as window.{BRIDGE_GLOBAL}");
    Some(bindings)
}
