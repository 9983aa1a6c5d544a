//! Startup: build the controller once the document is ready and keep it alive.
use std::cell::RefCell;
use std::rc::Rc;

use docnav_core::{ControllerError, PageConfig, PageController, static_bindings, toc_bindings};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use crate::bridge::{self, BridgeBindings};
use crate::dom;
use crate::error::DomError;
use crate::events::{EventRegistry, SharedController};
use crate::page::DomPage;
use crate::storage::LocalPreferenceStore;

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error(transparent)]
    Dom(#[from] DomError),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

/// A running page controller with its listeners.
pub struct Mounted {
    registry: Rc<EventRegistry>,
    _bridge: Option<BridgeBindings>,
}

impl Mounted {
    #[must_use]
    pub fn controller(&self) -> &SharedController {
        self.registry.controller()
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

/// Initialize the controller against the current document and wire its events.
///
/// # Errors
/// Returns an error if a required element is missing or startup fails.
pub fn mount(config: PageConfig) -> Result<Mounted, BootError> {
    let page = DomPage::new(config)?;
    let mut controller = PageController::new(page, LocalPreferenceStore);
    controller.init()?;
    let toc_len = controller.toc().entries().len();

    let registry = EventRegistry::new(Rc::new(RefCell::new(controller)));
    registry.install(&static_bindings())?;
    registry.install(&toc_bindings(toc_len))?;
    let bridge = bridge::install(&Rc::downgrade(&registry));
    log::debug!("docnav mounted with {} listeners", registry.listener_count());
    Ok(Mounted {
        registry,
        _bridge: bridge,
    })
}

/// Body attribute carrying a JSON [`PageConfig`] override.
pub const CONFIG_ATTRIBUTE: &str = "data-docnav-config";

/// Config from the body's `data-docnav-config`, falling back to the defaults.
#[must_use]
pub fn config_from_document(document: &web_sys::Document) -> PageConfig {
    let Some(raw) = document
        .body()
        .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE))
    else {
        return PageConfig::default();
    };
    PageConfig::from_json(&raw).unwrap_or_else(|err| {
        log::warn!("ignoring invalid {CONFIG_ATTRIBUTE}: {err}");
        PageConfig::default()
    })
}

fn mount_global() {
    let config = dom::document()
        .map(|document| config_from_document(&document))
        .unwrap_or_default();
    match mount(config) {
        Ok(mounted) => MOUNTED.with(|slot| {
            *slot.borrow_mut() = Some(mounted);
        }),
        Err(err) => dom::console_error(&format!("docnav failed to start: {err}")),
    }
}

/// Mount now if the document is parsed, otherwise on `DOMContentLoaded`.
pub fn run_when_ready() {
    let Some(document) = dom::document() else {
        dom::console_error("docnav: no document available");
        return;
    };
    if document.ready_state() != "loading" {
        mount_global();
        return;
    }
    let on_ready = Closure::once(mount_global);
    if let Err(err) = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        dom::console_error(&dom::js_error_message(&err));
        return;
    }
    on_ready.forget();
}
