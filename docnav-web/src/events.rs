//! Turns the declarative binding table into DOM listeners.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use docnav_core::{Binding, PageController, Target};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

use crate::error::DomError;
use crate::page::DomPage;
use crate::storage::LocalPreferenceStore;

pub type WebController = PageController<DomPage, LocalPreferenceStore>;
pub type SharedController = Rc<RefCell<WebController>>;

/// A registered listener; removed from its target when dropped.
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.callback.as_ref().unchecked_ref(),
        );
    }
}

/// Every listener installed for one controller.
pub struct EventRegistry {
    controller: SharedController,
    listeners: RefCell<Vec<Listener>>,
}

impl EventRegistry {
    #[must_use]
    pub fn new(controller: SharedController) -> Rc<Self> {
        Rc::new(Self {
            controller,
            listeners: RefCell::new(Vec::new()),
        })
    }

    #[must_use]
    pub fn controller(&self) -> &SharedController {
        &self.controller
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Install every binding in `bindings`.
    ///
    /// # Errors
    /// Returns [`DomError::MissingElement`] when a required control is absent.
    pub fn install(self: &Rc<Self>, bindings: &[Binding]) -> Result<(), DomError> {
        for binding in bindings {
            self.install_one(*binding)?;
        }
        Ok(())
    }

    fn install_one(self: &Rc<Self>, binding: Binding) -> Result<(), DomError> {
        let Some(target) = self.resolve(binding.target)? else {
            log::debug!("optional target {:?} absent; skipping", binding.target);
            return Ok(());
        };
        let registry = Rc::downgrade(self);
        let action = binding.action;
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if action.prevents_default() {
                event.prevent_default();
            }
            dispatch(&registry, action);
        });
        let event = binding.event.dom_name();
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        let mut listeners = self.listeners.borrow_mut();
        // Drop listeners on elements that have since been removed (closed overlays).
        listeners.retain(|l| {
            l.target
                .dyn_ref::<web_sys::Node>()
                .is_none_or(web_sys::Node::is_connected)
        });
        listeners.push(Listener {
            target,
            event,
            callback,
        });
        Ok(())
    }

    fn resolve(&self, target: Target) -> Result<Option<EventTarget>, DomError> {
        let controller = self.controller.borrow();
        let page = controller.page();
        let cfg = page.config();
        let by_id = |id: &str| page.document().get_element_by_id(id);
        let required = |id: &str| {
            by_id(id)
                .map(|el| Some(EventTarget::from(el)))
                .ok_or_else(|| DomError::MissingElement(id.to_string()))
        };
        match target {
            Target::Window => Ok(Some(EventTarget::from(page.window().clone()))),
            Target::ThemeToggle => required(&cfg.theme_toggle_id),
            Target::FontIncrease => required(&cfg.font_increase_id),
            Target::FontDecrease => required(&cfg.font_decrease_id),
            Target::MenuToggle => required(&cfg.menu_toggle_id),
            Target::PrevChapter => required(&cfg.prev_chapter_id),
            Target::NextChapter => required(&cfg.next_chapter_id),
            Target::GetStarted => Ok(by_id(&cfg.get_started_id).map(EventTarget::from)),
            Target::Overlay => Ok(page.overlay().cloned().map(EventTarget::from)),
            Target::TocLink(i) => Ok(page.toc_links().get(i).cloned().map(EventTarget::from)),
        }
    }
}

fn dispatch(registry: &Weak<EventRegistry>, action: docnav_core::Action) {
    let Some(registry) = registry.upgrade() else {
        return;
    };
    let result = match registry.controller.try_borrow_mut() {
        Ok(mut controller) => controller.dispatch(action),
        Err(_) => {
            log::warn!("dropping {action:?}: controller busy");
            return;
        }
    };
    match result {
        Ok(new_bindings) => {
            if let Err(err) = registry.install(&new_bindings) {
                log::error!("binding after {action:?} failed: {err}");
            }
        }
        Err(err) => log::error!("{action:?} failed: {err}"),
    }
}
