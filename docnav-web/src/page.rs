//! [`Page`] over the live DOM.
use docnav_core::constants::{PRESS_ANIMATION_MS, PRESS_TRANSFORM};
use docnav_core::{Heading, Page, PageConfig, SectionBox, TocEntry, Viewport};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, NodeList, ScrollBehavior, ScrollToOptions, Window,
};

use crate::dom;
use crate::error::DomError;

/// Live page: required elements are resolved once, optional ones on demand.
pub struct DomPage {
    window: Window,
    document: Document,
    config: PageConfig,
    content_area: Element,
    toc_container: Element,
    theme_toggle: Element,
    sidebar: Element,
    prev_button: Element,
    next_button: Element,
    toc_links: Vec<Element>,
    overlay: Option<Element>,
}

impl DomPage {
    /// Resolve the required page elements.
    ///
    /// # Errors
    /// Returns [`DomError::MissingElement`] naming the first required element not found.
    pub fn new(config: PageConfig) -> Result<Self, DomError> {
        let window = dom::window().ok_or_else(|| DomError::MissingElement("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| DomError::MissingElement("document".into()))?;
        Ok(Self {
            content_area: dom::require_by_id(&document, &config.content_area_id)?,
            toc_container: dom::require_by_id(&document, &config.toc_id)?,
            theme_toggle: dom::require_by_id(&document, &config.theme_toggle_id)?,
            sidebar: dom::require_by_id(&document, &config.sidebar_id)?,
            prev_button: dom::require_by_id(&document, &config.prev_chapter_id)?,
            next_button: dom::require_by_id(&document, &config.next_chapter_id)?,
            toc_links: Vec::new(),
            overlay: None,
            window,
            document,
            config,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &PageConfig {
        &self.config
    }

    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Anchors generated by [`Page::append_toc`], in order.
    #[must_use]
    pub fn toc_links(&self) -> &[Element] {
        &self.toc_links
    }

    /// Overlay created by the last sidebar open, if it is still attached.
    #[must_use]
    pub fn overlay(&self) -> Option<&Element> {
        self.overlay.as_ref().filter(|el| el.is_connected())
    }

    fn get_started(&self) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(&self.config.get_started_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn elements(list: &NodeList) -> Vec<Element> {
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn headings_list(&self) -> Result<Vec<Element>, DomError> {
        Ok(Self::elements(&self.content_area.query_selector_all("h2")?))
    }

    /// Closest ancestor of `el` that scrolls on its own, stopping below `<body>`.
    fn scroll_container_of(&self, el: &Element) -> Option<Element> {
        let body = self.document.body().map(Element::from);
        let mut current = el.parent_element();
        while let Some(candidate) = current {
            if body.as_ref() == Some(&candidate) {
                return None;
            }
            if self.scrolls_vertically(&candidate)
                && candidate.scroll_height() > candidate.client_height()
            {
                return Some(candidate);
            }
            current = candidate.parent_element();
        }
        None
    }

    /// Overflowing content alone does not make a box scrollable; `overflow-y` must allow it.
    fn scrolls_vertically(&self, el: &Element) -> bool {
        self.window
            .get_computed_style(el)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("overflow-y").ok())
            .is_some_and(|overflow| matches!(overflow.as_str(), "auto" | "scroll" | "overlay"))
    }

    /// Scroll `link` to the nearest edge of its own scroll container only.
    fn reveal_in_container(&self, link: &Element) {
        let Some(container) = self.scroll_container_of(link) else {
            return;
        };
        let link_rect = link.get_bounding_client_rect();
        let box_rect = container.get_bounding_client_rect();
        let delta = if link_rect.top() < box_rect.top() {
            link_rect.top() - box_rect.top()
        } else if link_rect.bottom() > box_rect.bottom() {
            link_rect.bottom() - box_rect.bottom()
        } else {
            return;
        };
        let opts = ScrollToOptions::new();
        opts.set_top(delta);
        opts.set_behavior(ScrollBehavior::Smooth);
        container.scroll_by_with_scroll_to_options(&opts);
    }
}

fn non_empty_id(el: &Element) -> Option<String> {
    let id = el.id();
    (!id.is_empty()).then_some(id)
}

fn offset_top(el: &Element) -> f64 {
    el.dyn_ref::<HtmlElement>()
        .map_or(0.0, |html| f64::from(html.offset_top()))
}

impl Page for DomPage {
    type Error = DomError;

    fn headings(&self) -> Result<Vec<Heading>, Self::Error> {
        Ok(self
            .headings_list()?
            .iter()
            .map(|el| Heading {
                id: non_empty_id(el),
                text: el.text_content().unwrap_or_default(),
            })
            .collect())
    }

    fn set_heading_id(&mut self, index: usize, id: &str) -> Result<(), Self::Error> {
        let heading = self
            .headings_list()?
            .into_iter()
            .nth(index)
            .ok_or_else(|| DomError::MissingElement(format!("h2 #{index}")))?;
        heading.set_id(id);
        Ok(())
    }

    fn append_toc(&mut self, entries: &[TocEntry]) -> Result<(), Self::Error> {
        let list = self.document.create_element("ul")?;
        let mut links = Vec::with_capacity(entries.len());
        for entry in entries {
            let item = self.document.create_element("li")?;
            let link = self.document.create_element("a")?;
            link.set_attribute("href", &entry.href())?;
            link.set_text_content(Some(&entry.label));
            item.append_child(&link)?;
            list.append_child(&item)?;
            links.push(link);
        }
        self.toc_container.append_child(&list)?;
        self.toc_links = links;
        Ok(())
    }

    fn toggle_dark_marker(&mut self) -> Result<(), Self::Error> {
        dom::body(&self.document)?
            .class_list()
            .toggle(&self.config.dark_mode_class)?;
        Ok(())
    }

    fn add_dark_marker(&mut self) -> Result<(), Self::Error> {
        dom::body(&self.document)?
            .class_list()
            .add_1(&self.config.dark_mode_class)?;
        Ok(())
    }

    fn has_dark_marker(&self) -> Result<bool, Self::Error> {
        Ok(dom::body(&self.document)?
            .class_list()
            .contains(&self.config.dark_mode_class))
    }

    fn set_theme_glyph(&mut self, glyph: &str) -> Result<(), Self::Error> {
        self.theme_toggle.set_text_content(Some(glyph));
        Ok(())
    }

    fn set_body_font_size(&mut self, css_value: &str) -> Result<(), Self::Error> {
        dom::body(&self.document)?
            .style()
            .set_property("font-size", css_value)?;
        Ok(())
    }

    fn sidebar_open(&self) -> Result<bool, Self::Error> {
        Ok(self
            .sidebar
            .class_list()
            .contains(&self.config.sidebar_open_class))
    }

    fn set_sidebar_open(&mut self, open: bool) -> Result<(), Self::Error> {
        let classes = self.sidebar.class_list();
        if open {
            classes.add_1(&self.config.sidebar_open_class)?;
        } else {
            classes.remove_1(&self.config.sidebar_open_class)?;
        }
        Ok(())
    }

    fn create_overlay(&mut self) -> Result<(), Self::Error> {
        let overlay = self.document.create_element("div")?;
        overlay.class_list().add_1(&self.config.overlay_class)?;
        dom::body(&self.document)?.append_child(&overlay)?;
        self.overlay = Some(overlay);
        Ok(())
    }

    fn remove_overlay(&mut self) -> Result<(), Self::Error> {
        if let Some(existing) = self
            .document
            .query_selector(&self.config.overlay_selector())?
        {
            existing.remove();
            if self.overlay.as_ref() == Some(&existing) {
                self.overlay = None;
            }
        }
        Ok(())
    }

    fn overlay_present(&self) -> Result<bool, Self::Error> {
        Ok(self
            .document
            .query_selector(&self.config.overlay_selector())?
            .is_some())
    }

    fn sections(&self) -> Result<Vec<SectionBox>, Self::Error> {
        let list = self.content_area.query_selector_all("section")?;
        Ok(Self::elements(&list)
            .iter()
            .map(|el| SectionBox {
                id: non_empty_id(el),
                viewport_top: el.get_bounding_client_rect().top(),
                offset_top: offset_top(el),
            })
            .collect())
    }

    fn viewport(&self) -> Viewport {
        let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
        };
        Viewport {
            width: dimension(self.window.inner_width()),
            height: dimension(self.window.inner_height()),
        }
    }

    fn element_offset_top(&self, id: &str) -> Result<Option<f64>, Self::Error> {
        Ok(self.document.get_element_by_id(id).map(|el| offset_top(&el)))
    }

    fn set_chapter_controls(
        &mut self,
        prev_disabled: bool,
        next_disabled: bool,
    ) -> Result<(), Self::Error> {
        self.prev_button
            .toggle_attribute_with_force("disabled", prev_disabled)?;
        self.next_button
            .toggle_attribute_with_force("disabled", next_disabled)?;
        Ok(())
    }

    fn set_active_toc_link(&mut self, index: Option<usize>) -> Result<(), Self::Error> {
        let class = &self.config.toc_active_class;
        for link in &self.toc_links {
            link.class_list().remove_1(class)?;
        }
        if let Some(link) = index.and_then(|i| self.toc_links.get(i)) {
            link.class_list().add_1(class)?;
            self.reveal_in_container(link);
        }
        Ok(())
    }

    fn scroll_to(&mut self, top: f64) {
        let opts = ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&opts);
    }

    fn has_get_started(&self) -> bool {
        self.get_started().is_some()
    }

    fn press_get_started(&mut self) -> Result<(), Self::Error> {
        let Some(button) = self.get_started() else {
            return Ok(());
        };
        let style = button.style();
        style.set_property("transform", PRESS_TRANSFORM)?;
        wasm_bindgen_futures::spawn_local(async move {
            if dom::sleep_ms(PRESS_ANIMATION_MS).await.is_ok() {
                let _ = style.set_property("transform", "");
            }
        });
        Ok(())
    }
}
