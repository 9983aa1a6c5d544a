use docnav_core::PageConfig;
use docnav_core::constants::{GLYPH_BULB, GLYPH_SUN};
use docnav_web::app::{config_from_document, mount};
use docnav_web::{bridge, dom};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use super::fixture::{by_id, clear_preferences, click, overlay_count, render_page, toc_links};

#[wasm_bindgen_test]
fn mount_builds_toc_and_assigns_heading_ids() {
    clear_preferences();
    let doc = render_page(&["Alpha", "Beta", "Gamma"], false);
    let _mounted = mount(PageConfig::default()).expect("mount");

    let links = toc_links(&doc);
    assert_eq!(links.len(), 3);
    let labels: Vec<_> = links
        .iter()
        .map(|a| a.text_content().unwrap_or_default())
        .collect();
    assert_eq!(labels, ["Alpha", "Beta", "Gamma"]);
    assert_eq!(
        links[1].get_attribute("href").as_deref(),
        Some("#section-1")
    );

    let headings = doc.query_selector_all("#content-area h2").expect("h2");
    assert_eq!(headings.length(), 3);
    assert_eq!(
        doc.query_selector_all("#toc ul").expect("lists").length(),
        1,
        "toc list appended once"
    );
}

#[wasm_bindgen_test]
fn defaults_without_stored_preferences() {
    clear_preferences();
    let doc = render_page(&["Alpha"], false);
    let mounted = mount(PageConfig::default()).expect("mount");

    let body = doc.body().expect("body");
    assert!(!body.class_list().contains("dark-mode"));
    assert_eq!(
        by_id(&doc, "theme-toggle").text_content().as_deref(),
        Some(GLYPH_BULB)
    );
    assert_eq!(body.style().get_property_value("font-size").unwrap(), "");
    let snapshot = mounted.controller().borrow().snapshot().expect("snapshot");
    assert_eq!(snapshot.font_size_px, 16);
}

#[wasm_bindgen_test]
fn theme_toggle_persists_and_restores() {
    clear_preferences();
    let doc = render_page(&["Alpha"], false);
    let _mounted = mount(PageConfig::default()).expect("mount");
    let storage = dom::local_storage().expect("storage");
    let body = doc.body().expect("body");

    click(&doc, "theme-toggle");
    assert!(body.class_list().contains("dark-mode"));
    assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(
        by_id(&doc, "theme-toggle").text_content().as_deref(),
        Some(GLYPH_SUN)
    );

    click(&doc, "theme-toggle");
    assert!(!body.class_list().contains("dark-mode"));
    assert_eq!(storage.get_item("theme").unwrap().as_deref(), Some("light"));
    assert_eq!(
        by_id(&doc, "theme-toggle").text_content().as_deref(),
        Some(GLYPH_BULB)
    );
}

#[wasm_bindgen_test]
fn stored_preferences_apply_on_mount() {
    clear_preferences();
    let storage = dom::local_storage().expect("storage");
    storage.set_item("theme", "dark").unwrap();
    storage.set_item("fontSize", "19").unwrap();
    let doc = render_page(&["Alpha"], false);
    let _mounted = mount(PageConfig::default()).expect("mount");

    let body = doc.body().expect("body");
    assert!(body.class_list().contains("dark-mode"));
    assert_eq!(body.style().get_property_value("font-size").unwrap(), "19px");
    clear_preferences();
}

#[wasm_bindgen_test]
fn font_buttons_clamp_and_persist() {
    clear_preferences();
    let doc = render_page(&["Alpha"], false);
    let _mounted = mount(PageConfig::default()).expect("mount");
    let body = doc.body().expect("body");

    for _ in 0..8 {
        click(&doc, "font-increase");
    }
    assert_eq!(body.style().get_property_value("font-size").unwrap(), "20px");
    for _ in 0..8 {
        click(&doc, "font-decrease");
    }
    assert_eq!(body.style().get_property_value("font-size").unwrap(), "14px");
    let storage = dom::local_storage().expect("storage");
    assert_eq!(storage.get_item("fontSize").unwrap().as_deref(), Some("14"));
}

#[wasm_bindgen_test]
fn sidebar_overlay_lifecycle() {
    clear_preferences();
    let doc = render_page(&["Alpha"], false);
    let _mounted = mount(PageConfig::default()).expect("mount");
    let sidebar = by_id(&doc, "sidebar");

    click(&doc, "mobile-menu-toggle");
    assert!(sidebar.class_list().contains("active"));
    assert_eq!(overlay_count(&doc), 1);

    let overlay = doc
        .query_selector(".sidebar-overlay")
        .unwrap()
        .expect("overlay present");
    wasm_bindgen::JsCast::dyn_into::<web_sys::HtmlElement>(overlay)
        .expect("html overlay")
        .click();
    assert!(!sidebar.class_list().contains("active"));
    assert_eq!(overlay_count(&doc), 0);

    click(&doc, "mobile-menu-toggle");
    click(&doc, "mobile-menu-toggle");
    assert!(!sidebar.class_list().contains("active"));
    assert_eq!(overlay_count(&doc), 0);
}

#[wasm_bindgen_test]
fn stale_sidebar_state_is_reset_on_mount() {
    clear_preferences();
    let doc = render_page(&["Alpha"], false);
    let sidebar = by_id(&doc, "sidebar");
    sidebar.class_list().add_1("active").unwrap();
    let stray = doc.create_element("div").unwrap();
    stray.class_list().add_1("sidebar-overlay").unwrap();
    doc.body().unwrap().append_child(&stray).unwrap();

    let _mounted = mount(PageConfig::default()).expect("mount");
    assert!(!sidebar.class_list().contains("active"));
    assert_eq!(overlay_count(&doc), 0);
}

#[wasm_bindgen_test]
fn missing_required_element_fails_mount() {
    clear_preferences();
    let doc = render_page(&["Alpha"], false);
    by_id(&doc, "toc").remove();
    let err = mount(PageConfig::default()).err().expect("mount fails");
    assert!(err.to_string().contains("toc"));
}

#[wasm_bindgen_test]
fn bridge_absent_outside_test_mode() {
    clear_preferences();
    let _doc = render_page(&["Alpha"], false);
    let _mounted = mount(PageConfig::default()).expect("mount");
    assert!(!bridge::test_mode_enabled());
    let window = dom::window().expect("window");
    let installed =
        js_sys::Reflect::has(&window, &JsValue::from_str(bridge::BRIDGE_GLOBAL)).unwrap();
    assert!(!installed);
}

#[wasm_bindgen_test]
fn body_attribute_overrides_config() {
    clear_preferences();
    let doc = render_page(&["Alpha", "Beta"], false);
    let body = doc.body().unwrap();
    body.set_attribute("data-docnav-config", r#"{"darkModeClass":"night"}"#)
        .unwrap();

    let config = config_from_document(&doc);
    assert_eq!(config.dark_mode_class, "night");
    assert_eq!(config.toc_id, "toc");

    let _mounted = mount(config).expect("mount");
    click(&doc, "theme-toggle");
    assert!(body.class_list().contains("night"));
    assert!(!body.class_list().contains("dark-mode"));
}

#[wasm_bindgen_test]
fn invalid_config_attribute_falls_back_to_defaults() {
    let doc = render_page(&["Alpha"], false);
    doc.body()
        .unwrap()
        .set_attribute("data-docnav-config", "{not json")
        .unwrap();
    assert_eq!(config_from_document(&doc), PageConfig::default());
}
