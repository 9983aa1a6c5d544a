use docnav_core::{Page, PageConfig, header_offset, scroll_target};
use docnav_web::app::{Mounted, mount};
use docnav_web::dom;
use wasm_bindgen_test::*;
use web_sys::{Document, Event, HtmlElement, Window};

use super::fixture::{
    by_id, chapter_titles, clear_preferences, click, render_page, toc_links,
};

const POLL_MS: i32 = 50;
const POLL_LIMIT: usize = 60;

fn section_offset(mounted: &Mounted, index: usize) -> f64 {
    mounted
        .controller()
        .borrow()
        .page()
        .sections()
        .expect("sections")[index]
        .offset_top
}

fn fire(window: &Window, kind: &str) {
    let event = Event::new(kind).expect("event");
    window.dispatch_event(&event).expect("dispatch");
}

/// Jump instantly, then let the window scroll listener react.
fn scroll_section_near_top(mounted: &Mounted, index: usize) {
    let y = section_offset(mounted, index) - 10.0;
    let window = dom::window().expect("window");
    window.scroll_to_with_x_and_y(0.0, y);
    fire(&window, "scroll");
}

/// Polls until `done` holds; smooth scrolls finish over several frames.
async fn eventually(mut done: impl FnMut() -> bool) -> bool {
    for _ in 0..POLL_LIMIT {
        if done() {
            return true;
        }
        dom::sleep_ms(POLL_MS).await.expect("sleep");
    }
    done()
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().expect("scrollY")
}

fn current_section(mounted: &Mounted) -> Option<usize> {
    mounted.controller().borrow().nav().map(|n| n.current)
}

fn disabled(doc: &Document, id: &str) -> bool {
    by_id(doc, id).has_attribute("disabled")
}

fn active_link_indexes(doc: &Document) -> Vec<usize> {
    toc_links(doc)
        .iter()
        .enumerate()
        .filter_map(|(i, a)| a.class_list().contains("active").then_some(i))
        .collect()
}

#[wasm_bindgen_test]
fn first_section_is_current_at_top_of_page() {
    clear_preferences();
    let doc = render_page(&["Alpha", "Beta", "Gamma"], false);
    let mounted = mount(PageConfig::default()).expect("mount");

    assert_eq!(current_section(&mounted), Some(0));
    assert!(disabled(&doc, "prev-chapter"));
    assert!(!disabled(&doc, "next-chapter"));
    assert_eq!(active_link_indexes(&doc), vec![0]);
}

#[wasm_bindgen_test]
fn scrolling_to_middle_section_enables_both_controls() {
    clear_preferences();
    let doc = render_page(&["Alpha", "Beta", "Gamma"], false);
    let mounted = mount(PageConfig::default()).expect("mount");

    scroll_section_near_top(&mounted, 1);
    let nav = mounted.controller().borrow().nav().expect("nav");
    assert_eq!((nav.prev, nav.current, nav.next), (Some(0), 1, Some(2)));
    assert!(!disabled(&doc, "prev-chapter"));
    assert!(!disabled(&doc, "next-chapter"));
    assert_eq!(active_link_indexes(&doc), vec![1]);

    scroll_section_near_top(&mounted, 2);
    assert!(!disabled(&doc, "prev-chapter"));
    assert!(disabled(&doc, "next-chapter"));
    assert_eq!(active_link_indexes(&doc), vec![2]);
}

#[wasm_bindgen_test]
fn toc_link_click_does_not_change_location_hash() {
    clear_preferences();
    let doc = render_page(&["Alpha", "Beta"], false);
    let _mounted = mount(PageConfig::default()).expect("mount");
    let window = dom::window().expect("window");
    let before = window.location().hash().unwrap_or_default();

    let link = toc_links(&doc).pop().expect("link");
    wasm_bindgen::JsCast::dyn_into::<HtmlElement>(link)
        .expect("anchor")
        .click();
    assert_eq!(window.location().hash().unwrap_or_default(), before);
}

#[wasm_bindgen_test]
fn get_started_plays_press_animation() {
    clear_preferences();
    let doc = render_page(&["Alpha", "Beta"], true);
    let _mounted = mount(PageConfig::default()).expect("mount");

    click(&doc, "get-started-btn");
    let button: HtmlElement = wasm_bindgen::JsCast::dyn_into(by_id(&doc, "get-started-btn"))
        .expect("button");
    assert_eq!(
        button.style().get_property_value("transform").unwrap(),
        "scale(0.95)"
    );
}

#[wasm_bindgen_test]
async fn scroll_event_reveals_active_link_inside_sidebar_only() {
    clear_preferences();
    let titles = chapter_titles(20);
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let doc = render_page(&titles, false);
    let mounted = mount(PageConfig::default()).expect("mount");
    let window = dom::window().expect("window");
    let sidebar = by_id(&doc, "sidebar");
    assert!(sidebar.scroll_height() > sidebar.client_height(), "toc overflows");
    assert_eq!(sidebar.scroll_top(), 0);

    scroll_section_near_top(&mounted, 19);
    let page_y = scroll_y(&window);
    assert_eq!(active_link_indexes(&doc), vec![19]);

    assert!(
        eventually(|| sidebar.scroll_top() > 0).await,
        "sidebar never scrolled the last link into view"
    );
    assert_eq!(scroll_y(&window), page_y, "revealing a link moved the page");
}

#[wasm_bindgen_test]
async fn reveal_skips_boxes_that_overflow_without_scrolling() {
    clear_preferences();
    let titles = chapter_titles(20);
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();
    let doc = render_page(&titles, false);
    let toc: HtmlElement =
        wasm_bindgen::JsCast::dyn_into(by_id(&doc, "toc")).expect("toc element");
    toc.style().set_property("height", "40px").expect("toc height");
    let mounted = mount(PageConfig::default()).expect("mount");
    assert!(toc.scroll_height() > toc.client_height(), "toc overflows visibly");

    scroll_section_near_top(&mounted, 19);
    let sidebar = by_id(&doc, "sidebar");
    assert!(
        eventually(|| sidebar.scroll_top() > 0).await,
        "reveal stopped at the non-scrolling toc box"
    );
    assert_eq!(toc.scroll_top(), 0);
}

#[wasm_bindgen_test]
async fn next_chapter_scrolls_below_the_header() {
    clear_preferences();
    let doc = render_page(&["Alpha", "Beta", "Gamma"], false);
    let mounted = mount(PageConfig::default()).expect("mount");
    let window = dom::window().expect("window");
    assert_eq!(scroll_y(&window), 0.0);

    let width = window.inner_width().ok().and_then(|w| w.as_f64()).expect("width");
    let height = window.inner_height().ok().and_then(|h| h.as_f64()).expect("height");
    let root = doc.document_element().expect("html element");
    let max_scroll = f64::from(root.scroll_height()) - height;
    let expected = scroll_target(section_offset(&mounted, 1), header_offset(width)).min(max_scroll);

    click(&doc, "next-chapter");
    assert!(
        eventually(|| (scroll_y(&window) - expected).abs() <= 1.0).await,
        "scrollY {} never reached {expected}",
        scroll_y(&window)
    );
}

#[wasm_bindgen_test]
fn resize_refreshes_navigation_state() {
    clear_preferences();
    let doc = render_page(&["Alpha", "Beta", "Gamma"], false);
    let mounted = mount(PageConfig::default()).expect("mount");
    let window = dom::window().expect("window");

    window.scroll_to_with_x_and_y(0.0, section_offset(&mounted, 1) - 10.0);
    assert_eq!(current_section(&mounted), Some(0), "no event yet");
    assert!(disabled(&doc, "prev-chapter"));

    fire(&window, "resize");
    assert_eq!(current_section(&mounted), Some(1));
    assert!(!disabled(&doc, "prev-chapter"));
    assert!(!disabled(&doc, "next-chapter"));
    assert_eq!(active_link_indexes(&doc), vec![1]);
}
