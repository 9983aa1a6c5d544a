use docnav_web::dom;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub const SECTION_HEIGHT_PX: u32 = 1500;
/// Short enough that a TOC of twenty chapters overflows it.
pub const SIDEBAR_HEIGHT_PX: u32 = 200;

/// Replace the body with a documentation page of the given chapter titles.
/// Sections are given ids `section-<i>`; headings get none.
pub fn render_page(titles: &[&str], with_get_started: bool) -> Document {
    let doc = dom::document().expect("document");
    let body = doc.body().expect("body");
    let sections: String = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            format!(
                "<section id=\"section-{i}\"><h2>{title}</h2>\
                 <div style=\"height:{SECTION_HEIGHT_PX}px\"></div></section>"
            )
        })
        .collect();
    let get_started = if with_get_started {
        "<button id=\"get-started-btn\">Get started</button>"
    } else {
        ""
    };
    body.set_inner_html(&format!(
        "<header>\
           <button id=\"mobile-menu-toggle\">menu</button>\
           <button id=\"theme-toggle\"></button>\
           <button id=\"font-decrease\">A-</button>\
           <button id=\"font-increase\">A+</button>\
         </header>\
         <nav id=\"sidebar\" style=\"height:{SIDEBAR_HEIGHT_PX}px;overflow-y:auto\">\
           <div id=\"toc\"></div>\
         </nav>\
         {get_started}\
         <main id=\"content-area\">{sections}</main>\
         <footer>\
           <button id=\"prev-chapter\">prev</button>\
           <button id=\"next-chapter\">next</button>\
         </footer>"
    ));
    let _ = body.remove_attribute("data-docnav-config");
    let _ = body.class_list().remove_1("dark-mode");
    let _ = body.style().remove_property("font-size");
    let _ = doc
        .document_element()
        .expect("html element")
        .set_scroll_top(0);
    doc
}

/// `Chapter 0` through `Chapter {count - 1}`.
pub fn chapter_titles(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Chapter {i}")).collect()
}

pub fn clear_preferences() {
    let storage = dom::local_storage().expect("localStorage");
    let _ = storage.remove_item("theme");
    let _ = storage.remove_item("fontSize");
}

pub fn by_id(doc: &Document, id: &str) -> Element {
    doc.get_element_by_id(id)
        .unwrap_or_else(|| panic!("#{id} present"))
}

pub fn click(doc: &Document, id: &str) {
    by_id(doc, id)
        .dyn_into::<HtmlElement>()
        .expect("html element")
        .click();
}

pub fn toc_links(doc: &Document) -> Vec<Element> {
    let list = doc.query_selector_all("#toc ul li a").expect("query toc");
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub fn overlay_count(doc: &Document) -> u32 {
    doc.query_selector_all(".sidebar-overlay")
        .expect("query overlays")
        .length()
}
