//! In-memory page model for exercising the controller without a browser.
//!
//! [`ScriptedPage`] lays sections out top to bottom and tracks a window scroll
//! offset, so viewport-relative positions change as the page "scrolls".

use crate::page::{Page, SectionBox, Viewport};
use crate::toc::{Heading, TocEntry};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptedPageError {
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("no heading at index {0}")]
    NoHeading(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedSection {
    pub id: Option<String>,
    pub heading: Heading,
    pub height: f64,
}

impl ScriptedSection {
    #[must_use]
    pub fn new(id: Option<&str>, heading: Heading, height: f64) -> Self {
        Self {
            id: id.map(str::to_string),
            heading,
            height,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocLink {
    pub entry: TocEntry,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct ScriptedPage {
    sections: Vec<ScriptedSection>,
    content_top: f64,
    viewport: Viewport,
    scroll_y: f64,
    toc_present: bool,
    toc_lists: Vec<Vec<TocLink>>,
    dark_marker: bool,
    theme_glyph: String,
    body_font_size: Option<String>,
    sidebar_open: bool,
    overlays: usize,
    prev_disabled: bool,
    next_disabled: bool,
    revealed_links: Vec<usize>,
    scroll_requests: Vec<f64>,
    get_started: bool,
    presses: usize,
}

impl Default for ScriptedPage {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            content_top: 0.0,
            viewport: Viewport {
                width: 1280.0,
                height: 800.0,
            },
            scroll_y: 0.0,
            toc_present: true,
            toc_lists: Vec::new(),
            dark_marker: false,
            theme_glyph: String::new(),
            body_font_size: None,
            sidebar_open: false,
            overlays: 0,
            prev_disabled: false,
            next_disabled: false,
            revealed_links: Vec::new(),
            scroll_requests: Vec::new(),
            get_started: false,
            presses: 0,
        }
    }
}

impl ScriptedPage {
    #[must_use]
    pub fn new(sections: Vec<ScriptedSection>) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    /// Equal-height chapters whose section ids line up with the positional
    /// ids their id-less headings will receive (`section-<i>`).
    #[must_use]
    pub fn chapters(titles: &[&str], section_height: f64) -> Self {
        Self::new(
            titles
                .iter()
                .enumerate()
                .map(|(i, title)| {
                    ScriptedSection::new(
                        Some(&crate::toc::fallback_id(i)),
                        Heading::new(None, *title),
                        section_height,
                    )
                })
                .collect(),
        )
    }

    #[must_use]
    pub const fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    /// Vertical space above the first section (hero banner, header).
    #[must_use]
    pub const fn with_content_top(mut self, top: f64) -> Self {
        self.content_top = top;
        self
    }

    #[must_use]
    pub const fn with_get_started(mut self) -> Self {
        self.get_started = true;
        self
    }

    #[must_use]
    pub const fn without_toc_container(mut self) -> Self {
        self.toc_present = false;
        self
    }

    /// Leftover state from a previous visit: sidebar marked open and a stray overlay.
    #[must_use]
    pub const fn with_stale_sidebar(mut self) -> Self {
        self.sidebar_open = true;
        self.overlays = 1;
        self
    }

    /// Simulate the user scrolling; the controller still needs an update dispatch.
    pub fn scroll_window_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    /// Scroll so that section `index`'s top edge sits at `viewport_y`.
    pub fn place_section_at(&mut self, index: usize, viewport_y: f64) {
        let offset = self.section_offset(index);
        self.scroll_y = offset - viewport_y;
    }

    #[must_use]
    pub fn section_offset(&self, index: usize) -> f64 {
        self.content_top + self.sections[..index].iter().map(|s| s.height).sum::<f64>()
    }

    fn document_height(&self) -> f64 {
        self.content_top + self.sections.iter().map(|s| s.height).sum::<f64>()
    }

    fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    #[must_use]
    pub const fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    #[must_use]
    pub fn scroll_requests(&self) -> &[f64] {
        &self.scroll_requests
    }

    #[must_use]
    pub fn heading_ids(&self) -> Vec<Option<String>> {
        self.sections.iter().map(|s| s.heading.id.clone()).collect()
    }

    /// Every list appended to the TOC container.
    #[must_use]
    pub fn toc_lists(&self) -> &[Vec<TocLink>] {
        &self.toc_lists
    }

    #[must_use]
    pub fn toc_links(&self) -> &[TocLink] {
        self.toc_lists.first().map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn active_links(&self) -> Vec<usize> {
        self.toc_links()
            .iter()
            .enumerate()
            .filter_map(|(i, l)| l.active.then_some(i))
            .collect()
    }

    #[must_use]
    pub fn revealed_links(&self) -> &[usize] {
        &self.revealed_links
    }

    #[must_use]
    pub const fn dark_marker(&self) -> bool {
        self.dark_marker
    }

    #[must_use]
    pub fn theme_glyph(&self) -> &str {
        &self.theme_glyph
    }

    #[must_use]
    pub fn body_font_size(&self) -> Option<&str> {
        self.body_font_size.as_deref()
    }

    #[must_use]
    pub const fn is_sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    #[must_use]
    pub const fn overlay_count(&self) -> usize {
        self.overlays
    }

    #[must_use]
    pub const fn chapter_controls(&self) -> (bool, bool) {
        (self.prev_disabled, self.next_disabled)
    }

    #[must_use]
    pub const fn presses(&self) -> usize {
        self.presses
    }
}

impl Page for ScriptedPage {
    type Error = ScriptedPageError;

    fn headings(&self) -> Result<Vec<Heading>, Self::Error> {
        Ok(self.sections.iter().map(|s| s.heading.clone()).collect())
    }

    fn set_heading_id(&mut self, index: usize, id: &str) -> Result<(), Self::Error> {
        let section = self
            .sections
            .get_mut(index)
            .ok_or(ScriptedPageError::NoHeading(index))?;
        section.heading.id = Some(id.to_string());
        Ok(())
    }

    fn append_toc(&mut self, entries: &[TocEntry]) -> Result<(), Self::Error> {
        if !self.toc_present {
            return Err(ScriptedPageError::MissingElement("toc"));
        }
        self.toc_lists.push(
            entries
                .iter()
                .map(|entry| TocLink {
                    entry: entry.clone(),
                    active: false,
                })
                .collect(),
        );
        Ok(())
    }

    fn toggle_dark_marker(&mut self) -> Result<(), Self::Error> {
        self.dark_marker = !self.dark_marker;
        Ok(())
    }

    fn add_dark_marker(&mut self) -> Result<(), Self::Error> {
        self.dark_marker = true;
        Ok(())
    }

    fn has_dark_marker(&self) -> Result<bool, Self::Error> {
        Ok(self.dark_marker)
    }

    fn set_theme_glyph(&mut self, glyph: &str) -> Result<(), Self::Error> {
        glyph.clone_into(&mut self.theme_glyph);
        Ok(())
    }

    fn set_body_font_size(&mut self, css_value: &str) -> Result<(), Self::Error> {
        self.body_font_size = Some(css_value.to_string());
        Ok(())
    }

    fn sidebar_open(&self) -> Result<bool, Self::Error> {
        Ok(self.sidebar_open)
    }

    fn set_sidebar_open(&mut self, open: bool) -> Result<(), Self::Error> {
        self.sidebar_open = open;
        Ok(())
    }

    fn create_overlay(&mut self) -> Result<(), Self::Error> {
        self.overlays += 1;
        Ok(())
    }

    fn remove_overlay(&mut self) -> Result<(), Self::Error> {
        self.overlays = self.overlays.saturating_sub(1);
        Ok(())
    }

    fn overlay_present(&self) -> Result<bool, Self::Error> {
        Ok(self.overlays > 0)
    }

    fn sections(&self) -> Result<Vec<SectionBox>, Self::Error> {
        Ok(self
            .sections
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let offset_top = self.section_offset(i);
                SectionBox {
                    id: s.id.clone(),
                    viewport_top: offset_top - self.scroll_y,
                    offset_top,
                }
            })
            .collect())
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn element_offset_top(&self, id: &str) -> Result<Option<f64>, Self::Error> {
        // Section elements precede their headings in document order.
        Ok(self.sections.iter().enumerate().find_map(|(i, s)| {
            (s.id.as_deref() == Some(id) || s.heading.id.as_deref() == Some(id))
                .then(|| self.section_offset(i))
        }))
    }

    fn set_chapter_controls(
        &mut self,
        prev_disabled: bool,
        next_disabled: bool,
    ) -> Result<(), Self::Error> {
        self.prev_disabled = prev_disabled;
        self.next_disabled = next_disabled;
        Ok(())
    }

    fn set_active_toc_link(&mut self, index: Option<usize>) -> Result<(), Self::Error> {
        let Some(links) = self.toc_lists.first_mut() else {
            return Ok(());
        };
        for link in links.iter_mut() {
            link.active = false;
        }
        if let Some(link) = index.and_then(|i| links.get_mut(i)) {
            link.active = true;
            if let Some(i) = index {
                self.revealed_links.push(i);
            }
        }
        Ok(())
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_requests.push(top);
        self.scroll_y = top.clamp(0.0, self.max_scroll());
    }

    fn has_get_started(&self) -> bool {
        self.get_started
    }

    fn press_get_started(&mut self) -> Result<(), Self::Error> {
        self.presses += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_tops_follow_scroll() {
        let mut page = ScriptedPage::chapters(&["A", "B"], 1000.0).with_content_top(200.0);
        page.scroll_window_to(500.0);
        let sections = page.sections().unwrap();
        assert!((sections[0].viewport_top + 300.0).abs() < f64::EPSILON);
        assert!((sections[1].offset_top - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scroll_is_clamped_to_document() {
        let mut page = ScriptedPage::chapters(&["A"], 1000.0);
        page.scroll_to(-80.0);
        assert!(page.scroll_y().abs() < f64::EPSILON);
        page.scroll_to(10_000.0);
        assert!((page.scroll_y() - 200.0).abs() < f64::EPSILON);
        assert_eq!(page.scroll_requests(), &[-80.0, 10_000.0]);
    }
}
