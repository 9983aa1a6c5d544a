//! The page surface the controller drives.
//!
//! Implementations own the element lookups (ids and class names come from
//! [`crate::PageConfig`]); the controller only sees these semantic operations.

use serde::{Deserialize, Serialize};

use crate::toc::{Heading, TocEntry};

/// Geometry of one content section at the moment it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBox {
    pub id: Option<String>,
    /// Top edge relative to the viewport (`getBoundingClientRect().top`).
    pub viewport_top: f64,
    /// Top edge relative to the document (`offsetTop`).
    pub offset_top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

pub trait Page {
    type Error: std::error::Error + 'static;

    /// Level-2 headings of the content area, in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the content area cannot be found.
    fn headings(&self) -> Result<Vec<Heading>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the heading at `index` no longer exists.
    fn set_heading_id(&mut self, index: usize, id: &str) -> Result<(), Self::Error>;

    /// Append one list with a link per entry into the TOC container.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOC container is missing.
    fn append_toc(&mut self, entries: &[TocEntry]) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the document body is unavailable.
    fn toggle_dark_marker(&mut self) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the document body is unavailable.
    fn add_dark_marker(&mut self) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the document body is unavailable.
    fn has_dark_marker(&self) -> Result<bool, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the theme toggle control is missing.
    fn set_theme_glyph(&mut self, glyph: &str) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the document body is unavailable.
    fn set_body_font_size(&mut self, css_value: &str) -> Result<(), Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the sidebar is missing.
    fn sidebar_open(&self) -> Result<bool, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if the sidebar is missing.
    fn set_sidebar_open(&mut self, open: bool) -> Result<(), Self::Error>;

    /// Create and attach one overlay element.
    ///
    /// # Errors
    ///
    /// Returns an error if the element cannot be created or attached.
    fn create_overlay(&mut self) -> Result<(), Self::Error>;

    /// Remove the overlay if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be queried.
    fn remove_overlay(&mut self) -> Result<(), Self::Error>;

    /// Whether an overlay element is currently attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be queried.
    fn overlay_present(&self) -> Result<bool, Self::Error>;

    /// Content sections in document order.
    ///
    /// # Errors
    ///
    /// Returns an error if the content area cannot be found.
    fn sections(&self) -> Result<Vec<SectionBox>, Self::Error>;

    fn viewport(&self) -> Viewport;

    /// Document offset of the element carrying `id`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be queried.
    fn element_offset_top(&self, id: &str) -> Result<Option<f64>, Self::Error>;

    /// # Errors
    ///
    /// Returns an error if either chapter control is missing.
    fn set_chapter_controls(
        &mut self,
        prev_disabled: bool,
        next_disabled: bool,
    ) -> Result<(), Self::Error>;

    /// Clear every TOC link marker, then mark `index` (if any) and bring it
    /// into view inside its own scroll container.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOC links cannot be queried.
    fn set_active_toc_link(&mut self, index: Option<usize>) -> Result<(), Self::Error>;

    /// Smooth-scroll the window to a document position.
    fn scroll_to(&mut self, top: f64);

    fn has_get_started(&self) -> bool;

    /// Play the short press animation on the get-started button.
    ///
    /// # Errors
    ///
    /// Returns an error if the style cannot be written.
    fn press_get_started(&mut self) -> Result<(), Self::Error>;
}
