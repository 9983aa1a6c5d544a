//! Docnav Page Controller
//!
//! Platform-agnostic logic for an enhanced documentation page: table of
//! contents generation, light/dark theme, font sizing, the mobile sidebar and
//! scroll-driven chapter navigation. This crate has no browser dependencies;
//! the DOM is reached through the [`Page`] trait and preferences through
//! [`PreferenceStore`].

pub mod bindings;
pub mod chapters;
pub mod config;
pub mod constants;
pub mod controller;
pub mod font;
pub mod harness;
pub mod page;
pub mod prefs;
pub mod sidebar;
pub mod theme;
pub mod toc;

// Re-export commonly used types
pub use bindings::{
    Action, Binding, EventKind, Target, overlay_binding, static_bindings, toc_bindings,
};
pub use chapters::{ChapterNav, current_section_index, header_offset, scroll_target};
pub use config::PageConfig;
pub use controller::{ControllerError, PageController, PageSnapshot};
pub use font::FontSize;
pub use page::{Page, SectionBox, Viewport};
pub use prefs::{MemoryStore, PreferenceStore};
pub use sidebar::{SidebarState, SidebarTransition};
pub use theme::Theme;
pub use toc::{Heading, TocEntry, TocPlan, TocState, build_toc};
