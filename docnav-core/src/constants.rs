//! Fixed values shared by the controller and its page adapters.

// Font sizing (pixels)
pub const DEFAULT_FONT_SIZE_PX: i32 = 16;
pub const MIN_FONT_SIZE_PX: i32 = 14;
pub const MAX_FONT_SIZE_PX: i32 = 20;
pub const FONT_SIZE_STEP_PX: i32 = 1;

// Header offset applied to every programmatic scroll
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;
pub const MOBILE_HEADER_HEIGHT_PX: f64 = 70.0;
pub const DESKTOP_HEADER_HEIGHT_PX: f64 = 80.0;

// Preference keys
pub const THEME_KEY: &str = "theme";
pub const FONT_SIZE_KEY: &str = "fontSize";

// Element ids
pub const CONTENT_AREA_ID: &str = "content-area";
pub const TOC_ID: &str = "toc";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const FONT_INCREASE_ID: &str = "font-increase";
pub const FONT_DECREASE_ID: &str = "font-decrease";
pub const MENU_TOGGLE_ID: &str = "mobile-menu-toggle";
pub const SIDEBAR_ID: &str = "sidebar";
pub const PREV_CHAPTER_ID: &str = "prev-chapter";
pub const NEXT_CHAPTER_ID: &str = "next-chapter";
pub const GET_STARTED_ID: &str = "get-started-btn";

// Class names
pub const DARK_MODE_CLASS: &str = "dark-mode";
pub const SIDEBAR_OPEN_CLASS: &str = "active";
pub const TOC_ACTIVE_CLASS: &str = "active";
pub const OVERLAY_CLASS: &str = "sidebar-overlay";

// Toggle glyphs: the icon advertises the mode the next click switches to
pub const GLYPH_SUN: &str = "\u{2600}\u{fe0f}";
pub const GLYPH_BULB: &str = "\u{1f4a1}";

pub const SECTION_ID_PREFIX: &str = "section-";
pub const PRESS_ANIMATION_MS: i32 = 150;
pub const PRESS_TRANSFORM: &str = "scale(0.95)";
