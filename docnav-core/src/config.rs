//! Markup contract: which element ids and class names the controller targets.
use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    #[serde(default = "default_content_area_id")]
    pub content_area_id: String,
    #[serde(default = "default_toc_id")]
    pub toc_id: String,
    #[serde(default = "default_theme_toggle_id")]
    pub theme_toggle_id: String,
    #[serde(default = "default_font_increase_id")]
    pub font_increase_id: String,
    #[serde(default = "default_font_decrease_id")]
    pub font_decrease_id: String,
    #[serde(default = "default_menu_toggle_id")]
    pub menu_toggle_id: String,
    #[serde(default = "default_sidebar_id")]
    pub sidebar_id: String,
    #[serde(default = "default_prev_chapter_id")]
    pub prev_chapter_id: String,
    #[serde(default = "default_next_chapter_id")]
    pub next_chapter_id: String,
    #[serde(default = "default_get_started_id")]
    pub get_started_id: String,
    #[serde(default = "default_dark_mode_class")]
    pub dark_mode_class: String,
    #[serde(default = "default_sidebar_open_class")]
    pub sidebar_open_class: String,
    #[serde(default = "default_toc_active_class")]
    pub toc_active_class: String,
    #[serde(default = "default_overlay_class")]
    pub overlay_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            content_area_id: default_content_area_id(),
            toc_id: default_toc_id(),
            theme_toggle_id: default_theme_toggle_id(),
            font_increase_id: default_font_increase_id(),
            font_decrease_id: default_font_decrease_id(),
            menu_toggle_id: default_menu_toggle_id(),
            sidebar_id: default_sidebar_id(),
            prev_chapter_id: default_prev_chapter_id(),
            next_chapter_id: default_next_chapter_id(),
            get_started_id: default_get_started_id(),
            dark_mode_class: default_dark_mode_class(),
            sidebar_open_class: default_sidebar_open_class(),
            toc_active_class: default_toc_active_class(),
            overlay_class: default_overlay_class(),
        }
    }
}

impl PageConfig {
    /// Parse a config from JSON, filling any omitted field with its default.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Selector matching every overlay element this controller may have created.
    #[must_use]
    pub fn overlay_selector(&self) -> String {
        format!(".{}", self.overlay_class)
    }
}

fn default_content_area_id() -> String {
    constants::CONTENT_AREA_ID.to_string()
}
fn default_toc_id() -> String {
    constants::TOC_ID.to_string()
}
fn default_theme_toggle_id() -> String {
    constants::THEME_TOGGLE_ID.to_string()
}
fn default_font_increase_id() -> String {
    constants::FONT_INCREASE_ID.to_string()
}
fn default_font_decrease_id() -> String {
    constants::FONT_DECREASE_ID.to_string()
}
fn default_menu_toggle_id() -> String {
    constants::MENU_TOGGLE_ID.to_string()
}
fn default_sidebar_id() -> String {
    constants::SIDEBAR_ID.to_string()
}
fn default_prev_chapter_id() -> String {
    constants::PREV_CHAPTER_ID.to_string()
}
fn default_next_chapter_id() -> String {
    constants::NEXT_CHAPTER_ID.to_string()
}
fn default_get_started_id() -> String {
    constants::GET_STARTED_ID.to_string()
}
fn default_dark_mode_class() -> String {
    constants::DARK_MODE_CLASS.to_string()
}
fn default_sidebar_open_class() -> String {
    constants::SIDEBAR_OPEN_CLASS.to_string()
}
fn default_toc_active_class() -> String {
    constants::TOC_ACTIVE_CLASS.to_string()
}
fn default_overlay_class() -> String {
    constants::OVERLAY_CLASS.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = PageConfig::from_json(r#"{ "tocId": "contents" }"#).unwrap();
        assert_eq!(cfg.toc_id, "contents");
        assert_eq!(cfg.sidebar_id, "sidebar");
        assert_eq!(cfg.overlay_selector(), ".sidebar-overlay");
    }

    #[test]
    fn empty_object_equals_default() {
        assert_eq!(PageConfig::from_json("{}").unwrap(), PageConfig::default());
    }
}
