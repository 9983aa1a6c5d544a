//! Light/dark theme state
use serde::{Deserialize, Serialize};

use crate::constants::{GLYPH_BULB, GLYPH_SUN, THEME_KEY};
use crate::prefs::{PreferenceStore, read_pref, write_pref};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored value. Only the exact string `"dark"` selects dark mode.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub const fn from_dark_marker(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Glyph shown on the toggle control while this theme is active.
    #[must_use]
    pub const fn toggle_glyph(self) -> &'static str {
        match self {
            Self::Dark => GLYPH_SUN,
            Self::Light => GLYPH_BULB,
        }
    }
}

/// Stored theme, defaulting to light.
pub fn load_theme<S: PreferenceStore>(store: &S) -> Theme {
    Theme::from_stored(read_pref(store, THEME_KEY).as_deref())
}

pub fn save_theme<S: PreferenceStore>(store: &S, theme: Theme) {
    write_pref(store, THEME_KEY, theme.as_str());
}
