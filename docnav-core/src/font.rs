//! Body font size adjustment
use crate::constants::{
    DEFAULT_FONT_SIZE_PX, FONT_SIZE_KEY, FONT_SIZE_STEP_PX, MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX,
};
use crate::prefs::{PreferenceStore, read_pref, write_pref};

/// In-memory font size. Adjustments always clamp; loaded values do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSize {
    px: i32,
}

impl Default for FontSize {
    fn default() -> Self {
        Self {
            px: DEFAULT_FONT_SIZE_PX,
        }
    }
}

impl FontSize {
    /// Wrap a raw pixel value without clamping.
    #[must_use]
    pub const fn from_px(px: i32) -> Self {
        Self { px }
    }

    #[must_use]
    pub const fn px(self) -> i32 {
        self.px
    }

    /// Apply `delta` then clamp into the allowed range.
    #[must_use]
    pub fn adjusted(self, delta: i32) -> Self {
        Self {
            px: clamp_px(self.px.saturating_add(delta)),
        }
    }

    #[must_use]
    pub fn increased(self) -> Self {
        self.adjusted(FONT_SIZE_STEP_PX)
    }

    #[must_use]
    pub fn decreased(self) -> Self {
        self.adjusted(-FONT_SIZE_STEP_PX)
    }

    /// CSS length, e.g. `16px`.
    #[must_use]
    pub fn css_value(self) -> String {
        format!("{}px", self.px)
    }

    /// Integer-prefix parse of a stored value (`"17px"` reads as 17).
    ///
    /// Returns `None` when the value carries no leading digits.
    #[must_use]
    pub fn parse_stored(raw: &str) -> Option<i32> {
        let trimmed = raw.trim_start();
        let (negative, rest) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits_len == 0 {
            return None;
        }
        let magnitude = rest[..digits_len].parse::<i64>().ok().unwrap_or(i64::MAX);
        let value = if negative { -magnitude } else { magnitude };
        Some(i32::try_from(value).unwrap_or(if negative { i32::MIN } else { i32::MAX }))
    }
}

#[must_use]
pub fn clamp_px(px: i32) -> i32 {
    px.clamp(MIN_FONT_SIZE_PX, MAX_FONT_SIZE_PX)
}

/// Stored font size if one is present and parseable.
pub fn load_font_size<S: PreferenceStore>(store: &S) -> Option<FontSize> {
    let raw = read_pref(store, FONT_SIZE_KEY)?;
    if raw.is_empty() {
        return None;
    }
    let parsed = FontSize::parse_stored(&raw);
    if parsed.is_none() {
        log::warn!("ignoring unparseable stored font size `{raw}`");
    }
    parsed.map(FontSize::from_px)
}

pub fn save_font_size<S: PreferenceStore>(store: &S, size: FontSize) {
    write_pref(store, FONT_SIZE_KEY, &size.px().to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    #[test]
    fn adjustment_clamps_after_step() {
        let mut size = FontSize::from_px(MAX_FONT_SIZE_PX);
        for _ in 0..5 {
            size = size.increased();
        }
        assert_eq!(size.px(), MAX_FONT_SIZE_PX);

        let mut size = FontSize::from_px(MIN_FONT_SIZE_PX);
        for _ in 0..5 {
            size = size.decreased();
        }
        assert_eq!(size.px(), MIN_FONT_SIZE_PX);
    }

    #[test]
    fn out_of_range_value_snaps_on_next_adjustment() {
        assert_eq!(FontSize::from_px(30).decreased().px(), MAX_FONT_SIZE_PX);
        assert_eq!(FontSize::from_px(3).increased().px(), MIN_FONT_SIZE_PX);
    }

    #[test]
    fn parse_stored_follows_integer_prefix_rules() {
        assert_eq!(FontSize::parse_stored("18"), Some(18));
        assert_eq!(FontSize::parse_stored("  17px"), Some(17));
        assert_eq!(FontSize::parse_stored("-3"), Some(-3));
        assert_eq!(FontSize::parse_stored("+19"), Some(19));
        assert_eq!(FontSize::parse_stored("px17"), None);
        assert_eq!(FontSize::parse_stored("-"), None);
        assert_eq!(FontSize::parse_stored(""), None);
    }

    #[test]
    fn load_font_size_does_not_clamp() {
        let store = MemoryStore::with_entries([("fontSize", "42")]);
        assert_eq!(load_font_size(&store), Some(FontSize::from_px(42)));
        let empty = MemoryStore::new();
        assert_eq!(load_font_size(&empty), None);
        let garbage = MemoryStore::with_entries([("fontSize", "huge")]);
        assert_eq!(load_font_size(&garbage), None);
    }

    #[test]
    fn css_value_has_px_suffix() {
        assert_eq!(FontSize::default().css_value(), "16px");
    }
}
