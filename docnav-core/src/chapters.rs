//! Scroll-derived chapter state.
//!
//! The "current" section is never stored: it is recomputed from section
//! positions on every scroll, resize and at startup.

use serde::{Deserialize, Serialize};

use crate::constants::{DESKTOP_HEADER_HEIGHT_PX, MOBILE_BREAKPOINT_PX, MOBILE_HEADER_HEIGHT_PX};

/// Index of the current section given each section's top edge relative to the
/// viewport.
///
/// The first section whose top lies in `[0, viewport_height / 2)` wins; when
/// none qualifies the first section is current. `None` only for an empty list.
#[must_use]
pub fn current_section_index(tops: &[f64], viewport_height: f64) -> Option<usize> {
    if tops.is_empty() {
        return None;
    }
    let threshold = viewport_height / 2.0;
    Some(
        tops.iter()
            .position(|&top| top >= 0.0 && top < threshold)
            .unwrap_or(0),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterNav {
    pub current: usize,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl ChapterNav {
    #[must_use]
    pub fn derive(tops: &[f64], viewport_height: f64) -> Option<Self> {
        let current = current_section_index(tops, viewport_height)?;
        Some(Self::at(current, tops.len()))
    }

    /// Navigation state when `current` of `len` sections is current.
    #[must_use]
    pub fn at(current: usize, len: usize) -> Self {
        Self {
            current,
            prev: current.checked_sub(1),
            next: (current + 1 < len).then_some(current + 1),
        }
    }

    #[must_use]
    pub const fn prev_disabled(&self) -> bool {
        self.prev.is_none()
    }

    #[must_use]
    pub const fn next_disabled(&self) -> bool {
        self.next.is_none()
    }
}

/// Fixed header height for the given viewport width.
#[must_use]
pub fn header_offset(viewport_width: f64) -> f64 {
    if viewport_width <= MOBILE_BREAKPOINT_PX {
        MOBILE_HEADER_HEIGHT_PX
    } else {
        DESKTOP_HEADER_HEIGHT_PX
    }
}

/// Document scroll position that puts `offset_top` just below the header.
#[must_use]
pub fn scroll_target(offset_top: f64, header: f64) -> f64 {
    offset_top - header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_in_upper_half_is_current() {
        // B's top at 40% of an 800px viewport
        let tops = [-900.0, 320.0, 1100.0];
        let nav = ChapterNav::derive(&tops, 800.0).unwrap();
        assert_eq!(nav.current, 1);
        assert_eq!(nav.prev, Some(0));
        assert_eq!(nav.next, Some(2));
    }

    #[test]
    fn nothing_qualifying_defaults_to_first() {
        let tops = [500.0, 1300.0, 2100.0];
        let nav = ChapterNav::derive(&tops, 800.0).unwrap();
        assert_eq!(nav.current, 0);
        assert!(nav.prev_disabled());
        assert!(!nav.next_disabled());
    }

    #[test]
    fn earlier_section_wins_ties() {
        let tops = [10.0, 200.0, 390.0];
        assert_eq!(current_section_index(&tops, 800.0), Some(0));
    }

    #[test]
    fn threshold_is_half_open() {
        assert_eq!(current_section_index(&[-1.0, 400.0], 800.0), Some(0));
        assert_eq!(current_section_index(&[-1.0, 399.5], 800.0), Some(1));
        assert_eq!(current_section_index(&[-5.0, 0.0], 800.0), Some(1));
    }

    #[test]
    fn past_the_last_section_falls_back_to_first() {
        let tops = [-3000.0, -2000.0, -900.0];
        let nav = ChapterNav::derive(&tops, 800.0).unwrap();
        assert_eq!(nav.current, 0);
    }

    #[test]
    fn last_section_disables_next() {
        let nav = ChapterNav::at(2, 3);
        assert_eq!(nav.prev, Some(1));
        assert!(nav.next_disabled());
        let single = ChapterNav::at(0, 1);
        assert!(single.prev_disabled() && single.next_disabled());
    }

    #[test]
    fn empty_sections_have_no_state() {
        assert_eq!(ChapterNav::derive(&[], 800.0), None);
    }

    #[test]
    fn header_offset_switches_at_breakpoint() {
        assert!((header_offset(768.0) - 70.0).abs() < f64::EPSILON);
        assert!((header_offset(769.0) - 80.0).abs() < f64::EPSILON);
        assert!((scroll_target(1000.0, 80.0) - 920.0).abs() < f64::EPSILON);
    }
}
