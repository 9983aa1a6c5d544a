//! Declarative event table: which event on which element runs which action.
//!
//! Page adapters register one listener per [`Binding`] and forward to
//! `PageController::dispatch`; nothing else knows about DOM events.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
    Scroll,
    Resize,
}

impl EventKind {
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Window,
    ThemeToggle,
    FontIncrease,
    FontDecrease,
    MenuToggle,
    PrevChapter,
    NextChapter,
    GetStarted,
    Overlay,
    TocLink(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    ToggleTheme,
    IncreaseFont,
    DecreaseFont,
    ToggleSidebar,
    CloseSidebar,
    PrevChapter,
    NextChapter,
    GetStarted,
    FollowTocLink(usize),
    UpdateNavigation,
}

impl Action {
    /// Parse the kebab-case action names used by the test bridge.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let action = match name {
            "toggle-theme" => Self::ToggleTheme,
            "increase-font" => Self::IncreaseFont,
            "decrease-font" => Self::DecreaseFont,
            "toggle-sidebar" => Self::ToggleSidebar,
            "close-sidebar" => Self::CloseSidebar,
            "prev-chapter" => Self::PrevChapter,
            "next-chapter" => Self::NextChapter,
            "get-started" => Self::GetStarted,
            "update-navigation" => Self::UpdateNavigation,
            other => {
                let index = other.strip_prefix("follow-toc-link-")?.parse().ok()?;
                Self::FollowTocLink(index)
            }
        };
        Some(action)
    }

    /// Whether a click bound to this action should suppress default navigation.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        matches!(self, Self::FollowTocLink(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub event: EventKind,
    pub target: Target,
    pub action: Action,
}

impl Binding {
    #[must_use]
    pub const fn new(event: EventKind, target: Target, action: Action) -> Self {
        Self {
            event,
            target,
            action,
        }
    }
}

/// Bindings registered once at startup on fixed page controls.
///
/// The overlay binding is not included: the overlay only exists while the
/// sidebar is open, so it is bound when created.
#[must_use]
pub fn static_bindings() -> Vec<Binding> {
    use Action as A;
    use EventKind::{Click, Resize, Scroll};
    vec![
        Binding::new(Click, Target::ThemeToggle, A::ToggleTheme),
        Binding::new(Click, Target::FontIncrease, A::IncreaseFont),
        Binding::new(Click, Target::FontDecrease, A::DecreaseFont),
        Binding::new(Click, Target::MenuToggle, A::ToggleSidebar),
        Binding::new(Click, Target::PrevChapter, A::PrevChapter),
        Binding::new(Click, Target::NextChapter, A::NextChapter),
        Binding::new(Click, Target::GetStarted, A::GetStarted),
        Binding::new(Scroll, Target::Window, A::UpdateNavigation),
        Binding::new(Resize, Target::Window, A::UpdateNavigation),
    ]
}

#[must_use]
pub const fn overlay_binding() -> Binding {
    Binding::new(EventKind::Click, Target::Overlay, Action::CloseSidebar)
}

/// One click binding per generated TOC link.
#[must_use]
pub fn toc_bindings(count: usize) -> Vec<Binding> {
    (0..count)
        .map(|i| Binding::new(EventKind::Click, Target::TocLink(i), Action::FollowTocLink(i)))
        .collect()
}
