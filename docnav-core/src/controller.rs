use serde::{Deserialize, Serialize};

use crate::bindings::{Action, Binding, overlay_binding};
use crate::chapters::{ChapterNav, current_section_index, header_offset, scroll_target};
use crate::font::{FontSize, load_font_size, save_font_size};
use crate::page::Page;
use crate::prefs::PreferenceStore;
use crate::sidebar::{SidebarState, SidebarTransition};
use crate::theme::{Theme, load_theme, save_theme};
use crate::toc::{TocState, build_toc};

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("page error: {0}")]
    Page(String),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

fn page_err<E: std::error::Error>(err: E) -> ControllerError {
    ControllerError::Page(err.to_string())
}

/// Observable controller state, as exposed to the test bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub theme: Theme,
    pub font_size_px: i32,
    pub sidebar_open: bool,
    /// Whether a sidebar overlay is attached; tracks `sidebar_open`.
    pub overlay_present: bool,
    pub current_section: Option<usize>,
    pub prev_disabled: bool,
    pub next_disabled: bool,
    pub active_toc_id: Option<String>,
    pub toc_len: usize,
}

/// Owns every piece of page state and applies actions to a [`Page`].
pub struct PageController<P, S>
where
    P: Page,
    S: PreferenceStore,
{
    page: P,
    store: S,
    font_size: FontSize,
    sidebar: SidebarState,
    toc: TocState,
    nav: Option<ChapterNav>,
}

impl<P, S> PageController<P, S>
where
    P: Page,
    S: PreferenceStore,
{
    /// Create a controller; nothing touches the page until [`Self::init`].
    pub fn new(page: P, store: S) -> Self {
        Self {
            page,
            store,
            font_size: FontSize::default(),
            sidebar: SidebarState::default(),
            toc: TocState::default(),
            nav: None,
        }
    }

    pub const fn page(&self) -> &P {
        &self.page
    }

    pub const fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub const fn nav(&self) -> Option<ChapterNav> {
        self.nav
    }

    pub const fn toc(&self) -> &TocState {
        &self.toc
    }

    /// Run the startup sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if a required page element is missing.
    pub fn init(&mut self) -> Result<(), ControllerError> {
        self.reset_sidebar()?;
        self.generate_toc()?;
        self.load_theme()?;
        self.load_font_size()?;
        self.update_navigation()?;
        log::debug!(
            "page controller ready: {} toc entries, theme {}",
            self.toc.entries().len(),
            self.theme()?.as_str()
        );
        Ok(())
    }

    /// Apply one action. Returns bindings for elements the action created.
    ///
    /// # Errors
    ///
    /// Returns an error if the page rejects one of the resulting updates.
    pub fn dispatch(&mut self, action: Action) -> Result<Vec<Binding>, ControllerError> {
        log::debug!("dispatch {action:?}");
        match action {
            Action::ToggleTheme => self.toggle_theme().map(|_| Vec::new()),
            Action::IncreaseFont => self.adjust_font_size(FontSize::increased).map(|_| Vec::new()),
            Action::DecreaseFont => self.adjust_font_size(FontSize::decreased).map(|_| Vec::new()),
            Action::ToggleSidebar => self.toggle_sidebar().map(|transition| match transition {
                SidebarTransition::Opened => vec![overlay_binding()],
                SidebarTransition::Closed => Vec::new(),
            }),
            Action::CloseSidebar => self.close_sidebar().map(|()| Vec::new()),
            Action::PrevChapter => self.go_prev().map(|()| Vec::new()),
            Action::NextChapter => self.go_next().map(|()| Vec::new()),
            Action::GetStarted => self.get_started().map(|()| Vec::new()),
            Action::FollowTocLink(index) => self.follow_toc_link(index).map(|()| Vec::new()),
            Action::UpdateNavigation => self.update_navigation().map(|_| Vec::new()),
        }
    }

    /// Dispatch by kebab-case action name.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownAction`] for unrecognized names.
    pub fn dispatch_named(&mut self, name: &str) -> Result<Vec<Binding>, ControllerError> {
        let action =
            Action::from_name(name).ok_or_else(|| ControllerError::UnknownAction(name.into()))?;
        self.dispatch(action)
    }

    // --- TOC ---

    fn generate_toc(&mut self) -> Result<(), ControllerError> {
        let headings = self.page.headings().map_err(page_err)?;
        let plan = build_toc(&headings);
        for assignment in &plan.assignments {
            self.page
                .set_heading_id(assignment.index, &assignment.id)
                .map_err(page_err)?;
        }
        for id in plan.duplicate_ids() {
            log::warn!("heading id `{id}` is used by more than one TOC entry");
        }
        self.page.append_toc(&plan.entries).map_err(page_err)?;
        self.toc = TocState::new(plan.entries);
        Ok(())
    }

    fn follow_toc_link(&mut self, index: usize) -> Result<(), ControllerError> {
        let Some(id) = self.toc.entries().get(index).map(|e| e.id.clone()) else {
            return Ok(());
        };
        if let Some(top) = self.page.element_offset_top(&id).map_err(page_err)? {
            self.scroll_below_header(top);
        }
        Ok(())
    }

    // --- Theme ---

    /// Theme as currently marked on the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read.
    pub fn theme(&self) -> Result<Theme, ControllerError> {
        self.page
            .has_dark_marker()
            .map(Theme::from_dark_marker)
            .map_err(page_err)
    }

    fn load_theme(&mut self) -> Result<(), ControllerError> {
        let theme = load_theme(&self.store);
        if theme.is_dark() {
            self.page.add_dark_marker().map_err(page_err)?;
        }
        self.page
            .set_theme_glyph(theme.toggle_glyph())
            .map_err(page_err)
    }

    fn toggle_theme(&mut self) -> Result<Theme, ControllerError> {
        self.page.toggle_dark_marker().map_err(page_err)?;
        let theme = self.theme()?;
        save_theme(&self.store, theme);
        self.page
            .set_theme_glyph(theme.toggle_glyph())
            .map_err(page_err)?;
        Ok(theme)
    }

    // --- Font size ---

    fn load_font_size(&mut self) -> Result<(), ControllerError> {
        if let Some(size) = load_font_size(&self.store) {
            self.font_size = size;
            self.page
                .set_body_font_size(&size.css_value())
                .map_err(page_err)?;
        }
        Ok(())
    }

    fn adjust_font_size(
        &mut self,
        step: impl FnOnce(FontSize) -> FontSize,
    ) -> Result<FontSize, ControllerError> {
        self.font_size = step(self.font_size);
        self.page
            .set_body_font_size(&self.font_size.css_value())
            .map_err(page_err)?;
        save_font_size(&self.store, self.font_size);
        Ok(self.font_size)
    }

    // --- Sidebar ---

    fn reset_sidebar(&mut self) -> Result<(), ControllerError> {
        self.page.set_sidebar_open(false).map_err(page_err)?;
        self.page.remove_overlay().map_err(page_err)?;
        self.sidebar = SidebarState::default();
        Ok(())
    }

    fn toggle_sidebar(&mut self) -> Result<SidebarTransition, ControllerError> {
        let transition = self.sidebar.toggle();
        match transition {
            SidebarTransition::Opened => {
                self.page.set_sidebar_open(true).map_err(page_err)?;
                self.page.create_overlay().map_err(page_err)?;
            }
            SidebarTransition::Closed => {
                self.page.set_sidebar_open(false).map_err(page_err)?;
                self.page.remove_overlay().map_err(page_err)?;
            }
        }
        Ok(transition)
    }

    fn close_sidebar(&mut self) -> Result<(), ControllerError> {
        self.sidebar.close();
        self.page.set_sidebar_open(false).map_err(page_err)?;
        self.page.remove_overlay().map_err(page_err)
    }

    // --- Chapter navigation ---

    /// Recompute the current section and refresh controls and TOC highlight.
    ///
    /// # Errors
    ///
    /// Returns an error if sections or controls cannot be read or written.
    pub fn update_navigation(&mut self) -> Result<Option<ChapterNav>, ControllerError> {
        let sections = self.page.sections().map_err(page_err)?;
        let viewport = self.page.viewport();
        let tops: Vec<f64> = sections.iter().map(|s| s.viewport_top).collect();
        let Some(current) = current_section_index(&tops, viewport.height) else {
            self.nav = None;
            self.page
                .set_chapter_controls(true, true)
                .map_err(page_err)?;
            self.toc.activate(None);
            self.page.set_active_toc_link(None).map_err(page_err)?;
            return Ok(None);
        };
        let nav = ChapterNav::at(current, sections.len());
        self.page
            .set_chapter_controls(nav.prev_disabled(), nav.next_disabled())
            .map_err(page_err)?;
        let active = self.toc.activate(sections[current].id.as_deref());
        self.page.set_active_toc_link(active).map_err(page_err)?;
        self.nav = Some(nav);
        Ok(Some(nav))
    }

    fn go_prev(&mut self) -> Result<(), ControllerError> {
        let target = self.nav.and_then(|nav| nav.prev);
        self.scroll_to_section(target)
    }

    fn go_next(&mut self) -> Result<(), ControllerError> {
        let target = self.nav.and_then(|nav| nav.next);
        self.scroll_to_section(target)
    }

    fn get_started(&mut self) -> Result<(), ControllerError> {
        if !self.page.has_get_started() {
            return Ok(());
        }
        let Some(first) = self.page.sections().map_err(page_err)?.first().cloned() else {
            return Ok(());
        };
        self.scroll_below_header(first.offset_top);
        self.page.press_get_started().map_err(page_err)
    }

    fn scroll_to_section(&mut self, index: Option<usize>) -> Result<(), ControllerError> {
        let Some(index) = index else {
            return Ok(());
        };
        let sections = self.page.sections().map_err(page_err)?;
        if let Some(section) = sections.get(index) {
            self.scroll_below_header(section.offset_top);
        }
        Ok(())
    }

    fn scroll_below_header(&mut self, offset_top: f64) {
        let header = header_offset(self.page.viewport().width);
        self.page.scroll_to(scroll_target(offset_top, header));
    }

    /// # Errors
    ///
    /// Returns an error if the page cannot be read.
    pub fn snapshot(&self) -> Result<PageSnapshot, ControllerError> {
        Ok(PageSnapshot {
            theme: self.theme()?,
            font_size_px: self.font_size.px(),
            sidebar_open: self.page.sidebar_open().map_err(page_err)?,
            overlay_present: self.page.overlay_present().map_err(page_err)?,
            current_section: self.nav.map(|n| n.current),
            prev_disabled: self.nav.is_none_or(|n| n.prev_disabled()),
            next_disabled: self.nav.is_none_or(|n| n.next_disabled()),
            active_toc_id: self.toc.active_id().map(str::to_string),
            toc_len: self.toc.entries().len(),
        })
    }
}
