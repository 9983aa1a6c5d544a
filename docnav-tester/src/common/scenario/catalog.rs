//! Logic-mode checks: each drives a `PageController` over the scripted page.
use anyhow::{Context, Result, ensure};
use docnav_core::constants::{GLYPH_BULB, MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX};
use docnav_core::harness::{ScriptedPage, ScriptedSection};
use docnav_core::{Action, Heading, MemoryStore, PageController, Theme};
use std::collections::BTreeSet;

use super::Check;

type Controller<'a> = PageController<ScriptedPage, &'a MemoryStore>;

fn started(page: ScriptedPage, store: &MemoryStore) -> Result<Controller<'_>> {
    let mut controller = PageController::new(page, store);
    controller.init().context("controller init")?;
    Ok(controller)
}

pub fn run_check(check: Check) -> Result<()> {
    match check {
        Check::Toc => toc(),
        Check::FontBounds => font_bounds(),
        Check::ThemeToggle => theme_toggle(),
        Check::ChapterMiddle => chapter_middle(),
        Check::ChapterFallback => chapter_fallback(),
        Check::SidebarOverlay => sidebar_overlay(),
        Check::Defaults => defaults(),
    }
}

fn toc() -> Result<()> {
    let titles = ["Intro", "Install", "Usage", "Reference", "FAQ"];
    let sections = titles
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let id = (i % 2 == 0).then(|| t.to_lowercase());
            ScriptedSection::new(None, Heading::new(id.as_deref(), *t), 800.0)
        })
        .collect();
    let store = MemoryStore::new();
    let controller = started(ScriptedPage::new(sections), &store)?;
    let page = controller.page();

    ensure!(page.toc_lists().len() == 1, "TOC must be appended once");
    let labels: Vec<_> = page
        .toc_links()
        .iter()
        .map(|l| l.entry.label.as_str())
        .collect();
    ensure!(labels == titles, "TOC order {labels:?} != {titles:?}");
    let ids: Vec<String> = page.heading_ids().into_iter().flatten().collect();
    ensure!(ids.len() == titles.len(), "every heading needs an id");
    let unique: BTreeSet<_> = ids.iter().collect();
    ensure!(unique.len() == ids.len(), "heading ids must be unique: {ids:?}");
    Ok(())
}

fn font_bounds() -> Result<()> {
    let store = MemoryStore::with_entries([("fontSize", "20")]);
    let mut controller = started(ScriptedPage::chapters(&["A"], 800.0), &store)?;
    for _ in 0..5 {
        controller.dispatch(Action::IncreaseFont)?;
        ensure!(
            controller.font_size().px() == MAX_FONT_SIZE_PX,
            "increase exceeded max: {}",
            controller.font_size().px()
        );
    }
    for _ in 0..10 {
        controller.dispatch(Action::DecreaseFont)?;
    }
    ensure!(
        controller.font_size().px() == MIN_FONT_SIZE_PX,
        "decrease passed min: {}",
        controller.font_size().px()
    );
    controller.dispatch(Action::DecreaseFont)?;
    ensure!(
        store.value("fontSize").as_deref() == Some("14"),
        "stored font size should stay at 14"
    );
    Ok(())
}

fn theme_toggle() -> Result<()> {
    let store = MemoryStore::new();
    let mut controller = started(ScriptedPage::chapters(&["A"], 800.0), &store)?;
    let glyph_before = controller.page().theme_glyph().to_string();
    controller.dispatch(Action::ToggleTheme)?;
    ensure!(controller.theme()? == Theme::Dark, "first toggle selects dark");
    controller.dispatch(Action::ToggleTheme)?;
    ensure!(
        controller.page().theme_glyph() == glyph_before,
        "glyph should return to original"
    );
    ensure!(
        store.value("theme").as_deref() == Some("light"),
        "stored theme should return to light"
    );
    Ok(())
}

fn chapter_middle() -> Result<()> {
    let store = MemoryStore::new();
    let mut controller = started(
        ScriptedPage::chapters(&["A", "B", "C"], 1200.0).with_viewport(1280.0, 800.0),
        &store,
    )?;
    controller.page_mut().place_section_at(1, 320.0);
    controller.dispatch(Action::UpdateNavigation)?;
    let nav = controller.nav().context("navigation state")?;
    ensure!(nav.current == 1, "expected B current, got {}", nav.current);
    ensure!(nav.prev == Some(0) && nav.next == Some(2), "neighbours {nav:?}");
    ensure!(
        controller.page().chapter_controls() == (false, false),
        "both controls enabled"
    );
    ensure!(
        controller.page().active_links() == vec![1],
        "only B's link active"
    );
    Ok(())
}

fn chapter_fallback() -> Result<()> {
    let store = MemoryStore::new();
    let controller = started(
        ScriptedPage::chapters(&["A", "B", "C"], 1200.0)
            .with_content_top(600.0)
            .with_viewport(1280.0, 800.0),
        &store,
    )?;
    let nav = controller.nav().context("navigation state")?;
    ensure!(nav.current == 0, "fallback selects A");
    ensure!(
        controller.page().chapter_controls() == (true, false),
        "prev disabled, next enabled"
    );
    Ok(())
}

fn sidebar_overlay() -> Result<()> {
    let store = MemoryStore::new();
    let mut controller = started(ScriptedPage::chapters(&["A"], 800.0), &store)?;
    let bindings = controller.dispatch(Action::ToggleSidebar)?;
    ensure!(controller.page().is_sidebar_open(), "sidebar opens");
    ensure!(controller.page().overlay_count() == 1, "one overlay");
    ensure!(controller.snapshot()?.overlay_present, "snapshot sees the overlay");
    let close = bindings.first().context("overlay binding")?;
    controller.dispatch(close.action)?;
    ensure!(!controller.page().is_sidebar_open(), "sidebar closes");
    ensure!(controller.page().overlay_count() == 0, "overlay removed");
    ensure!(!controller.snapshot()?.overlay_present, "snapshot sees no overlay");
    Ok(())
}

fn defaults() -> Result<()> {
    let store = MemoryStore::new();
    let controller = started(ScriptedPage::chapters(&["A", "B"], 800.0), &store)?;
    let snapshot = controller.snapshot()?;
    ensure!(snapshot.theme == Theme::Light, "default theme is light");
    ensure!(
        controller.page().theme_glyph() == GLYPH_BULB,
        "light theme shows the bulb"
    );
    ensure!(snapshot.font_size_px == 16, "default font size is 16px");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_check_passes_against_the_scripted_page() {
        for check in [
            Check::Toc,
            Check::FontBounds,
            Check::ThemeToggle,
            Check::ChapterMiddle,
            Check::ChapterFallback,
            Check::SidebarOverlay,
            Check::Defaults,
        ] {
            run_check(check).unwrap_or_else(|e| panic!("{check:?}: {e:#}"));
        }
    }
}
