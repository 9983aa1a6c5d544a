//! Browser-mode checks, driven through WebDriver and the page's test bridge.
use anyhow::{Context, Result, bail, ensure};
use docnav_core::Theme;
use docnav_core::constants::{
    DARK_MODE_CLASS, MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX, OVERLAY_CLASS, SIDEBAR_ID, TOC_ID,
};
use std::collections::BTreeSet;
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{Check, ScenarioCtx};

/// Load the page with empty preferences and wait for the bridge.
pub async fn prepare_page(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    driver.goto(&ctx.base_url).await?;
    ctx.bridge.ensure_available().await?;
    ctx.bridge.clear_preferences().await?;
    driver.refresh().await?;
    ctx.bridge.ensure_available().await?;
    if ctx.verbose {
        println!("  page ready at {}", ctx.base_url);
    }
    Ok(())
}

pub async fn run_check(check: Check, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    match check {
        Check::Toc => toc(driver).await,
        Check::FontBounds => font_bounds(ctx).await,
        Check::ThemeToggle => theme_toggle(driver, ctx).await,
        Check::ChapterMiddle => chapter_middle(ctx).await,
        Check::ChapterFallback => chapter_fallback(ctx).await,
        Check::SidebarOverlay => sidebar_overlay(driver, ctx).await,
        Check::Defaults => defaults(driver, ctx).await,
    }
}

async fn has_class(element: &WebElement, class: &str) -> Result<bool> {
    let classes = element.class_name().await?.unwrap_or_default();
    Ok(classes.split_whitespace().any(|c| c == class))
}

async fn toc(driver: &WebDriver) -> Result<()> {
    let headings = driver
        .find_all(By::Css("#content-area section h2"))
        .await?;
    let link_css = format!("#{TOC_ID} ul li a");
    let links = driver.find_all(By::Css(link_css.as_str())).await?;
    ensure!(
        headings.len() == links.len(),
        "{} headings but {} TOC links",
        headings.len(),
        links.len()
    );

    let mut ids = BTreeSet::new();
    for (heading, link) in headings.iter().zip(&links) {
        let id = heading.id().await?.context("heading without id")?;
        let href = link.attr("href").await?.unwrap_or_default();
        ensure!(href == format!("#{id}"), "link {href} does not target {id}");
        ensure!(
            link.text().await? == heading.text().await?,
            "link label differs from heading text"
        );
        ensure!(ids.insert(id.clone()), "duplicate heading id {id}");
    }
    Ok(())
}

async fn font_bounds(ctx: &ScenarioCtx<'_>) -> Result<()> {
    for _ in 0..8 {
        ctx.bridge.dispatch("increase-font").await?;
    }
    let up = ctx.bridge.state().await?;
    ensure!(
        up.font_size_px == MAX_FONT_SIZE_PX,
        "font size {} after repeated increases",
        up.font_size_px
    );
    for _ in 0..10 {
        ctx.bridge.dispatch("decrease-font").await?;
    }
    let down = ctx.bridge.state().await?;
    ensure!(
        down.font_size_px == MIN_FONT_SIZE_PX,
        "font size {} after repeated decreases",
        down.font_size_px
    );
    let stored = ctx.bridge.preference("fontSize").await?;
    ensure!(
        stored.as_deref() == Some("14"),
        "stored font size {stored:?}"
    );
    Ok(())
}

async fn theme_toggle(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    let toggle = driver.find(By::Id("theme-toggle")).await?;
    let before = toggle.text().await?;
    toggle.click().await?;
    let body = driver.find(By::Tag("body")).await?;
    ensure!(has_class(&body, DARK_MODE_CLASS).await?, "dark mode not applied");
    ensure!(
        ctx.bridge.state().await?.theme == Theme::Dark,
        "controller did not switch to dark"
    );

    toggle.click().await?;
    ensure!(
        !has_class(&body, DARK_MODE_CLASS).await?,
        "dark mode not removed"
    );
    ensure!(toggle.text().await? == before, "glyph did not round trip");
    let stored = ctx.bridge.preference("theme").await?;
    ensure!(stored.as_deref() == Some("light"), "stored theme {stored:?}");
    Ok(())
}

async fn chapter_middle(ctx: &ScenarioCtx<'_>) -> Result<()> {
    let before = ctx.bridge.state().await?;
    if before.toc_len < 3 {
        bail!("page needs at least three sections, found {}", before.toc_len);
    }
    let height = ctx.bridge.viewport_height().await?;
    let offset = ctx.bridge.section_offset(1).await?;
    // Put the second section just inside the upper half of the viewport.
    ctx.bridge.scroll_to(offset - height * 0.4).await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let state = ctx.bridge.state().await?;
    ensure!(
        state.current_section == Some(1),
        "current section {:?}",
        state.current_section
    );
    ensure!(
        !state.prev_disabled && !state.next_disabled,
        "both chapter controls should be enabled"
    );
    ensure!(
        state.active_toc_id.is_some(),
        "no active TOC link for the middle section"
    );
    Ok(())
}

async fn chapter_fallback(ctx: &ScenarioCtx<'_>) -> Result<()> {
    ctx.bridge.scroll_to(0.0).await?;
    tokio::time::sleep(Duration::from_millis(100)).await;
    let state = ctx.bridge.state().await?;
    ensure!(
        state.current_section == Some(0),
        "current section {:?}",
        state.current_section
    );
    ensure!(state.prev_disabled, "prev should be disabled on the first section");
    ensure!(
        state.next_disabled == (state.toc_len <= 1),
        "next disabled mismatch for {} sections",
        state.toc_len
    );
    Ok(())
}

async fn sidebar_overlay(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    let overlay_css = format!(".{OVERLAY_CLASS}");
    ctx.bridge.dispatch("toggle-sidebar").await?;
    let sidebar = driver.find(By::Id(SIDEBAR_ID)).await?;
    ensure!(has_class(&sidebar, "active").await?, "sidebar did not open");
    let overlays = driver.find_all(By::Css(overlay_css.as_str())).await?;
    ensure!(overlays.len() == 1, "{} overlays after opening", overlays.len());
    let opened = ctx.bridge.state().await?;
    ensure!(
        opened.sidebar_open && opened.overlay_present,
        "controller reports sidebar {} overlay {}",
        opened.sidebar_open,
        opened.overlay_present
    );

    // The overlay may sit under the sidebar, so click it from script.
    driver
        .execute(
            "document.querySelector(arguments[0]).click()",
            vec![overlay_css.clone().into()],
        )
        .await?;
    ensure!(!has_class(&sidebar, "active").await?, "sidebar did not close");
    let remaining = driver.find_all(By::Css(overlay_css.as_str())).await?;
    ensure!(remaining.is_empty(), "overlay left behind");
    let closed = ctx.bridge.state().await?;
    ensure!(
        !closed.sidebar_open && !closed.overlay_present,
        "controller still reports the sidebar or overlay"
    );
    Ok(())
}

async fn defaults(driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
    let state = ctx.bridge.state().await?;
    ensure!(state.theme == Theme::Light, "theme {:?}", state.theme);
    ensure!(state.font_size_px == 16, "font size {}", state.font_size_px);
    ensure!(!state.sidebar_open, "sidebar open on load");
    let body = driver.find(By::Tag("body")).await?;
    ensure!(
        !has_class(&body, DARK_MODE_CLASS).await?,
        "dark mode applied on load"
    );
    Ok(())
}
