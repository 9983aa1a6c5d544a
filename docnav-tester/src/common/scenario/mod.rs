use anyhow::Result;
use thirtyfour::prelude::*;

use crate::browser::TestBridge;

pub mod catalog;
pub mod live;

#[derive(Debug, Clone)]
pub struct ScenarioCtx<'a> {
    pub base_url: String,
    pub bridge: TestBridge<'a>,
    pub verbose: bool,
}

/// Which page behavior a scenario checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Toc,
    FontBounds,
    ThemeToggle,
    ChapterMiddle,
    ChapterFallback,
    SidebarOverlay,
    Defaults,
}

// Logic test scenario
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub check: Check,
}

// Browser test scenario
#[async_trait::async_trait]
pub trait BrowserScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()>;
}

// Combined scenario that can run both logic and browser tests
pub trait CombinedScenario: BrowserScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario>;
}

#[derive(Debug, Clone, Copy)]
pub struct CatalogScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub check: Check,
}

#[async_trait::async_trait]
impl BrowserScenario for CatalogScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        live::prepare_page(driver, ctx).await?;
        live::run_check(self.check, driver, ctx).await
    }
}

impl CombinedScenario for CatalogScenario {
    fn as_logic_scenario(&self) -> Option<TestScenario> {
        Some(TestScenario {
            name: self.name.to_string(),
            check: self.check,
        })
    }
}

const SCENARIOS: &[CatalogScenario] = &[
    CatalogScenario {
        key: "toc",
        name: "TOC Generation",
        check: Check::Toc,
    },
    CatalogScenario {
        key: "font-bounds",
        name: "Font Size Bounds",
        check: Check::FontBounds,
    },
    CatalogScenario {
        key: "theme-toggle",
        name: "Theme Toggle Round Trip",
        check: Check::ThemeToggle,
    },
    CatalogScenario {
        key: "chapter-middle",
        name: "Chapter Navigation - Middle Section",
        check: Check::ChapterMiddle,
    },
    CatalogScenario {
        key: "chapter-fallback",
        name: "Chapter Navigation - First Section Fallback",
        check: Check::ChapterFallback,
    },
    CatalogScenario {
        key: "sidebar-overlay",
        name: "Sidebar Overlay Lifecycle",
        check: Check::SidebarOverlay,
    },
    CatalogScenario {
        key: "defaults",
        name: "Default Preferences",
        check: Check::Defaults,
    },
];

pub fn get_scenario(name: &str) -> Option<Box<dyn CombinedScenario + Send + Sync>> {
    let key = match name.to_lowercase().as_str() {
        "toc" | "table-of-contents" => "toc",
        "font" | "font-bounds" => "font-bounds",
        "theme" | "theme-toggle" => "theme-toggle",
        "chapter-middle" | "middle" => "chapter-middle",
        "chapter-fallback" | "fallback" => "chapter-fallback",
        "sidebar" | "sidebar-overlay" => "sidebar-overlay",
        "defaults" | "smoke" => "defaults",
        _ => return None,
    };
    SCENARIOS
        .iter()
        .find(|s| s.key == key)
        .map(|s| Box::new(*s) as Box<dyn CombinedScenario + Send + Sync>)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, name) in list_scenarios() {
            let scenario = get_scenario(key).expect("listed scenario resolves");
            let logic = scenario.as_logic_scenario().expect("logic variant");
            assert_eq!(logic.name, name);
        }
    }

    #[test]
    fn aliases_resolve_case_insensitively() {
        let scenario = get_scenario("SMOKE").expect("smoke alias");
        assert_eq!(
            scenario.as_logic_scenario().map(|s| s.check),
            Some(Check::Defaults)
        );
        assert!(get_scenario("nope").is_none());
    }
}
