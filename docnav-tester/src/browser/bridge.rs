use anyhow::{Context, Result, bail};
use docnav_core::PageSnapshot;
use thirtyfour::prelude::*;

#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let result = self
            .driver
            .execute("return !!window.__docnavTest", vec![])
            .await?;
        let ok = result.json().as_bool().unwrap_or(false);
        if !ok {
            bail!("__docnavTest is not available. Did you pass ?test=1 to the page?");
        }
        Ok(())
    }

    pub async fn state(&self) -> Result<PageSnapshot> {
        let result = self
            .driver
            .execute("return window.__docnavTest.state()", vec![])
            .await?;
        let v = result.json().clone();
        let s: PageSnapshot = serde_json::from_value(v).context("parsing PageSnapshot")?;
        Ok(s)
    }

    /// Run a controller action by name (e.g. `toggle-theme`).
    pub async fn dispatch(&self, action: &str) -> Result<()> {
        let result = self
            .driver
            .execute(
                "return window.__docnavTest.dispatch(arguments[0])",
                vec![action.into()],
            )
            .await?;
        if !result.json().as_bool().unwrap_or(false) {
            bail!("bridge rejected action `{action}`");
        }
        Ok(())
    }

    /// Instantly scroll the window and let the page's scroll handler run.
    pub async fn scroll_to(&self, y: f64) -> Result<()> {
        self.driver
            .execute(
                "window.scrollTo({ top: arguments[0], behavior: 'instant' }); \
                 window.dispatchEvent(new Event('scroll'));",
                vec![y.into()],
            )
            .await?;
        Ok(())
    }

    /// Document offset of the `index`th content section.
    pub async fn section_offset(&self, index: usize) -> Result<f64> {
        let result = self
            .driver
            .execute(
                "const s = document.querySelectorAll('#content-area section')[arguments[0]]; \
                 return s ? s.offsetTop : null;",
                vec![index.into()],
            )
            .await?;
        result
            .json()
            .as_f64()
            .with_context(|| format!("section {index} not found"))
    }

    pub async fn viewport_height(&self) -> Result<f64> {
        let result = self
            .driver
            .execute("return window.innerHeight", vec![])
            .await?;
        result.json().as_f64().context("reading innerHeight")
    }

    pub async fn clear_preferences(&self) -> Result<()> {
        self.driver
            .execute(
                "localStorage.removeItem('theme'); localStorage.removeItem('fontSize');",
                vec![],
            )
            .await?;
        Ok(())
    }

    pub async fn preference(&self, key: &str) -> Result<Option<String>> {
        let result = self
            .driver
            .execute("return localStorage.getItem(arguments[0])", vec![key.into()])
            .await?;
        Ok(result.json().as_str().map(str::to_string))
    }
}
