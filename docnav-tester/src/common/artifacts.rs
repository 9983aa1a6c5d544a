//! What a failed browser scenario leaves behind for debugging.
use anyhow::{Context, Result};
use chrono::Utc;
use docnav_core::PageSnapshot;
use docnav_core::constants::{FONT_SIZE_KEY, THEME_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::browser::TestBridge;

pub const STATE_FILE: &str = "state.json";
pub const SCREENSHOT_FILE: &str = "screenshot.png";

/// `<base>/<browser>/<scenario>/<UTC timestamp>`.
pub fn failure_dir(base: &Path, browser: &str, scenario: &str) -> PathBuf {
    let ts = Utc::now().format("%Y%m%dT%H%M%S").to_string();
    base.join(browser).join(scenario).join(ts)
}

/// Controller state and stored preferences at the moment a scenario failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureState {
    pub scenario: String,
    pub error: String,
    /// `None` when the bridge was unreachable (page crashed or navigated away).
    pub snapshot: Option<PageSnapshot>,
    pub stored_theme: Option<String>,
    pub stored_font_size: Option<String>,
}

impl FailureState {
    pub async fn collect(bridge: &TestBridge<'_>, scenario: &str, err: &anyhow::Error) -> Self {
        let snapshot = match bridge.state().await {
            Ok(snapshot) => Some(snapshot),
            Err(bridge_err) => {
                log::debug!("no snapshot for {scenario}: {bridge_err:#}");
                None
            }
        };
        Self {
            scenario: scenario.to_string(),
            error: format!("{err:#}"),
            snapshot,
            stored_theme: bridge.preference(THEME_KEY).await.ok().flatten(),
            stored_font_size: bridge.preference(FONT_SIZE_KEY).await.ok().flatten(),
        }
    }

    /// Write `state.json` and, when available, the screenshot into `dir`.
    pub fn write(&self, dir: &Path, screenshot: Option<&[u8]>) -> Result<()> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        if let Some(png) = screenshot {
            fs::write(dir.join(SCREENSHOT_FILE), png).context("writing screenshot")?;
        }
        let payload = serde_json::to_vec_pretty(self).context("serializing failure state")?;
        fs::write(dir.join(STATE_FILE), payload).context("writing failure state")?;
        Ok(())
    }
}
