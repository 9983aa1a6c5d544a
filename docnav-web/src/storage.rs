//! `localStorage`-backed preferences.
use docnav_core::PreferenceStore;

use crate::dom;
use crate::error::WebStorageError;

/// Preference store over `window.localStorage`. The handle is looked up on
/// every access so a page without storage still runs with default preferences.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalPreferenceStore;

impl PreferenceStore for LocalPreferenceStore {
    type Error = WebStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = dom::local_storage()?;
        Ok(storage.get_item(key)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = dom::local_storage()?;
        storage.set_item(key, value)?;
        Ok(())
    }
}
