//! Key-value preference storage.
//!
//! The page keeps exactly two string preferences (`theme`, `fontSize`). The
//! store is injected so the controller runs the same against browser
//! `localStorage` and against [`MemoryStore`] in tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// Trait for abstracting preference persistence.
/// Platform-specific implementations should provide this
pub trait PreferenceStore {
    type Error: std::error::Error + 'static;

    /// Read a stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Write a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    type Error = S::Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set(key, value)
    }
}

/// Read a preference, treating read failures as absence.
pub fn read_pref<S: PreferenceStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("preference read for `{key}` failed: {err}");
            None
        }
    }
}

/// Write a preference; failures are logged and otherwise ignored.
pub fn write_pref<S: PreferenceStore>(store: &S, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        log::warn!("preference write for `{key}` failed: {err}");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error("store is read-only")]
    ReadOnly,
}

/// In-memory store used by tests and the QA harness.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, String>>,
    read_only: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with the given pairs.
    #[must_use]
    pub fn with_entries<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().extend(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        store
    }

    /// Reject every subsequent write, as a browser does when storage is full or disabled.
    pub fn read_only(&self, enabled: bool) {
        self.read_only.set(enabled);
    }

    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl PreferenceStore for MemoryStore {
    type Error = MemoryStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        if self.read_only.get() {
            return Err(MemoryStoreError::ReadOnly);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_and_counts_writes() {
        let store = MemoryStore::new();
        assert_eq!(read_pref(&store, "theme"), None);
        write_pref(&store, "theme", "dark");
        assert_eq!(read_pref(&store, "theme").as_deref(), Some("dark"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn read_only_store_swallows_write_failures() {
        let store = MemoryStore::with_entries([("fontSize", "18")]);
        store.read_only(true);
        write_pref(&store, "fontSize", "19");
        assert_eq!(store.value("fontSize").as_deref(), Some("18"));
        assert_eq!(store.write_count(), 0);
        assert!(matches!(
            store.set("fontSize", "19"),
            Err(MemoryStoreError::ReadOnly)
        ));
    }
}
