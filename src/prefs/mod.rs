//! Preference store merging.
//!
//! A preference store is a flat `.properties` file of string keys and values
//! (for example `.settings/org.eclipse.jdt.core.prefs`). The store is always
//! merged, never replaced: entries handed to [`merge_into`] are added or
//! overwritten, every other key keeps its prior value.
//!
//! The file must already exist. Its scaffold belongs to whatever generated
//! the IDE metadata; this module only ever reads-then-writes it, in one
//! synchronous call and without locking.

mod codec;

use crate::error::{ConveyorError, Result};
use crate::fs::atomic_write_file;
use indexmap::IndexMap;
use std::path::Path;
use tracing::{debug, error};

/// An ordered key/value preference store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferenceStore {
    entries: IndexMap<String, String>,
}

impl PreferenceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a store from `.properties` text.
    pub fn parse(content: &str) -> Self {
        Self {
            entries: codec::parse(content),
        }
    }

    /// Load a store from an existing file.
    ///
    /// Fails with `IoFailure` naming the path if the file cannot be read;
    /// a missing file is a failure too.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            error!(file = %path.display(), error = %e, "couldn't read preference store");
            ConveyorError::io("read", path, e)
        })?;
        Ok(Self::parse(&content))
    }

    /// Atomically write the store to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        atomic_write_file(path, &self.to_properties()).inspect_err(|e| {
            error!(file = %path.display(), error = %e, "couldn't write preference store");
        })
    }

    /// Render the store as `.properties` text.
    pub fn to_properties(&self) -> String {
        codec::format(&self.entries)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set one entry, returning the value it replaced.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Additive-overwrite merge: new keys are appended, existing keys keep
    /// their position and take the new value, untouched keys survive.
    pub fn merge<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.entries.insert(key.into(), value.into());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Merge `entries` into the preference file at `path`.
///
/// Reads the existing file, applies [`PreferenceStore::merge`], and writes it
/// back. Calls against the same file compose: each one sees the writes of
/// the calls before it.
pub fn merge_into<P, I, K, V>(path: P, entries: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let path = path.as_ref();
    let mut store = PreferenceStore::load(path)?;
    let before = store.len();

    store.merge(entries);
    store.save(path)?;

    debug!(
        file = %path.display(),
        added = store.len() - before,
        total = store.len(),
        "merged preferences"
    );
    Ok(())
}
