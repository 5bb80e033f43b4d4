// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Durable key-value capability.
//!
//! The dismissal state machine never touches platform storage directly. It
//! is handed a [`KeyValueStore`], which lets browsers plug in
//! `localStorage` (see `strata_web::LocalStorage`) and tests plug in a
//! [`MemoryStore`] or a store that fails on purpose.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::fmt;

/// A storage operation failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The store cannot be reached at all (storage disabled, sandboxed
    /// context, no window).
    Unavailable,
    /// The store is reachable but refused the operation (quota exceeded,
    /// security error). Carries the platform's description.
    Rejected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("storage unavailable"),
            Self::Rejected(reason) => write!(f, "storage rejected the operation: {reason}"),
        }
    }
}

impl core::error::Error for StoreError {}

/// A flat string namespace with fallible reads and writes.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the value could not be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// An in-memory [`KeyValueStore`].
///
/// Useful for tests and for hosts without durable storage, where dismissal
/// then lasts for the lifetime of the store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given entries.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if a value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes every entry, as a user clearing site data would.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("banner-dismissed"), Ok(None));
        assert!(store.is_empty());
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryStore::with_entries([("k", "false")]);
        store.set("k", "true").unwrap();
        assert_eq!(store.get("k"), Ok(Some("true".into())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut store = MemoryStore::with_entries([("a", "1"), ("b", "2")]);
        store.clear();
        assert!(!store.contains_key("a"));
        assert_eq!(store.get("b"), Ok(None));
    }

    #[test]
    fn mutable_reference_is_a_store() {
        fn write(mut store: impl KeyValueStore) {
            store.set("k", "v").unwrap();
        }
        let mut store = MemoryStore::new();
        write(&mut store);
        assert!(store.contains_key("k"));
    }

    #[test]
    fn errors_describe_themselves() {
        assert_eq!(format!("{}", StoreError::Unavailable), "storage unavailable");
        assert_eq!(
            format!("{}", StoreError::Rejected("QuotaExceededError".into())),
            "storage rejected the operation: QuotaExceededError"
        );
    }
}
