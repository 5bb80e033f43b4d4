// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `window.localStorage` as a [`KeyValueStore`].
//!
//! Browsers can deny storage outright (disabled cookies, sandboxed frames,
//! some private modes) or throw on individual calls (`SecurityError`,
//! `QuotaExceededError`). Both surface as [`StoreError`]s; nothing here
//! panics.

use alloc::string::{String, ToString};

use strata_core::storage::{KeyValueStore, StoreError};
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{DomException, Storage};

/// The browser's `localStorage`, or nothing if it is not available.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl core::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LocalStorage")
            .field("available", &self.storage.is_some())
            .finish()
    }
}

impl LocalStorage {
    /// Opens `localStorage` for the current window.
    ///
    /// Never fails: an inaccessible store is remembered as unavailable and
    /// every operation on it returns [`StoreError::Unavailable`].
    #[must_use]
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }

    /// Returns `true` if the browser granted access to `localStorage`.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage, StoreError> {
        self.storage.as_ref().ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage()?.get_item(key).map_err(rejected)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage()?.set_item(key, value).map_err(rejected)
    }
}

/// Converts a thrown JS value into [`StoreError::Rejected`], keeping the
/// exception name where there is one.
fn rejected(err: JsValue) -> StoreError {
    let reason = match err.dyn_ref::<DomException>() {
        Some(exception) => exception.name(),
        None => err.as_string().unwrap_or_else(|| "unknown error".to_string()),
    };
    StoreError::Rejected(reason)
}
