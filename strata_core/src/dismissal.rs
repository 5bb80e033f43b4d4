// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted one-time banner dismissal.
//!
//! A banner is mounted [`Hidden`](BannerViewState::Hidden) so nothing flashes
//! before the persisted flag has been read. A single settle step then looks
//! up the dismissal record for the banner's key and reveals the banner unless
//! the record says it was dismissed. Dismissal hides the banner immediately
//! and writes the record. Nothing in a mount ever brings a hidden banner back;
//! a new mount with no matching record does.
//!
//! ```text
//!   mount ──► Hidden (unsettled) ──settle──► Visible ──dismiss──► Hidden
//!                                  └───────► Hidden (record found)
//! ```
//!
//! Storage faults never reach the caller. A failed read counts as "not
//! dismissed" and a failed write still hides the banner for this mount. Both
//! are reported in the returned [`Settled`] / [`Dismissed`] values so the
//! host can trace them.

use alloc::string::String;

use crate::storage::{KeyValueStore, StoreError};

/// Key used when a banner does not name its own.
pub const DEFAULT_STORAGE_KEY: &str = "banner-dismissed";

/// The exact stored value that marks a banner as dismissed. Anything else,
/// including absence, means not dismissed.
pub const DISMISSED_VALUE: &str = "true";

/// Whether the banner is on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BannerViewState {
    /// Not rendered.
    #[default]
    Hidden,
    /// Rendered with its dismiss control.
    Visible,
}

impl BannerViewState {
    /// Returns `true` for [`Visible`](Self::Visible).
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Looks up the dismissal record for `key`.
///
/// Never fails: an unreadable store is treated as holding no record.
#[must_use]
pub fn check_visibility(store: &dyn KeyValueStore, key: &str) -> BannerViewState {
    read_record(store, key).0
}

/// Writes the dismissal record for `key`.
///
/// Idempotent, and silent on failure. Returns `true` if the record was
/// persisted.
pub fn dismiss(store: &mut dyn KeyValueStore, key: &str) -> bool {
    store.set(key, DISMISSED_VALUE).is_ok()
}

fn read_record(store: &dyn KeyValueStore, key: &str) -> (BannerViewState, Option<StoreError>) {
    match store.get(key) {
        Ok(Some(value)) if value == DISMISSED_VALUE => (BannerViewState::Hidden, None),
        Ok(_) => (BannerViewState::Visible, None),
        Err(err) => (BannerViewState::Visible, Some(err)),
    }
}

/// Result of [`DismissalGate::settle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settled {
    /// State after settling.
    pub state: BannerViewState,
    /// `false` if this call found the gate already settled and did nothing.
    pub checked: bool,
    /// The read error that was swallowed, if any.
    pub read_error: Option<StoreError>,
}

/// Result of [`DismissalGate::dismiss`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dismissed {
    /// `true` if the banner was visible and this call hid it.
    pub was_visible: bool,
    /// The write error that was swallowed, if any.
    pub write_error: Option<StoreError>,
}

impl Dismissed {
    /// Returns `true` if the record reached durable storage.
    #[must_use]
    pub fn persisted(&self) -> bool {
        self.write_error.is_none()
    }
}

/// The dismissal state machine for one mounted banner.
///
/// Gates with different keys share nothing; each owns its own state and only
/// ever reads or writes its own key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DismissalGate {
    key: String,
    state: BannerViewState,
    settled: bool,
}

impl DismissalGate {
    /// Mounts a gate for `key`. The banner starts hidden and unsettled.
    #[must_use]
    pub fn mount(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: BannerViewState::Hidden,
            settled: false,
        }
    }

    /// Returns the key this gate persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the current view state.
    #[must_use]
    pub fn state(&self) -> BannerViewState {
        self.state
    }

    /// Returns `true` once the persisted record has been consulted, or a
    /// dismissal made consulting it moot.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Applies the persisted record. Runs once per mount; later calls return
    /// the current state with `checked: false`.
    pub fn settle(&mut self, store: &dyn KeyValueStore) -> Settled {
        if self.settled {
            return Settled {
                state: self.state,
                checked: false,
                read_error: None,
            };
        }
        let (state, read_error) = read_record(store, &self.key);
        self.state = state;
        self.settled = true;
        Settled {
            state,
            checked: true,
            read_error,
        }
    }

    /// Hides the banner and persists the dismissal.
    ///
    /// The local transition happens first and unconditionally; the write is
    /// attempted every time, so repeated calls converge on the same record.
    /// Dismissing before [`settle`](Self::settle) also settles the gate, so a
    /// late settle cannot reveal the banner.
    pub fn dismiss(&mut self, store: &mut dyn KeyValueStore) -> Dismissed {
        let was_visible = self.state.is_visible();
        self.state = BannerViewState::Hidden;
        self.settled = true;
        Dismissed {
            was_visible,
            write_error: store.set(&self.key, DISMISSED_VALUE).err(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::storage::MemoryStore;

    /// A store whose reads and writes both fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected("QuotaExceededError".to_string()))
        }
    }

    /// Reads succeed, writes are counted.
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        writes: usize,
    }

    impl KeyValueStore for CountingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.writes += 1;
            self.inner.set(key, value)
        }
    }

    #[test]
    fn mounts_hidden_and_unsettled() {
        let gate = DismissalGate::mount("magic-update-banner");
        assert_eq!(gate.state(), BannerViewState::Hidden);
        assert!(!gate.is_settled());
    }

    #[test]
    fn no_record_means_visible() {
        let store = MemoryStore::new();
        for key in ["banner-dismissed", "magic-update-banner", ""] {
            assert_eq!(check_visibility(&store, key), BannerViewState::Visible);
        }
    }

    #[test]
    fn only_the_literal_true_dismisses() {
        let store = MemoryStore::with_entries([("a", "true"), ("b", "false"), ("c", "TRUE"), ("d", "")]);
        assert_eq!(check_visibility(&store, "a"), BannerViewState::Hidden);
        assert_eq!(check_visibility(&store, "b"), BannerViewState::Visible);
        assert_eq!(check_visibility(&store, "c"), BannerViewState::Visible);
        assert_eq!(check_visibility(&store, "d"), BannerViewState::Visible);
    }

    #[test]
    fn dismissed_key_stays_hidden_on_next_check() {
        let mut store = MemoryStore::new();
        assert!(dismiss(&mut store, "magic-update-banner"));
        assert_eq!(
            check_visibility(&store, "magic-update-banner"),
            BannerViewState::Hidden
        );
    }

    #[test]
    fn dismiss_twice_matches_dismiss_once() {
        let mut once = MemoryStore::new();
        dismiss(&mut once, "k");
        let mut twice = MemoryStore::new();
        dismiss(&mut twice, "k");
        dismiss(&mut twice, "k");
        assert_eq!(once, twice);
    }

    #[test]
    fn distinct_keys_are_independent() {
        let mut store = MemoryStore::new();
        let mut first = DismissalGate::mount("first");
        let mut second = DismissalGate::mount("second");
        first.settle(&store);
        second.settle(&store);

        first.dismiss(&mut store);

        assert_eq!(first.state(), BannerViewState::Hidden);
        assert_eq!(second.state(), BannerViewState::Visible);
        assert_eq!(check_visibility(&store, "second"), BannerViewState::Visible);
        assert!(!store.contains_key("second"));
    }

    #[test]
    fn fresh_storage_full_cycle() {
        let mut store = MemoryStore::new();
        let mut gate = DismissalGate::mount("magic-update-banner");

        let settled = gate.settle(&store);
        assert_eq!(settled.state, BannerViewState::Visible);
        assert!(settled.checked);

        let dismissed = gate.dismiss(&mut store);
        assert!(dismissed.was_visible);
        assert!(dismissed.persisted());
        assert_eq!(gate.state(), BannerViewState::Hidden);
        assert_eq!(
            store.get("magic-update-banner"),
            Ok(Some(DISMISSED_VALUE.to_string()))
        );
    }

    #[test]
    fn prepopulated_record_never_shows() {
        let store = MemoryStore::with_entries([("magic-update-banner", "true")]);
        let mut gate = DismissalGate::mount("magic-update-banner");
        assert_eq!(gate.settle(&store).state, BannerViewState::Hidden);
        assert_eq!(gate.settle(&store).state, BannerViewState::Hidden);
    }

    #[test]
    fn failing_read_fails_open() {
        let mut gate = DismissalGate::mount("magic-update-banner");
        let settled = gate.settle(&BrokenStore);
        assert_eq!(settled.state, BannerViewState::Visible);
        assert_eq!(settled.read_error, Some(StoreError::Unavailable));
        assert_eq!(
            check_visibility(&BrokenStore, "magic-update-banner"),
            BannerViewState::Visible
        );
    }

    #[test]
    fn failing_write_still_hides_locally() {
        let mut gate = DismissalGate::mount("k");
        gate.settle(&BrokenStore);
        let dismissed = gate.dismiss(&mut BrokenStore);
        assert_eq!(gate.state(), BannerViewState::Hidden);
        assert!(!dismissed.persisted());
        assert!(!dismiss(&mut BrokenStore, "k"));
    }

    #[test]
    fn settle_runs_once_per_mount() {
        let mut store = MemoryStore::new();
        let mut gate = DismissalGate::mount("k");
        gate.settle(&store);

        // A record appearing later does not change this mount.
        store.set("k", DISMISSED_VALUE).unwrap();
        let again = gate.settle(&store);
        assert!(!again.checked);
        assert_eq!(again.state, BannerViewState::Visible);
    }

    #[test]
    fn dismiss_before_settle_cannot_be_undone() {
        let mut store = CountingStore::default();
        let mut gate = DismissalGate::mount("k");
        let dismissed = gate.dismiss(&mut store);
        assert!(!dismissed.was_visible);

        store.inner.clear();
        assert_eq!(gate.settle(&store).state, BannerViewState::Hidden);
    }

    #[test]
    fn every_dismiss_attempts_the_write() {
        let mut store = CountingStore::default();
        let mut gate = DismissalGate::mount("k");
        gate.settle(&store);
        gate.dismiss(&mut store);
        gate.dismiss(&mut store);
        assert_eq!(store.writes, 2);
        assert_eq!(store.inner.len(), 1);
    }

    #[test]
    fn cleared_storage_shows_again_on_remount() {
        let mut store = MemoryStore::new();
        let mut gate = DismissalGate::mount("k");
        gate.settle(&store);
        gate.dismiss(&mut store);

        store.clear();
        let mut remounted = DismissalGate::mount("k");
        assert_eq!(remounted.settle(&store).state, BannerViewState::Visible);
    }
}
