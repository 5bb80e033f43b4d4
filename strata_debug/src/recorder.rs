// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-order event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] by copying every event into an
//! owned [`RecordedEvent`]. Borrowed fields (storage keys, errors) are cloned,
//! so the log outlives the page that produced it and can be inspected in
//! tests or handed to [`json::export`](crate::json::export).

use kurbo::{Point, Rect};
use strata_core::dismissal::BannerViewState;
use strata_core::layer::LayerId;
use strata_core::page::{LayerRole, Region};
use strata_core::pointer::PointerKind;
use strata_core::storage::StoreError;
use strata_core::trace::{
    BannerDismissedEvent, BannerSettledEvent, PointerRoutedEvent, RegionMeasuredEvent,
    StoreFaultEvent, StoreOp, TraceSink,
};

/// A recorded event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A pointer event was routed.
    PointerRouted {
        /// What the pointer did.
        kind: PointerKind,
        /// Viewport position.
        position: Point,
        /// Receiving layer.
        target: LayerId,
        /// Its role.
        role: LayerRole,
    },
    /// The banner settled.
    BannerSettled {
        /// Storage key.
        key: String,
        /// Resulting state.
        state: BannerViewState,
    },
    /// The banner was dismissed.
    BannerDismissed {
        /// Storage key.
        key: String,
        /// Whether it was on screen.
        was_visible: bool,
        /// Whether the record was persisted.
        persisted: bool,
    },
    /// A storage fault was swallowed.
    StoreFault {
        /// Storage key.
        key: String,
        /// Failed operation.
        op: StoreOp,
        /// The error.
        error: StoreError,
    },
    /// A region was measured.
    RegionMeasured {
        /// Which region.
        region: Region,
        /// Its new bounds.
        bounds: Rect,
    },
}

/// A [`TraceSink`] that records every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns its log.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Discards everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_pointer_routed(&mut self, e: &PointerRoutedEvent) {
        self.events.push(RecordedEvent::PointerRouted {
            kind: e.kind,
            position: e.position,
            target: e.target,
            role: e.role,
        });
    }

    fn on_banner_settled(&mut self, e: &BannerSettledEvent<'_>) {
        self.events.push(RecordedEvent::BannerSettled {
            key: e.key.to_owned(),
            state: e.state,
        });
    }

    fn on_banner_dismissed(&mut self, e: &BannerDismissedEvent<'_>) {
        self.events.push(RecordedEvent::BannerDismissed {
            key: e.key.to_owned(),
            was_visible: e.was_visible,
            persisted: e.persisted,
        });
    }

    fn on_store_fault(&mut self, e: &StoreFaultEvent<'_>) {
        self.events.push(RecordedEvent::StoreFault {
            key: e.key.to_owned(),
            op: e.op,
            error: e.error.clone(),
        });
    }

    fn on_region_measured(&mut self, e: &RegionMeasuredEvent) {
        self.events.push(RecordedEvent::RegionMeasured {
            region: e.region,
            bounds: e.bounds,
        });
    }
}
