// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for page interaction.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Page`](crate::page::Page) calls as pointer input is routed, the banner
//! settles or is dismissed, storage misbehaves, or the host measures a
//! region. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Storage faults are only ever reported here. They are never surfaced to the
//! person viewing the page.

use kurbo::{Point, Rect};

use crate::dismissal::BannerViewState;
use crate::layer::LayerId;
use crate::page::{LayerRole, Region};
use crate::pointer::PointerKind;
use crate::storage::StoreError;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which storage operation failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreOp {
    /// Reading the dismissal record while settling.
    Read,
    /// Writing the dismissal record.
    Write,
}

impl StoreOp {
    /// Short lowercase name, for log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a pointer event has been resolved to its single target.
#[derive(Clone, Copy, Debug)]
pub struct PointerRoutedEvent {
    /// What the pointer did.
    pub kind: PointerKind,
    /// Position in viewport coordinates.
    pub position: Point,
    /// The layer that received the event.
    pub target: LayerId,
    /// The page role of the target.
    pub role: LayerRole,
}

/// Emitted when the banner's persisted record has been consulted.
#[derive(Clone, Copy, Debug)]
pub struct BannerSettledEvent<'a> {
    /// Storage key of the banner.
    pub key: &'a str,
    /// State after settling.
    pub state: BannerViewState,
}

/// Emitted when the banner is dismissed.
#[derive(Clone, Copy, Debug)]
pub struct BannerDismissedEvent<'a> {
    /// Storage key of the banner.
    pub key: &'a str,
    /// Whether the banner was on screen when dismissed.
    pub was_visible: bool,
    /// Whether the record reached durable storage.
    pub persisted: bool,
}

/// Emitted when a storage operation fails and the failure is swallowed.
#[derive(Clone, Copy, Debug)]
pub struct StoreFaultEvent<'a> {
    /// Key being read or written.
    pub key: &'a str,
    /// Which operation failed.
    pub op: StoreOp,
    /// What went wrong.
    pub error: &'a StoreError,
}

/// Emitted when the host reports a region's measured bounds.
#[derive(Clone, Copy, Debug)]
pub struct RegionMeasuredEvent {
    /// Which region was measured.
    pub region: Region,
    /// Bounds relative to the content wrapper.
    pub bounds: Rect,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from a page.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a pointer event has been routed.
    fn on_pointer_routed(&mut self, e: &PointerRoutedEvent) {
        _ = e;
    }

    /// Called when the banner settles.
    fn on_banner_settled(&mut self, e: &BannerSettledEvent<'_>) {
        _ = e;
    }

    /// Called when the banner is dismissed.
    fn on_banner_dismissed(&mut self, e: &BannerDismissedEvent<'_>) {
        _ = e;
    }

    /// Called when a storage fault is swallowed.
    fn on_store_fault(&mut self, e: &StoreFaultEvent<'_>) {
        _ = e;
    }

    /// Called when a region's bounds are measured.
    fn on_region_measured(&mut self, e: &RegionMeasuredEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PointerRoutedEvent`].
    #[inline]
    pub fn pointer_routed(&mut self, e: &PointerRoutedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pointer_routed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BannerSettledEvent`].
    #[inline]
    pub fn banner_settled(&mut self, e: &BannerSettledEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_banner_settled(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BannerDismissedEvent`].
    #[inline]
    pub fn banner_dismissed(&mut self, e: &BannerDismissedEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_banner_dismissed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StoreFaultEvent`].
    #[inline]
    pub fn store_fault(&mut self, e: &StoreFaultEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_store_fault(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RegionMeasuredEvent`].
    #[inline]
    pub fn region_measured(&mut self, e: &RegionMeasuredEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_region_measured(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fault(error: &StoreError) -> StoreFaultEvent<'_> {
        StoreFaultEvent {
            key: "banner-dismissed",
            op: StoreOp::Write,
            error,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_banner_settled(&BannerSettledEvent {
            key: "banner-dismissed",
            state: BannerViewState::Visible,
        });
        sink.on_store_fault(&sample_fault(&StoreError::Unavailable));
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.store_fault(&sample_fault(&StoreError::Unavailable));
        tracer.region_measured(&RegionMeasuredEvent {
            region: Region::Hero,
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
        });
    }

    #[test]
    fn store_op_names() {
        assert_eq!(StoreOp::Read.as_str(), "read");
        assert_eq!(StoreOp::Write.as_str(), "write");
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::string::{String, ToString};
        use alloc::vec::Vec;

        struct RecordingSink {
            keys: Vec<String>,
        }
        impl TraceSink for RecordingSink {
            fn on_banner_dismissed(&mut self, e: &BannerDismissedEvent<'_>) {
                self.keys.push(e.key.to_string());
            }
        }

        let mut sink = RecordingSink { keys: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.banner_dismissed(&BannerDismissedEvent {
            key: "magic-update-banner",
            was_visible: true,
            persisted: true,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.keys, &["magic-update-banner"]);
    }
}
