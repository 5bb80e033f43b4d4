// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use kurbo::Rect;
use strata_core::trace::{
    BannerDismissedEvent, BannerSettledEvent, PointerRoutedEvent, RegionMeasuredEvent,
    StoreFaultEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn rect(r: Rect) -> String {
    format!("({},{})-({},{})", r.x0, r.y0, r.x1, r.y1)
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pointer_routed(&mut self, e: &PointerRoutedEvent) {
        let _ = writeln!(
            self.writer,
            "[pointer] {} at ({},{}) -> {} {:?}",
            e.kind.as_str(),
            e.position.x,
            e.position.y,
            e.role.as_str(),
            e.target,
        );
    }

    fn on_banner_settled(&mut self, e: &BannerSettledEvent<'_>) {
        let _ = writeln!(self.writer, "[banner:settle] key={} state={:?}", e.key, e.state);
    }

    fn on_banner_dismissed(&mut self, e: &BannerDismissedEvent<'_>) {
        let persisted = if e.persisted { "persisted" } else { "NOT persisted" };
        let _ = writeln!(
            self.writer,
            "[banner:dismiss] key={} was_visible={} {persisted}",
            e.key, e.was_visible,
        );
    }

    fn on_store_fault(&mut self, e: &StoreFaultEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[store:fault] {} key={}: {}",
            e.op.as_str(),
            e.key,
            e.error,
        );
    }

    fn on_region_measured(&mut self, e: &RegionMeasuredEvent) {
        let _ = writeln!(
            self.writer,
            "[region] {} bounds={}",
            e.region.as_str(),
            rect(e.bounds),
        );
    }
}
