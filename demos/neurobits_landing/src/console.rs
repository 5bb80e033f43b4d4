// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace output to the browser console.
//!
//! Events only reach this sink when the `trace` feature is enabled.

use alloc::format;

use strata_core::pointer::PointerKind;
use strata_core::trace::{
    BannerDismissedEvent, BannerSettledEvent, PointerRoutedEvent, RegionMeasuredEvent,
    StoreFaultEvent, TraceSink,
};
use wasm_bindgen::JsValue;

/// Logs page events with `console.log`, and storage faults with
/// `console.warn`.
#[derive(Debug, Default)]
pub(crate) struct ConsoleSink;

fn log(line: &str) {
    web_sys::console::log_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_pointer_routed(&mut self, e: &PointerRoutedEvent) {
        // Moves arrive every frame; only presses and releases are worth a line.
        if e.kind == PointerKind::Move {
            return;
        }
        log(&format!(
            "[pointer] {} at ({},{}) -> {}",
            e.kind.as_str(),
            e.position.x,
            e.position.y,
            e.role.as_str(),
        ));
    }

    fn on_banner_settled(&mut self, e: &BannerSettledEvent<'_>) {
        log(&format!("[banner:settle] key={} state={:?}", e.key, e.state));
    }

    fn on_banner_dismissed(&mut self, e: &BannerDismissedEvent<'_>) {
        log(&format!(
            "[banner:dismiss] key={} was_visible={} persisted={}",
            e.key, e.was_visible, e.persisted,
        ));
    }

    fn on_store_fault(&mut self, e: &StoreFaultEvent<'_>) {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "[store:fault] {} key={}: {}",
            e.op.as_str(),
            e.key,
            e.error,
        )));
    }

    fn on_region_measured(&mut self, e: &RegionMeasuredEvent) {
        log(&format!(
            "[region] {} {}x{} at ({},{})",
            e.region.as_str(),
            e.bounds.width(),
            e.bounds.height(),
            e.bounds.x0,
            e.bounds.y0,
        ));
    }
}
