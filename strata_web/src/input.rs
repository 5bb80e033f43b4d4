// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM pointer input.
//!
//! [`PointerInput`] listens for `pointerdown`, `pointerup`, `pointermove`, and
//! `pointerleave` on one event target and converts each into a
//! [`PointerEvent`] in viewport (client) coordinates. Listeners are removed
//! when the `PointerInput` is dropped.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use strata_core::pointer::{PointerEvent, PointerKind};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

/// DOM event types listened for, in [`PointerKind`] order.
const EVENT_TYPES: [&str; 4] = ["pointerdown", "pointerup", "pointermove", "pointerleave"];

/// Maps a DOM event type to a [`PointerKind`].
#[must_use]
pub fn pointer_kind(event_type: &str) -> Option<PointerKind> {
    match event_type {
        "pointerdown" => Some(PointerKind::Down),
        "pointerup" => Some(PointerKind::Up),
        "pointermove" => Some(PointerKind::Move),
        "pointerleave" | "pointercancel" => Some(PointerKind::Leave),
        _ => None,
    }
}

type Listener = Closure<dyn FnMut(web_sys::PointerEvent)>;

/// Pointer listeners attached to one DOM target.
pub struct PointerInput {
    target: EventTarget,
    listeners: Vec<(&'static str, Listener)>,
}

impl core::fmt::Debug for PointerInput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerInput")
            .field("target", &"EventTarget")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PointerInput {
    /// Attaches listeners to `target` that forward every pointer event to
    /// `callback`.
    ///
    /// # Errors
    ///
    /// Returns the JS exception if a listener could not be attached; any
    /// listeners attached before the failure are removed again.
    pub fn attach(
        target: EventTarget,
        callback: impl FnMut(PointerEvent) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Rc::new(RefCell::new(callback));
        let mut input = Self {
            target,
            listeners: Vec::with_capacity(EVENT_TYPES.len()),
        };
        for event_type in EVENT_TYPES {
            let callback = callback.clone();
            let listener = Closure::wrap(Box::new(move |e: web_sys::PointerEvent| {
                let Some(kind) = pointer_kind(&e.type_()) else {
                    return;
                };
                let pointer_id = u32::try_from(e.pointer_id()).unwrap_or_default();
                let position = Point::new(f64::from(e.client_x()), f64::from(e.client_y()));
                callback.borrow_mut()(PointerEvent::new(kind, position).with_pointer_id(pointer_id));
            }) as Box<dyn FnMut(web_sys::PointerEvent)>);
            input
                .target
                .add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())?;
            input.listeners.push((event_type, listener));
        }
        Ok(input)
    }
}

impl Drop for PointerInput {
    fn drop(&mut self) {
        for (event_type, listener) in self.listeners.drain(..) {
            let _ = self
                .target
                .remove_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref());
        }
    }
}
