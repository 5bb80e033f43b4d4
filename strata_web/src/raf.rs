// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` tick source.
//!
//! [`RafLoop`] drives the page's frame loop using the browser's
//! `requestAnimationFrame` API. Each callback receives a
//! [`DOMHighResTimeStamp`][mdn] (milliseconds), which is passed on together
//! with the frame index and the time since the first frame.
//!
//! The first callback runs after the initial paint, which makes frame `0` the
//! right moment to [`settle`](strata_core::page::Page::settle) the banner.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings, so no Window object is fetched on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// One animation frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    /// Frames delivered before this one since the loop was created.
    pub index: u64,
    /// The `requestAnimationFrame` timestamp, in milliseconds.
    pub timestamp_ms: f64,
    /// Seconds since the first frame.
    pub elapsed_secs: f64,
}

impl AnimationFrame {
    /// Builds a frame from its timestamp and the first frame's timestamp.
    #[must_use]
    pub fn new(index: u64, timestamp_ms: f64, first_ms: f64) -> Self {
        Self {
            index,
            timestamp_ms,
            elapsed_secs: (timestamp_ms - first_ms).max(0.0) / 1000.0,
        }
    }

    /// Returns `true` for the first frame, painted right after mount.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }
}

/// A `requestAnimationFrame` animation loop that emits [`AnimationFrame`]s.
///
/// Create with [`RafLoop::new`], then call [`start`](Self::start) to begin
/// receiving callbacks. The loop re-registers itself each frame until
/// [`stop`](Self::stop) is called or the `RafLoop` is dropped.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Stored in its own `RefCell` so we can set it once in `start()` and
    /// reference it from inside itself without conflicting with `callback`.
    closure: RefCell<Option<RafClosure>>,

    /// The user-supplied callback.
    callback: RefCell<Box<dyn FnMut(AnimationFrame)>>,

    /// Monotonically increasing frame counter.
    frame_counter: Cell<u64>,

    /// Timestamp of frame 0, once seen.
    first_ms: Cell<Option<f64>>,

    /// Whether the loop is currently running.
    running: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call,
    /// used by [`cancel_animation_frame`] when stopping.
    raf_id: Cell<i32>,
}

impl RafLoop {
    /// Creates a new `RafLoop` that is **not yet running**.
    pub fn new(callback: impl FnMut(AnimationFrame) + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                frame_counter: Cell::new(0),
                first_ms: Cell::new(None),
                running: Cell::new(false),
                raf_id: Cell::new(0),
            }),
        }
    }

    /// Starts the animation loop.
    ///
    /// If already running, this is a no-op.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        let inner = Rc::clone(&self.inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            if !inner.running.get() {
                return;
            }

            let first_ms = inner.first_ms.get().unwrap_or(timestamp_ms);
            inner.first_ms.set(Some(first_ms));
            let index = inner.frame_counter.get();
            inner.frame_counter.set(index + 1);

            // The borrow is scoped so it doesn't overlap with the `closure`
            // RefCell.
            inner.callback.borrow_mut()(AnimationFrame::new(index, timestamp_ms, first_ms));

            // Re-register for the next frame if still running.
            if inner.running.get()
                && let Some(ref closure) = *inner.closure.borrow()
            {
                let id = request_animation_frame(closure.as_ref().unchecked_ref());
                inner.raf_id.set(id);
            }
        }) as Box<dyn FnMut(f64)>);

        // Register the first frame.
        let id = request_animation_frame(closure.as_ref().unchecked_ref());
        self.inner.raf_id.set(id);
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    /// Stops the animation loop.
    ///
    /// The pending `requestAnimationFrame` callback is cancelled. Can be
    /// restarted by calling [`start`](Self::start) again.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        cancel_animation_frame(self.inner.raf_id.get());
    }

    /// Returns `true` if the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.inner.running.get())
            .field("frame_counter", &self.inner.frame_counter.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_measured_from_first_frame() {
        let first = AnimationFrame::new(0, 1500.0, 1500.0);
        assert!(first.is_first());
        assert_eq!(first.elapsed_secs, 0.0);

        let later = AnimationFrame::new(30, 2000.0, 1500.0);
        assert!(!later.is_first());
        assert_eq!(later.elapsed_secs, 0.5);
    }

    #[test]
    fn clock_going_backwards_clamps_to_zero() {
        assert_eq!(AnimationFrame::new(1, 1000.0, 1500.0).elapsed_secs, 0.0);
    }
}
