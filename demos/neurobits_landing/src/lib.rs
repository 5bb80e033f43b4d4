// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web demo: the Neurobits landing page driven by `strata_web`.
//!
//! Builds the page described by `page.json`: a WebGL dither background that
//! follows the pointer, a pass-through content wrapper, the hero, the
//! screenshot gallery, the card menu, and a one-time dismissible banner.
//! Every pointer event is routed through [`Page::pointer`], so the background
//! reacts only where no region sits above it.
//!
//! Build with: `wasm-pack build --target web demos/neurobits_landing`
//!
//! Enable the `trace` feature to log page events to the browser console.
//!
//! [`Page::pointer`]: strata_core::page::Page::pointer

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod console;
mod dither;
mod markup;

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use kurbo::{Point, Size};
use strata_core::backend::BackgroundSurface as _;
use strata_core::config::PageConfig;
use strata_core::page::{LayerRole, Page, Region};
use strata_core::pointer::{PointerEvent, PointerKind};
use strata_core::trace::Tracer;
use strata_web::{AnimationFrame, DomPresenter, LocalStorage, PointerInput, Presenter as _, RafLoop, layout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, Window};

use crate::console::ConsoleSink;
use crate::dither::DitherSurface;
use crate::markup::{Markup, advance_gallery};

const PAGE_JSON: &str = include_str!("../page.json");

/// Viewport assumed when the window does not report one.
const FALLBACK_VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Loads the embedded page description, falling back to the built-in preset.
fn load_config() -> PageConfig {
    serde_json::from_str(PAGE_JSON).unwrap_or_else(|_| PageConfig::neurobits())
}

struct Landing {
    window: Window,
    page: Page,
    presenter: DomPresenter,
    storage: LocalStorage,
    console: ConsoleSink,
    markup: Markup,
    gallery_degrees: f64,
    showcase_hovered: bool,
    last_elapsed: f64,
}

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let config = load_config();
    let viewport = layout::viewport_size(&window).unwrap_or(FALLBACK_VIEWPORT);
    let markup = Markup::build(&document, &body, &config)?;

    let mut surface = DitherSurface::new(markup.background.clone(), &config.background)?;
    surface.resize(viewport, window.device_pixel_ratio());
    let surface = Rc::new(RefCell::new(surface));

    let mut page = Page::new(config, viewport);
    let mut presenter = DomPresenter::new(markup.wrapper.clone());
    for (role, el) in markup.layers() {
        if let Some(layer) = page.layer(role) {
            presenter.adopt(layer, el);
        }
    }

    let surface_cb = Rc::clone(&surface);
    page.on_pointer(LayerRole::Background, move |event: &PointerEvent, local: Point| {
        let mut surface = surface_cb.borrow_mut();
        if event.kind == PointerKind::Leave {
            surface.pointer_left();
            return;
        }
        let size = surface.size();
        if size.width > 0.0 && size.height > 0.0 {
            surface.pointer_moved(Point::new(local.x / size.width, local.y / size.height));
        }
    });

    // Hide the banner before the first paint; it is settled on frame 0.
    let initial = page.evaluate();
    presenter.apply(page.store(), &initial);

    let state = Rc::new(RefCell::new(Landing {
        window,
        page,
        presenter,
        storage: LocalStorage::open(),
        console: ConsoleSink,
        markup,
        gallery_degrees: 0.0,
        showcase_hovered: false,
        last_elapsed: 0.0,
    }));

    let root: EventTarget = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("no document element"))?
        .into();
    let state_cb = Rc::clone(&state);
    let input = PointerInput::attach(root, move |event| on_pointer(&state_cb, event))?;

    attach_menu_toggle(&state)?;
    attach_keyboard_dismiss(&state)?;

    let state_cb = Rc::clone(&state);
    let raf = RafLoop::new(move |frame| on_frame(&state_cb, &surface, frame));
    raf.start();

    // Keep the loop and the listeners alive; there is no graceful shutdown on
    // the web.
    core::mem::forget(raf);
    core::mem::forget(input);

    Ok(())
}

fn on_pointer(state: &Rc<RefCell<Landing>>, event: PointerEvent) {
    let mut guard = state.borrow_mut();
    let s = &mut *guard;
    let mut tracer = Tracer::new(&mut s.console);
    let routed = s.page.pointer(event, &mut s.storage, &mut tracer);
    s.showcase_hovered = routed.is_some_and(|r| r.role == LayerRole::Region(Region::Showcase));
}

fn on_frame(state: &Rc<RefCell<Landing>>, surface: &Rc<RefCell<DitherSurface>>, frame: AnimationFrame) {
    let mut guard = state.borrow_mut();
    let s = &mut *guard;
    let mut tracer = Tracer::new(&mut s.console);

    if frame.is_first() {
        s.page.settle(&s.storage, &mut tracer);
    }

    if let Some(viewport) = layout::viewport_size(&s.window)
        && viewport != s.page.viewport()
    {
        s.page.resize(viewport);
        surface
            .borrow_mut()
            .resize(viewport, s.window.device_pixel_ratio());
    }

    for region in Region::ALL {
        if let Some((el, parent)) = s.markup.region(region) {
            let bounds = layout::measure(el, Some(parent));
            s.page.set_region_bounds(region, bounds, &mut tracer);
        }
    }

    let changes = s.page.evaluate();
    s.presenter.apply(s.page.store(), &changes);

    let delta = frame.elapsed_secs - s.last_elapsed;
    s.last_elapsed = frame.elapsed_secs;
    s.gallery_degrees = advance_gallery(
        s.gallery_degrees,
        delta,
        &s.page.config().showcase,
        s.showcase_hovered,
    );
    s.markup.turn_gallery(s.gallery_degrees);

    surface.borrow_mut().render(frame.elapsed_secs);
}

/// Opens and closes the card menu. Its measured bounds follow on the next
/// frame.
fn attach_menu_toggle(state: &Rc<RefCell<Landing>>) -> Result<(), JsValue> {
    let s = state.borrow();
    let nav = s.markup.nav.clone();
    let on_click = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
        let _ = nav.class_list().toggle("open");
    }) as Box<dyn FnMut(web_sys::MouseEvent)>);
    s.markup
        .nav_toggle
        .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

/// Dismisses the banner when its button is activated from the keyboard.
///
/// Pointer clicks never reach this path: the page already dismissed the
/// banner when it routed the release.
fn attach_keyboard_dismiss(state: &Rc<RefCell<Landing>>) -> Result<(), JsValue> {
    let Some(dismiss) = state.borrow().markup.dismiss.clone() else {
        return Ok(());
    };
    let state_cb = Rc::clone(state);
    let on_click = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
        if e.detail() != 0 {
            return;
        }
        let mut guard = state_cb.borrow_mut();
        let s = &mut *guard;
        let mut tracer = Tracer::new(&mut s.console);
        s.page.dismiss_banner(&mut s.storage, &mut tracer);
    }) as Box<dyn FnMut(web_sys::MouseEvent)>);
    dismiss.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}
