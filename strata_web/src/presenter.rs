// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Mirrors [`LayerStore`] state into DOM elements by applying incremental
//! updates from [`FrameChanges`]. Two kinds of element are managed:
//!
//! - **Adopted** elements already exist in the page and are laid out by CSS
//!   (the hero, the menu, the banner). Their bounds flow the other way: the
//!   host measures them and feeds the result to the page. The presenter only
//!   writes `z-index`, `display`, and `pointer-events`.
//! - **Managed** elements are created by the presenter for layers nobody
//!   adopted. They are absolutely positioned from the layer's world bounds.
//!
//! Writing `pointer-events` keeps the browser's own hit testing in agreement
//! with [`LayerStore::hit_test`], so native behaviour such as following a
//! link in the menu lands on the same element the page routed to.
//!
//! [`LayerStore`]: strata_core::layer::LayerStore
//! [`FrameChanges`]: strata_core::layer::FrameChanges
//! [`LayerStore::hit_test`]: strata_core::layer::LayerStore::hit_test

use alloc::format;
use alloc::vec::Vec;

use strata_core::backend::Presenter;
use strata_core::layer::{FrameChanges, LayerId, LayerStore, PointerPolicy};
use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

/// Returns the CSS `pointer-events` value for a pointer policy.
#[must_use]
pub fn pointer_events_css(policy: PointerPolicy) -> &'static str {
    match policy {
        PointerPolicy::Capture => "auto",
        PointerPolicy::PassThrough => "none",
    }
}

struct Slot {
    el: HtmlElement,
    managed: bool,
}

/// Maps a [`LayerStore`] to live DOM elements, applying incremental updates
/// from [`FrameChanges`].
///
/// Call [`adopt`](Self::adopt) for every layer backed by existing markup
/// before the first [`apply`](Presenter::apply); any other added layer gets a
/// fresh `<div>` appended to the container.
pub struct DomPresenter {
    container: HtmlElement,
    elements: Vec<Option<Slot>>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("container", &"HtmlElement")
            .field("elements_len", &self.elements.len())
            .finish()
    }
}

impl DomPresenter {
    /// Creates a new presenter that appends managed elements to `container`.
    #[must_use]
    pub fn new(container: HtmlElement) -> Self {
        Self {
            container,
            elements: Vec::new(),
        }
    }

    /// Returns a reference to the container element.
    #[must_use]
    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    /// Binds an existing element to `layer`. Its layout stays under CSS
    /// control.
    pub fn adopt(&mut self, layer: LayerId, el: HtmlElement) {
        self.put_element(layer.index(), Slot { el, managed: false });
    }

    /// Returns the DOM element for the given slot index, if it exists.
    #[must_use]
    pub fn get_element(&self, idx: u32) -> Option<&HtmlElement> {
        self.slot(idx).map(|slot| &slot.el)
    }

    fn slot(&self, idx: u32) -> Option<&Slot> {
        self.elements.get(idx as usize).and_then(Option::as_ref)
    }

    /// Takes an element out of the slot, leaving `None`.
    fn take_element(&mut self, idx: u32) -> Option<Slot> {
        self.elements.get_mut(idx as usize)?.take()
    }

    /// Stores an element at the given slot index, growing the vec if needed.
    fn put_element(&mut self, idx: u32, slot: Slot) {
        let i = idx as usize;
        if self.elements.len() <= i {
            self.elements.resize_with(i + 1, || None);
        }
        self.elements[i] = Some(slot);
    }

    fn create_managed(&mut self, idx: u32) {
        let Some(doc) = self.container.owner_document() else {
            return;
        };
        let Ok(el) = doc.create_element("div") else {
            return;
        };
        let el: HtmlElement = el.unchecked_into();
        let s = el.style();
        let _ = s.set_property("position", "absolute");
        let _ = s.set_property("left", "0");
        let _ = s.set_property("top", "0");
        let _ = self.container.append_child(&el);
        self.put_element(idx, Slot { el, managed: true });
    }
}

impl Presenter for DomPresenter {
    /// Applies incremental changes from a [`FrameChanges`] to the DOM.
    fn apply(&mut self, store: &LayerStore, changes: &FrameChanges) {
        // 1. Removals (adopted markup belongs to the host and is left alone)
        for &idx in &changes.removed {
            if let Some(slot) = self.take_element(idx)
                && slot.managed
            {
                slot.el.remove();
            }
        }

        // 2. Additions
        for &idx in &changes.added {
            if self.slot(idx).is_none() {
                self.create_managed(idx);
            }
            if let Some(el) = self.get_element(idx) {
                let s = el.style();
                let _ = s.set_property("pointer-events", pointer_events_css(store.pointer_policy_at(idx)));
                if store.effective_hidden_at(idx) {
                    let _ = s.set_property("display", "none");
                }
            }
        }

        // 3. Geometry (managed elements only)
        for &idx in &changes.geometry {
            if let Some(slot) = self.slot(idx)
                && slot.managed
            {
                let rect = store.world_bounds_at(idx);
                let s = slot.el.style();
                let _ = s.set_property("transform", &format!("translate({}px,{}px)", rect.x0, rect.y0));
                let _ = s.set_property("width", &format!("{}px", rect.width()));
                let _ = s.set_property("height", &format!("{}px", rect.height()));
            }
        }

        // 4. Pointer policy
        for &idx in &changes.pointer {
            if let Some(el) = self.get_element(idx) {
                let _ = el
                    .style()
                    .set_property("pointer-events", pointer_events_css(store.pointer_policy_at(idx)));
            }
        }

        // 5. Hidden/unhidden
        for &idx in &changes.hidden {
            if let Some(el) = self.get_element(idx) {
                let _ = el.style().set_property("display", "none");
            }
        }
        for &idx in &changes.unhidden {
            if let Some(el) = self.get_element(idx) {
                let _ = el.style().remove_property("display");
            }
        }

        // 6. Stacking
        if changes.topology_changed {
            for &idx in store.traversal_order() {
                if let Some(el) = self.get_element(idx) {
                    let _ = el
                        .style()
                        .set_property("z-index", &format!("{}", store.z_index_at(idx)));
                }
            }
        }
    }
}
