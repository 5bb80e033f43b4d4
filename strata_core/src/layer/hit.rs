// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing and stack validation.
//!
//! A pointer event is resolved by exactly one layer: walking the paint order
//! from the top, the first layer that is visible, has
//! [`Capture`](PointerPolicy::Capture) policy, has non-empty world bounds, and
//! contains the point. Pass-through layers never resolve an event, but their
//! descendants still can. A region whose bounds collapsed to zero (e.g. an
//! image that failed to load) is simply skipped, so the event falls through
//! to whatever lies beneath it.

use core::fmt;

use kurbo::{Point, Rect, Size};

use super::id::{INVALID, LayerId};
use super::policy::PointerPolicy;
use super::store::LayerStore;

/// Why a layer stack can leave pointer input unhandled or doubly handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackError {
    /// No visible capturing layer covers the whole viewport.
    NoBackground,
    /// More than one visible capturing layer covers the whole viewport; the
    /// payload is the upper one.
    MultipleBackgrounds(LayerId),
    /// The full-viewport capturing layer is not the bottommost layer.
    BackgroundNotLowest(LayerId),
    /// A visible pass-through layer above the background has no visible
    /// capturing descendant with a non-empty sub-rectangle, so its content
    /// can never receive pointer input.
    UnreachablePassThrough(LayerId),
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBackground => f.write_str("no capturing layer covers the viewport"),
            Self::MultipleBackgrounds(id) => {
                write!(f, "{id:?} also captures the whole viewport")
            }
            Self::BackgroundNotLowest(id) => {
                write!(f, "background {id:?} is not the bottommost layer")
            }
            Self::UnreachablePassThrough(id) => {
                write!(f, "pass-through {id:?} has no capturing region")
            }
        }
    }
}

impl core::error::Error for StackError {}

impl LayerStore {
    /// Returns the topmost layer that captures pointer input at `point`
    /// (viewport coordinates), or `None` for a dead zone.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<LayerId> {
        self.traversal_order
            .iter()
            .rev()
            .copied()
            .find(|&idx| self.captures_at(idx, point))
            .map(|idx| self.handle(idx))
    }

    /// Checks that the stack resolves every pointer position in `viewport`
    /// to exactly one layer, and returns the background layer.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    ///
    /// # Errors
    ///
    /// Returns the first [`StackError`] found.
    pub fn validate_stack(&self, viewport: Size) -> Result<LayerId, StackError> {
        let screen = Rect::from_origin_size(Point::ORIGIN, viewport);

        let mut background = None;
        for &idx in &self.traversal_order {
            let i = idx as usize;
            if self.effective_hidden[i] || !self.pointer[i].captures() {
                continue;
            }
            if covers(self.world_bounds[i], screen) {
                if background.is_some() {
                    return Err(StackError::MultipleBackgrounds(self.handle(idx)));
                }
                background = Some(idx);
            }
        }
        let background = background.ok_or(StackError::NoBackground)?;
        if self.z_rank[background as usize] != 0 {
            return Err(StackError::BackgroundNotLowest(self.handle(background)));
        }

        for &idx in &self.traversal_order[1..] {
            let i = idx as usize;
            if self.effective_hidden[i] || self.pointer[i] != PointerPolicy::PassThrough {
                continue;
            }
            if !self.has_capturing_descendant(idx, screen) {
                return Err(StackError::UnreachablePassThrough(self.handle(idx)));
            }
        }

        Ok(self.handle(background))
    }

    fn captures_at(&self, idx: u32, point: Point) -> bool {
        let i = idx as usize;
        let bounds = self.world_bounds[i];
        !self.effective_hidden[i]
            && self.pointer[i].captures()
            && has_area(bounds)
            && bounds.contains(point)
    }

    fn has_capturing_descendant(&self, idx: u32, screen: Rect) -> bool {
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            let c = child as usize;
            if !self.effective_hidden[c] {
                let bounds = self.world_bounds[c];
                if self.pointer[c].captures() && has_area(bounds) && !covers(bounds, screen) {
                    return true;
                }
                if self.has_capturing_descendant(child, screen) {
                    return true;
                }
            }
            child = self.next_sibling[c];
        }
        false
    }
}

fn has_area(rect: Rect) -> bool {
    rect.width() > 0.0 && rect.height() > 0.0
}

fn covers(outer: Rect, inner: Rect) -> bool {
    outer.x0 <= inner.x0 && outer.y0 <= inner.y0 && outer.x1 >= inner.x1 && outer.y1 >= inner.y1
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(800.0, 600.0);

    struct Stack {
        store: LayerStore,
        background: LayerId,
        wrapper: LayerId,
        nav: LayerId,
        banner: LayerId,
        dismiss: LayerId,
    }

    /// Background → pass-through wrapper → nav and banner (with a dismiss
    /// control inside the banner).
    fn stack() -> Stack {
        let mut store = LayerStore::new();
        let screen = Rect::from_origin_size(Point::ORIGIN, VIEWPORT);

        let background = store.create_layer();
        store.set_bounds(background, screen);

        let wrapper = store.create_layer();
        store.set_bounds(wrapper, screen);
        store.set_pointer_policy(wrapper, PointerPolicy::PassThrough);

        let nav = store.create_layer();
        store.set_bounds(nav, Rect::new(100.0, 20.0, 700.0, 80.0));
        store.add_child(wrapper, nav);

        let banner = store.create_layer();
        store.set_bounds(banner, Rect::new(0.0, 0.0, 800.0, 60.0));
        store.add_child(wrapper, banner);

        let dismiss = store.create_layer();
        store.set_bounds(dismiss, Rect::new(760.0, 14.0, 792.0, 46.0));
        store.add_child(banner, dismiss);

        let _ = store.evaluate();
        Stack {
            store,
            background,
            wrapper,
            nav,
            banner,
            dismiss,
        }
    }

    #[test]
    fn empty_space_falls_through_to_background() {
        let s = stack();
        assert_eq!(s.store.hit_test(Point::new(400.0, 300.0)), Some(s.background));
    }

    #[test]
    fn region_captures_inside_its_bounds() {
        let mut s = stack();
        s.store.set_hidden(s.banner, true);
        let _ = s.store.evaluate();
        assert_eq!(s.store.hit_test(Point::new(150.0, 50.0)), Some(s.nav));
    }

    #[test]
    fn innermost_topmost_region_wins() {
        let s = stack();
        assert_eq!(s.store.hit_test(Point::new(770.0, 30.0)), Some(s.dismiss));
        // Banner sits above the nav where they overlap.
        assert_eq!(s.store.hit_test(Point::new(150.0, 30.0)), Some(s.banner));
    }

    #[test]
    fn hidden_region_is_not_hit() {
        let mut s = stack();
        s.store.set_hidden(s.banner, true);
        let _ = s.store.evaluate();
        assert_eq!(s.store.hit_test(Point::new(770.0, 30.0)), Some(s.background));
        assert_eq!(s.store.hit_test(Point::new(150.0, 30.0)), Some(s.nav));
    }

    #[test]
    fn zero_size_region_degrades_to_background() {
        let mut s = stack();
        s.store.set_hidden(s.banner, true);
        s.store.set_bounds(s.nav, Rect::new(100.0, 20.0, 100.0, 20.0));
        let _ = s.store.evaluate();
        assert_eq!(s.store.hit_test(Point::new(100.0, 20.0)), Some(s.background));
    }

    #[test]
    fn outside_the_viewport_is_a_dead_zone() {
        let s = stack();
        assert_eq!(s.store.hit_test(Point::new(-5.0, 10.0)), None);
    }

    #[test]
    fn valid_stack_reports_background() {
        let s = stack();
        assert_eq!(s.store.validate_stack(VIEWPORT), Ok(s.background));
    }

    #[test]
    fn wrapper_without_regions_is_unreachable() {
        let mut s = stack();
        s.store.set_hidden(s.nav, true);
        s.store.set_hidden(s.banner, true);
        let _ = s.store.evaluate();
        assert_eq!(
            s.store.validate_stack(VIEWPORT),
            Err(StackError::UnreachablePassThrough(s.wrapper))
        );
    }

    #[test]
    fn capturing_wrapper_is_a_second_background() {
        let mut s = stack();
        s.store.set_pointer_policy(s.wrapper, PointerPolicy::Capture);
        let _ = s.store.evaluate();
        assert_eq!(
            s.store.validate_stack(VIEWPORT),
            Err(StackError::MultipleBackgrounds(s.wrapper))
        );
    }

    #[test]
    fn missing_background_is_reported() {
        let mut s = stack();
        s.store.set_hidden(s.background, true);
        let _ = s.store.evaluate();
        assert_eq!(
            s.store.validate_stack(VIEWPORT),
            Err(StackError::NoBackground)
        );
    }

    #[test]
    fn background_above_content_is_rejected() {
        let mut store = LayerStore::new();
        let screen = Rect::from_origin_size(Point::ORIGIN, VIEWPORT);
        let wrapper = store.create_layer();
        store.set_bounds(wrapper, screen);
        store.set_pointer_policy(wrapper, PointerPolicy::PassThrough);
        let region = store.create_layer();
        store.set_bounds(region, Rect::new(0.0, 0.0, 10.0, 10.0));
        store.add_child(wrapper, region);
        let background = store.create_layer();
        store.set_bounds(background, screen);
        let _ = store.evaluate();

        assert_eq!(
            store.validate_stack(VIEWPORT),
            Err(StackError::BackgroundNotLowest(background))
        );
    }
}
