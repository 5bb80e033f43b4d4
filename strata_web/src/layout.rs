// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Measuring DOM elements into layer bounds.
//!
//! Regions are laid out by CSS; the page learns their geometry from
//! `getBoundingClientRect`. Layer bounds are relative to the parent layer, so
//! a nested region (the banner's dismiss control) is measured against its
//! parent's client rectangle.

use kurbo::{Point, Rect, Size, Vec2};
use web_sys::{Element, Window};

/// Returns the element's border box in viewport coordinates.
#[must_use]
pub fn client_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.right(), r.bottom())
}

/// Returns the element's border box relative to `parent`'s, or to the
/// viewport when there is no parent.
#[must_use]
pub fn measure(el: &Element, parent: Option<&Element>) -> Rect {
    let origin = parent.map_or(Point::ORIGIN, |p| client_rect(p).origin());
    relative_to(client_rect(el), origin)
}

/// Re-expresses `rect` relative to `origin`.
#[must_use]
pub fn relative_to(rect: Rect, origin: Point) -> Rect {
    rect - Vec2::new(origin.x, origin.y)
}

/// Returns the size of the window's layout viewport, or `None` if the window
/// does not report one.
#[must_use]
pub fn viewport_size(window: &Window) -> Option<Size> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_rect_is_relative_to_parent() {
        let dismiss = Rect::new(760.0, 14.0, 792.0, 46.0);
        let banner_origin = Point::new(0.0, 8.0);
        assert_eq!(
            relative_to(dismiss, banner_origin),
            Rect::new(760.0, 6.0, 792.0, 38.0)
        );
    }

    #[test]
    fn viewport_origin_is_identity() {
        let hero = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(relative_to(hero, Point::ORIGIN), hero);
    }
}
