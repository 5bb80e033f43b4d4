// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Strata splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Presenter**: Implements the [`Presenter`] trait to mirror evaluated
//!   layer changes into a platform-native tree (e.g. DOM elements), including
//!   each layer's pointer policy.
//!
//! - **Durable storage**: Implements
//!   [`KeyValueStore`](crate::storage::KeyValueStore) over the platform's
//!   client-side storage.
//!
//! - **Background surface**: Implements [`BackgroundSurface`] for the
//!   animated full-viewport layer.
//!
//! - **Input and ticks**: Feeds [`PointerEvent`](crate::pointer::PointerEvent)s
//!   and animation frames into the page. This is backend-specific and not
//!   abstracted by a trait because the setup and lifecycle differ
//!   fundamentally across platforms.
//!
//! # Crate boundaries
//!
//! `strata_core` owns the data model, hit testing, the dismissal state
//! machine, and this contract module. Backend crates depend on `strata_core`
//! and provide platform glue. Application code depends on both and wires them
//! together.

use kurbo::Point;

use crate::config::BackgroundConfig;
use crate::layer::{FrameChanges, LayerStore};

/// Applies evaluated frame changes to a platform-native presentation tree.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(time: f64) {
///     if first_frame {
///         page.settle(&local_storage, tracer);
///     }
///     page.set_region_bounds(Region::Hero, measure(hero_element));
///
///     // Evaluate: drain dirty channels, recompute world bounds
///     let changes = page.evaluate();
///
///     // Present: apply incremental changes to the native tree
///     presenter.apply(page.store(), &changes);
///     background.render(time);
/// }
/// ```
pub trait Presenter {
    /// Applies the given [`FrameChanges`] to the backing presentation tree,
    /// reading current property values from `store` as needed.
    fn apply(&mut self, store: &LayerStore, changes: &FrameChanges);
}

/// The animated full-viewport background widget.
pub trait BackgroundSurface {
    /// Applies a new parameter set.
    fn configure(&mut self, config: &BackgroundConfig);

    /// The pointer moved over the background. `position` is normalised to
    /// `0.0..=1.0` on both axes, origin at the top left.
    fn pointer_moved(&mut self, position: Point);

    /// The pointer left the background.
    fn pointer_left(&mut self);

    /// Draws one frame at `time_secs` since the surface started.
    fn render(&mut self, time_secs: f64);
}
