// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Layer mutations mark one of three channels (via [`understory_dirty`]):
//!
//! - **Propagating**. [`GEOMETRY`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from child to parent. Bounds are relative to the parent's origin and the
//!   hidden flag is inherited, so a parent change dirties every descendant.
//!
//! - **Local-only**. [`POINTER`] is marked with the default policy. A
//!   layer's pointer policy never affects its descendants' policies; it only
//!   affects which layer a hit test lands on.
//!
//! - **Structural**. [`TOPOLOGY`] is marked on create/destroy and
//!   add/remove child. It triggers a traversal-order (z-order) rebuild.
//!
//! Callers never query dirty state directly;
//! [`LayerStore::evaluate`](crate::layer::LayerStore::evaluate) drains every
//! channel and reports the result as
//! [`FrameChanges`](crate::layer::FrameChanges).

use understory_dirty::Channel;

/// Bounds or hidden flag changed; world bounds and effective hidden must be
/// recomputed for the layer and its descendants.
pub const GEOMETRY: Channel = Channel::new(0);

/// Pointer policy changed; no propagation needed.
pub const POINTER: Channel = Channel::new(1);

/// Tree topology changed; triggers a traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(2);
