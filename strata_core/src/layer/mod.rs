// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer tree data model.
//!
//! A *layer* is one visual stratum of the page. Each layer has:
//!
//! - An identity ([`LayerId`]), a generational handle that goes stale when the
//!   layer is destroyed.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//!   Paint order is depth-first pre-order, so children sit above their parent
//!   and later siblings above earlier ones.
//! - **Local properties** set by the caller:
//!   [`bounds`](LayerStore::set_bounds) (relative to the parent's origin),
//!   [`pointer policy`](LayerStore::set_pointer_policy), and
//!   [`flags`](LayerStore::set_flags).
//! - **Computed properties** produced by [`evaluate`](LayerStore::evaluate):
//!   world bounds, effective hidden state, and the stacking index.
//!
//! Hit testing ([`LayerStore::hit_test`]) walks the stack top-down and returns
//! the first visible capturing layer whose world bounds contain the point.
//! [`LayerStore::validate_stack`] checks that the stack has no pointer dead
//! zones.

mod evaluate;
mod hit;
mod id;
mod policy;
mod store;
mod traverse;

pub use evaluate::FrameChanges;
pub use hit::StackError;
pub use id::{INVALID, LayerId};
pub use policy::PointerPolicy;
pub use store::{LayerFlags, LayerStore};
pub use traverse::Children;
