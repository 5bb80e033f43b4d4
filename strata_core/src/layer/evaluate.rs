// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer evaluation and change tracking.
//!
//! Evaluation follows a drain-recompute pattern:
//!
//! 1. **TOPOLOGY**: If the tree changed shape, rebuild the depth-first
//!    traversal and the per-layer stacking index.
//! 2. **GEOMETRY**: Drain dirty indices and, walking in paint order so every
//!    parent is settled before its children, recompute `world_bounds` as the
//!    local bounds offset by the parent's world origin, and `effective_hidden`
//!    as `parent_effective_hidden || flags.hidden`.
//! 3. **POINTER**: Drain dirty indices (no recomputation; hit testing and
//!    backends read the policy directly from the store).
//!
//! [`FrameChanges`] carries raw slot indices so backends can index straight
//! into the `*_at()` accessors.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

use super::id::INVALID;
use super::store::LayerStore;
use crate::dirty;

/// The set of changes produced by a single [`LayerStore::evaluate`] call.
#[derive(Clone, Debug, Default)]
pub struct FrameChanges {
    /// Layers whose world bounds were recomputed, in paint order.
    pub geometry: Vec<u32>,
    /// Layers whose pointer policy changed.
    pub pointer: Vec<u32>,
    /// Layers that transitioned from visible to effectively hidden.
    pub hidden: Vec<u32>,
    /// Layers that transitioned from effectively hidden to visible.
    pub unhidden: Vec<u32>,
    /// Layers added since the last evaluate.
    pub added: Vec<u32>,
    /// Layers removed since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the paint order was rebuilt.
    pub topology_changed: bool,
}

impl FrameChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.geometry.clear();
        self.pointer.clear();
        self.hidden.clear();
        self.unhidden.clear();
        self.added.clear();
        self.removed.clear();
        self.topology_changed = false;
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
            && self.pointer.is_empty()
            && self.hidden.is_empty()
            && self.unhidden.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.topology_changed
    }

    /// Folds a later batch of changes into this one, so that several
    /// evaluations can be presented at once.
    ///
    /// A layer hidden in one batch and unhidden in the next ends up only in
    /// the list matching its final state.
    pub fn absorb(&mut self, later: Self) {
        for idx in later.hidden {
            self.unhidden.retain(|&i| i != idx);
            push_unique(&mut self.hidden, idx);
        }
        for idx in later.unhidden {
            self.hidden.retain(|&i| i != idx);
            push_unique(&mut self.unhidden, idx);
        }
        for idx in later.geometry {
            push_unique(&mut self.geometry, idx);
        }
        for idx in later.pointer {
            push_unique(&mut self.pointer, idx);
        }
        self.added.extend(later.added);
        self.removed.extend(later.removed);
        self.topology_changed |= later.topology_changed;
    }
}

fn push_unique(list: &mut Vec<u32>, idx: u32) {
    if !list.contains(&idx) {
        list.push(idx);
    }
}

impl LayerStore {
    /// Evaluates the layer tree, recomputing dirty properties and returning
    /// the set of changes.
    pub fn evaluate(&mut self) -> FrameChanges {
        let mut changes = FrameChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer.
    pub fn evaluate_into(&mut self, changes: &mut FrameChanges) {
        changes.clear();

        if self.traversal_dirty {
            self.rebuild_traversal_order();
            changes.topology_changed = true;
            self.traversal_dirty = false;
        }

        let mut marked = vec![false; self.len as usize];
        for idx in self
            .dirty
            .drain(dirty::GEOMETRY)
            .affected()
            .deterministic()
            .run()
        {
            marked[idx as usize] = true;
        }

        for pos in 0..self.traversal_order.len() {
            let idx = self.traversal_order[pos];
            let i = idx as usize;
            if !marked[i] {
                continue;
            }

            let parent = self.parent[i];
            let (parent_world, parent_hidden) = if parent == INVALID {
                (Rect::ZERO, false)
            } else {
                (
                    self.world_bounds[parent as usize],
                    self.effective_hidden[parent as usize],
                )
            };
            self.world_bounds[i] = self.local_bounds[i] + parent_world.origin().to_vec2();

            let now_hidden = parent_hidden || self.flags[i].hidden;
            if now_hidden != self.effective_hidden[i] {
                if now_hidden {
                    changes.hidden.push(idx);
                } else {
                    changes.unhidden.push(idx);
                }
                self.effective_hidden[i] = now_hidden;
            }
            changes.geometry.push(idx);
        }

        changes.pointer = self
            .dirty
            .drain(dirty::POINTER)
            .deterministic()
            .run()
            .collect();

        // Structural changes were handled by the traversal rebuild above.
        let _: Vec<u32> = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
    }

    /// Returns the current paint order (depth-first pre-order), bottommost
    /// first.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called at least
    /// once.
    #[must_use]
    pub fn traversal_order(&self) -> &[u32] {
        &self.traversal_order
    }

    fn rebuild_traversal_order(&mut self) {
        self.traversal_order.clear();
        for idx in 0..self.len {
            if self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx) {
                self.dfs_collect(idx);
            }
        }
        for rank in self.z_rank.iter_mut() {
            *rank = INVALID;
        }
        for (pos, &idx) in self.traversal_order.iter().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "layer count is bounded by u32 slot indices"
            )]
            let pos = pos as u32;
            self.z_rank[idx as usize] = pos;
        }
    }

    fn dfs_collect(&mut self, idx: u32) {
        self.traversal_order.push(idx);
        let mut child = self.first_child[idx as usize];
        while child != INVALID {
            self.dfs_collect(child);
            child = self.next_sibling[child as usize];
        }
    }
}
