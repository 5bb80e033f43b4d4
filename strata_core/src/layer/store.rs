// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays layer storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::id::{INVALID, LayerId};
use super::policy::PointerPolicy;
use super::traverse::Children;
use crate::dirty;

/// Per-layer boolean flags.
///
/// A [`hidden`](Self::hidden) layer takes its whole subtree out of both
/// presentation and hit testing. Properties can still be mutated while
/// hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LayerFlags {
    /// Whether the layer (and its subtree) is hidden.
    pub hidden: bool,
}

/// Struct-of-arrays storage for all layers of a page.
///
/// Layers are addressed by [`LayerId`] handles. Destroyed slots are recycled
/// through a free list; generation counters reject stale handles.
///
/// Paint order is the depth-first pre-order of the tree: a parent paints
/// below its children, and earlier siblings paint below later ones.
#[derive(Debug)]
pub struct LayerStore {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by callers) --
    pub(crate) local_bounds: Vec<Rect>,
    pub(crate) pointer: Vec<PointerPolicy>,
    pub(crate) flags: Vec<LayerFlags>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_bounds: Vec<Rect>,
    pub(crate) effective_hidden: Vec<bool>,
    pub(crate) z_rank: Vec<u32>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for LayerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStore {
    /// Creates an empty layer store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            local_bounds: Vec::new(),
            pointer: Vec::new(),
            flags: Vec::new(),
            world_bounds: Vec::new(),
            effective_hidden: Vec::new(),
            z_rank: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    /// Returns the number of live layers.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Allocation API --

    /// Creates a new detached layer and returns its handle.
    ///
    /// The layer starts with zero-size bounds, [`PointerPolicy::Capture`],
    /// and no flags set.
    pub fn create_layer(&mut self) -> LayerId {
        let idx = match self.free_list.pop() {
            Some(idx) => {
                let i = idx as usize;
                self.generation[i] += 1;
                self.parent[i] = INVALID;
                self.first_child[i] = INVALID;
                self.next_sibling[i] = INVALID;
                self.prev_sibling[i] = INVALID;
                self.local_bounds[i] = Rect::ZERO;
                self.pointer[i] = PointerPolicy::default();
                self.flags[i] = LayerFlags::default();
                self.world_bounds[i] = Rect::ZERO;
                self.effective_hidden[i] = false;
                self.z_rank[i] = INVALID;
                idx
            }
            None => {
                let idx = self.len;
                self.len += 1;
                self.parent.push(INVALID);
                self.first_child.push(INVALID);
                self.next_sibling.push(INVALID);
                self.prev_sibling.push(INVALID);
                self.local_bounds.push(Rect::ZERO);
                self.pointer.push(PointerPolicy::default());
                self.flags.push(LayerFlags::default());
                self.world_bounds.push(Rect::ZERO);
                self.effective_hidden.push(false);
                self.z_rank.push(INVALID);
                self.generation.push(0);
                idx
            }
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.dirty.mark(idx, dirty::POINTER);

        self.handle(idx)
    }

    /// Destroys a layer, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the layer has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_layer(&mut self, id: LayerId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy layer with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.detach(idx);
        }
        self.dirty.remove_key(idx);

        self.generation[idx as usize] += 1;
        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
    }

    /// Returns whether the given handle refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        id.idx < self.len
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    // -- Topology API --

    /// Appends `child` as the topmost child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: LayerId, child: LayerId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == INVALID,
            "child already has a parent"
        );
        self.attach_last(parent.idx, child.idx);
    }

    /// Detaches `child` from its parent, making it a root.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the layer has no parent.
    pub fn remove_from_parent(&mut self, child: LayerId) {
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] != INVALID,
            "layer has no parent"
        );
        self.detach(child.idx);
    }

    /// Moves `child` to be the topmost child of `new_parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn reparent(&mut self, child: LayerId, new_parent: LayerId) {
        self.validate(child);
        self.validate(new_parent);
        if self.parent[child.idx as usize] != INVALID {
            self.detach(child.idx);
        }
        self.attach_last(new_parent.idx, child.idx);
    }

    /// Inserts `child` directly below `sibling` in paint order.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, or `sibling`
    /// has no parent.
    pub fn insert_before(&mut self, child: LayerId, sibling: LayerId) {
        self.validate(child);
        self.validate(sibling);
        let (c, s) = (child.idx, sibling.idx);
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");

        let prev = self.prev_sibling[s as usize];
        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = prev;
        if prev == INVALID {
            self.first_child[p as usize] = c;
        } else {
            self.next_sibling[prev as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        self.after_attach(p, c);
    }

    /// Returns the parent of a layer, if any.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the direct children of a layer, bottommost
    /// first.
    #[must_use]
    pub fn children(&self, id: LayerId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the root layers (those with no parent).
    #[must_use]
    pub fn roots(&self) -> Vec<LayerId> {
        (0..self.len)
            .filter(|&idx| self.parent[idx as usize] == INVALID && !self.free_list.contains(&idx))
            .map(|idx| self.handle(idx))
            .collect()
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the bounds of a layer relative to its parent's origin.
    #[must_use]
    pub fn bounds(&self, id: LayerId) -> Rect {
        self.validate(id);
        self.local_bounds[id.idx as usize]
    }

    /// Returns the pointer policy of a layer.
    #[must_use]
    pub fn pointer_policy(&self, id: LayerId) -> PointerPolicy {
        self.validate(id);
        self.pointer[id.idx as usize]
    }

    /// Returns the flags of a layer.
    #[must_use]
    pub fn flags(&self, id: LayerId) -> LayerFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the bounds of a layer in viewport coordinates.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_bounds(&self, id: LayerId) -> Rect {
        self.validate(id);
        self.world_bounds[id.idx as usize]
    }

    /// Returns whether the layer is hidden by its own flag or an ancestor's.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_hidden(&self, id: LayerId) -> bool {
        self.validate(id);
        self.effective_hidden[id.idx as usize]
    }

    /// Returns the layer's stacking index: 0 for the bottommost layer,
    /// strictly increasing towards the foreground.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn z_index(&self, id: LayerId) -> u32 {
        self.validate(id);
        self.z_rank[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the bounds of a layer, relative to its parent's origin.
    ///
    /// Marks the GEOMETRY channel dirty with eager propagation to descendants.
    pub fn set_bounds(&mut self, id: LayerId, bounds: Rect) {
        self.validate(id);
        self.local_bounds[id.idx as usize] = bounds;
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Sets the pointer policy of a layer.
    pub fn set_pointer_policy(&mut self, id: LayerId, policy: PointerPolicy) {
        self.validate(id);
        self.pointer[id.idx as usize] = policy;
        self.dirty.mark(id.idx, dirty::POINTER);
    }

    /// Sets the flags of a layer.
    ///
    /// The hidden flag is inherited, so this marks GEOMETRY with eager
    /// propagation.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) {
        self.validate(id);
        self.flags[id.idx as usize] = flags;
        self.dirty.mark_with(id.idx, dirty::GEOMETRY, &EagerPolicy);
    }

    /// Shorthand for [`set_flags`](Self::set_flags) with only `hidden` set.
    pub fn set_hidden(&mut self, id: LayerId, hidden: bool) {
        self.set_flags(id, LayerFlags { hidden });
    }

    // -- Raw-index accessors for backends --
    //
    // These take raw slot indices as found in `FrameChanges` or
    // `traversal_order()` and skip generation validation.

    /// Returns the world bounds at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn world_bounds_at(&self, idx: u32) -> Rect {
        self.check_slot(idx);
        self.world_bounds[idx as usize]
    }

    /// Returns the pointer policy at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn pointer_policy_at(&self, idx: u32) -> PointerPolicy {
        self.check_slot(idx);
        self.pointer[idx as usize]
    }

    /// Returns whether the layer at raw slot `idx` is effectively hidden.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn effective_hidden_at(&self, idx: u32) -> bool {
        self.check_slot(idx);
        self.effective_hidden[idx as usize]
    }

    /// Returns the stacking index at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn z_index_at(&self, idx: u32) -> u32 {
        self.check_slot(idx);
        self.z_rank[idx as usize]
    }

    // -- Internal helpers --

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> LayerId {
        LayerId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: LayerId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale LayerId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    /// Links `c` as the last child of `p`.
    fn attach_last(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = INVALID;

        let mut last = self.first_child[p as usize];
        if last == INVALID {
            self.first_child[p as usize] = c;
            self.prev_sibling[c as usize] = INVALID;
        } else {
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        self.after_attach(p, c);
    }

    /// Dependency edges and dirty marks shared by every attach path.
    fn after_attach(&mut self, p: u32, c: u32) {
        let _ = self.dirty.add_dependency(c, p, dirty::GEOMETRY);
        self.dirty.mark_with(c, dirty::GEOMETRY, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Unlinks `idx` from its parent and drops the inherited dependency.
    fn detach(&mut self, idx: u32) {
        let i = idx as usize;
        let p = self.parent[i];
        let (prev, next) = (self.prev_sibling[i], self.next_sibling[i]);

        if prev == INVALID {
            self.first_child[p as usize] = next;
        } else {
            self.next_sibling[prev as usize] = next;
        }
        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }
        self.parent[i] = INVALID;
        self.prev_sibling[i] = INVALID;
        self.next_sibling[i] = INVALID;

        self.dirty.remove_dependency(idx, p, dirty::GEOMETRY);
        self.dirty.mark_with(idx, dirty::GEOMETRY, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        assert!(store.is_alive(id));
        assert_eq!(store.live_count(), 1);
        store.destroy_layer(id);
        assert!(!store.is_alive(id));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn reused_slot_gets_new_generation() {
        let mut store = LayerStore::new();
        let first = store.create_layer();
        store.destroy_layer(first);
        let second = store.create_layer();
        assert!(!store.is_alive(first));
        assert!(store.is_alive(second));
        assert_eq!(first.index(), second.index());
        assert_ne!(first.generation(), second.generation());
    }

    #[test]
    fn new_layers_capture_with_zero_bounds() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        assert_eq!(store.pointer_policy(id), PointerPolicy::Capture);
        assert_eq!(store.bounds(id), Rect::ZERO);
        assert!(!store.flags(id).hidden);
    }

    #[test]
    fn children_are_listed_bottom_to_top() {
        let mut store = LayerStore::new();
        let wrapper = store.create_layer();
        let nav = store.create_layer();
        let banner = store.create_layer();
        store.add_child(wrapper, nav);
        store.add_child(wrapper, banner);

        assert_eq!(store.parent(nav), Some(wrapper));
        let kids: Vec<_> = store.children(wrapper).collect();
        assert_eq!(kids, vec![nav, banner]);
    }

    #[test]
    fn insert_before_places_below_sibling() {
        let mut store = LayerStore::new();
        let wrapper = store.create_layer();
        let hero = store.create_layer();
        let showcase = store.create_layer();
        let nav = store.create_layer();
        store.add_child(wrapper, hero);
        store.add_child(wrapper, nav);
        store.insert_before(showcase, nav);

        let kids: Vec<_> = store.children(wrapper).collect();
        assert_eq!(kids, vec![hero, showcase, nav]);
    }

    #[test]
    fn insert_before_first_child_becomes_first() {
        let mut store = LayerStore::new();
        let wrapper = store.create_layer();
        let a = store.create_layer();
        let b = store.create_layer();
        store.add_child(wrapper, a);
        store.insert_before(b, a);

        let kids: Vec<_> = store.children(wrapper).collect();
        assert_eq!(kids, vec![b, a]);
    }

    #[test]
    fn remove_and_reparent() {
        let mut store = LayerStore::new();
        let p1 = store.create_layer();
        let p2 = store.create_layer();
        let child = store.create_layer();
        store.add_child(p1, child);

        store.reparent(child, p2);
        assert_eq!(store.parent(child), Some(p2));
        assert!(store.children(p1).next().is_none());

        store.remove_from_parent(child);
        assert_eq!(store.parent(child), None);
        assert!(store.roots().contains(&child));
    }

    #[test]
    fn roots_skip_children_and_freed_slots() {
        let mut store = LayerStore::new();
        let a = store.create_layer();
        let b = store.create_layer();
        let c = store.create_layer();
        store.add_child(a, c);
        store.destroy_layer(b);

        assert_eq!(store.roots(), vec![a]);
    }

    #[test]
    fn set_hidden_toggles_flag() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        store.set_hidden(id, true);
        assert!(store.flags(id).hidden);
        store.set_hidden(id, false);
        assert_eq!(store.flags(id), LayerFlags::default());
    }

    #[test]
    #[should_panic(expected = "cannot destroy layer with children")]
    fn destroy_with_children_panics() {
        let mut store = LayerStore::new();
        let parent = store.create_layer();
        let child = store.create_layer();
        store.add_child(parent, child);
        store.destroy_layer(parent);
    }

    #[test]
    #[should_panic(expected = "child already has a parent")]
    fn double_attach_panics() {
        let mut store = LayerStore::new();
        let p1 = store.create_layer();
        let p2 = store.create_layer();
        let child = store.create_layer();
        store.add_child(p1, child);
        store.add_child(p2, child);
    }

    #[test]
    #[should_panic(expected = "stale LayerId")]
    fn destroyed_handle_panics_on_set_bounds() {
        let mut store = LayerStore::new();
        let id = store.create_layer();
        store.destroy_layer(id);
        store.set_bounds(id, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn raw_accessor_rejects_unknown_slot() {
        let store = LayerStore::new();
        let _ = store.world_bounds_at(3);
    }
}
