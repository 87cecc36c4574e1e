// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays element storage with allocation, topology, and attribute
//! management.

use alloc::vec::Vec;

use kurbo::Size;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::ancestors::Ancestors;
use super::id::{ElementId, INVALID, RenderTargetId};
use crate::dirty;
use crate::tag::TransitionTag;

/// What an element represents to the transition engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// An ordinary visual element.
    #[default]
    View,
    /// A navigable page; the owner of transition details.
    Page,
}

/// Struct-of-arrays storage for the host's element tree.
///
/// Elements are addressed by [`ElementId`] handles. Internally, each element
/// occupies a slot in parallel arrays. Destroyed elements are recycled via a
/// free list, and generation counters prevent stale handle access.
///
/// Mutations mark the matching [`dirty`](crate::dirty) channel;
/// [`take_changes`](Self::take_changes) turns the marks into notifications.
#[derive(Debug)]
pub struct ElementTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Attributes (set by the host) --
    pub(crate) kind: Vec<ElementKind>,
    pub(crate) tag: Vec<Option<TransitionTag>>,
    pub(crate) render_target: Vec<Option<RenderTargetId>>,
    pub(crate) size: Vec<Option<Size>>,
    pub(crate) visible: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<ElementId>,
    pub(crate) pending_removed: Vec<ElementId>,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Creates an empty element tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            tag: Vec::new(),
            render_target: Vec::new(),
            size: Vec::new(),
            visible: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new view element and returns its handle.
    ///
    /// The element starts unmeasured, visible, untagged, with no render target
    /// and no parent.
    pub fn create_element(&mut self) -> ElementId {
        self.create(ElementKind::View)
    }

    /// Creates a new page element and returns its handle.
    pub fn create_page(&mut self) -> ElementId {
        self.create(ElementKind::Page)
    }

    fn create(&mut self, kind: ElementKind) -> ElementId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.tag[i] = None;
            self.render_target[i] = None;
            self.size[i] = None;
            self.visible[i] = true;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.tag.push(None);
            self.render_target.push(None);
            self.size.push(None);
            self.visible.push(true);
            self.generation.push(0);
            idx
        };

        let id = ElementId {
            idx,
            generation: self.generation[idx as usize],
        };
        self.pending_added.push(id);
        id
    }

    /// Destroys an element, freeing its slot for reuse.
    ///
    /// Pending notifications for the element are discarded and the handle is
    /// reported in [`TreeChanges::removed`](super::TreeChanges::removed).
    ///
    /// # Panics
    ///
    /// Panics if the element has children (remove them first) or if the
    /// handle is stale.
    pub fn destroy_element(&mut self, id: ElementId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy element with children"
        );

        if self.parent[idx as usize] != INVALID {
            self.unlink_from_parent(idx);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.tag[idx as usize] = None;
        self.render_target[idx as usize] = None;

        self.free_list.push(idx);
        self.pending_removed.push(id);
    }

    /// Returns whether the given handle refers to a live element.
    #[must_use]
    pub fn is_alive(&self, id: ElementId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Returns the number of slots, live or free.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns whether no slot has ever been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, or if `child` already has a parent.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) {
        self.validate(parent);
        self.validate(child);
        assert!(
            self.parent[child.idx as usize] == INVALID,
            "child already has a parent"
        );
        self.link_last_child(parent.idx, child.idx);
        self.dirty.mark(child.idx, dirty::PARENT);
    }

    /// Removes `child` from its current parent.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the element has no parent.
    pub fn remove_from_parent(&mut self, child: ElementId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "element has no parent");
        self.unlink_from_parent(c);
        self.dirty.mark(c, dirty::PARENT);
    }

    /// Moves `child` to be the last child of `new_parent`.
    ///
    /// If `child` already has a parent, it is removed first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn reparent(&mut self, child: ElementId, new_parent: ElementId) {
        self.validate(child);
        self.validate(new_parent);
        if self.parent[child.idx as usize] != INVALID {
            self.unlink_from_parent(child.idx);
        }
        self.link_last_child(new_parent.idx, child.idx);
        self.dirty.mark(child.idx, dirty::PARENT);
    }

    /// Returns the parent of an element, if any.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        (p != INVALID).then(|| self.handle(p))
    }

    /// Returns an iterator over the ancestors of an element, nearest first.
    ///
    /// The walk is bounded by [`len`](Self::len) steps, so a malformed
    /// (cyclic) parent chain terminates instead of looping.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn ancestors(&self, id: ElementId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors::new(self, id.idx)
    }

    // -- Attribute getters --

    /// Returns the kind of an element.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn kind(&self, id: ElementId) -> ElementKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns whether the element is a live page.
    #[must_use]
    pub fn is_page(&self, id: ElementId) -> bool {
        self.is_alive(id) && self.kind[id.idx as usize] == ElementKind::Page
    }

    /// Returns the transition tag of an element.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn tag(&self, id: ElementId) -> Option<&TransitionTag> {
        self.validate(id);
        self.tag[id.idx as usize].as_ref()
    }

    /// Returns the render target of an element.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn render_target(&self, id: ElementId) -> Option<RenderTargetId> {
        self.validate(id);
        self.render_target[id.idx as usize]
    }

    /// Returns the render target of an element, or `None` if the element is
    /// dead or has no render target.
    ///
    /// Unlike [`render_target`](Self::render_target), never panics.
    #[must_use]
    pub fn live_target(&self, id: ElementId) -> Option<RenderTargetId> {
        if self.is_alive(id) {
            self.render_target[id.idx as usize]
        } else {
            None
        }
    }

    /// Returns the measured size of an element, or `None` if layout has not
    /// produced one yet.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn size(&self, id: ElementId) -> Option<Size> {
        self.validate(id);
        self.size[id.idx as usize]
    }

    /// Returns whether layout has measured the element.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_measured(&self, id: ElementId) -> bool {
        self.size(id).is_some()
    }

    /// Returns whether the element is visible.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    #[must_use]
    pub fn is_visible(&self, id: ElementId) -> bool {
        self.validate(id);
        self.visible[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets or clears the transition tag of an element.
    ///
    /// Marks the TAG channel only if the tag actually changed.
    pub fn set_tag(&mut self, id: ElementId, tag: Option<TransitionTag>) {
        self.validate(id);
        if self.tag[id.idx as usize] != tag {
            self.tag[id.idx as usize] = tag;
            self.dirty.mark(id.idx, dirty::TAG);
        }
    }

    /// Sets or clears the render target of an element.
    ///
    /// Marks the TARGET channel only if the target actually changed.
    pub fn set_render_target(&mut self, id: ElementId, target: Option<RenderTargetId>) {
        self.validate(id);
        if self.render_target[id.idx as usize] != target {
            self.render_target[id.idx as usize] = target;
            self.dirty.mark(id.idx, dirty::TARGET);
        }
    }

    /// Records the element's measured size (`None` resets it to unmeasured).
    ///
    /// Marks the SIZE channel only if the size actually changed.
    pub fn set_size(&mut self, id: ElementId, size: Option<Size>) {
        self.validate(id);
        if self.size[id.idx as usize] != size {
            self.size[id.idx as usize] = size;
            self.dirty.mark(id.idx, dirty::SIZE);
        }
    }

    /// Sets the element's visibility.
    pub fn set_visible(&mut self, id: ElementId, visible: bool) {
        self.validate(id);
        self.visible[id.idx as usize] = visible;
    }

    // -- Internal helpers --

    /// Builds a handle for a live slot.
    pub(crate) fn handle(&self, idx: u32) -> ElementId {
        ElementId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns whether the raw slot is allocated.
    pub(crate) fn slot_alive(&self, idx: u32) -> bool {
        idx < self.len && !self.free_list.contains(&idx)
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: ElementId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale ElementId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Appends `c` to `p`'s child list.
    fn link_last_child(&mut self, p: u32, c: u32) {
        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}
