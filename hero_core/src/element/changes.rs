// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications drained from the element tree.
//!
//! The host mutates the [`ElementTree`] freely between notification points.
//! Each [`ElementTree::take_changes`] call drains every dirty channel and
//! returns a [`TreeChanges`] describing what happened since the previous call:
//!
//! 1. **PARENT** → [`TreeChanges::reparented`]
//! 2. **SIZE** → [`TreeChanges::resized`]
//! 3. **TAG** → [`TreeChanges::retagged`]
//! 4. **TARGET** → [`TreeChanges::retargeted`]
//!
//! Creation and destruction are tracked separately in
//! [`TreeChanges::added`] and [`TreeChanges::removed`]. Drained lists only
//! contain live elements; an element destroyed before the drain shows up in
//! `removed` alone.

use alloc::vec::Vec;

use understory_dirty::Channel;

use super::id::ElementId;
use super::tree::ElementTree;
use crate::dirty;

/// The set of notifications produced by a single
/// [`ElementTree::take_changes`] call.
#[derive(Clone, Debug, Default)]
pub struct TreeChanges {
    /// Elements created since the last drain that are still alive.
    pub added: Vec<ElementId>,
    /// Elements destroyed since the last drain. These handles are stale.
    pub removed: Vec<ElementId>,
    /// Elements whose parent changed.
    pub reparented: Vec<ElementId>,
    /// Elements whose measured size changed.
    pub resized: Vec<ElementId>,
    /// Elements whose transition tag changed.
    pub retagged: Vec<ElementId>,
    /// Elements whose render target changed.
    pub retargeted: Vec<ElementId>,
}

impl TreeChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.reparented.clear();
        self.resized.clear();
        self.retagged.clear();
        self.retargeted.clear();
    }

    /// Returns whether no notification is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.reparented.is_empty()
            && self.resized.is_empty()
            && self.retagged.is_empty()
            && self.retargeted.is_empty()
    }
}

impl ElementTree {
    /// Drains all dirty channels and lifecycle lists into a [`TreeChanges`].
    pub fn take_changes(&mut self) -> TreeChanges {
        let mut changes = TreeChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses the allocations
    /// of an existing [`TreeChanges`].
    pub fn take_changes_into(&mut self, changes: &mut TreeChanges) {
        changes.clear();

        changes.reparented = self.drain_live(dirty::PARENT);
        changes.resized = self.drain_live(dirty::SIZE);
        changes.retagged = self.drain_live(dirty::TAG);
        changes.retargeted = self.drain_live(dirty::TARGET);

        // Move lifecycle lists.
        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        changes.added.retain(|&id| self.is_alive(id));
    }

    /// Drains one channel, keeping only slots that are still allocated.
    fn drain_live(&mut self, channel: Channel) -> Vec<ElementId> {
        let drained: Vec<u32> = self.dirty.drain(channel).deterministic().run().collect();
        drained
            .into_iter()
            .filter(|&idx| self.slot_alive(idx))
            .map(|idx| self.handle(idx))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use crate::element::{ElementTree, RenderTargetId};
    use crate::tag::TransitionTag;

    #[test]
    fn fresh_tree_has_no_changes() {
        let mut tree = ElementTree::new();
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn mutations_surface_once() {
        let mut tree = ElementTree::new();
        let page = tree.create_page();
        let el = tree.create_element();
        tree.add_child(page, el);
        tree.set_size(el, Some(Size::new(40.0, 20.0)));
        tree.set_tag(el, Some(TransitionTag::new("hero")));
        tree.set_render_target(el, Some(RenderTargetId(1)));

        let changes = tree.take_changes();
        assert_eq!(changes.added, [page, el]);
        assert_eq!(changes.reparented, [el]);
        assert_eq!(changes.resized, [el]);
        assert_eq!(changes.retagged, [el]);
        assert_eq!(changes.retargeted, [el]);

        assert!(
            tree.take_changes().is_empty(),
            "second drain should observe nothing"
        );
    }

    #[test]
    fn unchanged_values_do_not_notify() {
        let mut tree = ElementTree::new();
        let el = tree.create_element();
        tree.set_size(el, Some(Size::new(1.0, 1.0)));
        let _ = tree.take_changes();

        tree.set_size(el, Some(Size::new(1.0, 1.0)));
        tree.set_tag(el, None);
        tree.set_render_target(el, None);
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn destroyed_elements_only_report_removal() {
        let mut tree = ElementTree::new();
        let el = tree.create_element();
        tree.set_size(el, Some(Size::new(5.0, 5.0)));
        tree.destroy_element(el);

        let changes = tree.take_changes();
        assert!(changes.added.is_empty());
        assert!(changes.resized.is_empty());
        assert_eq!(changes.removed, [el]);
    }
}
