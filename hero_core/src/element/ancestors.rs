// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor traversal.

use super::id::{ElementId, INVALID};
use super::tree::ElementTree;

/// An iterator over the ancestors of an element, nearest first.
///
/// Created by [`ElementTree::ancestors`]. Yields at most as many items as the
/// tree has slots, so it terminates even on a cyclic parent chain.
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a ElementTree,
    current: u32,
    remaining: u32,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a ElementTree, start: u32) -> Self {
        Self {
            tree,
            current: start,
            remaining: tree.len,
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        if self.current == INVALID || self.remaining == 0 {
            return None;
        }
        let parent = self.tree.parent[self.current as usize];
        self.current = parent;
        if parent == INVALID {
            return None;
        }
        self.remaining -= 1;
        Some(self.tree.handle(parent))
    }
}
