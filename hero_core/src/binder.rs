// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of tagged elements to their owning page.
//!
//! A tagged element belongs to the nearest [`Page`](crate::element::ElementKind::Page)
//! among its ancestors. Elements are often tagged before they are attached,
//! so resolution can fail; such elements stay *pending* and are retried when
//! the tree reports parent changes. Once resolved, a binding is kept until
//! the element is detached, even if it later moves to another page. An
//! element whose ancestors no longer reach any page is
//! [stranded](TagBinder::stranded).
//!
//! When the application root is a single-page shell rather than a navigation
//! stack, every element resolves directly to the shell's active page.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::element::{ElementId, ElementKind, ElementTree};
use crate::trace::{BindingEvent, Tracer};

/// Outcome of an ancestor walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The element belongs to this page.
    Page(ElementId),
    /// No page above the element; `root` is the top of its detached subtree.
    Detached {
        /// Topmost ancestor reached (the element itself if it has no parent).
        root: ElementId,
    },
}

/// Tracks which page owns each tagged element.
#[derive(Clone, Debug, Default)]
pub struct TagBinder {
    bound: BTreeMap<ElementId, ElementId>,
    pending: BTreeMap<ElementId, ElementId>,
    shell_page: Option<ElementId>,
}

impl TagBinder {
    /// Creates a binder with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the active page of a single-page shell root, or `None` when the
    /// root is a navigation stack.
    pub fn set_shell_page(&mut self, page: Option<ElementId>) {
        self.shell_page = page;
    }

    /// Returns the shell's active page, if the root is a shell.
    #[must_use]
    pub fn shell_page(&self) -> Option<ElementId> {
        self.shell_page
    }

    /// Finds the page that owns `element`.
    ///
    /// # Panics
    ///
    /// Panics if `element` is stale.
    #[must_use]
    pub fn resolve(&self, tree: &ElementTree, element: ElementId) -> Resolution {
        if let Some(page) = self.shell_page.filter(|&p| tree.is_page(p)) {
            return Resolution::Page(page);
        }
        let mut root = element;
        for ancestor in tree.ancestors(element) {
            if tree.kind(ancestor) == ElementKind::Page {
                return Resolution::Page(ancestor);
            }
            root = ancestor;
        }
        Resolution::Detached { root }
    }

    /// Binds `element` to its page, or leaves it pending if there is none yet.
    ///
    /// Returns the page. An element that is already bound keeps its binding.
    ///
    /// # Panics
    ///
    /// Panics if `element` is stale.
    pub fn attach(
        &mut self,
        tree: &ElementTree,
        element: ElementId,
        tracer: &mut Tracer<'_>,
    ) -> Option<ElementId> {
        if let Some(&page) = self.bound.get(&element) {
            return Some(page);
        }
        match self.resolve(tree, element) {
            Resolution::Page(page) => {
                self.pending.remove(&element);
                self.bound.insert(element, page);
                tracer.binding(&BindingEvent {
                    element,
                    page: Some(page),
                    watched: None,
                });
                Some(page)
            }
            Resolution::Detached { root } => {
                self.pending.insert(element, root);
                tracer.binding(&BindingEvent {
                    element,
                    page: None,
                    watched: Some(root),
                });
                None
            }
        }
    }

    /// Forgets `element`, returning the page it was bound to.
    pub fn detach(&mut self, element: ElementId) -> Option<ElementId> {
        self.pending.remove(&element);
        self.bound.remove(&element)
    }

    /// Retries every pending element after parent changes.
    ///
    /// Any parent change can complete a pending element's chain (the change
    /// may be anywhere above it), so all pending elements are retried when
    /// `changed` is non-empty. Pending elements that died are dropped.
    /// Returns the newly bound `(element, page)` pairs.
    pub fn parent_changed(
        &mut self,
        tree: &ElementTree,
        changed: &[ElementId],
        tracer: &mut Tracer<'_>,
    ) -> Vec<(ElementId, ElementId)> {
        if changed.is_empty() {
            return Vec::new();
        }
        let waiting: Vec<ElementId> = self.pending.keys().copied().collect();
        let mut resolved = Vec::new();
        for element in waiting {
            if !tree.is_alive(element) {
                self.pending.remove(&element);
                continue;
            }
            if let Some(page) = self.attach(tree, element, tracer) {
                resolved.push((element, page));
            }
        }
        resolved
    }

    /// Returns the live bound elements whose ancestor chain no longer
    /// reaches a page.
    #[must_use]
    pub fn stranded(&self, tree: &ElementTree) -> Vec<ElementId> {
        self.bound
            .keys()
            .copied()
            .filter(|&e| tree.is_alive(e))
            .filter(|&e| matches!(self.resolve(tree, e), Resolution::Detached { .. }))
            .collect()
    }

    /// Drops every binding to `page`, returning the affected elements.
    pub fn forget_page(&mut self, page: ElementId) -> Vec<ElementId> {
        let elements: Vec<ElementId> = self
            .bound
            .iter()
            .filter(|&(_, &p)| p == page)
            .map(|(&e, _)| e)
            .collect();
        for element in &elements {
            self.bound.remove(element);
        }
        elements
    }

    /// Returns the page `element` is bound to.
    #[must_use]
    pub fn bound_page(&self, element: ElementId) -> Option<ElementId> {
        self.bound.get(&element).copied()
    }

    /// Returns whether `element` is waiting for a page.
    #[must_use]
    pub fn is_pending(&self, element: ElementId) -> bool {
        self.pending.contains_key(&element)
    }

    /// Returns the detached root `element` is waiting on, if pending.
    #[must_use]
    pub fn watched_root(&self, element: ElementId) -> Option<ElementId> {
        self.pending.get(&element).copied()
    }
}
