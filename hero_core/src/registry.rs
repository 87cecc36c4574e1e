// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-page storage of transition details.
//!
//! A [`TransitionRegistry`] maps each page to the ordered list of
//! [`TransitionDetail`]s registered on it. Within a page, a [`TransitionKey`]
//! appears at most once: registering an existing key replaces the stored
//! element and render target in place, keeping its position. This is what
//! lets a host recycle render targets without reordering transitions.
//!
//! Selection and ordering for a navigation live in [`mapper`](crate::mapper).

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::element::{ElementId, RenderTargetId};
use crate::tag::TransitionTag;

/// Identifies a matchable element: its name plus optional group.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransitionKey {
    /// Transition name.
    pub name: String,
    /// Optional group.
    pub group: Option<String>,
}

impl TransitionKey {
    /// Creates a key.
    #[must_use]
    pub fn new(name: impl Into<String>, group: Option<String>) -> Self {
        Self {
            name: name.into(),
            group,
        }
    }
}

/// One registered transition element on a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionDetail {
    /// Name and group.
    pub key: TransitionKey,
    /// The tagged element. May be dead by the time the detail is read.
    pub element: ElementId,
    /// Render target captured at registration.
    pub target: RenderTargetId,
    /// Whether this detail is prepared before the others.
    pub background: bool,
}

impl TransitionDetail {
    /// Builds a detail from an element's tag, resolving the background flag
    /// with `marker`.
    #[must_use]
    pub fn from_tag(
        tag: &TransitionTag,
        element: ElementId,
        target: RenderTargetId,
        marker: &str,
    ) -> Self {
        Self {
            key: TransitionKey::new(tag.name.clone(), tag.group.clone()),
            element,
            target,
            background: tag.is_background(marker),
        }
    }

    /// Returns the transition name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.key.name
    }

    /// Returns the group, if any.
    #[inline]
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.key.group.as_deref()
    }
}

/// Page-scoped transition details.
#[derive(Clone, Debug, Default)]
pub struct TransitionRegistry {
    pub(crate) pages: BTreeMap<ElementId, Vec<TransitionDetail>>,
}

impl TransitionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `detail` under `page`, replacing any detail with the same key.
    ///
    /// Returns the replaced detail. A replacement keeps the old position in
    /// the page's list.
    pub fn register(
        &mut self,
        page: ElementId,
        detail: TransitionDetail,
    ) -> Option<TransitionDetail> {
        let details = self.pages.entry(page).or_default();
        match details.iter_mut().find(|d| d.key == detail.key) {
            Some(slot) => Some(core::mem::replace(slot, detail)),
            None => {
                details.push(detail);
                None
            }
        }
    }

    /// Removes every detail that `element` registered under `page`.
    ///
    /// Returns whether anything was removed. Pages left empty are dropped.
    pub fn unregister(&mut self, element: ElementId, page: ElementId) -> bool {
        let Some(details) = self.pages.get_mut(&page) else {
            return false;
        };
        let before = details.len();
        details.retain(|d| d.element != element);
        let removed = details.len() != before;
        if details.is_empty() {
            self.pages.remove(&page);
        }
        removed
    }

    /// Drops every detail registered under `page`, returning them.
    pub fn remove_page(&mut self, page: ElementId) -> Vec<TransitionDetail> {
        self.pages.remove(&page).unwrap_or_default()
    }

    /// Returns the details registered under `page`, in registration order.
    #[must_use]
    pub fn details(&self, page: ElementId) -> &[TransitionDetail] {
        self.pages.get(&page).map_or(&[], Vec::as_slice)
    }

    /// Returns the detail for `key` on `page`.
    #[must_use]
    pub fn get(&self, page: ElementId, key: &TransitionKey) -> Option<&TransitionDetail> {
        self.details(page).iter().find(|d| &d.key == key)
    }

    /// Returns the number of pages with at least one detail.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Returns whether no page has any detail.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
