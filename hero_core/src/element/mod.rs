// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host element model.
//!
//! An *element* is a node in the host's visual tree, as far as transitions
//! care about it. Each element has:
//!
//! - An identity ([`ElementId`]), a generational handle that becomes stale
//!   when the element is destroyed. Transition details store this handle in
//!   place of a weak reference.
//! - Topology: parent, first-child, and sibling links forming an ordered tree.
//! - A [`kind`](ElementKind): pages own transition details, views are tagged.
//! - **Attributes** set by the host: transition [`tag`](ElementTree::set_tag),
//!   [`render target`](ElementTree::set_render_target),
//!   [`measured size`](ElementTree::set_size), and
//!   [`visibility`](ElementTree::set_visible).
//!
//! Elements are stored in struct-of-arrays layout with index-based handles.
//!
//! # Notifications
//!
//! Attribute and topology mutations mark the corresponding dirty channel (see
//! [`dirty`](crate::dirty)). The host drains them with
//! [`ElementTree::take_changes`] at a point of its choosing (typically once
//! per layout pass) and hands the [`TreeChanges`] to the transition engine.

mod ancestors;
mod changes;
mod id;
mod tree;

pub use ancestors::Ancestors;
pub use changes::TreeChanges;
pub use id::{ElementId, INVALID, RenderTargetId};
pub use tree::{ElementKind, ElementTree};
