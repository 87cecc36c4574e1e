// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The element tree uses multi-channel dirty tracking (via
//! [`understory_dirty`]) to turn host mutations into lifecycle notifications.
//! Every channel is local-only: marking an element never marks its
//! descendants, because each notification is about exactly one element.
//!
//! # Consumption
//!
//! Callers never need to query dirty state directly. Each
//! [`ElementTree::take_changes`](crate::element::ElementTree::take_changes)
//! call drains all channels and surfaces the results as
//! [`TreeChanges`](crate::element::TreeChanges), which
//! [`Transitions::process`](crate::orchestrator::Transitions::process)
//! consumes to bind tags and fire deferred animation starts.

use understory_dirty::Channel;

/// The element was attached to, detached from, or moved between parents.
pub const PARENT: Channel = Channel::new(0);

/// The element's measured size changed.
pub const SIZE: Channel = Channel::new(1);

/// The element's transition tag was set, changed, or cleared.
pub const TAG: Channel = Channel::new(2);

/// The element's render target was replaced.
pub const TARGET: Channel = Channel::new(3);
