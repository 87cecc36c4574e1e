// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection and ordering of a page's transition details.
//!
//! [`TransitionRegistry::map`] answers "which details of this page take part
//! in this navigation, and in what order?":
//!
//! 1. **Select**: with a group filter, only details in that group; without
//!    one, every detail on the page.
//! 2. **Order**: background details first, then the rest. Both partitions
//!    keep registration order.
//!
//! The order is a hard contract: the orchestrator issues compositor
//! preparation calls in exactly this order, and the compositor treats call
//! order as stacking order for overlapping layers.

use alloc::vec::Vec;

use crate::element::ElementId;
use crate::navigation::NavDirection;
use crate::registry::{TransitionDetail, TransitionRegistry};

impl TransitionRegistry {
    /// Returns the ordered details of `page` that match `group`.
    ///
    /// A missing page, or a page with no details, yields an empty list.
    /// `direction` does not affect selection; it names the side of the
    /// navigation the map is built for, so callers can report it.
    #[must_use]
    pub fn map(
        &self,
        page: Option<ElementId>,
        group: Option<&str>,
        direction: NavDirection,
    ) -> Vec<TransitionDetail> {
        _ = direction;
        let Some(page) = page else {
            return Vec::new();
        };
        let selected = move || {
            self.details(page)
                .iter()
                .filter(move |d| group.is_none_or(|g| d.group() == Some(g)))
        };
        selected()
            .filter(|d| d.background)
            .chain(selected().filter(|d| !d.background))
            .cloned()
            .collect()
    }
}
