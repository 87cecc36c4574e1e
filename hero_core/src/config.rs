// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine-wide transition settings.

use core::time::Duration;

/// Configuration for [`Transitions`](crate::orchestrator::Transitions).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionConfig {
    /// Duration given to pages that never had one set explicitly.
    pub default_duration: Duration,
    /// Substring that marks a transition name as a background layer when its
    /// tag uses [`Layering::Auto`](crate::tag::Layering::Auto). Empty disables
    /// name-based detection.
    pub background_marker: &'static str,
}

impl TransitionConfig {
    /// Default configuration: 300 ms pages, `"Background"` marker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_duration: Duration::from_millis(300),
            background_marker: "Background",
        }
    }

    /// Configuration that only honors explicit
    /// [`Layering`](crate::tag::Layering) and ignores names.
    #[must_use]
    pub const fn explicit_layering() -> Self {
        Self {
            background_marker: "",
            ..Self::new()
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::new()
    }
}
