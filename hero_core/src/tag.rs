// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transition tags attached to elements.

use alloc::string::String;

/// Whether a tagged element animates as a background layer.
///
/// Background details are prepared before all other details, because the
/// compositor treats preparation order as stacking order for overlapping
/// layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Layering {
    /// Background if the name contains the configured
    /// [`background_marker`](crate::config::TransitionConfig::background_marker).
    #[default]
    Auto,
    /// Always a background layer.
    Background,
    /// Never a background layer.
    Foreground,
}

/// The transition name, group, and layering carried by a tagged element.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionTag {
    /// Transition name; matched across pages.
    pub name: String,
    /// Optional group, used when one page holds several named sets.
    pub group: Option<String>,
    /// Background/foreground classification.
    pub layering: Layering,
}

impl TransitionTag {
    /// Creates an ungrouped tag with automatic layering.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            group: None,
            layering: Layering::Auto,
        }
    }

    /// Sets the group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the layering.
    #[must_use]
    pub fn with_layering(mut self, layering: Layering) -> Self {
        self.layering = layering;
        self
    }

    /// Resolves the background flag, falling back to a substring match on
    /// `marker` for [`Layering::Auto`].
    #[must_use]
    pub fn is_background(&self, marker: &str) -> bool {
        match self.layering {
            Layering::Background => true,
            Layering::Foreground => false,
            Layering::Auto => !marker.is_empty() && self.name.contains(marker),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_layering_uses_marker() {
        let tag = TransitionTag::new("headerBackground");
        assert!(tag.is_background("Background"));
        assert!(!TransitionTag::new("title").is_background("Background"));
    }

    #[test]
    fn explicit_layering_overrides_name() {
        let fg = TransitionTag::new("headerBackground").with_layering(Layering::Foreground);
        assert!(!fg.is_background("Background"));
        let bg = TransitionTag::new("title").with_layering(Layering::Background);
        assert!(bg.is_background("Background"));
    }

    #[test]
    fn empty_marker_never_matches() {
        assert!(!TransitionTag::new("anything").is_background(""));
    }
}
