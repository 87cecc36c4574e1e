// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compositor contract for platform integrations.
//!
//! The compositor is the platform service that owns and drives the actual
//! interpolated animation between two render targets (for example a
//! connected-animation service or a shared-element transition API). The
//! transition engine only decides *which* render targets animate, in *what
//! order*, and when an animation is cancelled; it never interpolates.
//!
//! Animations are keyed by transition name. A source-side
//! [`prepare_to_animate`](Compositor::prepare_to_animate) captures a render
//! target and leaves a pending animation under that name; a destination-side
//! [`start`](Compositor::start) consumes it.
//!
//! [`RecordingCompositor`] is an in-memory implementation that records every
//! call, for tests and demos.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use crate::element::RenderTargetId;

/// An opaque handle to a pending compositor animation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationId(pub u32);

impl fmt::Debug for AnimationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimationId({})", self.0)
    }
}

/// Drives shared-element animations on a platform-native presentation tree.
///
/// Calls arrive in a meaningful order: within one navigation, preparation
/// calls are issued background-first, and implementations should treat the
/// call order as stacking order for overlapping layers.
pub trait Compositor {
    /// Captures `target` as the source of the animation named `name`,
    /// returning the pending animation, or `None` if the platform declined.
    ///
    /// Preparing a name that already has a pending animation replaces it.
    fn prepare_to_animate(&mut self, name: &str, target: RenderTargetId) -> Option<AnimationId>;

    /// Returns the pending animation for `name`, if any.
    fn animation(&self, name: &str) -> Option<AnimationId>;

    /// Starts `animation` towards `target`, returning whether it started.
    fn start(&mut self, animation: AnimationId, target: RenderTargetId) -> bool;

    /// Cancels a pending animation.
    fn cancel(&mut self, animation: AnimationId);

    /// Sets the duration used by subsequently prepared animations.
    fn set_default_duration(&mut self, duration: Duration);

    /// Sets compositor-level visibility of a render target.
    fn set_target_visible(&mut self, target: RenderTargetId, visible: bool);
}

/// A call observed by [`RecordingCompositor`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompositorCall {
    /// [`Compositor::prepare_to_animate`].
    Prepare {
        /// Transition name.
        name: String,
        /// Source render target.
        target: RenderTargetId,
        /// The animation handed out.
        animation: AnimationId,
    },
    /// [`Compositor::start`].
    Start {
        /// Transition name the animation was prepared under.
        name: String,
        /// The started animation.
        animation: AnimationId,
        /// Destination render target.
        target: RenderTargetId,
        /// Whether the animation was pending and therefore started.
        started: bool,
    },
    /// [`Compositor::cancel`].
    Cancel {
        /// Transition name the animation was prepared under.
        name: String,
        /// The cancelled animation.
        animation: AnimationId,
    },
    /// [`Compositor::set_default_duration`].
    SetDefaultDuration(Duration),
    /// [`Compositor::set_target_visible`].
    SetTargetVisible {
        /// The render target.
        target: RenderTargetId,
        /// New visibility.
        visible: bool,
    },
}

#[derive(Clone, Debug)]
struct Pending {
    name: String,
    animation: AnimationId,
}

/// A [`Compositor`] that keeps pending animations in memory and records every
/// call in order.
///
/// Behaves like a connected-animation service: one pending animation per
/// name, consumed by a successful start or by cancellation.
#[derive(Clone, Debug, Default)]
pub struct RecordingCompositor {
    pending: Vec<Pending>,
    calls: Vec<CompositorCall>,
    next_id: u32,
    default_duration: Option<Duration>,
}

impl RecordingCompositor {
    /// Creates a compositor with no pending animations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every call observed so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[CompositorCall] {
        &self.calls
    }

    /// Forgets the recorded calls, keeping pending animations.
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Returns the names of pending animations, in preparation order.
    pub fn pending_names(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(|p| p.name.as_str())
    }

    /// Returns the last default duration set, if any.
    #[must_use]
    pub fn default_duration(&self) -> Option<Duration> {
        self.default_duration
    }

    /// Returns the names passed to `prepare_to_animate`, in call order.
    #[must_use]
    pub fn prepared(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                CompositorCall::Prepare { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns `(name, target)` for every successful start, in call order.
    #[must_use]
    pub fn started(&self) -> Vec<(&str, RenderTargetId)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                CompositorCall::Start {
                    name,
                    target,
                    started: true,
                    ..
                } => Some((name.as_str(), *target)),
                _ => None,
            })
            .collect()
    }

    /// Returns the names of cancelled animations, in call order.
    #[must_use]
    pub fn cancelled(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                CompositorCall::Cancel { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns the render targets hidden through `set_target_visible`.
    #[must_use]
    pub fn hidden_targets(&self) -> Vec<RenderTargetId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                CompositorCall::SetTargetVisible {
                    target,
                    visible: false,
                } => Some(*target),
                _ => None,
            })
            .collect()
    }

    fn take_pending(&mut self, animation: AnimationId) -> Option<Pending> {
        let pos = self.pending.iter().position(|p| p.animation == animation)?;
        Some(self.pending.remove(pos))
    }

    fn name_of(&self, animation: AnimationId) -> String {
        self.pending
            .iter()
            .find(|p| p.animation == animation)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }
}

impl Compositor for RecordingCompositor {
    fn prepare_to_animate(&mut self, name: &str, target: RenderTargetId) -> Option<AnimationId> {
        let animation = AnimationId(self.next_id);
        self.next_id += 1;
        self.pending.retain(|p| p.name != name);
        self.pending.push(Pending {
            name: name.into(),
            animation,
        });
        self.calls.push(CompositorCall::Prepare {
            name: name.into(),
            target,
            animation,
        });
        Some(animation)
    }

    fn animation(&self, name: &str) -> Option<AnimationId> {
        self.pending
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.animation)
    }

    fn start(&mut self, animation: AnimationId, target: RenderTargetId) -> bool {
        let (name, started) = match self.take_pending(animation) {
            Some(p) => (p.name, true),
            None => (String::new(), false),
        };
        self.calls.push(CompositorCall::Start {
            name,
            animation,
            target,
            started,
        });
        started
    }

    fn cancel(&mut self, animation: AnimationId) {
        let name = self.name_of(animation);
        _ = self.take_pending(animation);
        self.calls.push(CompositorCall::Cancel { name, animation });
    }

    fn set_default_duration(&mut self, duration: Duration) {
        self.default_duration = Some(duration);
        self.calls.push(CompositorCall::SetDefaultDuration(duration));
    }

    fn set_target_visible(&mut self, target: RenderTargetId, visible: bool) {
        self.calls
            .push(CompositorCall::SetTargetVisible { target, visible });
    }
}
