// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for transition orchestration.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! engine calls as it binds tags, maps pages, and drives the compositor. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! Skipped items are reported with a [`SkipReason`] rather than as errors:
//! nothing in orchestration is fatal, but it is useful to see *why* an element
//! did not animate.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).

use crate::compositor::AnimationId;
use crate::element::{ElementId, RenderTargetId};
use crate::navigation::{NavDirection, TransitionPhase};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why a transition detail produced no compositor call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The element was destroyed.
    DeadElement,
    /// The element is alive but has no render target.
    NoRenderTarget,
    /// The compositor has no pending animation under the detail's name.
    NoAnimation,
    /// The compositor declined to prepare an animation.
    Declined,
}

impl SkipReason {
    /// Returns a short label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeadElement => "dead-element",
            Self::NoRenderTarget => "no-render-target",
            Self::NoAnimation => "no-animation",
            Self::Declined => "declined",
        }
    }
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the orchestrator changes phase.
#[derive(Clone, Copy, Debug)]
pub struct PhaseEvent {
    /// The phase being entered.
    pub phase: TransitionPhase,
    /// Source page, if any.
    pub from: Option<ElementId>,
    /// Destination page, if any.
    pub to: Option<ElementId>,
    /// Navigation verb.
    pub direction: NavDirection,
}

/// Emitted after a page's details were selected and ordered.
#[derive(Clone, Copy, Debug)]
pub struct MapEvent<'a> {
    /// The mapped page, if any.
    pub page: Option<ElementId>,
    /// Group filter applied.
    pub group: Option<&'a str>,
    /// Side of the navigation the map was built for.
    pub direction: NavDirection,
    /// Number of details selected.
    pub count: usize,
}

/// Emitted for each compositor preparation.
#[derive(Clone, Copy, Debug)]
pub struct PrepareEvent<'a> {
    /// Transition name.
    pub name: &'a str,
    /// Source element.
    pub element: ElementId,
    /// Captured render target.
    pub target: RenderTargetId,
    /// Whether the detail is a background layer.
    pub background: bool,
    /// The pending animation.
    pub animation: AnimationId,
}

/// Emitted for each compositor start.
#[derive(Clone, Copy, Debug)]
pub struct StartEvent<'a> {
    /// Transition name.
    pub name: &'a str,
    /// Destination element.
    pub element: ElementId,
    /// Destination render target.
    pub target: RenderTargetId,
    /// The started animation.
    pub animation: AnimationId,
    /// Whether the compositor reported success.
    pub started: bool,
    /// Whether the start waited for a size-change notification.
    pub deferred: bool,
}

/// Emitted when a start is postponed until the element is measured.
#[derive(Clone, Copy, Debug)]
pub struct DeferEvent<'a> {
    /// Transition name.
    pub name: &'a str,
    /// Unmeasured destination element.
    pub element: ElementId,
    /// The animation waiting to start.
    pub animation: AnimationId,
}

/// Emitted when a source-only detail's animation is cancelled.
#[derive(Clone, Copy, Debug)]
pub struct CancelEvent<'a> {
    /// Transition name.
    pub name: &'a str,
    /// The cancelled animation.
    pub animation: AnimationId,
}

/// Emitted when a source-only element is hidden after a pop.
#[derive(Clone, Copy, Debug)]
pub struct HideEvent<'a> {
    /// Transition name.
    pub name: &'a str,
    /// Hidden element.
    pub element: ElementId,
    /// Its render target, if it was alive.
    pub target: Option<RenderTargetId>,
}

/// Emitted when a detail is passed over.
#[derive(Clone, Copy, Debug)]
pub struct SkipEvent<'a> {
    /// Transition name.
    pub name: &'a str,
    /// The detail's element.
    pub element: ElementId,
    /// Why nothing happened.
    pub reason: SkipReason,
}

/// Emitted when a detail is registered under a page.
#[derive(Clone, Copy, Debug)]
pub struct RegisterEvent<'a> {
    /// Owning page.
    pub page: ElementId,
    /// Tagged element.
    pub element: ElementId,
    /// Transition name.
    pub name: &'a str,
    /// Transition group.
    pub group: Option<&'a str>,
    /// Render target.
    pub target: RenderTargetId,
    /// Whether an existing detail with the same key was replaced.
    pub replaced: bool,
}

/// Emitted when an element's details are removed from a page.
#[derive(Clone, Copy, Debug)]
pub struct UnregisterEvent {
    /// Owning page.
    pub page: ElementId,
    /// Element whose details were removed.
    pub element: ElementId,
}

/// Emitted when a tagged element's owning page is looked up.
#[derive(Clone, Copy, Debug)]
pub struct BindingEvent {
    /// Tagged element.
    pub element: ElementId,
    /// The owning page, or `None` if the element is not attached to one yet.
    pub page: Option<ElementId>,
    /// When unresolved, the detached root now watched for parent changes.
    pub watched: Option<ElementId>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the transition engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the orchestrator changes phase.
    fn on_phase(&mut self, e: &PhaseEvent) {
        _ = e;
    }

    /// Called after a page map is built.
    fn on_map(&mut self, e: &MapEvent<'_>) {
        _ = e;
    }

    /// Called after a compositor preparation.
    fn on_prepare(&mut self, e: &PrepareEvent<'_>) {
        _ = e;
    }

    /// Called after a compositor start.
    fn on_start(&mut self, e: &StartEvent<'_>) {
        _ = e;
    }

    /// Called when a start is deferred until layout.
    fn on_defer(&mut self, e: &DeferEvent<'_>) {
        _ = e;
    }

    /// Called after a compositor cancellation.
    fn on_cancel(&mut self, e: &CancelEvent<'_>) {
        _ = e;
    }

    /// Called when a source element is hidden.
    fn on_hide(&mut self, e: &HideEvent<'_>) {
        _ = e;
    }

    /// Called when a detail is skipped.
    fn on_skip(&mut self, e: &SkipEvent<'_>) {
        _ = e;
    }

    /// Called when a detail is registered.
    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        _ = e;
    }

    /// Called when an element's details are unregistered.
    fn on_unregister(&mut self, e: &UnregisterEvent) {
        _ = e;
    }

    /// Called when a tagged element's page is resolved or found missing.
    fn on_binding(&mut self, e: &BindingEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PhaseEvent`].
    #[inline]
    pub fn phase(&mut self, e: &PhaseEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_phase(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MapEvent`].
    #[inline]
    pub fn map(&mut self, e: &MapEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_map(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PrepareEvent`].
    #[inline]
    pub fn prepare(&mut self, e: &PrepareEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_prepare(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StartEvent`].
    #[inline]
    pub fn start(&mut self, e: &StartEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DeferEvent`].
    #[inline]
    pub fn defer(&mut self, e: &DeferEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_defer(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CancelEvent`].
    #[inline]
    pub fn cancel(&mut self, e: &CancelEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_cancel(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`HideEvent`].
    #[inline]
    pub fn hide(&mut self, e: &HideEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_hide(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SkipEvent`].
    #[inline]
    pub fn skip(&mut self, e: &SkipEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_skip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RegisterEvent`].
    #[inline]
    pub fn register(&mut self, e: &RegisterEvent<'_>) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_register(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`UnregisterEvent`].
    #[inline]
    pub fn unregister(&mut self, e: &UnregisterEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_unregister(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`BindingEvent`].
    #[inline]
    pub fn binding(&mut self, e: &BindingEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_binding(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementTree;

    fn sample_phase() -> PhaseEvent {
        let mut tree = ElementTree::new();
        let page = tree.create_page();
        PhaseEvent {
            phase: TransitionPhase::Preparing,
            from: Some(page),
            to: None,
            direction: NavDirection::Pop,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_phase(&sample_phase());
        sink.on_skip(&SkipEvent {
            name: "hero",
            element: sample_phase().from.unwrap(),
            reason: SkipReason::NoAnimation,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.phase(&sample_phase());
        tracer.cancel(&CancelEvent {
            name: "hero",
            animation: AnimationId(0),
        });
    }

    #[test]
    fn skip_reason_labels_are_distinct() {
        let labels = [
            SkipReason::DeadElement.as_str(),
            SkipReason::NoRenderTarget.as_str(),
            SkipReason::NoAnimation.as_str(),
            SkipReason::Declined.as_str(),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b, "labels must be unique");
            }
        }
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            phases: Vec<TransitionPhase>,
        }
        impl TraceSink for RecordingSink {
            fn on_phase(&mut self, e: &PhaseEvent) {
                self.phases.push(e.phase);
            }
        }

        let mut sink = RecordingSink { phases: Vec::new() };
        let mut tracer = Tracer::new(&mut sink);
        tracer.phase(&sample_phase());
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.phases, &[TransitionPhase::Preparing]);
    }
}
