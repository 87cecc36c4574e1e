// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fan-out to two sinks.

use hero_core::trace::{
    BindingEvent, CancelEvent, DeferEvent, HideEvent, MapEvent, PhaseEvent, PrepareEvent,
    RegisterEvent, SkipEvent, StartEvent, TraceSink, UnregisterEvent,
};

/// A [`TraceSink`] that forwards every event to `first`, then `second`.
#[derive(Debug, Default)]
pub struct TeeSink<A, B> {
    /// Receives each event first.
    pub first: A,
    /// Receives each event second.
    pub second: B,
}

impl<A: TraceSink, B: TraceSink> TeeSink<A, B> {
    /// Creates a tee over two sinks.
    #[must_use]
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Returns both sinks.
    #[must_use]
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: TraceSink, B: TraceSink> TraceSink for TeeSink<A, B> {
    fn on_phase(&mut self, e: &PhaseEvent) {
        self.first.on_phase(e);
        self.second.on_phase(e);
    }

    fn on_map(&mut self, e: &MapEvent<'_>) {
        self.first.on_map(e);
        self.second.on_map(e);
    }

    fn on_prepare(&mut self, e: &PrepareEvent<'_>) {
        self.first.on_prepare(e);
        self.second.on_prepare(e);
    }

    fn on_start(&mut self, e: &StartEvent<'_>) {
        self.first.on_start(e);
        self.second.on_start(e);
    }

    fn on_defer(&mut self, e: &DeferEvent<'_>) {
        self.first.on_defer(e);
        self.second.on_defer(e);
    }

    fn on_cancel(&mut self, e: &CancelEvent<'_>) {
        self.first.on_cancel(e);
        self.second.on_cancel(e);
    }

    fn on_hide(&mut self, e: &HideEvent<'_>) {
        self.first.on_hide(e);
        self.second.on_hide(e);
    }

    fn on_skip(&mut self, e: &SkipEvent<'_>) {
        self.first.on_skip(e);
        self.second.on_skip(e);
    }

    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        self.first.on_register(e);
        self.second.on_register(e);
    }

    fn on_unregister(&mut self, e: &UnregisterEvent) {
        self.first.on_unregister(e);
        self.second.on_unregister(e);
    }

    fn on_binding(&mut self, e: &BindingEvent) {
        self.first.on_binding(e);
        self.second.on_binding(e);
    }
}
