// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Elements are
//! printed as `e<index>.<generation>` and render targets as `rt<n>`.

use std::fmt;
use std::io::Write;

use hero_core::element::{ElementId, RenderTargetId};
use hero_core::trace::{
    BindingEvent, CancelEvent, DeferEvent, HideEvent, MapEvent, PhaseEvent, PrepareEvent,
    RegisterEvent, SkipEvent, StartEvent, TraceSink, UnregisterEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

struct El(ElementId);

impl fmt::Display for El {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}.{}", self.0.index(), self.0.generation())
    }
}

struct OptEl(Option<ElementId>);

impl fmt::Display for OptEl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{}", El(id)),
            None => f.write_str("-"),
        }
    }
}

struct Rt(Option<RenderTargetId>);

impl fmt::Display for Rt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(t) => write!(f, "rt{}", t.0),
            None => f.write_str("-"),
        }
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_phase(&mut self, e: &PhaseEvent) {
        let _ = writeln!(
            self.writer,
            "[phase] {} {} from={} to={}",
            e.phase.as_str(),
            e.direction.as_str(),
            OptEl(e.from),
            OptEl(e.to),
        );
    }

    fn on_map(&mut self, e: &MapEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[map] page={} group={} side={} count={}",
            OptEl(e.page),
            e.group.unwrap_or("*"),
            e.direction.as_str(),
            e.count,
        );
    }

    fn on_prepare(&mut self, e: &PrepareEvent<'_>) {
        let layer = if e.background { " bg" } else { "" };
        let _ = writeln!(
            self.writer,
            "[prepare] {} el={} target={} anim={}{layer}",
            e.name,
            El(e.element),
            Rt(Some(e.target)),
            e.animation.0,
        );
    }

    fn on_start(&mut self, e: &StartEvent<'_>) {
        let outcome = if e.started { "ok" } else { "REFUSED" };
        let when = if e.deferred { " (deferred)" } else { "" };
        let _ = writeln!(
            self.writer,
            "[start] {} el={} target={} anim={} {outcome}{when}",
            e.name,
            El(e.element),
            Rt(Some(e.target)),
            e.animation.0,
        );
    }

    fn on_defer(&mut self, e: &DeferEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[defer] {} el={} anim={} waiting for layout",
            e.name,
            El(e.element),
            e.animation.0,
        );
    }

    fn on_cancel(&mut self, e: &CancelEvent<'_>) {
        let _ = writeln!(self.writer, "[cancel] {} anim={}", e.name, e.animation.0);
    }

    fn on_hide(&mut self, e: &HideEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[hide] {} el={} target={}",
            e.name,
            El(e.element),
            Rt(e.target),
        );
    }

    fn on_skip(&mut self, e: &SkipEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[skip] {} el={} reason={}",
            e.name,
            El(e.element),
            e.reason.as_str(),
        );
    }

    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        let verb = if e.replaced { "replace" } else { "add" };
        let _ = writeln!(
            self.writer,
            "[register] {verb} {}/{} page={} el={} target={}",
            e.name,
            e.group.unwrap_or("*"),
            El(e.page),
            El(e.element),
            Rt(Some(e.target)),
        );
    }

    fn on_unregister(&mut self, e: &UnregisterEvent) {
        let _ = writeln!(
            self.writer,
            "[unregister] page={} el={}",
            El(e.page),
            El(e.element),
        );
    }

    fn on_binding(&mut self, e: &BindingEvent) {
        let _ = match e.page {
            Some(page) => writeln!(
                self.writer,
                "[bind] el={} page={}",
                El(e.element),
                El(page)
            ),
            None => writeln!(
                self.writer,
                "[bind] el={} pending, watching {}",
                El(e.element),
                OptEl(e.watched),
            ),
        };
    }
}
