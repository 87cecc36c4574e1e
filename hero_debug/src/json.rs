// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON trace export.
//!
//! [`JsonSink`] implements [`TraceSink`] and keeps every event as a
//! [`serde_json::Value`] object. [`JsonSink::export`] writes them as one
//! pretty-printed JSON array.
//!
//! Every object carries `"seq"` (event index), `"event"` (kind), and the
//! event's fields. Elements are encoded as `{"index", "generation"}` objects;
//! absent values are `null`.

use std::io::{self, Write};

use serde_json::{Value, json};

use hero_core::element::{ElementId, RenderTargetId};
use hero_core::trace::{
    BindingEvent, CancelEvent, DeferEvent, HideEvent, MapEvent, PhaseEvent, PrepareEvent,
    RegisterEvent, SkipEvent, StartEvent, TraceSink, UnregisterEvent,
};

/// A [`TraceSink`] that collects events as JSON objects.
#[derive(Debug, Default)]
pub struct JsonSink {
    events: Vec<Value>,
}

impl JsonSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected events, in emission order.
    #[must_use]
    pub fn events(&self) -> &[Value] {
        &self.events
    }

    /// Consumes the sink and returns the collected events.
    #[must_use]
    pub fn into_events(self) -> Vec<Value> {
        self.events
    }

    /// Writes the collected events to `writer` as a JSON array.
    pub fn export(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(writer, &self.events)?;
        Ok(())
    }

    fn push(&mut self, kind: &str, mut fields: Value) {
        if let Value::Object(map) = &mut fields {
            map.insert("seq".into(), json!(self.events.len()));
            map.insert("event".into(), json!(kind));
        }
        self.events.push(fields);
    }
}

fn element(id: ElementId) -> Value {
    json!({ "index": id.index(), "generation": id.generation() })
}

fn opt_element(id: Option<ElementId>) -> Value {
    id.map_or(Value::Null, element)
}

fn target(t: Option<RenderTargetId>) -> Value {
    t.map_or(Value::Null, |t| json!(t.0))
}

impl TraceSink for JsonSink {
    fn on_phase(&mut self, e: &PhaseEvent) {
        self.push(
            "phase",
            json!({
                "phase": e.phase.as_str(),
                "direction": e.direction.as_str(),
                "from": opt_element(e.from),
                "to": opt_element(e.to),
            }),
        );
    }

    fn on_map(&mut self, e: &MapEvent<'_>) {
        self.push(
            "map",
            json!({
                "page": opt_element(e.page),
                "group": e.group,
                "direction": e.direction.as_str(),
                "count": e.count,
            }),
        );
    }

    fn on_prepare(&mut self, e: &PrepareEvent<'_>) {
        self.push(
            "prepare",
            json!({
                "name": e.name,
                "element": element(e.element),
                "target": e.target.0,
                "background": e.background,
                "animation": e.animation.0,
            }),
        );
    }

    fn on_start(&mut self, e: &StartEvent<'_>) {
        self.push(
            "start",
            json!({
                "name": e.name,
                "element": element(e.element),
                "target": e.target.0,
                "animation": e.animation.0,
                "started": e.started,
                "deferred": e.deferred,
            }),
        );
    }

    fn on_defer(&mut self, e: &DeferEvent<'_>) {
        self.push(
            "defer",
            json!({
                "name": e.name,
                "element": element(e.element),
                "animation": e.animation.0,
            }),
        );
    }

    fn on_cancel(&mut self, e: &CancelEvent<'_>) {
        self.push(
            "cancel",
            json!({ "name": e.name, "animation": e.animation.0 }),
        );
    }

    fn on_hide(&mut self, e: &HideEvent<'_>) {
        self.push(
            "hide",
            json!({
                "name": e.name,
                "element": element(e.element),
                "target": target(e.target),
            }),
        );
    }

    fn on_skip(&mut self, e: &SkipEvent<'_>) {
        self.push(
            "skip",
            json!({
                "name": e.name,
                "element": element(e.element),
                "reason": e.reason.as_str(),
            }),
        );
    }

    fn on_register(&mut self, e: &RegisterEvent<'_>) {
        self.push(
            "register",
            json!({
                "page": element(e.page),
                "element": element(e.element),
                "name": e.name,
                "group": e.group,
                "target": e.target.0,
                "replaced": e.replaced,
            }),
        );
    }

    fn on_unregister(&mut self, e: &UnregisterEvent) {
        self.push(
            "unregister",
            json!({ "page": element(e.page), "element": element(e.element) }),
        );
    }

    fn on_binding(&mut self, e: &BindingEvent) {
        self.push(
            "binding",
            json!({
                "element": element(e.element),
                "page": opt_element(e.page),
                "watched": opt_element(e.watched),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero_core::compositor::AnimationId;
    use hero_core::element::ElementTree;
    use hero_core::navigation::{NavDirection, TransitionPhase};

    #[test]
    fn export_produces_valid_json() {
        let mut tree = ElementTree::new();
        let page = tree.create_page();
        let el = tree.create_element();

        let mut sink = JsonSink::new();
        sink.on_phase(&PhaseEvent {
            phase: TransitionPhase::Executing,
            from: None,
            to: Some(page),
            direction: NavDirection::Push,
        });
        sink.on_cancel(&CancelEvent {
            name: "hero",
            animation: AnimationId(4),
        });
        sink.on_hide(&HideEvent {
            name: "hero",
            element: el,
            target: None,
        });

        let mut out = Vec::new();
        sink.export(&mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["event"], "phase");
        assert_eq!(parsed[0]["phase"], "executing");
        assert_eq!(parsed[0]["from"], Value::Null);
        assert_eq!(parsed[0]["to"]["index"], 0);

        assert_eq!(parsed[1]["seq"], 1);
        assert_eq!(parsed[1]["animation"], 4);

        assert_eq!(parsed[2]["element"]["index"], 1);
        assert_eq!(parsed[2]["target"], Value::Null);
    }

    #[test]
    fn into_events_keeps_emission_order() {
        let mut sink = JsonSink::new();
        for id in [1, 2] {
            sink.on_cancel(&CancelEvent {
                name: "hero",
                animation: AnimationId(id),
            });
        }
        let events = sink.into_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["seq"], 0);
        assert_eq!(events[1]["animation"], 2);
        assert_eq!(events[1]["event"], "cancel");
    }

    #[test]
    fn export_empty_sink() {
        let mut out = Vec::new();
        JsonSink::new().export(&mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
