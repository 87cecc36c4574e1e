// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated list/detail navigation that exercises the transition trace
//! pipeline.
//!
//! Builds a list page with two cards and a detail page, pushes the detail
//! page for the second card, lets a late layout pass complete a deferred
//! start, then pops back. Events go to both a
//! [`PrettyPrintSink`](hero_debug::pretty::PrettyPrintSink) on stdout and a
//! [`JsonSink`](hero_debug::json::JsonSink), which is exported to
//! `hero_trace.json`.

use std::fs::File;
use std::io::BufWriter;

use hero_core::compositor::RecordingCompositor;
use hero_core::config::TransitionConfig;
use hero_core::element::{ElementId, ElementTree, RenderTargetId};
use hero_core::navigation::NavigationEvent;
use hero_core::orchestrator::Transitions;
use hero_core::tag::TransitionTag;
use hero_core::trace::Tracer;
use kurbo::Size;

use hero_debug::json::JsonSink;
use hero_debug::pretty::PrettyPrintSink;
use hero_debug::tee::TeeSink;

const CARD_SIZE: Size = Size::new(320.0, 96.0);

struct Host {
    tree: ElementTree,
    next_target: u32,
}

impl Host {
    /// Adds a tagged, rendered element under `parent`. `size: None` leaves it
    /// unmeasured.
    fn tagged(
        &mut self,
        parent: ElementId,
        tag: TransitionTag,
        size: Option<Size>,
    ) -> ElementId {
        let el = self.tree.create_element();
        self.tree.add_child(parent, el);
        self.tree.set_tag(el, Some(tag));
        self.next_target += 1;
        self.tree
            .set_render_target(el, Some(RenderTargetId(self.next_target)));
        self.tree.set_size(el, size);
        el
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut sink = TeeSink::new(
        PrettyPrintSink::new(Box::new(std::io::stdout())),
        JsonSink::new(),
    );
    let mut compositor = RecordingCompositor::new();
    let mut transitions = Transitions::new(TransitionConfig::new());

    // -- host tree ---------------------------------------------------------
    let mut host = Host {
        tree: ElementTree::new(),
        next_target: 0,
    };
    let list = host.tree.create_page();
    let detail = host.tree.create_page();

    for group in ["1", "2"] {
        let card = host.tree.create_element();
        host.tree.add_child(list, card);
        host.tagged(
            card,
            TransitionTag::new("cardBackground").with_group(group),
            Some(CARD_SIZE),
        );
        host.tagged(
            card,
            TransitionTag::new("photo").with_group(group),
            Some(Size::new(96.0, 96.0)),
        );
        host.tagged(
            card,
            TransitionTag::new("title").with_group(group),
            Some(Size::new(200.0, 24.0)),
        );
    }

    host.tagged(
        detail,
        TransitionTag::new("cardBackground"),
        Some(Size::new(390.0, 844.0)),
    );
    host.tagged(
        detail,
        TransitionTag::new("photo"),
        Some(Size::new(390.0, 390.0)),
    );
    // Laid out after navigation completes.
    let title = host.tagged(detail, TransitionTag::new("title"), None);
    host.tagged(
        detail,
        TransitionTag::new("description"),
        Some(Size::new(390.0, 200.0)),
    );

    {
        let mut tracer = Tracer::new(&mut sink);
        let changes = host.tree.take_changes();
        transitions.process(&host.tree, &changes, &mut compositor, &mut tracer);
    }

    // -- push list -> detail for card 2 -------------------------------------
    transitions.set_selected_group(list, Some("2".into()));
    let stack = [list, detail];
    {
        let mut tracer = Tracer::new(&mut sink);
        transitions.navigate(
            &mut host.tree,
            &stack,
            NavigationEvent::PushRequested {
                page: detail,
                before: None,
            },
            &mut compositor,
            &mut tracer,
        );
        transitions.navigate(
            &mut host.tree,
            &stack,
            NavigationEvent::Pushed { page: detail },
            &mut compositor,
            &mut tracer,
        );
    }

    // -- late layout pass ----------------------------------------------------
    host.tree.set_size(title, Some(Size::new(358.0, 32.0)));
    {
        let mut tracer = Tracer::new(&mut sink);
        let changes = host.tree.take_changes();
        transitions.process(&host.tree, &changes, &mut compositor, &mut tracer);
    }

    // -- pop detail -> list --------------------------------------------------
    {
        let mut tracer = Tracer::new(&mut sink);
        transitions.navigate(
            &mut host.tree,
            &stack,
            NavigationEvent::PopRequested { page: detail },
            &mut compositor,
            &mut tracer,
        );
        transitions.navigate(
            &mut host.tree,
            &stack[..1],
            NavigationEvent::Popped { page: detail },
            &mut compositor,
            &mut tracer,
        );
    }

    // -- export JSON trace ---------------------------------------------------
    let (_, json) = sink.into_parts();
    let path = "hero_trace.json";
    let file = File::create(path).expect("failed to create hero_trace.json");
    let mut writer = BufWriter::new(file);
    json.export(&mut writer).expect("failed to write JSON trace");

    println!(
        "Wrote {path} ({} events, {} compositor calls)",
        json.events().len(),
        compositor.calls().len(),
    );
}
