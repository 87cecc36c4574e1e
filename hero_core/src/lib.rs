// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared-element ("hero") transitions for stack-based page navigation.
//!
//! `hero_core` decides which tagged elements animate between two pages when
//! the user navigates, in what order their render targets are captured, and
//! which pending animations are cancelled. The interpolation itself belongs
//! to a platform [`Compositor`](compositor::Compositor). The crate is
//! `no_std` compatible (with `alloc`) and keeps the host's element model in
//! a struct-of-arrays tree with generational handles, so a stored element
//! reference can never dangle.
//!
//! # Architecture
//!
//! ```text
//!   Host UI (element mutations)          Host navigation container
//!       │                                        │
//!       ▼                                        ▼
//!   ElementTree::take_changes()            NavigationEvent
//!       │                                        │
//!       ▼                                        ▼
//!   Transitions::process() ──► TagBinder   Transitions::navigate()
//!       │                        │               │
//!       │                        ▼               ▼
//!       │               TransitionRegistry ──► map() ──► prepare / execute
//!       │                                                   │
//!       └──── deferred starts ────────────────────────────► Compositor
//! ```
//!
//! **[`element`]** — Struct-of-arrays element tree with generational
//! handles. Parent, size, tag, and render-target mutations mark dirty
//! channels that drain into [`TreeChanges`](element::TreeChanges).
//!
//! **[`dirty`]** — Dirty channel constants for `understory_dirty`.
//!
//! **[`tag`]** — The transition name, group, and layering attached to an
//! element.
//!
//! **[`registry`]** — Page-scoped storage of transition details.
//!
//! **[`mapper`]** — Group filtering and background-first ordering.
//!
//! **[`binder`]** — Resolves a tagged element to its owning page, retrying
//! when the element is attached later.
//!
//! **[`orchestrator`]** — [`Transitions`](orchestrator::Transitions), which
//! turns navigation events into compositor calls.
//!
//! **[`compositor`]** — The [`Compositor`](compositor::Compositor) trait and
//! a recording implementation.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod binder;
pub mod compositor;
pub mod config;
pub mod dirty;
pub mod element;
pub mod mapper;
pub mod navigation;
pub mod orchestrator;
pub mod registry;
pub mod tag;
pub mod trace;
