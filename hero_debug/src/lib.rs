// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON export for hero transition diagnostics.
//!
//! This crate provides [`TraceSink`](hero_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] writes one human-readable line per event.
//! - [`json::JsonSink`] collects events as JSON objects and exports them as
//!   a single array.
//! - [`tee::TeeSink`] forwards every event to two sinks.

pub mod json;
pub mod pretty;
pub mod tee;
