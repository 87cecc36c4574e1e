// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation-driven transition orchestration.
//!
//! [`Transitions`] owns the registry, the tag binder, and per-page state, and
//! turns navigation lifecycle events into compositor calls. Each navigation
//! runs in two halves:
//!
//! - **prepare** (on `PushRequested` / `PopRequested`): map the source page,
//!   stash the map on the source page's [`PageState`], and capture every
//!   mapped render target with
//!   [`prepare_to_animate`](Compositor::prepare_to_animate).
//! - **execute** (on `Pushed` / `Popped`): take the stash, map the
//!   destination page, start matching animations, and cancel the ones that
//!   have no counterpart. After a pop, unmatched source elements are hidden.
//!
//! Destination elements that have not been measured yet cannot start; their
//! start is deferred until the element's first size change, which arrives
//! through [`Transitions::process`].
//!
//! Nothing here fails. A detail whose element, render target, or animation
//! is gone is skipped and reported to the tracer as a
//! [`SkipEvent`](crate::trace::SkipEvent).

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;

use crate::binder::TagBinder;
use crate::compositor::{AnimationId, Compositor};
use crate::config::TransitionConfig;
use crate::element::{ElementId, ElementTree, RenderTargetId, TreeChanges};
use crate::navigation::{NavDirection, NavigationEvent, TransitionPhase, below_top};
use crate::registry::{TransitionDetail, TransitionRegistry};
use crate::trace::{
    CancelEvent, DeferEvent, HideEvent, MapEvent, PhaseEvent, PrepareEvent, RegisterEvent,
    SkipEvent, SkipReason, StartEvent, Tracer, UnregisterEvent,
};

/// Transition state of one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    from_map: Option<Vec<TransitionDetail>>,
    /// Group used when this page is the source of a push or the destination
    /// of any navigation. `None` selects every detail.
    pub selected_group: Option<String>,
    /// Duration handed to the compositor when this page is a source.
    pub duration: Duration,
}

impl PageState {
    fn new(config: &TransitionConfig) -> Self {
        Self {
            from_map: None,
            selected_group: None,
            duration: config.default_duration,
        }
    }

    /// Returns whether a prepared map is waiting for execution.
    #[must_use]
    pub fn has_from_map(&self) -> bool {
        self.from_map.is_some()
    }
}

/// A start waiting for its element's first size change.
#[derive(Clone, Debug)]
struct DeferredStart {
    element: ElementId,
    name: String,
    animation: AnimationId,
}

/// The transition engine.
///
/// Feed it tree changes with [`process`](Self::process) and navigation
/// events with [`navigate`](Self::navigate).
#[derive(Clone, Debug, Default)]
pub struct Transitions {
    config: TransitionConfig,
    registry: TransitionRegistry,
    binder: TagBinder,
    pages: BTreeMap<ElementId, PageState>,
    deferred: Vec<DeferredStart>,
    phase: TransitionPhase,
}

impl Transitions {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &TransitionRegistry {
        &self.registry
    }

    /// Returns the tag binder.
    #[must_use]
    pub fn binder(&self) -> &TagBinder {
        &self.binder
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Returns the state of `page`, if any setting or map was ever stored.
    #[must_use]
    pub fn page_state(&self, page: ElementId) -> Option<&PageState> {
        self.pages.get(&page)
    }

    fn page_state_mut(&mut self, page: ElementId) -> &mut PageState {
        let config = &self.config;
        self.pages.entry(page).or_insert_with(|| PageState::new(config))
    }

    /// Sets the group `page` maps with.
    pub fn set_selected_group(&mut self, page: ElementId, group: Option<String>) {
        self.page_state_mut(page).selected_group = group;
    }

    /// Returns the group `page` maps with.
    #[must_use]
    pub fn selected_group(&self, page: ElementId) -> Option<&str> {
        self.pages
            .get(&page)
            .and_then(|s| s.selected_group.as_deref())
    }

    /// Sets the animation duration used when `page` is a source.
    pub fn set_duration(&mut self, page: ElementId, duration: Duration) {
        self.page_state_mut(page).duration = duration;
    }

    /// Returns the animation duration used when `page` is a source.
    #[must_use]
    pub fn duration(&self, page: ElementId) -> Duration {
        self.pages
            .get(&page)
            .map_or(self.config.default_duration, |s| s.duration)
    }

    /// Sets the active page of a single-page shell root.
    ///
    /// Only affects elements bound afterwards.
    pub fn set_shell_page(&mut self, page: Option<ElementId>) {
        self.binder.set_shell_page(page);
    }

    /// Returns whether `element` has a start waiting for its size.
    #[must_use]
    pub fn has_deferred_start(&self, element: ElementId) -> bool {
        self.deferred.iter().any(|d| d.element == element)
    }

    // -- Binding --

    /// Binds a tagged element to its page and registers it.
    ///
    /// Returns the page, or `None` if the element is dead, untagged, or not
    /// attached to a page yet (it is then retried on parent changes).
    pub fn attach(
        &mut self,
        tree: &ElementTree,
        element: ElementId,
        tracer: &mut Tracer<'_>,
    ) -> Option<ElementId> {
        if !tree.is_alive(element) || tree.tag(element).is_none() {
            return None;
        }
        let page = self.binder.attach(tree, element, tracer)?;
        self.register_bound(tree, element, page, tracer);
        Some(page)
    }

    /// Unbinds `element` and drops its details and any deferred start.
    ///
    /// Returns the page it was bound to.
    pub fn detach(&mut self, element: ElementId, tracer: &mut Tracer<'_>) -> Option<ElementId> {
        self.deferred.retain(|d| d.element != element);
        let page = self.binder.detach(element)?;
        if self.registry.unregister(element, page) {
            tracer.unregister(&UnregisterEvent { page, element });
        }
        Some(page)
    }

    /// Forgets `page` along with the bindings and deferred starts of its
    /// elements.
    pub fn remove_page(&mut self, page: ElementId, tracer: &mut Tracer<'_>) {
        for detail in self.registry.remove_page(page) {
            tracer.unregister(&UnregisterEvent {
                page,
                element: detail.element,
            });
        }
        self.pages.remove(&page);
        for element in self.binder.forget_page(page) {
            self.deferred.retain(|d| d.element != element);
        }
    }

    /// Brings the registry in line with the element's current tag and target.
    fn register_bound(
        &mut self,
        tree: &ElementTree,
        element: ElementId,
        page: ElementId,
        tracer: &mut Tracer<'_>,
    ) {
        let (Some(tag), Some(target)) = (tree.tag(element), tree.render_target(element)) else {
            if self.registry.unregister(element, page) {
                tracer.unregister(&UnregisterEvent { page, element });
            }
            return;
        };
        let detail =
            TransitionDetail::from_tag(tag, element, target, self.config.background_marker);
        let retagged = self
            .registry
            .details(page)
            .iter()
            .any(|d| d.element == element && d.key != detail.key);
        if retagged {
            self.registry.unregister(element, page);
        }
        let replaced = self.registry.register(page, detail).is_some();
        tracer.register(&RegisterEvent {
            page,
            element,
            name: &tag.name,
            group: tag.group.as_deref(),
            target,
            replaced,
        });
    }

    // -- Tree notifications --

    /// Applies a batch of tree changes.
    ///
    /// Destroyed elements are detached (destroyed pages are forgotten),
    /// re-tagged elements are attached or detached, and new render targets are
    /// re-registered. On parent changes, bound elements that no longer reach a
    /// page are unregistered and made pending, and pending bindings are
    /// retried. Size changes fire deferred starts.
    pub fn process(
        &mut self,
        tree: &ElementTree,
        changes: &TreeChanges,
        compositor: &mut impl Compositor,
        tracer: &mut Tracer<'_>,
    ) {
        for &id in &changes.removed {
            self.remove_page(id, tracer);
            self.detach(id, tracer);
        }

        for &id in &changes.retagged {
            if tree.tag(id).is_some() {
                self.attach(tree, id, tracer);
            } else {
                self.detach(id, tracer);
            }
        }

        for &id in &changes.retargeted {
            if let Some(page) = self.binder.bound_page(id) {
                self.register_bound(tree, id, page, tracer);
            }
        }

        if !changes.reparented.is_empty() {
            // Left the render tree: unregister and wait for a page again.
            for element in self.binder.stranded(tree) {
                self.detach(element, tracer);
                self.attach(tree, element, tracer);
            }
        }

        let rebound = self
            .binder
            .parent_changed(tree, &changes.reparented, tracer);
        for (element, page) in rebound {
            self.register_bound(tree, element, page, tracer);
        }

        for &id in &changes.resized {
            self.fire_deferred(tree, id, compositor, tracer);
        }
    }

    fn fire_deferred(
        &mut self,
        tree: &ElementTree,
        element: ElementId,
        compositor: &mut impl Compositor,
        tracer: &mut Tracer<'_>,
    ) {
        let Some(pos) = self.deferred.iter().position(|d| d.element == element) else {
            return;
        };
        let pending = self.deferred.remove(pos);
        let Some(target) = tree.live_target(element) else {
            tracer.skip(&SkipEvent {
                name: &pending.name,
                element,
                reason: SkipReason::NoRenderTarget,
            });
            return;
        };
        let started = compositor.start(pending.animation, target);
        tracer.start(&StartEvent {
            name: &pending.name,
            element,
            target,
            animation: pending.animation,
            started,
            deferred: true,
        });
    }

    // -- Navigation --

    /// Dispatches a navigation lifecycle event.
    ///
    /// `stack` is the navigation stack as the host sees it when the event
    /// fires, root first.
    pub fn navigate(
        &mut self,
        tree: &mut ElementTree,
        stack: &[ElementId],
        event: NavigationEvent,
        compositor: &mut impl Compositor,
        tracer: &mut Tracer<'_>,
    ) {
        match event {
            NavigationEvent::PushRequested { page, before } => {
                debug_assert_eq!(stack.last(), Some(&page), "push target must be on top");
                let from = before.or_else(|| below_top(stack));
                self.prepare(
                    tree,
                    from,
                    Some(page),
                    NavDirection::Push,
                    compositor,
                    tracer,
                );
            }
            NavigationEvent::Pushed { page } => {
                let to = stack.last().copied().or(Some(page));
                self.execute(
                    tree,
                    below_top(stack),
                    to,
                    NavDirection::Push,
                    compositor,
                    tracer,
                );
            }
            NavigationEvent::PopRequested { page } => {
                debug_assert_eq!(stack.last(), Some(&page), "popped page must be on top");
                self.prepare(
                    tree,
                    Some(page),
                    below_top(stack),
                    NavDirection::Pop,
                    compositor,
                    tracer,
                );
            }
            NavigationEvent::Popped { page } => {
                let to = stack.last().copied();
                self.execute(tree, Some(page), to, NavDirection::Pop, compositor, tracer);
            }
            NavigationEvent::PopToRootRequested
            | NavigationEvent::PoppedToRoot
            | NavigationEvent::InsertPageBeforeRequested { .. }
            | NavigationEvent::RemovePageRequested { .. } => {}
        }
    }

    /// Captures the source side of a navigation.
    ///
    /// Any map left behind by an earlier prepare that never executed is
    /// discarded, on every page.
    pub fn prepare(
        &mut self,
        tree: &ElementTree,
        from: Option<ElementId>,
        to: Option<ElementId>,
        direction: NavDirection,
        compositor: &mut impl Compositor,
        tracer: &mut Tracer<'_>,
    ) {
        self.enter(TransitionPhase::Preparing, from, to, direction, tracer);

        let group = match direction {
            NavDirection::Push => from.and_then(|page| self.selected_group(page)),
            NavDirection::Pop => None,
        };
        let from_map = self.registry.map(from, group, direction);
        tracer.map(&MapEvent {
            page: from,
            group,
            direction,
            count: from_map.len(),
        });

        for state in self.pages.values_mut() {
            state.from_map = None;
        }

        let Some(from) = from else {
            return;
        };
        compositor.set_default_duration(self.duration(from));

        for detail in &from_map {
            let Some(target) = live_target(tree, detail, tracer) else {
                continue;
            };
            match compositor.prepare_to_animate(detail.name(), target) {
                Some(animation) => tracer.prepare(&PrepareEvent {
                    name: detail.name(),
                    element: detail.element,
                    target,
                    background: detail.background,
                    animation,
                }),
                None => tracer.skip(&SkipEvent {
                    name: detail.name(),
                    element: detail.element,
                    reason: SkipReason::Declined,
                }),
            }
        }

        self.page_state_mut(from).from_map = Some(from_map);
    }

    /// Completes a navigation on the destination side.
    pub fn execute(
        &mut self,
        tree: &mut ElementTree,
        from: Option<ElementId>,
        to: Option<ElementId>,
        direction: NavDirection,
        compositor: &mut impl Compositor,
        tracer: &mut Tracer<'_>,
    ) {
        self.enter(TransitionPhase::Executing, from, to, direction, tracer);

        let trans_from = from
            .and_then(|page| self.pages.get_mut(&page))
            .and_then(|state| state.from_map.take())
            .unwrap_or_default();

        let group = to.and_then(|page| self.selected_group(page));
        let trans_to = self.registry.map(to, group, direction.reverse());
        tracer.map(&MapEvent {
            page: to,
            group,
            direction: direction.reverse(),
            count: trans_to.len(),
        });

        for detail in &trans_to {
            let Some(animation) = compositor.animation(detail.name()) else {
                tracer.skip(&SkipEvent {
                    name: detail.name(),
                    element: detail.element,
                    reason: SkipReason::NoAnimation,
                });
                continue;
            };
            let Some(target) = live_target(tree, detail, tracer) else {
                continue;
            };
            if tree.is_measured(detail.element) {
                let started = compositor.start(animation, target);
                tracer.start(&StartEvent {
                    name: detail.name(),
                    element: detail.element,
                    target,
                    animation,
                    started,
                    deferred: false,
                });
            } else {
                // A newer start supersedes one still waiting on the same element.
                self.deferred.retain(|d| d.element != detail.element);
                self.deferred.push(DeferredStart {
                    element: detail.element,
                    name: detail.name().to_string(),
                    animation,
                });
                tracer.defer(&DeferEvent {
                    name: detail.name(),
                    element: detail.element,
                    animation,
                });
            }
        }

        for detail in &trans_from {
            if trans_to.iter().any(|d| d.name() == detail.name()) {
                continue;
            }
            if let Some(animation) = compositor.animation(detail.name()) {
                compositor.cancel(animation);
                tracer.cancel(&CancelEvent {
                    name: detail.name(),
                    animation,
                });
            }
            if direction == NavDirection::Pop {
                hide_source(tree, detail, compositor, tracer);
            }
        }

        self.enter(TransitionPhase::Done, from, to, direction, tracer);
    }

    fn enter(
        &mut self,
        phase: TransitionPhase,
        from: Option<ElementId>,
        to: Option<ElementId>,
        direction: NavDirection,
        tracer: &mut Tracer<'_>,
    ) {
        self.phase = phase;
        tracer.phase(&PhaseEvent {
            phase,
            from,
            to,
            direction,
        });
    }
}

/// Returns the detail's current render target, reporting why there is none.
fn live_target(
    tree: &ElementTree,
    detail: &TransitionDetail,
    tracer: &mut Tracer<'_>,
) -> Option<RenderTargetId> {
    let reason = if !tree.is_alive(detail.element) {
        SkipReason::DeadElement
    } else if let Some(target) = tree.render_target(detail.element) {
        return Some(target);
    } else {
        SkipReason::NoRenderTarget
    };
    tracer.skip(&SkipEvent {
        name: detail.name(),
        element: detail.element,
        reason,
    });
    None
}

fn hide_source(
    tree: &mut ElementTree,
    detail: &TransitionDetail,
    compositor: &mut impl Compositor,
    tracer: &mut Tracer<'_>,
) {
    if !tree.is_alive(detail.element) {
        tracer.skip(&SkipEvent {
            name: detail.name(),
            element: detail.element,
            reason: SkipReason::DeadElement,
        });
        return;
    }
    tree.set_visible(detail.element, false);
    let target = tree.render_target(detail.element);
    if let Some(target) = target {
        compositor.set_target_visible(target, false);
    }
    tracer.hide(&HideEvent {
        name: detail.name(),
        element: detail.element,
        target,
    });
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use kurbo::Size;

    use super::*;
    use crate::compositor::{CompositorCall, RecordingCompositor};
    use crate::tag::{Layering, TransitionTag};

    struct Harness {
        tree: ElementTree,
        transitions: Transitions,
        compositor: RecordingCompositor,
        next_target: u32,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                tree: ElementTree::new(),
                transitions: Transitions::new(TransitionConfig::new()),
                compositor: RecordingCompositor::new(),
                next_target: 0,
            }
        }

        /// Adds a measured element tagged `tag` under `page`.
        fn tagged(&mut self, page: ElementId, tag: TransitionTag) -> ElementId {
            let el = self.tree.create_element();
            self.tree.add_child(page, el);
            self.tree.set_tag(el, Some(tag));
            self.next_target += 1;
            self.tree
                .set_render_target(el, Some(RenderTargetId(self.next_target)));
            self.tree.set_size(el, Some(Size::new(100.0, 40.0)));
            el
        }

        fn sync(&mut self) {
            let changes = self.tree.take_changes();
            self.transitions.process(
                &self.tree,
                &changes,
                &mut self.compositor,
                &mut Tracer::none(),
            );
        }

        fn navigate(&mut self, stack: &[ElementId], event: NavigationEvent) {
            self.transitions.navigate(
                &mut self.tree,
                stack,
                event,
                &mut self.compositor,
                &mut Tracer::none(),
            );
        }

        fn push(&mut self, stack: &[ElementId]) {
            let page = *stack.last().unwrap();
            self.navigate(stack, NavigationEvent::PushRequested { page, before: None });
            self.navigate(stack, NavigationEvent::Pushed { page });
        }

        fn pop(&mut self, stack: &[ElementId]) {
            let page = *stack.last().unwrap();
            self.navigate(stack, NavigationEvent::PopRequested { page });
            self.navigate(&stack[..stack.len() - 1], NavigationEvent::Popped { page });
        }
    }

    #[test]
    fn matching_hero_starts_once_on_push() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(a, TransitionTag::new("hero"));
        let dest = h.tagged(b, TransitionTag::new("hero"));
        h.sync();

        h.push(&[a, b]);

        assert_eq!(h.compositor.prepared(), ["hero"]);
        let dest_target = h.tree.render_target(dest).unwrap();
        assert_eq!(h.compositor.started(), [("hero", dest_target)]);
        assert!(h.compositor.cancelled().is_empty());
        assert_eq!(h.transitions.phase(), TransitionPhase::Done);
    }

    #[test]
    fn background_layers_prepare_first() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(a, TransitionTag::new("title"));
        h.tagged(a, TransitionTag::new("bgLayer").with_layering(Layering::Background));
        h.sync();

        h.navigate(
            &[a, b],
            NavigationEvent::PushRequested {
                page: b,
                before: None,
            },
        );

        assert_eq!(h.compositor.prepared(), ["bgLayer", "title"]);
        assert_eq!(h.transitions.phase(), TransitionPhase::Preparing);
    }

    #[test]
    fn unmatched_source_is_cancelled_and_hidden_on_pop() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(a, TransitionTag::new("other"));
        let hero = h.tagged(b, TransitionTag::new("hero"));
        h.sync();

        h.pop(&[a, b]);

        assert_eq!(h.compositor.cancelled(), ["hero"]);
        assert!(!h.tree.is_visible(hero));
        assert_eq!(
            h.compositor.hidden_targets(),
            [h.tree.render_target(hero).unwrap()]
        );
        assert!(h.compositor.started().is_empty());
    }

    #[test]
    fn unmatched_source_stays_visible_on_push() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        let hero = h.tagged(a, TransitionTag::new("hero"));
        h.sync();

        h.push(&[a, b]);

        assert_eq!(h.compositor.cancelled(), ["hero"]);
        assert!(h.tree.is_visible(hero));
        assert!(h.compositor.hidden_targets().is_empty());
    }

    #[test]
    fn unmeasured_destination_starts_on_first_resize_only() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(a, TransitionTag::new("hero"));
        let dest = h.tagged(b, TransitionTag::new("hero"));
        h.tree.set_size(dest, None);
        h.sync();

        h.push(&[a, b]);
        assert!(h.compositor.started().is_empty(), "must wait for layout");
        assert!(h.transitions.has_deferred_start(dest));

        // The host swapped the render target before layout completed.
        h.tree.set_render_target(dest, Some(RenderTargetId(99)));
        h.tree.set_size(dest, Some(Size::new(10.0, 10.0)));
        h.sync();
        assert_eq!(h.compositor.started(), [("hero", RenderTargetId(99))]);
        assert!(!h.transitions.has_deferred_start(dest));

        h.tree.set_size(dest, Some(Size::new(20.0, 20.0)));
        h.sync();
        assert_eq!(h.compositor.started().len(), 1, "continuation is one-shot");
    }

    #[test]
    fn newer_deferred_start_replaces_waiting_one() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        let src = h.tagged(a, TransitionTag::new("hero"));
        let dest = h.tagged(b, TransitionTag::new("hero"));
        h.tree.set_size(dest, None);
        h.sync();

        // The first deferred start is still waiting when the second push
        // prepares a fresh animation.
        h.push(&[a, b]);
        h.pop(&[a, b]);
        h.push(&[a, b]);

        h.tree.set_size(dest, Some(Size::new(10.0, 10.0)));
        h.sync();

        let src_target = h.tree.render_target(src).unwrap();
        let dest_target = h.tree.render_target(dest).unwrap();
        assert_eq!(
            h.compositor.started(),
            vec![("hero", src_target), ("hero", dest_target)],
            "the first resize starts the current animation"
        );
        let dest_starts = h
            .compositor
            .calls()
            .iter()
            .filter(|c| {
                matches!(c, CompositorCall::Start { target, .. } if *target == dest_target)
            })
            .count();
        assert_eq!(dest_starts, 1, "the superseded start never fires");
        assert!(!h.transitions.has_deferred_start(dest));
    }

    #[test]
    fn element_removed_from_page_is_unregistered() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        let el = h.tagged(a, TransitionTag::new("hero"));
        h.sync();

        h.tree.remove_from_parent(el);
        h.sync();
        assert!(h.transitions.registry().is_empty());
        assert!(h.transitions.binder().is_pending(el));

        h.push(&[a, b]);
        assert!(h.compositor.prepared().is_empty());

        h.tree.add_child(b, el);
        h.sync();
        assert_eq!(h.transitions.binder().bound_page(el), Some(b));
        assert_eq!(h.transitions.registry().details(b).len(), 1);
    }

    #[test]
    fn move_between_pages_keeps_binding() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        let el = h.tagged(a, TransitionTag::new("hero"));
        h.sync();

        h.tree.reparent(el, b);
        h.sync();
        assert_eq!(h.transitions.binder().bound_page(el), Some(a));
        assert_eq!(h.transitions.registry().details(a).len(), 1);
    }

    #[test]
    fn pop_of_lone_page_is_graceful() {
        let mut h = Harness::new();
        let root = h.tree.create_page();
        h.tagged(root, TransitionTag::new("hero"));
        h.sync();

        h.navigate(&[root], NavigationEvent::PopRequested { page: root });
        h.navigate(&[], NavigationEvent::Popped { page: root });

        // The lone page is still the source, so its hero is prepared and
        // then cancelled for lack of a destination.
        assert_eq!(h.compositor.prepared(), ["hero"]);
        assert_eq!(h.compositor.cancelled(), ["hero"]);
        assert_eq!(h.transitions.phase(), TransitionPhase::Done);
    }

    #[test]
    fn push_without_source_is_inert() {
        let mut h = Harness::new();
        let root = h.tree.create_page();
        h.tagged(root, TransitionTag::new("hero"));
        h.sync();

        h.push(&[root]);

        assert!(h.compositor.calls().is_empty());
        assert_eq!(h.transitions.phase(), TransitionPhase::Done);
    }

    #[test]
    fn empty_from_map_reconciliation_is_inert() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(b, TransitionTag::new("hero"));
        h.sync();

        h.push(&[a, b]);

        assert_eq!(
            h.compositor.calls(),
            [CompositorCall::SetDefaultDuration(Duration::from_millis(300))]
        );
    }

    #[test]
    fn from_map_is_consumed_by_one_execute() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(a, TransitionTag::new("hero"));
        h.sync();

        h.navigate(
            &[a, b],
            NavigationEvent::PushRequested {
                page: b,
                before: None,
            },
        );
        assert!(h.transitions.page_state(a).unwrap().has_from_map());

        h.navigate(&[a, b], NavigationEvent::Pushed { page: b });
        assert!(!h.transitions.page_state(a).unwrap().has_from_map());
        assert_eq!(h.compositor.cancelled(), ["hero"]);

        h.compositor.clear_calls();
        h.navigate(&[a, b], NavigationEvent::Pushed { page: b });
        assert!(h.compositor.cancelled().is_empty(), "nothing left to reconcile");
    }

    #[test]
    fn abandoned_prepare_does_not_leak() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        let c = h.tree.create_page();
        h.tagged(a, TransitionTag::new("hero"));
        h.sync();

        h.navigate(
            &[a, b],
            NavigationEvent::PushRequested {
                page: b,
                before: None,
            },
        );
        // A different navigation takes over before the push completes.
        h.navigate(
            &[b, c],
            NavigationEvent::PushRequested {
                page: c,
                before: None,
            },
        );
        assert!(!h.transitions.page_state(a).unwrap().has_from_map());
    }

    #[test]
    fn explicit_before_page_is_the_source() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        let c = h.tree.create_page();
        h.tagged(a, TransitionTag::new("fromA"));
        h.tagged(b, TransitionTag::new("fromB"));
        h.sync();

        h.navigate(
            &[a, b, c],
            NavigationEvent::PushRequested {
                page: c,
                before: Some(a),
            },
        );
        assert_eq!(h.compositor.prepared(), ["fromA"]);
    }

    #[test]
    fn push_uses_source_group_and_destination_group() {
        let mut h = Harness::new();
        let list = h.tree.create_page();
        let detail = h.tree.create_page();
        h.tagged(list, TransitionTag::new("photo").with_group("1"));
        h.tagged(list, TransitionTag::new("photo").with_group("2"));
        let dest = h.tagged(detail, TransitionTag::new("photo"));
        h.sync();

        h.transitions
            .set_selected_group(list, Some(String::from("2")));
        h.transitions.set_duration(list, Duration::from_millis(150));
        h.push(&[list, detail]);

        let prepares: Vec<_> = h
            .compositor
            .calls()
            .iter()
            .filter_map(|c| match c {
                CompositorCall::Prepare { target, .. } => Some(*target),
                _ => None,
            })
            .collect();
        assert_eq!(prepares, [RenderTargetId(2)], "only group 2 is captured");
        assert_eq!(
            h.compositor.default_duration(),
            Some(Duration::from_millis(150))
        );
        assert_eq!(
            h.compositor.started(),
            [("photo", h.tree.render_target(dest).unwrap())]
        );
    }

    #[test]
    fn pop_ignores_source_group() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(b, TransitionTag::new("x").with_group("1"));
        h.tagged(b, TransitionTag::new("y").with_group("2"));
        h.sync();

        h.transitions.set_selected_group(b, Some(String::from("1")));
        h.navigate(&[a, b], NavigationEvent::PopRequested { page: b });
        assert_eq!(h.compositor.prepared(), ["x", "y"]);
    }

    #[test]
    fn dead_and_untargeted_elements_are_skipped() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        let gone = h.tagged(a, TransitionTag::new("gone"));
        let bare = h.tagged(a, TransitionTag::new("bare"));
        h.tagged(a, TransitionTag::new("ok"));
        h.sync();

        // Kill `gone` without telling the engine; clear `bare`'s target.
        h.tree.remove_from_parent(gone);
        h.tree.destroy_element(gone);
        h.tree.set_render_target(bare, None);

        h.navigate(
            &[a, b],
            NavigationEvent::PushRequested {
                page: b,
                before: None,
            },
        );
        assert_eq!(h.compositor.prepared(), ["ok"]);
    }

    #[test]
    fn missing_animation_is_skipped() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(b, TransitionTag::new("hero"));
        h.sync();

        // No prepare happened, so the compositor has nothing under "hero".
        h.navigate(&[a, b], NavigationEvent::Pushed { page: b });
        assert!(h.compositor.started().is_empty());
    }

    #[test]
    fn stack_only_events_do_nothing() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(a, TransitionTag::new("hero"));
        h.sync();

        for event in [
            NavigationEvent::PopToRootRequested,
            NavigationEvent::PoppedToRoot,
            NavigationEvent::InsertPageBeforeRequested { page: b, before: a },
            NavigationEvent::RemovePageRequested { page: b },
        ] {
            h.navigate(&[a, b], event);
        }
        assert!(h.compositor.calls().is_empty());
        assert_eq!(h.transitions.phase(), TransitionPhase::Idle);
    }

    #[test]
    fn tagging_before_attachment_binds_later() {
        let mut h = Harness::new();
        let page = h.tree.create_page();
        let container = h.tree.create_element();
        let el = h.tree.create_element();
        h.tree.add_child(container, el);
        h.tree.set_tag(el, Some(TransitionTag::new("hero")));
        h.tree.set_render_target(el, Some(RenderTargetId(5)));
        h.sync();
        assert!(h.transitions.binder().is_pending(el));
        assert!(h.transitions.registry().details(page).is_empty());

        h.tree.add_child(page, container);
        h.sync();
        assert_eq!(h.transitions.binder().bound_page(el), Some(page));
        assert_eq!(h.transitions.registry().details(page).len(), 1);
    }

    #[test]
    fn shell_page_receives_every_binding() {
        let mut h = Harness::new();
        let shell = h.tree.create_page();
        h.transitions.set_shell_page(Some(shell));

        let orphan = h.tree.create_element();
        h.tree.set_tag(orphan, Some(TransitionTag::new("hero")));
        h.tree.set_render_target(orphan, Some(RenderTargetId(1)));
        h.sync();

        assert_eq!(h.transitions.registry().details(shell).len(), 1);
    }

    #[test]
    fn retag_retarget_and_untag_update_the_registry() {
        let mut h = Harness::new();
        let page = h.tree.create_page();
        let first = h.tagged(page, TransitionTag::new("first"));
        h.tagged(page, TransitionTag::new("second"));
        h.sync();

        h.tree.set_render_target(first, Some(RenderTargetId(42)));
        h.sync();
        let details = h.transitions.registry().details(page);
        assert_eq!(details[0].name(), "first");
        assert_eq!(details[0].target, RenderTargetId(42));

        h.tree.set_tag(first, Some(TransitionTag::new("renamed")));
        h.sync();
        let names: Vec<_> = h
            .transitions
            .registry()
            .details(page)
            .iter()
            .map(TransitionDetail::name)
            .collect();
        assert_eq!(names, ["second", "renamed"]);

        h.tree.set_tag(first, None);
        h.sync();
        assert_eq!(h.transitions.registry().details(page).len(), 1);
        assert_eq!(h.transitions.binder().bound_page(first), None);
    }

    #[test]
    fn destroyed_element_is_unregistered() {
        let mut h = Harness::new();
        let page = h.tree.create_page();
        let el = h.tagged(page, TransitionTag::new("hero"));
        h.sync();

        h.tree.remove_from_parent(el);
        h.tree.destroy_element(el);
        h.sync();
        assert!(h.transitions.registry().is_empty());
    }

    #[test]
    fn destroyed_element_drops_its_deferred_start() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        h.tagged(a, TransitionTag::new("hero"));
        let dest = h.tagged(b, TransitionTag::new("hero"));
        h.tree.set_size(dest, None);
        h.sync();
        h.push(&[a, b]);
        assert!(h.transitions.has_deferred_start(dest));

        h.tree.remove_from_parent(dest);
        h.tree.destroy_element(dest);
        h.sync();
        assert!(!h.transitions.has_deferred_start(dest));
    }

    #[test]
    fn removed_page_is_forgotten() {
        let mut h = Harness::new();
        let page = h.tree.create_page();
        let el = h.tagged(page, TransitionTag::new("hero"));
        h.sync();
        h.transitions.set_duration(page, Duration::from_millis(10));

        h.transitions.remove_page(page, &mut Tracer::none());

        assert!(h.transitions.registry().is_empty());
        assert!(h.transitions.page_state(page).is_none());
        assert_eq!(h.transitions.binder().bound_page(el), None);
        assert_eq!(h.transitions.duration(page), Duration::from_millis(300));
    }

    #[test]
    fn round_trip_push_then_pop() {
        let mut h = Harness::new();
        let a = h.tree.create_page();
        let b = h.tree.create_page();
        let src = h.tagged(a, TransitionTag::new("hero"));
        let dest = h.tagged(b, TransitionTag::new("hero"));
        h.sync();

        h.push(&[a, b]);
        h.pop(&[a, b]);

        let src_target = h.tree.render_target(src).unwrap();
        let dest_target = h.tree.render_target(dest).unwrap();
        assert_eq!(
            h.compositor.started(),
            vec![("hero", dest_target), ("hero", src_target)]
        );
        assert!(h.compositor.cancelled().is_empty());
        assert!(h.tree.is_visible(dest), "matched elements stay visible");
    }
}
