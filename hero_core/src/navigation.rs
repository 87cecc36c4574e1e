// Copyright 2026 the Hero Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation lifecycle vocabulary.
//!
//! The host's navigation container reports its lifecycle as
//! [`NavigationEvent`]s. Each verb comes in two halves:
//!
//! - `PushRequested` fires **after** the destination page is on the stack;
//!   `Pushed` follows once the stack is stable.
//! - `PopRequested` fires **before** the stack is updated (the page being
//!   removed is still on top); `Popped` follows after it was removed.
//!
//! The remaining events navigate without shared-element choreography.

use crate::element::ElementId;

/// Which navigation verb a transition belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavDirection {
    /// A page is pushed on top of the stack.
    Push,
    /// The top page is popped.
    Pop,
}

impl NavDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Push => Self::Pop,
            Self::Pop => Self::Push,
        }
    }

    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Pop => "pop",
        }
    }
}

/// A lifecycle event from the host's navigation container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationEvent {
    /// `page` was placed on top of the stack and is about to be shown.
    PushRequested {
        /// The destination page, now on top of the stack.
        page: ElementId,
        /// The page the push originates from, if the host knows it.
        before: Option<ElementId>,
    },
    /// The push of `page` completed.
    Pushed {
        /// The pushed page.
        page: ElementId,
    },
    /// `page`, still on top of the stack, is about to be popped.
    PopRequested {
        /// The page being popped.
        page: ElementId,
    },
    /// `page` was removed from the stack.
    Popped {
        /// The popped page.
        page: ElementId,
    },
    /// Every page above the root is about to be removed.
    PopToRootRequested,
    /// The stack was reduced to its root.
    PoppedToRoot,
    /// `page` is about to be inserted below `before`.
    InsertPageBeforeRequested {
        /// The inserted page.
        page: ElementId,
        /// The page it is inserted before.
        before: ElementId,
    },
    /// `page` is about to be removed from the middle of the stack.
    RemovePageRequested {
        /// The removed page.
        page: ElementId,
    },
}

/// Where the orchestrator is within a navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    /// No navigation has been seen yet.
    #[default]
    Idle,
    /// The source side has been captured; waiting for arrival.
    Preparing,
    /// Destination-side animations are being started or cancelled.
    Executing,
    /// The last navigation finished executing.
    Done,
}

impl TransitionPhase {
    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preparing => "preparing",
            Self::Executing => "executing",
            Self::Done => "done",
        }
    }
}

/// Returns the page directly below the top of `stack`.
#[must_use]
pub fn below_top(stack: &[ElementId]) -> Option<ElementId> {
    stack.len().checked_sub(2).map(|i| stack[i])
}
