#![forbid(unsafe_code)]

//! Two-tier deferred work queue.
//!
//! Some gesture side effects must not run inline with input processing:
//! toggling the visual dragging flag inside the platform's drag-start
//! dispatch hides the element mid-drag on some platforms, and focus
//! restoration or animation measurement is meaningless before the host has
//! re-rendered. The original run-loop offered two hooks for this; they map
//! to the two tiers here:
//!
//! - [`DeferPhase::Next`] — "run immediately next": runs before anything
//!   else in the flush cycle. Both the set and the clear of the dragging
//!   flag go here, in FIFO order, so a start/end pair always applies in
//!   order.
//! - [`DeferPhase::AfterRender`] — runs after the host applied a render:
//!   focus restoration, animation kickoff (which measures fresh geometry).
//!
//! # Invariants
//!
//! - Within one flush cycle, every `Next` action runs before any
//!   `AfterRender` action, including `Next` actions scheduled *by* `Next`
//!   actions (callers drain `Next` to exhaustion first).
//! - Each tier is FIFO.
//!
//! Actions are data, not closures; the manager interprets them.

use std::collections::VecDeque;

use crate::item::{ItemKey, SetId};

/// Which tier an action runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferPhase {
    /// Run immediately next, before any after-render work.
    Next,
    /// Run after the host has applied a render.
    AfterRender,
}

/// A deferred side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    /// Toggle the visual dragging flag of an item.
    DraggingFlag {
        /// The item to toggle.
        item: ItemKey,
        /// New flag value.
        on: bool,
    },

    /// Ask the host to restore keyboard focus to an item.
    RestoreFocus {
        /// The item that should regain focus.
        item: ItemKey,
    },

    /// Measure and start an animation for a mutated set.
    Animate {
        /// The mutated set.
        set: SetId,
        /// Key order before the mutation (the "from" of the animation).
        previous: Vec<ItemKey>,
    },
}

/// FIFO queues for both tiers.
#[derive(Debug, Default)]
pub struct DeferQueue {
    next: VecDeque<DeferredAction>,
    after_render: VecDeque<DeferredAction>,
}

impl DeferQueue {
    /// Empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an action in the given tier.
    pub fn schedule(&mut self, phase: DeferPhase, action: DeferredAction) {
        match phase {
            DeferPhase::Next => self.next.push_back(action),
            DeferPhase::AfterRender => self.after_render.push_back(action),
        }
    }

    /// Take the currently queued `Next` actions, FIFO.
    ///
    /// Callers loop until this returns empty before touching the
    /// after-render tier, so follow-up work scheduled by an action still
    /// runs in the right cycle.
    pub fn drain_next(&mut self) -> Vec<DeferredAction> {
        self.next.drain(..).collect()
    }

    /// Take the currently queued `AfterRender` actions, FIFO.
    pub fn drain_after_render(&mut self) -> Vec<DeferredAction> {
        self.after_render.drain(..).collect()
    }

    /// Whether both tiers are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.next.is_empty() && self.after_render.is_empty()
    }

    /// Number of queued actions in a tier.
    #[must_use]
    pub fn len(&self, phase: DeferPhase) -> usize {
        match phase {
            DeferPhase::Next => self.next.len(),
            DeferPhase::AfterRender => self.after_render.len(),
        }
    }
}
