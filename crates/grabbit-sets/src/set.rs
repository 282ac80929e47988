#![forbid(unsafe_code)]

//! Ordered item sets and reorder strategies.
//!
//! An [`ItemSet`] owns one ordered list of item keys and the configuration
//! shared by its members: default scopes, the reorder strategy, the revert
//! policy, and per-modality enablement. It is a pure list engine — session
//! bookkeeping (who is dragged, what was hovered last, whether the drop
//! landed) lives in the drag session, and the orchestrator decides when to
//! call in here.
//!
//! # Invariants
//!
//! - Every reorder is a permutation: no key is lost or duplicated by
//!   either strategy.
//! - A reorder or restore naming an unknown key is a silent no-op; stale
//!   events are an expected race, not an error.
//! - Restore replaces the order verbatim with the snapshot it is given.

use grabbit_core::item::{ItemConfig, ItemKey, SetId};
use grabbit_core::scope::Scope;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How a drag-over rearranges the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderStrategy {
    /// Remove the dragged item and reinsert it at the target's
    /// pre-removal index, shifting intervening items by one slot.
    #[default]
    Insertion,
    /// Exchange the dragged and target slots, leaving all others
    /// untouched.
    Swap,
}

/// When a finished gesture restores the order captured at drag start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertPolicy {
    /// Revert when the user explicitly cancelled the drag.
    pub reset_after_drag_cancel: bool,
    /// Revert when the gesture ended outside any drop target.
    pub reset_after_drop_outside: bool,
}

impl Default for RevertPolicy {
    fn default() -> Self {
        Self {
            reset_after_drag_cancel: true,
            reset_after_drop_outside: false,
        }
    }
}

impl RevertPolicy {
    /// Whether a gesture with this outcome reverts the order.
    #[must_use]
    pub const fn should_reset(&self, cancelled: bool, drop_succeeded: bool) -> bool {
        (self.reset_after_drag_cancel && cancelled)
            || (self.reset_after_drop_outside && !cancelled && !drop_succeeded)
    }
}

/// Per-set configuration.
#[derive(Debug, Clone)]
pub struct SetConfig {
    /// Drag scope for members without an item-level override.
    pub drag_scope: Scope,
    /// Drop scope for members without an item-level override.
    pub drop_scope: Scope,
    /// Reorder strategy applied on drag-over.
    pub strategy: ReorderStrategy,
    /// Revert policy applied at gesture end.
    pub revert: RevertPolicy,
    /// Whether members accept synthesized touch drags.
    pub enable_touch: bool,
    /// Whether members accept keyboard grab-and-step drags.
    pub enable_keyboard: bool,
    /// Whether order changes are handed to the animator.
    pub enable_animation: bool,
}

impl SetConfig {
    /// Defaults: wildcard scopes, insertion reorder, revert on cancel
    /// only, touch and keyboard enabled, animation off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            drag_scope: Scope::Any,
            drop_scope: Scope::Any,
            strategy: ReorderStrategy::default(),
            revert: RevertPolicy::default(),
            enable_touch: true,
            enable_keyboard: true,
            enable_animation: false,
        }
    }

    /// Set the default drag scope.
    #[must_use]
    pub fn with_drag_scope(mut self, scope: Scope) -> Self {
        self.drag_scope = scope;
        self
    }

    /// Set the default drop scope.
    #[must_use]
    pub fn with_drop_scope(mut self, scope: Scope) -> Self {
        self.drop_scope = scope;
        self
    }

    /// Set the reorder strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ReorderStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the revert policy.
    #[must_use]
    pub fn with_revert(mut self, revert: RevertPolicy) -> Self {
        self.revert = revert;
        self
    }

    /// Enable or disable touch drags for members.
    #[must_use]
    pub fn with_touch(mut self, enabled: bool) -> Self {
        self.enable_touch = enabled;
        self
    }

    /// Enable or disable keyboard drags for members.
    #[must_use]
    pub fn with_keyboard(mut self, enabled: bool) -> Self {
        self.enable_keyboard = enabled;
        self
    }

    /// Enable or disable reorder animation.
    #[must_use]
    pub fn with_animation(mut self, enabled: bool) -> Self {
        self.enable_animation = enabled;
        self
    }

    /// The drag scope in effect for a member: its own override, or this
    /// set's default.
    #[must_use]
    pub fn drag_scope_for<'a>(&'a self, item: &'a ItemConfig) -> &'a Scope {
        item.drag_scope.as_ref().unwrap_or(&self.drag_scope)
    }

    /// The drop scope in effect for a member.
    #[must_use]
    pub fn drop_scope_for<'a>(&'a self, item: &'a ItemConfig) -> &'a Scope {
        item.drop_scope.as_ref().unwrap_or(&self.drop_scope)
    }
}

impl Default for SetConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Before/after key order of one mutation, for observers and animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderChange {
    /// Order before the mutation.
    pub previous: Vec<ItemKey>,
    /// Order after the mutation.
    pub current: Vec<ItemKey>,
}

/// Terminal outcome of one gesture, reported exactly once at drag end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropReport {
    /// The item that was dragged.
    pub dragged: ItemKey,
    /// Last target hovered during the gesture. A drop lands here; retained
    /// even when the final event fires on the dragged item itself after
    /// the order already changed under the pointer.
    pub drop_target: Option<ItemKey>,
    /// Whether the gesture ended with a committed drop.
    pub drop_succeeded: bool,
    /// Whether the gesture was explicitly cancelled.
    pub cancelled: bool,
    /// Whether the finished gesture restored the starting order.
    pub did_revert: bool,
}

// ---------------------------------------------------------------------------
// Set
// ---------------------------------------------------------------------------

/// One ordered list of items.
#[derive(Debug)]
pub struct ItemSet {
    id: SetId,
    config: SetConfig,
    order: Vec<ItemKey>,
}

impl ItemSet {
    /// Empty set with default configuration.
    #[must_use]
    pub fn new(id: SetId) -> Self {
        Self::with_config(id, SetConfig::new())
    }

    /// Empty set with explicit configuration.
    #[must_use]
    pub fn with_config(id: SetId, config: SetConfig) -> Self {
        Self {
            id,
            config,
            order: Vec::new(),
        }
    }

    /// This set's identifier.
    #[must_use]
    pub const fn id(&self) -> SetId {
        self.id
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &SetConfig {
        &self.config
    }

    /// Mutable configuration access.
    pub fn config_mut(&mut self) -> &mut SetConfig {
        &mut self.config
    }

    /// Current key order.
    #[must_use]
    pub fn order(&self) -> &[ItemKey] {
        &self.order
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether `key` is a member.
    #[must_use]
    pub fn contains(&self, key: ItemKey) -> bool {
        self.order.contains(&key)
    }

    /// Position of `key`, if a member.
    #[must_use]
    pub fn index_of(&self, key: ItemKey) -> Option<usize> {
        self.order.iter().position(|k| *k == key)
    }

    /// Append a member.
    pub fn push(&mut self, key: ItemKey) {
        self.order.push(key);
    }

    /// Insert a member at `index`, clamped to the current length.
    pub fn insert_at(&mut self, index: usize, key: ItemKey) {
        let index = index.min(self.order.len());
        self.order.insert(index, key);
    }

    /// Remove a member, returning the position it held.
    pub fn remove(&mut self, key: ItemKey) -> Option<usize> {
        let index = self.index_of(key)?;
        self.order.remove(index);
        Some(index)
    }

    /// Apply the configured reorder strategy for `dragged` hovering over
    /// `target`.
    ///
    /// Returns the before/after order, or `None` when nothing changed:
    /// self-over, or either key unknown (a stale event).
    pub fn reorder(&mut self, dragged: ItemKey, target: ItemKey) -> Option<OrderChange> {
        if dragged == target {
            return None;
        }
        let drag_index = self.index_of(dragged)?;
        let drop_index = self.index_of(target)?;

        let previous = self.order.clone();
        match self.config.strategy {
            ReorderStrategy::Insertion => {
                self.order.remove(drag_index);
                // The pre-removal target index addresses the slot just
                // past the target once the dragged item is out, which is
                // what puts the dragged item under the pointer.
                self.order.insert(drop_index, dragged);
            }
            ReorderStrategy::Swap => self.order.swap(drag_index, drop_index),
        }
        Some(OrderChange {
            previous,
            current: self.order.clone(),
        })
    }

    /// Replace the order verbatim with `snapshot`.
    ///
    /// Returns the before/after order, or `None` when the snapshot equals
    /// the current order.
    pub fn restore(&mut self, snapshot: Vec<ItemKey>) -> Option<OrderChange> {
        if snapshot == self.order {
            return None;
        }
        let previous = std::mem::replace(&mut self.order, snapshot);
        Some(OrderChange {
            previous,
            current: self.order.clone(),
        })
    }
}
