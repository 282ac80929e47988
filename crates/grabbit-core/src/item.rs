#![forbid(unsafe_code)]

//! Item identity, capability gating, and transient interaction state.
//!
//! Every participant in a drag-drop interaction is addressed by an opaque
//! [`ItemKey`] and belongs to exactly one set addressed by a [`SetId`]. Keys
//! are stable across reorders and transfers; hosts correlate them with their
//! own data model.
//!
//! Transient per-item state (hovered, pressed, dragging, ...) lives here
//! rather than in host view objects so it survives host re-renders: the
//! registry owning these flags is keyed by item, not by any view instance.
//!
//! # Capability semantics
//!
//! - [`Capabilities::DRAG`] is consulted exactly once per gesture, at drag
//!   start. A drag that already started is never aborted by the flag
//!   flipping mid-gesture.
//! - [`Capabilities::DROP`] is re-checked at every drag-enter and again at
//!   drop time.
//! - [`Capabilities::TOUCH`] and [`Capabilities::KEYBOARD`] gate whether the
//!   respective modality may address the item at all.

use bitflags::bitflags;

use crate::scope::Scope;

/// Opaque identifier for a drag-drop item. Stable across reorders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey(pub u64);

/// Opaque identifier for an ordered set of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(pub u64);

bitflags! {
    /// What an item is allowed to participate in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Item can be picked up and dragged.
        const DRAG     = 0b0001;
        /// Item accepts drops.
        const DROP     = 0b0010;
        /// Item responds to touch input.
        const TOUCH    = 0b0100;
        /// Item responds to keyboard grab/navigate input.
        const KEYBOARD = 0b1000;
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

bitflags! {
    /// Transient visual state of an item, owned by the core.
    ///
    /// `DRAGGING` is the *deferred* visual flag: it is toggled through the
    /// next-tier deferred queue, one turn after the logical drag state
    /// changes, so hosts never hide the element in the middle of the
    /// platform's drag-start processing.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InteractionFlags: u8 {
        /// Pointer (or finger) is over the item; frozen while dragging.
        const HOVERED      = 0b0000_0001;
        /// A press is being held on the item.
        const PRESSED      = 0b0000_0010;
        /// The item is held and eligible to start dragging.
        const GRABBED      = 0b0000_0100;
        /// Deferred visual dragging flag.
        const DRAGGING     = 0b0000_1000;
        /// Something compatible is being dragged over this item.
        const DRAGGED_OVER = 0b0001_0000;
        /// The item has keyboard focus (host-reported).
        const FOCUSED      = 0b0010_0000;
        /// A keyboard grab latch is active on the item.
        const KEY_GRAB     = 0b0100_0000;
    }
}

/// What a successful drop on this item means, surfaced to platform
/// integrations so they can prime native transfer-effect hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DropEffect {
    /// The dragged item moves here.
    #[default]
    Move,
    /// The dragged item is copied here.
    Copy,
    /// A link/reference to the dragged item is created here.
    Link,
    /// No effect; drop feedback should show "not allowed".
    None,
}

/// Per-item configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemConfig {
    /// Scope this item offers when dragged. `None` inherits the owning
    /// set's default drag scope.
    pub drag_scope: Option<Scope>,

    /// Scope this item accepts drops from. `None` inherits the owning
    /// set's default drop scope.
    pub drop_scope: Option<Scope>,

    /// Capability gates. Defaults to everything enabled.
    pub capabilities: Capabilities,

    /// Named sub-part a pointer/touch press must land on to arm a drag.
    /// `None` means any press location arms.
    pub handle: Option<String>,

    /// Effect hint for drops onto this item.
    pub effect: DropEffect,
}

impl ItemConfig {
    /// Config with all capabilities enabled and no scopes or handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the offered drag scope.
    #[must_use]
    pub fn with_drag_scope(mut self, scope: Scope) -> Self {
        self.drag_scope = Some(scope);
        self
    }

    /// Set the accepted drop scope.
    #[must_use]
    pub fn with_drop_scope(mut self, scope: Scope) -> Self {
        self.drop_scope = Some(scope);
        self
    }

    /// Replace the capability set.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Require presses to land on the named sub-part to arm a drag.
    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    /// Set the drop effect hint.
    #[must_use]
    pub fn with_effect(mut self, effect: DropEffect) -> Self {
        self.effect = effect;
        self
    }
}
